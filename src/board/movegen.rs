//! Pseudo-legal move generation.
//!
//! Every generator lists captures before quiet moves; the search's move
//! scoring partitions the list on that boundary. Legality (not leaving the
//! own king in check) is resolved by `try_move` on a copy.

use super::attacks::{between, slider_attacks, KING_ATTACKS, KNIGHT_ATTACKS, PAWN_ATTACKS};
use super::types::{
    Bitboard, Color, Move, MoveList, Piece, Square, CASTLE_BLACK_K, CASTLE_BLACK_Q,
    CASTLE_WHITE_K, CASTLE_WHITE_Q,
};
use super::Board;

impl Board {
    pub(crate) fn find_king(&self, color: Color) -> Option<Square> {
        self.pieces[color.index()][Piece::King.index()].lsb()
    }

    /// True if `attacker_color` attacks `square`.
    #[must_use]
    pub fn is_square_attacked(&self, square: Square, attacker_color: Color) -> bool {
        let sq = square.index();
        let c = attacker_color.index();

        let pawn_sources = PAWN_ATTACKS[attacker_color.opponent().index()][sq];
        if self.pieces[c][Piece::Pawn.index()].0 & pawn_sources != 0 {
            return true;
        }
        if self.pieces[c][Piece::Knight.index()].0 & KNIGHT_ATTACKS[sq] != 0 {
            return true;
        }
        if self.pieces[c][Piece::King.index()].0 & KING_ATTACKS[sq] != 0 {
            return true;
        }

        let straight =
            self.pieces[c][Piece::Rook.index()].0 | self.pieces[c][Piece::Queen.index()].0;
        if slider_attacks(sq, self.all_occupied.0, false) & straight != 0 {
            return true;
        }
        let diagonal =
            self.pieces[c][Piece::Bishop.index()].0 | self.pieces[c][Piece::Queen.index()].0;
        slider_attacks(sq, self.all_occupied.0, true) & diagonal != 0
    }

    #[must_use]
    pub fn is_in_check(&self, color: Color) -> bool {
        match self.find_king(color) {
            Some(king_sq) => self.is_square_attacked(king_sq, color.opponent()),
            None => false,
        }
    }

    /// All pieces of both colors attacking `sq` under the given occupancy.
    pub(crate) fn attackers_to(&self, sq: Square, occupancy: u64) -> Bitboard {
        let idx = sq.index();
        let mut attackers = 0u64;

        attackers |= PAWN_ATTACKS[1][idx] & self.pieces[0][Piece::Pawn.index()].0;
        attackers |= PAWN_ATTACKS[0][idx] & self.pieces[1][Piece::Pawn.index()].0;
        attackers |= KNIGHT_ATTACKS[idx]
            & (self.pieces[0][Piece::Knight.index()].0 | self.pieces[1][Piece::Knight.index()].0);
        attackers |= KING_ATTACKS[idx]
            & (self.pieces[0][Piece::King.index()].0 | self.pieces[1][Piece::King.index()].0);

        let straight = self.pieces[0][Piece::Rook.index()].0
            | self.pieces[1][Piece::Rook.index()].0
            | self.pieces[0][Piece::Queen.index()].0
            | self.pieces[1][Piece::Queen.index()].0;
        attackers |= slider_attacks(idx, occupancy, false) & straight;

        let diagonal = self.pieces[0][Piece::Bishop.index()].0
            | self.pieces[1][Piece::Bishop.index()].0
            | self.pieces[0][Piece::Queen.index()].0
            | self.pieces[1][Piece::Queen.index()].0;
        attackers |= slider_attacks(idx, occupancy, true) & diagonal;

        Bitboard(attackers & occupancy)
    }

    fn piece_targets(&self, piece: Piece, from: Square, color: Color) -> u64 {
        let idx = from.index();
        match piece {
            Piece::Pawn => PAWN_ATTACKS[color.index()][idx],
            Piece::Knight => KNIGHT_ATTACKS[idx],
            Piece::Bishop => slider_attacks(idx, self.all_occupied.0, true),
            Piece::Rook => slider_attacks(idx, self.all_occupied.0, false),
            Piece::Queen => {
                slider_attacks(idx, self.all_occupied.0, true)
                    | slider_attacks(idx, self.all_occupied.0, false)
            }
            Piece::King => KING_ATTACKS[idx],
        }
    }

    fn gen_pawn_captures(&self, from: Square, out: &mut MoveList, include_promotions: bool) {
        let color = self.side_to_move();
        let promo_rank = if color == Color::White { 7 } else { 0 };
        let opp_occ = self.occupied[color.opponent().index()].0;
        let targets = PAWN_ATTACKS[color.index()][from.index()];

        for to in Bitboard(targets & opp_occ) {
            if to.rank() == promo_rank {
                if include_promotions {
                    for promo in [Piece::Queen, Piece::Rook, Piece::Bishop, Piece::Knight] {
                        out.push(Move::promotion_capture(from, to, promo));
                    }
                }
            } else {
                out.push(Move::capture(from, to));
            }
        }

        if let Some(ep) = self.en_passant_target {
            if targets & Bitboard::from_square(ep).0 != 0 {
                out.push(Move::en_passant(from, ep));
            }
        }
    }

    fn gen_pawn_quiets(&self, from: Square, out: &mut MoveList, include_promotions: bool) {
        let color = self.side_to_move();
        let (dir, start_rank, promo_rank) = if color == Color::White {
            (1isize, 1, 7)
        } else {
            (-1isize, 6, 0)
        };

        let Some(forward) = Square::try_new(from.rank() as isize + dir, from.file() as isize)
        else {
            return;
        };
        if !self.is_empty_square(forward) {
            return;
        }
        if forward.rank() == promo_rank {
            if include_promotions {
                for promo in [Piece::Queen, Piece::Rook, Piece::Bishop, Piece::Knight] {
                    out.push(Move::promotion(from, forward, promo));
                }
            }
            return;
        }
        out.push(Move::quiet(from, forward));

        if from.rank() == start_rank {
            let double = Square::new((from.rank() as isize + 2 * dir) as usize, from.file());
            if self.is_empty_square(double) {
                out.push(Move::double_push(from, double));
            }
        }
    }

    fn gen_castles(&self, out: &mut MoveList) {
        let color = self.side_to_move();
        let (rank, king_right, queen_right) = match color {
            Color::White => (0, CASTLE_WHITE_K, CASTLE_WHITE_Q),
            Color::Black => (7, CASTLE_BLACK_K, CASTLE_BLACK_Q),
        };
        let from = Square::new(rank, 4);
        if self.piece_at(from) != Some((color, Piece::King)) {
            return;
        }
        let them = color.opponent();

        if self.castling_rights & king_right != 0
            && self.is_empty_square(Square::new(rank, 5))
            && self.is_empty_square(Square::new(rank, 6))
            && self.piece_at(Square::new(rank, 7)) == Some((color, Piece::Rook))
            && !self.is_square_attacked(from, them)
            && !self.is_square_attacked(Square::new(rank, 5), them)
        {
            out.push(Move::castle_kingside(from, Square::new(rank, 6)));
        }
        if self.castling_rights & queen_right != 0
            && self.is_empty_square(Square::new(rank, 1))
            && self.is_empty_square(Square::new(rank, 2))
            && self.is_empty_square(Square::new(rank, 3))
            && self.piece_at(Square::new(rank, 0)) == Some((color, Piece::Rook))
            && !self.is_square_attacked(from, them)
            && !self.is_square_attacked(Square::new(rank, 3), them)
        {
            out.push(Move::castle_queenside(from, Square::new(rank, 2)));
        }
    }

    fn gen_captures_into(&self, out: &mut MoveList, include_promotions: bool) {
        let color = self.side_to_move();
        let c = color.index();
        let opp_occ = self.occupied[color.opponent().index()].0;

        for from in self.pieces[c][Piece::Pawn.index()].iter() {
            self.gen_pawn_captures(from, out, include_promotions);
        }
        for piece in [
            Piece::Knight,
            Piece::Bishop,
            Piece::Rook,
            Piece::Queen,
            Piece::King,
        ] {
            for from in self.pieces[c][piece.index()].iter() {
                let targets = self.piece_targets(piece, from, color) & opp_occ;
                for to in Bitboard(targets) {
                    out.push(Move::capture(from, to));
                }
            }
        }
    }

    fn gen_quiets_into(&self, out: &mut MoveList, include_promotions: bool) {
        let color = self.side_to_move();
        let c = color.index();
        let free = !self.all_occupied.0;

        for from in self.pieces[c][Piece::Pawn.index()].iter() {
            self.gen_pawn_quiets(from, out, include_promotions);
        }
        for piece in [
            Piece::Knight,
            Piece::Bishop,
            Piece::Rook,
            Piece::Queen,
            Piece::King,
        ] {
            for from in self.pieces[c][piece.index()].iter() {
                let targets = self.piece_targets(piece, from, color) & free;
                for to in Bitboard(targets) {
                    out.push(Move::quiet(from, to));
                }
            }
        }
        self.gen_castles(out);
    }

    /// All pseudo-legal moves, captures first.
    #[must_use]
    pub fn pseudo_legal_moves(&self) -> MoveList {
        let mut moves = MoveList::new();
        self.gen_captures_into(&mut moves, true);
        self.gen_quiets_into(&mut moves, true);
        moves
    }

    /// Pseudo-legal captures excluding promotions (those are generated
    /// separately in quiescence).
    #[must_use]
    pub fn pseudo_legal_captures(&self) -> MoveList {
        let mut moves = MoveList::new();
        self.gen_captures_into(&mut moves, false);
        moves
    }

    /// All pseudo-legal promotions, capturing and quiet, queen first.
    #[must_use]
    pub fn pseudo_legal_promotions(&self) -> MoveList {
        let mut moves = MoveList::new();
        let color = self.side_to_move();
        let seventh = if color == Color::White {
            Bitboard(0x00FF000000000000)
        } else {
            Bitboard(0x000000000000FF00)
        };
        for from in Bitboard(self.pieces[color.index()][Piece::Pawn.index()].0 & seventh.0) {
            self.gen_pawn_captures(from, &mut moves, true);
            self.gen_pawn_quiets(from, &mut moves, true);
        }
        // Keep only the promotions (the helpers may emit plain captures of
        // pieces standing beside the promotion square)
        let mut promos = MoveList::new();
        for m in &moves {
            if m.is_promotion() {
                promos.push(*m);
            }
        }
        promos
    }

    /// Quiet moves that give check, used by the quiescence check extension.
    #[must_use]
    pub fn pseudo_legal_checks(&self) -> MoveList {
        let mut quiets = MoveList::new();
        self.gen_quiets_into(&mut quiets, false);
        let mut checks = MoveList::new();
        for m in &quiets {
            if self.gives_check(*m) {
                checks.push(*m);
            }
        }
        checks
    }

    /// Pseudo-legal responses to a check: king moves, captures of a lone
    /// checker, and interpositions. Captures stay ahead of quiet moves.
    #[must_use]
    pub fn pseudo_legal_check_escapes(&self) -> MoveList {
        let us = self.side_to_move();
        let Some(king_sq) = self.find_king(us) else {
            return MoveList::new();
        };
        let checkers = Bitboard(
            self.attackers_to(king_sq, self.all_occupied.0).0
                & self.occupied[us.opponent().index()].0,
        );
        let all = self.pseudo_legal_moves();
        if checkers.is_empty() {
            return all;
        }

        let double_check = checkers.popcount() > 1;
        let checker_sq = checkers.lsb();
        let target_mask = checker_sq.map_or(0, |sq| {
            checkers.0 | between(king_sq.index(), sq.index())
        });
        // En passant can remove a checking pawn that just double-pushed
        let ep_removes_checker = match (self.en_passant_target, checker_sq) {
            (Some(ep), Some(sq)) => {
                self.piece_on(sq) == Some(Piece::Pawn) && ep.file() == sq.file()
            }
            _ => false,
        };

        let mut escapes = MoveList::new();
        for m in &all {
            if m.from() == king_sq {
                escapes.push(*m);
            } else if double_check {
                continue;
            } else if target_mask & Bitboard::from_square(m.to()).0 != 0
                || (m.is_en_passant() && ep_removes_checker)
            {
                escapes.push(*m);
            }
        }
        escapes
    }

    /// True if the move would put the opponent in check.
    #[must_use]
    pub fn gives_check(&self, m: Move) -> bool {
        let us = self.side_to_move();
        let them = us.opponent();
        let Some(king_sq) = self.find_king(them) else {
            return false;
        };

        // Castling, en passant and promotions alter more than two squares;
        // resolve them on a copy.
        if m.is_castle() || m.is_en_passant() || m.is_promotion() {
            let mut copy = self.clone();
            return copy.try_move(m) && copy.is_in_check(them);
        }

        let Some(piece) = self.piece_on(m.from()) else {
            return false;
        };
        let from_bit = Bitboard::from_square(m.from()).0;
        let to_bit = Bitboard::from_square(m.to()).0;
        let occ_after = (self.all_occupied.0 & !from_bit) | to_bit;
        let king_bit = Bitboard::from_square(king_sq).0;

        // Direct check from the destination square
        let direct = match piece {
            Piece::Pawn => PAWN_ATTACKS[us.index()][m.to().index()],
            Piece::Knight => KNIGHT_ATTACKS[m.to().index()],
            Piece::Bishop => slider_attacks(m.to().index(), occ_after, true),
            Piece::Rook => slider_attacks(m.to().index(), occ_after, false),
            Piece::Queen => {
                slider_attacks(m.to().index(), occ_after, true)
                    | slider_attacks(m.to().index(), occ_after, false)
            }
            Piece::King => 0,
        };
        if direct & king_bit != 0 {
            return true;
        }

        // Discovered check through the vacated square
        let c = us.index();
        let straight = (self.pieces[c][Piece::Rook.index()].0
            | self.pieces[c][Piece::Queen.index()].0)
            & !from_bit;
        if slider_attacks(king_sq.index(), occ_after, false) & straight != 0 {
            return true;
        }
        let diagonal = (self.pieces[c][Piece::Bishop.index()].0
            | self.pieces[c][Piece::Queen.index()].0)
            & !from_bit;
        slider_attacks(king_sq.index(), occ_after, true) & diagonal != 0
    }

    /// True if the move could have been generated in this position.
    ///
    /// Used to vet hash moves before trusting them (Type-1 collisions).
    #[must_use]
    pub fn is_pseudo_legal(&self, m: Move) -> bool {
        if m.is_null() {
            return false;
        }
        match self.piece_at(m.from()) {
            Some((color, _)) if color == self.side_to_move() => {
                self.pseudo_legal_moves().contains(m)
            }
            _ => false,
        }
    }

    /// Fully legal moves; used at the root and by the UCI layer.
    #[must_use]
    pub fn legal_moves(&self) -> MoveList {
        let source = if self.is_in_check(self.side_to_move()) {
            self.pseudo_legal_check_escapes()
        } else {
            self.pseudo_legal_moves()
        };
        let mut legal = MoveList::new();
        for m in &source {
            let mut copy = self.clone();
            if copy.try_move(*m) {
                legal.push(*m);
            }
        }
        legal
    }

    #[must_use]
    pub fn is_checkmate(&self) -> bool {
        self.is_in_check(self.side_to_move()) && self.legal_moves().is_empty()
    }

    #[must_use]
    pub fn is_stalemate(&self) -> bool {
        !self.is_in_check(self.side_to_move()) && self.legal_moves().is_empty()
    }

    /// Count leaf nodes of the legal move tree to the given depth.
    #[must_use]
    pub fn perft(&self, depth: usize) -> u64 {
        if depth == 0 {
            return 1;
        }
        let moves = self.legal_moves();
        if depth == 1 {
            return moves.len() as u64;
        }
        let mut nodes = 0;
        for m in &moves {
            let mut copy = self.clone();
            let legal = copy.try_move(*m);
            debug_assert!(legal);
            nodes += copy.perft(depth - 1);
        }
        nodes
    }
}
