//! Copy-make move application.
//!
//! The search clones a position and applies a pseudo-legal move to the clone;
//! a `false` return means the mover's king was left in check and the clone
//! must be discarded. Real moves have no unmake path; a null move hands its
//! undo state back to the caller.

use super::types::{
    Color, Move, Piece, Square, CASTLE_BLACK_K, CASTLE_BLACK_Q, CASTLE_WHITE_K, CASTLE_WHITE_Q,
};
use super::Board;
use crate::zobrist::ZOBRIST;

impl Board {
    /// Apply a pseudo-legal move.
    ///
    /// Returns `false` iff the move leaves the mover's own king in check; the
    /// board is then in an undefined state and the caller discards it.
    #[must_use]
    pub fn try_move(&mut self, m: Move) -> bool {
        let color = self.side_to_move();
        let c_idx = color.index();
        let from = m.from();
        let to = m.to();

        let Some((piece_color, moving_piece)) = self.piece_at(from) else {
            return false;
        };
        if piece_color != color {
            return false;
        }

        self.hash ^= ZOBRIST.black_to_move_key;
        self.hash ^= ZOBRIST.castling_keys[self.castling_rights as usize];
        if let Some(ep) = self.en_passant_target {
            self.hash ^= ZOBRIST.en_passant_keys[ep.file()];
        }
        self.en_passant_target = None;

        // Remove the captured piece, if any
        if m.is_en_passant() {
            let victim_rank = if color == Color::White {
                to.rank() - 1
            } else {
                to.rank() + 1
            };
            let victim_sq = Square::new(victim_rank, to.file());
            let victim_color = color.opponent();
            self.remove_piece(victim_sq, victim_color, Piece::Pawn);
            self.hash ^=
                ZOBRIST.piece_keys[victim_color.index()][Piece::Pawn.index()][victim_sq.index()];
        } else if m.is_capture() {
            if let Some((victim_color, victim)) = self.piece_at(to) {
                self.remove_piece(to, victim_color, victim);
                self.hash ^= ZOBRIST.piece_keys[victim_color.index()][victim.index()][to.index()];
            }
        }

        // Move the piece itself (promotions place the promoted piece)
        self.remove_piece(from, color, moving_piece);
        self.hash ^= ZOBRIST.piece_keys[c_idx][moving_piece.index()][from.index()];
        let placed = m.promotion_piece().unwrap_or(moving_piece);
        self.set_piece(to, color, placed);
        self.hash ^= ZOBRIST.piece_keys[c_idx][placed.index()][to.index()];

        // Castling moves the rook as well
        if m.is_castle() {
            let rank = from.rank();
            let (rook_from, rook_to) = if to.file() == 6 {
                (Square::new(rank, 7), Square::new(rank, 5))
            } else {
                (Square::new(rank, 0), Square::new(rank, 3))
            };
            self.remove_piece(rook_from, color, Piece::Rook);
            self.set_piece(rook_to, color, Piece::Rook);
            self.hash ^= ZOBRIST.piece_keys[c_idx][Piece::Rook.index()][rook_from.index()];
            self.hash ^= ZOBRIST.piece_keys[c_idx][Piece::Rook.index()][rook_to.index()];
        }

        // New en passant target behind a double push
        if m.is_double_push() {
            let ep = Square::new((from.rank() + to.rank()) / 2, from.file());
            self.en_passant_target = Some(ep);
            self.hash ^= ZOBRIST.en_passant_keys[ep.file()];
        }

        self.update_castling_rights(moving_piece, color, from, to);
        self.hash ^= ZOBRIST.castling_keys[self.castling_rights as usize];

        let irreversible = moving_piece == Piece::Pawn || m.is_capture() || m.is_castle();
        if irreversible {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }

        if !self.white_to_move {
            self.fullmove_number += 1;
        }
        self.white_to_move = !self.white_to_move;

        if irreversible {
            self.seen.clear();
        }
        self.seen.push(self.hash);

        !self.is_in_check(color)
    }

    fn update_castling_rights(&mut self, moving: Piece, color: Color, from: Square, to: Square) {
        let (own_k, own_q, own_rank) = match color {
            Color::White => (CASTLE_WHITE_K, CASTLE_WHITE_Q, 0),
            Color::Black => (CASTLE_BLACK_K, CASTLE_BLACK_Q, 7),
        };
        match moving {
            Piece::King => self.castling_rights &= !(own_k | own_q),
            Piece::Rook => {
                if from == Square::new(own_rank, 0) {
                    self.castling_rights &= !own_q;
                } else if from == Square::new(own_rank, 7) {
                    self.castling_rights &= !own_k;
                }
            }
            _ => {}
        }
        // Capturing a rook on its home square removes the opponent's right
        let (opp_k, opp_q, opp_rank) = match color {
            Color::White => (CASTLE_BLACK_K, CASTLE_BLACK_Q, 7),
            Color::Black => (CASTLE_WHITE_K, CASTLE_WHITE_Q, 0),
        };
        if to == Square::new(opp_rank, 0) {
            self.castling_rights &= !opp_q;
        } else if to == Square::new(opp_rank, 7) {
            self.castling_rights &= !opp_k;
        }
    }

    /// Pass the move: toggle the side to move and forfeit the en-passant
    /// window.
    ///
    /// Returns the previous en-passant target for `undo_null_move`. The
    /// forward-only copy-make recursion discards the clone instead of
    /// undoing, so nothing is kept on the board itself.
    pub fn do_null_move(&mut self) -> Option<Square> {
        let previous_en_passant = self.en_passant_target;
        self.hash ^= ZOBRIST.black_to_move_key;
        if let Some(ep) = previous_en_passant {
            self.hash ^= ZOBRIST.en_passant_keys[ep.file()];
        }
        self.en_passant_target = None;
        self.white_to_move = !self.white_to_move;
        previous_en_passant
    }

    /// Revert a null move, restoring the en-passant target returned by the
    /// matching `do_null_move`.
    pub fn undo_null_move(&mut self, previous_en_passant: Option<Square>) {
        self.hash ^= ZOBRIST.black_to_move_key;
        if let Some(ep) = previous_en_passant {
            self.hash ^= ZOBRIST.en_passant_keys[ep.file()];
        }
        self.en_passant_target = previous_en_passant;
        self.white_to_move = !self.white_to_move;
    }
}
