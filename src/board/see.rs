//! Static Exchange Evaluation.
//!
//! Values the capture sequence on a single square, least valuable attacker
//! first, with x-ray attackers revealed as pieces are exchanged off.

use super::attacks::slider_attacks;
use super::types::{Bitboard, Color, Move, Piece, Square};
use super::Board;

impl Board {
    /// Static exchange evaluation at `to`, with `color` capturing first.
    ///
    /// Positive means the exchange wins material for `color`; zero if there
    /// is nothing to capture or no attacker.
    #[must_use]
    pub fn see(&self, color: Color, to: Square) -> i32 {
        const MAX_EXCHANGES: usize = 32;

        let Some(victim) = self.piece_on(to) else {
            return 0;
        };
        let mut occupancy = self.all_occupied.0;
        let mut attackers = self.attackers_to(to, occupancy);

        let own = Bitboard(attackers.0 & self.occupied[color.index()].0);
        let Some((mut current_attacker, mut from_bb)) =
            self.least_valuable_attacker(own, color)
        else {
            return 0;
        };

        let mut gain = [0i32; MAX_EXCHANGES];
        gain[0] = victim.value();
        let mut depth = 0;
        let mut side = color;

        loop {
            // Remove the attacker and reveal anything x-raying through it
            occupancy ^= from_bb.0;
            attackers = Bitboard(attackers.0 & !from_bb.0);
            if matches!(current_attacker, Piece::Pawn | Piece::Bishop | Piece::Queen) {
                attackers.0 |=
                    slider_attacks(to.index(), occupancy, true) & self.diagonal_sliders() & occupancy;
            }
            if matches!(current_attacker, Piece::Rook | Piece::Queen) {
                attackers.0 |= slider_attacks(to.index(), occupancy, false)
                    & self.straight_sliders()
                    & occupancy;
            }

            side = side.opponent();
            let replying = Bitboard(attackers.0 & self.occupied[side.index()].0 & occupancy);
            let Some((next_piece, next_bb)) = self.least_valuable_attacker(replying, side)
            else {
                break;
            };

            depth += 1;
            if depth >= MAX_EXCHANGES {
                break;
            }
            gain[depth] = current_attacker.value() - gain[depth - 1];

            // Neither side continues a clearly losing sequence
            if (-gain[depth - 1]).max(gain[depth]) < 0 {
                break;
            }

            // The king may only recapture when nothing can answer
            if next_piece == Piece::King {
                let opposing = attackers.0
                    & self.occupied[side.opponent().index()].0
                    & occupancy;
                if opposing != 0 {
                    break;
                }
            }

            current_attacker = next_piece;
            from_bb = next_bb;
        }

        while depth > 0 {
            gain[depth - 1] = -((-gain[depth - 1]).max(gain[depth]));
            depth -= 1;
        }
        gain[0]
    }

    fn diagonal_sliders(&self) -> u64 {
        self.pieces[0][Piece::Bishop.index()].0
            | self.pieces[0][Piece::Queen.index()].0
            | self.pieces[1][Piece::Bishop.index()].0
            | self.pieces[1][Piece::Queen.index()].0
    }

    fn straight_sliders(&self) -> u64 {
        self.pieces[0][Piece::Rook.index()].0
            | self.pieces[0][Piece::Queen.index()].0
            | self.pieces[1][Piece::Rook.index()].0
            | self.pieces[1][Piece::Queen.index()].0
    }

    fn least_valuable_attacker(
        &self,
        attackers: Bitboard,
        color: Color,
    ) -> Option<(Piece, Bitboard)> {
        if attackers.is_empty() {
            return None;
        }
        for piece in Piece::ALL {
            let candidates = attackers.0 & self.pieces[color.index()][piece.index()].0;
            if candidates != 0 {
                return Some((piece, Bitboard(candidates & candidates.wrapping_neg())));
            }
        }
        None
    }

    /// Cheap exchange estimate: victim value minus attacker value, without
    /// considering recaptures. Negative means the capture looks losing.
    #[must_use]
    pub fn exchange_score(&self, m: Move) -> i32 {
        let attacker = self.piece_on(m.from()).map_or(0, Piece::value);
        let victim = if m.is_en_passant() {
            Piece::Pawn.value()
        } else {
            self.piece_on(m.to()).map_or(0, Piece::value)
        };
        victim - attacker
    }

    /// Most-valuable-victim / least-valuable-aggressor ordering score.
    #[must_use]
    pub fn mvv_lva_score(&self, m: Move) -> i32 {
        let attacker = self.piece_on(m.from()).map_or(0, Piece::value);
        let victim = if m.is_en_passant() {
            Piece::Pawn.value()
        } else {
            self.piece_on(m.to()).map_or(0, Piece::value)
        };
        victim * 10 - attacker
    }

    /// Material value of the piece standing on a square (0 when empty); the
    /// quiescence delta prune feeds on this.
    #[must_use]
    pub fn value_on(&self, sq: Square) -> i32 {
        self.piece_on(sq).map_or(0, Piece::value)
    }
}
