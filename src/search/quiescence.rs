//! Quiescence search.
//!
//! Resolves captures, promotions and one ply of checks so the static
//! evaluation is only ever taken in quiet positions. Fail-hard like the main
//! search; consults neither the hash table nor the heuristic tables.
//! Terminates because every searched move removes material or promotes,
//! except in the bounded check extension.

use super::constants::{INFTY, MATE_SCORE};
use super::move_order::next_move;
use super::SearchContext;
use crate::board::{Board, MAX_POS_SCORE, QUEEN_VALUE};

fn signed_material(board: &Board) -> i32 {
    if board.white_to_move() {
        board.evaluate_material()
    } else {
        -board.evaluate_material()
    }
}

fn signed_positional(board: &Board) -> i32 {
    if board.white_to_move() {
        board.evaluate_positional()
    } else {
        -board.evaluate_positional()
    }
}

impl SearchContext {
    /// Quiescence over captures, promotions and (at the first ply) checks.
    pub(crate) fn quiescence(
        &mut self,
        board: &Board,
        plies: i32,
        mut alpha: i32,
        beta: i32,
    ) -> i32 {
        let color = board.side_to_move();
        if board.is_in_check(color) {
            return self.check_quiescence(board, plies, alpha, beta);
        }

        // Stand pat on the cheap material count first; only pay for the
        // positional terms when the window is still open
        let mut stand_pat = signed_material(board);
        if stand_pat >= beta + MAX_POS_SCORE {
            return beta;
        }
        if stand_pat < alpha - 2 * MAX_POS_SCORE - QUEEN_VALUE {
            return alpha;
        }

        stand_pat += signed_positional(board);
        if alpha < stand_pat {
            alpha = stand_pat;
        }
        if stand_pat >= beta {
            return beta;
        }
        if stand_pat < alpha - MAX_POS_SCORE - QUEEN_VALUE {
            return alpha;
        }

        let mut captures = board.pseudo_legal_captures();
        let mut scores = crate::board::ScoreList::new();
        for m in &captures {
            scores.push(board.mvv_lva_score(*m));
        }

        let mut score = -INFTY;
        let mut searched = 0u32;
        let mut i = 0;
        loop {
            let m = next_move(&mut captures, &mut scores, i);
            if m.is_null() {
                break;
            }
            i += 1;

            // Delta prune: even winning the victim cannot bring us near alpha
            if stand_pat + board.value_on(m.to()) < alpha - MAX_POS_SCORE {
                continue;
            }
            // Losing exchanges by a wide margin are not worth resolving
            if board.exchange_score(m) < 0 && board.see(color, m.to()) < -MAX_POS_SCORE {
                continue;
            }

            let mut copy = board.clone();
            if !copy.try_move(m) {
                continue;
            }
            self.stats.nodes += 1;
            self.stats.qs_nodes += 1;
            score = -self.quiescence(&copy, plies + 1, -beta, -alpha);

            if score >= beta {
                self.stats.qs_fail_highs += 1;
                if searched == 0 {
                    self.stats.qs_first_fail_highs += 1;
                }
                return beta;
            }
            if score > alpha {
                alpha = score;
            }
            searched += 1;
        }

        let promotions = board.pseudo_legal_promotions();
        for idx in 0..promotions.len() {
            let m = promotions.get(idx);
            if board.see(color, m.to()) < 0 {
                continue;
            }

            let mut copy = board.clone();
            if !copy.try_move(m) {
                continue;
            }
            self.stats.nodes += 1;
            self.stats.qs_nodes += 1;
            score = -self.quiescence(&copy, plies + 1, -beta, -alpha);

            if score >= beta {
                self.stats.qs_fail_highs += 1;
                if searched == 0 {
                    self.stats.qs_first_fail_highs += 1;
                }
                return beta;
            }
            if score > alpha {
                alpha = score;
            }
            searched += 1;
        }

        // One ply of quiet checks from the quiescence entry point
        if plies <= 0 {
            let checks = board.pseudo_legal_checks();
            for idx in 0..checks.len() {
                let m = checks.get(idx);
                let mut copy = board.clone();
                if !copy.try_move(m) {
                    continue;
                }
                self.stats.nodes += 1;
                self.stats.qs_nodes += 1;
                score = -self.check_quiescence(&copy, plies + 1, -beta, -alpha);

                if score >= beta {
                    self.stats.qs_fail_highs += 1;
                    if searched == 0 {
                        self.stats.qs_first_fail_highs += 1;
                    }
                    return beta;
                }
                if score > alpha {
                    alpha = score;
                }
                searched += 1;
            }
        }

        // Stalemate is not detected here; the cost outweighs the rare
        // mis-scored position, and the main search handles it

        alpha
    }

    /// In-check quiescence: all evasions must be considered, not just
    /// captures.
    pub(crate) fn check_quiescence(
        &mut self,
        board: &Board,
        plies: i32,
        mut alpha: i32,
        beta: i32,
    ) -> i32 {
        let escapes = board.pseudo_legal_check_escapes();

        let mut score = -INFTY;
        let mut searched = 0u32;
        for idx in 0..escapes.len() {
            let m = escapes.get(idx);
            let mut copy = board.clone();
            if !copy.try_move(m) {
                continue;
            }
            self.stats.nodes += 1;
            self.stats.qs_nodes += 1;
            score = -self.quiescence(&copy, plies + 1, -beta, -alpha);

            if score >= beta {
                self.stats.qs_fail_highs += 1;
                if searched == 0 {
                    self.stats.qs_first_fail_highs += 1;
                }
                return beta;
            }
            if score > alpha {
                alpha = score;
            }
            searched += 1;
        }

        // No legal evasion: we are in check, so it is checkmate
        if score == -INFTY {
            let mate = -MATE_SCORE + self.params.ply + plies;
            return mate.clamp(alpha, beta);
        }

        alpha
    }
}
