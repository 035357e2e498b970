//! The principal-variation search recursion.
//!
//! A null-window PVS in a fail-hard framework: every score returned lies
//! within `[alpha, beta]`. The recursion copies the position at each node and
//! never mutates its caller's board.

use super::constants::{
    iid_depth, FUTILITY_MARGIN, INFTY, MATE_SCORE, REVERSE_FUTILITY_MARGIN,
};
use super::move_order::next_move;
use super::{PvLine, SearchContext};
use crate::board::{Board, Move, MoveList, Piece, NULL_MOVE, PAWN_VALUE, QUEEN_VALUE};
use crate::tt::NodeType;

/// Static evaluation signed from the side to move.
fn signed_eval(board: &Board) -> i32 {
    if board.white_to_move() {
        board.evaluate()
    } else {
        -board.evaluate()
    }
}

impl SearchContext {
    /// Fail-hard principal-variation search.
    #[allow(clippy::too_many_lines)]
    pub(crate) fn pvs(
        &mut self,
        board: &Board,
        depth: i32,
        mut alpha: i32,
        beta: i32,
        pv: &mut PvLine,
    ) -> i32 {
        // The standard search ends here; quiescence resolves captures and
        // does the static evaluation.
        if depth <= 0 {
            pv.clear();
            return self.quiescence(board, 0, alpha, beta);
        }

        if board.is_draw() {
            pv.clear();
            return 0.clamp(alpha, beta);
        }

        let prev_alpha = alpha;
        // A PV node has an open window; most pruning is unsound there
        let is_pv_node = beta - alpha > 1;
        let color = board.side_to_move();
        let in_check = board.is_in_check(color);

        // Hash probe; may cut off outright, and may raise alpha by searching
        // the hash move before anything is generated
        self.stats.hash_probes += 1;
        let (hash_cutoff, hashed) = self.probe_tt(board, depth, &mut alpha, beta, pv);
        if let Some(score) = hash_cutoff {
            return score;
        }

        let mut line = PvLine::new();
        let static_eval = signed_eval(board);

        // Null move pruning: if passing still beats beta, the position is
        // good enough to cut. Unsound in check, in pawn endgames (zugzwang),
        // and past two consecutive null moves.
        if depth >= 3
            && !is_pv_node
            && self.params.null_move_count < 2
            && static_eval >= beta
            && !in_check
            && board.has_non_pawn_material(color)
        {
            let base = if depth >= 11 {
                4
            } else if depth >= 6 {
                3
            } else {
                2
            };
            // Reduce more when far above beta, but never drop straight into
            // quiescence
            let reduction = (depth - 2).min(base + (static_eval - beta) / PAWN_VALUE);

            let mut passed = board.clone();
            passed.do_null_move();
            self.params.null_move_count += 1;
            self.params.ply += 1;
            let null_score = -self.pvs(&passed, depth - 1 - reduction, -beta, -alpha, &mut line);
            self.params.ply -= 1;
            self.params.null_move_count -= 1;

            if null_score >= beta {
                self.stats.null_move_cuts += 1;
                return beta;
            }
        }

        // Reverse futility: standing far enough above beta near the leaves
        // that the opponent would never have allowed this position
        if !is_pv_node
            && !in_check
            && depth <= 2
            && static_eval - REVERSE_FUTILITY_MARGIN[depth as usize] >= beta
            && board.has_non_pawn_material(color)
        {
            return beta;
        }

        let mut moves = if in_check {
            board.pseudo_legal_check_escapes()
        } else {
            board.pseudo_legal_moves()
        };
        if moves.is_empty() {
            pv.clear();
            return self.score_mate(in_check, alpha, beta);
        }

        // The hash move was already searched in the probe
        if !hashed.is_null() {
            for i in 0..moves.len() {
                if moves.get(i) == hashed {
                    moves.remove(i);
                    break;
                }
            }
        }

        let mut scores = self.score_moves(board, &moves, depth, is_pv_node);

        // Internal iterative deepening: without a hash move, a shallow search
        // picks the move to try first
        if depth >= 5 && hashed.is_null() {
            match self.best_index_for_sort(board, &moves, iid_depth(depth)) {
                Some(best) => scores.set(best, INFTY),
                None => {
                    pv.clear();
                    return self.score_mate(in_check, alpha, beta);
                }
            }
        }

        let mut to_hash = NULL_MOVE;
        // Counts only moves actually searched; starts at one when the hash
        // move was
        let mut moves_searched: u32 = u32::from(!hashed.is_null());
        let mut score = -INFTY;
        let mut i = 0;
        loop {
            let m = next_move(&mut moves, &mut scores, i);
            if m.is_null() {
                break;
            }
            i += 1;

            if self.params.elapsed_ms() > self.params.time_limit_ms {
                self.stop.stop();
            }
            if self.stop.is_stopped() {
                return -INFTY;
            }

            // Futility: a quiet move this far below alpha will not raise it;
            // count it as scoring alpha without a quiescence look
            if !is_pv_node
                && depth <= 3
                && static_eval <= alpha - FUTILITY_MARGIN[depth as usize]
                && !in_check
                && !m.is_capture()
                && alpha.abs() < QUEEN_VALUE
                && !m.is_promotion()
                && !board.gives_check(m)
            {
                score = alpha;
                continue;
            }

            let mut copy = board.clone();
            if !copy.try_move(m) {
                continue;
            }
            self.stats.nodes += 1;

            // Late move reductions: quiet late moves below an unraised alpha
            // are searched shallower, never straight into quiescence
            let mut reduction = 0;
            if !is_pv_node
                && !in_check
                && !m.is_capture()
                && depth >= 3
                && moves_searched > 2
                && alpha <= prev_alpha
                && m != self.params.killer(self.params.ply, 0)
                && m != self.params.killer(self.params.ply, 1)
                && !m.is_promotion()
                && !copy.is_in_check(copy.side_to_move())
            {
                reduction = (depth - 2)
                    .min(((depth as f64 - 3.0) / 4.0 + f64::from(moves_searched) / 9.5) as i32);
            }

            if moves_searched == 0 {
                // The first searched move gets the full window at full depth
                self.params.ply += 1;
                score = -self.pvs(&copy, depth - 1, -beta, -alpha, &mut line);
                self.params.ply -= 1;
            } else {
                self.params.ply += 1;
                score = -self.pvs(&copy, depth - 1 - reduction, -alpha - 1, -alpha, &mut line);
                self.params.ply -= 1;
                // The re-search is always at full depth and full window
                if alpha < score && score < beta {
                    self.params.ply += 1;
                    score = -self.pvs(&copy, depth - 1, -beta, -alpha, &mut line);
                    self.params.ply -= 1;
                }
            }

            if self.stop.is_stopped() {
                return -INFTY;
            }

            if score >= beta {
                self.stats.fail_highs += 1;
                if moves_searched == 0 {
                    self.stats.first_fail_highs += 1;
                }
                self.tt.store(
                    board.hash(),
                    depth,
                    m,
                    beta,
                    NodeType::Cut,
                    self.params.root_move_number,
                );
                if !m.is_capture() {
                    self.params.store_killer(self.params.ply, m);
                    let piece = board.piece_on(m.from()).unwrap_or(Piece::Pawn);
                    self.params.history_credit(color, piece, m.to().index(), depth);
                }
                return beta;
            }
            if score > alpha {
                alpha = score;
                to_hash = m;
                pv.load(m, &line);
            }
            moves_searched += 1;
        }

        // No legal move was searched
        if score == -INFTY {
            pv.clear();
            return self.score_mate(in_check, alpha, beta);
        }

        if !to_hash.is_null() && prev_alpha < alpha && alpha < beta {
            // An exact score marks a principal variation and is always worth
            // hashing
            self.tt.store(
                board.hash(),
                depth,
                to_hash,
                alpha,
                NodeType::Pv,
                self.params.root_move_number,
            );
            if !to_hash.is_capture() {
                let piece = board.piece_on(to_hash.from()).unwrap_or(Piece::Pawn);
                self.params.history_credit(color, piece, to_hash.to().index(), depth);
            }
        } else if alpha <= prev_alpha {
            // Fail-low: the upper bound is still worth remembering, but a
            // fail-hard framework has no best move to record
            self.tt.store(
                board.hash(),
                depth,
                NULL_MOVE,
                alpha,
                NodeType::All,
                self.params.root_move_number,
            );
        }

        alpha
    }

    /// Hash-table probe sub-protocol.
    ///
    /// Returns a cutoff score, or the hash move to exclude from the regular
    /// move loop. The stored move is validated by playing it; an illegal one
    /// is a Type-1 collision and is dropped with a diagnostic.
    fn probe_tt(
        &mut self,
        board: &Board,
        depth: i32,
        alpha: &mut i32,
        beta: i32,
        pv: &mut PvLine,
    ) -> (Option<i32>, Move) {
        let Some(entry) = self.tt.probe(board.hash()) else {
            return (None, NULL_MOVE);
        };
        self.stats.hash_hits += 1;
        let hash_score = entry.score;

        if entry.node_type == NodeType::All {
            // The stored score is an upper bound
            if entry.depth >= depth && hash_score <= *alpha {
                self.stats.hash_score_cuts += 1;
                return (Some(*alpha), NULL_MOVE);
            }
            return (None, NULL_MOVE);
        }

        let hashed = entry.mv;
        if entry.depth >= depth && entry.node_type == NodeType::Cut && hash_score >= beta {
            // The stored score is a lower bound
            self.stats.hash_score_cuts += 1;
            self.stats.fail_highs += 1;
            self.stats.first_fail_highs += 1;
            return (Some(beta), hashed);
        }
        // A PV-exact entry is not returned directly: re-searching keeps the
        // principal variation intact and mate distances correct

        let mut copy = board.clone();
        if board.is_pseudo_legal(hashed) && copy.try_move(hashed) {
            // The score is unusable but the move is likely best; search it
            // before generating anything
            let mut line = PvLine::new();
            self.stats.hash_move_attempts += 1;
            self.stats.nodes += 1;
            self.params.ply += 1;
            let score = -self.pvs(&copy, depth - 1, -beta, -*alpha, &mut line);
            self.params.ply -= 1;

            if self.stop.is_stopped() {
                return (Some(-INFTY), hashed);
            }
            if score >= beta {
                self.stats.hash_move_cuts += 1;
                return (Some(beta), hashed);
            }
            if score > *alpha {
                *alpha = score;
                pv.load(hashed, &line);
            }
            (None, hashed)
        } else {
            eprintln!("info string type-1 hash collision on {hashed}");
            (None, NULL_MOVE)
        }
    }

    /// Score a position with no legal moves: mated if in check, else
    /// stalemate. Clamped into the window.
    pub(crate) fn score_mate(&self, in_check: bool, alpha: i32, beta: i32) -> i32 {
        let score = if in_check {
            // Nearer mates score higher
            -MATE_SCORE + self.params.ply
        } else {
            0
        };
        score.clamp(alpha, beta)
    }

    /// Shallow search to pick a first move when no hash move exists
    /// (internal iterative deepening). `None` means no legal move.
    fn best_index_for_sort(
        &mut self,
        board: &Board,
        moves: &MoveList,
        depth: i32,
    ) -> Option<usize> {
        let mut line = PvLine::new();
        let mut best_index = None;
        let mut alpha = -MATE_SCORE;
        let beta = MATE_SCORE;

        for i in 0..moves.len() {
            let mut copy = board.clone();
            if !copy.try_move(moves.get(i)) {
                continue;
            }

            let mut score;
            if i == 0 {
                self.params.ply += 1;
                score = -self.pvs(&copy, depth - 1, -beta, -alpha, &mut line);
                self.params.ply -= 1;
            } else {
                self.params.ply += 1;
                score = -self.pvs(&copy, depth - 1, -alpha - 1, -alpha, &mut line);
                self.params.ply -= 1;
                if alpha < score && score < beta {
                    self.params.ply += 1;
                    score = -self.pvs(&copy, depth - 1, -beta, -alpha, &mut line);
                    self.params.ply -= 1;
                }
            }

            if score > alpha {
                alpha = score;
                best_index = Some(i);
            }
        }
        best_index
    }

    /// Root search: mimics PVS over the legal root moves but never takes a
    /// hash cutoff and always reports a best index when one completed.
    pub(crate) fn best_root_index(
        &mut self,
        board: &Board,
        moves: &MoveList,
        depth: i32,
        pv: &mut PvLine,
    ) -> (Option<usize>, i32) {
        self.params.reset();

        let mut line = PvLine::new();
        let mut best_index = None;
        let mut alpha = -MATE_SCORE;
        let beta = MATE_SCORE;

        for i in 0..moves.len() {
            // When stopping, fall back on whatever this iteration completed
            if self.stop.is_stopped() {
                return (best_index, alpha);
            }

            let mut copy = board.clone();
            if !copy.try_move(moves.get(i)) {
                continue;
            }
            self.stats.nodes += 1;

            let mut score;
            if i == 0 {
                self.params.ply += 1;
                score = -self.pvs(&copy, depth - 1, -beta, -alpha, &mut line);
                self.params.ply -= 1;
            } else {
                self.params.ply += 1;
                score = -self.pvs(&copy, depth - 1, -alpha - 1, -alpha, &mut line);
                self.params.ply -= 1;
                if alpha < score && score < beta {
                    self.params.ply += 1;
                    score = -self.pvs(&copy, depth - 1, -beta, -alpha, &mut line);
                    self.params.ply -= 1;
                }
            }

            if self.stop.is_stopped() {
                return (best_index, alpha);
            }
            if score > alpha {
                alpha = score;
                best_index = Some(i);
                pv.load(moves.get(i), &line);
            }
        }

        (best_index, alpha)
    }
}
