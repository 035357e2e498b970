//! The search core: iterative deepening over a fail-hard PVS recursion.
//!
//! One `SearchContext` owns everything mutable during a search (heuristic
//! tables, statistics, the transposition table and the clock) and is threaded
//! by `&mut` through the recursion. Cancellation is cooperative through a
//! shared atomic stop flag.

mod constants;
mod move_order;
mod params;
mod pvs;
mod quiescence;

pub use constants::{SearchMode, MATE_SCORE, MAX_DEPTH, NEAR_MATE};
pub use params::{SearchParams, SearchStats};

use constants::{MAX_TIME_FACTOR, MAX_TIME_MS, TIME_FACTOR};
use params::percentage;

use crate::board::{Board, Move, NULL_MOVE, PAWN_VALUE_EG};
use crate::sync::StopFlag;
use crate::tt::TranspositionTable;

/// A principal variation: the best line found from a node.
#[derive(Clone)]
pub struct PvLine {
    len: usize,
    moves: [Move; (MAX_DEPTH + 1) as usize],
}

impl PvLine {
    #[must_use]
    pub fn new() -> Self {
        PvLine {
            len: 0,
            moves: [NULL_MOVE; (MAX_DEPTH + 1) as usize],
        }
    }

    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Rewrite this line as `best` followed by the child's line.
    pub(crate) fn load(&mut self, best: Move, child: &PvLine) {
        self.moves[0] = best;
        let tail = child.len.min(self.moves.len() - 1);
        self.moves[1..=tail].copy_from_slice(&child.moves[..tail]);
        self.len = tail + 1;
    }

    #[must_use]
    pub fn first(&self) -> Option<Move> {
        if self.len > 0 {
            Some(self.moves[0])
        } else {
            None
        }
    }

    #[must_use]
    pub fn moves(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    /// Space-separated UCI move string for the `info ... pv` line.
    #[must_use]
    pub fn uci_string(&self) -> String {
        self.moves()
            .iter()
            .map(Move::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for PvLine {
    fn default() -> Self {
        PvLine::new()
    }
}

/// Result of one `go`: the move to play plus the last completed iteration's
/// score and depth.
#[derive(Clone, Copy, Debug)]
pub struct SearchReport {
    pub best_move: Move,
    pub score: i32,
    pub depth: i32,
}

/// Everything mutable during one search, grouped so the recursion carries a
/// single `&mut` instead of globals.
pub struct SearchContext {
    pub(crate) params: SearchParams,
    pub(crate) stats: SearchStats,
    pub(crate) tt: TranspositionTable,
    pub(crate) stop: StopFlag,
}

impl SearchContext {
    /// Create a context with a transposition table of `tt_mb` megabytes.
    /// The table lives as long as the context; `clear_tt` empties it without
    /// reallocating.
    #[must_use]
    pub fn new(tt_mb: usize, stop: StopFlag) -> Self {
        SearchContext {
            params: SearchParams::new(),
            stats: SearchStats::default(),
            tt: TranspositionTable::new(tt_mb),
            stop,
        }
    }

    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    pub fn clear_tt(&mut self) {
        self.tt.clear();
    }

    /// Iterative-deepening driver.
    ///
    /// Grows depth from 1, keeps the best move of the last completed
    /// iteration, emits one `info` line per iteration and the final
    /// `bestmove` line, and prints statistics to stderr.
    pub fn get_best_move(&mut self, board: &Board, mode: SearchMode) -> SearchReport {
        self.params = SearchParams::new();
        self.stats.reset();
        self.params.root_move_number = board.move_number() as u8;

        let mut legal_moves = board.legal_moves();
        if legal_moves.is_empty() {
            self.stop.stop();
            println!("bestmove 0000");
            return SearchReport {
                best_move: NULL_MOVE,
                score: 0,
                depth: 0,
            };
        }
        let mut best_move = legal_moves.get(0);

        self.params.time_limit_ms = match mode {
            SearchMode::Time(budget) | SearchMode::MoveTime(budget) => {
                (MAX_TIME_FACTOR * budget as f64) as u64
            }
            SearchMode::Depth(_) => MAX_TIME_MS,
        };

        let mut best_score = 0;
        let mut completed_depth = 0;
        let mut root_depth = 1;
        loop {
            let mut pv_line = PvLine::new();
            let (best_index, score) =
                self.best_root_index(board, &legal_moves, root_depth, &mut pv_line);
            let Some(best_index) = best_index else {
                // Stopped before the first root move completed; keep the
                // previous iteration's move
                break;
            };

            // Try the best move first next iteration
            legal_moves.swap(0, best_index);
            best_move = legal_moves.get(0);
            best_score = score;
            completed_depth = root_depth;

            let elapsed = self.params.elapsed_ms();
            let nps = self.stats.nodes * 1000 / elapsed.max(1);
            println!(
                "info depth {} score cp {} time {} nodes {} nps {} pv {}",
                root_depth,
                score * 100 / PAWN_VALUE_EG,
                elapsed,
                self.stats.nodes,
                nps,
                pv_line.uci_string()
            );

            if score >= NEAR_MATE {
                break;
            }
            root_depth += 1;

            let keep_going = match mode {
                SearchMode::Time(budget) => {
                    (elapsed as f64) < (budget as f64) * TIME_FACTOR && root_depth <= MAX_DEPTH
                }
                SearchMode::MoveTime(budget) => elapsed < budget && root_depth <= MAX_DEPTH,
                SearchMode::Depth(target) => root_depth <= target,
            };
            if !keep_going {
                break;
            }
        }

        self.print_statistics();
        // Aging for the history heuristic table
        self.params.reset_history();

        self.stop.stop();
        println!("bestmove {best_move}");

        SearchReport {
            best_move,
            score: best_score,
            depth: completed_depth,
        }
    }

    fn print_statistics(&self) {
        let s = &self.stats;
        eprintln!(
            "{:>22} {} / {}",
            "TT occupancy:",
            self.tt.occupancy(),
            self.tt.capacity()
        );
        eprintln!(
            "{:>22} {}% of {} probes",
            "Hash hitrate:",
            percentage(s.hash_hits, s.hash_probes),
            s.hash_probes
        );
        eprintln!(
            "{:>22} {}% of {} hash hits",
            "Hash score cut rate:",
            percentage(s.hash_score_cuts, s.hash_hits),
            s.hash_hits
        );
        eprintln!(
            "{:>22} {}% of {} hash moves",
            "Hash move cut rate:",
            percentage(s.hash_move_cuts, s.hash_move_attempts),
            s.hash_move_attempts
        );
        eprintln!(
            "{:>22} {}% of {} fail highs",
            "First fail high rate:",
            percentage(s.first_fail_highs, s.fail_highs),
            s.fail_highs
        );
        eprintln!(
            "{:>22} {} ({}%)",
            "QS Nodes:",
            s.qs_nodes,
            percentage(s.qs_nodes, s.nodes)
        );
        eprintln!(
            "{:>22} {}% of {} qs fail highs",
            "QS FFH rate:",
            percentage(s.qs_first_fail_highs, s.qs_fail_highs),
            s.qs_fail_highs
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;

    #[test]
    fn pv_line_load_prepends_best() {
        let mv = |f: usize| {
            Move::quiet(
                crate::board::Square::new(0, f),
                crate::board::Square::new(1, f),
            )
        };
        let mut child = PvLine::new();
        child.load(mv(1), &PvLine::new());
        assert_eq!(child.moves(), &[mv(1)]);

        let mut parent = PvLine::new();
        parent.load(mv(0), &child);
        assert_eq!(parent.moves(), &[mv(0), mv(1)]);
        assert_eq!(parent.uci_string(), "a1b2 b1c2");
    }

    #[test]
    fn driver_reports_legal_move_from_start() {
        let board = Board::new();
        let mut ctx = SearchContext::new(1, StopFlag::new());
        let report = ctx.get_best_move(&board, SearchMode::Depth(2));

        assert!(board.legal_moves().contains(report.best_move));
        assert_eq!(report.depth, 2);
        // Fail-hard scores stay within the mate window
        assert!(report.score.abs() <= MATE_SCORE);
        // The recursion restores its ply counter on every return
        assert_eq!(ctx.params.ply, 0);
    }

    #[test]
    fn driver_with_stop_set_returns_first_legal_move() {
        let board = Board::new();
        let stop = StopFlag::new();
        stop.stop();
        let mut ctx = SearchContext::new(1, stop);
        let report = ctx.get_best_move(&board, SearchMode::Depth(4));

        assert!(board.legal_moves().contains(report.best_move));
        assert_eq!(report.depth, 0);
    }

    #[test]
    fn score_mate_is_clamped_into_the_window() {
        let mut ctx = SearchContext::new(1, StopFlag::new());
        ctx.params.ply = 4;

        // Checkmate at ply 4, full window: exact mate distance
        assert_eq!(ctx.score_mate(true, -MATE_SCORE, MATE_SCORE), -MATE_SCORE + 4);
        // Stalemate clamps to the window bounds
        assert_eq!(ctx.score_mate(false, 10, 20), 10);
        assert_eq!(ctx.score_mate(false, -20, -10), -10);
        // Mate score clamps upward when alpha already exceeds it
        assert_eq!(ctx.score_mate(true, 100, 200), 100);
    }

    #[test]
    fn driver_handles_position_without_moves() {
        // White is checkmated; there is nothing to search
        let board =
            Board::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 0 3");
        let mut ctx = SearchContext::new(1, StopFlag::new());
        let report = ctx.get_best_move(&board, SearchMode::Depth(3));
        assert!(report.best_move.is_null());
    }
}
