//! Mutable search state: per-search parameters, heuristic tables, statistics.

use std::time::Instant;

use super::constants::{MAX_DEPTH, MAX_TIME_MS};
use crate::board::{Color, Move, Piece, NULL_MOVE};

/// Per-search state threaded through the recursion.
pub struct SearchParams {
    /// Distance from the root, bounded by `MAX_DEPTH`.
    pub ply: i32,
    /// Consecutive null moves currently on the stack, clamped at 2.
    pub null_move_count: u32,
    pub start_time: Instant,
    /// Hard time limit in milliseconds; the mid-iteration clock poll stops
    /// the search past this.
    pub time_limit_ms: u64,
    /// Two killer moves per ply; slot 0 is the most recent.
    killers: [[Move; 2]; MAX_DEPTH as usize],
    /// Quiet-move history counters indexed by side, piece type and
    /// destination square.
    history: [[[i32; 64]; 6]; 2],
    /// Game move counter at search start, stamped into TT entries as age.
    pub root_move_number: u8,
}

impl SearchParams {
    #[must_use]
    pub fn new() -> Self {
        SearchParams {
            ply: 0,
            null_move_count: 0,
            start_time: Instant::now(),
            time_limit_ms: MAX_TIME_MS,
            killers: [[NULL_MOVE; 2]; MAX_DEPTH as usize],
            history: [[[0; 64]; 6]; 2],
            root_move_number: 0,
        }
    }

    /// Reset everything except the clock for a fresh iteration.
    pub fn reset(&mut self) {
        self.ply = 0;
        self.null_move_count = 0;
        self.killers = [[NULL_MOVE; 2]; MAX_DEPTH as usize];
        self.reset_history();
    }

    /// Zero the history table (aging between searches).
    pub fn reset_history(&mut self) {
        self.history = [[[0; 64]; 6]; 2];
    }

    #[inline]
    #[must_use]
    pub fn killer(&self, ply: i32, slot: usize) -> Move {
        self.killers
            .get(ply as usize)
            .map_or(NULL_MOVE, |row| row[slot])
    }

    /// Shift a quiet fail-high move into killer slot 0, keeping the two
    /// slots distinct.
    pub fn store_killer(&mut self, ply: i32, m: Move) {
        let Some(row) = self.killers.get_mut(ply as usize) else {
            return;
        };
        if row[0] != m {
            row[1] = row[0];
            row[0] = m;
        }
    }

    #[inline]
    #[must_use]
    pub fn history_score(&self, color: Color, piece: Piece, to: usize) -> i32 {
        self.history[color.index()][piece.index()][to]
    }

    /// Credit a quiet move that failed high or became the PV move.
    pub fn history_credit(&mut self, color: Color, piece: Piece, to: usize, depth: i32) {
        self.history[color.index()][piece.index()][to] += depth * depth;
    }

    /// Milliseconds since the search started.
    #[inline]
    #[must_use]
    pub fn elapsed_ms(&self) -> u64 {
        self.start_time.elapsed().as_millis() as u64
    }
}

impl Default for SearchParams {
    fn default() -> Self {
        SearchParams::new()
    }
}

/// Counters gathered during one `go`, printed to stderr afterwards.
#[derive(Clone, Copy, Debug, Default)]
pub struct SearchStats {
    pub nodes: u64,
    pub hash_probes: u64,
    pub hash_hits: u64,
    pub hash_score_cuts: u64,
    pub hash_move_attempts: u64,
    pub hash_move_cuts: u64,
    pub fail_highs: u64,
    pub first_fail_highs: u64,
    pub null_move_cuts: u64,
    pub qs_nodes: u64,
    pub qs_fail_highs: u64,
    pub qs_first_fail_highs: u64,
}

impl SearchStats {
    pub fn reset(&mut self) {
        *self = SearchStats::default();
    }
}

/// Format a fraction as a percentage for the statistics report.
pub(crate) fn percentage(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    let ten_thousandths = (numerator * 10_000) / denominator;
    ten_thousandths as f64 / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Square;

    #[test]
    fn killer_slots_stay_distinct() {
        let mut params = SearchParams::new();
        let a = Move::quiet(Square::new(0, 1), Square::new(2, 2));
        let b = Move::quiet(Square::new(0, 6), Square::new(2, 5));

        params.store_killer(3, a);
        assert_eq!(params.killer(3, 0), a);
        assert_eq!(params.killer(3, 1), NULL_MOVE);

        // Storing the same move again must not duplicate it
        params.store_killer(3, a);
        assert_eq!(params.killer(3, 0), a);
        assert_eq!(params.killer(3, 1), NULL_MOVE);

        params.store_killer(3, b);
        assert_eq!(params.killer(3, 0), b);
        assert_eq!(params.killer(3, 1), a);
        assert_ne!(params.killer(3, 0), params.killer(3, 1));
    }

    #[test]
    fn history_credit_adds_depth_squared() {
        let mut params = SearchParams::new();
        params.history_credit(Color::White, Piece::Knight, 18, 5);
        assert_eq!(params.history_score(Color::White, Piece::Knight, 18), 25);
        params.history_credit(Color::White, Piece::Knight, 18, 3);
        assert_eq!(params.history_score(Color::White, Piece::Knight, 18), 34);
        assert_eq!(params.history_score(Color::Black, Piece::Knight, 18), 0);
    }

    #[test]
    fn out_of_range_ply_yields_null_killer() {
        let params = SearchParams::new();
        assert_eq!(params.killer(MAX_DEPTH + 5, 0), NULL_MOVE);
    }

    #[test]
    fn percentage_handles_zero_denominator() {
        assert!((percentage(1, 0) - 0.0).abs() < f64::EPSILON);
        assert!((percentage(1, 2) - 50.0).abs() < f64::EPSILON);
    }
}
