//! Conversion of clock state into a per-move search budget.

use crate::board::Board;
use crate::search::{SearchMode, MAX_DEPTH};
use crate::uci::command::GoParams;

/// Expected number of remaining moves when dividing up the clock.
pub const MOVE_HORIZON: u64 = 38;
/// Past this game move the horizon shrinks: endgames need deeper thought on
/// fewer moves.
pub const ENDGAME_HORIZON_LIMIT: u32 = 60;
/// Horizon reduction applied past the endgame limit.
pub const MOVE_HORIZON_DEC: u64 = 10;

/// Fraction of remaining time allotted when `movestogo` is small.
pub const ALLOTMENT_FACTORS: [f64; 8] = [1.0, 0.99, 0.40, 0.30, 0.25, 0.22, 0.20, 0.18];
/// Hard ceiling on total usage for a move when `movestogo` is small; keeps
/// the driver's stretch factor from flag-falling.
pub const MAX_USAGE_FACTORS: [f64; 8] = [1.0, 0.99, 0.72, 0.63, 0.59, 0.56, 0.54, 0.52];

/// Stretch multiple the driver may apply to a TIME budget (mirrors the
/// search's hard-limit factor).
const DRIVER_STRETCH: f64 = 4.0;

/// Decide the search mode and budget for a `go` command.
pub fn plan_search(go: &GoParams, board: &Board) -> SearchMode {
    // Infinite analysis runs until `stop`, even when clock data is also sent
    if go.infinite {
        return SearchMode::Depth(MAX_DEPTH);
    }
    if let Some(depth) = go.depth {
        return SearchMode::Depth((depth as i32).min(MAX_DEPTH));
    }
    if let Some(ms) = go.movetime {
        return SearchMode::MoveTime(ms.max(1));
    }

    let (remaining, inc) = if board.white_to_move() {
        (go.wtime, go.winc)
    } else {
        (go.btime, go.binc)
    };
    let Some(remaining) = remaining else {
        // Bare `go` or `go infinite`: search until stopped
        return SearchMode::Depth(MAX_DEPTH);
    };
    let inc = inc.unwrap_or(0);

    let allotment = match go.movestogo {
        Some(movestogo) if (movestogo as usize) < ALLOTMENT_FACTORS.len() => {
            let idx = movestogo as usize;
            let allot = remaining as f64 * ALLOTMENT_FACTORS[idx] + inc as f64;
            let ceiling = remaining as f64 * MAX_USAGE_FACTORS[idx] / DRIVER_STRETCH;
            allot.min(ceiling) as u64
        }
        _ => {
            let horizon = if board.move_number() > ENDGAME_HORIZON_LIMIT {
                MOVE_HORIZON - MOVE_HORIZON_DEC
            } else {
                MOVE_HORIZON
            };
            remaining / horizon + inc
        }
    };

    SearchMode::Time(allotment.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_takes_priority() {
        let go = GoParams {
            depth: Some(9),
            wtime: Some(60_000),
            ..GoParams::default()
        };
        assert_eq!(plan_search(&go, &Board::new()), SearchMode::Depth(9));
    }

    #[test]
    fn movetime_is_verbatim() {
        let go = GoParams {
            movetime: Some(750),
            ..GoParams::default()
        };
        assert_eq!(plan_search(&go, &Board::new()), SearchMode::MoveTime(750));
    }

    #[test]
    fn clock_divides_by_horizon() {
        let go = GoParams {
            wtime: Some(38_000),
            winc: Some(100),
            ..GoParams::default()
        };
        assert_eq!(plan_search(&go, &Board::new()), SearchMode::Time(1100));
    }

    #[test]
    fn bare_go_searches_until_stopped() {
        let go = GoParams::default();
        assert_eq!(plan_search(&go, &Board::new()), SearchMode::Depth(MAX_DEPTH));
    }

    #[test]
    fn infinite_overrides_clock_data() {
        let go = GoParams {
            infinite: true,
            wtime: Some(60_000),
            btime: Some(60_000),
            winc: Some(1_000),
            ..GoParams::default()
        };
        assert_eq!(plan_search(&go, &Board::new()), SearchMode::Depth(MAX_DEPTH));
    }

    #[test]
    fn few_moves_to_go_spends_more() {
        let go = GoParams {
            wtime: Some(10_000),
            movestogo: Some(2),
            ..GoParams::default()
        };
        let SearchMode::Time(budget) = plan_search(&go, &Board::new()) else {
            panic!("expected TIME mode");
        };
        // 40% allotment capped by the usage ceiling 72%/4
        assert_eq!(budget, 1800);
    }
}
