//! Move picker and move scoring.

use super::constants::{
    KILLER_1_SCORE, KILLER_2_SCORE, MATE_SCORE, MVV_LVA_KILLER_1, MVV_LVA_KILLER_2,
    MVV_LVA_QUEEN_PROMO,
};
use super::SearchContext;
use crate::board::{Board, Move, MoveList, Piece, ScoreList, MAX_POS_SCORE, NULL_MOVE};

/// Return the best-scored remaining move and advance past it.
///
/// One pass of selection sort from `index`: the maximum-scored remaining move
/// is swapped to `index` in both lists and returned, so an early cutoff never
/// pays for sorting the tail. Returns the null move once past the end.
///
/// Equal scores keep their generation order (the killer slots and
/// even-exchange captures rely on this stability).
pub(crate) fn next_move(moves: &mut MoveList, scores: &mut ScoreList, index: usize) -> Move {
    if index >= moves.len() {
        return NULL_MOVE;
    }
    let mut best_index = index;
    let mut best_score = scores.get(index);
    for i in index + 1..moves.len() {
        if scores.get(i) > best_score {
            best_index = i;
            best_score = scores.get(i);
        }
    }
    moves.swap(best_index, index);
    scores.swap(best_index, index);
    moves.get(index)
}

impl SearchContext {
    /// Score a move list for the picker. The list has captures first; the
    /// scoring switches buckets at the boundary.
    ///
    /// Near the root (depth >= 3, or any PV node) captures are ranked by
    /// static exchange evaluation and killers slot between even and losing
    /// captures. At shallow non-PV depths the cheaper MVV/LVA ranking is used
    /// and killers sit just above minor-takes-pawn exchanges.
    pub(crate) fn score_moves(
        &self,
        board: &Board,
        moves: &MoveList,
        depth: i32,
        is_pv: bool,
    ) -> ScoreList {
        let color = board.side_to_move();
        let ply = self.params.ply;
        let killer0 = self.params.killer(ply, 0);
        let killer1 = self.params.killer(ply, 1);
        let deep = depth >= 3 || is_pv;

        let mut scores = ScoreList::new();
        let mut index = 0;
        while index < moves.len() && moves.get(index).is_capture() {
            let m = moves.get(index);
            if deep {
                scores.push(board.see(color, m.to()));
            } else {
                scores.push(board.mvv_lva_score(m));
            }
            index += 1;
        }
        for i in index..moves.len() {
            let m = moves.get(i);
            let score = if m == killer0 {
                if deep {
                    KILLER_1_SCORE
                } else {
                    MVV_LVA_KILLER_1
                }
            } else if m == killer1 {
                if deep {
                    KILLER_2_SCORE
                } else {
                    MVV_LVA_KILLER_2
                }
            } else if m.promotion_piece() == Some(Piece::Queen) {
                if deep {
                    MAX_POS_SCORE
                } else {
                    MVV_LVA_QUEEN_PROMO
                }
            } else {
                let piece = board.piece_on(m.from()).unwrap_or(Piece::Pawn);
                -MATE_SCORE + self.params.history_score(color, piece, m.to().index())
            };
            scores.push(score);
        }
        scores
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Square;

    fn quiet(to_file: usize) -> Move {
        Move::quiet(Square::new(0, 0), Square::new(1, to_file))
    }

    #[test]
    fn picker_selects_by_descending_score() {
        let mut moves = MoveList::new();
        let mut scores = ScoreList::new();
        for (file, score) in [(0, 5), (1, 30), (2, -4), (3, 12)] {
            moves.push(quiet(file));
            scores.push(score);
        }

        let picked: Vec<i32> = (0..4)
            .map(|i| {
                let m = next_move(&mut moves, &mut scores, i);
                assert!(!m.is_null());
                scores.get(i)
            })
            .collect();
        assert_eq!(picked, vec![30, 12, 5, -4]);
        assert!(next_move(&mut moves, &mut scores, 4).is_null());
    }

    #[test]
    fn picker_is_stable_for_equal_scores() {
        // Two killers scored 0 and -1 must keep their relative order even
        // when ties with other moves exist
        let mut moves = MoveList::new();
        let mut scores = ScoreList::new();
        for (file, score) in [(0, 0), (1, 0), (2, -1), (3, -1)] {
            moves.push(quiet(file));
            scores.push(score);
        }

        let order: Vec<Move> = (0..4)
            .map(|i| next_move(&mut moves, &mut scores, i))
            .collect();
        assert_eq!(order, vec![quiet(0), quiet(1), quiet(2), quiet(3)]);
    }

    #[test]
    fn picker_past_end_returns_null() {
        let mut moves = MoveList::new();
        let mut scores = ScoreList::new();
        assert!(next_move(&mut moves, &mut scores, 0).is_null());
    }
}
