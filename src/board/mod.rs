//! Board representation: position state, move generation, evaluation, SEE.

mod apply;
mod attacks;
pub mod error;
mod eval;
mod fen;
mod movegen;
mod pst;
mod see;
mod state;
mod types;

#[cfg(test)]
mod tests;

pub use error::{FenError, MoveParseError, SquareError};
pub use eval::{
    KNIGHT_VALUE, MAX_POS_SCORE, PAWN_VALUE, PAWN_VALUE_EG, QUEEN_VALUE, ROOK_VALUE,
};
pub use state::Board;
pub use types::{Bitboard, BitboardIter, Color, Move, MoveList, Piece, ScoreList, Square, NULL_MOVE};
