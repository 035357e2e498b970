//! Argent, a UCI chess engine.
//!
//! The crate is organized around a fail-hard principal-variation search:
//! - Bitboard board representation with copy-make move application
//! - Iterative deepening driving a null-window PVS recursion
//! - Quiescence search with delta and static-exchange pruning
//! - Transposition table with a depth/age replacement policy
//! - Move ordering from hash move, killers, history and SEE
//!
//! # Quick Start
//!
//! ```
//! use argent::board::Board;
//! use argent::search::{SearchContext, SearchMode};
//! use argent::sync::StopFlag;
//!
//! let board = Board::new();
//! let mut ctx = SearchContext::new(16, StopFlag::new());
//! let report = ctx.get_best_move(&board, SearchMode::Depth(4));
//! println!("best move: {}", report.best_move);
//! ```
//!
//! # Building Positions
//!
//! ```
//! use argent::board::Board;
//!
//! // From FEN notation
//! let board = Board::from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1");
//! assert!(!board.white_to_move());
//! ```
//!
//! # Features
//!
//! - `serde` - Enable serialization for `Piece`, `Color`, `Square` and `Move`
//! - `logging` - Enable optional debug traces via the `log` crate

// Enable pedantic lints with sensible domain-specific exceptions
#![warn(clippy::pedantic)]
// Bitboard hex literals are clearer without separators (bit patterns visible)
#![allow(clippy::unreadable_literal)]
// Chess engines have intentionally similar names (eval_mg/eval_eg, etc.)
#![allow(clippy::similar_names)]
// Index casts are ubiquitous and safe in chess (board indices, square indices)
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
// Large arrays are needed for move lists and attack tables
#![allow(clippy::large_stack_arrays)]
// Module-level documentation is sufficient for this codebase
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod board;
pub mod engine;
pub mod search;
pub mod sync;
pub mod tt;
pub mod uci;
pub mod zobrist;
