//! Engine controller implementation.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use parking_lot::Mutex;

use super::time::plan_search;
use crate::board::Board;
use crate::search::SearchContext;
use crate::sync::StopFlag;
use crate::uci::command::GoParams;

/// Search thread stack size (32 MB): each recursion frame carries a board
/// snapshot and a move list.
const SEARCH_STACK_SIZE: usize = 32 * 1024 * 1024;

/// Owns the game board and the search context; runs one search at a time on
/// a dedicated thread.
pub struct Engine {
    board: Board,
    ctx: Arc<Mutex<SearchContext>>,
    stop: StopFlag,
    job: Option<JoinHandle<()>>,
}

impl Engine {
    #[must_use]
    pub fn new(tt_mb: usize) -> Self {
        let stop = StopFlag::new();
        Engine {
            board: Board::new(),
            ctx: Arc::new(Mutex::new(SearchContext::new(tt_mb, stop.clone()))),
            stop,
            job: None,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Replace the current position (stops any running search first).
    pub fn set_position(&mut self, board: Board) {
        self.stop_search();
        self.board = board;
    }

    /// Reset for a new game: starting position and an empty hash table.
    pub fn new_game(&mut self) {
        self.stop_search();
        self.board = Board::new();
        self.ctx.lock().clear_tt();
    }

    /// Start a search for the given `go` parameters on the worker thread.
    /// The driver prints `info` and `bestmove` lines itself.
    pub fn go(&mut self, params: &GoParams) {
        self.stop_search();

        let mode = plan_search(params, &self.board);
        #[cfg(feature = "logging")]
        log::debug!("starting search: {mode:?}");

        self.stop.reset();
        let ctx = Arc::clone(&self.ctx);
        let board = self.board.clone();
        let handle = thread::Builder::new()
            .name("search".to_string())
            .stack_size(SEARCH_STACK_SIZE)
            .spawn(move || {
                let mut guard = ctx.lock();
                let _ = guard.get_best_move(&board, mode);
            })
            .expect("failed to spawn search thread");
        self.job = Some(handle);
    }

    /// Request the running search to stop, without waiting for it.
    pub fn signal_stop(&self) {
        self.stop.stop();
    }

    /// Stop the running search and wait for its thread to finish.
    pub fn stop_search(&mut self) {
        self.stop.stop();
        if let Some(job) = self.job.take() {
            let _ = job.join();
        }
    }

    /// Resize the transposition table (allocates a fresh context).
    pub fn resize_hash(&mut self, mb: usize) {
        self.stop_search();
        *self.ctx.lock() = SearchContext::new(mb, self.stop.clone());
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.stop_search();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn go_and_stop_round_trip() {
        let mut engine = Engine::new(1);
        let params = GoParams {
            depth: Some(2),
            ..GoParams::default()
        };
        engine.go(&params);
        engine.stop_search();
        // A second search can start after the first is joined
        engine.go(&params);
        engine.stop_search();
    }

    #[test]
    fn new_game_resets_board() {
        let mut engine = Engine::new(1);
        engine
            .board_mut()
            .play_uci_move("e2e4")
            .expect("legal move");
        engine.new_game();
        assert!(engine.board().white_to_move());
        assert_eq!(engine.board().to_fen(), Board::new().to_fen());
    }
}
