//! Universal Chess Interface front-end helpers.

use std::fmt;

use crate::board::{Board, FenError, Move, MoveParseError};

pub mod command;
pub mod print;

/// Error type for UCI position command parsing.
#[derive(Debug, Clone)]
pub enum UciError {
    InvalidFen(FenError),
    InvalidMove {
        move_str: String,
        error: MoveParseError,
    },
    MissingParts,
}

impl fmt::Display for UciError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UciError::InvalidFen(e) => write!(f, "invalid FEN: {e}"),
            UciError::InvalidMove { move_str, error } => {
                write!(f, "invalid move '{move_str}': {error}")
            }
            UciError::MissingParts => write!(f, "missing required parts in position command"),
        }
    }
}

impl std::error::Error for UciError {}

impl From<FenError> for UciError {
    fn from(e: FenError) -> Self {
        UciError::InvalidFen(e)
    }
}

/// Parse a UCI `position` command.
///
/// Supports both "position startpos" and "position fen <fen>", optionally
/// followed by "moves <m1> <m2> ...".
pub fn try_parse_position_command(board: &mut Board, parts: &[&str]) -> Result<(), UciError> {
    let mut i = 1;

    if i >= parts.len() {
        return Err(UciError::MissingParts);
    }

    if parts[i] == "startpos" {
        *board = Board::new();
        i += 1;
    } else if parts[i] == "fen" {
        let start = i + 1;
        let mut end = start;
        while end < parts.len() && end - start < 6 && parts[end] != "moves" {
            end += 1;
        }
        if end - start < 4 {
            return Err(UciError::MissingParts);
        }
        let fen = parts[start..end].join(" ");
        *board = Board::try_from_fen(&fen)?;
        i = end;
    } else {
        return Err(UciError::MissingParts);
    }

    if i < parts.len() && parts[i] == "moves" {
        i += 1;
        while i < parts.len() {
            board
                .play_uci_move(parts[i])
                .map_err(|error| UciError::InvalidMove {
                    move_str: parts[i].to_string(),
                    error,
                })?;
            i += 1;
        }
    }

    Ok(())
}

/// Like `try_parse_position_command`, logging errors instead of returning
/// them; for use in the main loop.
pub fn parse_position_command(board: &mut Board, parts: &[&str]) {
    if let Err(e) = try_parse_position_command(board, parts) {
        eprintln!("error: {e}");
    }
}

#[must_use]
pub fn format_uci_move(mv: &Move) -> String {
    mv.to_string()
}
