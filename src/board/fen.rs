//! FEN parsing and formatting, plus UCI move parsing.

use std::str::FromStr;

use super::error::{FenError, MoveParseError};
use super::types::{
    Color, Move, Piece, Square, CASTLE_BLACK_K, CASTLE_BLACK_Q, CASTLE_WHITE_K, CASTLE_WHITE_Q,
};
use super::Board;

impl Board {
    /// Parse a board position from FEN notation.
    pub fn try_from_fen(fen: &str) -> Result<Self, FenError> {
        let mut board = Board::empty();
        let parts: Vec<&str> = fen.split_whitespace().collect();

        if parts.len() < 4 {
            return Err(FenError::TooFewParts { found: parts.len() });
        }

        for (rank_idx, rank_str) in parts[0].split('/').enumerate() {
            if rank_idx >= 8 {
                return Err(FenError::InvalidRank { rank: rank_idx });
            }
            let mut file = 0;
            for c in rank_str.chars() {
                if let Some(skip) = c.to_digit(10) {
                    file += skip as usize;
                } else {
                    let color = if c.is_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    let piece = Piece::from_char(c).ok_or(FenError::InvalidPiece { piece: c })?;
                    if file >= 8 {
                        return Err(FenError::TooManyFiles {
                            rank: rank_idx,
                            files: file + 1,
                        });
                    }
                    board.set_piece(Square::new(7 - rank_idx, file), color, piece);
                    file += 1;
                }
            }
        }

        match parts[1] {
            "w" => board.white_to_move = true,
            "b" => board.white_to_move = false,
            other => {
                return Err(FenError::InvalidSideToMove {
                    found: other.to_string(),
                })
            }
        }

        for c in parts[2].chars() {
            match c {
                'K' => board.castling_rights |= CASTLE_WHITE_K,
                'Q' => board.castling_rights |= CASTLE_WHITE_Q,
                'k' => board.castling_rights |= CASTLE_BLACK_K,
                'q' => board.castling_rights |= CASTLE_BLACK_Q,
                '-' => {}
                _ => return Err(FenError::InvalidCastling { flag: c }),
            }
        }

        board.en_passant_target = if parts[3] == "-" {
            None
        } else {
            match parts[3].parse::<Square>() {
                Ok(sq) => Some(sq),
                Err(_) => {
                    return Err(FenError::InvalidEnPassant {
                        found: parts[3].to_string(),
                    })
                }
            }
        };

        if parts.len() >= 5 {
            board.halfmove_clock = parts[4].parse().unwrap_or(0);
        }
        if parts.len() >= 6 {
            board.fullmove_number = parts[5].parse().unwrap_or(1);
        }

        board.hash = board.calculate_hash();
        board.seen.push(board.hash);
        Ok(board)
    }

    /// Parse a board position from FEN notation.
    ///
    /// # Panics
    /// Panics if the FEN string is invalid. Use `try_from_fen` for fallible parsing.
    #[must_use]
    pub fn from_fen(fen: &str) -> Self {
        Self::try_from_fen(fen).expect("invalid FEN string")
    }

    /// Format the position as a FEN string.
    #[must_use]
    pub fn to_fen(&self) -> String {
        let mut rows: Vec<String> = Vec::new();
        for rank in (0..8).rev() {
            let mut row = String::new();
            let mut empty = 0;
            for file in 0..8 {
                if let Some((color, piece)) = self.piece_at(Square::new(rank, file)) {
                    if empty > 0 {
                        row.push_str(&empty.to_string());
                        empty = 0;
                    }
                    row.push(piece.to_fen_char(color));
                } else {
                    empty += 1;
                }
            }
            if empty > 0 {
                row.push_str(&empty.to_string());
            }
            rows.push(row);
        }

        let mut castling = String::new();
        if self.castling_rights & CASTLE_WHITE_K != 0 {
            castling.push('K');
        }
        if self.castling_rights & CASTLE_WHITE_Q != 0 {
            castling.push('Q');
        }
        if self.castling_rights & CASTLE_BLACK_K != 0 {
            castling.push('k');
        }
        if self.castling_rights & CASTLE_BLACK_Q != 0 {
            castling.push('q');
        }
        if castling.is_empty() {
            castling.push('-');
        }
        let ep = self
            .en_passant_target
            .map_or_else(|| "-".to_string(), |sq| sq.to_string());

        format!(
            "{} {} {} {} {} {}",
            rows.join("/"),
            if self.white_to_move { "w" } else { "b" },
            castling,
            ep,
            self.halfmove_clock,
            self.fullmove_number,
        )
    }

    /// Resolve a UCI move string (e.g. "e2e4", "e7e8q") against this position.
    pub fn parse_move(&self, notation: &str) -> Result<Move, MoveParseError> {
        let bad = || MoveParseError::BadNotation {
            notation: notation.to_string(),
        };
        if notation.len() != 4 && notation.len() != 5 {
            return Err(bad());
        }
        let from: Square = notation[0..2].parse().map_err(|_| bad())?;
        let to: Square = notation[2..4].parse().map_err(|_| bad())?;
        let promo = if notation.len() == 5 {
            let c = notation.chars().nth(4).ok_or_else(bad)?;
            Some(Piece::from_char(c).ok_or_else(bad)?)
        } else {
            None
        };

        let candidates = self.pseudo_legal_moves();
        let found = candidates.iter().copied().find(|m| {
            m.from() == from && m.to() == to && m.promotion_piece() == promo
        });
        found.ok_or(MoveParseError::NoMatchingMove {
            notation: notation.to_string(),
        })
    }

    /// Parse and apply a UCI move, rejecting illegal ones.
    pub fn play_uci_move(&mut self, notation: &str) -> Result<Move, MoveParseError> {
        let mv = self.parse_move(notation)?;
        let mut copy = self.clone();
        if !copy.try_move(mv) {
            return Err(MoveParseError::IllegalMove {
                notation: notation.to_string(),
            });
        }
        *self = copy;
        Ok(mv)
    }
}

impl FromStr for Board {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Board::try_from_fen(s)
    }
}
