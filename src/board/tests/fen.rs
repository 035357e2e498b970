//! FEN parsing and formatting tests.

use crate::board::{Board, Color, FenError, Piece, Square};

const STARTPOS: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[test]
fn startpos_roundtrip() {
    let board = Board::new();
    assert_eq!(board.to_fen(), STARTPOS);
    let parsed = Board::from_fen(STARTPOS);
    assert_eq!(parsed.hash(), board.hash());
}

#[test]
fn kiwipete_roundtrip() {
    let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    assert_eq!(Board::from_fen(fen).to_fen(), fen);
}

#[test]
fn en_passant_field_roundtrip() {
    let fen = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1";
    let board = Board::from_fen(fen);
    assert_eq!(board.to_fen(), fen);
    assert!(!board.white_to_move());
}

#[test]
fn parses_piece_placement() {
    let board = Board::from_fen("8/8/8/3q4/8/8/8/K6k w - - 0 1");
    assert_eq!(
        board.piece_at(Square::new(4, 3)),
        Some((Color::Black, Piece::Queen))
    );
    assert_eq!(board.piece_on(Square::new(0, 0)), Some(Piece::King));
}

#[test]
fn rejects_malformed_fens() {
    assert!(matches!(
        Board::try_from_fen("8/8/8 w"),
        Err(FenError::TooFewParts { .. })
    ));
    assert!(matches!(
        Board::try_from_fen("8/8/8/8/8/8/8/x7 w - - 0 1"),
        Err(FenError::InvalidPiece { .. })
    ));
    assert!(matches!(
        Board::try_from_fen("8/8/8/8/8/8/8/8 x - - 0 1"),
        Err(FenError::InvalidSideToMove { .. })
    ));
    assert!(matches!(
        Board::try_from_fen("8/8/8/8/8/8/8/8 w Z - 0 1"),
        Err(FenError::InvalidCastling { .. })
    ));
    assert!(matches!(
        Board::try_from_fen("8/8/8/8/8/8/8/8 w - j9 0 1"),
        Err(FenError::InvalidEnPassant { .. })
    ));
}

#[test]
fn parse_move_resolves_promotions() {
    let board = Board::from_fen("8/P7/8/8/8/8/8/k1K5 w - - 0 1");
    let queen = board.parse_move("a7a8q").expect("queen promotion");
    assert_eq!(queen.promotion_piece(), Some(Piece::Queen));
    let rook = board.parse_move("a7a8r").expect("rook promotion");
    assert_eq!(rook.promotion_piece(), Some(Piece::Rook));
    assert!(board.parse_move("a7a8").is_err());
    assert!(board.parse_move("zz9").is_err());
}
