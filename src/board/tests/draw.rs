//! Draw detection tests.

use crate::board::Board;

#[test]
fn repetition_is_a_draw() {
    let mut board = Board::new();
    for mv in ["g1f3", "g8f6", "f3g1", "f6g8"] {
        assert!(!board.is_draw());
        board.play_uci_move(mv).expect("legal move");
    }
    // Back to the starting position with the same side to move
    assert!(board.is_draw());
}

#[test]
fn fifty_move_rule() {
    let board = Board::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 100 80");
    assert!(board.is_draw());
    let fresh = Board::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 99 80");
    assert!(!fresh.is_draw());
}

#[test]
fn bare_kings_are_a_draw() {
    assert!(Board::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").is_draw());
}

#[test]
fn lone_minor_piece_is_a_draw() {
    assert!(Board::from_fen("4k3/8/8/8/8/8/8/2B1K3 w - - 0 1").is_draw());
    assert!(Board::from_fen("4k3/8/8/8/8/8/8/2N1K3 w - - 0 1").is_draw());
}

#[test]
fn same_colored_bishops_are_a_draw() {
    // Both bishops on light squares
    assert!(Board::from_fen("2b1k3/8/8/8/8/8/8/4KB2 w - - 0 1").is_draw());
    // Opposite-colored bishops can still mate in theory
    assert!(!Board::from_fen("1b2k3/8/8/8/8/8/8/4KB2 w - - 0 1").is_draw());
}

#[test]
fn pawns_prevent_material_draw() {
    assert!(!Board::from_fen("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1").is_draw());
}

#[test]
fn irreversible_move_clears_repetition_history() {
    let mut board = Board::new();
    for mv in ["g1f3", "g8f6", "f3g1", "f6g8"] {
        board.play_uci_move(mv).expect("legal move");
    }
    assert!(board.is_draw());
    // A pawn push makes the old positions unreachable
    board.play_uci_move("e2e4").expect("legal move");
    assert!(!board.is_draw());
}
