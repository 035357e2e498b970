//! Perft reference counts for the move generator.

use crate::board::Board;

#[test]
fn perft_startpos() {
    let board = Board::new();
    assert_eq!(board.perft(1), 20);
    assert_eq!(board.perft(2), 400);
    assert_eq!(board.perft(3), 8_902);
    assert_eq!(board.perft(4), 197_281);
}

#[test]
fn perft_kiwipete() {
    let board =
        Board::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
    assert_eq!(board.perft(1), 48);
    assert_eq!(board.perft(2), 2_039);
    assert_eq!(board.perft(3), 97_862);
}

#[test]
fn perft_endgame_with_promotions() {
    let board = Board::from_fen("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1");
    assert_eq!(board.perft(1), 14);
    assert_eq!(board.perft(2), 191);
    assert_eq!(board.perft(3), 2_812);
    assert_eq!(board.perft(4), 43_238);
}

#[test]
fn perft_promotion_heavy() {
    let board =
        Board::from_fen("r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1");
    assert_eq!(board.perft(1), 6);
    assert_eq!(board.perft(2), 264);
    assert_eq!(board.perft(3), 9_467);
}

#[test]
fn perft_castling_pins() {
    let board = Board::from_fen("rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8");
    assert_eq!(board.perft(1), 44);
    assert_eq!(board.perft(2), 1_486);
    assert_eq!(board.perft(3), 62_379);
}
