//! Move generation tests.

use crate::board::Board;

#[test]
fn captures_come_before_quiets() {
    let board =
        Board::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
    let moves = board.pseudo_legal_moves();
    let first_quiet = moves
        .iter()
        .position(|m| !m.is_capture())
        .unwrap_or(moves.len());
    for i in first_quiet..moves.len() {
        assert!(!moves.get(i).is_capture(), "capture after quiet at {i}");
    }
}

#[test]
fn capture_list_excludes_promotions() {
    let board = Board::from_fen("1n6/P7/8/8/8/8/8/k1K5 w - - 0 1");
    let captures = board.pseudo_legal_captures();
    assert!(captures.iter().all(|m| !m.is_promotion()));

    let promotions = board.pseudo_legal_promotions();
    // Four quiet promotions plus four capturing ones onto b8
    assert_eq!(promotions.len(), 8);
    assert!(promotions.iter().all(|m| m.is_promotion()));
}

#[test]
fn check_escapes_are_complete() {
    // White king checked by the rook on e8; every legal answer must appear
    // in the evasion list (compare against brute-force filtering)
    let board = Board::from_fen("4r3/8/8/8/8/8/3P1P2/2B1K2k w - - 0 1");
    let escapes = board.pseudo_legal_check_escapes();
    let mut legal_count = 0;
    for m in &board.pseudo_legal_moves() {
        let mut copy = board.clone();
        if copy.try_move(*m) {
            legal_count += 1;
            assert!(
                escapes.contains(*m),
                "legal evasion {m} missing from escapes"
            );
        }
    }
    assert!(legal_count > 0);
}

#[test]
fn double_check_allows_only_king_moves() {
    // Knight on f3 and rook on e8 both give check
    let board = Board::from_fen("4r3/8/8/8/8/5n2/8/4K3 w - - 0 1");
    let escapes = board.pseudo_legal_check_escapes();
    assert!(!escapes.is_empty());
    for m in &escapes {
        assert_eq!(m.from(), crate::board::Square::new(0, 4));
    }
}

#[test]
fn quiet_checks_are_detected() {
    // Only the rook lift to a8 checks the black king on e8
    let board = Board::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1");
    let checks = board.pseudo_legal_checks();
    assert!(checks.iter().any(|m| m.to_string() == "a1a8"));
    for m in &checks {
        assert!(board.gives_check(*m), "{m} listed but gives no check");
        assert!(!m.is_capture());
    }
}

#[test]
fn gives_check_sees_discovered_checks() {
    // Bishop on b5 is masked by the knight on c6; moving it discovers check
    let board = Board::from_fen("4k3/8/2N5/1B6/8/8/8/4K3 w - - 0 1");
    let m = board.parse_move("c6e5").expect("knight move");
    assert!(board.gives_check(m));
}

#[test]
fn castle_through_attack_is_not_generated() {
    // Black rook on f8 covers f1; kingside castling is impossible
    let board = Board::from_fen("4kr2/8/8/8/8/8/8/4K2R w K - 0 1");
    let moves = board.pseudo_legal_moves();
    assert!(moves.iter().all(|m| !m.is_castle()));

    // Without the rook the castle appears
    let free = Board::from_fen("4k3/8/8/8/8/8/8/4K2R w K - 0 1");
    assert!(free.pseudo_legal_moves().iter().any(|m| m.is_castle()));
}

#[test]
fn stalemate_and_checkmate_detection() {
    let stalemate = Board::from_fen("k7/8/1QK5/8/8/8/8/8 b - - 0 1");
    assert!(stalemate.is_stalemate());
    assert!(!stalemate.is_checkmate());

    let mate = Board::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 0 3");
    assert!(mate.is_checkmate());
    assert!(!mate.is_stalemate());
}
