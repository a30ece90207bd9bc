//! Search tests to verify the engine finds correct moves in various positions.

use std::str::FromStr;

use chess::{Board, BoardStatus, ChessMove, MoveGen, Square};
use sable_chess::{Engine, EngineError, OpeningBook};

fn board(fen: &str) -> Board {
    Board::from_str(fen).expect("valid FEN")
}

/// The engine finds a simple back-rank mate in one.
#[test]
fn finds_mate_in_one_back_rank() {
    let engine = Engine::new();
    let b = board("6k1/5ppp/8/8/8/8/8/4Q2K w - - 0 1");

    let mv = engine.engine_move(&b, 2, 30).expect("white has moves");
    assert_eq!(mv, ChessMove::new(Square::E1, Square::E8, None));
}

/// The engine delivers the scholar's mate.
#[test]
fn finds_mate_in_one_scholars() {
    let engine = Engine::new();
    let b = board("r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 0 4");

    let mv = engine.engine_move(&b, 2, 30).expect("white has moves");
    assert_eq!(mv, ChessMove::new(Square::H5, Square::F7, None));
}

/// Forced mate in three plies; depth 4 must find the rook sacrifice.
#[test]
fn finds_forced_mate_rook_sacrifice() {
    let engine = Engine::new();
    let b = board("r4q1k/1b4bp/4Q2N/p7/Pp6/3P4/1PP1p1PP/5RK1 w - - 0 29");

    let mv = engine.engine_move(&b, 4, 60).expect("white has moves");
    assert_eq!(mv, ChessMove::new(Square::F1, Square::F8, None));
}

/// Two rooks ladder a bare king; mate arrives within three engine moves,
/// whatever the defender replies.
#[test]
fn forces_mate_in_two_with_the_rook_ladder() {
    let engine = Engine::new();
    let mut b = board("7k/8/8/8/8/8/RR6/K7 w - - 0 1");

    for _ in 0..3 {
        let mv = engine.engine_move(&b, 4, 30).expect("white has moves");
        b = b.make_move_new(mv);
        if b.status() != BoardStatus::Ongoing {
            break;
        }
        let reply = MoveGen::new_legal(&b).next().expect("black has moves");
        b = b.make_move_new(reply);
    }

    assert_eq!(b.status(), BoardStatus::Checkmate, "ladder mate not delivered");
}

/// The engine takes a queen left hanging.
#[test]
fn captures_the_hanging_queen() {
    let engine = Engine::new();
    let b = board("k7/8/8/3q4/8/8/3R4/K7 w - - 0 1");

    let mv = engine.engine_move(&b, 2, 30).expect("white has moves");
    assert_eq!(mv, ChessMove::new(Square::D2, Square::D5, None));
}

/// Searching a checkmated position is the caller's precondition violation.
#[test]
fn checkmated_position_is_an_error() {
    let engine = Engine::new();
    let b = board("rnb1kbnr/pppp1ppp/4p3/8/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 0 1");

    assert_eq!(engine.engine_move(&b, 3, 30), Err(EngineError::NoLegalMoves));
}

/// Identical inputs without a timeout give identical moves.
#[test]
fn deterministic_under_fixed_inputs() {
    let engine = Engine::new();
    let b = Board::default();

    let first = engine.engine_move(&b, 3, 60).expect("startpos has moves");
    let second = engine.engine_move(&b, 3, 60).expect("startpos has moves");
    assert_eq!(first, second);
}

/// A depth of 0 is clamped up rather than rejected.
#[test]
fn zero_depth_is_clamped() {
    let engine = Engine::new();
    let b = Board::default();

    let mv = engine.engine_move(&b, 0, 1).expect("startpos has moves");
    assert!(MoveGen::new_legal(&b).any(|legal| legal == mv));
}

/// A book hit is returned verbatim, bypassing the search.
#[test]
fn book_move_bypasses_search() {
    let b = Board::default();
    let e4 = ChessMove::new(Square::E2, Square::E4, None);

    let mut book = OpeningBook::new();
    book.insert(b.to_string(), e4, 1);
    let engine = Engine::with_book(book);

    assert_eq!(engine.engine_move(&b, 1, 1), Ok(e4));
}

/// The default limits produce a legal move from the starting position.
#[test]
fn default_limits_produce_a_legal_move() {
    let engine = Engine::new();
    let b = Board::default();

    let mv = engine.engine_move_default(&b).expect("startpos has moves");
    assert!(MoveGen::new_legal(&b).any(|legal| legal == mv));
}
