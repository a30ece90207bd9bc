//! Static evaluation: material plus Michniewski's simplified piece-square
//! tables. Also hosts the endgame detector and the favorable-move
//! classifier used by the quiescence search, which share the value tables.

use chess::{BitBoard, Board, ChessMove, Color, Piece, Square};

// Material values in centipawns
const PAWN_VALUE: i32 = 100;
const KNIGHT_VALUE: i32 = 320;
const BISHOP_VALUE: i32 = 330;
const ROOK_VALUE: i32 = 500;
const QUEEN_VALUE: i32 = 900;
const KING_VALUE: i32 = 20000;

// Piece-square tables, written rank 8 first. Black reads them as-is, White
// mirrored vertically.
const PAWN_PST: [i32; 64] = [
    0,   0,   0,   0,   0,   0,   0,   0,
    50,  50,  50,  50,  50,  50,  50,  50,
    10,  10,  20,  30,  30,  20,  10,  10,
    5,   5,   10,  25,  25,  10,  5,   5,
    0,   0,   0,   20,  20,  0,   0,   0,
    5,   -5,  -10, 0,   0,   -10, -5,  5,
    5,   10,  10,  -20, -20, 10,  10,  5,
    0,   0,   0,   0,   0,   0,   0,   0,
];

const KNIGHT_PST: [i32; 64] = [
    -50, -40, -30, -30, -30, -30, -40, -50,
    -40, -20, 0,   0,   0,   0,   -20, -40,
    -30, 0,   10,  15,  15,  10,  0,   -30,
    -30, 5,   15,  20,  20,  15,  5,   -30,
    -30, 0,   15,  20,  20,  15,  0,   -30,
    -30, 5,   10,  15,  15,  10,  5,   -30,
    -40, -20, 0,   5,   5,   0,   -20, -40,
    -50, -40, -30, -30, -30, -30, -40, -50,
];

const BISHOP_PST: [i32; 64] = [
    -20, -10, -10, -10, -10, -10, -10, -20,
    -10, 5,   0,   0,   0,   0,   5,   -10,
    -10, 10,  10,  10,  10,  10,  10,  -10,
    -10, 0,   10,  10,  10,  10,  0,   -10,
    -10, 5,   5,   10,  10,  5,   5,   -10,
    -10, 0,   5,   10,  10,  5,   0,   -10,
    -10, 0,   0,   0,   0,   0,   0,   -10,
    -20, -10, -10, -10, -10, -10, -10, -20,
];

const ROOK_PST: [i32; 64] = [
    0,   0,   0,   0,   0,   0,   0,   0,
    5,   10,  10,  10,  10,  10,  10,  5,
    -5,  0,   0,   0,   0,   0,   0,   -5,
    -5,  0,   0,   0,   0,   0,   0,   -5,
    -5,  0,   0,   0,   0,   0,   0,   -5,
    -5,  0,   0,   0,   0,   0,   0,   -5,
    -5,  0,   0,   0,   0,   0,   0,   -5,
    0,   0,   0,   5,   5,   0,   0,   0,
];

const QUEEN_PST: [i32; 64] = [
    -20, -10, -10, -5,  -5,  -10, -10, -20,
    -10, 0,   0,   0,   0,   0,   0,   -10,
    -10, 0,   5,   5,   5,   5,   0,   -10,
    -5,  0,   5,   5,   5,   5,   0,   -5,
    -5,  0,   5,   5,   5,   5,   0,   -5,
    -10, 5,   5,   5,   5,   5,   0,   -10,
    -10, 0,   5,   0,   0,   0,   0,   -10,
    -20, -10, -10, -5,  -5,  -10, -10, -20,
];

const KING_PST: [i32; 64] = [
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -20, -30, -30, -40, -40, -30, -30, -20,
    -10, -20, -20, -20, -20, -20, -20, -10,
    20,  20,  0,   0,   0,   0,   20,  20,
    20,  30,  10,  0,   0,   10,  30,  20,
];

// Separate king table once queens (mostly) leave the board: the king walks
// to the center instead of hiding behind pawns.
const KING_ENDGAME_PST: [i32; 64] = [
    -50, -40, -30, -20, -20, -30, -40, -50,
    -30, -20, -10, 0,   0,   -10, -20, -30,
    -30, -10, 20,  30,  30,  20,  -10, -30,
    -30, -10, 30,  40,  40,  30,  -10, -30,
    -30, -10, 30,  40,  40,  30,  -10, -30,
    -30, -10, 20,  30,  30,  20,  -10, -30,
    -30, -30, 0,   0,   0,   0,   -30, -30,
    -50, -30, -30, -30, -30, -30, -30, -50,
];

/// Material value of a piece in centipawns.
#[must_use]
pub fn piece_value(piece: Piece) -> i32 {
    match piece {
        Piece::Pawn => PAWN_VALUE,
        Piece::Knight => KNIGHT_VALUE,
        Piece::Bishop => BISHOP_VALUE,
        Piece::Rook => ROOK_VALUE,
        Piece::Queen => QUEEN_VALUE,
        Piece::King => KING_VALUE,
    }
}

fn pst_bonus(piece: Piece, color: Color, square: Square, endgame: bool) -> i32 {
    let idx = match color {
        Color::White => square.to_index() ^ 56,
        Color::Black => square.to_index(),
    };
    let table = match piece {
        Piece::King if endgame => &KING_ENDGAME_PST,
        Piece::Pawn => &PAWN_PST,
        Piece::Knight => &KNIGHT_PST,
        Piece::Bishop => &BISHOP_PST,
        Piece::Rook => &ROOK_PST,
        Piece::Queen => &QUEEN_PST,
        Piece::King => &KING_PST,
    };
    table[idx]
}

/// Static score of the position from White's point of view, in centipawns.
///
/// Sum over every piece of material value plus the piece-square bonus,
/// added for White and subtracted for Black. No notion of side to move.
#[must_use]
pub fn evaluate(board: &Board) -> i32 {
    let endgame = is_endgame(board);
    let mut score = 0;

    for square in *board.combined() {
        let (Some(piece), Some(color)) = (board.piece_on(square), board.color_on(square)) else {
            continue;
        };
        let value = piece_value(piece) + pst_bonus(piece, color, square, endgame);
        score += match color {
            Color::White => value,
            Color::Black => -value,
        };
    }

    score
}

/// Endgame per Michniewski: a side qualifies with no queens, or with one
/// queen and at most one of its own minor pieces. The king switches to its
/// endgame table only when both sides qualify.
#[must_use]
pub fn is_endgame(board: &Board) -> bool {
    side_in_endgame(board, Color::White) && side_in_endgame(board, Color::Black)
}

fn side_in_endgame(board: &Board, color: Color) -> bool {
    let own = *board.color_combined(color);
    let queens = (*board.pieces(Piece::Queen) & own).popcnt();
    let minors = ((*board.pieces(Piece::Knight) | *board.pieces(Piece::Bishop)) & own).popcnt();
    queens == 0 || (queens == 1 && minors <= 1)
}

/// Number of `color`'s pieces attacking `square`, composed from the rules
/// engine's attack tables.
pub(crate) fn attackers(board: &Board, color: Color, square: Square) -> u32 {
    let own = *board.color_combined(color);
    let occupied = *board.combined();

    // A pawn of the opposite color on `square` is attacked from exactly the
    // squares our pawns attack it from.
    let pawns = *board.pieces(Piece::Pawn) & own;
    let mut count = chess::get_pawn_attacks(square, !color, pawns).popcnt();

    count += (chess::get_knight_moves(square) & *board.pieces(Piece::Knight) & own).popcnt();
    count += (chess::get_king_moves(square) & *board.pieces(Piece::King) & own).popcnt();

    let diagonal: BitBoard = *board.pieces(Piece::Bishop) | *board.pieces(Piece::Queen);
    count += (chess::get_bishop_moves(square, occupied) & diagonal & own).popcnt();

    let straight: BitBoard = *board.pieces(Piece::Rook) | *board.pieces(Piece::Queen);
    count += (chess::get_rook_moves(square, occupied) & straight & own).popcnt();

    count
}

/// Whether a legal move is worth extending past the nominal search depth.
///
/// Promotions always qualify. A capture qualifies when it wins material
/// outright, or when the mover's attackers of the destination square
/// strictly outnumber the opponent's. En passant never reaches the capture
/// branch: its destination square is empty.
///
/// # Panics
///
/// Panics if a capture's source square holds no piece. That means the
/// position is corrupted or the move is not legal for it, and the search
/// must not continue.
#[must_use]
pub fn is_favorable(board: &Board, mv: ChessMove) -> bool {
    if let Some(victim) = board.piece_on(mv.get_dest()) {
        let Some(attacker) = board.piece_on(mv.get_source()) else {
            panic!("capture {mv} has no piece on its source square");
        };

        // Winning trade
        if piece_value(attacker) < piece_value(victim) {
            return true;
        }

        // Otherwise ask who holds the initiative on the target square
        let mover = board.side_to_move();
        return attackers(board, mover, mv.get_dest()) > attackers(board, !mover, mv.get_dest());
    }

    mv.get_promotion().is_some()
}
