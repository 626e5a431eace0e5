// Static evaluation of a position
// Scores are in hundredths of a pawn: positive favours white, negative favours black

use crate::board::{Color, PieceKind, Position};
use crate::movegen::{has_legal_move, is_in_check};

// Score constants
pub const CHECK_PENALTY: i32 = 2_500;
pub const CHECKMATE_PENALTY: i32 = 50_000;

/// Bonus for pawns, knights and bishops standing on a square
/// Indexed [rank - 1][file - 1]; centre squares weigh the most
const POSITIONAL_PST: [[i32; 8]; 8] = [
    [0, 0, 0, 0, 0, 0, 0, 0],
    [0, 15, 15, 15, 15, 15, 15, 0],
    [10, 15, 25, 25, 25, 25, 15, 10],
    [15, 15, 25, 50, 50, 25, 15, 15],
    [15, 15, 25, 50, 50, 25, 15, 15],
    [10, 15, 25, 25, 25, 25, 15, 10],
    [0, 15, 15, 15, 15, 15, 15, 0],
    [0, 0, 0, 0, 0, 0, 0, 0],
];

/// Material value of a piece kind
pub fn piece_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => 100,
        PieceKind::Knight => 300,
        PieceKind::Bishop => 300,
        PieceKind::Rook => 500,
        PieceKind::Queen => 900,
        PieceKind::King => 1_000,
    }
}

fn sign(color: Color) -> i32 {
    match color {
        Color::White => 1,
        Color::Black => -1,
    }
}

/// Evaluate the position from white's point of view
///
/// Material plus the positional table, minus a fixed amount for each side in
/// check and a much larger amount for a side that is checkmated. A stalemate
/// scores exactly 0 whatever the material.
pub fn static_evaluation(position: &Position) -> i32 {
    let to_move = position.side_to_move();
    let stuck = !has_legal_move(to_move, position);

    // 1. Stalemate overrides everything
    if stuck && !is_in_check(to_move, position) {
        return 0;
    }

    let mut score = 0;

    // 2. Material and placement
    for piece in position.pieces() {
        let mut value = piece_value(piece.kind);
        if matches!(piece.kind, PieceKind::Pawn | PieceKind::Knight | PieceKind::Bishop) {
            let sq = piece.square;
            value += POSITIONAL_PST[(sq.rank() - 1) as usize][(sq.file() - 1) as usize];
        }
        score += sign(piece.color) * value;
    }

    // 3. Check and checkmate
    for color in [Color::White, Color::Black] {
        if is_in_check(color, position) {
            score -= sign(color) * CHECK_PENALTY;
            if color == to_move && stuck {
                score -= sign(color) * CHECKMATE_PENALTY;
            }
        }
    }

    score
}

// =============================================================================
// Unit Tests
// =============================================================================
