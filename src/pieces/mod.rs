// Per-piece move geometry
// Each generator returns pseudo-legal destinations: it ignores whether the
// move would leave its own king attacked.

pub mod bishop;
pub mod king;
pub mod knight;
pub mod pawn;
pub mod queen;
pub mod rook;

use crate::board::{Color, Position};
use crate::square::Square;

/// Diagonal ray directions as (file, rank) steps
pub(crate) const DIAGONALS: [(i8, i8); 4] = [(-1, 1), (1, 1), (-1, -1), (1, -1)];

/// Orthogonal ray directions as (file, rank) steps
pub(crate) const ORTHOGONALS: [(i8, i8); 4] = [(0, 1), (0, -1), (-1, 0), (1, 0)];

/// Helper: cast rays for sliding pieces (Bishop, Rook, Queen)
/// A ray stops at the first occupied square, which is included only if it holds an enemy piece
pub(crate) fn add_sliding_moves(
    moves: &mut Vec<Square>,
    position: &Position,
    from: Square,
    our_color: Color,
    directions: &[(i8, i8)],
) {
    for &(df, dr) in directions {
        let mut current = from;
        while let Some(to) = current.offset(df, dr) {
            match position.piece_at(to) {
                None => {
                    // Empty square - can move here, continue searching
                    moves.push(to);
                    current = to;
                }
                Some(p) => {
                    if p.color != our_color {
                        moves.push(to);
                    }
                    break;
                }
            }
        }
    }
}

/// Helper: add jump moves for leaper pieces (Knight, King)
/// Jump moves can leap over other pieces
pub(crate) fn add_jump_moves(
    moves: &mut Vec<Square>,
    position: &Position,
    from: Square,
    our_color: Color,
    offsets: &[(i8, i8)],
) {
    for &(df, dr) in offsets {
        if let Some(to) = from.offset(df, dr) {
            match position.piece_at(to) {
                None => moves.push(to),                             // Empty - can move
                Some(p) if p.color != our_color => moves.push(to), // Enemy - can capture
                _ => {}                                             // Own piece - blocked
            }
        }
    }
}
