/// Here we define associated movements, captures or
/// other traits with this piece, the almighty King !!
use crate::board::{CastleSide, Position};
use crate::movegen::can_castle;
use crate::pieces::add_jump_moves;
use crate::square::Square;

// King's 8 directions
const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, 1), (0, 1), (1, 1),
    (-1, 0),         (1, 0),
    (-1, -1), (0, -1), (1, -1),
];

/// KingMoves is an Unit Struct, namespace to group related functions together.
pub struct KingMoves;

impl KingMoves {
    /// Adjacent squares plus the castling destinations (g1/c1/g8/c8) when castling is allowed
    pub fn generate_moves(position: &Position, from: Square) -> Vec<Square> {
        let mut moves = Vec::with_capacity(10);

        // Get the color of the piece that's moving
        let our_color = match position.piece_at(from) {
            Some(p) => p.color,
            None => return moves, // No piece at 'from', return empty
        };

        add_jump_moves(&mut moves, position, from, our_color, &KING_OFFSETS);

        for side in [CastleSide::Kingside, CastleSide::Queenside] {
            if can_castle(our_color, side, position) {
                if let Some(to) = Square::new(side.king_target_file(), our_color.back_rank()) {
                    moves.push(to);
                }
            }
        }

        moves // Return all valid squares
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
