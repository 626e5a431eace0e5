/// Bishop move generation
/// Slides along the four diagonals, so it never leaves its square color
use crate::board::Position;
use crate::pieces::{add_sliding_moves, DIAGONALS};
use crate::square::Square;

pub struct BishopMoves;

impl BishopMoves {
    pub fn generate_moves(position: &Position, from: Square) -> Vec<Square> {
        let mut moves = Vec::with_capacity(13);

        let our_color = match position.piece_at(from) {
            Some(p) => p.color,
            None => return moves,
        };

        add_sliding_moves(&mut moves, position, from, our_color, &DIAGONALS);
        moves
    }
}
