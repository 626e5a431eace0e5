/// Queen move generation
/// Rook and Bishop rays combined
use crate::board::Position;
use crate::pieces::{add_sliding_moves, DIAGONALS, ORTHOGONALS};
use crate::square::Square;

pub struct QueenMoves;

impl QueenMoves {
    pub fn generate_moves(position: &Position, from: Square) -> Vec<Square> {
        let mut moves = Vec::with_capacity(27); // Queen can have up to 27 moves

        let our_color = match position.piece_at(from) {
            Some(p) => p.color,
            None => return moves,
        };

        add_sliding_moves(&mut moves, position, from, our_color, &ORTHOGONALS);
        add_sliding_moves(&mut moves, position, from, our_color, &DIAGONALS);
        moves
    }
}
