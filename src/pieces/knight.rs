/// Knight move generation
/// (2,1) jumps in every direction; blockers are jumped over
use crate::board::Position;
use crate::pieces::add_jump_moves;
use crate::square::Square;

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2), (-1, 2), (1, -2), (-1, -2),
    (2, 1), (-2, 1), (2, -1), (-2, -1),
];

pub struct KnightMoves;

impl KnightMoves {
    pub fn generate_moves(position: &Position, from: Square) -> Vec<Square> {
        let mut moves = Vec::with_capacity(8);

        let our_color = match position.piece_at(from) {
            Some(p) => p.color,
            None => return moves,
        };

        add_jump_moves(&mut moves, position, from, our_color, &KNIGHT_OFFSETS);
        moves
    }
}
