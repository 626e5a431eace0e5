/// Pawn move generation
/// Pushes forward, captures diagonally, and may take en passant
use crate::board::Position;
use crate::square::Square;

pub struct PawnMoves;

impl PawnMoves {
    /// Generate all pseudo-legal moves for a Pawn
    pub fn generate_moves(position: &Position, from: Square) -> Vec<Square> {
        let mut moves = Vec::with_capacity(4);

        let pawn = match position.piece_at(from) {
            Some(p) => p,
            None => return moves,
        };
        let dir = pawn.color.forward();

        // 1. Single push onto an empty square, then the double push from the home rank
        if let Some(one) = from.offset(0, dir) {
            if position.piece_at(one).is_none() {
                moves.push(one);

                let on_home_rank = from.rank() == pawn.color.pawn_rank();
                if !pawn.has_moved && on_home_rank {
                    if let Some(two) = from.offset(0, 2 * dir) {
                        if position.piece_at(two).is_none() {
                            moves.push(two);
                        }
                    }
                }
            }
        }

        // 2. Diagonal captures, including the en passant target square
        for df in [-1, 1] {
            if let Some(to) = from.offset(df, dir) {
                match position.piece_at(to) {
                    Some(p) if p.color != pawn.color => moves.push(to),
                    None if position.en_passant_target() == Some(to) => moves.push(to),
                    _ => {}
                }
            }
        }

        moves
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
