/// Rook move generation
/// Moves horizontally and vertically (orthogonally)
use crate::board::Position;
use crate::pieces::{add_sliding_moves, ORTHOGONALS};
use crate::square::Square;

pub struct RookMoves;

impl RookMoves {
    /// Generate all pseudo-legal moves for a Rook
    /// Rook slides horizontally and vertically
    pub fn generate_moves(position: &Position, from: Square) -> Vec<Square> {
        let mut moves = Vec::with_capacity(14); // Rook can have up to 14 moves

        // Get the color of the piece that's moving
        let our_color = match position.piece_at(from) {
            Some(p) => p.color,
            None => return moves, // No piece at 'from', return empty
        };

        add_sliding_moves(&mut moves, position, from, our_color, &ORTHOGONALS);
        moves
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Color, PieceKind};
    use crate::pieces::test_support::{put, sq};

    #[test]
    fn test_rook_on_empty_board_center() {
        let mut position = Position::empty();
        put(&mut position, PieceKind::Rook, Color::White, "d4");

        let moves = RookMoves::generate_moves(&position, sq("d4"));

        // Rook should have 14 moves from center (7 vertical + 7 horizontal)
        assert_eq!(moves.len(), 14, "Rook should have 14 moves from center");
        assert!(moves.contains(&sq("d8")), "Rook move to d8 should be possible");
        assert!(moves.contains(&sq("d1")), "Rook move to d1 should be possible");
        assert!(moves.contains(&sq("a4")), "Rook move to a4 should be possible");
        assert!(moves.contains(&sq("h4")), "Rook move to h4 should be possible");

        // Should NOT have diagonal moves
        assert!(!moves.contains(&sq("c5")), "Rook should not move diagonally");
        assert!(!moves.contains(&sq("e3")), "Rook should not move diagonally");
    }

    #[test]
    fn test_rook_blocked_by_own_piece() {
        let mut position = Position::empty();
        put(&mut position, PieceKind::Rook, Color::White, "d4");
        put(&mut position, PieceKind::King, Color::White, "d5");

        let moves = RookMoves::generate_moves(&position, sq("d4"));

        assert!(!moves.contains(&sq("d5")), "Should not capture own piece");
        assert!(!moves.contains(&sq("d6")), "Should not slide through own piece");
    }

    #[test]
    fn test_rook_can_capture_enemy() {
        let mut position = Position::empty();
        put(&mut position, PieceKind::Rook, Color::White, "d4");
        put(&mut position, PieceKind::Knight, Color::Black, "d5");

        let moves = RookMoves::generate_moves(&position, sq("d4"));

        assert!(moves.contains(&sq("d5")), "Should be able to capture enemy piece");
        assert!(!moves.contains(&sq("d6")), "Should not slide through enemy piece");
    }

    #[test]
    fn test_rook_corner() {
        let mut position = Position::empty();
        put(&mut position, PieceKind::Rook, Color::White, "a1");

        let moves = RookMoves::generate_moves(&position, sq("a1"));
        assert_eq!(moves.len(), 14, "Rook should have 14 moves from corner");
    }

    #[test]
    fn test_rook_no_piece_returns_empty() {
        let position = Position::empty();
        let moves = RookMoves::generate_moves(&position, sq("d4"));
        assert!(moves.is_empty(), "No piece at square should return empty moves");
    }
}
