// Move generation: pseudo-legal geometry, legality filtering and attack queries
// A move is legal only if the mover's king is not attacked in the resulting position,
// which is found by applying the move to a copy and asking the attack question again.

use crate::board::{CastleSide, Color, Move, Piece, PieceKind, Position, KING_FILE};
use crate::pieces::bishop::BishopMoves;
use crate::pieces::king::KingMoves;
use crate::pieces::knight::KnightMoves;
use crate::pieces::pawn::PawnMoves;
use crate::pieces::queen::QueenMoves;
use crate::pieces::rook::RookMoves;
use crate::square::Square;

/// Destinations allowed by the piece's movement geometry, ignoring self-check
pub fn pseudo_legal_destinations(piece: &Piece, position: &Position) -> Vec<Square> {
    match piece.kind {
        PieceKind::Pawn => PawnMoves::generate_moves(position, piece.square),
        PieceKind::Knight => KnightMoves::generate_moves(position, piece.square),
        PieceKind::Bishop => BishopMoves::generate_moves(position, piece.square),
        PieceKind::Rook => RookMoves::generate_moves(position, piece.square),
        PieceKind::Queen => QueenMoves::generate_moves(position, piece.square),
        PieceKind::King => KingMoves::generate_moves(position, piece.square),
    }
}

/// Castling availability for one side
///
/// True iff the right is still held, king and rook stand unmoved on their original
/// squares and every square between them is empty. Squares the king passes through
/// are not tested for attacks.
pub fn can_castle(color: Color, side: CastleSide, position: &Position) -> bool {
    if !position.castling_rights().has(color, side) {
        return false;
    }

    let rank = color.back_rank();
    if !position.is_unmoved_at_home(color, KING_FILE, PieceKind::King)
        || !position.is_unmoved_at_home(color, side.rook_file(), PieceKind::Rook)
    {
        return false;
    }

    let rook_file = side.rook_file();
    let (low, high) = if rook_file < KING_FILE {
        (rook_file, KING_FILE)
    } else {
        (KING_FILE, rook_file)
    };
    ((low + 1)..high).all(|file| {
        Square::new(file, rank).is_some_and(|sq| position.piece_at(sq).is_none())
    })
}

/// Destinations that do not leave the piece's own king attacked
pub fn legal_moves(piece: &Piece, position: &Position) -> Vec<Square> {
    pseudo_legal_destinations(piece, position)
        .into_iter()
        .filter(|&to| {
            let mut simulated = *position;
            simulated.apply(Move::new(piece.square, to)).is_ok()
                && !is_in_check(piece.color, &simulated)
        })
        .collect()
}

/// Whether any piece of `color` could move to `square`
pub fn attacks_square(color: Color, square: Square, position: &Position) -> bool {
    position
        .pieces_of(color)
        .any(|piece| pseudo_legal_destinations(&piece, position).contains(&square))
}

/// Find the square of the King of the given color
pub fn find_king(color: Color, position: &Position) -> Option<Square> {
    position
        .pieces_of(color)
        .find(|p| p.kind == PieceKind::King)
        .map(|p| p.square)
}

/// Check if the King of the given color is attacked
pub fn is_in_check(color: Color, position: &Position) -> bool {
    match find_king(color, position) {
        Some(king_square) => attacks_square(color.opposite(), king_square, position),
        None => false, // No king found (only possible on hand-built boards)
    }
}

/// Whether `color` has at least one legal move anywhere on the board
pub fn has_legal_move(color: Color, position: &Position) -> bool {
    position
        .pieces_of(color)
        .any(|piece| !legal_moves(&piece, position).is_empty())
}

/// Every legal move for `color`; a pawn reaching the last rank yields one move per promotion choice
pub fn all_legal_moves(color: Color, position: &Position) -> Vec<Move> {
    let mut moves = Vec::new();
    for piece in position.pieces_of(color) {
        for to in legal_moves(&piece, position) {
            if piece.kind == PieceKind::Pawn && to.rank() == color.promotion_rank() {
                for kind in PieceKind::PROMOTIONS {
                    moves.push(Move::with_promotion(piece.square, to, kind));
                }
            } else {
                moves.push(Move::new(piece.square, to));
            }
        }
    }
    moves
}

/// Count leaf nodes of the legal move tree to `depth` plies
pub fn perft(position: &Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = all_legal_moves(position.side_to_move(), position);
    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .into_iter()
        .map(|mv| {
            let mut child = *position;
            match child.apply(mv) {
                Ok(_) => perft(&child, depth - 1),
                Err(_) => 0,
            }
        })
        .sum()
}

// =============================================================================
// Unit Tests
// =============================================================================
