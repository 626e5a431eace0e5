// Game-state classification
// Terminal conditions are tested for the side to move, in a fixed order

use std::fmt;

use crate::board::{Color, PieceKind, Position, Snapshot};
use crate::movegen::{has_legal_move, is_in_check};

/// Halfmove clock value that ends the game as a draw
pub const FIFTY_MOVE_LIMIT: u32 = 50;

/// Occurrences of one snapshot that end the game as a draw
pub const REPETITION_LIMIT: usize = 3;

/// Why a game ended without a winner
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum DrawReason {
    FiftyMove,
    Repetition,
    InsufficientMaterial,
}

impl fmt::Display for DrawReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawReason::FiftyMove => write!(f, "fifty-move rule"),
            DrawReason::Repetition => write!(f, "threefold repetition"),
            DrawReason::InsufficientMaterial => write!(f, "insufficient material"),
        }
    }
}

/// Classification of a position
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum GameState {
    Ongoing,
    /// The given side is in check but can still move
    Check(Color),
    Checkmate { winner: Color },
    Stalemate,
    Draw(DrawReason),
    /// A pawn waits on its last rank for a promotion choice
    PromotionPending,
}

impl GameState {
    /// True for checkmate, stalemate and every draw
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            GameState::Checkmate { .. } | GameState::Stalemate | GameState::Draw(_)
        )
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameState::Ongoing => write!(f, "ongoing"),
            GameState::Check(color) => write!(f, "check ({} to move)", color),
            GameState::Checkmate { winner } => write!(f, "checkmate, {} wins", winner),
            GameState::Stalemate => write!(f, "stalemate"),
            GameState::Draw(reason) => write!(f, "draw by {}", reason),
            GameState::PromotionPending => write!(f, "promotion pending"),
        }
    }
}

/// Classify `position` for its side to move
///
/// `history` holds the snapshot of every position reached so far in the game,
/// the current one included.
pub fn classify(position: &Position, history: &[Snapshot]) -> GameState {
    let to_move = position.side_to_move();
    let in_check = is_in_check(to_move, position);
    let can_move = has_legal_move(to_move, position);

    if in_check && !can_move {
        return GameState::Checkmate {
            winner: to_move.opposite(),
        };
    }
    if !can_move {
        return GameState::Stalemate;
    }
    if position.halfmove_clock() >= FIFTY_MOVE_LIMIT {
        return GameState::Draw(DrawReason::FiftyMove);
    }
    if is_threefold_repetition(position, history) {
        return GameState::Draw(DrawReason::Repetition);
    }
    if is_insufficient_material(position) {
        return GameState::Draw(DrawReason::InsufficientMaterial);
    }

    if in_check {
        GameState::Check(to_move)
    } else {
        GameState::Ongoing
    }
}

fn is_threefold_repetition(position: &Position, history: &[Snapshot]) -> bool {
    let current = position.snapshot();
    history.iter().filter(|s| **s == current).count() >= REPETITION_LIMIT
}

/// Nothing but kings, plus at most one minor piece or two bishops on one square colour
pub fn is_insufficient_material(position: &Position) -> bool {
    let others: Vec<_> = position
        .pieces()
        .filter(|p| p.kind != PieceKind::King)
        .collect();

    match others.as_slice() {
        [] => true,
        [single] => matches!(single.kind, PieceKind::Knight | PieceKind::Bishop),
        [a, b] => {
            a.kind == PieceKind::Bishop
                && b.kind == PieceKind::Bishop
                && a.square.is_light() == b.square.is_light()
        }
        _ => false,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
