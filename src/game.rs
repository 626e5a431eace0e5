// The live game: one authoritative position plus everything needed to judge it
// Moves are validated against the legal set before they touch the position.

use tracing::{debug, info};

use crate::board::{Move, MoveEffects, PieceKind, Position, Snapshot};
use crate::error::{ChessResult, FenError, MoveError};
use crate::fen;
use crate::movegen::legal_moves;
use crate::square::Square;
use crate::state::{classify, GameState};

/// One applied move and what it did to the board
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct MoveRecord {
    pub mv: Move,
    pub effects: MoveEffects,
}

/// What `undo` needs to put the game back exactly as it was
#[derive(Clone, Debug)]
struct UndoEntry {
    position: Position,
    state: GameState,
    pending: Option<MoveRecord>,
    history_len: usize,
    log_len: usize,
}

/// A game in progress
#[derive(Clone, Debug)]
pub struct Game {
    position: Position,
    state: GameState,
    /// Snapshot of every completed position, the starting one included
    history: Vec<Snapshot>,
    log: Vec<MoveRecord>,
    /// Pawn move waiting for its promotion choice
    pending: Option<MoveRecord>,
    undo_stack: Vec<UndoEntry>,
}

impl Game {
    /// A game from the standard starting position
    pub fn new() -> Self {
        Game::from_position(Position::starting())
    }

    /// A game from a FEN string; nothing is built if the FEN is malformed
    pub fn from_fen(text: &str) -> Result<Self, FenError> {
        fen::parse(text).map(Game::from_position)
    }

    pub fn from_position(position: Position) -> Self {
        let history = vec![position.snapshot()];
        let state = classify(&position, &history);
        info!(fen = %fen::serialize(&position), %state, "new game");
        Game {
            position,
            state,
            history,
            log: Vec::new(),
            pending: None,
            undo_stack: Vec::new(),
        }
    }

    /// Rebuild a game by applying "fromto[promo]" moves to a starting FEN
    pub fn replay(start_fen: &str, moves: &[&str]) -> ChessResult<Self> {
        let mut game = Game::from_fen(start_fen)?;
        for text in moves {
            let mv: Move = text.parse()?;
            game.play_move(mv)?;
        }
        Ok(game)
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn fen(&self) -> String {
        fen::serialize(&self.position)
    }

    pub fn history(&self) -> &[Snapshot] {
        &self.history
    }

    /// Moves applied so far
    pub fn moves(&self) -> &[MoveRecord] {
        &self.log
    }

    /// Applied moves in replayable "fromto[promo]" form
    pub fn move_log(&self) -> Vec<String> {
        self.log.iter().map(|r| r.mv.to_string()).collect()
    }

    /// Square of the pawn waiting for a promotion choice
    pub fn pending_promotion(&self) -> Option<Square> {
        self.pending.map(|r| r.mv.to)
    }

    /// Legal destinations for the piece on `square`, empty once the game is frozen
    pub fn legal_destinations(&self, square: Square) -> Vec<Square> {
        if self.state.is_terminal() || self.pending.is_some() {
            return Vec::new();
        }
        match self.position.piece_at(square) {
            Some(piece) => legal_moves(&piece, &self.position),
            None => Vec::new(),
        }
    }

    pub fn play_move(&mut self, mv: Move) -> Result<GameState, MoveError> {
        self.play(mv.from, mv.to, mv.promotion)
    }

    /// Move the piece on `from` to `to`
    ///
    /// A pawn reaching its last rank without `promotion` leaves the game in
    /// `GameState::PromotionPending` until `promote` is called. On error the
    /// game is unchanged.
    pub fn play(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> Result<GameState, MoveError> {
        if let Some(pending) = self.pending {
            return Err(MoveError::PromotionPending(pending.mv.to));
        }
        if self.state.is_terminal() {
            return Err(MoveError::GameOver);
        }

        let piece = self
            .position
            .piece_at(from)
            .ok_or(MoveError::NoPieceAtSquare(from))?;
        let to_move = self.position.side_to_move();
        if piece.color != to_move {
            return Err(MoveError::WrongSideToMove {
                square: from,
                color: piece.color,
                to_move,
            });
        }
        if !legal_moves(&piece, &self.position).contains(&to) {
            return Err(MoveError::IllegalMove { from, to });
        }
        if let Some(kind) = promotion {
            if !kind.is_promotion_choice() {
                return Err(MoveError::InvalidPromotion(kind.to_string()));
            }
        }

        let promotes = piece.kind == PieceKind::Pawn && to.rank() == piece.color.promotion_rank();
        let mv = Move {
            from,
            to,
            promotion: if promotes { promotion } else { None },
        };

        let saved = self.save();
        let mut next = self.position;
        let effects = next.apply(mv)?;
        self.undo_stack.push(saved);
        self.position = next;
        debug!(
            %mv,
            piece = ?effects.piece.kind,
            captured = ?effects.captured.map(|p| p.kind),
            "applied move"
        );

        let record = MoveRecord { mv, effects };
        if effects.promotion_pending {
            self.pending = Some(record);
            self.state = GameState::PromotionPending;
            debug!(square = %to, "waiting for promotion choice");
            return Ok(self.state);
        }
        Ok(self.complete(record))
    }

    /// Finish a pending promotion with the chosen piece
    pub fn promote(&mut self, kind: PieceKind) -> Result<GameState, MoveError> {
        let pending = self.pending.ok_or(MoveError::NoPromotionPending)?;
        if !kind.is_promotion_choice() {
            return Err(MoveError::InvalidPromotion(kind.to_string()));
        }
        self.position.promote(pending.mv.to, kind)?;
        self.pending = None;
        let mv = Move::with_promotion(pending.mv.from, pending.mv.to, kind);
        let effects = MoveEffects {
            promotion_pending: false,
            ..pending.effects
        };
        Ok(self.complete(MoveRecord { mv, effects }))
    }

    /// Revert the last applied move (a pending promotion counts as applied)
    pub fn undo(&mut self) -> Result<(), MoveError> {
        let entry = self.undo_stack.pop().ok_or(MoveError::NothingToUndo)?;
        self.position = entry.position;
        self.state = entry.state;
        self.pending = entry.pending;
        self.history.truncate(entry.history_len);
        self.log.truncate(entry.log_len);
        debug!(fen = %self.fen(), "undid move");
        Ok(())
    }

    fn save(&self) -> UndoEntry {
        UndoEntry {
            position: self.position,
            state: self.state,
            pending: self.pending,
            history_len: self.history.len(),
            log_len: self.log.len(),
        }
    }

    fn complete(&mut self, record: MoveRecord) -> GameState {
        self.log.push(record);
        self.history.push(self.position.snapshot());
        self.state = classify(&self.position, &self.history);
        if self.state.is_terminal() {
            info!(state = %self.state, moves = self.log.len(), "game over");
        }
        self.state
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Color;
    use crate::error::ChessError;
    use crate::state::DrawReason;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn test_new_game() {
        let game = Game::new();
        assert_eq!(game.state(), GameState::Ongoing);
        assert_eq!(game.fen(), fen::STARTING_FEN);
        assert_eq!(game.history().len(), 1);
        assert!(game.move_log().is_empty());
    }

    #[test]
    fn test_play_updates_fen() {
        let mut game = Game::new();
        game.play(sq("e2"), sq("e4"), None).unwrap();
        assert_eq!(
            game.fen(),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
        );
        assert_eq!(game.move_log(), vec!["e2e4".to_string()]);
    }

    #[test]
    fn test_rejected_moves_leave_game_unchanged() {
        let mut game = Game::new();
        let before = game.fen();

        assert_eq!(game.play(sq("e4"), sq("e5"), None), Err(MoveError::NoPieceAtSquare(sq("e4"))));
        assert_eq!(
            game.play(sq("e7"), sq("e5"), None),
            Err(MoveError::WrongSideToMove {
                square: sq("e7"),
                color: Color::Black,
                to_move: Color::White
            })
        );
        assert_eq!(
            game.play(sq("e2"), sq("e5"), None),
            Err(MoveError::IllegalMove { from: sq("e2"), to: sq("e5") })
        );
        assert_eq!(game.fen(), before, "Failed moves must not touch the position");
        assert!(game.move_log().is_empty());
    }

    #[test]
    fn test_promotion_pending_then_complete() {
        let mut game = Game::from_fen("7k/P7/8/8/8/8/8/K7 w - - 0 1").unwrap();
        let state = game.play(sq("a7"), sq("a8"), None).unwrap();
        assert_eq!(state, GameState::PromotionPending);
        assert_eq!(game.pending_promotion(), Some(sq("a8")));

        // Nothing else may happen until the choice is made
        assert_eq!(
            game.play(sq("h8"), sq("g8"), None),
            Err(MoveError::PromotionPending(sq("a8")))
        );
        assert_eq!(game.promote(PieceKind::King), Err(MoveError::InvalidPromotion("king".into())));

        let state = game.promote(PieceKind::Queen).unwrap();
        assert_eq!(state, GameState::Check(Color::Black));
        assert_eq!(game.move_log(), vec!["a7a8q".to_string()]);
        assert_eq!(
            game.position().piece_at(sq("a8")).map(|p| p.kind),
            Some(PieceKind::Queen)
        );
    }

    #[test]
    fn test_promotion_with_move() {
        let mut game = Game::from_fen("7k/P7/8/8/8/8/8/K7 w - - 0 1").unwrap();
        let state = game.play(sq("a7"), sq("a8"), Some(PieceKind::Rook)).unwrap();
        assert_eq!(state, GameState::Check(Color::Black));
        assert_eq!(game.fen(), "R6k/8/8/8/8/8/8/K7 b - - 0 1");
    }

    #[test]
    fn test_promote_without_pending() {
        let mut game = Game::new();
        assert_eq!(game.promote(PieceKind::Queen), Err(MoveError::NoPromotionPending));
    }

    #[test]
    fn test_terminal_state_freezes_game() {
        let mut game = Game::from_fen("8/8/4k3/8/8/4K3/8/8 w - - 0 1").unwrap();
        assert_eq!(game.state(), GameState::Draw(DrawReason::InsufficientMaterial));
        assert_eq!(game.play(sq("e3"), sq("e4"), None), Err(MoveError::GameOver));
        assert!(game.legal_destinations(sq("e3")).is_empty());
    }

    #[test]
    fn test_legal_destinations() {
        let game = Game::new();
        let mut hints = game.legal_destinations(sq("g1"));
        hints.sort();
        assert_eq!(hints, vec![sq("f3"), sq("h3")]);
        assert!(game.legal_destinations(sq("e4")).is_empty());
    }

    #[test]
    fn test_undo_restores_everything() {
        let mut game = Game::new();
        game.play(sq("e2"), sq("e4"), None).unwrap();
        let after_first = game.fen();
        game.play(sq("e7"), sq("e5"), None).unwrap();

        game.undo().unwrap();
        assert_eq!(game.fen(), after_first);
        assert_eq!(game.history().len(), 2);
        assert_eq!(game.move_log(), vec!["e2e4".to_string()]);

        game.undo().unwrap();
        assert_eq!(game.fen(), fen::STARTING_FEN);
        assert_eq!(game.undo(), Err(MoveError::NothingToUndo));
    }

    #[test]
    fn test_undo_pending_promotion() {
        let start = "7k/P7/8/8/8/8/8/K7 w - - 0 1";
        let mut game = Game::from_fen(start).unwrap();
        game.play(sq("a7"), sq("a8"), None).unwrap();
        game.undo().unwrap();
        assert_eq!(game.fen(), start);
        assert_eq!(game.state(), GameState::Ongoing);
        assert_eq!(game.pending_promotion(), None);
    }

    #[test]
    fn test_move_records_effects() {
        let moves = ["e2e4", "a7a6", "e4e5", "d7d5", "e5d6"];
        let game = Game::replay(fen::STARTING_FEN, &moves).unwrap();
        let last = game.moves().last().copied().unwrap();
        assert_eq!(last.mv, Move::new(sq("e5"), sq("d6")));
        assert!(last.effects.en_passant);
        assert_eq!(last.effects.captured.map(|p| p.square), Some(sq("d5")));
    }

    #[test]
    fn test_replay() {
        let game = Game::replay(fen::STARTING_FEN, &["e2e4", "e7e5", "g1f3"]).unwrap();
        assert_eq!(game.move_log(), vec!["e2e4", "e7e5", "g1f3"]);
        assert_eq!(game.position().side_to_move(), Color::Black);

        let bad = Game::replay(fen::STARTING_FEN, &["e2e4", "zz"]);
        assert_eq!(bad.err(), Some(ChessError::Move(MoveError::Notation("zz".into()))));

        let bad_fen = Game::replay("not a fen", &[]);
        assert!(matches!(bad_fen, Err(ChessError::Fen(_))));
    }
}
