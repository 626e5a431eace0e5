// Error types for the rules engine
// Every failure is reported straight to the caller; nothing is retried or repaired.

use thiserror::Error;

use crate::board::Color;
use crate::square::Square;

/// Algebraic square text that does not name a square ("e4" is fine, "i9" is not)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid square '{0}' (expected a-h followed by 1-8)")]
pub struct SquareParseError(pub String);

/// Reasons a FEN string is rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("expected 6 space-separated fields, got {0}")]
    FieldCount(usize),

    #[error("piece placement must have 8 ranks separated by '/', got {0}")]
    RankCount(usize),

    #[error("piece placement has an empty rank group (leading, trailing or repeated '/')")]
    EmptyRank,

    #[error("rank {rank} describes {files} files instead of 8")]
    RankWidth { rank: u8, files: u32 },

    #[error("invalid piece letter '{0}'")]
    InvalidPiece(char),

    #[error("invalid empty-square count '{0}' (must be 1-8)")]
    InvalidDigit(char),

    #[error("expected exactly one {color} king, found {count}")]
    KingCount { color: Color, count: usize },

    #[error("active color must be 'w' or 'b', got '{0}'")]
    ActiveColor(String),

    #[error("invalid castling availability '{0}'")]
    Castling(String),

    #[error("invalid en passant target '{0}'")]
    EnPassant(String),

    #[error("halfmove clock must be a non-negative integer, got '{0}'")]
    HalfmoveClock(String),

    #[error("fullmove number must be a non-negative integer, got '{0}'")]
    FullmoveNumber(String),
}

/// Reasons a move request is rejected; the game is left untouched
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error("no piece at {0}")]
    NoPieceAtSquare(Square),

    #[error("the piece at {square} belongs to {color}, but it is {to_move}'s turn")]
    WrongSideToMove {
        square: Square,
        color: Color,
        to_move: Color,
    },

    #[error("illegal move: {from} to {to}")]
    IllegalMove { from: Square, to: Square },

    #[error("the game is over")]
    GameOver,

    #[error("a promotion piece must be chosen for the pawn on {0}")]
    PromotionPending(Square),

    #[error("there is no pawn waiting for promotion")]
    NoPromotionPending,

    #[error("cannot promote to {0}")]
    InvalidPromotion(String),

    #[error("no move to undo")]
    NothingToUndo,

    #[error("cannot read move '{0}'")]
    Notation(String),
}

/// Umbrella error for callers that parse positions and play moves in one go
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    #[error(transparent)]
    Fen(#[from] FenError),

    #[error(transparent)]
    Move(#[from] MoveError),

    #[error(transparent)]
    Square(#[from] SquareParseError),
}

/// A background search that ended without an answer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("search worker panicked: {0}")]
    WorkerPanicked(String),

    #[error("search worker stopped without reporting a result")]
    NoResult,
}

/// Environment configuration problems
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} has invalid value '{value}'")]
    InvalidValue { name: &'static str, value: String },

    #[error("CHESS_START_FEN is not a valid position: {0}")]
    StartFen(#[from] FenError),
}

/// A shell command that could not be carried out
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command '{0}'")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error(transparent)]
    Chess(#[from] ChessError),

    #[error(transparent)]
    Search(#[from] SearchError),
}

impl From<FenError> for CommandError {
    fn from(err: FenError) -> Self {
        CommandError::Chess(err.into())
    }
}

impl From<MoveError> for CommandError {
    fn from(err: MoveError) -> Self {
        CommandError::Chess(err.into())
    }
}

impl From<SquareParseError> for CommandError {
    fn from(err: SquareParseError) -> Self {
        CommandError::Chess(err.into())
    }
}

/// Result type alias for operations that may fail with any engine error
pub type ChessResult<T> = Result<T, ChessError>;
