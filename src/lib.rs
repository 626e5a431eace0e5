// Chess rules and search library
// Board representation using Mailbox (64-cell array) approach

pub mod board;
pub mod config;
pub mod error;
pub mod evaluation;
pub mod fen;
pub mod game;
pub mod movegen;
pub mod pieces;
pub mod search;
pub mod shell;
pub mod square;
pub mod state;

pub use board::{CastleSide, CastlingRights, Color, Move, Piece, PieceKind, Position};
pub use error::{ChessError, ChessResult, FenError, MoveError, SearchError};
pub use game::{Game, MoveRecord};
pub use search::{best_move, spawn_search, SearchHandle, Searcher};
pub use square::Square;
pub use state::{DrawReason, GameState};
