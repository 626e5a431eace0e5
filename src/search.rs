// Search algorithm for choosing a move
// Uses Minimax with Alpha-Beta pruning over copied positions; the input position is never touched

use std::any::Any;
use std::sync::mpsc;
use std::thread;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, trace};

use crate::board::{Color, Move, Position};
use crate::error::SearchError;
use crate::evaluation::static_evaluation;
use crate::movegen::{all_legal_moves, has_legal_move, is_in_check};

const INFINITY: i32 = i32::MAX;

// =============================================================================
// Tree Expansion
// =============================================================================

/// Every legal move for the side to move, paired with the position it leads to
pub fn possible_positions(position: &Position) -> Vec<(Move, Position)> {
    all_legal_moves(position.side_to_move(), position)
        .into_iter()
        .filter_map(|mv| {
            let mut child = *position;
            child.apply(mv).ok().map(|_| (mv, child))
        })
        .collect()
}

fn is_checkmate(position: &Position) -> bool {
    let to_move = position.side_to_move();
    is_in_check(to_move, position) && !has_legal_move(to_move, position)
}

// =============================================================================
// Search Algorithm: Minimax with Alpha-Beta Pruning
// =============================================================================

/// Minimax search with Alpha-Beta pruning
/// Returns the score of the position from white's point of view
pub fn minimax(
    position: &Position,
    depth: u32,
    mut alpha: i32,
    mut beta: i32,
    maximizing: bool,
) -> i32 {
    // Base case: reached maximum depth
    if depth == 0 {
        return static_evaluation(position);
    }

    let children = possible_positions(position);

    // No legal moves = checkmate or stalemate, both scored by the evaluation
    if children.is_empty() {
        return static_evaluation(position);
    }

    if maximizing {
        let mut best = -INFINITY;
        for (_, child) in &children {
            let score = minimax(child, depth - 1, alpha, beta, false);
            best = best.max(score);
            alpha = alpha.max(score);
            if beta <= alpha {
                break; // Beta cutoff
            }
        }
        best
    } else {
        let mut best = INFINITY;
        for (_, child) in &children {
            let score = minimax(child, depth - 1, alpha, beta, true);
            best = best.min(score);
            beta = beta.min(score);
            if beta <= alpha {
                break; // Alpha cutoff
            }
        }
        best
    }
}

// =============================================================================
// Move Selection
// =============================================================================

/// Search settings plus the random source that breaks ties between equal moves
#[derive(Clone, Debug)]
pub struct Searcher {
    depth: u32,
    rng: StdRng,
}

impl Searcher {
    /// A searcher seeded from the operating system
    pub fn new(depth: u32) -> Self {
        Searcher {
            depth: depth.max(1),
            rng: StdRng::from_os_rng(),
        }
    }

    /// A searcher whose tie-breaking is reproducible
    pub fn with_seed(depth: u32, seed: u64) -> Self {
        Searcher {
            depth: depth.max(1),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Plies searched, never less than one
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Find the best move for `color`
    ///
    /// White maximizes and black minimizes. Candidates are shuffled first, so
    /// among equal scores the first one seen wins. A move that mates at once is
    /// returned without searching the rest. Returns `None` without legal moves.
    pub fn best_move(&mut self, position: &Position, color: Color) -> Option<Move> {
        let mut root = *position;
        root.set_side_to_move(color);

        let mut candidates = possible_positions(&root);
        candidates.shuffle(&mut self.rng);

        let maximizing = color == Color::White;
        let mut best: Option<(Move, i32)> = None;

        for (mv, child) in candidates {
            if is_checkmate(&child) {
                debug!(%mv, %color, "found mate in one");
                return Some(mv);
            }

            let score = minimax(&child, self.depth - 1, -INFINITY, INFINITY, !maximizing);
            trace!(%mv, score, "candidate");

            let improves = match best {
                None => true,
                Some((_, best_score)) if maximizing => score > best_score,
                Some((_, best_score)) => score < best_score,
            };
            if improves {
                best = Some((mv, score));
            }
        }

        if let Some((mv, score)) = best {
            debug!(%mv, score, depth = self.depth, %color, "search finished");
        }
        best.map(|(mv, _)| mv)
    }

    /// Run `best_move` on a worker thread over a copy of `position`
    pub fn spawn(mut self, position: Position, color: Color) -> SearchHandle {
        let (sender, receiver) = mpsc::channel();
        let worker = thread::spawn(move || {
            let result = self.best_move(&position, color);
            // The receiver may already be gone; nobody is left to tell
            let _ = sender.send(result);
        });
        SearchHandle { receiver, worker }
    }
}

/// Find the best move for `color` searching `depth` plies
pub fn best_move(position: &Position, color: Color, depth: u32) -> Option<Move> {
    Searcher::new(depth).best_move(position, color)
}

/// Start a background search; the caller keeps its own position untouched
pub fn spawn_search(position: Position, color: Color, depth: u32) -> SearchHandle {
    Searcher::new(depth).spawn(position, color)
}

// =============================================================================
// Background Search
// =============================================================================

/// Result channel of a search running on another thread
#[derive(Debug)]
pub struct SearchHandle {
    receiver: mpsc::Receiver<Option<Move>>,
    worker: thread::JoinHandle<()>,
}

impl SearchHandle {
    /// Block until the search is done
    ///
    /// `Ok(None)` means the side had no legal move. A worker that died before
    /// answering is reported as an error, never as an empty result.
    pub fn recv(self) -> Result<Option<Move>, SearchError> {
        let result = self.receiver.recv();
        match self.worker.join() {
            Err(payload) => Err(SearchError::WorkerPanicked(panic_message(payload.as_ref()))),
            Ok(()) => result.map_err(|_| SearchError::NoResult),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(text) = payload.downcast_ref::<&str>() {
        text.to_string()
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else {
        "unknown panic".to_string()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
