// Engine configuration
// Settings come from CHESS_* environment variables or any name-to-value lookup

use std::env;

use tracing::info;

use crate::board::{Color, Position};
use crate::error::ConfigError;
use crate::fen;

pub const DEFAULT_SEARCH_DEPTH: u32 = 2;
pub const MAX_SEARCH_DEPTH: u32 = 6;

#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Plies searched by the engine, 1..=6
    pub search_depth: u32,

    /// Position new games start from
    pub start_position: Position,

    /// Side the engine answers for automatically, if any
    pub engine_color: Option<Color>,

    /// Seed for reproducible move choices
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            search_depth: DEFAULT_SEARCH_DEPTH,
            start_position: Position::starting(),
            engine_color: None,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its value
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let search_depth = match lookup("CHESS_SEARCH_DEPTH") {
            Some(v) => v
                .trim()
                .parse::<u32>()
                .map_err(|_| invalid("CHESS_SEARCH_DEPTH", &v))?
                .clamp(1, MAX_SEARCH_DEPTH),
            None => DEFAULT_SEARCH_DEPTH,
        };

        let start_position = match lookup("CHESS_START_FEN") {
            Some(v) => fen::parse(&v)?,
            None => Position::starting(),
        };

        let engine_color = match lookup("CHESS_ENGINE_COLOR") {
            Some(v) => match v.trim().to_ascii_lowercase().as_str() {
                "white" | "w" => Some(Color::White),
                "black" | "b" => Some(Color::Black),
                "" | "none" => None,
                _ => return Err(invalid("CHESS_ENGINE_COLOR", &v)),
            },
            None => None,
        };

        let seed = match lookup("CHESS_SEED") {
            Some(v) => Some(v.trim().parse::<u64>().map_err(|_| invalid("CHESS_SEED", &v))?),
            None => None,
        };

        info!(search_depth, ?engine_color, seeded = seed.is_some(), "loaded engine config");

        Ok(Self {
            search_depth,
            start_position,
            engine_color,
            seed,
        })
    }
}

fn invalid(name: &'static str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        name,
        value: value.to_string(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
