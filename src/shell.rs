// Line-oriented command shell around a Game
// Reads commands from any BufRead and answers on any Write; diagnostics go through tracing

use std::io::{self, BufRead, Write};

use tracing::{debug, warn};

use crate::board::{Move, PieceKind};
use crate::config::{EngineConfig, MAX_SEARCH_DEPTH};
use crate::error::CommandError;
use crate::fen;
use crate::game::Game;
use crate::movegen::{all_legal_moves, perft};
use crate::search::Searcher;
use crate::square::Square;

const MAX_PERFT_DEPTH: u32 = 5;

/// What the caller should do after a command
#[derive(Debug, PartialEq, Eq)]
pub enum Reply {
    Output(String),
    Quit,
}

pub struct Shell {
    game: Game,
    config: EngineConfig,
    /// FEN new games and `moves` replays start from
    start_fen: String,
}

impl Shell {
    pub fn new(config: EngineConfig) -> Self {
        let start_fen = fen::serialize(&config.start_position);
        Shell {
            game: Game::from_position(config.start_position),
            config,
            start_fen,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Main loop - reads commands until `quit` or end of input
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match self.execute(line) {
                Ok(Reply::Quit) => break,
                Ok(Reply::Output(text)) => writeln!(output, "{}", text)?,
                Err(err) => {
                    warn!(command = line, error = %err, "command rejected");
                    writeln!(output, "error: {}", err)?;
                }
            }
            output.flush()?;
        }
        Ok(())
    }

    /// Execute one command line
    pub fn execute(&mut self, line: &str) -> Result<Reply, CommandError> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some((&command, args)) = parts.split_first() else {
            return Ok(Reply::Output(String::new()));
        };

        let text = match command {
            "new" => {
                self.game = Game::from_fen(&self.start_fen)?;
                self.report()
            }

            "fen" => {
                if args.is_empty() {
                    self.game.fen()
                } else {
                    let text = args.join(" ");
                    self.game = Game::from_fen(&text)?;
                    self.start_fen = text;
                    self.report()
                }
            }

            "moves" => {
                self.game = Game::replay(&self.start_fen, args)?;
                self.report()
            }

            "play" => {
                let text = args.first().ok_or(CommandError::Usage("play <move>"))?;
                let mv: Move = text.parse()?;
                self.game.play_move(mv)?;
                self.after_human_move()?
            }

            "promote" => {
                let letter = args
                    .first()
                    .and_then(|a| a.chars().next())
                    .ok_or(CommandError::Usage("promote <q|r|b|n>"))?;
                let kind = PieceKind::from_letter(letter)
                    .ok_or(CommandError::Usage("promote <q|r|b|n>"))?;
                self.game.promote(kind)?;
                self.after_human_move()?
            }

            "hints" => {
                let text = args.first().ok_or(CommandError::Usage("hints <square>"))?;
                let square: Square = text.parse()?;
                let mut destinations = self.game.legal_destinations(square);
                destinations.sort();
                join_words("hints", destinations.iter())
            }

            "legal" => {
                let position = self.game.position();
                let frozen =
                    self.game.state().is_terminal() || self.game.pending_promotion().is_some();
                let moves = if frozen {
                    Vec::new()
                } else {
                    all_legal_moves(position.side_to_move(), position)
                };
                join_words("legal", moves.iter())
            }

            "status" => format!("state {}", self.game.state()),

            "go" => {
                let depth = parse_go_depth(args, self.config.search_depth)?;
                self.engine_move(depth)?
            }

            "undo" => {
                self.game.undo()?;
                self.report()
            }

            "log" => join_words("log", self.game.move_log().iter()),

            "d" | "display" => self.game.position().to_string(),

            "perft" => {
                let depth = args
                    .first()
                    .and_then(|a| a.parse::<u32>().ok())
                    .filter(|d| *d <= MAX_PERFT_DEPTH)
                    .ok_or(CommandError::Usage("perft <0-5>"))?;
                format!("perft {} {}", depth, perft(self.game.position(), depth))
            }

            "quit" => return Ok(Reply::Quit),

            other => return Err(CommandError::Unknown(other.to_string())),
        };

        Ok(Reply::Output(text))
    }

    /// FEN and state lines for the current position
    fn report(&self) -> String {
        format!("fen {}\nstate {}", self.game.fen(), self.game.state())
    }

    /// Let the configured engine answer if it is now its turn
    fn after_human_move(&mut self) -> Result<String, CommandError> {
        let mut text = self.report();
        let engine_turn = self.config.engine_color == Some(self.game.position().side_to_move());
        let state = self.game.state();
        if engine_turn && !state.is_terminal() && self.game.pending_promotion().is_none() {
            text.push('\n');
            text.push_str(&self.engine_move(self.config.search_depth)?);
        }
        Ok(text)
    }

    /// Search on a worker thread, then apply the answer through the normal path
    fn engine_move(&mut self, depth: u32) -> Result<String, CommandError> {
        let searcher = match self.config.seed {
            Some(seed) => {
                let offset = self.game.moves().len() as u64;
                Searcher::with_seed(depth, seed.wrapping_add(offset))
            }
            None => Searcher::new(depth),
        };
        let depth = searcher.depth();
        let color = self.game.position().side_to_move();
        let handle = searcher.spawn(*self.game.position(), color);

        match handle.recv()? {
            Some(mv) => {
                debug!(%mv, depth, "engine move");
                self.game.play_move(mv)?;
                Ok(format!("bestmove {}\n{}", mv, self.report()))
            }
            None => Ok("bestmove none".to_string()),
        }
    }
}

/// Parse the "go" arguments and return the search depth
fn parse_go_depth(args: &[&str], default_depth: u32) -> Result<u32, CommandError> {
    match args {
        [] => Ok(default_depth),
        ["depth", n] => n
            .parse::<u32>()
            .map(|d| d.clamp(1, MAX_SEARCH_DEPTH))
            .map_err(|_| CommandError::Usage("go [depth N]")),
        _ => Err(CommandError::Usage("go [depth N]")),
    }
}

fn join_words<T: ToString>(label: &str, items: impl Iterator<Item = T>) -> String {
    let mut text = label.to_string();
    for item in items {
        text.push(' ');
        text.push_str(&item.to_string());
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Color;
    use crate::state::GameState;

    fn shell() -> Shell {
        Shell::new(EngineConfig {
            seed: Some(1),
            ..EngineConfig::default()
        })
    }

    fn output(shell: &mut Shell, line: &str) -> String {
        match shell.execute(line) {
            Ok(Reply::Output(text)) => text,
            other => panic!("unexpected reply to '{}': {:?}", line, other),
        }
    }

    #[test]
    fn test_play_reports_fen_and_state() {
        let mut sh = shell();
        let text = output(&mut sh, "play e2e4");
        assert_eq!(
            text,
            "fen rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1\nstate ongoing"
        );
    }

    #[test]
    fn test_hints_and_log() {
        let mut sh = shell();
        assert_eq!(output(&mut sh, "hints b1"), "hints a3 c3");
        output(&mut sh, "play g1f3");
        output(&mut sh, "play g8f6");
        assert_eq!(output(&mut sh, "log"), "log g1f3 g8f6");
    }

    #[test]
    fn test_errors() {
        let mut sh = shell();
        assert_eq!(sh.execute("fly"), Err(CommandError::Unknown("fly".into())));
        assert_eq!(sh.execute("hints"), Err(CommandError::Usage("hints <square>")));
        assert!(sh.execute("play e2e5").is_err());
        assert!(sh.execute("undo").is_err());
        assert!(sh.execute("fen 8/8/8 w - - 0 1").is_err());
    }

    #[test]
    fn test_moves_replays_from_start() {
        let mut sh = shell();
        let text = output(&mut sh, "moves f2f3 e7e5 g2g4 d8h4");
        assert!(text.ends_with("state checkmate, black wins"), "got {}", text);
        assert!(sh.execute("play e1f2").is_err(), "Game is frozen after mate");
    }

    #[test]
    fn test_go_applies_engine_move() {
        let mut sh = shell();
        output(&mut sh, "fen 6k1/5ppp/8/8/8/8/8/3R2K1 w - - 0 1");
        let text = output(&mut sh, "go depth 2");
        assert!(text.starts_with("bestmove d1d8"), "got {}", text);
        assert_eq!(sh.game().state(), GameState::Checkmate { winner: Color::White });
    }

    #[test]
    fn test_go_without_moves_reports_none() {
        let mut sh = shell();
        output(&mut sh, "fen 7k/8/6QK/8/8/8/8/8 b - - 0 1");
        assert_eq!(sh.game().state(), GameState::Stalemate);
        assert_eq!(output(&mut sh, "go"), "bestmove none");
    }

    #[test]
    fn test_engine_answers_automatically() {
        let mut sh = Shell::new(EngineConfig {
            engine_color: Some(Color::Black),
            search_depth: 1,
            seed: Some(3),
            ..EngineConfig::default()
        });
        let text = output(&mut sh, "play e2e4");
        assert!(text.contains("bestmove"), "got {}", text);
        assert_eq!(sh.game().position().side_to_move(), Color::White);
    }

    #[test]
    fn test_perft_command() {
        let mut sh = shell();
        assert_eq!(output(&mut sh, "perft 2"), "perft 2 400");
        assert!(sh.execute("perft 9").is_err());
    }

    #[test]
    fn test_run_loop() {
        let mut sh = shell();
        let input = "play e2e4\nbogus\nstatus\nquit\nplay e7e5\n";
        let mut out = Vec::new();
        sh.run(input.as_bytes(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("error: unknown command 'bogus'"));
        assert!(text.contains("state ongoing"));
        assert_eq!(sh.game().move_log(), vec!["e2e4"], "Nothing runs after quit");
    }
}
