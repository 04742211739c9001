//! Go Text Protocol (GTP) implementation.
//!
//! GTP is a text-based protocol for communicating with Go-playing programs.
//! This module implements the subset of GTP version 2 the engine can honor,
//! allowing it to be driven by graphical Go interfaces or match runners.
//!
//! ## Supported Commands
//!
//! - `name` - Return engine name
//! - `version` - Return engine version
//! - `protocol_version` - Return GTP protocol version (2)
//! - `list_commands` - List all supported commands
//! - `known_command <cmd>` - Check if a command is supported
//! - `quit` - Exit the program
//! - `boardsize <size>` - Set board size and clear the board
//! - `clear_board` - Reset the board to empty
//! - `play <color> <vertex>` - Play a move for the side to move
//! - `genmove <color>` - Search for, play and return a move for the side to move
//! - `showboard` - Print the board
//! - `final_score` - Score the position (territory plus captures)
//!
//! ## Example
//!
//! ```ignore
//! use gomcts::gtp::GtpEngine;
//! let mut engine = GtpEngine::new();
//! engine.run()?;
//! ```

use std::io::{self, BufRead, Write};

use crate::board::Color;
use crate::constants::{DEFAULT_BOARD_SIZE, MAX_BOARD_SIZE};
use crate::game::{GameState, Winner, parse_move, str_move};
use crate::mcts::{SearchConfig, Searcher};

/// The list of known GTP commands.
const KNOWN_COMMANDS: &[&str] = &[
    "boardsize",
    "clear_board",
    "final_score",
    "genmove",
    "known_command",
    "list_commands",
    "name",
    "play",
    "protocol_version",
    "quit",
    "showboard",
    "version",
];

/// GTP engine state.
pub struct GtpEngine {
    /// Current game
    game: GameState,
    /// Move search (random source persists across genmoves)
    searcher: Searcher,
}

impl Default for GtpEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl GtpEngine {
    /// Create a new GTP engine with default settings.
    pub fn new() -> Self {
        Self::with_config(DEFAULT_BOARD_SIZE, SearchConfig::default())
    }

    /// Create a new GTP engine with a board size and search configuration.
    pub fn with_config(size: usize, config: SearchConfig) -> Self {
        Self {
            game: GameState::new(size),
            searcher: Searcher::new(config),
        }
    }

    /// Run the GTP command loop on stdin/stdout.
    pub fn run(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.run_with(stdin.lock(), stdout.lock())
    }

    /// Run the GTP command loop over arbitrary streams until EOF or `quit`.
    pub fn run_with<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);

            let parts: Vec<&str> = command_line.split_whitespace().collect();
            if parts.is_empty() {
                continue;
            }

            let command = parts[0].to_lowercase();
            let args = &parts[1..];

            let (success, message) = self.execute(&command, args);
            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();

            write!(output, "{prefix}{id_str} {message}\n\n")?;
            output.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command ID from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        if end > 0
            && let Ok(id) = trimmed[..end].parse::<u32>()
        {
            return (Some(id), trimmed[end..].trim());
        }
        (None, trimmed)
    }

    /// Parse a GTP color argument.
    fn parse_color(s: &str) -> Option<Color> {
        match s.to_lowercase().as_str() {
            "b" | "black" => Some(Color::Black),
            "w" | "white" => Some(Color::White),
            _ => None,
        }
    }

    /// Check that `arg` names the side to move.
    fn check_turn(&self, arg: &str) -> Result<(), String> {
        let color = Self::parse_color(arg).ok_or_else(|| format!("invalid color '{arg}'"))?;
        if color != self.game.current_player() {
            return Err(format!("{} is to move", self.game.current_player()));
        }
        Ok(())
    }

    /// Execute a GTP command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, env!("CARGO_PKG_NAME").to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => (true, "2".to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                if args.is_empty() {
                    return (false, "missing argument".to_string());
                }
                let known = KNOWN_COMMANDS.contains(&args[0].to_lowercase().as_str());
                (true, if known { "true" } else { "false" }.to_string())
            }

            "quit" => (true, String::new()),

            "boardsize" => {
                if args.is_empty() {
                    return (false, "missing argument".to_string());
                }
                match args[0].parse::<usize>() {
                    Ok(size) if (1..=MAX_BOARD_SIZE).contains(&size) => {
                        self.game = GameState::new(size);
                        (true, String::new())
                    }
                    Ok(size) => (
                        false,
                        format!("unacceptable size {size}, must be 1 to {MAX_BOARD_SIZE}"),
                    ),
                    Err(_) => (false, "invalid size".to_string()),
                }
            }

            "clear_board" => {
                self.game = GameState::new(self.game.size());
                (true, String::new())
            }

            "play" => {
                if args.len() < 2 {
                    return (false, "missing arguments".to_string());
                }
                if let Err(e) = self.check_turn(args[0]) {
                    return (false, e);
                }
                let mv = match parse_move(args[1], self.game.size()) {
                    Ok(mv) => mv,
                    Err(e) => return (false, e.to_string()),
                };
                match self.game.make_move(mv) {
                    Ok(_) => (true, String::new()),
                    Err(e) => (false, format!("illegal move: {e}")),
                }
            }

            "genmove" => {
                if args.is_empty() {
                    return (false, "missing argument".to_string());
                }
                if let Err(e) = self.check_turn(args[0]) {
                    return (false, e);
                }
                if self.game.is_over() {
                    return (false, "game is over".to_string());
                }

                let mv = self.searcher.search(&self.game);
                match self.game.make_move(mv) {
                    Ok(_) => (true, str_move(mv, self.game.size())),
                    Err(e) => (false, format!("engine chose illegal move: {e}")),
                }
            }

            "showboard" => (
                true,
                format!(
                    "\n{}{} to move",
                    self.game.board(),
                    self.game.current_player()
                ),
            ),

            "final_score" => {
                let score = self.game.score();
                let result = match score.winner {
                    Winner::Black => format!("B+{}", score.black - score.white),
                    Winner::White => format!("W+{}", score.white - score.black),
                    Winner::Tie => "0".to_string(),
                };
                (true, result)
            }

            _ => (false, format!("unknown command: {command}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Move;

    fn engine() -> GtpEngine {
        GtpEngine::with_config(
            DEFAULT_BOARD_SIZE,
            SearchConfig {
                iterations: 10,
                seed: Some(17),
                verbose: false,
            },
        )
    }

    #[test]
    fn test_parse_id_with_id() {
        let (id, cmd) = GtpEngine::parse_id("123 name");
        assert_eq!(id, Some(123));
        assert_eq!(cmd, "name");
    }

    #[test]
    fn test_parse_id_without_id() {
        let (id, cmd) = GtpEngine::parse_id("name");
        assert_eq!(id, None);
        assert_eq!(cmd, "name");
    }

    #[test]
    fn test_parse_id_keeps_unparsable_prefix() {
        let (id, cmd) = GtpEngine::parse_id("  7   genmove b");
        assert_eq!(id, Some(7));
        assert_eq!(cmd, "genmove b");

        // Too large for a u32: treated as part of the command.
        let (id, cmd) = GtpEngine::parse_id("99999999999 name");
        assert_eq!(id, None);
        assert_eq!(cmd, "99999999999 name");
    }

    #[test]
    fn test_name_command() {
        let mut engine = engine();
        let (success, response) = engine.execute("name", &[]);
        assert!(success);
        assert_eq!(response, "gomcts");
    }

    #[test]
    fn test_known_command() {
        let mut engine = engine();

        let (success, response) = engine.execute("known_command", &["genmove"]);
        assert!(success);
        assert_eq!(response, "true");

        let (success, response) = engine.execute("known_command", &["komi"]);
        assert!(success);
        assert_eq!(response, "false");
    }

    #[test]
    fn test_boardsize() {
        let mut engine = engine();

        let (success, _) = engine.execute("boardsize", &["9"]);
        assert!(success);
        assert_eq!(engine.game.size(), 9);

        let (success, _) = engine.execute("boardsize", &["26"]);
        assert!(!success);
        assert_eq!(engine.game.size(), 9);
    }

    #[test]
    fn test_play_and_clear() {
        let mut engine = engine();

        let (success, _) = engine.execute("play", &["black", "C3"]);
        assert!(success);
        assert_eq!(engine.game.moves().len(), 1);

        let (success, _) = engine.execute("clear_board", &[]);
        assert!(success);
        assert!(engine.game.moves().is_empty());
    }

    #[test]
    fn test_play_rejections() {
        let mut engine = engine();

        let (success, response) = engine.execute("play", &["white", "C3"]);
        assert!(!success, "white is not to move");
        assert_eq!(response, "Black is to move");

        let (success, _) = engine.execute("play", &["black", "Z9"]);
        assert!(!success);

        engine.execute("play", &["b", "C3"]);
        let (success, response) = engine.execute("play", &["w", "C3"]);
        assert!(!success);
        assert!(response.contains("occupied"), "got '{response}'");
    }

    #[test]
    fn test_genmove_plays_legal_move() {
        let mut engine = engine();
        let (success, response) = engine.execute("genmove", &["b"]);
        assert!(success, "genmove failed: {response}");
        assert_eq!(engine.game.current_player(), Color::White);
        let mv = parse_move(&response, engine.game.size()).unwrap();
        if let Move::Place(pt) = mv {
            assert_eq!(engine.game.board().get(pt), Some(Color::Black));
        }
    }

    #[test]
    fn test_final_score_after_passes() {
        let mut engine = engine();
        engine.execute("play", &["b", "A1"]);
        for color in ["w", "b", "w", "b"] {
            let (success, _) = engine.execute("play", &[color, "pass"]);
            assert!(success);
        }
        assert!(engine.game.is_over());
        let (_, response) = engine.execute("final_score", &[]);
        assert_eq!(response, "B+35");
    }

    #[test]
    fn test_run_with_streams() {
        let mut engine = engine();
        let input = b"1 protocol_version\nplay black A1\n# comment\n2 quit\nname\n";
        let mut output = Vec::new();
        engine.run_with(&input[..], &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();
        assert_eq!(text, "=1 2\n\n= \n\n=2 \n\n");
    }
}
