use std::path::Path;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Game {
    Checkers,
    Minesweeper,
    Snake,
}

impl Game {
    pub fn default_size(self) -> BoardSize {
        match self {
            Game::Checkers => BoardSize::square(8),
            Game::Minesweeper => BoardSize::square(16),
            Game::Snake => BoardSize::square(20),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSize {
    pub width: usize,
    pub height: usize,
}

impl BoardSize {
    pub const fn square(side: usize) -> Self {
        Self {
            width: side,
            height: side,
        }
    }
}

/// Settings read from a JSON file. Everything is optional.
///
/// ```json
/// { "seed": 42, "minesweeper": { "width": 30, "height": 16 } }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub seed: Option<u64>,
    pub checkers: Option<BoardSize>,
    pub minesweeper: Option<BoardSize>,
    pub snake: Option<BoardSize>,
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// The configured board size for `game`, or its default.
    pub fn board_size(&self, game: Game) -> BoardSize {
        let configured = match game {
            Game::Checkers => self.checkers,
            Game::Minesweeper => self.minesweeper,
            Game::Snake => self.snake,
        };
        configured.unwrap_or_else(|| game.default_size())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_per_game() {
        let config = Config::default();
        assert_eq!(config.board_size(Game::Checkers), BoardSize::square(8));
        assert_eq!(config.board_size(Game::Minesweeper), BoardSize::square(16));
        assert_eq!(config.board_size(Game::Snake), BoardSize::square(20));
    }

    #[test]
    fn partial_file() {
        let config: Config =
            serde_json::from_str(r#"{ "seed": 7, "snake": { "width": 30, "height": 10 } }"#)
                .unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(
            config.board_size(Game::Snake),
            BoardSize {
                width: 30,
                height: 10
            }
        );
        assert_eq!(config.board_size(Game::Checkers), BoardSize::square(8));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(serde_json::from_str::<Config>(r#"{ "chess": {} }"#).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(Config::load(Path::new("/nonexistent/boardgames.json")).is_err());
    }
}
