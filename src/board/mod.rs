use std::fmt;
use std::str::FromStr;

use crate::error::SearchError;

pub mod connect;
pub mod grid;

pub use connect::{ConnectGame, GameResult};
pub use grid::{Cell, GridBoard};

/// Games bundled with the crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameKind {
    TicTacToe,
    Gomoku,
}

impl GameKind {
    /// Fresh game; `size` only applies to gomoku and must hold a run of five.
    pub fn build(self, size: usize) -> Result<ConnectGame, SearchError> {
        match self {
            GameKind::TicTacToe => Ok(ConnectGame::tictactoe()),
            GameKind::Gomoku => ConnectGame::try_new(size, size, 5),
        }
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GameKind::TicTacToe => "tictactoe",
            GameKind::Gomoku => "gomoku",
        })
    }
}

impl FromStr for GameKind {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "").as_str() {
            "tictactoe" | "ttt" => Ok(GameKind::TicTacToe),
            "gomoku" => Ok(GameKind::Gomoku),
            _ => Err(SearchError::UnknownGame(s.to_string())),
        }
    }
}
