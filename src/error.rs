use std::path::PathBuf;

use thiserror::Error;

use crate::search::window::SearchWindow;
use crate::search::zobrist::Location;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("look-ahead must be at least 1, got {0}")]
    InvalidLookAhead(i32),

    #[error("invalid initial search window {0}: alpha must be below beta and within the infinity bounds")]
    InvalidWindow(SearchWindow),

    #[error("max quiescent depth must not be negative, got {0}")]
    InvalidQuiescentDepth(i32),

    #[error("transposition table capacity must be positive")]
    EmptyTable,

    #[error("unknown search strategy: {0}")]
    UnknownStrategy(String),

    #[error("unknown game: {0}")]
    UnknownGame(String),

    #[error("cannot parse location {0:?}, expected row,col")]
    InvalidLocation(String),

    #[error("a run of {run} cannot fit a {rows}x{cols} board")]
    InvalidBoard { rows: usize, cols: usize, run: usize },

    #[error("illegal move at {0}")]
    IllegalMove(Location),

    #[error("failed to read config {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    ConfigJson(#[from] serde_json::Error),
}
