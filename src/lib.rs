// Game-tree search engine plus the games used to exercise it
pub mod board;
pub mod error;
pub mod search;

pub use error::SearchError;
pub use search::{Move, SearchOptions, SearchResult, Searchable, Searcher, StrategyKind};
