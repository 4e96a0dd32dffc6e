pub mod moves;
pub mod options;
pub mod parallel;
pub mod searchable;
pub mod strategy;
pub mod tree;
pub mod tt;
pub mod window;
pub mod zobrist;

mod minimax;

pub use moves::{perspective_value, player1_to_move, Move, MoveList, INFINITY, WINNING_VALUE};
pub use options::{SearchOptions, StrategyKind};
pub use parallel::search_root_parallel;
pub use searchable::{Searchable, Weights};
pub use strategy::{SearchResult, Searcher};
pub use tree::{NodeId, NoopObserver, TreeNode, TreeObserver, TreeRecorder};
pub use tt::{Entry, TranspositionTable, TtStats};
pub use window::SearchWindow;
pub use zobrist::{HashKey, Location, ZobristBoard, ZobristHash};
