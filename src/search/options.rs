use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SearchError;
use crate::search::searchable::Weights;
use crate::search::tt::DEFAULT_CAPACITY;
use crate::search::window::SearchWindow;

/// Which member of the minimax family runs the search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StrategyKind {
    #[serde(rename = "minimax")]
    MiniMax,
    #[serde(rename = "negamax")]
    NegaMax,
    #[serde(rename = "negamax_memory")]
    NegaMaxMemory,
    #[default]
    #[serde(rename = "negascout")]
    NegaScout,
    #[serde(rename = "negascout_memory")]
    NegaScoutMemory,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 5] = [
        StrategyKind::MiniMax,
        StrategyKind::NegaMax,
        StrategyKind::NegaMaxMemory,
        StrategyKind::NegaScout,
        StrategyKind::NegaScoutMemory,
    ];

    pub fn name(self) -> &'static str {
        match self {
            StrategyKind::MiniMax => "minimax",
            StrategyKind::NegaMax => "negamax",
            StrategyKind::NegaMaxMemory => "negamax_memory",
            StrategyKind::NegaScout => "negascout",
            StrategyKind::NegaScoutMemory => "negascout_memory",
        }
    }

    pub fn uses_memory(self) -> bool {
        matches!(self, StrategyKind::NegaMaxMemory | StrategyKind::NegaScoutMemory)
    }

    pub fn uses_scout(self) -> bool {
        matches!(self, StrategyKind::NegaScout | StrategyKind::NegaScoutMemory)
    }

    pub fn is_minimax(self) -> bool { self == StrategyKind::MiniMax }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.name()) }
}

impl FromStr for StrategyKind {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim().to_ascii_lowercase().replace('-', "_");
        StrategyKind::ALL
            .into_iter()
            .find(|k| k.name() == norm)
            .ok_or_else(|| SearchError::UnknownStrategy(s.to_string()))
    }
}

/// Search configuration. Every field has a default, so a config file only
/// needs the ones it changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    pub strategy: StrategyKind,
    /// Plies to look ahead.
    pub look_ahead: i32,
    pub alpha_beta: bool,
    pub quiescence: bool,
    /// Extra plies quiescence may add past the horizon.
    pub max_quiescent_depth: i32,
    pub initial_window: SearchWindow,
    /// Transposition table entries (memory strategies only).
    pub tt_capacity: usize,
    pub weights: Weights,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::default(),
            look_ahead: 4,
            alpha_beta: true,
            quiescence: false,
            max_quiescent_depth: 12,
            initial_window: SearchWindow::full(),
            tt_capacity: DEFAULT_CAPACITY,
            weights: Weights::default(),
        }
    }
}

impl SearchOptions {
    pub fn new(strategy: StrategyKind, look_ahead: i32) -> Self {
        Self { strategy, look_ahead, ..Self::default() }
    }

    pub fn validate(&self) -> Result<(), SearchError> {
        if self.look_ahead < 1 { return Err(SearchError::InvalidLookAhead(self.look_ahead)); }
        if !self.initial_window.is_valid() { return Err(SearchError::InvalidWindow(self.initial_window)); }
        if self.max_quiescent_depth < 0 { return Err(SearchError::InvalidQuiescentDepth(self.max_quiescent_depth)); }
        if self.tt_capacity == 0 { return Err(SearchError::EmptyTable); }
        Ok(())
    }

    pub fn from_json_str(json: &str) -> Result<Self, SearchError> {
        let opts: SearchOptions = serde_json::from_str(json)?;
        opts.validate()?;
        Ok(opts)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SearchError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|source| SearchError::ConfigIo { path: path.to_path_buf(), source })?;
        Self::from_json_str(&text)
    }
}
