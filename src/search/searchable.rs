use std::fmt;

use serde::{Deserialize, Serialize};

use crate::search::moves::{Move, MoveList};
use crate::search::zobrist::HashKey;

/// Coefficients of a game's evaluation function, passed through untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Weights(pub Vec<f64>);

impl Weights {
    pub fn new(values: Vec<f64>) -> Self { Self(values) }

    /// Missing coefficients read as zero.
    pub fn get(&self, i: usize) -> f64 { self.0.get(i).copied().unwrap_or(0.0) }

    pub fn len(&self) -> usize { self.0.len() }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }
}

/// What a game must provide for the search engine to play it.
///
/// `last_move` is `None` until the first move of the game has been made.
/// `make_internal_move` and `undo_internal_move` must be exact inverses and
/// keep `hash_key` in step with the board.
pub trait Searchable {
    type Action: Clone + fmt::Debug + PartialEq;

    /// Legal, reasonable replies to `last_move`, best-looking first, each with
    /// its static value filled in.
    fn generate_moves(&mut self, last_move: Option<&Move<Self::Action>>, weights: &Weights) -> MoveList<Self::Action>;

    /// The subset worth exploring past the horizon. Empty when the game has no
    /// notion of urgency.
    fn generate_urgent_moves(&mut self, _last_move: Option<&Move<Self::Action>>, _weights: &Weights) -> MoveList<Self::Action> {
        Vec::new()
    }

    /// True when the position is too volatile to evaluate statically.
    fn in_jeopardy(&self, _last_move: Option<&Move<Self::Action>>, _weights: &Weights) -> bool { false }

    /// Terminal test. With `record_result == false` nothing observable may change.
    fn done(&mut self, last_move: Option<&Move<Self::Action>>, record_result: bool) -> bool;

    /// Static evaluation from player 1's perspective, within
    /// `[-WINNING_VALUE, WINNING_VALUE]`.
    fn worth(&self, last_move: Option<&Move<Self::Action>>, weights: &Weights) -> i32;

    fn hash_key(&self) -> HashKey;

    fn make_internal_move(&mut self, m: &Move<Self::Action>);

    fn undo_internal_move(&mut self, m: &Move<Self::Action>);
}
