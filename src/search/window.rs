use std::fmt;

use serde::{Deserialize, Serialize};

use crate::search::moves::INFINITY;

/// Alpha-beta bounds carried down the recursion.
///
/// `alpha` is what the side to move can already guarantee, `beta` what the
/// opponent can hold it to. Negamax frames are relative to the side to move, so
/// every ply down the window is negated and its ends swapped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchWindow {
    pub alpha: i32,
    pub beta: i32,
}

impl SearchWindow {
    pub fn new(alpha: i32, beta: i32) -> Self {
        debug_assert!(alpha <= beta, "inverted search window [{alpha}, {beta}]");
        Self { alpha, beta }
    }

    pub fn full() -> Self { Self::new(-INFINITY, INFINITY) }

    /// The same window seen from the opponent: `(-beta, -alpha)`.
    pub fn negate_and_swap(&self) -> Self { Self::new(-self.beta, -self.alpha) }

    /// Seed for a zero-width probe.
    pub fn mid_point(&self) -> i32 { self.alpha + (self.beta - self.alpha) / 2 }

    /// True for zero- or unit-width (scout) windows.
    pub fn is_null(&self) -> bool { self.beta - self.alpha <= 1 }

    /// Strictly inside the window, so a value here is exact.
    pub fn contains(&self, value: i32) -> bool { self.alpha < value && value < self.beta }

    pub fn is_valid(&self) -> bool {
        self.alpha < self.beta && self.alpha >= -INFINITY && self.beta <= INFINITY
    }
}

impl Default for SearchWindow {
    fn default() -> Self { Self::full() }
}

impl fmt::Display for SearchWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.alpha, self.beta)
    }
}
