use std::fmt;
use std::ops::{BitXor, BitXorAssign};
use std::str::FromStr;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::SearchError;

pub const DEFAULT_SEED: u64 = 0xF00D_F00D_DEAD_BEEF;

/// Position fingerprint. Equal boards give equal keys; different boards
/// collide with negligible probability.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HashKey(pub u64);

impl BitXor for HashKey {
    type Output = HashKey;
    fn bitxor(self, rhs: HashKey) -> HashKey { HashKey(self.0 ^ rhs.0) }
}

impl BitXorAssign for HashKey {
    fn bitxor_assign(&mut self, rhs: HashKey) { self.0 ^= rhs.0; }
}

impl fmt::Display for HashKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{:016x}", self.0) }
}

/// Zero-based board coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Location {
    pub row: usize,
    pub col: usize,
}

impl Location {
    pub const fn new(row: usize, col: usize) -> Self { Self { row, col } }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{},{}", self.row, self.col) }
}

impl FromStr for Location {
    type Err = SearchError;

    /// Parses `row,col`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || SearchError::InvalidLocation(s.to_string());
        let (r, c) = s.trim().split_once(',').ok_or_else(bad)?;
        let row = r.trim().parse().map_err(|_| bad())?;
        let col = c.trim().parse().map_err(|_| bad())?;
        Ok(Location::new(row, col))
    }
}

/// What the hash needs to know about a grid board.
pub trait ZobristBoard {
    fn num_rows(&self) -> usize;
    fn num_cols(&self) -> usize;
    /// Distinct states a cell can hold, empty included.
    fn num_states(&self) -> usize;
    /// State of the cell at `loc`; 0 is empty.
    fn state_index(&self, loc: Location) -> usize;
}

/// Incrementally maintained Zobrist key.
///
/// One random number per (row, col, non-empty state). Applying the same
/// (location, state) twice restores the previous key, which is what makes
/// make/undo symmetric.
#[derive(Clone, Debug)]
pub struct ZobristHash {
    table: Vec<u64>,
    rows: usize,
    cols: usize,
    states: usize,
    pass_number: u64,
    key: HashKey,
}

impl ZobristHash {
    pub fn new<B: ZobristBoard + ?Sized>(board: &B, seed: u64) -> Self {
        let rows = board.num_rows();
        let cols = board.num_cols();
        let states = board.num_states().saturating_sub(1);
        let mut rng = SmallRng::seed_from_u64(seed);
        let table: Vec<u64> = (0..rows * cols * states).map(|_| rng.gen()).collect();
        let pass_number = rng.gen();
        let mut hash = Self { table, rows, cols, states, pass_number, key: HashKey::default() };
        hash.key = hash.key_for(board);
        hash
    }

    fn number(&self, loc: Location, state: usize) -> u64 {
        assert!(loc.row < self.rows && loc.col < self.cols, "location {loc} outside {}x{} board", self.rows, self.cols);
        assert!(state <= self.states, "state {state} exceeds {} hashed states", self.states);
        self.table[(loc.row * self.cols + loc.col) * self.states + (state - 1)]
    }

    /// Full recomputation from the occupied cells of `board`.
    pub fn key_for<B: ZobristBoard + ?Sized>(&self, board: &B) -> HashKey {
        let mut key = HashKey::default();
        for row in 0..self.rows {
            for col in 0..self.cols {
                let loc = Location::new(row, col);
                let state = board.state_index(loc);
                if state != 0 { key ^= HashKey(self.number(loc, state)); }
            }
        }
        key
    }

    /// XOR the number for `state` at `loc` into the key. Empty contributes nothing.
    pub fn apply_move(&mut self, loc: Location, state: usize) {
        if state == 0 { return; }
        self.key ^= HashKey(self.number(loc, state));
    }

    /// Toggle the dedicated pass number, for games where a turn can be skipped.
    pub fn apply_passing_move(&mut self) { self.key.0 ^= self.pass_number; }

    pub fn key(&self) -> HashKey { self.key }
}
