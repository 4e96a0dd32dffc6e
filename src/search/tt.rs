use std::cell::Cell;

use log::trace;

use crate::search::moves::{Move, INFINITY};
use crate::search::window::SearchWindow;
use crate::search::zobrist::HashKey;

/// Cached result of searching one position to `depth`.
///
/// The true value at that depth lies in `[lower_value, upper_value]`.
#[derive(Clone, Debug, PartialEq)]
pub struct Entry<A> {
    pub key: HashKey,
    pub best_move: Option<Move<A>>,
    pub depth: i32,
    pub lower_value: i32,
    pub upper_value: i32,
    pub gen: u32,
}

impl<A> Entry<A> {
    /// Entry with no information about the value yet.
    pub fn new(key: HashKey, best_move: Option<Move<A>>, depth: i32) -> Self {
        Self { key, best_move, depth, lower_value: -INFINITY, upper_value: INFINITY, gen: 0 }
    }

    pub fn exact(key: HashKey, best_move: Option<Move<A>>, depth: i32, value: i32) -> Self {
        Self { lower_value: value, upper_value: value, ..Self::new(key, best_move, depth) }
    }

    pub fn is_exact(&self) -> bool { self.lower_value == self.upper_value }

    /// Classify `value`, found by searching with `window`, as a bound.
    pub fn record(&mut self, value: i32, window: &SearchWindow) {
        if value <= window.alpha {
            self.upper_value = value;
        } else if value >= window.beta {
            self.lower_value = value;
        } else {
            self.lower_value = value;
            self.upper_value = value;
        }
    }

    /// A value that can replace a fresh search in `window`, if the bounds allow.
    pub fn cutoff_value(&self, window: &SearchWindow) -> Option<i32> {
        if self.is_exact() {
            Some(self.lower_value)
        } else if self.upper_value <= window.alpha {
            Some(self.upper_value)
        } else if self.lower_value >= window.beta {
            Some(self.lower_value)
        } else {
            None
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TtStats {
    pub hits: u64,
    pub near_hits: u64,
    pub misses: u64,
    pub stores: u64,
}

const WAYS: usize = 4;
pub const DEFAULT_CAPACITY: usize = 1 << 16;

struct Bucket<A> {
    slots: [Option<Entry<A>>; WAYS],
}

impl<A> Default for Bucket<A> {
    fn default() -> Self { Self { slots: std::array::from_fn(|_| None) } }
}

/// HashKey -> Entry cache owned by one search at a time.
///
/// Buckets of four ways. Storing a key that is already present always
/// overwrites it; a full bucket evicts the shallowest entry, oldest generation
/// first among equals. Not meant for concurrent use: give each worker its own.
pub struct TranspositionTable<A> {
    buckets: Vec<Bucket<A>>,
    gen: u32,
    hits: Cell<u64>,
    near_hits: Cell<u64>,
    misses: Cell<u64>,
    stores: u64,
}

impl<A> Default for TranspositionTable<A> {
    fn default() -> Self { Self::with_capacity(DEFAULT_CAPACITY) }
}

impl<A> TranspositionTable<A> {
    pub fn new() -> Self { Self::default() }

    pub fn with_capacity(entries: usize) -> Self {
        let mut tt = Self { buckets: Vec::new(), gen: 0, hits: Cell::new(0), near_hits: Cell::new(0), misses: Cell::new(0), stores: 0 };
        tt.set_capacity_entries(entries);
        tt
    }

    pub fn set_capacity_entries(&mut self, cap: usize) {
        let entries = cap.max(WAYS);
        let buckets = (entries + WAYS - 1) / WAYS;
        self.buckets.clear();
        self.buckets.resize_with(buckets, Bucket::default);
    }

    pub fn set_capacity_mb(&mut self, mb: usize) {
        let per_entry = std::mem::size_of::<Option<Entry<A>>>().max(1);
        let entries = (mb.saturating_mul(1024 * 1024) / per_entry).max(WAYS);
        self.set_capacity_entries(entries);
    }

    pub fn capacity(&self) -> usize { self.buckets.len() * WAYS }

    fn bucket_index(&self, key: HashKey) -> usize {
        let mixed = key.0 ^ (key.0 >> 32);
        (mixed as usize) % self.buckets.len().max(1)
    }

    pub fn get(&self, key: HashKey) -> Option<&Entry<A>> {
        let bucket = &self.buckets[self.bucket_index(key)];
        bucket.slots.iter().flatten().find(|e| e.key == key)
    }

    /// Whether `entry` may stand in for a search to `depth` within `window`.
    ///
    /// It must be at least as deep as required, and its bounds must either pin
    /// the value or fall entirely outside the window.
    pub fn entry_exists(&self, entry: Option<&Entry<A>>, depth: i32, window: &SearchWindow) -> bool {
        match entry {
            None => {
                self.misses.set(self.misses.get() + 1);
                false
            }
            Some(e) if e.depth >= depth && e.cutoff_value(window).is_some() => {
                self.hits.set(self.hits.get() + 1);
                trace!("tt hit {} depth={} [{}, {}] in {}", e.key, e.depth, e.lower_value, e.upper_value, window);
                true
            }
            Some(_) => {
                self.near_hits.set(self.near_hits.get() + 1);
                false
            }
        }
    }

    pub fn put(&mut self, entry: Entry<A>) {
        let idx = self.bucket_index(entry.key);
        let mut entry = entry;
        entry.gen = self.gen;
        self.stores += 1;
        let bucket = &mut self.buckets[idx];
        // Same key: last write wins
        if let Some(slot) = bucket.slots.iter_mut().find(|s| matches!(s, Some(cur) if cur.key == entry.key)) {
            *slot = Some(entry);
            return;
        }
        if let Some(slot) = bucket.slots.iter_mut().find(|s| s.is_none()) {
            *slot = Some(entry);
            return;
        }
        // Replace lowest depth, then oldest generation
        let mut victim = 0usize;
        let mut best_key = (i32::MAX, u32::MAX);
        for (i, slot) in bucket.slots.iter().enumerate() {
            if let Some(cur) = slot {
                let key = (cur.depth, cur.gen);
                if key < best_key { best_key = key; victim = i; }
            }
        }
        bucket.slots[victim] = Some(entry);
    }

    pub fn len(&self) -> usize {
        self.buckets.iter().map(|b| b.slots.iter().filter(|s| s.is_some()).count()).sum()
    }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    pub fn clear(&mut self) {
        for b in &mut self.buckets { *b = Bucket::default(); }
        self.reset_stats();
    }

    pub fn bump_generation(&mut self) { self.gen = self.gen.wrapping_add(1); }

    pub fn generation(&self) -> u32 { self.gen }

    pub fn stats(&self) -> TtStats {
        TtStats { hits: self.hits.get(), near_hits: self.near_hits.get(), misses: self.misses.get(), stores: self.stores }
    }

    pub fn reset_stats(&mut self) {
        self.hits.set(0);
        self.near_hits.set(0);
        self.misses.set(0);
        self.stores = 0;
    }
}
