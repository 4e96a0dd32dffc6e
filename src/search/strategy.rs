use std::collections::VecDeque;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Arc;

use log::debug;

use crate::search::moves::{check_bounded, perspective_value, player1_to_move, Move, MoveList, INFINITY};
use crate::search::options::{SearchOptions, StrategyKind};
use crate::search::searchable::Searchable;
use crate::search::tree::{NodeId, NoopObserver, PendingTree, TreeObserver};
use crate::search::tt::{Entry, TranspositionTable};
use crate::search::window::SearchWindow;

#[derive(Clone, Debug)]
pub struct SearchResult<A> {
    /// `None` when the position had no continuation.
    pub best_move: Option<Move<A>>,
    /// Worth of the position to the player about to move.
    pub value: i32,
    /// Value handed back to the last move: negated for the negamax family,
    /// player 1's frame for minimax.
    pub last_move_value: i32,
    pub moves_considered: u64,
    /// The search was cancelled; `best_move` is only provisional.
    pub interrupted: bool,
}

/// Outcome of one recursive call.
pub(super) struct Node<A> {
    pub(super) value: i32,
    pub(super) best: Option<Move<A>>,
}

impl<A> Node<A> {
    pub(super) fn leaf(value: i32) -> Self { Self { value, best: None } }
}

/// Runs one member of the minimax family over any `Searchable`.
///
/// Negamax, negascout and their memory variants share one recursive skeleton
/// switched by {pruning, memory, scout}; minimax keeps its own max/min child
/// loop in `minimax.rs`. The transposition table lives as long as the searcher,
/// so consecutive searches from one searcher reuse it.
pub struct Searcher<A> {
    pub(super) options: SearchOptions,
    pub(super) tt: TranspositionTable<A>,
    pub(super) abort: Option<Arc<AtomicBool>>,
    pub(super) percent_done: Arc<AtomicU8>,
    pub(super) moves_considered: u64,
    pub(super) interrupted: bool,
}

impl<A: Clone + fmt::Debug + PartialEq> Searcher<A> {
    pub fn new(options: SearchOptions) -> Self {
        debug!(
            "strategy={} look_ahead={} alpha_beta={} quiescence={} window={}",
            options.strategy, options.look_ahead, options.alpha_beta, options.quiescence, options.initial_window
        );
        let tt = TranspositionTable::with_capacity(options.tt_capacity);
        Self {
            options,
            tt,
            abort: None,
            percent_done: Arc::new(AtomicU8::new(0)),
            moves_considered: 0,
            interrupted: false,
        }
    }

    /// Poll `flag` at every node; once set, the search unwinds with its best so far.
    pub fn with_abort(mut self, flag: Arc<AtomicBool>) -> Self {
        self.abort = Some(flag);
        self
    }

    pub fn set_abort(&mut self, flag: Option<Arc<AtomicBool>>) { self.abort = flag; }

    pub fn options(&self) -> &SearchOptions { &self.options }

    pub fn transposition_table(&self) -> &TranspositionTable<A> { &self.tt }

    pub fn transposition_table_mut(&mut self) -> &mut TranspositionTable<A> { &mut self.tt }

    pub fn percent_done(&self) -> u8 { self.percent_done.load(Ordering::Relaxed) }

    /// Shared progress counter (0..=100) readable from another thread.
    pub fn progress_handle(&self) -> Arc<AtomicU8> { self.percent_done.clone() }

    pub fn moves_considered(&self) -> u64 { self.moves_considered }

    pub fn search<S: Searchable<Action = A>>(&mut self, s: &mut S, last_move: Option<&Move<A>>) -> SearchResult<A> {
        self.search_observed(s, last_move, &mut NoopObserver)
    }

    pub fn search_observed<S: Searchable<Action = A>>(
        &mut self,
        s: &mut S,
        last_move: Option<&Move<A>>,
        obs: &mut dyn TreeObserver<A>,
    ) -> SearchResult<A> {
        self.moves_considered = 0;
        self.interrupted = false;
        self.percent_done.store(0, Ordering::Relaxed);
        self.tt.bump_generation();

        let depth = self.options.look_ahead;
        let window = if self.options.alpha_beta { self.options.initial_window } else { SearchWindow::full() };
        let root = match self.options.strategy {
            StrategyKind::MiniMax => self.minimax_internal(s, last_move, depth, 0, window, obs, None),
            StrategyKind::NegaMaxMemory if self.options.alpha_beta => self.probe_search(s, last_move, depth, obs),
            _ => self.search_internal(s, last_move, depth, 0, window, obs, None),
        };

        let minimax = self.options.strategy.is_minimax();
        let (value, last_move_value) = if minimax {
            (perspective_value(root.value, player1_to_move(last_move)), root.value)
        } else {
            (root.value, -root.value)
        };
        if !self.interrupted { self.percent_done.store(100, Ordering::Relaxed); }
        let stats = self.tt.stats();
        debug!(
            "{} value={} moves={} interrupted={} tt hits={} near={} misses={}",
            self.options.strategy, value, self.moves_considered, self.interrupted, stats.hits, stats.near_hits, stats.misses
        );
        SearchResult {
            best_move: root.best.map(|mut m| { m.selected = true; m }),
            value,
            last_move_value,
            moves_considered: self.moves_considered,
            interrupted: self.interrupted,
        }
    }

    /// Zero-width probes starting at the initial window's midpoint, narrowing
    /// until the lower and upper bounds meet. A final `(g - 1, g)` probe makes
    /// the returned move the first one in generator order that reaches `g`.
    ///
    /// Only the last pass that expanded anything reaches `obs`.
    fn probe_search<S: Searchable<Action = A>>(
        &mut self,
        s: &mut S,
        last_move: Option<&Move<A>>,
        depth: i32,
        obs: &mut dyn TreeObserver<A>,
    ) -> Node<A> {
        let mut g = self.options.initial_window.mid_point();
        let (mut lower, mut upper) = (-INFINITY, INFINITY);
        let mut kept: PendingTree<A> = PendingTree::new();
        let record = obs.records();
        let confirmed;
        let mut node;
        loop {
            let beta = if g == lower { g + 1 } else { g };
            node = self.probe_pass(s, last_move, depth, SearchWindow::new(beta - 1, beta), record, &mut kept);
            g = node.value;
            let failed_high = g >= beta;
            if failed_high { lower = g; } else { upper = g; }
            if lower >= upper || self.interrupted {
                confirmed = failed_high && beta == g;
                break;
            }
        }
        if !confirmed && !self.interrupted {
            node = self.probe_pass(s, last_move, depth, SearchWindow::new(g - 1, g), record, &mut kept);
        }
        kept.replay(obs, None);
        node
    }

    /// One MTD(f) pass from the root. When `record` is set its tree replaces
    /// `kept`, unless the pass was answered from the table without expanding.
    fn probe_pass<S: Searchable<Action = A>>(
        &mut self,
        s: &mut S,
        last_move: Option<&Move<A>>,
        depth: i32,
        window: SearchWindow,
        record: bool,
        kept: &mut PendingTree<A>,
    ) -> Node<A> {
        if !record {
            return self.search_internal(s, last_move, depth, 0, window, &mut NoopObserver, None);
        }
        let mut pass: PendingTree<A> = PendingTree::new();
        let node = self.search_internal(s, last_move, depth, 0, window, &mut pass, None);
        if !pass.is_empty() { *kept = pass; }
        node
    }

    #[allow(clippy::too_many_arguments)]
    fn search_internal<S: Searchable<Action = A>>(
        &mut self,
        s: &mut S,
        last_move: Option<&Move<A>>,
        depth: i32,
        ply: u32,
        window: SearchWindow,
        obs: &mut dyn TreeObserver<A>,
        parent: Option<NodeId>,
    ) -> Node<A> {
        let mut tt_action: Option<A> = None;
        if self.options.strategy.uses_memory() {
            let entry = self.tt.get(s.hash_key());
            if self.tt.entry_exists(entry, depth, &window) {
                if let Some((value, best)) = entry.and_then(|e| e.cutoff_value(&window).map(|v| (v, e.best_move.clone()))) {
                    return Node { value, best: best.map(|m| m.with_inherited_value(value)) };
                }
            }
            tt_action = entry.and_then(|e| e.best_move.as_ref()).map(|m| m.action.clone());
        }

        let done = s.done(last_move, false);
        if depth <= 0 || done {
            if self.do_quiescent_search(s, depth, done, last_move) {
                let stand_pat = self.leaf_value(s, last_move);
                let urgent = s.generate_urgent_moves(last_move, &self.options.weights);
                if !urgent.is_empty() {
                    return self.find_best_move(s, last_move, depth, ply, urgent, window, Some(stand_pat), obs, parent);
                }
            }
            return self.evaluate_leaf(s, last_move, depth);
        }

        let mut moves = s.generate_moves(last_move, &self.options.weights);
        if moves.is_empty() {
            return self.evaluate_leaf(s, last_move, depth);
        }
        // Root order stays as generated so ties resolve the same way with or without memory
        if ply > 0 {
            if let Some(action) = tt_action { promote(&mut moves, &action); }
        }
        self.find_best_move(s, last_move, depth, ply, moves, window, None, obs, parent)
    }

    /// Searches `moves` in order. `stand_pat`, when present, is the value of
    /// declining them all (quiescence).
    #[allow(clippy::too_many_arguments)]
    fn find_best_move<S: Searchable<Action = A>>(
        &mut self,
        s: &mut S,
        last_move: Option<&Move<A>>,
        depth: i32,
        ply: u32,
        moves: MoveList<A>,
        window: SearchWindow,
        stand_pat: Option<i32>,
        obs: &mut dyn TreeObserver<A>,
        parent: Option<NodeId>,
    ) -> Node<A> {
        let pruning = self.options.alpha_beta;
        let scout = pruning && self.options.strategy.uses_scout();
        let mut alpha = window.alpha;
        let beta = window.beta;
        let mut best_value = -INFINITY;
        let mut best: Option<Move<A>> = None;
        let mut best_id: Option<NodeId> = None;

        if let Some(stand) = stand_pat {
            best_value = stand;
            if pruning {
                if stand >= beta {
                    self.store(s, depth, None, stand, &window);
                    return Node::leaf(stand);
                }
                alpha = alpha.max(stand);
            }
        }

        let total = moves.len();
        let mut remaining: VecDeque<Move<A>> = moves.into();
        let mut searched = 0usize;
        while let Some(mut the_move) = remaining.pop_front() {
            if self.pause_requested() {
                self.interrupted = true;
                break;
            }
            self.moves_considered += 1;
            if ply == 0 { self.update_percent_done(total - remaining.len(), total); }

            let current = SearchWindow::new(alpha, beta);
            s.make_internal_move(&the_move);
            let child = obs.add_node(parent, &the_move, &current);
            let value = if scout && searched > 0 {
                let probe = SearchWindow::new(-alpha - 1, -alpha);
                // The scout's subtree is only kept when no re-search replaces it
                let mut pending: PendingTree<A> = PendingTree::new();
                let defer = obs.records();
                let v = if defer {
                    -self.search_internal(s, Some(&the_move), depth - 1, ply + 1, probe, &mut pending, None).value
                } else {
                    -self.search_internal(s, Some(&the_move), depth - 1, ply + 1, probe, obs, child).value
                };
                if v > alpha && v < beta {
                    // Scout failed high inside the window: re-search for the real value
                    -self.search_internal(s, Some(&the_move), depth - 1, ply + 1, current.negate_and_swap(), obs, child).value
                } else {
                    if defer { pending.replay(obs, child); }
                    v
                }
            } else {
                -self.search_internal(s, Some(&the_move), depth - 1, ply + 1, current.negate_and_swap(), obs, child).value
            };
            s.undo_internal_move(&the_move);
            searched += 1;
            // A child cut short by cancellation has no trustworthy value
            if self.interrupted { break; }

            the_move.inherited_value = value;
            if let Some(id) = child { obs.node_searched(id, &the_move); }

            if value > best_value {
                best_value = value;
                best = Some(the_move);
                best_id = child;
                if pruning {
                    if value > alpha { alpha = value; }
                    if alpha >= beta {
                        obs.add_pruned(parent, remaining.make_contiguous(), value, &window);
                        break;
                    }
                }
            }
        }

        if best.is_none() && stand_pat.is_none() {
            // Cancelled before any child finished
            return Node::leaf(self.leaf_value(s, last_move));
        }
        if let Some(id) = best_id { obs.node_selected(id); }
        if let Some(b) = best.as_mut() { b.selected = true; }
        self.store(s, depth, best.clone(), best_value, &window);
        Node { value: best_value, best }
    }

    fn evaluate_leaf<S: Searchable<Action = A>>(&mut self, s: &mut S, last_move: Option<&Move<A>>, depth: i32) -> Node<A> {
        let value = self.leaf_value(s, last_move);
        self.store(s, depth, None, value, &SearchWindow::full());
        Node::leaf(value)
    }

    /// Static worth from the side to move's point of view.
    fn leaf_value<S: Searchable<Action = A>>(&self, s: &S, last_move: Option<&Move<A>>) -> i32 {
        let worth = check_bounded(s.worth(last_move, &self.options.weights));
        perspective_value(worth, player1_to_move(last_move))
    }

    /// Record `value`, found with `window`, as a bound for the current position.
    fn store<S: Searchable<Action = A>>(&mut self, s: &S, depth: i32, best: Option<Move<A>>, value: i32, window: &SearchWindow) {
        if self.interrupted || !self.options.strategy.uses_memory() { return; }
        let mut entry = Entry::new(s.hash_key(), best, depth);
        entry.record(value, window);
        self.tt.put(entry);
    }

    pub(super) fn do_quiescent_search<S: Searchable<Action = A>>(
        &self,
        s: &S,
        depth: i32,
        done: bool,
        last_move: Option<&Move<A>>,
    ) -> bool {
        self.options.quiescence
            && !done
            && depth > -self.options.max_quiescent_depth
            && s.in_jeopardy(last_move, &self.options.weights)
    }

    pub(super) fn pause_requested(&self) -> bool {
        self.abort.as_ref().map_or(false, |f| f.load(Ordering::Relaxed))
    }

    pub(super) fn update_percent_done(&self, done: usize, total: usize) {
        if total == 0 { return; }
        let pct = (100 * done / total).min(100) as u8;
        self.percent_done.store(pct, Ordering::Relaxed);
    }
}

/// Move `action` to the front of `moves`, keeping the rest in order.
fn promote<A: PartialEq>(moves: &mut MoveList<A>, action: &A) {
    if let Some(pos) = moves.iter().position(|m| &m.action == action) {
        let m = moves.remove(pos);
        moves.insert(0, m);
    }
}
