use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::debug;
use rayon::prelude::*;

use crate::search::moves::{perspective_value, player1_to_move, Move, INFINITY};
use crate::search::options::SearchOptions;
use crate::search::searchable::Searchable;
use crate::search::strategy::{SearchResult, Searcher};
use crate::search::window::SearchWindow;

/// Root-split search: every root move is searched one ply shallower, with a
/// full window, on its own clone of the game and its own searcher.
///
/// Results are reduced in generator order keeping the first strictly better
/// value, so the chosen move and value match a sequential search of the same
/// strategy. Falls back to a sequential search when there is nothing to split.
///
/// Every worker polls `abort`. Root moves whose search was cut short, or never
/// started, are left out of the reduction and the result is marked interrupted.
pub fn search_root_parallel<S>(
    searchable: &S,
    last_move: Option<&Move<S::Action>>,
    options: &SearchOptions,
    abort: Option<Arc<AtomicBool>>,
) -> SearchResult<S::Action>
where
    S: Searchable + Clone + Send + Sync,
    S::Action: Send + Sync,
{
    let mut root = searchable.clone();
    let done = root.done(last_move, false);
    let moves = if done || options.look_ahead <= 0 { Vec::new() } else { root.generate_moves(last_move, &options.weights) };
    if moves.len() < 2 {
        let mut searcher = Searcher::new(options.clone());
        searcher.set_abort(abort);
        return searcher.search(&mut root, last_move);
    }
    debug!("root split over {} moves at look_ahead={}", moves.len(), options.look_ahead);

    let child_options = SearchOptions {
        look_ahead: options.look_ahead - 1,
        initial_window: SearchWindow::full(),
        ..options.clone()
    };
    let aborted = |flag: &Option<Arc<AtomicBool>>| flag.as_ref().map_or(false, |f| f.load(Ordering::Relaxed));
    let results: Vec<Option<(Move<S::Action>, SearchResult<S::Action>)>> = moves
        .into_par_iter()
        .map(|m| {
            if aborted(&abort) { return None; }
            let mut worker = searchable.clone();
            worker.make_internal_move(&m);
            let mut searcher = Searcher::new(child_options.clone());
            searcher.set_abort(abort.clone());
            let r = searcher.search(&mut worker, Some(&m));
            Some((m, r))
        })
        .collect();

    let minimax = options.strategy.is_minimax();
    let p1_to_move = player1_to_move(last_move);
    let mut best: Option<Move<S::Action>> = None;
    let mut best_value = -INFINITY;
    let mut moves_considered = 0u64;
    let mut interrupted = false;
    for result in results {
        let Some((mut m, r)) = result else {
            interrupted = true;
            continue;
        };
        moves_considered += 1 + r.moves_considered;
        if r.interrupted {
            interrupted = true;
            continue;
        }
        let value = -r.value;
        m.inherited_value = if minimax { perspective_value(value, p1_to_move) } else { value };
        if best.is_none() || value > best_value {
            best_value = value;
            best = Some(m);
        }
    }
    match best.as_mut() {
        Some(b) => b.selected = true,
        // Cancelled before any root move finished: fall back to the static worth
        None => best_value = perspective_value(root.worth(last_move, &options.weights), p1_to_move),
    }
    let last_move_value = if minimax { perspective_value(best_value, p1_to_move) } else { -best_value };
    SearchResult { best_move: best, value: best_value, last_move_value, moves_considered, interrupted }
}
