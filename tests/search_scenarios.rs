mod common;

use common::ScriptedTree;
use gamesearch::search::{Move, SearchOptions, Searcher, StrategyKind, WINNING_VALUE};

fn opts(kind: StrategyKind, look_ahead: i32, alpha_beta: bool) -> SearchOptions {
    let mut o = SearchOptions::new(kind, look_ahead);
    o.alpha_beta = alpha_beta;
    o
}

fn three_leaves() -> ScriptedTree {
    let mut t = ScriptedTree::new(0);
    t.add(0, 5);
    t.add(0, -3);
    t.add(0, 8);
    t
}

#[test]
fn player1_takes_the_largest_leaf() {
    for kind in StrategyKind::ALL {
        for ab in [true, false] {
            let mut t = three_leaves();
            let r = Searcher::new(opts(kind, 1, ab)).search(&mut t, None);
            let best = r.best_move.expect("a move");
            assert_eq!(best.action, 3, "{kind} ab={ab}");
            assert!(best.selected);
            assert_eq!(best.inherited_value, 8, "{kind} ab={ab}");
            assert_eq!(r.value, 8, "{kind} ab={ab}");
            let expected_last = if kind.is_minimax() { 8 } else { -8 };
            assert_eq!(r.last_move_value, expected_last, "{kind} ab={ab}");
            assert!(!r.interrupted);
            assert!(t.at_root(), "search left the game mutated");
        }
    }
}

#[test]
fn player2_takes_the_smallest_leaf() {
    let opening = Move::new(0usize, true, 0);
    for kind in StrategyKind::ALL {
        let mut t = three_leaves();
        let r = Searcher::new(opts(kind, 1, true)).search(&mut t, Some(&opening));
        let best = r.best_move.expect("a move");
        assert_eq!(best.action, 2, "{kind}");
        assert!(!best.player1);
        assert_eq!(r.value, 3, "{kind}");
        assert_eq!(r.last_move_value, -3, "{kind}");
        let inherited = if kind.is_minimax() { -3 } else { 3 };
        assert_eq!(best.inherited_value, inherited, "{kind}");
    }
}

#[test]
fn forced_win_reports_the_sentinel() {
    let mut t = ScriptedTree::new(0);
    let a = t.add(0, 0);
    let b = t.add(0, 0);
    let win = t.add(a, WINNING_VALUE);
    t.nodes[win].terminal = true;
    t.add(b, 10);
    t.add(b, -20);
    for kind in StrategyKind::ALL {
        let mut g = t.clone();
        let r = Searcher::new(opts(kind, 2, true)).search(&mut g, None);
        assert_eq!(r.best_move.map(|m| m.action), Some(a), "{kind}");
        assert_eq!(r.value, WINNING_VALUE, "{kind}");
    }
}

#[test]
fn no_moves_returns_static_worth() {
    for kind in StrategyKind::ALL {
        let mut t = ScriptedTree::new(-7);
        let r = Searcher::new(opts(kind, 3, true)).search(&mut t, None);
        assert!(r.best_move.is_none(), "{kind}");
        assert_eq!(r.value, -7, "{kind}");
        assert_eq!(r.moves_considered, 0);
    }
}

#[test]
fn terminal_root_is_not_expanded() {
    let mut t = three_leaves();
    t.nodes[0].terminal = true;
    t.nodes[0].worth = 42;
    let r = Searcher::new(opts(StrategyKind::NegaScout, 2, true)).search(&mut t, None);
    assert!(r.best_move.is_none());
    assert_eq!(r.value, 42);
}

#[test]
fn childless_interior_node_is_scored_statically() {
    // a has no replies, so it scores like a leaf even at depth 2
    let mut t = ScriptedTree::new(0);
    let a = t.add(0, 30);
    let b = t.add(0, 0);
    t.add(b, 10);
    for kind in StrategyKind::ALL {
        let mut g = t.clone();
        let r = Searcher::new(opts(kind, 2, true)).search(&mut g, None);
        assert_eq!(r.best_move.map(|m| m.action), Some(a), "{kind}");
        assert_eq!(r.value, 30, "{kind}");
    }
}

#[test]
#[should_panic(expected = "outside")]
fn worth_beyond_the_win_sentinel_panics() {
    let mut t = ScriptedTree::new(0);
    t.add(0, WINNING_VALUE + 1);
    Searcher::new(opts(StrategyKind::NegaMax, 1, true)).search(&mut t, None);
}

#[test]
fn progress_reaches_100_after_search() {
    let mut t = ScriptedTree::uniform(3, 3, 11);
    let mut s = Searcher::new(opts(StrategyKind::NegaScout, 3, true));
    let progress = s.progress_handle();
    s.search(&mut t, None);
    assert_eq!(progress.load(std::sync::atomic::Ordering::Relaxed), 100);
    assert_eq!(s.percent_done(), 100);
    assert!(s.moves_considered() > 0);
}
