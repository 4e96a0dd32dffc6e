use gamesearch::board::{ConnectGame, GameKind, GameResult};
use gamesearch::search::{Location, Move, SearchOptions, Searchable, Searcher, StrategyKind, Weights, WINNING_VALUE};
use gamesearch::SearchError;

fn setup(game: &mut ConnectGame, stones: &[(usize, usize)]) -> Option<Move<Location>> {
    let mut last: Option<Move<Location>> = None;
    for &(r, c) in stones {
        last = Some(game.play(Location::new(r, c), last.as_ref()).unwrap());
    }
    last
}

#[test]
fn takes_the_immediate_win() {
    for kind in StrategyKind::ALL {
        let mut g = ConnectGame::tictactoe();
        let last = setup(&mut g, &[(0, 0), (1, 0), (0, 1), (1, 1)]);
        let r = Searcher::new(SearchOptions::new(kind, 3)).search(&mut g, last.as_ref());
        assert_eq!(r.best_move.map(|m| m.action), Some(Location::new(0, 2)), "{kind}");
        assert_eq!(r.value, WINNING_VALUE, "{kind}");
    }
}

#[test]
fn blocks_the_opponents_line() {
    for kind in StrategyKind::ALL {
        let mut g = ConnectGame::tictactoe();
        let last = setup(&mut g, &[(0, 0), (1, 1), (0, 1)]);
        let r = Searcher::new(SearchOptions::new(kind, 2)).search(&mut g, last.as_ref());
        let best = r.best_move.unwrap();
        assert!(!best.player1);
        assert_eq!(best.action, Location::new(0, 2), "{kind}");
        assert!(r.value > -WINNING_VALUE, "{kind}");
    }
}

#[test]
fn perfect_play_from_the_empty_board_is_a_draw() {
    for kind in [StrategyKind::NegaScoutMemory, StrategyKind::NegaMax] {
        let mut g = ConnectGame::tictactoe();
        let r = Searcher::new(SearchOptions::new(kind, 9)).search(&mut g, None);
        assert_eq!(r.value, 0, "{kind}");
    }
}

#[test]
fn self_play_game_ends_drawn() {
    let mut g = ConnectGame::tictactoe();
    let mut searcher = Searcher::new(SearchOptions::new(StrategyKind::NegaScoutMemory, 9));
    let mut last: Option<Move<Location>> = None;
    let mut plies = 0;
    while !g.done(last.as_ref(), true) {
        let r = searcher.search(&mut g, last.as_ref());
        let loc = r.best_move.unwrap().action;
        last = Some(g.play(loc, last.as_ref()).unwrap());
        plies += 1;
    }
    assert_eq!(plies, 9);
    assert_eq!(g.result(), Some(GameResult::Draw));
}

#[test]
fn done_records_only_when_asked() {
    let mut g = ConnectGame::tictactoe();
    let last = setup(&mut g, &[(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)]);
    assert!(g.done(last.as_ref(), false));
    assert_eq!(g.result(), None);
    assert!(g.done(last.as_ref(), true));
    assert_eq!(g.result(), Some(GameResult::Player1Wins));
    assert_eq!(g.worth(last.as_ref(), &Weights::default()), WINNING_VALUE);
    // Without a last move the whole board is scanned
    assert!(g.done(None, false));
}

#[test]
fn illegal_moves_are_rejected() {
    let mut g = ConnectGame::tictactoe();
    let last = setup(&mut g, &[(1, 1)]);
    assert!(matches!(g.play(Location::new(1, 1), last.as_ref()), Err(SearchError::IllegalMove(_))));
    assert!(matches!(g.play(Location::new(3, 0), last.as_ref()), Err(SearchError::IllegalMove(_))));
}

#[test]
fn make_and_undo_restore_board_and_key() {
    let mut g = ConnectGame::gomoku(9);
    let last = setup(&mut g, &[(4, 4), (4, 5)]);
    let key = g.hash_key();
    let text = g.to_string();
    let moves = g.generate_moves(last.as_ref(), &Weights::default());
    assert!(!moves.is_empty());
    for m in &moves {
        assert!(m.player1);
        g.make_internal_move(m);
        assert_ne!(g.hash_key(), key);
        g.undo_internal_move(m);
        assert_eq!(g.hash_key(), key);
    }
    assert_eq!(g.to_string(), text);
}

#[test]
fn moves_are_ordered_best_first_for_the_mover() {
    let mut g = ConnectGame::gomoku(9);
    let last = setup(&mut g, &[(4, 4), (4, 5), (3, 4)]);
    let moves = g.generate_moves(last.as_ref(), &Weights::default());
    assert!(moves.iter().all(|m| !m.player1));
    // Player 2 prefers low (player-1-frame) values
    assert!(moves.windows(2).all(|w| w[0].value <= w[1].value));
}

#[test]
fn gomoku_candidates_hug_existing_stones() {
    let mut g = ConnectGame::gomoku(9);
    let first = g.generate_moves(None, &Weights::default());
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].action, Location::new(4, 4));
    let last = setup(&mut g, &[(4, 4)]);
    let replies = g.generate_moves(last.as_ref(), &Weights::default());
    assert_eq!(replies.len(), 8);
}

#[test]
fn threats_are_urgent() {
    let mut g = ConnectGame::tictactoe();
    let quiet = setup(&mut g, &[(1, 1)]);
    assert!(!g.in_jeopardy(quiet.as_ref(), &Weights::default()));

    let mut g = ConnectGame::tictactoe();
    let last = setup(&mut g, &[(0, 0), (2, 2), (0, 1)]);
    assert!(g.in_jeopardy(last.as_ref(), &Weights::default()));
    let urgent = g.generate_urgent_moves(last.as_ref(), &Weights::default());
    let locs: Vec<Location> = urgent.iter().map(|m| m.action).collect();
    assert_eq!(locs, vec![Location::new(0, 2)]);
}

#[test]
fn worth_is_antisymmetric() {
    let w = Weights::default();
    let mut x = ConnectGame::gomoku(7);
    let xl = setup(&mut x, &[(3, 3)]);
    assert!(x.worth(xl.as_ref(), &w) > 0);
    // A lone O on the same cell scores the negation
    let mut o = ConnectGame::gomoku(7);
    let center = Move::new(Location::new(3, 3), false, 0);
    o.make_internal_move(&center);
    assert_eq!(o.worth(Some(&center), &w), -x.worth(xl.as_ref(), &w));
}

#[test]
fn custom_weights_change_the_score() {
    let mut g = ConnectGame::tictactoe();
    let last = setup(&mut g, &[(1, 1)]);
    let default = g.worth(last.as_ref(), &Weights::default());
    let doubled = g.worth(last.as_ref(), &Weights::new(vec![0.0, 2.0, 8.0]));
    assert_eq!(default, 4);
    assert_eq!(doubled, 8);
}

#[test]
fn game_kind_parses() {
    assert_eq!("TicTacToe".parse::<GameKind>().unwrap(), GameKind::TicTacToe);
    assert_eq!("tic-tac-toe".parse::<GameKind>().unwrap(), GameKind::TicTacToe);
    assert_eq!("gomoku".parse::<GameKind>().unwrap().build(11).unwrap().board().rows(), 11);
    assert!(matches!("chess".parse::<GameKind>(), Err(SearchError::UnknownGame(_))));
}

#[test]
fn board_too_small_for_the_run_is_an_error() {
    let err = GameKind::Gomoku.build(4).unwrap_err();
    assert!(matches!(err, SearchError::InvalidBoard { rows: 4, cols: 4, run: 5 }));
    assert_eq!(err.to_string(), "a run of 5 cannot fit a 4x4 board");
    assert!(GameKind::Gomoku.build(5).is_ok());
    assert!(GameKind::TicTacToe.build(1).is_ok());
    assert!(matches!(ConnectGame::try_new(3, 3, 1), Err(SearchError::InvalidBoard { .. })));
}
