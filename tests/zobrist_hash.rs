use gamesearch::board::{Cell, GridBoard};
use gamesearch::search::{HashKey, Location, ZobristHash};
use gamesearch::search::zobrist::DEFAULT_SEED;

#[test]
fn incremental_key_matches_full_recompute() {
    let mut board = GridBoard::new(4, 5);
    let mut hash = ZobristHash::new(&board, DEFAULT_SEED);
    assert_eq!(hash.key(), HashKey(0));
    for (r, c, cell) in [(0, 0, Cell::Player1), (3, 4, Cell::Player2), (2, 1, Cell::Player1)] {
        let loc = Location::new(r, c);
        board.set(loc, cell);
        hash.apply_move(loc, cell.state_index());
        assert_eq!(hash.key(), hash.key_for(&board));
    }
}

#[test]
fn applying_twice_restores_the_key() {
    let board = GridBoard::new(3, 3);
    let mut hash = ZobristHash::new(&board, 7);
    let before = hash.key();
    let loc = Location::new(1, 2);
    hash.apply_move(loc, 2);
    assert_ne!(hash.key(), before);
    hash.apply_move(loc, 2);
    assert_eq!(hash.key(), before);
    hash.apply_move(loc, 0);
    assert_eq!(hash.key(), before, "empty state must not change the key");
}

#[test]
fn different_states_and_cells_get_different_numbers() {
    let board = GridBoard::new(3, 3);
    let base = ZobristHash::new(&board, 7);
    let mut keys = Vec::new();
    for loc in board.locations() {
        for state in 1..=2 {
            let mut h = base.clone();
            h.apply_move(loc, state);
            keys.push(h.key());
        }
    }
    let n = keys.len();
    keys.sort();
    keys.dedup();
    assert_eq!(keys.len(), n);
}

#[test]
fn same_seed_same_table() {
    let board = GridBoard::new(3, 3);
    let mut a = ZobristHash::new(&board, 99);
    let mut b = ZobristHash::new(&board, 99);
    let mut c = ZobristHash::new(&board, 100);
    for h in [&mut a, &mut b, &mut c] { h.apply_move(Location::new(0, 1), 1); }
    assert_eq!(a.key(), b.key());
    assert_ne!(a.key(), c.key());
}

#[test]
fn passing_move_toggles() {
    let board = GridBoard::new(2, 2);
    let mut h = ZobristHash::new(&board, DEFAULT_SEED);
    let k = h.key();
    h.apply_passing_move();
    assert_ne!(h.key(), k);
    h.apply_passing_move();
    assert_eq!(h.key(), k);
}

#[test]
#[should_panic(expected = "outside")]
fn off_board_location_panics() {
    let board = GridBoard::new(2, 2);
    let mut h = ZobristHash::new(&board, DEFAULT_SEED);
    h.apply_move(Location::new(2, 0), 1);
}

#[test]
fn location_text_form() {
    assert_eq!("3, 4".parse::<Location>().unwrap(), Location::new(3, 4));
    assert_eq!(Location::new(0, 7).to_string(), "0,7");
    assert!("3;4".parse::<Location>().is_err());
    assert!("a,1".parse::<Location>().is_err());
}

#[test]
fn move_order_does_not_change_the_key() {
    let board = GridBoard::new(5, 5);
    let mut a = ZobristHash::new(&board, DEFAULT_SEED);
    let mut b = a.clone();
    let black = (Location::new(1, 3), Cell::Player1.state_index());
    let white = (Location::new(1, 4), Cell::Player2.state_index());
    a.apply_move(black.0, black.1);
    a.apply_move(white.0, white.1);
    b.apply_move(white.0, white.1);
    b.apply_move(black.0, black.1);
    assert_eq!(a.key(), b.key());
}
