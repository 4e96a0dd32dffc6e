use std::fmt;

use crate::board::grid::{Cell, GridBoard};
use crate::error::SearchError;
use crate::search::moves::{perspective_value, player1_to_move, Move, MoveList, WINNING_VALUE};
use crate::search::searchable::{Searchable, Weights};
use crate::search::zobrist::{HashKey, Location, ZobristHash, DEFAULT_SEED};

const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Score of an open window holding `n` stones of one side, indexed by `n`.
pub const DEFAULT_WEIGHTS: [f64; 5] = [0.0, 1.0, 4.0, 16.0, 64.0];

/// Boards up to this size consider every empty cell; larger ones only the
/// neighbourhood of existing stones.
const FULL_WIDTH_CELLS: usize = 16;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameResult {
    Player1Wins,
    Player2Wins,
    Draw,
}

/// k-in-a-row on a rectangular board: tic-tac-toe, gomoku and friends.
///
/// Player 1 plays `X` and moves first. A line of `run` stones in any row,
/// column or diagonal wins; a full board without one is a draw.
#[derive(Clone, Debug)]
pub struct ConnectGame {
    board: GridBoard,
    run: usize,
    hash: ZobristHash,
    result: Option<GameResult>,
}

impl ConnectGame {
    pub fn new(rows: usize, cols: usize, run: usize) -> Self { Self::with_seed(rows, cols, run, DEFAULT_SEED) }

    /// Like `new`, but a run that cannot fit the board is an error instead of a panic.
    pub fn try_new(rows: usize, cols: usize, run: usize) -> Result<Self, SearchError> {
        if !Self::fits(rows, cols, run) {
            return Err(SearchError::InvalidBoard { rows, cols, run });
        }
        Ok(Self::new(rows, cols, run))
    }

    pub fn with_seed(rows: usize, cols: usize, run: usize, seed: u64) -> Self {
        assert!(Self::fits(rows, cols, run), "run of {run} cannot fit a {rows}x{cols} board");
        let board = GridBoard::new(rows, cols);
        let hash = ZobristHash::new(&board, seed);
        Self { board, run, hash, result: None }
    }

    fn fits(rows: usize, cols: usize, run: usize) -> bool { run >= 2 && run <= rows.max(cols) }

    pub fn tictactoe() -> Self { Self::new(3, 3, 3) }

    pub fn gomoku(size: usize) -> Self { Self::new(size, size, 5) }

    pub fn board(&self) -> &GridBoard { &self.board }

    pub fn run(&self) -> usize { self.run }

    /// Set by `done(_, true)` once the game is over.
    pub fn result(&self) -> Option<GameResult> { self.result }

    /// Places a stone for whoever is to move after `last_move`.
    pub fn play(&mut self, loc: Location, last_move: Option<&Move<Location>>) -> Result<Move<Location>, SearchError> {
        if !self.board.contains(loc) || self.board.get(loc) != Cell::Empty {
            return Err(SearchError::IllegalMove(loc));
        }
        let player1 = player1_to_move(last_move);
        let weights = Weights::default();
        let m = self.scored_move(loc, player1, self.evaluate(&weights), &weights);
        self.make_internal_move(&m);
        Ok(m)
    }

    fn weight(weights: &Weights, stones: usize) -> f64 {
        if weights.is_empty() {
            DEFAULT_WEIGHTS.get(stones).copied().unwrap_or_else(|| 4f64.powi(stones as i32 - 1))
        } else {
            weights.get(stones)
        }
    }

    /// Window starting at `start` heading `dir`, if all `run` cells are on the board.
    fn window(&self, start: Location, dir: (isize, isize)) -> Option<impl Iterator<Item = Location> + '_> {
        self.step(start, dir, self.run as isize - 1)?;
        Some((0..self.run as isize).filter_map(move |i| self.step(start, dir, i)))
    }

    fn step(&self, from: Location, dir: (isize, isize), n: isize) -> Option<Location> {
        self.board.offset(from.row as isize + dir.0 * n, from.col as isize + dir.1 * n)
    }

    fn counts(&self, start: Location, dir: (isize, isize)) -> Option<(usize, usize)> {
        let cells = self.window(start, dir)?;
        let (mut p1, mut p2) = (0, 0);
        for loc in cells {
            match self.board.get(loc) {
                Cell::Player1 => p1 += 1,
                Cell::Player2 => p2 += 1,
                Cell::Empty => {}
            }
        }
        Some((p1, p2))
    }

    fn window_value(p1: usize, p2: usize, weights: &Weights) -> f64 {
        match (p1, p2) {
            (0, 0) => 0.0,
            (n, 0) => Self::weight(weights, n),
            (0, n) => -Self::weight(weights, n),
            _ => 0.0,
        }
    }

    /// Every window on the board as (start, direction).
    fn windows(&self) -> impl Iterator<Item = (Location, (isize, isize))> + '_ {
        self.board
            .locations()
            .flat_map(|loc| DIRECTIONS.into_iter().map(move |d| (loc, d)))
            .filter(move |&(loc, d)| self.step(loc, d, self.run as isize - 1).is_some())
    }

    /// Windows that include `loc`.
    fn windows_through(&self, loc: Location) -> impl Iterator<Item = (Location, (isize, isize))> + '_ {
        DIRECTIONS.into_iter().flat_map(move |d| {
            (0..self.run as isize)
                .filter_map(move |back| self.step(loc, (-d.0, -d.1), back))
                .filter(move |&start| self.step(start, d, self.run as isize - 1).is_some())
                .map(move |start| (start, d))
        })
    }

    /// Sum of open-window scores, player 1's perspective, or the win sentinel.
    fn evaluate(&self, weights: &Weights) -> EvalScore {
        let mut total = 0.0;
        for (start, d) in self.windows() {
            if let Some((p1, p2)) = self.counts(start, d) {
                if p1 == self.run { return EvalScore::Won(true); }
                if p2 == self.run { return EvalScore::Won(false); }
                total += Self::window_value(p1, p2, weights);
            }
        }
        EvalScore::Open(total)
    }

    /// Move with its static value: the board's worth after it is played.
    fn scored_move(&self, loc: Location, player1: bool, base: EvalScore, weights: &Weights) -> Move<Location> {
        let total = match base {
            EvalScore::Won(p1) => return Move::new(loc, player1, if p1 { WINNING_VALUE } else { -WINNING_VALUE }),
            EvalScore::Open(t) => t,
        };
        let mut delta = 0.0;
        for (start, d) in self.windows_through(loc) {
            if let Some((p1, p2)) = self.counts(start, d) {
                let (a1, a2) = if player1 { (p1 + 1, p2) } else { (p1, p2 + 1) };
                if a1 == self.run || a2 == self.run {
                    return Move::new(loc, player1, if player1 { WINNING_VALUE } else { -WINNING_VALUE });
                }
                delta += Self::window_value(a1, a2, weights) - Self::window_value(p1, p2, weights);
            }
        }
        Move::new(loc, player1, clamp_worth(total + delta))
    }

    fn candidates(&self) -> Vec<Location> {
        let empty = self.board.locations().filter(|&l| self.board.get(l) == Cell::Empty);
        if self.board.len() <= FULL_WIDTH_CELLS {
            return empty.collect();
        }
        if self.board.is_empty() {
            return vec![self.board.center()];
        }
        empty
            .filter(|&l| {
                (-1..=1).any(|dr| {
                    (-1..=1).any(|dc| {
                        self.board
                            .offset(l.row as isize + dr, l.col as isize + dc)
                            .map_or(false, |n| self.board.get(n) != Cell::Empty)
                    })
                })
            })
            .collect()
    }

    fn sorted_moves(&self, locs: Vec<Location>, last_move: Option<&Move<Location>>, weights: &Weights) -> MoveList<Location> {
        let player1 = player1_to_move(last_move);
        let base = self.evaluate(weights);
        let mut moves: MoveList<Location> = locs.into_iter().map(|l| self.scored_move(l, player1, base, weights)).collect();
        moves.sort_by_key(|m| -perspective_value(m.value, player1));
        moves
    }

    /// Empty cells that complete a line for either side.
    fn threats(&self) -> Vec<Location> {
        let mut out: Vec<Location> = Vec::new();
        for (start, d) in self.windows() {
            let Some((p1, p2)) = self.counts(start, d) else { continue };
            let one_short = (p1 == self.run - 1 && p2 == 0) || (p2 == self.run - 1 && p1 == 0);
            if !one_short { continue; }
            if let Some(mut cells) = self.window(start, d) {
                if let Some(gap) = cells.find(|&l| self.board.get(l) == Cell::Empty) {
                    if !out.contains(&gap) { out.push(gap); }
                }
            }
        }
        out
    }

    fn wins_through(&self, loc: Location) -> bool {
        let cell = self.board.get(loc);
        if cell == Cell::Empty { return false; }
        DIRECTIONS.into_iter().any(|(dr, dc)| {
            let mut count = 1;
            for sign in [1, -1] {
                let mut n = 1;
                while let Some(next) = self.step(loc, (dr * sign, dc * sign), n) {
                    if self.board.get(next) != cell { break; }
                    count += 1;
                    n += 1;
                }
            }
            count >= self.run
        })
    }

    fn winner(&self, last_move: Option<&Move<Location>>) -> Option<bool> {
        match last_move {
            Some(m) => self.wins_through(m.action).then_some(m.player1),
            None => match self.evaluate(&Weights::default()) {
                EvalScore::Won(p1) => Some(p1),
                EvalScore::Open(_) => None,
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum EvalScore {
    Open(f64),
    Won(bool),
}

fn clamp_worth(total: f64) -> i32 {
    let limit = (WINNING_VALUE - 1) as f64;
    total.round().clamp(-limit, limit) as i32
}

impl Searchable for ConnectGame {
    type Action = Location;

    fn generate_moves(&mut self, last_move: Option<&Move<Location>>, weights: &Weights) -> MoveList<Location> {
        self.sorted_moves(self.candidates(), last_move, weights)
    }

    fn generate_urgent_moves(&mut self, last_move: Option<&Move<Location>>, weights: &Weights) -> MoveList<Location> {
        self.sorted_moves(self.threats(), last_move, weights)
    }

    fn in_jeopardy(&self, _last_move: Option<&Move<Location>>, _weights: &Weights) -> bool { !self.threats().is_empty() }

    fn done(&mut self, last_move: Option<&Move<Location>>, record_result: bool) -> bool {
        let winner = self.winner(last_move);
        let over = winner.is_some() || self.board.is_full();
        if over && record_result {
            self.result = Some(match winner {
                Some(true) => GameResult::Player1Wins,
                Some(false) => GameResult::Player2Wins,
                None => GameResult::Draw,
            });
        }
        over
    }

    fn worth(&self, _last_move: Option<&Move<Location>>, weights: &Weights) -> i32 {
        match self.evaluate(weights) {
            EvalScore::Won(true) => WINNING_VALUE,
            EvalScore::Won(false) => -WINNING_VALUE,
            EvalScore::Open(total) => clamp_worth(total),
        }
    }

    fn hash_key(&self) -> HashKey { self.hash.key() }

    fn make_internal_move(&mut self, m: &Move<Location>) {
        assert_eq!(self.board.get(m.action), Cell::Empty, "cell {} already occupied", m.action);
        let cell = Cell::for_player(m.player1);
        self.board.set(m.action, cell);
        self.hash.apply_move(m.action, cell.state_index());
    }

    fn undo_internal_move(&mut self, m: &Move<Location>) {
        let cell = Cell::for_player(m.player1);
        assert_eq!(self.board.get(m.action), cell, "undo of {} does not match the board", m.action);
        self.board.set(m.action, Cell::Empty);
        self.hash.apply_move(m.action, cell.state_index());
    }
}

impl fmt::Display for ConnectGame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.board) }
}
