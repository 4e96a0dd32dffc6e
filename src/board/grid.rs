use std::fmt;

use crate::search::zobrist::{Location, ZobristBoard};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Empty,
    Player1,
    Player2,
}

impl Cell {
    pub fn for_player(player1: bool) -> Self {
        if player1 { Cell::Player1 } else { Cell::Player2 }
    }

    /// Zobrist state: 0 empty, 1 player 1, 2 player 2.
    pub fn state_index(self) -> usize {
        match self {
            Cell::Empty => 0,
            Cell::Player1 => 1,
            Cell::Player2 => 2,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Player1 => 'X',
            Cell::Player2 => 'O',
        }
    }
}

/// Rectangular board of cells, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridBoard {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    filled: usize,
}

impl GridBoard {
    pub fn new(rows: usize, cols: usize) -> Self {
        assert!(rows > 0 && cols > 0, "board must have at least one cell");
        Self { rows, cols, cells: vec![Cell::Empty; rows * cols], filled: 0 }
    }

    pub fn rows(&self) -> usize { self.rows }

    pub fn cols(&self) -> usize { self.cols }

    pub fn len(&self) -> usize { self.cells.len() }

    pub fn is_empty(&self) -> bool { self.filled == 0 }

    pub fn is_full(&self) -> bool { self.filled == self.cells.len() }

    pub fn filled(&self) -> usize { self.filled }

    pub fn contains(&self, loc: Location) -> bool { loc.row < self.rows && loc.col < self.cols }

    /// `(row, col)` if it lies on the board.
    pub fn offset(&self, row: isize, col: isize) -> Option<Location> {
        if row < 0 || col < 0 { return None; }
        let loc = Location::new(row as usize, col as usize);
        self.contains(loc).then_some(loc)
    }

    pub fn get(&self, loc: Location) -> Cell { self.cells[loc.row * self.cols + loc.col] }

    pub fn set(&mut self, loc: Location, cell: Cell) {
        let slot = &mut self.cells[loc.row * self.cols + loc.col];
        match (*slot == Cell::Empty, cell == Cell::Empty) {
            (true, false) => self.filled += 1,
            (false, true) => self.filled -= 1,
            _ => {}
        }
        *slot = cell;
    }

    /// Every location, row by row.
    pub fn locations(&self) -> impl Iterator<Item = Location> + '_ {
        (0..self.rows).flat_map(move |r| (0..self.cols).map(move |c| Location::new(r, c)))
    }

    pub fn center(&self) -> Location { Location::new(self.rows / 2, self.cols / 2) }
}

impl ZobristBoard for GridBoard {
    fn num_rows(&self) -> usize { self.rows }
    fn num_cols(&self) -> usize { self.cols }
    fn num_states(&self) -> usize { 3 }
    fn state_index(&self, loc: Location) -> usize { self.get(loc).state_index() }
}

impl fmt::Display for GridBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.rows {
            let line: Vec<String> = (0..self.cols).map(|c| self.get(Location::new(r, c)).symbol().to_string()).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}
