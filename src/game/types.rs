//! Chain Reaction board data structures.
//!
//! An R×C grid of cells, each holding an orb count and an owning side.
//! Red always moves first. A cell's critical mass is its orthogonal
//! neighbor count: 2 in a corner, 3 on an edge, 4 in the interior.

use crate::constants::{DEFAULT_COLS, DEFAULT_ROWS, MIN_BOARD_DIMENSION};
use crate::error::{GameError, Result};
use serde::{Deserialize, Serialize};

/// A (row, col) coordinate on the grid.
pub type Position = (usize, usize);

/// Orthogonal neighbor offsets: up, down, left, right.
pub const NEIGHBOR_OFFSETS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// One of the two players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Side {
    Red,
    Blue,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::Red, Side::Blue];

    pub fn opponent(&self) -> Self {
        match self {
            Side::Red => Side::Blue,
            Side::Blue => Side::Red,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Side::Red => "Red",
            Side::Blue => "Blue",
        }
    }

    /// Single-letter tag used by the text board format.
    pub fn symbol(&self) -> char {
        match self {
            Side::Red => 'R',
            Side::Blue => 'B',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'R' => Some(Side::Red),
            'B' => Some(Side::Blue),
            _ => None,
        }
    }
}

/// A single board cell. `orbs == 0` exactly when `owner` is `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cell {
    pub orbs: u32,
    pub owner: Option<Side>,
}

impl Cell {
    pub const EMPTY: Cell = Cell {
        orbs: 0,
        owner: None,
    };

    /// Build a cell, normalizing so that zero orbs never carry an owner.
    pub fn new(orbs: u32, owner: Option<Side>) -> Self {
        match owner {
            Some(side) if orbs > 0 => Cell {
                orbs,
                owner: Some(side),
            },
            _ => Cell::EMPTY,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.owner.is_none()
    }

    /// Whether `side` may place an orb here (empty or already its own).
    pub fn is_playable_by(&self, side: Side) -> bool {
        self.owner.is_none() || self.owner == Some(side)
    }
}

/// Main game state.
///
/// Cloning gives a fully independent copy: cells live in an owned `Vec`, so
/// search branches never alias the live game.
///
/// Not serde-serializable: boards travel as text notation, which always
/// goes through `Grid::new`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    /// Row-major cell storage
    cells: Vec<Cell>,
    /// Whose turn it is
    pub current_player: Side,
    /// Set once the termination rule has declared a winner
    pub is_game_over: bool,
}

impl Default for Grid {
    fn default() -> Self {
        Self::empty(DEFAULT_ROWS, DEFAULT_COLS)
    }
}

impl Grid {
    /// Create an empty grid with Red to move.
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        if rows < MIN_BOARD_DIMENSION || cols < MIN_BOARD_DIMENSION {
            return Err(GameError::InvalidDimensions { rows, cols });
        }
        Ok(Self::empty(rows, cols))
    }

    fn empty(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![Cell::EMPTY; rows * cols],
            current_player: Side::Red,
            is_game_over: false,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// Cell at (row, col), or `None` when out of bounds.
    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        if self.in_bounds(row, col) {
            self.cells.get(self.index(row, col))
        } else {
            None
        }
    }

    pub(crate) fn cell_mut(&mut self, row: usize, col: usize) -> &mut Cell {
        let idx = self.index(row, col);
        &mut self.cells[idx]
    }

    /// Overwrite a cell. Used to set up positions; zero orbs clears the owner.
    /// Returns false when out of bounds.
    pub fn set_cell(&mut self, row: usize, col: usize, orbs: u32, owner: Option<Side>) -> bool {
        if !self.in_bounds(row, col) {
            return false;
        }
        *self.cell_mut(row, col) = Cell::new(orbs, owner);
        true
    }

    /// Iterate over every cell with its position, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (Position, &Cell)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .map(move |(idx, cell)| ((idx / cols, idx % cols), cell))
    }

    /// In-bounds orthogonal neighbors of (row, col).
    pub fn neighbors(&self, row: usize, col: usize) -> impl Iterator<Item = Position> + '_ {
        NEIGHBOR_OFFSETS.iter().filter_map(move |&(dr, dc)| {
            let nr = row as i32 + dr;
            let nc = col as i32 + dc;
            if nr >= 0 && nc >= 0 && self.in_bounds(nr as usize, nc as usize) {
                Some((nr as usize, nc as usize))
            } else {
                None
            }
        })
    }

    /// Orb count at which the cell explodes: its neighbor count.
    pub fn critical_mass(&self, row: usize, col: usize) -> u32 {
        self.neighbors(row, col).count() as u32
    }

    /// Place one orb for the current player.
    ///
    /// Legal iff the cell is empty or already owned by the mover. Does not
    /// resolve explosions or switch turns. A finished game rejects every move.
    pub fn place(&mut self, row: usize, col: usize) -> bool {
        if self.is_game_over || !self.in_bounds(row, col) {
            return false;
        }
        let player = self.current_player;
        let cell = self.cell_mut(row, col);
        if !cell.is_playable_by(player) {
            return false;
        }
        cell.orbs += 1;
        cell.owner = Some(player);
        true
    }

    /// Switch to the other player's turn
    pub fn switch_player(&mut self) {
        self.current_player = self.current_player.opponent();
    }

    /// Back to an empty board with Red to move.
    pub fn reset(&mut self) {
        self.cells.fill(Cell::EMPTY);
        self.current_player = Side::Red;
        self.is_game_over = false;
    }

    /// Whether `side` may play at `pos`.
    pub fn is_legal_for(&self, pos: Position, side: Side) -> bool {
        self.cell(pos.0, pos.1)
            .is_some_and(|cell| cell.is_playable_by(side))
    }

    /// All positions `side` may play, row-major.
    pub fn legal_moves_for(&self, side: Side) -> Vec<Position> {
        self.iter()
            .filter(|(_, cell)| cell.is_playable_by(side))
            .map(|(pos, _)| pos)
            .collect()
    }

    /// All positions the current player may play.
    pub fn legal_moves(&self) -> Vec<Position> {
        self.legal_moves_for(self.current_player)
    }

    /// Total orbs owned by `side`.
    pub fn orbs_of(&self, side: Side) -> u32 {
        self.cells
            .iter()
            .filter(|cell| cell.owner == Some(side))
            .map(|cell| cell.orbs)
            .sum()
    }

    pub fn total_orbs(&self) -> u32 {
        self.cells.iter().map(|cell| cell.orbs).sum()
    }

    /// Positions of every cell owned by `side`.
    pub fn cells_of(&self, side: Side) -> Vec<Position> {
        self.iter()
            .filter(|(_, cell)| cell.owner == Some(side))
            .map(|(pos, _)| pos)
            .collect()
    }
}

/// Start a new game on a `rows`×`cols` board.
pub fn new_game(rows: usize, cols: usize) -> Result<Grid> {
    Grid::new(rows, cols)
}
