use std::fmt;

use crate::env::{AdversarialGame, Outcome};
use crate::error::MoveError;

use super::Player;

pub const ROWS: usize = 6;
pub const COLS: usize = 7;
/// Pieces in a line needed to win.
pub const CONNECT: usize = 4;
/// Magnitude of the utility of a decided game.
pub const WIN_UTILITY: f64 = 10_000.0;

/// Line directions: horizontal, vertical, and both diagonals.
pub(crate) const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Occupied(Player),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Placement {
    row: usize,
    col: usize,
}

/// A gravity board mutated in place, with an undo stack of placed pieces.
///
/// Row 0 is the top, row `rows - 1` the bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    current_player: Player,
    history: Vec<Placement>,
}

/// Rough size of the game tree, for reporting.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct GameComplexity {
    pub branching_factor: usize,
    pub maximum_depth: usize,
    /// Upper bound on board configurations: 3^(rows * cols).
    pub state_space_upper_bound: f64,
}

impl Board {
    /// Create a new empty 6x7 board
    pub fn new() -> Self {
        Self::with_size(ROWS, COLS)
    }

    pub fn with_size(rows: usize, cols: usize) -> Self {
        Board {
            rows,
            cols,
            cells: vec![Cell::Empty; rows * cols],
            current_player: Player::One,
            history: Vec::with_capacity(rows * cols),
        }
    }

    /// Build a position by playing `moves` (column indices) alternately,
    /// starting with [`Player::One`].
    pub fn from_moves(rows: usize, cols: usize, moves: &[usize]) -> Result<Self, MoveError> {
        let mut board = Self::with_size(rows, cols);
        for &col in moves {
            board.play(col)?;
        }
        Ok(board)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.cols + col]
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn move_count(&self) -> usize {
        self.history.len()
    }

    /// `(row, col)` of the most recently placed piece
    pub fn last_move(&self) -> Option<(usize, usize)> {
        self.history.last().map(|p| (p.row, p.col))
    }

    pub fn in_bounds(&self, row: isize, col: isize) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.rows && (col as usize) < self.cols
    }

    pub fn is_column_full(&self, col: usize) -> bool {
        if col >= self.cols || self.rows == 0 {
            return true;
        }
        self.get(0, col) != Cell::Empty
    }

    pub fn is_full(&self) -> bool {
        (0..self.cols).all(|col| self.is_column_full(col))
    }

    /// Drop a piece for the player to move. Returns the landing row.
    pub fn play(&mut self, col: usize) -> Result<usize, MoveError> {
        if col >= self.cols {
            return Err(MoveError::InvalidColumn);
        }
        if self.winner().is_some() {
            return Err(MoveError::GameOver);
        }
        let row = (0..self.rows)
            .rev()
            .find(|&row| self.get(row, col) == Cell::Empty)
            .ok_or(MoveError::ColumnFull)?;

        self.cells[row * self.cols + col] = Cell::Occupied(self.current_player);
        self.history.push(Placement { row, col });
        self.current_player = self.current_player.other();
        Ok(row)
    }

    /// Take back the last piece. Returns where it was.
    pub fn undo(&mut self) -> Option<(usize, usize)> {
        let placed = self.history.pop()?;
        self.cells[placed.row * self.cols + placed.col] = Cell::Empty;
        self.current_player = self.current_player.other();
        Some((placed.row, placed.col))
    }

    /// Player who completed a line with the last move, if any.
    pub fn winner(&self) -> Option<Player> {
        let (row, col) = self.last_move()?;
        if !self.check_win(row, col) {
            return None;
        }
        match self.get(row, col) {
            Cell::Occupied(player) => Some(player),
            Cell::Empty => None,
        }
    }

    /// Check if the piece at (row, col) is part of a winning line
    pub fn check_win(&self, row: usize, col: usize) -> bool {
        let Cell::Occupied(player) = self.get(row, col) else {
            return false;
        };
        DIRECTIONS.iter().any(|&(dr, dc)| {
            1 + self.run_length(row, col, dr, dc, player) + self.run_length(row, col, -dr, -dc, player)
                >= CONNECT
        })
    }

    /// Consecutive pieces of `player` from (row, col) exclusive, stepping (dr, dc).
    fn run_length(&self, row: usize, col: usize, dr: isize, dc: isize, player: Player) -> usize {
        let mut count = 0;
        let mut r = row as isize + dr;
        let mut c = col as isize + dc;
        while self.in_bounds(r, c) && self.get(r as usize, c as usize) == Cell::Occupied(player) {
            count += 1;
            r += dr;
            c += dc;
        }
        count
    }

    pub fn complexity_estimate(&self) -> GameComplexity {
        let cells = self.rows * self.cols;
        GameComplexity {
            branching_factor: self.cols,
            maximum_depth: cells,
            state_space_upper_bound: 3f64.powi(cells as i32),
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl AdversarialGame for Board {
    type Action = usize;

    fn current_player(&self) -> Player {
        self.current_player
    }

    fn valid_actions(&self) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }
        (0..self.cols).filter(|&col| !self.is_column_full(col)).collect()
    }

    fn make_move(&mut self, action: usize) -> bool {
        self.play(action).is_ok()
    }

    fn undo_move(&mut self) -> bool {
        self.undo().is_some()
    }

    fn check_winner(&self) -> Option<Outcome> {
        if let Some(player) = self.winner() {
            Some(Outcome::Winner(player))
        } else if self.is_full() {
            Some(Outcome::Draw)
        } else {
            None
        }
    }

    fn utility(&self, player: Player) -> Option<f64> {
        self.check_winner().map(|outcome| match outcome {
            Outcome::Winner(winner) if winner == player => WIN_UTILITY,
            Outcome::Winner(_) => -WIN_UTILITY,
            Outcome::Draw => 0.0,
        })
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            let line: Vec<String> = (0..self.cols)
                .map(|col| match self.get(row, col) {
                    Cell::Empty => ".".to_string(),
                    Cell::Occupied(player) => player.symbol().to_string(),
                })
                .collect();
            writeln!(f, "|{}|", line.join(" "))?;
        }
        let footer: Vec<String> = (0..self.cols).map(|col| (col % 10).to_string()).collect();
        write!(f, " {} ", footer.join(" "))
    }
}
