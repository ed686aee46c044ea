//! Board, cells and symbols.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Board side length. Only 3x3 boards exist.
pub const BOARD_SIZE: usize = 3;

/// Glyph rendered for an empty cell.
pub const EMPTY_GLYPH: char = '□';

/// Divider rendered between cells.
pub const CELL_DIVIDER: char = '│';

/// Symbol a player places on the board.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Symbol {
    X,
    O,
}

impl Symbol {
    /// The complementary symbol.
    pub fn other(self) -> Self {
        match self {
            Self::X => Self::O,
            Self::O => Self::X,
        }
    }

    /// Lower-case marker used when rendering a board.
    pub fn marker(self) -> char {
        match self {
            Self::X => 'x',
            Self::O => 'o',
        }
    }

    /// Parse a symbol choice. Only the exact strings `"X"` and `"O"` are accepted.
    pub fn parse(choice: &str) -> Option<Self> {
        match choice {
            "X" => Some(Self::X),
            "O" => Some(Self::O),
            _ => None,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::X => "X",
            Self::O => "O",
        };
        write!(f, "{repr}")
    }
}

/// A single board cell.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Cell {
    #[default]
    Empty,
    Occupied(Symbol),
}

impl Cell {
    pub fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// Zero-indexed `(row, col)` coordinate.
pub type Coord = (usize, usize);

// Rows, columns, then both diagonals.
const LINES: [[Coord; 3]; 8] = [
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
];

/// A 3x3 tic-tac-toe board.
///
/// Cells only ever move from [`Cell::Empty`] to [`Cell::Occupied`] through
/// [`Board::place`]. The search in [`super::minimax`] works on private copies
/// and uses [`Board::clear`] to undo its tentative placements.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Board {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a board from rows of `'X'`, `'O'` and anything else for empty.
    ///
    /// Mostly useful for setting up positions in tests.
    pub fn from_rows(rows: [&str; BOARD_SIZE]) -> Self {
        let mut board = Self::new();
        for (row, line) in rows.iter().enumerate() {
            for (col, ch) in line.chars().take(BOARD_SIZE).enumerate() {
                board.cells[row][col] = match ch {
                    'X' | 'x' => Cell::Occupied(Symbol::X),
                    'O' | 'o' => Cell::Occupied(Symbol::O),
                    _ => Cell::Empty,
                };
            }
        }
        board
    }

    /// Cell at a zero-indexed coordinate, `None` when out of range.
    pub fn get(&self, (row, col): Coord) -> Option<Cell> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Write `symbol` into an empty cell.
    ///
    /// Returns `false` and leaves the board untouched when the coordinate is
    /// out of range or the cell is already occupied.
    pub fn place(&mut self, (row, col): Coord, symbol: Symbol) -> bool {
        match self.cells.get_mut(row).and_then(|r| r.get_mut(col)) {
            Some(cell) if cell.is_empty() => {
                *cell = Cell::Occupied(symbol);
                true
            }
            _ => false,
        }
    }

    /// Reset a cell to empty. Only the search uses this, to undo placements.
    pub(crate) fn clear(&mut self, (row, col): Coord) {
        self.cells[row][col] = Cell::Empty;
    }

    /// Empty cells in row-major order.
    pub fn empty_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..BOARD_SIZE)
            .flat_map(|row| (0..BOARD_SIZE).map(move |col| (row, col)))
            .filter(|&(row, col)| self.cells[row][col].is_empty())
    }

    pub fn is_full(&self) -> bool {
        self.empty_cells().next().is_none()
    }

    pub fn is_empty(&self) -> bool {
        self.occupied_count() == 0
    }

    pub fn occupied_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| !cell.is_empty())
            .count()
    }

    /// Number of cells holding `symbol`.
    pub fn count(&self, symbol: Symbol) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&cell| cell == Cell::Occupied(symbol))
            .count()
    }

    /// Whether `symbol` fills any row, column or diagonal.
    pub fn has_line(&self, symbol: Symbol) -> bool {
        let target = Cell::Occupied(symbol);
        LINES
            .iter()
            .any(|line| line.iter().all(|&(row, col)| self.cells[row][col] == target))
    }

    /// The symbol owning a complete line, if any.
    pub fn winner(&self) -> Option<Symbol> {
        [Symbol::X, Symbol::O]
            .into_iter()
            .find(|&symbol| self.has_line(symbol))
    }

    /// Full board with no line.
    pub fn is_draw(&self) -> bool {
        self.winner().is_none() && self.is_full()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for cell in row {
                let glyph = match cell {
                    Cell::Empty => EMPTY_GLYPH,
                    Cell::Occupied(symbol) => symbol.marker(),
                };
                write!(f, "{CELL_DIVIDER}{glyph}")?;
            }
            writeln!(f, "{CELL_DIVIDER}")?;
        }
        Ok(())
    }
}
