use std::fmt;

use super::Player;
use crate::error::GameError;

/// Smallest number of rows or columns a board may have.
pub const MIN_DIMENSION: usize = 4;

/// Number of aligned discs needed to win.
pub const WIN_LENGTH: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Occupied(Player),
}

impl Cell {
    /// Player owning this cell, if any
    pub fn player(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(player) => Some(player),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    /// Glyph used in the textual board: `_` or the player's glyph
    pub fn glyph(self) -> char {
        match self {
            Cell::Empty => '_',
            Cell::Occupied(player) => player.glyph(),
        }
    }
}

/// Gravity-fed grid. Row 0 is the bottom row, discs stack upward from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    columns: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board, rejecting anything smaller than 4x4
    pub fn new(rows: usize, columns: usize) -> Result<Self, GameError> {
        if rows < MIN_DIMENSION || columns < MIN_DIMENSION {
            return Err(GameError::Configuration { rows, columns });
        }
        Ok(Board {
            rows,
            columns,
            cells: vec![Cell::Empty; rows * columns],
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Get the cell at a specific position
    /// Row 0 is the bottom, row `rows - 1` is the top
    pub fn get(&self, row: usize, col: usize) -> Cell {
        assert!(
            row < self.rows && col < self.columns,
            "cell ({row}, {col}) outside {}x{} board",
            self.rows,
            self.columns
        );
        self.cells[row * self.columns + col]
    }

    fn set(&mut self, row: usize, col: usize, cell: Cell) {
        self.cells[row * self.columns + col] = cell;
    }

    /// Number of discs stacked in a column
    pub fn column_height(&self, col: usize) -> usize {
        (0..self.rows)
            .take_while(|&row| !self.get(row, col).is_empty())
            .count()
    }

    /// Check if a column is full
    pub fn is_column_full(&self, col: usize) -> bool {
        if col >= self.columns {
            return true;
        }
        !self.get(self.rows - 1, col).is_empty()
    }

    /// Drop a piece in a column, returns the row where it landed
    pub fn drop_piece(&mut self, col: usize, player: Player) -> Result<usize, GameError> {
        if col >= self.columns {
            return Err(GameError::InvalidColumn {
                column: col as isize,
                columns: self.columns,
            });
        }

        if self.is_column_full(col) {
            return Err(GameError::ColumnFull { column: col });
        }

        let row = self.column_height(col);
        self.set(row, col, Cell::Occupied(player));
        Ok(row)
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    /// Number of occupied cells
    pub fn disc_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }

    /// Empty every cell, keeping the dimensions
    pub fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    /// Scan the whole board for any four-in-a-row, returning its owner
    pub fn find_winner(&self) -> Option<Player> {
        self.check_horizontal()
            .or_else(|| self.check_vertical())
            .or_else(|| self.check_diagonals())
    }

    /// The four cells starting at (row, col) and stepping by (d_row, d_col)
    /// all belong to the same player
    fn line_owner(&self, row: usize, col: usize, d_row: isize, d_col: isize) -> Option<Player> {
        let owner = self.get(row, col).player()?;
        let all_same = (1..WIN_LENGTH as isize).all(|k| {
            let r = (row as isize + d_row * k) as usize;
            let c = (col as isize + d_col * k) as usize;
            self.get(r, c) == Cell::Occupied(owner)
        });
        all_same.then_some(owner)
    }

    fn check_horizontal(&self) -> Option<Player> {
        for row in 0..self.rows {
            for col in 0..=self.columns - WIN_LENGTH {
                if let Some(player) = self.line_owner(row, col, 0, 1) {
                    return Some(player);
                }
            }
        }
        None
    }

    fn check_vertical(&self) -> Option<Player> {
        for row in 0..=self.rows - WIN_LENGTH {
            for col in 0..self.columns {
                if let Some(player) = self.line_owner(row, col, 1, 0) {
                    return Some(player);
                }
            }
        }
        None
    }

    /// Both diagonals of every 4x4 window: (i, j)..(i+3, j+3) and (i, j+3)..(i+3, j)
    fn check_diagonals(&self) -> Option<Player> {
        let last = WIN_LENGTH - 1;
        for row in 0..=self.rows - WIN_LENGTH {
            for col in 0..=self.columns - WIN_LENGTH {
                let found = self
                    .line_owner(row, col, 1, 1)
                    .or_else(|| self.line_owner(row, col + last, 1, -1));
                if found.is_some() {
                    return found;
                }
            }
        }
        None
    }
}

impl fmt::Display for Board {
    /// One line per row starting at row 0, cells separated by a single space
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            for col in 0..self.columns {
                if col > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{}", self.get(row, col).glyph())?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}
