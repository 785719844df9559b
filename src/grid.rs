//! 2D cell-grid representation for tray packing puzzles.
//!
//! A [`Grid`] is an immutable rectangular mask of `u8` cells. Piece shapes
//! and board occupancy both use binary cells (0 = empty, 1 = filled).
//! [`geometry::overlay`](crate::geometry::overlay) may produce a transient
//! cell value of 2 to flag a collision; such grids are never stored in a
//! committed puzzle state.

use std::fmt;

/// Errors raised while constructing or combining grids.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GridError {
    /// The grid has no rows, no columns, or (for piece shapes) no filled cell.
    #[display("grid has no filled cells")]
    EmptyShape,
    /// A cell held something other than 0 or 1.
    #[display("cell ({row}, {col}) holds {value}, expected 0 or 1")]
    NonBinaryCell { row: usize, col: usize, value: u8 },
    /// Text rows of differing widths.
    #[display("row {row} has {len} cells, expected {expected}")]
    UnevenRows {
        row: usize,
        len: usize,
        expected: usize,
    },
    /// An unrecognized character in a grid drawing.
    #[display("unrecognized cell symbol {symbol:?} at ({row}, {col})")]
    UnknownSymbol { row: usize, col: usize, symbol: char },
    /// A smaller grid placed at an offset would overhang the target grid.
    #[display(
        "a {height}x{width} grid does not fit at ({row}, {col}) inside a {target_height}x{target_width} grid"
    )]
    OutOfBounds {
        height: usize,
        width: usize,
        row: usize,
        col: usize,
        target_height: usize,
        target_width: usize,
    },
}

/// An immutable rectangular grid of cells.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    height: usize,
    width: usize,
    cells: Vec<u8>,
}

impl Grid {
    /// Builds a grid from rows of cell values, checking shape and binary cells.
    pub fn from_rows(rows: &[Vec<u8>]) -> Result<Self, GridError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if height == 0 || width == 0 {
            return Err(GridError::EmptyShape);
        }
        let mut cells = Vec::with_capacity(height * width);
        for (row, values) in rows.iter().enumerate() {
            if values.len() != width {
                return Err(GridError::UnevenRows {
                    row,
                    len: values.len(),
                    expected: width,
                });
            }
            for (col, &value) in values.iter().enumerate() {
                if value > 1 {
                    return Err(GridError::NonBinaryCell { row, col, value });
                }
                cells.push(value);
            }
        }
        Ok(Self {
            height,
            width,
            cells,
        })
    }

    /// Parses a grid drawing: `X`, `#` or `1` for filled, `.` or `0` for empty.
    ///
    /// Surrounding whitespace and blank lines are ignored so drawings can be
    /// written with raw string literals.
    pub fn parse(text: &str) -> Result<Self, GridError> {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let mut rows = Vec::with_capacity(lines.len());
        for (row, line) in lines.iter().enumerate() {
            let mut values = Vec::with_capacity(line.len());
            for (col, symbol) in line.chars().enumerate() {
                match symbol {
                    'X' | '#' | '1' => values.push(1),
                    '.' | '0' => values.push(0),
                    _ => return Err(GridError::UnknownSymbol { row, col, symbol }),
                }
            }
            rows.push(values);
        }
        Self::from_rows(&rows)
    }

    /// A grid with every cell set to 1.
    pub fn filled(height: usize, width: usize) -> Self {
        Self {
            height,
            width,
            cells: vec![1; height * width],
        }
    }

    /// Builds a grid from pre-validated parts. Callers guarantee
    /// `cells.len() == height * width`.
    pub(crate) fn from_raw(height: usize, width: usize, cells: Vec<u8>) -> Self {
        debug_assert_eq!(cells.len(), height * width);
        Self {
            height,
            width,
            cells,
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Cell value at `(row, col)`. Panics if out of range.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.cells[row * self.width + col]
    }

    /// Raw cells in row-major order.
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// True when every cell is 0 or 1.
    pub fn is_binary(&self) -> bool {
        self.cells.iter().all(|&cell| cell <= 1)
    }

    /// Number of nonzero cells.
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell != 0).count()
    }

    /// Coordinates of every empty cell, scanning row-major.
    pub fn holes(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == 0)
            .map(|(index, _)| (index / self.width, index % self.width))
            .collect()
    }

    /// Row-major first filled cell, or `None` for an all-empty grid.
    pub fn first_filled(&self) -> Option<(usize, usize)> {
        self.cells
            .iter()
            .position(|&cell| cell != 0)
            .map(|index| (index / self.width, index % self.width))
    }

    /// Renders the grid with `X` for filled and `.` for empty cells.
    pub fn render(&self) -> String {
        let mut output = String::with_capacity(self.height * (self.width + 1));
        for row in 0..self.height {
            for col in 0..self.width {
                output.push(if self.get(row, col) == 0 { '.' } else { 'X' });
            }
            output.push('\n');
        }
        output
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
