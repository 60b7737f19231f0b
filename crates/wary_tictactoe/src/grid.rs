//! Square matrix of signed cell values.
//!
//! Rows and columns are 1-indexed. Every accessor checks both indices and
//! reports [`GridError::IndexOutOfRange`] instead of clamping or wrapping.

use tracing::instrument;

/// Separator placed between cells in [`Grid::serialize`].
const CELL_SEPARATOR: char = ',';

/// Errors raised by grid construction and access.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GridError {
    /// A row or column index fell outside `1..=size`.
    #[display("Index {index} is outside 1..={size}")]
    IndexOutOfRange {
        /// The offending 1-based index.
        index: usize,
        /// The grid size.
        size: usize,
    },
    /// A grid must have at least one row and column.
    #[display("Grid size must be at least 1")]
    ZeroSize,
    /// `size × size` cells do not fit in memory addressing.
    #[display("Grid size {size} is too large")]
    TooLarge {
        /// The requested size.
        size: usize,
    },
}

/// N×N grid of `i32` cells, initialized to zero.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    size: usize,
    /// Cells in row-major order.
    cells: Vec<i32>,
}

impl Grid {
    /// Creates an all-zero grid of the given size.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::ZeroSize`] when `size` is zero, and
    /// [`GridError::TooLarge`] when `size × size` overflows `usize`.
    #[instrument]
    pub fn new(size: usize) -> Result<Self, GridError> {
        if size == 0 {
            return Err(GridError::ZeroSize);
        }
        let len = size
            .checked_mul(size)
            .ok_or(GridError::TooLarge { size })?;
        Ok(Self {
            size,
            cells: vec![0; len],
        })
    }

    /// Returns the number of rows (and columns).
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the cells in row-major order.
    pub fn cells(&self) -> &[i32] {
        &self.cells
    }

    fn check(&self, index: usize) -> Result<usize, GridError> {
        if (1..=self.size).contains(&index) {
            Ok(index - 1)
        } else {
            Err(GridError::IndexOutOfRange {
                index,
                size: self.size,
            })
        }
    }

    fn offset(&self, row: usize, col: usize) -> Result<usize, GridError> {
        let row = self.check(row)?;
        let col = self.check(col)?;
        Ok(row * self.size + col)
    }

    /// Returns the value at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> Result<i32, GridError> {
        Ok(self.cells[self.offset(row, col)?])
    }

    /// Writes `value` at `(row, col)`.
    pub fn set(&mut self, row: usize, col: usize, value: i32) -> Result<(), GridError> {
        let offset = self.offset(row, col)?;
        self.cells[offset] = value;
        Ok(())
    }

    fn row_total(&self, row: usize) -> i32 {
        let start = row * self.size;
        self.cells[start..start + self.size].iter().sum()
    }

    fn col_total(&self, col: usize) -> i32 {
        self.cells.iter().skip(col).step_by(self.size).sum()
    }

    /// Sum of the given row.
    pub fn row_sum(&self, row: usize) -> Result<i32, GridError> {
        Ok(self.row_total(self.check(row)?))
    }

    /// Sum of the given column.
    pub fn col_sum(&self, col: usize) -> Result<i32, GridError> {
        Ok(self.col_total(self.check(col)?))
    }

    /// Sum of the top-left to bottom-right diagonal.
    pub fn main_diagonal_sum(&self) -> i32 {
        (0..self.size).map(|i| self.cells[i * self.size + i]).sum()
    }

    /// Sum of the top-right to bottom-left diagonal.
    pub fn anti_diagonal_sum(&self) -> i32 {
        (0..self.size)
            .map(|i| self.cells[i * self.size + (self.size - 1 - i)])
            .sum()
    }

    /// Sums of every full line: row 1, column 1, row 2, column 2, ...,
    /// then the main diagonal and the anti-diagonal.
    pub fn line_sums(&self) -> Vec<i32> {
        let mut sums = Vec::with_capacity(2 * self.size + 2);
        for i in 0..self.size {
            sums.push(self.row_total(i));
            sums.push(self.col_total(i));
        }
        sums.push(self.main_diagonal_sum());
        sums.push(self.anti_diagonal_sum());
        sums
    }

    /// Rotates the grid 90° clockwise in place.
    pub fn rotate_clockwise(&mut self) {
        let n = self.size;
        let old = self.cells.clone();
        for row in 0..n {
            for col in 0..n {
                self.cells[row * n + col] = old[(n - 1 - col) * n + row];
            }
        }
    }

    /// Reverses every row in place (left-right mirror).
    pub fn mirror_horizontal(&mut self) {
        for row in self.cells.chunks_mut(self.size) {
            row.reverse();
        }
    }

    /// Reverses the order of the rows in place (top-bottom flip).
    pub fn flip_vertical(&mut self) {
        let n = self.size;
        for row in 0..n / 2 {
            let mirror = n - 1 - row;
            for col in 0..n {
                self.cells.swap(row * n + col, mirror * n + col);
            }
        }
    }

    /// Negates every cell in place, swapping the two sides of the board.
    ///
    /// Board cells only hold `-1`, `0` and `1`. Any other value is negated
    /// with wrapping, so `i32::MIN` maps to itself.
    pub fn negate(&mut self) {
        for cell in &mut self.cells {
            *cell = cell.wrapping_neg();
        }
    }

    /// Serializes the grid row-major as comma-separated signed values.
    ///
    /// Two grids of the same size serialize identically iff their cells are
    /// equal.
    pub fn serialize(&self) -> String {
        let mut out = String::with_capacity(self.cells.len() * 3);
        for (i, cell) in self.cells.iter().enumerate() {
            if i > 0 {
                out.push(CELL_SEPARATOR);
            }
            out.push_str(&cell.to_string());
        }
        out
    }
}
