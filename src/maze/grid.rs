use super::Cell;
use crate::error::{MazeError, Result};

/// Row-major matrix addressed by `(row, col)` cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    data: Box<[T]>,
    rows: usize,
    cols: usize,
}

impl<T: Copy> Grid<T> {
    pub fn new(rows: usize, cols: usize, value: T) -> Self {
        let data = vec![value; rows * cols].into_boxed_slice();
        Grid { data, rows, cols }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.0 < self.rows && cell.1 < self.cols
    }

    pub fn is_boundary(&self, cell: Cell) -> bool {
        cell.0 == 0 || cell.1 == 0 || cell.0 == self.rows - 1 || cell.1 == self.cols - 1
    }

    fn ravel_index(&self, cell: Cell) -> usize {
        cell.0 * self.cols + cell.1
    }

    /// Returns the value at `cell`, or `None` when the cell lies outside the grid.
    pub fn get(&self, cell: Cell) -> Option<T> {
        self.in_bounds(cell)
            .then(|| self.data[self.ravel_index(cell)])
    }

    pub fn set(&mut self, cell: Cell, value: T) -> Result<()> {
        if !self.in_bounds(cell) {
            return Err(MazeError::OutOfBounds {
                cell,
                rows: self.rows,
                cols: self.cols,
            });
        }
        let idx = self.ravel_index(cell);
        self.data[idx] = value;
        Ok(())
    }

    pub fn fill(&mut self, value: T) {
        self.data.iter_mut().for_each(|v| *v = value);
    }

    /// Iterates over every cell coordinate in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + use<T> {
        let (rows, cols) = (self.rows, self.cols);
        (0..rows).flat_map(move |row| (0..cols).map(move |col| (row, col)))
    }

    pub fn values(&self) -> &[T] {
        &self.data
    }
}

impl<T: Copy> std::ops::Index<Cell> for Grid<T> {
    type Output = T;

    fn index(&self, cell: Cell) -> &Self::Output {
        assert!(self.in_bounds(cell), "cell {:?} out of bounds", cell);
        &self.data[self.ravel_index(cell)]
    }
}

impl<T: Copy> std::ops::IndexMut<Cell> for Grid<T> {
    fn index_mut(&mut self, cell: Cell) -> &mut Self::Output {
        assert!(self.in_bounds(cell), "cell {:?} out of bounds", cell);
        let idx = self.ravel_index(cell);
        &mut self.data[idx]
    }
}
