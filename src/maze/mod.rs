pub mod cell;
pub mod grid;

pub use cell::CellState;
pub use grid::Grid;

use crate::error::{MazeError, Result};

/// A `(row, col)` grid coordinate.
pub type Cell = (usize, usize);

/// Rectangular maze whose outer ring is always [`CellState::BorderWall`].
#[derive(Debug, Clone, PartialEq)]
pub struct Maze {
    grid: Grid<CellState>,
}

impl Maze {
    /// Creates a maze with border walls on the outer ring and unvisited walls inside.
    ///
    /// Fails with [`MazeError::InvalidDimensions`] before allocating when either
    /// dimension is 1 or less.
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        if rows <= 1 || cols <= 1 {
            return Err(MazeError::InvalidDimensions { rows, cols });
        }
        let mut grid = Grid::new(rows, cols, CellState::UnvisitedWall);
        for cell in grid.cells() {
            if grid.is_boundary(cell) {
                grid[cell] = CellState::BorderWall;
            }
        }
        Ok(Maze { grid })
    }

    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    pub fn grid(&self) -> &Grid<CellState> {
        &self.grid
    }

    pub fn is_in_bounds(&self, cell: Cell) -> bool {
        self.grid.in_bounds(cell)
    }

    /// Whether the cell lies inside the border ring.
    pub fn is_interior(&self, cell: Cell) -> bool {
        self.is_in_bounds(cell) && !self.grid.is_boundary(cell)
    }

    /// Returns the state at `cell`, or `None` outside the grid.
    pub fn cell(&self, cell: Cell) -> Option<CellState> {
        self.grid.get(cell)
    }

    /// Whether `cell` is inside the grid and currently in `state`.
    /// Out-of-bounds cells match no state.
    pub fn is_cell(&self, cell: Cell, state: CellState) -> bool {
        self.cell(cell) == Some(state)
    }

    /// Whether `cell` is a path, start or finish cell.
    pub fn is_passable(&self, cell: Cell) -> bool {
        self.cell(cell).is_some_and(CellState::is_passable)
    }

    pub fn set(&mut self, cell: Cell, state: CellState) -> Result<()> {
        self.grid.set(cell, state)
    }

    /// Iterates over all cells currently in `state`, in row-major order.
    pub fn cells_in_state(&self, state: CellState) -> impl Iterator<Item = Cell> + '_ {
        self.grid.cells().filter(move |&c| self.grid[c] == state)
    }

    pub fn count(&self, state: CellState) -> usize {
        self.grid.values().iter().filter(|&&s| s == state).count()
    }

    /// Builds a maze from a character map: `#` wall, `.` path, `S` start, `F` finish.
    #[cfg(test)]
    pub(crate) fn from_ascii(lines: &[&str]) -> Self {
        let rows = lines.len();
        let cols = lines[0].chars().count();
        let mut maze = Maze::new(rows, cols).expect("ascii maze must be at least 2x2");
        for (row, line) in lines.iter().enumerate() {
            for (col, ch) in line.chars().enumerate() {
                let cell = (row, col);
                let state = match ch {
                    '#' if maze.grid.is_boundary(cell) => CellState::BorderWall,
                    '#' => CellState::InnerWall,
                    '.' => CellState::Path,
                    'S' => CellState::Start,
                    'F' => CellState::Finish,
                    other => panic!("unexpected maze character {:?}", other),
                };
                maze.grid[cell] = state;
            }
        }
        maze
    }
}

impl std::ops::Index<Cell> for Maze {
    type Output = CellState;

    fn index(&self, cell: Cell) -> &Self::Output {
        &self.grid[cell]
    }
}

/// Moves `cell` by a signed offset. Stepping off the top or left edge wraps to a
/// coordinate that is out of bounds for every grid, so callers only need a bounds check.
pub fn offset(cell: Cell, d_row: isize, d_col: isize) -> Cell {
    (
        cell.0.wrapping_add_signed(d_row),
        cell.1.wrapping_add_signed(d_col),
    )
}

/// The four orthogonal neighbors, in the order up, left, down, right.
pub fn neighbors(cell: Cell) -> [Cell; 4] {
    [
        offset(cell, -1, 0),
        offset(cell, 0, -1),
        offset(cell, 1, 0),
        offset(cell, 0, 1),
    ]
}

/// The four diagonal neighbors, in the order up-left, up-right, down-left, down-right.
pub fn diagonals(cell: Cell) -> [Cell; 4] {
    [
        offset(cell, -1, -1),
        offset(cell, -1, 1),
        offset(cell, 1, -1),
        offset(cell, 1, 1),
    ]
}

/// All eight cells around `cell`: orthogonal neighbors first, then diagonals.
pub fn surrounding(cell: Cell) -> [Cell; 8] {
    let [a, b, c, d] = neighbors(cell);
    let [e, f, g, h] = diagonals(cell);
    [a, b, c, d, e, f, g, h]
}
