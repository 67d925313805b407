use crate::maze::{Cell, Grid, neighbors};

/// Per-run visitation record, parallel to the maze grid.
///
/// `0` means unvisited. Any other value is a search-order stamp: a BFS layer, a DFS
/// visit counter, or a greedy step count. Bidirectional search stamps cells reached
/// from the finish with negative values.
#[derive(Debug, Clone, PartialEq)]
pub struct VisitedMap {
    grid: Grid<i32>,
}

impl VisitedMap {
    pub fn new(rows: usize, cols: usize) -> Self {
        VisitedMap {
            grid: Grid::new(rows, cols, 0),
        }
    }

    /// The stamp at `cell`. Cells outside the grid read as unvisited.
    pub fn get(&self, cell: Cell) -> i32 {
        self.grid.get(cell).unwrap_or(0)
    }

    pub fn is_visited(&self, cell: Cell) -> bool {
        self.get(cell) != 0
    }

    pub(crate) fn stamp(&mut self, cell: Cell, value: i32) {
        self.grid[cell] = value;
    }

    pub fn grid(&self) -> &Grid<i32> {
        &self.grid
    }

    pub fn count_visited(&self) -> usize {
        self.grid.values().iter().filter(|&&v| v != 0).count()
    }

    /// One step of path reconstruction: the neighbor carrying a stamp of the same sign
    /// with the smallest magnitude strictly below that of `cell`.
    ///
    /// Returns `None` when no neighbor improves on `cell`, which happens at a seed.
    pub fn trace_back(&self, cell: Cell) -> Option<Cell> {
        let current = self.get(cell);
        if current == 0 {
            return None;
        }
        let mut best: Option<(Cell, i32)> = None;
        for n in neighbors(cell) {
            let value = self.get(n);
            if value.signum() != current.signum() || value.abs() >= current.abs() {
                continue;
            }
            if best.is_none_or(|(_, b)| value.abs() < b.abs()) {
                best = Some((n, value));
            }
        }
        best.map(|(n, _)| n)
    }

    /// Walks backward from `from` until no step improves, returning every cell visited
    /// along the way, starting with `from`.
    pub fn trace_path(&self, from: Cell) -> Vec<Cell> {
        let mut path = vec![from];
        let mut current = from;
        while let Some(next) = self.trace_back(current) {
            path.push(next);
            current = next;
        }
        path
    }
}
