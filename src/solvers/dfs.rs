use rand::{Rng, rngs::StdRng};

use super::{PathSelection, Searcher, StepOutcome, VisitedMap, get_moves};
use crate::maze::{Cell, Maze};

/// Depth-first search with backtracking. The stack doubles as the current path.
pub struct DepthFirst {
    finish: Cell,
    stack: Vec<Cell>,
    visited: VisitedMap,
    selection: PathSelection,
    rng: StdRng,
    /// Number of cells stamped so far, used as the next visit order
    order: i32,
}

impl DepthFirst {
    pub(crate) fn new(
        start: Cell,
        finish: Cell,
        maze: &Maze,
        selection: PathSelection,
        rng: StdRng,
    ) -> Self {
        DepthFirst {
            finish,
            stack: vec![start],
            visited: VisitedMap::new(maze.rows(), maze.cols()),
            selection,
            rng,
            order: 0,
        }
    }
}

impl Searcher for DepthFirst {
    fn step(&mut self, maze: &Maze) -> StepOutcome {
        let Some(&cell) = self.stack.last() else {
            return StepOutcome::Exhausted;
        };
        if cell == self.finish {
            tracing::debug!("[dfs] reached finish {:?} at depth {}", cell, self.stack.len());
            return StepOutcome::Found(cell);
        }

        if !self.visited.is_visited(cell) {
            self.order += 1;
            self.visited.stamp(cell, self.order);
        }

        let moves = get_moves(cell, maze, &self.visited);
        if moves.is_empty() {
            // Dead end, backtrack
            self.stack.pop();
            if self.stack.is_empty() {
                tracing::debug!("[dfs] stack emptied after {} cells", self.order);
                return StepOutcome::Exhausted;
            }
        } else {
            let idx = match self.selection {
                PathSelection::Sequential => 0,
                PathSelection::Random => self.rng.random_range(0..moves.len()),
            };
            self.stack.push(moves[idx]);
        }
        StepOutcome::Continuing
    }

    fn current_path(&self) -> &[Cell] {
        &self.stack
    }

    fn visited(&self) -> &VisitedMap {
        &self.visited
    }
}
