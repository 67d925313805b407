use super::{Heuristic, Searcher, StepOutcome, VisitedMap, get_moves};
use crate::collections::{Comparator, PriorityQueue};
use crate::maze::{Cell, Maze};

/// Orders cells so that the one closest to `goal` by `heuristic` comes out first.
pub struct CloserTo {
    goal: Cell,
    heuristic: Heuristic,
}

impl Comparator<Cell> for CloserTo {
    fn outranks(&self, a: &Cell, b: &Cell) -> bool {
        self.heuristic.distance(*a, self.goal) < self.heuristic.distance(*b, self.goal)
    }
}

/// Greedy best-first search: always expands the frontier cell that looks closest to
/// the finish, ignoring how far it is from the start. Paths are not necessarily shortest.
pub struct GreedyBestFirst {
    finish: Cell,
    frontier: PriorityQueue<Cell, CloserTo>,
    /// Stamps count expansion steps, not path cost
    visited: VisitedMap,
    path: Vec<Cell>,
}

impl GreedyBestFirst {
    pub(crate) fn new(start: Cell, finish: Cell, maze: &Maze, heuristic: Heuristic) -> Self {
        let mut visited = VisitedMap::new(maze.rows(), maze.cols());
        visited.stamp(start, 1);
        let mut frontier = PriorityQueue::new(CloserTo {
            goal: finish,
            heuristic,
        });
        frontier.push(start);
        GreedyBestFirst {
            finish,
            frontier,
            visited,
            path: Vec::new(),
        }
    }
}

impl Searcher for GreedyBestFirst {
    fn step(&mut self, maze: &Maze) -> StepOutcome {
        let Some(cell) = self.frontier.pop() else {
            return StepOutcome::Exhausted;
        };
        if cell == self.finish {
            self.frontier.clear();
            self.path = self.visited.trace_path(cell);
            self.path.reverse();
            tracing::debug!(
                "[greedy] reached finish {:?}, path of {} cells",
                cell,
                self.path.len()
            );
            return StepOutcome::Found(cell);
        }

        let steps = self.visited.get(cell) + 1;
        for next in get_moves(cell, maze, &self.visited) {
            self.visited.stamp(next, steps);
            self.frontier.push(next);
        }

        if self.frontier.is_empty() {
            tracing::debug!("[greedy] frontier exhausted");
            return StepOutcome::Exhausted;
        }
        StepOutcome::Continuing
    }

    fn current_path(&self) -> &[Cell] {
        &self.path
    }

    fn visited(&self) -> &VisitedMap {
        &self.visited
    }
}
