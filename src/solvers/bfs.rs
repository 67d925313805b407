use super::{Searcher, StepOutcome, VisitedMap, get_moves};
use crate::collections::Queue;
use crate::maze::{Cell, Maze};

/// Layered breadth-first flood fill from the start cell.
pub struct BreadthFirst {
    finish: Cell,
    queue: Queue<Cell>,
    visited: VisitedMap,
    path: Vec<Cell>,
}

impl BreadthFirst {
    pub(crate) fn new(start: Cell, finish: Cell, maze: &Maze) -> Self {
        let mut visited = VisitedMap::new(maze.rows(), maze.cols());
        visited.stamp(start, 1);
        let mut queue = Queue::new();
        queue.enqueue(start);
        BreadthFirst {
            finish,
            queue,
            visited,
            path: Vec::new(),
        }
    }
}

impl Searcher for BreadthFirst {
    fn step(&mut self, maze: &Maze) -> StepOutcome {
        let Some(cell) = self.queue.dequeue() else {
            return StepOutcome::Exhausted;
        };
        if cell == self.finish {
            self.queue.clear();
            self.path = self.visited.trace_path(cell);
            self.path.reverse();
            tracing::debug!(
                "[bfs] reached finish {:?} at layer {}",
                cell,
                self.visited.get(cell)
            );
            return StepOutcome::Found(cell);
        }

        let layer = self.visited.get(cell) + 1;
        for next in get_moves(cell, maze, &self.visited) {
            self.visited.stamp(next, layer);
            self.queue.enqueue(next);
        }

        if self.queue.is_empty() {
            tracing::debug!("[bfs] frontier exhausted at layer {}", layer - 1);
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
