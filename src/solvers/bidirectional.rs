use super::{Searcher, StepOutcome, VisitedMap};
use crate::collections::Queue;
use crate::maze::{Cell, Maze, neighbors};

/// Breadth-first search growing from both ends at once.
///
/// Both frontiers share one queue and one visited map. Layers reached from the start
/// are positive, layers reached from the finish are negative. The search stops as soon
/// as a cell from one side touches a cell stamped by the other.
///
/// It usually finishes in fewer ticks than [`BreadthFirst`](super::BreadthFirst), but
/// because both frontiers share a queue this is not guaranteed on every maze.
pub struct BidirectionalBfs {
    queue: Queue<Cell>,
    visited: VisitedMap,
    path: Vec<Cell>,
    /// Set up front when start and finish are the same cell
    trivial: Option<Cell>,
}

impl BidirectionalBfs {
    pub(crate) fn new(start: Cell, finish: Cell, maze: &Maze) -> Self {
        let mut visited = VisitedMap::new(maze.rows(), maze.cols());
        let mut queue = Queue::new();
        let trivial = (start == finish).then_some(start);
        if trivial.is_none() {
            visited.stamp(start, 1);
            visited.stamp(finish, -1);
            queue.enqueue(start);
            queue.enqueue(finish);
        }
        BidirectionalBfs {
            queue,
            visited,
            path: Vec::new(),
            trivial,
        }
    }

    /// Joins the two half paths at the touching pair `(a, b)` into one start-to-finish path.
    fn join(&self, a: Cell, b: Cell) -> Vec<Cell> {
        let (forward, backward) = if self.visited.get(a) > 0 { (a, b) } else { (b, a) };
        let mut path = self.visited.trace_path(forward);
        path.reverse();
        path.extend(self.visited.trace_path(backward));
        path
    }
}

impl Searcher for BidirectionalBfs {
    fn step(&mut self, maze: &Maze) -> StepOutcome {
        if let Some(cell) = self.trivial {
            self.path = vec![cell];
            return StepOutcome::Found(cell);
        }
        let Some(cell) = self.queue.dequeue() else {
            return StepOutcome::Exhausted;
        };

        let layer = self.visited.get(cell);
        let direction = layer.signum();
        for next in neighbors(cell) {
            let other = self.visited.get(next);
            if other != 0 && other.signum() != direction {
                self.queue.clear();
                self.path = self.join(cell, next);
                tracing::debug!(
                    "[bidirectional] frontiers met at {:?}, path of {} cells",
                    next,
                    self.path.len()
                );
                return StepOutcome::Found(next);
            }
            if other == 0 && maze.is_passable(next) {
                self.visited.stamp(next, layer + direction);
                self.queue.enqueue(next);
            }
        }

        if self.queue.is_empty() {
            tracing::debug!("[bidirectional] both frontiers exhausted");
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

#[cfg(test)]
mod tests {
    use super::*;

    fn run(maze: &Maze, start: Cell, finish: Cell) -> (BidirectionalBfs, StepOutcome, usize) {
        let mut search = BidirectionalBfs::new(start, finish, maze);
        let mut ticks = 0;
        loop {
            ticks += 1;
            let outcome = search.step(maze);
            if outcome != StepOutcome::Continuing {
                return (search, outcome, ticks);
            }
        }
    }

    #[test]
    fn test_frontiers_meet_in_corridor() {
        let maze = Maze::from_ascii(&["#######", "#S...F#", "#######"]);
        let (search, outcome, ticks) = run(&maze, (1, 1), (1, 5));
        assert_eq!(outcome, StepOutcome::Found((1, 3)));
        assert_eq!(ticks, 4);
        assert_eq!(
            search.current_path(),
            &[(1, 1), (1, 2), (1, 3), (1, 4), (1, 5)]
        );
        assert_eq!(search.visited().get((1, 4)), -2);
        assert_eq!(search.visited().get((1, 3)), 3);
    }

    #[test]
    fn test_adjacent_objectives() {
        let maze = Maze::from_ascii(&["####", "#SF#", "####"]);
        let (search, outcome, ticks) = run(&maze, (1, 1), (1, 2));
        assert_eq!(outcome, StepOutcome::Found((1, 2)));
        assert_eq!(ticks, 1);
        assert_eq!(search.current_path(), &[(1, 1), (1, 2)]);
    }

    #[test]
    fn test_same_start_and_finish() {
        let maze = Maze::from_ascii(&["#####", "#.F.#", "#####"]);
        let (search, outcome, ticks) = run(&maze, (1, 2), (1, 2));
        assert_eq!(outcome, StepOutcome::Found((1, 2)));
        assert_eq!(ticks, 1);
        assert_eq!(search.current_path(), &[(1, 2)]);
    }

    #[test]
    fn test_exhausted_when_disconnected() {
        let maze = Maze::from_ascii(&["#######", "#S.#.F#", "#######"]);
        let (search, outcome, _) = run(&maze, (1, 1), (1, 5));
        assert_eq!(outcome, StepOutcome::Exhausted);
        assert!(search.current_path().is_empty());
        assert_eq!(search.visited().get((1, 4)), -2);
    }
}
