use std::collections::HashSet;

use rand::{Rng, seq::SliceRandom};

use crate::error::Result;
use crate::maze::{Cell, CellState, Maze, diagonals, neighbors, surrounding};

/// Chance of growing from a uniformly random frontier cell instead of the newest one.
const BRANCH_PROBABILITY: f64 = 0.25;
/// A candidate is rejected once this many of its eight surrounding cells are paths.
const MAX_SURROUNDING_PATHS: usize = 3;

/// Candidate cells waiting to be carved, in insertion order.
#[derive(Default)]
struct Frontier {
    cells: Vec<Cell>,
    members: HashSet<Cell>,
}

impl Frontier {
    fn extend(&mut self, cells: impl IntoIterator<Item = Cell>) {
        for cell in cells {
            if self.members.insert(cell) {
                self.cells.push(cell);
            }
        }
    }

    /// Removes the next candidate. Most of the time this is the newest cell, which grows
    /// long corridors; otherwise a random cell is taken to branch off.
    fn take<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Cell> {
        if self.cells.is_empty() {
            return None;
        }
        let idx = if rng.random_bool(BRANCH_PROBABILITY) {
            rng.random_range(0..self.cells.len())
        } else {
            self.cells.len() - 1
        };
        // Order-preserving removal keeps "newest" meaningful
        let cell = self.cells.remove(idx);
        self.members.remove(&cell);
        Some(cell)
    }
}

/// Orthogonal neighbors of `cell` that the generator has not considered yet.
fn unvisited_walls(maze: &Maze, cell: Cell) -> Vec<Cell> {
    neighbors(cell)
        .into_iter()
        .filter(|&c| maze.is_cell(c, CellState::UnvisitedWall))
        .collect()
}

/// Rejects candidates that would only touch the maze diagonally or thicken a corridor:
/// when an orthogonal neighbor is a path, neither diagonal on the opposite side may be.
pub(crate) fn has_spacing(maze: &Maze, cell: Cell) -> bool {
    let is_path = |c: Cell| maze.is_cell(c, CellState::Path);
    let [up, left, down, right] = neighbors(cell);
    let [up_left, up_right, down_left, down_right] = diagonals(cell);

    let crowded = (is_path(up) && (is_path(down_left) || is_path(down_right)))
        || (is_path(down) && (is_path(up_left) || is_path(up_right)))
        || (is_path(left) && (is_path(up_right) || is_path(down_right)))
        || (is_path(right) && (is_path(up_left) || is_path(down_left)));
    !crowded
}

pub(crate) fn count_surrounding_paths(maze: &Maze, cell: Cell) -> usize {
    surrounding(cell)
        .into_iter()
        .filter(|&c| maze.is_cell(c, CellState::Path))
        .count()
}

/// Whether `cell` may become a path without breaking corridor spacing or local density.
pub fn is_valid_path(maze: &Maze, cell: Cell) -> bool {
    has_spacing(maze, cell) && count_surrounding_paths(maze, cell) < MAX_SURROUNDING_PATHS
}

/// Grows a maze from `seed` using a randomized Prim's variant with a spacing rule.
///
/// Every interior cell is considered at most once: it either becomes a path or is
/// permanently walled. Interior cells never reached by the frontier are walled at the end.
pub fn spaced_prim<R: Rng + ?Sized>(maze: &mut Maze, seed: Cell, rng: &mut R) -> Result<()> {
    maze.set(seed, CellState::Path)?;

    let mut frontier = Frontier::default();
    frontier.extend(unvisited_walls(maze, seed));

    while let Some(cell) = frontier.take(rng) {
        if is_valid_path(maze, cell) {
            maze.set(cell, CellState::Path)?;
            let mut walls = unvisited_walls(maze, cell);
            walls.shuffle(rng);
            frontier.extend(walls);
        } else {
            maze.set(cell, CellState::InnerWall)?;
        }
    }

    let unreached = maze
        .cells_in_state(CellState::UnvisitedWall)
        .collect::<Vec<_>>();
    if !unreached.is_empty() {
        tracing::trace!("[generator] walling {} unreached cells", unreached.len());
    }
    for cell in unreached {
        maze.set(cell, CellState::InnerWall)?;
    }
    Ok(())
}
