use rand::Rng;

use super::random_interior_cell;
use crate::error::{MazeError, Result};
use crate::maze::{Cell, CellState, Maze};

/// Rejection-samples interior cells until one is a plain path cell.
fn random_path_cell<R: Rng + ?Sized>(maze: &Maze, rng: &mut R) -> Result<Cell> {
    if maze.count(CellState::Path) == 0 {
        return Err(MazeError::NoPathCells);
    }
    loop {
        let cell = random_interior_cell(maze, rng).ok_or(MazeError::NoPathCells)?;
        if maze.is_cell(cell, CellState::Path) {
            return Ok(cell);
        }
    }
}

/// Picks a start and a finish cell among the path cells and marks them on the maze.
///
/// Both cells are sampled independently before either is marked, so they coincide with
/// probability `1 / path_cells`. When they do, the cell ends up marked as the finish.
pub fn place_objectives<R: Rng + ?Sized>(maze: &mut Maze, rng: &mut R) -> Result<(Cell, Cell)> {
    let start = random_path_cell(maze, rng)?;
    let finish = random_path_cell(maze, rng)?;
    maze.set(start, CellState::Start)?;
    maze.set(finish, CellState::Finish)?;

    if start == finish {
        tracing::warn!("[objectives] start and finish coincide at {:?}", start);
    } else {
        tracing::info!("[objectives] start {:?}, finish {:?}", start, finish);
    }
    Ok((start, finish))
}
