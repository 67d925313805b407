use rand::{Rng, SeedableRng, rngs::StdRng};

mod objectives;
mod prim;

pub use objectives::place_objectives;
pub use prim::is_valid_path;
use prim::spaced_prim;

use crate::error::{MazeError, Result};
use crate::maze::{Cell, Maze};

/// Get a random number generator, optionally seeded for reproducibility.
pub fn get_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

/// Uniformly random cell inside the border ring, or `None` when the maze has no interior.
pub fn random_interior_cell<R: Rng + ?Sized>(maze: &Maze, rng: &mut R) -> Option<Cell> {
    if maze.rows() < 3 || maze.cols() < 3 {
        return None;
    }
    Some((
        rng.random_range(1..maze.rows() - 1),
        rng.random_range(1..maze.cols() - 1),
    ))
}

/// Generates a maze grown from a uniformly random interior seed.
///
/// Fails with [`MazeError::InvalidDimensions`] when either dimension is 1 or less.
/// A maze two cells wide or tall has no interior and is returned as border walls only.
pub fn generate_maze<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Result<Maze> {
    let maze = Maze::new(rows, cols)?;
    match random_interior_cell(&maze, rng) {
        Some(seed) => grow(maze, seed, rng),
        None => {
            tracing::debug!("[generator] {}x{} maze has no interior", rows, cols);
            Ok(maze)
        }
    }
}

/// Generates a maze grown from the given interior `seed` cell.
pub fn generate_maze_from<R: Rng + ?Sized>(
    rows: usize,
    cols: usize,
    seed: Cell,
    rng: &mut R,
) -> Result<Maze> {
    let maze = Maze::new(rows, cols)?;
    if !maze.is_interior(seed) {
        return Err(MazeError::OutOfBounds {
            cell: seed,
            rows,
            cols,
        });
    }
    grow(maze, seed, rng)
}

fn grow<R: Rng + ?Sized>(mut maze: Maze, seed: Cell, rng: &mut R) -> Result<Maze> {
    spaced_prim(&mut maze, seed, rng)?;
    tracing::debug!(
        "[generator] {}x{} maze grown from {:?} with {} path cells",
        maze.rows(),
        maze.cols(),
        seed,
        maze.count(crate::maze::CellState::Path)
    );
    Ok(maze)
}
