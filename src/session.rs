use rand::rngs::StdRng;

use crate::error::Result;
use crate::generators::{generate_maze, get_rng, place_objectives};
use crate::maze::{Cell, CellState, Maze};
use crate::solvers::{SearchOptions, SearchState, Solver, StepOutcome, VisitedMap};

/// Everything one visualizer run needs: the RNG, the maze with its objectives, and the
/// search currently being stepped, if any.
pub struct Session {
    rng: StdRng,
    maze: Maze,
    objectives: (Cell, Cell),
    search: Option<SearchState>,
}

impl Session {
    /// Generates a `rows` x `cols` maze and places its objectives.
    ///
    /// With `seed` set, every maze and random choice in the session is reproducible.
    pub fn new(rows: usize, cols: usize, seed: Option<u64>) -> Result<Self> {
        let mut rng = get_rng(seed);
        let (maze, objectives) = Self::build(rows, cols, &mut rng)?;
        Ok(Session {
            rng,
            maze,
            objectives,
            search: None,
        })
    }

    fn build(rows: usize, cols: usize, rng: &mut StdRng) -> Result<(Maze, (Cell, Cell))> {
        let mut maze = generate_maze(rows, cols, rng)?;
        let objectives = place_objectives(&mut maze, rng)?;
        Ok((maze, objectives))
    }

    /// Replaces the maze with a fresh one of the same size. Any running search is dropped.
    pub fn regenerate(&mut self) -> Result<()> {
        let (maze, objectives) = Self::build(self.maze.rows(), self.maze.cols(), &mut self.rng)?;
        self.maze = maze;
        self.objectives = objectives;
        self.search = None;
        tracing::info!("[session] regenerated {}x{} maze", self.maze.rows(), self.maze.cols());
        Ok(())
    }

    /// Starts `solver` from scratch on the current maze, replacing any previous search.
    pub fn start_search(&mut self, solver: Solver, options: SearchOptions) -> Result<()> {
        let (start, finish) = self.objectives;
        let search = SearchState::new(solver, start, finish, &self.maze, options, &mut self.rng)?;
        self.search = Some(search);
        Ok(())
    }

    /// Restarts the current solver with the same options. Does nothing without a search.
    pub fn restart_search(&mut self) -> Result<()> {
        match &self.search {
            Some(search) => {
                let (solver, options) = (search.solver(), search.options());
                self.start_search(solver, options)
            }
            None => Ok(()),
        }
    }

    /// Advances the running search by one tick, or returns `None` when no search is running.
    pub fn step(&mut self) -> Option<StepOutcome> {
        let maze = &self.maze;
        self.search.as_mut().map(|search| search.step(maze))
    }

    pub fn current_path(&self) -> &[Cell] {
        self.search
            .as_ref()
            .map(|search| search.current_path())
            .unwrap_or(&[])
    }

    pub fn cell_state(&self, cell: Cell) -> Option<CellState> {
        self.maze.cell(cell)
    }

    pub fn visited(&self) -> Option<&VisitedMap> {
        self.search.as_ref().map(SearchState::visited)
    }

    /// The `(start, finish)` pair. Both are the same cell when placement coincided.
    pub fn objectives(&self) -> (Cell, Cell) {
        self.objectives
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn search(&self) -> Option<&SearchState> {
        self.search.as_ref()
    }
}
