mod bfs;
mod bidirectional;
mod dfs;
mod greedy;
mod visited;

use rand::{Rng, SeedableRng, rngs::StdRng};

pub use bfs::BreadthFirst;
pub use bidirectional::BidirectionalBfs;
pub use dfs::DepthFirst;
pub use greedy::{CloserTo, GreedyBestFirst};
pub use visited::VisitedMap;

use crate::error::{MazeError, Result};
use crate::maze::{Cell, Maze, neighbors};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Solver {
    Dfs,
    Bfs,
    GreedyBestFirst,
}

impl std::fmt::Display for Solver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Solver::Dfs => write!(f, "Depth-First Search (DFS)"),
            Solver::Bfs => write!(f, "Breadth-First Search (BFS)"),
            Solver::GreedyBestFirst => write!(f, "Greedy Best-First Search"),
        }
    }
}

/// How depth-first search picks among several unvisited moves.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathSelection {
    /// Always the first move, in up, left, down, right order.
    #[default]
    Sequential,
    Random,
}

impl std::fmt::Display for PathSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathSelection::Sequential => write!(f, "Sequential"),
            PathSelection::Random => write!(f, "Random"),
        }
    }
}

/// Distance estimate used by greedy best-first search. Not required to be admissible.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heuristic {
    #[default]
    Manhattan,
    Euclidean,
}

impl Heuristic {
    pub fn distance(self, from: Cell, to: Cell) -> f64 {
        let d_row = from.0.abs_diff(to.0) as f64;
        let d_col = from.1.abs_diff(to.1) as f64;
        match self {
            Heuristic::Manhattan => d_row + d_col,
            Heuristic::Euclidean => d_row.hypot(d_col),
        }
    }
}

impl std::fmt::Display for Heuristic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Heuristic::Manhattan => write!(f, "Manhattan distance"),
            Heuristic::Euclidean => write!(f, "Euclidean distance"),
        }
    }
}

/// Per-solver tuning. Each field only affects the solver named in its doc.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// [`Solver::Dfs`] only.
    pub path_selection: PathSelection,
    /// [`Solver::GreedyBestFirst`] only.
    pub heuristic: Heuristic,
    /// [`Solver::Bfs`] only: grow a second frontier from the finish.
    pub bidirectional: bool,
}

/// Result of advancing a search by one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// More work remains.
    Continuing,
    /// The finish was reached. Carries the finish cell, or the meeting cell for
    /// bidirectional search.
    Found(Cell),
    /// The frontier emptied without reaching the finish.
    Exhausted,
}

impl StepOutcome {
    pub fn is_finished(self) -> bool {
        self != StepOutcome::Continuing
    }
}

/// A resumable search that performs one bounded unit of work per call to `step`.
pub trait Searcher {
    fn step(&mut self, maze: &Maze) -> StepOutcome;
    /// The path known so far, ordered from the start.
    fn current_path(&self) -> &[Cell];
    fn visited(&self) -> &VisitedMap;
}

/// Orthogonal neighbors of `cell` that can be walked on and have not been visited.
pub fn get_moves(cell: Cell, maze: &Maze, visited: &VisitedMap) -> Vec<Cell> {
    neighbors(cell)
        .into_iter()
        .filter(|&n| maze.is_passable(n) && !visited.is_visited(n))
        .collect()
}

enum Engine {
    Dfs(DepthFirst),
    Bfs(BreadthFirst),
    Bidirectional(BidirectionalBfs),
    Greedy(GreedyBestFirst),
}

/// One search run: the chosen engine plus tick bookkeeping.
///
/// Once a terminal outcome is reached, further `step` calls return it unchanged.
pub struct SearchState {
    engine: Engine,
    solver: Solver,
    options: SearchOptions,
    ticks: usize,
    outcome: StepOutcome,
}

impl SearchState {
    /// Initializes `solver` against `maze` with the given objectives.
    ///
    /// `rng` seeds the engine's own generator, used by random DFS move selection.
    pub fn new<R: Rng + ?Sized>(
        solver: Solver,
        start: Cell,
        finish: Cell,
        maze: &Maze,
        options: SearchOptions,
        rng: &mut R,
    ) -> Result<Self> {
        for cell in [start, finish] {
            if !maze.is_in_bounds(cell) {
                return Err(MazeError::OutOfBounds {
                    cell,
                    rows: maze.rows(),
                    cols: maze.cols(),
                });
            }
        }
        let engine = match solver {
            Solver::Dfs => Engine::Dfs(DepthFirst::new(
                start,
                finish,
                maze,
                options.path_selection,
                StdRng::seed_from_u64(rng.random()),
            )),
            Solver::Bfs if options.bidirectional => {
                Engine::Bidirectional(BidirectionalBfs::new(start, finish, maze))
            }
            Solver::Bfs => Engine::Bfs(BreadthFirst::new(start, finish, maze)),
            Solver::GreedyBestFirst => Engine::Greedy(GreedyBestFirst::new(
                start,
                finish,
                maze,
                options.heuristic,
            )),
        };
        tracing::debug!("[search] starting {} from {:?} to {:?}", solver, start, finish);
        Ok(SearchState {
            engine,
            solver,
            options,
            ticks: 0,
            outcome: StepOutcome::Continuing,
        })
    }

    fn searcher(&self) -> &dyn Searcher {
        match &self.engine {
            Engine::Dfs(s) => s,
            Engine::Bfs(s) => s,
            Engine::Bidirectional(s) => s,
            Engine::Greedy(s) => s,
        }
    }

    fn searcher_mut(&mut self) -> &mut dyn Searcher {
        match &mut self.engine {
            Engine::Dfs(s) => s,
            Engine::Bfs(s) => s,
            Engine::Bidirectional(s) => s,
            Engine::Greedy(s) => s,
        }
    }

    /// Advances the search by one tick.
    pub fn step(&mut self, maze: &Maze) -> StepOutcome {
        if self.outcome.is_finished() {
            return self.outcome;
        }
        self.ticks += 1;
        self.outcome = self.searcher_mut().step(maze);
        if let StepOutcome::Exhausted = self.outcome {
            tracing::info!("[search] {} exhausted after {} ticks", self.solver, self.ticks);
        }
        self.outcome
    }

    /// Steps until the search finishes, returning the path or
    /// [`MazeError::SearchExhausted`].
    pub fn run_to_completion(&mut self, maze: &Maze) -> Result<Vec<Cell>> {
        loop {
            match self.step(maze) {
                StepOutcome::Continuing => continue,
                StepOutcome::Found(_) => return Ok(self.current_path().to_vec()),
                StepOutcome::Exhausted => return Err(MazeError::SearchExhausted),
            }
        }
    }

    pub fn current_path(&self) -> &[Cell] {
        self.searcher().current_path()
    }

    pub fn visited(&self) -> &VisitedMap {
        self.searcher().visited()
    }

    pub fn ticks(&self) -> usize {
        self.ticks
    }

    pub fn outcome(&self) -> StepOutcome {
        self.outcome
    }

    pub fn solver(&self) -> Solver {
        self.solver
    }

    pub fn options(&self) -> SearchOptions {
        self.options
    }

    pub fn is_bidirectional(&self) -> bool {
        matches!(self.engine, Engine::Bidirectional(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::{generate_maze, get_rng, place_objectives};
    use crate::maze::CellState;

    const ALL_CONFIGS: [(Solver, SearchOptions); 6] = [
        (
            Solver::Dfs,
            SearchOptions {
                path_selection: PathSelection::Sequential,
                heuristic: Heuristic::Manhattan,
                bidirectional: false,
            },
        ),
        (
            Solver::Dfs,
            SearchOptions {
                path_selection: PathSelection::Random,
                heuristic: Heuristic::Manhattan,
                bidirectional: false,
            },
        ),
        (
            Solver::Bfs,
            SearchOptions {
                path_selection: PathSelection::Sequential,
                heuristic: Heuristic::Manhattan,
                bidirectional: false,
            },
        ),
        (
            Solver::Bfs,
            SearchOptions {
                path_selection: PathSelection::Sequential,
                heuristic: Heuristic::Manhattan,
                bidirectional: true,
            },
        ),
        (
            Solver::GreedyBestFirst,
            SearchOptions {
                path_selection: PathSelection::Sequential,
                heuristic: Heuristic::Manhattan,
                bidirectional: false,
            },
        ),
        (
            Solver::GreedyBestFirst,
            SearchOptions {
                path_selection: PathSelection::Sequential,
                heuristic: Heuristic::Euclidean,
                bidirectional: false,
            },
        ),
    ];

    fn assert_valid_path(maze: &Maze, path: &[Cell], start: Cell, finish: Cell) {
        assert_eq!(path.first(), Some(&start));
        assert_eq!(path.last(), Some(&finish));
        for pair in path.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            assert_eq!(
                a.0.abs_diff(b.0) + a.1.abs_diff(b.1),
                1,
                "{:?} -> {:?} is not a single orthogonal step",
                a,
                b
            );
        }
        assert!(path.iter().all(|&c| maze.is_passable(c)));
    }

    #[test]
    fn test_heuristics() {
        assert_eq!(Heuristic::Manhattan.distance((1, 1), (4, 5)), 7.0);
        assert_eq!(Heuristic::Euclidean.distance((1, 1), (4, 5)), 5.0);
        assert_eq!(Heuristic::Euclidean.distance((4, 5), (1, 1)), 5.0);
    }

    #[test]
    fn test_get_moves_filters_walls_and_visited() {
        let maze = Maze::from_ascii(&["#####", "#.S.#", "##.##", "#####"]);
        let mut visited = VisitedMap::new(maze.rows(), maze.cols());
        assert_eq!(get_moves((1, 2), &maze, &visited), vec![(1, 1), (2, 2), (1, 3)]);
        visited.stamp((1, 1), 4);
        assert_eq!(get_moves((1, 2), &maze, &visited), vec![(2, 2), (1, 3)]);
    }

    #[test]
    fn test_every_solver_on_generated_mazes() {
        for seed in 0..6 {
            let mut rng = get_rng(Some(seed));
            let mut maze = generate_maze(19, 27, &mut rng).unwrap();
            let (start, finish) = place_objectives(&mut maze, &mut rng).unwrap();
            let mut bfs_len = None;
            for (solver, options) in ALL_CONFIGS {
                let mut search =
                    SearchState::new(solver, start, finish, &maze, options, &mut rng).unwrap();
                let path = search.run_to_completion(&maze).unwrap();
                assert_valid_path(&maze, &path, start, finish);
                if solver == Solver::Bfs && !options.bidirectional {
                    bfs_len = Some(path.len());
                }
                if let Some(shortest) = bfs_len {
                    assert!(path.len() >= shortest, "{} beat BFS", solver);
                    if options.bidirectional {
                        assert!(
                            path.len() <= shortest + 2,
                            "bidirectional path of {} cells against {}",
                            path.len(),
                            shortest
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_bidirectional_needs_fewer_ticks_in_corridor() {
        let maze = Maze::from_ascii(&["###########", "#S.......F#", "###########"]);
        let mut rng = get_rng(Some(0));
        let (start, finish) = ((1, 1), (1, 9));
        let mut bfs = SearchState::new(
            Solver::Bfs,
            start,
            finish,
            &maze,
            SearchOptions::default(),
            &mut rng,
        )
        .unwrap();
        let bidirectional_options = SearchOptions {
            bidirectional: true,
            ..SearchOptions::default()
        };
        let mut bidirectional =
            SearchState::new(Solver::Bfs, start, finish, &maze, bidirectional_options, &mut rng)
                .unwrap();
        assert!(bidirectional.is_bidirectional());
        let bfs_path = bfs.run_to_completion(&maze).unwrap();
        let bidirectional_path = bidirectional.run_to_completion(&maze).unwrap();
        assert!(bidirectional.ticks() <= bfs.ticks());
        assert_eq!(bfs_path, bidirectional_path);
    }

    #[test]
    fn test_same_start_and_finish_is_trivial() {
        let maze = Maze::from_ascii(&["#####", "#.F.#", "#####"]);
        let mut rng = get_rng(Some(0));
        for (solver, options) in ALL_CONFIGS {
            let mut search =
                SearchState::new(solver, (1, 2), (1, 2), &maze, options, &mut rng).unwrap();
            assert_eq!(search.step(&maze), StepOutcome::Found((1, 2)));
            assert_eq!(search.ticks(), 1);
            assert_eq!(search.current_path(), &[(1, 2)]);
        }
    }

    #[test]
    fn test_adjacent_objectives() {
        let maze = Maze::from_ascii(&["####", "#SF#", "####"]);
        let mut rng = get_rng(Some(0));
        for (solver, options) in ALL_CONFIGS {
            let mut search =
                SearchState::new(solver, (1, 1), (1, 2), &maze, options, &mut rng).unwrap();
            let path = search.run_to_completion(&maze).unwrap();
            assert_eq!(path, vec![(1, 1), (1, 2)], "{}", solver);
        }
    }

    #[test]
    fn test_exhausted_is_sticky() {
        let maze = Maze::from_ascii(&["#######", "#S.#.F#", "#######"]);
        let mut rng = get_rng(Some(0));
        for (solver, options) in ALL_CONFIGS {
            let mut search =
                SearchState::new(solver, (1, 1), (1, 5), &maze, options, &mut rng).unwrap();
            assert_eq!(
                search.run_to_completion(&maze),
                Err(MazeError::SearchExhausted)
            );
            let ticks = search.ticks();
            assert_eq!(search.step(&maze), StepOutcome::Exhausted);
            assert_eq!(search.ticks(), ticks);
            assert_eq!(search.outcome(), StepOutcome::Exhausted);
        }
    }

    #[test]
    fn test_objectives_must_be_in_bounds() {
        let maze = Maze::from_ascii(&["####", "#SF#", "####"]);
        let mut rng = get_rng(Some(0));
        let result = SearchState::new(
            Solver::Bfs,
            (1, 1),
            (7, 7),
            &maze,
            SearchOptions::default(),
            &mut rng,
        );
        assert!(matches!(result, Err(MazeError::OutOfBounds { cell: (7, 7), .. })));
    }

    #[test]
    fn test_off_grid_start_is_rejected() {
        let maze = Maze::from_ascii(&["####", "#SF#", "####"]);
        let mut rng = get_rng(Some(0));
        for (solver, options) in ALL_CONFIGS {
            let result = SearchState::new(solver, (0, 9), (1, 2), &maze, options, &mut rng);
            assert!(
                matches!(result, Err(MazeError::OutOfBounds { cell: (0, 9), .. })),
                "{}",
                solver
            );
        }
    }

    #[test]
    fn test_finish_argument_is_the_goal() {
        // Neither objective is marked on the grid
        let maze = Maze::from_ascii(&["######", "#....#", "######"]);
        let mut rng = get_rng(Some(0));
        for (solver, options) in ALL_CONFIGS {
            let mut search =
                SearchState::new(solver, (1, 1), (1, 4), &maze, options, &mut rng).unwrap();
            let path = search.run_to_completion(&maze).unwrap();
            assert_eq!(path, vec![(1, 1), (1, 2), (1, 3), (1, 4)], "{}", solver);
        }
    }

    #[test]
    fn test_search_never_mutates_maze() {
        let mut rng = get_rng(Some(3));
        let mut maze = generate_maze(15, 15, &mut rng).unwrap();
        let (start, finish) = place_objectives(&mut maze, &mut rng).unwrap();
        let before = maze.clone();
        for (solver, options) in ALL_CONFIGS {
            let mut search =
                SearchState::new(solver, start, finish, &maze, options, &mut rng).unwrap();
            search.run_to_completion(&maze).unwrap();
        }
        assert_eq!(maze, before);
        assert_eq!(maze.count(CellState::Finish), 1);
    }
}
