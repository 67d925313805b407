use std::fmt;

/// State of a single grid cell.
///
/// The declaration order is meaningful: every state greater than
/// [`CellState::UnvisitedWall`] can be walked on.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CellState {
    /// Outer ring of the grid. Never carved.
    BorderWall,
    /// Interior cell rejected by the generator.
    InnerWall,
    /// Interior cell not yet considered by the generator.
    #[default]
    UnvisitedWall,
    Path,
    Start,
    Finish,
}

impl CellState {
    /// Whether a search may step onto a cell in this state.
    pub fn is_passable(self) -> bool {
        self > CellState::UnvisitedWall
    }

    pub fn is_wall(self) -> bool {
        !self.is_passable()
    }
}

impl fmt::Display for CellState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CellState::BorderWall => "border wall",
            CellState::InnerWall => "inner wall",
            CellState::UnvisitedWall => "unvisited wall",
            CellState::Path => "path",
            CellState::Start => "start",
            CellState::Finish => "finish",
        };
        write!(f, "{}", name)
    }
}
