use thiserror::Error;

use crate::maze::Cell;

/// Errors raised by maze construction, objective placement and synchronous search runs.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MazeError {
    /// Either dimension is too small to hold a grid (both must be greater than 1).
    #[error("invalid maze dimensions {rows}x{cols}: rows and cols must both be greater than 1")]
    InvalidDimensions { rows: usize, cols: usize },
    /// A write addressed a cell outside of the grid.
    #[error("cell {cell:?} is outside of the {rows}x{cols} grid")]
    OutOfBounds {
        cell: Cell,
        rows: usize,
        cols: usize,
    },
    /// The maze has no path cell to place an objective on.
    #[error("maze contains no path cells")]
    NoPathCells,
    /// The search frontier emptied before the finish cell was reached.
    #[error("search frontier exhausted without reaching the finish")]
    SearchExhausted,
}

pub type Result<T> = std::result::Result<T, MazeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = MazeError::InvalidDimensions { rows: 1, cols: 5 };
        assert!(err.to_string().contains("1x5"));
        let err = MazeError::OutOfBounds {
            cell: (7, 2),
            rows: 5,
            cols: 5,
        };
        assert_eq!(err.to_string(), "cell (7, 2) is outside of the 5x5 grid");
    }

    #[test]
    fn test_is_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(MazeError::NoPathCells);
        assert_eq!(err.to_string(), "maze contains no path cells");
        assert!(err.source().is_none());
    }
}
