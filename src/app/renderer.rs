use std::{
    collections::HashSet,
    fmt,
    io::{Stdout, Write},
};

use crossterm::{
    QueueableCommand, cursor, queue,
    style::{self, Attribute, Color, Stylize},
    terminal::{self, ClearType},
};
use unicode_truncate::UnicodeTruncateStr;

use crate::{
    maze::{Cell, CellState, Grid},
    session::Session,
    solvers::{Solver, StepOutcome},
};

/// What a single maze cell looks like on screen.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Wall,
    #[default]
    Empty,
    /// Reached from the start
    Visited,
    /// Reached from the finish by the bidirectional search
    VisitedFromFinish,
    Path,
    Start,
    Finish,
}

impl Tile {
    /// The width of each tile when rendered, in character widths.
    pub const WIDTH: u16 = 2;

    /// Picks the tile for `cell`. Objectives are drawn over the path, the path over
    /// visitation stamps.
    fn of(session: &Session, path: &HashSet<Cell>, cell: Cell) -> Tile {
        match session.cell_state(cell) {
            Some(CellState::Start) => return Tile::Start,
            Some(CellState::Finish) => return Tile::Finish,
            Some(state) if state.is_passable() => {}
            _ => return Tile::Wall,
        }
        if path.contains(&cell) {
            return Tile::Path;
        }
        match session.visited().map_or(0, |visited| visited.get(cell)) {
            0 => Tile::Empty,
            n if n > 0 => Tile::Visited,
            _ => Tile::VisitedFromFinish,
        }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let styled_symbol = match self {
            Tile::Wall => "⬜".with(Color::White),
            Tile::Empty => "  ".with(Color::Reset),
            Tile::Visited => "* ".with(Color::Blue),
            Tile::VisitedFromFinish => "+ ".with(Color::Magenta),
            Tile::Path => "🟨".with(Color::Yellow),
            Tile::Start => "🟩".with(Color::Green),
            Tile::Finish => "🟥".with(Color::Red),
        };

        #[cfg(debug_assertions)]
        {
            use unicode_width::UnicodeWidthStr;
            assert_eq!(
                styled_symbol.content().width(),
                Tile::WIDTH as usize,
                "Each tile must occupy exactly two character widths."
            );
        }

        write!(f, "{}", styled_symbol)
    }
}

/// The part of the session's path to draw after `reveal` ticks past the end of the search.
///
/// A depth-first path is its live stack and is always shown whole. Reconstructed paths
/// grow by one cell per tick in each direction away from the cell where the search ended.
pub fn visible_path(session: &Session, reveal: usize) -> &[Cell] {
    let Some(search) = session.search() else {
        return &[];
    };
    let path = search.current_path();
    match (search.solver(), search.outcome()) {
        (Solver::Dfs, _) => path,
        (_, StepOutcome::Found(end)) => match path.iter().position(|&c| c == end) {
            Some(anchor) => {
                let last = (anchor + reveal).min(path.len() - 1);
                &path[anchor.saturating_sub(reveal)..=last]
            }
            None => path,
        },
        _ => &[],
    }
}

/// Builds the full frame for the session's current state, highlighting `path`.
pub fn compose_frame(session: &Session, path: &[Cell]) -> Grid<Tile> {
    let maze = session.maze();
    let path: HashSet<Cell> = path.iter().copied().collect();
    let mut frame = Grid::new(maze.rows(), maze.cols(), Tile::default());
    for cell in maze.grid().cells() {
        frame[cell] = Tile::of(session, &path, cell);
    }
    frame
}

/// Draws frames to the terminal, only touching tiles that changed since the last draw.
pub struct Renderer {
    stdout: Stdout,
    /// Last frame written to the terminal, `None` after a clear
    last_frame: Option<Grid<Tile>>,
}

impl Renderer {
    /// Rows reserved below the maze for the status line
    pub const NUM_STATUS_ROWS: u16 = 2;

    pub fn new() -> Self {
        Self {
            stdout: std::io::stdout(),
            last_frame: None,
        }
    }

    /// Forces the next draw to repaint every tile.
    pub fn invalidate(&mut self) -> std::io::Result<()> {
        self.last_frame = None;
        queue!(self.stdout, terminal::Clear(ClearType::All))?;
        self.stdout.flush()
    }

    /// Whether a maze of the given size plus the status line fits the terminal
    pub fn fits_terminal(rows: usize, cols: usize) -> std::io::Result<bool> {
        let (term_width, term_height) = terminal::size()?;
        Ok(cols * Tile::WIDTH as usize <= term_width as usize
            && rows + (Renderer::NUM_STATUS_ROWS as usize) <= term_height as usize)
    }

    /// Shows a resize request instead of the maze.
    pub fn draw_too_small(&mut self, rows: usize, cols: usize) -> std::io::Result<()> {
        self.last_frame = None;
        let msg = format!(
            "Terminal size is too small for the {}x{} maze ({}x{} needed). Please resize the terminal.\r\n",
            rows,
            cols,
            cols * Tile::WIDTH as usize,
            rows + Renderer::NUM_STATUS_ROWS as usize
        );
        queue!(
            self.stdout,
            terminal::Clear(ClearType::All),
            cursor::MoveTo(0, 0),
            style::PrintStyledContent(msg.with(Color::Yellow).attribute(Attribute::Bold)),
            style::PrintStyledContent(
                "Press Esc to exit...\r\n"
                    .with(Color::Blue)
                    .attribute(Attribute::Bold)
            )
        )?;
        self.stdout.flush()
    }

    /// Draws the session state and a status line under the maze.
    pub fn draw(&mut self, session: &Session, reveal: usize, status: &str) -> std::io::Result<()> {
        let frame = compose_frame(session, visible_path(session, reveal));
        let stale = self
            .last_frame
            .as_ref()
            .filter(|last| last.rows() == frame.rows() && last.cols() == frame.cols());

        let mut changed = 0usize;
        for cell in frame.cells() {
            let tile = frame[cell];
            if stale.is_some_and(|last| last[cell] == tile) {
                continue;
            }
            changed += 1;
            self.stdout.queue(cursor::MoveTo(
                cell.1 as u16 * Tile::WIDTH,
                cell.0 as u16,
            ))?;
            self.stdout.queue(style::Print(tile))?;
        }

        let (term_width, _) = terminal::size()?;
        let (status, _) = status.unicode_truncate(term_width as usize);
        queue!(
            self.stdout,
            cursor::MoveTo(0, frame.rows() as u16),
            terminal::Clear(ClearType::CurrentLine),
            style::PrintStyledContent(status.with(Color::Cyan))
        )?;
        self.stdout.flush()?;

        tracing::trace!("[renderer] redrew {} tiles", changed);
        self.last_frame = Some(frame);
        Ok(())
    }

    /// Moves the cursor below the maze so later output does not overwrite it.
    pub fn park_cursor(&mut self) -> std::io::Result<()> {
        if let Some(frame) = &self.last_frame {
            queue!(
                self.stdout,
                cursor::MoveTo(0, frame.rows() as u16 + Renderer::NUM_STATUS_ROWS),
                cursor::Show
            )?;
            self.stdout.flush()?;
        }
        Ok(())
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solvers::SearchOptions;

    #[test]
    fn test_tiles_are_two_columns_wide() {
        use unicode_width::UnicodeWidthStr;
        for tile in [
            Tile::Wall,
            Tile::Empty,
            Tile::Visited,
            Tile::VisitedFromFinish,
            Tile::Path,
            Tile::Start,
            Tile::Finish,
        ] {
            // Display asserts the width in debug builds
            let rendered = tile.to_string();
            assert!(!rendered.is_empty());
            assert!(rendered.width() >= Tile::WIDTH as usize);
        }
    }

    #[test]
    fn test_frame_before_search() {
        let session = Session::new(11, 15, Some(6)).unwrap();
        let frame = compose_frame(&session, visible_path(&session, 0));
        let (start, finish) = session.objectives();
        assert_eq!(frame[finish], Tile::Finish);
        if start != finish {
            assert_eq!(frame[start], Tile::Start);
        }
        assert_eq!(frame[(0, 0)], Tile::Wall);
        assert_eq!((frame.rows(), frame.cols()), (11, 15));
        for cell in session.maze().grid().cells() {
            if session.maze().is_passable(cell) {
                assert_ne!(frame[cell], Tile::Wall, "{:?}", cell);
            } else {
                assert_eq!(frame[cell], Tile::Wall, "{:?}", cell);
            }
        }
        assert!(!frame.values().contains(&Tile::Visited));
        assert!(!frame.values().contains(&Tile::Path));
    }

    #[test]
    fn test_frame_shows_path_under_objectives() {
        let mut session = Session::new(15, 21, Some(8)).unwrap();
        session
            .start_search(Solver::Bfs, SearchOptions::default())
            .unwrap();
        while let Some(StepOutcome::Continuing) = session.step() {}
        let path = session.current_path();
        let frame = compose_frame(&session, path);
        let (start, finish) = session.objectives();
        assert_eq!(frame[finish], Tile::Finish);
        for &cell in path {
            if cell != start && cell != finish {
                assert_eq!(frame[cell], Tile::Path);
            }
        }
    }

    #[test]
    fn test_bidirectional_frame_marks_both_sides() {
        let mut session = Session::new(15, 21, Some(12)).unwrap();
        let (start, finish) = session.objectives();
        if start == finish {
            return;
        }
        let options = SearchOptions {
            bidirectional: true,
            ..SearchOptions::default()
        };
        session.start_search(Solver::Bfs, options).unwrap();
        // One tick from each side
        session.step();
        session.step();
        let frame = compose_frame(&session, session.current_path());
        let visited = session.visited().unwrap();
        for cell in session.maze().grid().cells() {
            if session.current_path().contains(&cell) {
                continue;
            }
            match visited.get(cell) {
                n if n > 1 => assert_eq!(frame[cell], Tile::Visited),
                n if n < -1 => assert_eq!(frame[cell], Tile::VisitedFromFinish),
                _ => {}
            }
        }
    }

    #[test]
    fn test_reconstructed_path_is_revealed_from_the_end() {
        let mut session = Session::new(15, 21, Some(5)).unwrap();
        session
            .start_search(Solver::GreedyBestFirst, SearchOptions::default())
            .unwrap();
        assert!(visible_path(&session, 10).is_empty());
        while let Some(StepOutcome::Continuing) = session.step() {}
        let path = session.current_path().to_vec();
        let (_, finish) = session.objectives();
        assert_eq!(visible_path(&session, 0), &[finish]);
        let partial = visible_path(&session, 2);
        assert_eq!(partial, &path[path.len().saturating_sub(3)..]);
        assert_eq!(visible_path(&session, path.len()), path.as_slice());
    }

    #[test]
    fn test_dfs_path_is_always_visible() {
        let mut session = Session::new(15, 21, Some(5)).unwrap();
        session
            .start_search(Solver::Dfs, SearchOptions::default())
            .unwrap();
        session.step();
        session.step();
        assert_eq!(visible_path(&session, 0), session.current_path());
        assert!(!visible_path(&session, 0).is_empty());
    }
}
