mod renderer;

use std::{
    io::{Stdout, Write},
    time::{Duration, Instant},
};

use crossterm::{
    ExecutableCommand, QueueableCommand, cursor,
    event::{self, KeyCode, KeyEvent, KeyEventKind},
    queue,
    style::{self, Attribute, Color, Stylize},
    terminal::{self, ClearType},
};

pub use renderer::{Renderer, Tile, compose_frame, visible_path};

use crate::{
    config::Config,
    session::Session,
    solvers::{Heuristic, PathSelection, SearchOptions, Solver, StepOutcome},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UserActionEvent {
    /// Pause or resume the animation
    TogglePause,
    /// Advance the search by one tick while paused
    Step,
    /// Halve the tick interval
    SpeedUp,
    /// Double the tick interval
    SlowDown,
    /// Generate a new maze and rerun the same search on it
    NewMaze,
    /// Rerun the search on the current maze
    Restart,
    /// Terminal resize
    Resize,
    Quit,
}

impl UserActionEvent {
    fn from_key(key: KeyEvent) -> Option<UserActionEvent> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        match key.code {
            KeyCode::Enter => Some(UserActionEvent::TogglePause),
            KeyCode::Right => Some(UserActionEvent::Step),
            KeyCode::Up => Some(UserActionEvent::SpeedUp),
            KeyCode::Down => Some(UserActionEvent::SlowDown),
            KeyCode::Char('n') => Some(UserActionEvent::NewMaze),
            KeyCode::Char('r') => Some(UserActionEvent::Restart),
            KeyCode::Esc => Some(UserActionEvent::Quit),
            _ => None,
        }
    }
}

/// Interactive terminal front end: prompts for a maze and a solver, then animates the
/// search one tick at a time.
pub struct App {
    /// Delay between ticks when the animation starts
    tick_interval: Duration,
    /// Seed for the session RNG
    seed: Option<u64>,
}

impl Default for App {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(Config::DEFAULT_TICK_MS),
            seed: None,
        }
    }
}

impl App {
    const SOLVERS: [Solver; 3] = [Solver::Dfs, Solver::Bfs, Solver::GreedyBestFirst];
    const PATH_SELECTIONS: [PathSelection; 2] = [PathSelection::Sequential, PathSelection::Random];
    const HEURISTICS: [Heuristic; 2] = [Heuristic::Manhattan, Heuristic::Euclidean];
    const MIN_TICK_INTERVAL: Duration = Duration::from_millis(1);
    const MAX_TICK_INTERVAL: Duration = Duration::from_millis(2000);
    /// Smallest maze side that still has an interior cell
    const MIN_MAZE_DIM: usize = 3;

    pub fn new(config: &Config) -> Self {
        Self {
            tick_interval: config.tick_interval,
            seed: config.seed,
        }
    }

    /// Restores the terminal before the default panic output is printed
    fn set_panic_hook() {
        let hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = App::restore_terminal(&mut std::io::stdout());
            hook(panic_info);
        }));
    }

    /// Enters raw mode and the alternate screen.
    pub fn setup_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        terminal::enable_raw_mode()?;
        App::set_panic_hook();
        queue!(
            stdout,
            terminal::EnterAlternateScreen,
            terminal::Clear(ClearType::All),
            cursor::Hide,
            cursor::MoveTo(0, 0)
        )?;
        stdout.flush()
    }

    pub fn restore_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        queue!(stdout, terminal::LeaveAlternateScreen, cursor::Show)?;
        stdout.flush()?;
        terminal::disable_raw_mode()
    }

    /// Runs the prompts and then the animation until the user quits.
    pub fn run(&self, stdout: &mut Stdout) -> std::io::Result<()> {
        let Some((rows, cols)) = App::ask_maze_dimensions(stdout)? else {
            return Ok(());
        };

        let Some(solver) = App::select_from_menu(
            stdout,
            "Select search algorithm (use arrow keys and Enter, or Esc to exit):",
            &App::SOLVERS,
        )?
        else {
            return Ok(());
        };
        App::confirm(stdout, &format!("Selected solver: {}", solver))?;

        let Some(options) = App::ask_search_options(stdout, solver)? else {
            return Ok(());
        };

        queue!(
            stdout,
            style::PrintStyledContent(
                "Controls:\r\n"
                    .with(Color::Yellow)
                    .attribute(Attribute::Bold)
            ),
            style::PrintStyledContent("  Enter: Pause/Resume\r\n".with(Color::Cyan)),
            style::PrintStyledContent("  →: Single step when paused\r\n".with(Color::Cyan)),
            style::PrintStyledContent("  ↑/↓: Speed up/slow down\r\n".with(Color::Cyan)),
            style::PrintStyledContent("  n: New maze, r: Restart search\r\n".with(Color::Cyan)),
            style::PrintStyledContent("  Esc: Exit\r\n\r\n".with(Color::Cyan)),
            style::PrintStyledContent("Press any key to start...".with(Color::Blue)),
        )?;
        stdout.flush()?;
        App::wait_for_key()?;

        let mut session = Session::new(rows, cols, self.seed).map_err(std::io::Error::other)?;
        session
            .start_search(solver, options)
            .map_err(std::io::Error::other)?;
        tracing::info!(
            "Starting {} on a {}x{} maze with {:?}",
            solver,
            rows,
            cols,
            options
        );
        self.animate(&mut session)
    }

    /// The driver loop: one search tick per interval, with input polled in between.
    fn animate(&self, session: &mut Session) -> std::io::Result<()> {
        let mut renderer = Renderer::new();
        renderer.invalidate()?;
        let mut tick_interval = self.tick_interval;
        let mut is_paused = false;
        // Ticks spent revealing a found path
        let mut reveal = 0usize;
        let mut last_tick = Instant::now();
        let (rows, cols) = (session.maze().rows(), session.maze().cols());
        let mut fits = Renderer::fits_terminal(rows, cols)?;

        tracing::info!("Started animation loop");
        loop {
            if fits {
                let status = App::status_line(session, is_paused, tick_interval);
                renderer.draw(session, reveal, &status)?;
            } else {
                renderer.draw_too_small(rows, cols)?;
            }

            let timeout = tick_interval.saturating_sub(last_tick.elapsed());
            if !event::poll(timeout)? {
                if !is_paused && fits {
                    App::tick(session, &mut reveal);
                }
                last_tick = Instant::now();
                continue;
            }

            let action = match event::read()? {
                event::Event::Key(key) => UserActionEvent::from_key(key),
                event::Event::Resize(_, _) => Some(UserActionEvent::Resize),
                _ => None,
            };
            let Some(action) = action else {
                continue;
            };
            tracing::debug!("[app loop] {:?}", action);

            match action {
                UserActionEvent::Quit => break,
                UserActionEvent::TogglePause => is_paused = !is_paused,
                UserActionEvent::Step if is_paused => App::tick(session, &mut reveal),
                UserActionEvent::Step => {}
                UserActionEvent::SpeedUp => tick_interval = App::faster(tick_interval),
                UserActionEvent::SlowDown => tick_interval = App::slower(tick_interval),
                UserActionEvent::NewMaze => {
                    let search = session.search().map(|s| (s.solver(), s.options()));
                    session.regenerate().map_err(std::io::Error::other)?;
                    if let Some((solver, options)) = search {
                        session
                            .start_search(solver, options)
                            .map_err(std::io::Error::other)?;
                    }
                    reveal = 0;
                    renderer.invalidate()?;
                }
                UserActionEvent::Restart => {
                    session.restart_search().map_err(std::io::Error::other)?;
                    reveal = 0;
                }
                UserActionEvent::Resize => {
                    fits = Renderer::fits_terminal(rows, cols)?;
                    renderer.invalidate()?;
                }
            }
        }
        renderer.park_cursor()?;
        tracing::info!("Exiting animation loop");
        Ok(())
    }

    /// One animation tick: advances the search, or grows the shown path once it is found.
    fn tick(session: &mut Session, reveal: &mut usize) {
        if let Some(StepOutcome::Found(_)) = session.search().map(|s| s.outcome()) {
            if *reveal < session.current_path().len() {
                *reveal += 1;
            }
            return;
        }
        session.step();
    }

    fn faster(interval: Duration) -> Duration {
        (interval / 2).max(App::MIN_TICK_INTERVAL)
    }

    fn slower(interval: Duration) -> Duration {
        (interval * 2).min(App::MAX_TICK_INTERVAL)
    }

    fn status_line(session: &Session, is_paused: bool, tick_interval: Duration) -> String {
        let Some(search) = session.search() else {
            return "No search running. Press n for a new maze, Esc to exit.".to_string();
        };
        let state = match search.outcome() {
            StepOutcome::Continuing if is_paused => "Paused".to_string(),
            StepOutcome::Continuing => "Searching".to_string(),
            StepOutcome::Found(_) => {
                format!("Path found: {} cells", search.current_path().len())
            }
            StepOutcome::Exhausted => "No path found".to_string(),
        };
        let mode = if search.is_bidirectional() {
            " (bidirectional)"
        } else {
            ""
        };
        format!(
            "{}{} | {} | tick {} | {} visited | {}ms/tick",
            search.solver(),
            mode,
            state,
            search.ticks(),
            search.visited().count_visited(),
            tick_interval.as_millis()
        )
    }

    /// Asks for the option that matters for `solver`.
    fn ask_search_options(
        stdout: &mut Stdout,
        solver: Solver,
    ) -> std::io::Result<Option<SearchOptions>> {
        let mut options = SearchOptions::default();
        match solver {
            Solver::Dfs => {
                let Some(selection) = App::select_from_menu(
                    stdout,
                    "How should DFS pick the next cell?",
                    &App::PATH_SELECTIONS,
                )?
                else {
                    return Ok(None);
                };
                options.path_selection = selection;
                App::confirm(stdout, &format!("Path selection: {}", selection))?;
            }
            Solver::Bfs => {
                let Some(choice) = App::select_from_menu(
                    stdout,
                    "Search from both ends at once?",
                    &["No", "Yes (bidirectional)"],
                )?
                else {
                    return Ok(None);
                };
                options.bidirectional = choice != "No";
                App::confirm(stdout, &format!("Bidirectional: {}", options.bidirectional))?;
            }
            Solver::GreedyBestFirst => {
                let Some(heuristic) = App::select_from_menu(
                    stdout,
                    "Select heuristic:",
                    &App::HEURISTICS,
                )?
                else {
                    return Ok(None);
                };
                options.heuristic = heuristic;
                App::confirm(stdout, &format!("Heuristic: {}", heuristic))?;
            }
        }
        Ok(Some(options))
    }

    fn confirm(stdout: &mut Stdout, msg: &str) -> std::io::Result<()> {
        stdout.execute(style::PrintStyledContent(
            format!("{}\r\n", msg)
                .with(Color::Green)
                .attribute(Attribute::Bold),
        ))?;
        Ok(())
    }

    /// Blocks until any key is pressed.
    fn wait_for_key() -> std::io::Result<()> {
        loop {
            if let event::Event::Key(KeyEvent { kind, .. }) = event::read()? {
                if kind == KeyEventKind::Press {
                    return Ok(());
                }
            }
        }
    }

    /// Largest maze side that fits in `available` terminal cells of `tile_width` each.
    fn max_maze_dim(available: u16, tile_width: u16) -> usize {
        ((available / tile_width) as usize).max(App::MIN_MAZE_DIM)
    }

    /// Accepts an empty input as `max`, otherwise a number in `MIN_MAZE_DIM..=max`.
    fn parse_dimension(input: &str, max: usize) -> Result<usize, String> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(max);
        }
        let error_msg = format!(
            "Please enter a number between {} and {}.",
            App::MIN_MAZE_DIM,
            max
        );
        match input.parse::<usize>() {
            Ok(n) if (App::MIN_MAZE_DIM..=max).contains(&n) => Ok(n),
            _ => Err(error_msg),
        }
    }

    /// Prompts for the number of rows and columns, bounded by the terminal size.
    /// Returns `None` if the user presses Esc.
    fn ask_maze_dimensions(stdout: &mut Stdout) -> std::io::Result<Option<(usize, usize)>> {
        stdout.execute(style::PrintStyledContent(
            "Enter the maze size in cells, or press Esc to exit. \
Leave empty to fill the terminal.\r\n"
                .with(Color::Blue),
        ))?;

        let max_dims = || match terminal::size() {
            Ok((term_width, term_height)) => (
                App::max_maze_dim(term_height.saturating_sub(Renderer::NUM_STATUS_ROWS), 1),
                App::max_maze_dim(term_width, Tile::WIDTH),
            ),
            Err(_) => (u8::MAX as usize, u8::MAX as usize),
        };

        let Some(rows) =
            App::prompt_with_validation(stdout, "Rows: ", |s| App::parse_dimension(s, max_dims().0))?
        else {
            return Ok(None);
        };
        App::confirm(stdout, &format!("Rows set to {}", rows))?;

        let Some(cols) = App::prompt_with_validation(stdout, "Columns: ", |s| {
            App::parse_dimension(s, max_dims().1)
        })?
        else {
            return Ok(None);
        };
        App::confirm(stdout, &format!("Columns set to {}", cols))?;

        Ok(Some((rows, cols)))
    }

    /// Reads a line, coloring it green or red as `validate` accepts or rejects it.
    /// Returns `None` if the user presses Esc.
    fn prompt_with_validation<F, T>(
        stdout: &mut Stdout,
        prompt: &str,
        validate: F,
    ) -> std::io::Result<Option<T>>
    where
        F: Fn(&str) -> Result<T, String>,
    {
        queue!(stdout, cursor::Hide, cursor::SavePosition)?;
        stdout.flush()?;

        let mut input = String::new();
        let value = loop {
            queue!(
                stdout,
                cursor::RestorePosition,
                terminal::Clear(ClearType::FromCursorDown)
            )?;
            stdout.queue(style::PrintStyledContent(
                prompt.with(Color::Cyan).attribute(Attribute::Bold),
            ))?;

            let verdict = validate(&input);
            let color = if verdict.is_ok() {
                Color::Green
            } else {
                Color::Red
            };
            queue!(
                stdout,
                style::PrintStyledContent(input.as_str().with(color)),
                style::Print(" \r\n")
            )?;
            if let Err(msg) = verdict {
                stdout.queue(style::PrintStyledContent(
                    msg.with(Color::DarkGrey).attribute(Attribute::Dim),
                ))?;
            }
            stdout.flush()?;

            let event::Event::Key(KeyEvent { code, kind, .. }) = event::read()? else {
                continue;
            };
            if kind != KeyEventKind::Press {
                continue;
            }
            match code {
                KeyCode::Enter => {
                    if let Ok(value) = validate(&input) {
                        break Some(value);
                    }
                }
                KeyCode::Char(c) if !c.is_whitespace() && !c.is_control() => input.push(c),
                KeyCode::Backspace => {
                    input.pop();
                }
                KeyCode::Esc => break None,
                _ => {}
            }
        };

        queue!(
            stdout,
            cursor::RestorePosition,
            terminal::Clear(ClearType::FromCursorDown),
            cursor::Show
        )?;
        stdout.flush()?;
        Ok(value)
    }

    /// Arrow-key menu over `options`. Returns `None` if the user presses Esc.
    fn select_from_menu<T: std::fmt::Display + Copy>(
        stdout: &mut Stdout,
        prompt: &str,
        options: &[T],
    ) -> std::io::Result<Option<T>> {
        if options.is_empty() {
            return Ok(None);
        }
        queue!(stdout, cursor::Hide, cursor::SavePosition)?;

        let mut selected = 0;
        let choice = loop {
            queue!(
                stdout,
                cursor::RestorePosition,
                terminal::Clear(ClearType::FromCursorDown),
                style::PrintStyledContent(prompt.with(Color::Yellow))
            )?;
            for (i, option) in options.iter().enumerate() {
                let line = format!("\r\n{}", option);
                if i == selected {
                    stdout.queue(style::PrintStyledContent(line.attribute(Attribute::Reverse)))?;
                } else {
                    stdout.queue(style::Print(line))?;
                }
            }
            stdout.queue(style::Print("\r\n"))?;
            stdout.flush()?;

            let event::Event::Key(KeyEvent { code, kind, .. }) = event::read()? else {
                continue;
            };
            if kind != KeyEventKind::Press {
                continue;
            }
            match code {
                KeyCode::Up => selected = (selected + options.len() - 1) % options.len(),
                KeyCode::Down => selected = (selected + 1) % options.len(),
                KeyCode::Enter => break Some(options[selected]),
                KeyCode::Esc => break None,
                _ => {}
            }
        };

        queue!(
            stdout,
            cursor::RestorePosition,
            terminal::Clear(ClearType::FromCursorDown),
            cursor::Show
        )?;
        stdout.flush()?;
        Ok(choice)
    }
}
