use std::time::{Duration, Instant};

use mazeseek::{
    config::Config,
    session::Session,
    solvers::{Heuristic, PathSelection, SearchOptions, Solver, StepOutcome},
};

/// Every solver configuration the visualizer can run
fn configurations() -> Vec<(Solver, SearchOptions)> {
    let base = SearchOptions::default();
    vec![
        (Solver::Dfs, base),
        (
            Solver::Dfs,
            SearchOptions {
                path_selection: PathSelection::Random,
                ..base
            },
        ),
        (Solver::Bfs, base),
        (
            Solver::Bfs,
            SearchOptions {
                bidirectional: true,
                ..base
            },
        ),
        (Solver::GreedyBestFirst, base),
        (
            Solver::GreedyBestFirst,
            SearchOptions {
                heuristic: Heuristic::Euclidean,
                ..base
            },
        ),
    ]
}

#[derive(Default)]
struct Totals {
    ticks: usize,
    path_cells: usize,
    found: usize,
    elapsed: Duration,
}

/// Runs every solver headless on the same mazes and prints average ticks and path lengths.
///
/// Usage: `profile [rows] [cols] [iterations]`. `MAZESEEK_SEED` fixes the mazes.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(tracing::Level::WARN)
        .init();

    let (config, _) = Config::from_env();
    let mut args = std::env::args().skip(1);
    let mut next_arg = |default: usize| {
        args.next()
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(default)
    };
    let rows = next_arg(101);
    let cols = next_arg(101);
    let iterations = next_arg(10).max(1);

    let configs = configurations();
    let mut totals: Vec<Totals> = configs.iter().map(|_| Totals::default()).collect();

    let mut session = Session::new(rows, cols, config.seed)?;
    for iteration in 0..iterations {
        if iteration > 0 {
            session.regenerate()?;
        }
        for ((solver, options), total) in configs.iter().zip(totals.iter_mut()) {
            session.start_search(*solver, *options)?;
            let started = Instant::now();
            let outcome = loop {
                match session.step() {
                    Some(StepOutcome::Continuing) => continue,
                    Some(outcome) => break outcome,
                    None => break StepOutcome::Exhausted,
                }
            };
            total.elapsed += started.elapsed();
            if let Some(search) = session.search() {
                total.ticks += search.ticks();
            }
            if let StepOutcome::Found(_) = outcome {
                total.found += 1;
                total.path_cells += session.current_path().len();
            }
        }
    }

    println!("{}x{} maze, {} iterations", rows, cols, iterations);
    println!(
        "{:<28} {:<20} {:>10} {:>10} {:>7} {:>12}",
        "solver", "options", "avg ticks", "avg path", "found", "avg time"
    );
    for ((solver, options), total) in configs.iter().zip(&totals) {
        let option = match solver {
            Solver::Dfs => options.path_selection.to_string(),
            Solver::Bfs if options.bidirectional => "Bidirectional".to_string(),
            Solver::Bfs => "Single frontier".to_string(),
            Solver::GreedyBestFirst => options.heuristic.to_string(),
        };
        let avg_path = if total.found > 0 {
            total.path_cells as f64 / total.found as f64
        } else {
            0.0
        };
        println!(
            "{:<28} {:<20} {:>10.1} {:>10.1} {:>7} {:>12?}",
            solver.to_string(),
            option,
            total.ticks as f64 / iterations as f64,
            avg_path,
            total.found,
            total.elapsed / iterations as u32
        );
    }
    Ok(())
}
