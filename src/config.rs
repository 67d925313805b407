use std::{path::PathBuf, str::FromStr, time::Duration};

use tracing::Level;

/// Runtime settings read from `MAZESEEK_*` environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Fixes every random choice when set
    pub seed: Option<u64>,
    /// Delay between two search ticks while the animation runs
    pub tick_interval: Duration,
    pub log_level: Level,
    pub log_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            tick_interval: Duration::from_millis(Config::DEFAULT_TICK_MS),
            log_level: Level::INFO,
            log_dir: PathBuf::from("logs"),
        }
    }
}

impl Config {
    pub const SEED_VAR: &'static str = "MAZESEEK_SEED";
    pub const TICK_MS_VAR: &'static str = "MAZESEEK_TICK_MS";
    pub const LOG_VAR: &'static str = "MAZESEEK_LOG";
    pub const LOG_DIR_VAR: &'static str = "MAZESEEK_LOG_DIR";
    pub const DEFAULT_TICK_MS: u64 = 20;

    /// Reads the process environment.
    pub fn from_env() -> (Self, Vec<String>) {
        Config::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from `lookup`, which maps a variable name to its value.
    ///
    /// Unparsable values keep their default. One message per rejected value is returned
    /// alongside the config, since logging is usually not set up yet at this point.
    pub fn from_lookup<F>(lookup: F) -> (Self, Vec<String>)
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();
        let mut problems = Vec::new();

        if let Some(seed) = parse_var::<u64>(&lookup, Config::SEED_VAR, &mut problems) {
            config.seed = Some(seed);
        }
        match parse_var::<u64>(&lookup, Config::TICK_MS_VAR, &mut problems) {
            Some(0) => problems.push(format!(
                "{} must be at least 1, using {}",
                Config::TICK_MS_VAR,
                Config::DEFAULT_TICK_MS
            )),
            Some(ms) => config.tick_interval = Duration::from_millis(ms),
            None => {}
        }
        if let Some(level) = parse_var::<Level>(&lookup, Config::LOG_VAR, &mut problems) {
            config.log_level = level;
        }
        if let Some(dir) = lookup(Config::LOG_DIR_VAR).filter(|d| !d.trim().is_empty()) {
            config.log_dir = PathBuf::from(dir);
        }

        (config, problems)
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    problems: &mut Vec<String>,
) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            problems.push(format!("ignoring invalid {}={:?}", key, raw));
            None
        }
    }
}
