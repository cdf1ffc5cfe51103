//! # Logger
//!
//! Console and session-file logging for the planner executables. Records are prefixed with the
//! seconds elapsed since the session epoch and a coloured level tag. Debug and trace records also
//! carry their target so per-stage planner output can be told apart.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use std::fmt;

use colored::{ColoredString, Colorize};
use log::{info, Level, Record};
use thiserror::Error;

use crate::session::{self, Session};

pub use log::LevelFilter;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors associated with initialising the logger.
#[derive(Debug, Error)]
pub enum LoggerInitError {
    #[error("Expected a log level of at least `INFO`, found `{0}`")]
    InvalidMinLogLevel(LevelFilter),

    #[error("Error initialising the log file: {0}")]
    LogFileInitError(std::io::Error),

    #[error("An error occured while setting up the logger: {0}")]
    FernInitError(log::SetLoggerError),
}

// ---------------------------------------------------------------------------
// STRUCTS
// ---------------------------------------------------------------------------

/// Logger configuration.
///
/// `module_levels` caps individual targets below `min_level`, for example to keep the per-stage
/// planner traces out of a run that otherwise logs at trace level.
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub min_level: LevelFilter,
    pub module_levels: Vec<(&'static str, LevelFilter)>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl LogConfig {
    pub fn new(min_level: LevelFilter) -> Self {
        Self {
            min_level,
            module_levels: Vec::new(),
        }
    }

    /// Limit the records from `module` (and its children) to `level`.
    pub fn level_for(mut self, module: &'static str, level: LevelFilter) -> Self {
        self.module_levels.push((module, level));
        self
    }

    /// The effective level for a target, the last matching override wins.
    pub fn level_of(&self, target: &str) -> LevelFilter {
        self.module_levels
            .iter()
            .rev()
            .find(|(module, _)| is_within(target, module))
            .map(|(_, level)| *level)
            .unwrap_or(self.min_level)
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Initialise the logger for this execution.
///
/// `config.min_level` must be at least `INFO` so the session header is always recorded. Must only
/// be called once per process.
pub fn logger_init(config: &LogConfig, session: &Session) -> Result<(), LoggerInitError> {
    if config.min_level < Level::Info {
        return Err(LoggerInitError::InvalidMinLogLevel(config.min_level));
    }

    let log_file =
        fern::log_file(&session.log_file_path).map_err(LoggerInitError::LogFileInitError)?;

    let filter_config = config.clone();
    let dispatch = fern::Dispatch::new()
        .format(format_record)
        .level(LevelFilter::Trace)
        .filter(move |meta| meta.level() <= filter_config.level_of(meta.target()))
        .chain(std::io::stdout())
        .chain(log_file);

    dispatch.apply().map_err(LoggerInitError::FernInitError)?;

    info!("Logging initialised");
    if let Some(epoch) = session::get_epoch() {
        info!("    Session epoch: {}", epoch);
    }
    info!("    Log level: {:?}", config.min_level);
    for (module, level) in &config.module_levels {
        info!("    Log level for {}: {:?}", module, level);
    }
    info!("    Log file path: {:?}", session.log_file_path);

    Ok(())
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

fn format_record(out: fern::FormatCallback, message: &fmt::Arguments, record: &Record) {
    let elapsed_s = session::get_elapsed_seconds();

    if record.level() > Level::Info {
        out.finish(format_args!(
            "[{:10.6} {}] {}: {}",
            elapsed_s,
            level_tag(record.level()),
            record.target(),
            message
        ))
    } else {
        out.finish(format_args!(
            "[{:10.6} {}] {}",
            elapsed_s,
            level_tag(record.level()),
            message
        ))
    }
}

/// True if `target` is `module` or one of its submodules.
fn is_within(target: &str, module: &str) -> bool {
    target == module
        || (target.starts_with(module) && target[module.len()..].starts_with("::"))
}

fn level_tag(level: Level) -> ColoredString {
    match level {
        Level::Trace => "TRC".dimmed().italic(),
        Level::Debug => "DBG".dimmed(),
        Level::Info => "INF".normal(),
        Level::Warn => "WRN".yellow(),
        Level::Error => "ERR".red().bold(),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_level_of() {
        let config = LogConfig::new(LevelFilter::Trace)
            .level_for("track_lib::nav", LevelFilter::Debug)
            .level_for("track_lib::nav::waypoints", LevelFilter::Info);

        assert_eq!(config.level_of("track_exec"), LevelFilter::Trace);
        assert_eq!(config.level_of("track_lib::nav"), LevelFilter::Debug);
        assert_eq!(config.level_of("track_lib::nav::boundary"), LevelFilter::Debug);
        assert_eq!(config.level_of("track_lib::nav::waypoints"), LevelFilter::Info);

        // Prefix without a module separator is a different module
        assert_eq!(config.level_of("track_lib::navigation"), LevelFilter::Trace);
    }
}
