//! Logger setup for showcase_app.
//!
//! The mirror job logs to the terminal; the demo keeps the terminal for its
//! progress output and writes logs to `./showcase.log` instead.

use std::fs::File;
use std::path::PathBuf;

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

const LOG_FILE: &str = "./showcase.log";

/// Destination for log output.
pub enum LogDestination {
    /// Write to ./showcase.log in current directory.
    File,
    /// Write to the terminal; errors go to stderr.
    Terminal,
}

/// Initialize the logger with the specified destination.
///
/// The level defaults to `Info` and can be overridden with `SHOWCASE_LOG`.
pub fn initialize(destination: LogDestination) {
    let level = showcase_logging::level_from_env(LevelFilter::Info);
    let config = build_config();

    let loggers: Vec<Box<dyn SharedLogger>> = match destination {
        LogDestination::File => match create_file_logger(level, config) {
            Some(file_logger) => vec![file_logger],
            None => return,
        },
        LogDestination::Terminal => vec![TermLogger::new(
            level,
            config,
            TerminalMode::Mixed,
            ColorChoice::Auto,
        )],
    };

    let _ = CombinedLogger::init(loggers);
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}

fn create_file_logger(level: LevelFilter, config: Config) -> Option<Box<WriteLogger<File>>> {
    let log_path = PathBuf::from(LOG_FILE);
    match File::create(&log_path) {
        Ok(file) => Some(WriteLogger::new(level, config, file)),
        Err(err) => {
            eprintln!("Warning: Could not create log file at {:?}: {}", log_path, err);
            None
        }
    }
}
