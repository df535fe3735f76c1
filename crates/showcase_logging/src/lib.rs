#![deny(missing_docs)]
//! Shared logging utilities for the showcase workspace.
//!
//! This crate provides the `showcase_*` logging macros used by the engine and
//! the app, plus a minimal test initializer for the global logger.

use log::LevelFilter;

/// Environment variable that overrides the default log level.
pub const LOG_LEVEL_VAR: &str = "SHOWCASE_LOG";

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! showcase_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! showcase_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! showcase_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! showcase_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! showcase_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Parses a level name such as `"debug"` or `"WARN"`.
///
/// Returns `None` for anything `log` does not recognise.
pub fn parse_level(raw: &str) -> Option<LevelFilter> {
    raw.trim().parse::<LevelFilter>().ok()
}

/// Resolves the level to log at: `SHOWCASE_LOG` when set and valid, otherwise `fallback`.
pub fn level_from_env(fallback: LevelFilter) -> LevelFilter {
    std::env::var(LOG_LEVEL_VAR)
        .ok()
        .as_deref()
        .and_then(parse_level)
        .unwrap_or(fallback)
}

/// Initializes a simple terminal logger for use in tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    let fallback = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level_from_env(fallback),
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_level_names_case_insensitively() {
        assert_eq!(parse_level("debug"), Some(LevelFilter::Debug));
        assert_eq!(parse_level(" WARN "), Some(LevelFilter::Warn));
        assert_eq!(parse_level("off"), Some(LevelFilter::Off));
        assert_eq!(parse_level("loud"), None);
    }
}
