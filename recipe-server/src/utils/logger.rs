//! Logging Infrastructure
//!
//! Structured logging for development (pretty) and production (JSON, file).

use std::path::Path;

use tracing_subscriber::EnvFilter;

/// Initialize the logger with optional JSON output and a daily rolling file
///
/// `RUST_LOG` wins over `log_level` when set.
pub fn init_logger_with_file(log_level: Option<&str>, json: Option<bool>, log_dir: Option<&str>) {
    let level = log_level.unwrap_or("info");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "recipe_server={level},shared={level},tower_http={level},sqlx=warn"
        ))
    });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(true);

    let appender = log_dir
        .map(Path::new)
        .filter(|p| p.exists())
        .map(|dir| tracing_appender::rolling::daily(dir, "recipe-server"));

    // try_init: tests may install a subscriber more than once
    let result = match (json.unwrap_or(false), appender) {
        (true, Some(file)) => builder.json().with_writer(file).try_init(),
        (true, None) => builder.json().try_init(),
        (false, Some(file)) => builder.with_ansi(false).with_writer(file).try_init(),
        (false, None) => builder.try_init(),
    };

    if let Err(e) = result {
        eprintln!("Logger already initialized: {e}");
    }
}
