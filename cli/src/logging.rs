//! Logging configuration with file-based output and size-based rotation.
//!
//! Writes logs to `~/.config/amascut/amascut.log` (or platform equivalent)
//! with 10 MB size-based rotation. Console output goes to stderr so replay
//! output on stdout stays clean. Set `DEBUG_LOGGING=1` to enable debug
//! output for amascut crates.

use rolling_file::{BasicRollingFileAppender, RollingConditionBasic};
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

const MAX_LOG_SIZE: u64 = 10 * 1024 * 1024;

/// Initialize logging with dual output (file + stderr).
///
/// Returns a `WorkerGuard` that must be held for the process lifetime so
/// buffered lines are flushed. Returns `None` and logs to stderr only if the
/// log file cannot be created.
pub fn init() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let debug_logging = std::env::var("DEBUG_LOGGING").is_ok();

    let Some(log_dir) = dirs::config_dir().map(|config| config.join("amascut")) else {
        init_console_only(debug_logging);
        return None;
    };

    if let Err(e) = std::fs::create_dir_all(&log_dir) {
        // Subscriber not installed yet
        eprintln!("Failed to create log directory {log_dir:?}: {e}, using stderr only");
        init_console_only(debug_logging);
        return None;
    }

    let log_path = log_dir.join("amascut.log");
    let file_appender = match BasicRollingFileAppender::new(
        &log_path,
        RollingConditionBasic::new().max_size(MAX_LOG_SIZE),
        1,
    ) {
        Ok(appender) => appender,
        Err(e) => {
            eprintln!("Failed to create log file at {log_path:?}: {e}");
            init_console_only(debug_logging);
            return None;
        }
    };

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_span_events(FmtSpan::NONE);

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_span_events(FmtSpan::NONE);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .with(filter(debug_logging))
        .init();

    tracing::info!(log_file = ?log_path, debug_logging, "Amascut logging initialized");

    Some(guard)
}

fn init_console_only(debug_logging: bool) {
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_span_events(FmtSpan::NONE);

    tracing_subscriber::registry()
        .with(console_layer)
        .with(filter(debug_logging))
        .init();
}

fn filter(debug_logging: bool) -> EnvFilter {
    let directive = if debug_logging {
        "info,amascut_core=debug,amascut_cli=debug"
    } else {
        "info"
    };
    EnvFilter::new(directive)
}
