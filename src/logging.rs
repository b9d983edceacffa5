//! Logging configuration using the tracing ecosystem.
//!
//! Logs go to a daily-rotated file so they never interleave with the TUI.
//! Writes happen on a background thread; keep the guard returned by [`init`]
//! alive until exit so buffered lines are flushed. The level is controlled
//! through `RUST_LOG`.

use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

const DEFAULT_LOG_FILTER: &str = "refund_form=info,warn";

const LOG_FILE_PREFIX: &str = "refund-form.log";

/// Initialize the logging system.
///
/// Log files are written to [`log_directory`], e.g.
/// `~/.local/share/refund-form/logs/` on Linux.
///
/// # Errors
///
/// Returns an error if the log directory cannot be created or a global
/// subscriber is already set.
pub fn init() -> anyhow::Result<WorkerGuard> {
    let log_dir = log_directory()?;
    std::fs::create_dir_all(&log_dir)?;

    let (writer, guard) = tracing_appender::non_blocking(RollingFileAppender::new(
        Rotation::DAILY,
        &log_dir,
        LOG_FILE_PREFIX,
    ));

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .with(filter)
        .try_init()?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        log_dir = %log_dir.display(),
        "refund-form starting up"
    );
    Ok(guard)
}

/// Where log files are stored.
pub fn log_directory() -> anyhow::Result<PathBuf> {
    let base_dir = dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine local data directory"))?;
    Ok(base_dir.join("refund-form").join("logs"))
}

/// Log shutdown and flush pending lines.
pub fn shutdown(guard: Option<WorkerGuard>) {
    tracing::info!("refund-form shutting down");
    drop(guard);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_directory_is_app_specific() {
        let dir = log_directory().unwrap();
        assert!(dir.ends_with("refund-form/logs"));
    }

    #[test]
    fn test_default_filter_parses() {
        assert!(EnvFilter::try_new(DEFAULT_LOG_FILTER).is_ok());
    }
}
