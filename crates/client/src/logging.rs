//! Logging setup: stderr always, plus an optional per-session log file.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::ClientConfig;

const LOG_FILE_NAME: &str = "client.log";

/// Install the global tracing subscriber.
///
/// The filter comes from `RUST_LOG` with `info` as the floor. When file
/// logging is enabled the returned guard must be kept alive for the lifetime
/// of the process, or buffered lines are lost.
pub fn setup_logging(config: &ClientConfig) -> Result<Option<WorkerGuard>> {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    if !config.log_to_file {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .init();
        return Ok(None);
    }

    let session_id = config.session_id.clone().unwrap_or_else(generate_session_id);
    let base = config.log_dir.clone().unwrap_or_else(default_log_dir);
    let session_log_dir = session_log_dir(&base, &session_id)?;

    let file_appender = tracing_appender::rolling::never(&session_log_dir, LOG_FILE_NAME);
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    tracing::info!("Logging initialized: session={}", session_id);
    tracing::info!("Log file: {}", session_log_dir.join(LOG_FILE_NAME).display());

    Ok(Some(guard))
}

/// Platform-specific log directory.
///
/// - macOS: `~/Library/Caches/webtiles/logs`
/// - Linux: `~/.cache/webtiles/logs` (or `$XDG_CACHE_HOME/webtiles/logs`)
/// - Windows: `%LOCALAPPDATA%\webtiles\cache\logs`
/// - Fallback: `/tmp/webtiles/logs`
pub fn default_log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "webtiles")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp/webtiles"))
        .join("logs")
}

/// Create (if needed) and return the directory for one session's logs.
pub fn session_log_dir(base: &Path, session_id: &str) -> Result<PathBuf> {
    let dir = base.join(session_id);
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    Ok(dir)
}

fn generate_session_id() -> String {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default();
    format!("session_{}", timestamp)
}
