//! File logging for play-test sessions.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Platform cache directory for logs.
///
/// - macOS: `~/Library/Caches/playmode/logs`
/// - Linux: `~/.cache/playmode/logs` (or `$XDG_CACHE_HOME/playmode/logs`)
/// - Windows: `%LOCALAPPDATA%\playmode\cache\logs`
/// - Fallback: `/tmp/playmode/logs`
pub fn log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "playmode")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp/playmode"))
        .join("logs")
}

/// Routes `tracing` output to `<log_dir>/<session>/client.log`.
///
/// The returned guard flushes the writer on drop; keep it alive for the
/// whole run. Stdout stays free for the game transcript.
pub fn setup_logging(session_id: Option<&str>) -> Result<(String, WorkerGuard)> {
    let session_id = session_id.map(str::to_string).unwrap_or_else(|| {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or_default();
        format!("session_{}", timestamp)
    });

    let session_log_dir = log_dir().join(&session_id);
    std::fs::create_dir_all(&session_log_dir)?;

    let file_appender = tracing_appender::rolling::never(&session_log_dir, "client.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    tracing::info!("Logging initialized: session={}", session_id);
    tracing::info!("Log file: {}/client.log", session_log_dir.display());

    Ok((session_id, guard))
}
