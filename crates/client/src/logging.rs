//! Logging setup: stderr plus an optional per-session log file.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::SimConfig;

pub const LOG_FILE_NAME: &str = "agent-sim.log";

/// Installs the global subscriber.
///
/// The returned guard flushes the log file on drop, so keep it alive until
/// the end of `main`.
pub fn setup_logging(config: &SimConfig) -> Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let stderr_layer = fmt::layer().with_writer(std::io::stderr);

    let session_dir = if config.log_to_file {
        let base = config.log_dir.clone().unwrap_or_else(log_dir);
        Some(session_log_dir(&base, config.session_id.as_deref())?)
    } else {
        None
    };

    let (file_layer, guard) = match &session_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::never(dir, LOG_FILE_NAME);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    if let Some(dir) = &session_dir {
        tracing::info!("Log file: {}", dir.join(LOG_FILE_NAME).display());
    }

    Ok(guard)
}

/// Platform-specific log directory for the simulator.
///
/// - Linux: `~/.cache/agent-sim/logs` (or `$XDG_CACHE_HOME/agent-sim/logs`)
/// - macOS: `~/Library/Caches/agent-sim/logs`
/// - Windows: `%LOCALAPPDATA%\agent-sim\cache\logs`
/// - Fallback: `/tmp/agent-sim/logs`
pub fn log_dir() -> PathBuf {
    let base_dir = directories::ProjectDirs::from("", "", "agent-sim")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp/agent-sim"));

    base_dir.join("logs")
}

/// Creates the log directory for one session under `base`.
///
/// Without a session id, one is generated from the current time.
pub fn session_log_dir(base: &Path, session_id: Option<&str>) -> Result<PathBuf> {
    let session_id = match session_id {
        Some(id) => id.to_owned(),
        None => {
            let timestamp = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|elapsed| elapsed.as_secs())
                .unwrap_or_default();
            format!("session_{timestamp}")
        }
    };

    let dir = base.join(session_id);
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn session_dir_uses_given_id() {
        let temp = TempDir::new().unwrap();

        let dir = session_log_dir(temp.path(), Some("demo")).unwrap();

        assert_eq!(dir, temp.path().join("demo"));
        assert!(dir.is_dir());
    }

    #[test]
    fn session_dir_is_generated_when_missing() {
        let temp = TempDir::new().unwrap();

        let dir = session_log_dir(temp.path(), None).unwrap();

        let name = dir.file_name().and_then(|n| n.to_str()).unwrap();
        assert!(name.starts_with("session_"));
        assert!(dir.is_dir());
    }

    #[test]
    fn existing_session_dir_is_reused() {
        let temp = TempDir::new().unwrap();
        let first = session_log_dir(temp.path(), Some("again")).unwrap();
        std::fs::write(first.join(LOG_FILE_NAME), "kept").unwrap();

        let second = session_log_dir(temp.path(), Some("again")).unwrap();

        assert_eq!(first, second);
        assert_eq!(
            std::fs::read_to_string(second.join(LOG_FILE_NAME)).unwrap(),
            "kept"
        );
    }

    #[test]
    fn default_log_dir_ends_in_logs() {
        assert!(log_dir().ends_with("logs"));
    }
}
