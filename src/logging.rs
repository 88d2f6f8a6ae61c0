//! Session logging.
//!
//! Nothing is configured until [`init`] is called. Each call to `init`
//! opens a fresh `session_<timestamp>.log` in the configured directory and
//! keeps it open for as long as the returned [`LogGuard`] lives.

use std::path::{Path, PathBuf};

use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::Config;
use crate::error::{DataError, DataResult};

/// Keeps the background log writer alive. Dropping it flushes the file.
pub struct LogGuard {
    path: PathBuf,
    _worker: WorkerGuard,
}

impl LogGuard {
    /// File this session logs to
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Install the global subscriber writing to a new session log file.
pub fn init(config: &Config) -> DataResult<LogGuard> {
    prepare_log_dir(&config.log_dir, config.prune_below_bytes)?;

    let file_name = session_file_name();
    let file_appender = tracing_appender::rolling::never(&config.log_dir, &file_name);
    let (writer, worker) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .map_err(|e| DataError::Logging(format!("invalid log filter: {}", e)))?;

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()
        .map_err(|e| DataError::Logging(e.to_string()))?;

    let path = config.log_dir.join(file_name);
    info!("Logging initialized: {}", path.display());

    Ok(LogGuard {
        path,
        _worker: worker,
    })
}

const SESSION_PREFIX: &str = "session_";
const SESSION_SUFFIX: &str = ".log";

fn session_file_name() -> String {
    chrono::Local::now()
        .format("session_%Y-%m-%d_%H-%M-%S.log")
        .to_string()
}

fn is_session_log(name: &str) -> bool {
    name.len() > SESSION_PREFIX.len() + SESSION_SUFFIX.len()
        && name.starts_with(SESSION_PREFIX)
        && name.ends_with(SESSION_SUFFIX)
}

/// Create the log directory, or clear out small leftover session logs if it
/// exists. Only `session_*.log` files are touched. Returns how many files
/// were removed.
pub fn prepare_log_dir(dir: &Path, prune_below_bytes: u64) -> DataResult<usize> {
    let io_error = |source: std::io::Error| DataError::Io {
        path: dir.to_path_buf(),
        source,
    };

    if !dir.exists() {
        std::fs::create_dir_all(dir).map_err(io_error)?;
        return Ok(0);
    }

    let mut removed = 0;
    for entry in std::fs::read_dir(dir).map_err(io_error)? {
        let entry = entry.map_err(io_error)?;
        if !entry.file_name().to_str().is_some_and(is_session_log) {
            continue;
        }
        let Ok(metadata) = entry.metadata() else {
            continue;
        };
        // Files that can't be removed (still open, permissions) are left alone.
        if metadata.is_file() && metadata.len() < prune_below_bytes && std::fs::remove_file(entry.path()).is_ok() {
            removed += 1;
        }
    }

    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_creates_missing_dir() {
        let temp_dir = TempDir::new().unwrap();
        let log_dir = temp_dir.path().join("logs");

        assert_eq!(prepare_log_dir(&log_dir, 1024).unwrap(), 0);
        assert!(log_dir.is_dir());
    }

    #[test]
    fn test_prunes_only_small_files() {
        let temp_dir = TempDir::new().unwrap();
        let small = "session_2025-05-12_10-00-00.log";
        let big = "session_2025-05-12_11-00-00.log";
        std::fs::write(temp_dir.path().join(small), vec![b'x'; 10]).unwrap();
        std::fs::write(temp_dir.path().join(big), vec![b'x'; 2048]).unwrap();
        std::fs::create_dir(temp_dir.path().join("session_archive.log")).unwrap();

        assert_eq!(prepare_log_dir(temp_dir.path(), 1024).unwrap(), 1);
        assert!(!temp_dir.path().join(small).exists());
        assert!(temp_dir.path().join(big).exists());
        assert!(temp_dir.path().join("session_archive.log").exists());
    }

    #[test]
    fn test_leaves_other_small_files() {
        let temp_dir = TempDir::new().unwrap();
        for name in ["main.rs", "notes.log", "session_.log", "session_draft.txt"] {
            std::fs::write(temp_dir.path().join(name), b"tiny").unwrap();
        }

        assert_eq!(prepare_log_dir(temp_dir.path(), 1024).unwrap(), 0);
        for name in ["main.rs", "notes.log", "session_.log", "session_draft.txt"] {
            assert!(temp_dir.path().join(name).exists(), "{name} was removed");
        }
    }

    #[test]
    fn test_session_log_names() {
        assert!(is_session_log(&session_file_name()));
        assert!(is_session_log("session_old.log"));
        assert!(!is_session_log("session_.log"));
        assert!(!is_session_log("game.log"));
    }

    #[test]
    fn test_session_file_name() {
        let name = session_file_name();
        assert!(name.starts_with("session_"));
        assert!(name.ends_with(".log"));
        assert_eq!(name.len(), "session_2025-05-12_10-00-00.log".len());
    }
}
