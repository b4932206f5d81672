#![forbid(unsafe_code)]

//! Logging setup.
//!
//! The terminal owns stdout while the app runs, so log output goes to a
//! file. Nothing is installed unless a log file is configured; the `tracing`
//! macros used across the workspace are then no-ops.
//!
//! The filter is read from `FOLIO_LOG` (standard `EnvFilter` syntax) and
//! falls back to [`LogConfig::default_filter`].

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directive.
pub const LOG_FILTER_ENV: &str = "FOLIO_LOG";

/// File logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Destination file (appended to, created if missing).
    pub file: PathBuf,
    /// Emit one JSON object per line instead of the text format.
    pub json: bool,
    /// Filter used when `FOLIO_LOG` is unset or invalid.
    pub default_filter: String,
}

impl LogConfig {
    /// Text logging at `info` into `file`.
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self {
            file: file.into(),
            json: false,
            default_filter: "info".into(),
        }
    }

    /// Switch to JSON lines.
    #[must_use]
    pub fn json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }
}

/// Logging initialization failure.
#[derive(Debug)]
pub enum LogInitError {
    /// The log file could not be opened.
    Open { path: PathBuf, source: io::Error },
    /// A global subscriber is already installed.
    AlreadyInstalled(String),
}

impl fmt::Display for LogInitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open { path, source } => {
                write!(f, "cannot open log file {}: {source}", path.display())
            }
            Self::AlreadyInstalled(msg) => write!(f, "logging already initialized: {msg}"),
        }
    }
}

impl std::error::Error for LogInitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Open { source, .. } => Some(source),
            Self::AlreadyInstalled(_) => None,
        }
    }
}

/// Install the global file subscriber.
///
/// # Errors
///
/// Fails if the file cannot be opened or a subscriber is already set.
pub fn init(config: &LogConfig) -> Result<(), LogInitError> {
    let file = open_log_file(config)?;
    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV)
        .unwrap_or_else(|_| EnvFilter::new(&config.default_filter));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file));

    let result = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    result.map_err(|e| LogInitError::AlreadyInstalled(e.to_string()))
}

fn open_log_file(config: &LogConfig) -> Result<File, LogInitError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.file)
        .map_err(|source| LogInitError::Open {
            path: config.file.clone(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let cfg = LogConfig::new("/tmp/folio.log");
        assert!(!cfg.json);
        assert_eq!(cfg.default_filter, "info");
        assert!(cfg.json(true).json);
    }

    #[test]
    fn unwritable_path_reports_open_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg = LogConfig::new(dir.path().join("missing").join("folio.log"));
        let err = init(&cfg).expect_err("parent directory does not exist");
        assert!(matches!(err, LogInitError::Open { .. }));
        assert!(err.to_string().contains("cannot open log file"));
    }

    #[test]
    fn init_writes_to_file_and_rejects_second_install() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("folio.log");
        let cfg = LogConfig::new(&path);
        init(&cfg).expect("first init");
        tracing::info!("portfolio log line");

        let contents = std::fs::read_to_string(&path).expect("read log");
        assert!(contents.contains("portfolio log line"));

        let second = init(&cfg);
        assert!(matches!(second, Err(LogInitError::AlreadyInstalled(_))));
    }
}
