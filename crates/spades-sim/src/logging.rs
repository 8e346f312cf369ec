use std::fs::{self, File};
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::Level;
use tracing_appender::non_blocking::{self, WorkerGuard};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::LoggingConfig;

pub struct LoggingGuard {
    _guard: WorkerGuard,
    pub log_path: PathBuf,
}

/// Installs the global subscriber: human readable lines on stderr, plus JSON lines
/// in `logging.log_path` when structured logging is enabled.
///
/// `verbose` raises the default level to `debug`, which prints every deal and trick.
/// `RUST_LOG` overrides both.
pub fn init_logging(logging: &LoggingConfig, verbose: bool) -> Result<Option<LoggingGuard>> {
    let configured = logging.level().unwrap_or(Level::INFO);
    let level = if verbose && configured != Level::TRACE {
        Level::DEBUG
    } else {
        configured
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    let console = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time();

    if !logging.enable_structured {
        // Ignore error if a global subscriber is already set (e.g., when running in tests)
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(console)
            .try_init();
        return Ok(None);
    }

    let log_path = logging.log_path.clone();
    if let Some(dir) = log_path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("creating log directory at {}", dir.display()))?;
    }
    let file = File::create(&log_path)
        .with_context(|| format!("creating log file at {}", log_path.display()))?;

    let (writer, guard) = non_blocking::NonBlockingBuilder::default()
        .lossy(false)
        .finish(file);

    let json = fmt::layer()
        .json()
        .with_current_span(false)
        .with_span_events(FmtSpan::NONE)
        .with_writer(writer);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(json)
        .try_init();

    Ok(Some(LoggingGuard {
        _guard: guard,
        log_path,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structured_logging_creates_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = LoggingConfig {
            enable_structured: true,
            tracing_level: "info".to_string(),
            log_path: dir.path().join("logs").join("run.jsonl"),
        };
        let guard = init_logging(&config, false)
            .expect("logging initialises")
            .expect("guard returned");
        assert!(guard.log_path.exists());
    }

    #[test]
    fn console_only_returns_no_guard() {
        let config = LoggingConfig::default();
        assert!(init_logging(&config, true).expect("init").is_none());
    }
}
