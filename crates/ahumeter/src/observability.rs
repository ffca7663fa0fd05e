//! Logging and tracing initialization.
//!
//! Human-readable events go to stderr; when a log destination is
//! configured (config `log_dir`, `AHUMETER_LOG_DIR`, or
//! `AHUMETER_LOG_PATH`) a JSONL copy is written through a non-blocking
//! appender. The returned guard must stay alive for the process
//! lifetime or buffered log lines are dropped.

use std::path::PathBuf;

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Default file name inside a configured log directory.
const LOG_FILE_NAME: &str = "ahumeter.jsonl";

/// Resolved logging destinations.
#[derive(Debug, Default)]
pub struct ObservabilityConfig {
    /// Explicit log file path (wins over `log_dir`).
    pub log_path: Option<PathBuf>,
    /// Directory to place the JSONL log file in.
    pub log_dir: Option<PathBuf>,
}

impl ObservabilityConfig {
    /// Build from the environment, with the config file's `log_dir` as
    /// the fallback.
    ///
    /// `AHUMETER_LOG_PATH` beats `AHUMETER_LOG_DIR` beats the config value.
    pub fn from_env_with_overrides(config_log_dir: Option<PathBuf>) -> Self {
        let log_path = std::env::var_os("AHUMETER_LOG_PATH").map(PathBuf::from);
        let log_dir = std::env::var_os("AHUMETER_LOG_DIR")
            .map(PathBuf::from)
            .or(config_log_dir);
        Self { log_path, log_dir }
    }

    /// The JSONL file to write, if any destination is configured.
    fn log_file(&self) -> Option<PathBuf> {
        self.log_path
            .clone()
            .or_else(|| self.log_dir.as_ref().map(|dir| dir.join(LOG_FILE_NAME)))
    }
}

/// Build the level filter from CLI flags and the configured level.
///
/// `RUST_LOG` wins outright when set; otherwise `--quiet` forces
/// errors-only, `-v`/`-vv` raise to debug/trace, and the config file's
/// level is the default.
pub fn env_filter(quiet: bool, verbose: u8, config_level: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => config_level,
            1 => "debug",
            _ => "trace",
        }
    };
    EnvFilter::new(level)
}

/// Install the global subscriber.
///
/// Returns the appender guard when a file destination is active; the
/// caller holds it until exit.
pub fn init_observability(
    config: &ObservabilityConfig,
    filter: EnvFilter,
) -> anyhow::Result<Option<WorkerGuard>> {
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let Some(log_file) = config.log_file() else {
        tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer)
            .init();
        return Ok(None);
    };

    let dir = log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), PathBuf::from);
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))?;
    let file_name = log_file
        .file_name()
        .context("log path has no file name")?
        .to_os_string();

    let appender = tracing_appender::rolling::never(&dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let json_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_writer(writer)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(json_layer)
        .init();
    Ok(Some(guard))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_path_wins_over_dir() {
        let config = ObservabilityConfig {
            log_path: Some(PathBuf::from("/tmp/explicit.jsonl")),
            log_dir: Some(PathBuf::from("/tmp/logs")),
        };
        assert_eq!(
            config.log_file(),
            Some(PathBuf::from("/tmp/explicit.jsonl"))
        );
    }

    #[test]
    fn dir_appends_default_file_name() {
        let config = ObservabilityConfig {
            log_path: None,
            log_dir: Some(PathBuf::from("/tmp/logs")),
        };
        assert_eq!(
            config.log_file(),
            Some(PathBuf::from("/tmp/logs/ahumeter.jsonl"))
        );
    }

    #[test]
    fn no_destination_means_stderr_only() {
        assert_eq!(ObservabilityConfig::default().log_file(), None);
    }
}
