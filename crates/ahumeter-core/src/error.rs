//! Error types for ahumeter-core.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),

    /// Configuration file not found after searching all locations.
    #[error("no configuration file found")]
    NotFound,

    /// No counter file path configured and no platform data directory available.
    #[error("cannot resolve a counter file path: no home directory")]
    NoDataDir,
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while loading or saving the counter file.
///
/// These never propagate to end users: the store recovers locally
/// (empty snapshot on read failure, dropped write on save failure)
/// and logs the error.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The backing file exists but could not be read.
    #[error("failed to read counter file {path}")]
    Read {
        /// Path of the backing file.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The backing file is not valid JSON for the expected layout.
    #[error("counter file {path} is malformed")]
    Parse {
        /// Path of the backing file.
        path: Utf8PathBuf,
        /// Underlying deserialization error.
        #[source]
        source: serde_json::Error,
    },

    /// The backing file could not be written.
    #[error("failed to write counter file {path}")]
    Write {
        /// Path of the backing file.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias using [`StoreError`].
pub type StoreResult<T> = Result<T, StoreError>;
