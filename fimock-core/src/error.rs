use std::path::PathBuf;
use thiserror::Error;

/// Failures while locating or reading a fixture file.
///
/// These never reach a caller verbatim: the gate logs them and answers
/// with a generic message.
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("invalid fixture path component: {0:?}")]
    InvalidPath(String),

    #[error("failed to read fixture {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failures while loading startup configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to scan fixture root {path}: {source}")]
    FixtureRoot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
