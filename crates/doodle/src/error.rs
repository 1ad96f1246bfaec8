//! Unified error type for Doodle.

use std::path::PathBuf;

use doodle_turn::TurnError;
use doodle_words::WordError;

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid JSON for [`DoodleConfig`](crate::DoodleConfig).
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),

    /// An environment override could not be parsed.
    #[error("invalid value {value:?} for {var}")]
    InvalidEnv { var: &'static str, value: String },
}

/// Top-level error that wraps all crate-specific errors.
///
/// The `#[from]` attribute on each variant generates `From` impls, so
/// `?` converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum DoodleError {
    /// A scheduler error (rejected command, missing vocabulary, ...).
    #[error(transparent)]
    Turn(#[from] TurnError),

    /// A word file error.
    #[error(transparent)]
    Words(#[from] WordError),

    /// A configuration error.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
