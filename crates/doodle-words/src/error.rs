//! Error types for the vocabulary layer.

use std::path::PathBuf;

use crate::Difficulty;

/// Errors that can occur while loading or looking up words.
#[derive(Debug, thiserror::Error)]
pub enum WordError {
    /// A word file exists but could not be read.
    #[error("failed to read word file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A word file was read but contained no words.
    #[error("word list for {0} is empty")]
    EmptyList(Difficulty),

    /// A difficulty name did not match any tier.
    #[error("unknown difficulty: {0}")]
    UnknownDifficulty(String),
}
