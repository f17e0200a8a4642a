//! Errors returned when building or loading an [`NGramModel`](crate::NGramModel).

use std::path::PathBuf;

use thiserror::Error;

/// Result type used throughout the crate.
pub type Result<T, E = NGramError> = std::result::Result<T, E>;

/// Everything that can go wrong when building a model.
#[derive(Debug, Error)]
pub enum NGramError {
    /// An n-gram model needs at least one token per n-gram.
    #[error("invalid model order {0}: the order must be at least 1")]
    InvalidOrder(usize),
    /// The training text could not be read, and the read policy is
    /// [`ReadErrorPolicy::Strict`](crate::ReadErrorPolicy::Strict).
    #[error("could not read training text from {path:?}: {source}")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },
}

impl NGramError {
    pub fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        Self::Io {
            source,
            path: path.into(),
        }
    }
}
