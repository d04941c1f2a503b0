//! Error types for loading, rendering and writing style guides

use crate::ruledoc::formats::FormatError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuledocError>;

#[derive(Debug, Error)]
pub enum RuledocError {
    /// Reading the ruleset or writing the style guide failed.
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl RuledocError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        RuledocError::Io {
            path: path.into(),
            source,
        }
    }
}
