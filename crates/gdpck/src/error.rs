//! Error types for the extraction pipeline.

use std::path::PathBuf;

use gdpck_common::ErrorKind;
use thiserror::Error;

/// Errors that abort an extraction run.
#[derive(Debug, Error)]
pub enum Error {
    /// Archive parsing or extraction failed.
    #[error(transparent)]
    Pck(#[from] gdpck_pck::Error),

    /// Decoding a compiled texture failed.
    #[error("compiled texture {}: {source}", path.display())]
    Texture {
        path: PathBuf,
        source: gdpck_ctex::Error,
    },
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Pck(e) => e.kind(),
            Self::Texture { source, .. } => source.kind(),
        }
    }
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;
