//! Error types for compiled texture handling.

use std::path::PathBuf;

use gdpck_common::ErrorKind;
use thiserror::Error;

/// Errors that can occur when decoding compiled textures.
#[derive(Debug, Error)]
pub enum Error {
    /// Common library error.
    #[error("{0}")]
    Common(#[from] gdpck_common::Error),

    /// Unsupported container version.
    #[error("unsupported GST2 version: {0}")]
    UnsupportedVersion(u32),

    /// A mipmap payload runs past the end of the buffer.
    #[error("mipmap {index} declares {size} bytes but only {available} remain")]
    MipmapOutOfBounds {
        index: u32,
        size: u32,
        available: usize,
    },

    /// Could not write a mipmap file.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Common(e) => e.kind(),
            Self::UnsupportedVersion(_) => ErrorKind::UnsupportedVersion,
            Self::MipmapOutOfBounds { .. } | Self::Write { .. } => ErrorKind::Io,
        }
    }
}

/// Result type for compiled texture operations.
pub type Result<T> = std::result::Result<T, Error>;
