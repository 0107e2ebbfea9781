//! Error types for the PCK crate.

use std::path::PathBuf;

use gdpck_common::ErrorKind;
use thiserror::Error;

/// Errors that can occur when reading or extracting PCK archives.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Common library error.
    #[error("{0}")]
    Common(#[from] gdpck_common::Error),

    /// Invalid archive magic bytes.
    #[error("invalid PCK magic: expected 'GDPC', got {0:?}")]
    InvalidMagic([u8; 4]),

    /// Unsupported archive format version.
    #[error("unsupported PCK format version: {0}")]
    UnsupportedVersion(u32),

    /// Nonzero archive flags.
    #[error("unsupported archive flags {flags:#010x} ({names})")]
    UnsupportedFlags { flags: u32, names: String },

    /// Nonzero per-entry flags.
    #[error("unsupported flags {flags:#010x} ({names}) on entry {path}")]
    UnsupportedEntryFlags {
        path: String,
        flags: u32,
        names: String,
    },

    /// Entry payload lies outside the archive file.
    #[error("entry {path} out of bounds: {size} bytes at {offset:#x}, archive is {archive_len} bytes")]
    OutOfBounds {
        path: String,
        offset: u64,
        size: u64,
        archive_len: usize,
    },

    /// Could not create an output directory.
    #[error("failed to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Could not write an output file.
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
            Self::InvalidMagic(_) => ErrorKind::Format,
            Self::UnsupportedVersion(_) => ErrorKind::UnsupportedVersion,
            Self::UnsupportedFlags { .. } | Self::UnsupportedEntryFlags { .. } => {
                ErrorKind::UnsupportedFlags
            }
            Self::Io(_) | Self::OutOfBounds { .. } | Self::CreateDir { .. } | Self::Write { .. } => {
                ErrorKind::Io
            }
        }
    }
}

/// Result type for PCK operations.
pub type Result<T> = std::result::Result<T, Error>;
