//! Error types for gdpck-common.

use std::fmt;

use thiserror::Error;

/// Broad classification shared by every gdpck error type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Bad magic or signature bytes.
    Format,
    /// Archive or texture container version is not the supported one.
    UnsupportedVersion,
    /// Archive or entry flags are nonzero.
    UnsupportedFlags,
    /// Seek, read, write or mkdir failure, including out-of-bounds access.
    Io,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Format => "format error",
            Self::UnsupportedVersion => "unsupported version",
            Self::UnsupportedFlags => "unsupported flags",
            Self::Io => "I/O error",
        })
    }
}

/// Common error type for binary reading.
#[derive(Debug, Error)]
pub enum Error {
    /// End of buffer reached while reading.
    #[error("unexpected end of buffer: needed {needed} bytes but only {available} available")]
    UnexpectedEof { needed: usize, available: usize },

    /// Invalid magic bytes encountered.
    #[error("invalid magic: expected {expected:?}, got {actual:?}")]
    InvalidMagic { expected: Vec<u8>, actual: Vec<u8> },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidMagic { .. } => ErrorKind::Format,
            Self::UnexpectedEof { .. } | Self::Io(_) => ErrorKind::Io,
        }
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
