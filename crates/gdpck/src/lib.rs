//! gdpck - PCK resource archive extraction library.
//!
//! This crate ties the gdpck crates together into the extraction pipeline:
//! parse the archive header and directory, write every entry under an output
//! root while checking its MD5, and split compiled textures into per-mipmap
//! files.
//!
//! # Crates
//!
//! - [`gdpck_common`] - Common utilities (binary reading, padding, MD5)
//! - [`gdpck_pck`] - PCK archive reading and entry extraction
//! - [`gdpck_ctex`] - Compiled texture (`GST2`) mipmap splitting
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use gdpck::prelude::*;
//!
//! let summary = unpack("game.pck", Path::new(OUTPUT_ROOT))?;
//! println!("{} entries, {} mipmaps", summary.entries, summary.mipmaps);
//! # Ok::<(), gdpck::Error>(())
//! ```

mod error;
mod pipeline;

// Re-export all sub-crates
pub use gdpck_common as common;
pub use gdpck_ctex as ctex;
pub use gdpck_pck as pck;

pub use error::{Error, Result};
pub use pipeline::{unpack, unpack_archive, Progress, UnpackSummary};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::{unpack, unpack_archive, Progress, UnpackSummary};
    pub use gdpck_common::{digest, padding, BinaryReader, ErrorKind};
    pub use gdpck_ctex::{split_mipmaps, CompiledTexture, DataFormat};
    pub use gdpck_pck::{ArchiveHeader, PckArchive, PckEntry, OUTPUT_ROOT};
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
