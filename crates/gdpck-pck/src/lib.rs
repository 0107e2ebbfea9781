//! PCK resource archive reader.
//!
//! A PCK archive is a flat container:
//!
//! - A fixed 100-byte header (`GDPC` magic, format version, engine version,
//!   flags, files-base, reserved words, entry count)
//! - A directory table of 4-byte aligned entry records
//! - A payload region starting at the files-base
//!
//! Only format version 2 is supported, and any nonzero archive or entry
//! flags are rejected, so encrypted archives are refused rather than
//! decrypted. Every entry carries an MD5 digest that is checked on
//! extraction; a mismatch is reported but does not stop extraction.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use gdpck_pck::{PckArchive, OUTPUT_ROOT};
//!
//! let archive = PckArchive::open("game.pck")?;
//!
//! for entry in archive.iter() {
//!     let extracted = archive.extract(entry, Path::new(OUTPUT_ROOT))?;
//!     println!("{} ({} bytes)", extracted.destination.display(), extracted.data.len());
//! }
//! # Ok::<(), gdpck_pck::Error>(())
//! ```

mod archive;
mod entry;
mod error;
mod extract;
pub mod header;

pub use archive::PckArchive;
pub use entry::{PckEntry, PATH_ALIGNMENT, RES_SCHEME};
pub use error::{Error, Result};
pub use extract::{ExtractedEntry, OUTPUT_ROOT};
pub use header::{ArchiveHeader, EngineVersion, FORMAT_VERSION, PCK_MAGIC};
