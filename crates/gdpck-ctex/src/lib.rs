//! Compiled texture handling.
//!
//! Some archive entries (`*.ctex`) hold a compiled texture container that
//! packs every mipmap level into one file:
//!
//! - `GST2` signature and a version word
//! - Width and height
//! - A data format word at offset 36, which also serves as the mipmap count
//! - From offset `0x34`, length-prefixed mipmap payloads
//!
//! This crate splits those payloads back out into `<file>_0`, `<file>_1`, ...
//! next to the extracted container.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use gdpck_ctex::split_mipmaps;
//!
//! let data = std::fs::read("export/icon.ctex")?;
//! if let Some(texture) = split_mipmaps(Path::new("export/icon.ctex"), &data)? {
//!     println!("{}x{}, {} mipmaps", texture.width, texture.height, texture.mipmaps.len());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
mod header;
mod split;

use std::path::Path;

pub use error::{Error, Result};
pub use header::{CtexHeader, DataFormat};
pub use split::{mipmap_path, split_mipmaps, CompiledTexture, Mipmap};

/// Compiled texture signature bytes.
pub const CTEX_SIGNATURE: &[u8; 4] = b"GST2";

/// The only supported container version.
pub const CTEX_VERSION: u32 = 1;

/// File name suffix of entries that may hold a compiled texture.
pub const CTEX_EXTENSION: &str = ".ctex";

/// Check whether an extracted file should be handed to the texture decoder.
pub fn has_ctex_extension(path: &Path) -> bool {
    path.as_os_str()
        .to_string_lossy()
        .ends_with(CTEX_EXTENSION)
}
