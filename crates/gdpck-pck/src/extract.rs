//! Entry extraction and integrity verification.

use std::fs;
use std::path::{Path, PathBuf};

use gdpck_common::digest;
use log::{debug, warn};

use crate::archive::PckArchive;
use crate::entry::PckEntry;
use crate::{Error, Result};

/// Default output root for extracted files.
pub const OUTPUT_ROOT: &str = "export";

/// Outcome of extracting a single entry.
#[derive(Debug, Clone)]
pub struct ExtractedEntry<'a> {
    /// Where the payload was written.
    pub destination: PathBuf,
    /// The payload bytes, borrowed from the archive.
    pub data: &'a [u8],
    /// Whether the payload matched the stored digest.
    pub digest_ok: bool,
}

impl PckArchive {
    /// Extract one entry under `output_root`.
    ///
    /// The payload is written even when its digest does not match; the
    /// mismatch is logged and reported through
    /// [`ExtractedEntry::digest_ok`]. Every I/O failure is returned as an
    /// error.
    pub fn extract(&self, entry: &PckEntry, output_root: &Path) -> Result<ExtractedEntry<'_>> {
        let data = self.read(entry)?;
        let destination = entry.output_path(output_root);

        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent).map_err(|source| Error::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        fs::write(&destination, data).map_err(|source| Error::Write {
            path: destination.clone(),
            source,
        })?;
        debug!("Wrote {} bytes to {}", data.len(), destination.display());

        let actual = digest::md5(data);
        let digest_ok = actual == *entry.md5();
        if !digest_ok {
            warn!(
                "MD5 hash mismatch for file {}: expected {}, got {}",
                destination.display(),
                digest::to_hex(entry.md5()),
                digest::to_hex(&actual)
            );
        }

        Ok(ExtractedEntry {
            destination,
            data,
            digest_ok,
        })
    }
}
