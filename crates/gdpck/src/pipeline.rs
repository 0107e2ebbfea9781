//! Sequential archive extraction.

use std::path::{Path, PathBuf};

use gdpck_ctex::{has_ctex_extension, split_mipmaps};
use gdpck_pck::{ExtractedEntry, PckArchive, PckEntry};
use log::debug;

use crate::{Error, Result};

/// Per-entry progress report, numbered in directory order.
#[derive(Debug)]
pub struct Progress<'a> {
    /// 1-based position of the entry in the directory table.
    pub index: usize,
    /// Total number of entries.
    pub total: usize,
    /// The entry that was just extracted.
    pub entry: &'a PckEntry,
    /// Extraction outcome.
    pub extracted: &'a ExtractedEntry<'a>,
    /// Number of mipmap files split out of this entry.
    pub mipmaps: usize,
}

/// Totals for a finished extraction run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnpackSummary {
    /// Entries written.
    pub entries: usize,
    /// Payload bytes written, mipmap files excluded.
    pub bytes_written: u64,
    /// Destinations whose payload did not match the stored digest.
    pub integrity_warnings: Vec<PathBuf>,
    /// Compiled textures that were split.
    pub textures: usize,
    /// Mipmap files written.
    pub mipmaps: usize,
}

/// Open an archive and extract every entry under `output_root`.
pub fn unpack<P: AsRef<Path>>(archive_path: P, output_root: &Path) -> Result<UnpackSummary> {
    let archive = PckArchive::open(archive_path)?;
    unpack_archive(&archive, output_root, |_| {})
}

/// Extract every entry of an opened archive under `output_root`.
///
/// Entries are processed in directory order. The first error aborts the
/// run; digest mismatches do not. `on_entry` is called after each entry.
pub fn unpack_archive<F>(
    archive: &PckArchive,
    output_root: &Path,
    mut on_entry: F,
) -> Result<UnpackSummary>
where
    F: FnMut(Progress<'_>),
{
    let total = archive.entry_count();
    let mut summary = UnpackSummary::default();

    debug!("Files base: {:#x}", archive.files_base());
    for (i, entry) in archive.iter().enumerate() {
        debug!("[{}/{}] File path: {}", i + 1, total, entry.path());

        let extracted = archive.extract(entry, output_root)?;
        summary.entries += 1;
        summary.bytes_written += extracted.data.len() as u64;
        if !extracted.digest_ok {
            summary
                .integrity_warnings
                .push(extracted.destination.clone());
        }

        let mut mipmaps = 0;
        if has_ctex_extension(&extracted.destination) {
            let texture = split_mipmaps(&extracted.destination, extracted.data).map_err(
                |source| Error::Texture {
                    path: extracted.destination.clone(),
                    source,
                },
            )?;
            if let Some(texture) = texture {
                summary.textures += 1;
                mipmaps = texture.mipmaps.len();
                summary.mipmaps += mipmaps;
            }
        }

        on_entry(Progress {
            index: i + 1,
            total,
            entry,
            extracted: &extracted,
            mipmaps,
        });
    }

    debug!(
        "Extracted {} entries ({} bytes), {} textures split into {} mipmaps, {} integrity warnings",
        summary.entries,
        summary.bytes_written,
        summary.textures,
        summary.mipmaps,
        summary.integrity_warnings.len()
    );

    Ok(summary)
}
