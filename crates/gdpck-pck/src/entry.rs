//! PCK archive entry.

use std::path::{Component, Path, PathBuf};

use gdpck_common::{digest, padding, BinaryReader};
use log::debug;

use crate::header::{describe_file_flags, file_flags, EntryTrailer};
use crate::{Error, Result};

/// Scheme prefix carried by archive-internal paths.
pub const RES_SCHEME: &str = "res://";

/// Directory records pad the path to this alignment.
pub const PATH_ALIGNMENT: usize = 4;

/// An entry (file) within a PCK archive.
///
/// This contains metadata about the file, not the file data itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PckEntry {
    /// Archive-internal path, trailing nulls removed.
    path: String,
    /// Payload offset relative to the files-base.
    offset: u64,
    /// Payload size in bytes.
    size: u64,
    /// MD5 of the payload.
    md5: [u8; 16],
    /// Whether the entry is encrypted.
    encrypted: bool,
}

impl PckEntry {
    /// Create a new PCK entry.
    pub fn new(path: impl Into<String>, offset: u64, size: u64, md5: [u8; 16]) -> Self {
        Self {
            path: path.into(),
            offset,
            size,
            md5,
            encrypted: false,
        }
    }

    /// Read one directory record.
    ///
    /// Any nonzero entry flags, including the known encryption bit, are
    /// rejected.
    pub(crate) fn read(reader: &mut BinaryReader<'_>) -> Result<Self> {
        let path_len = reader.read_u32()? as usize;
        let path = reader.read_padded_string(path_len)?.into_owned();
        reader.skip(padding(PATH_ALIGNMENT, path_len))?;

        let trailer: EntryTrailer = reader.read_struct()?;
        let offset = trailer.offset;
        let size = trailer.size;
        let md5 = trailer.md5;
        let flags = trailer.flags;

        debug!(
            "File path: {} offset: {} size: {} md5: {}",
            path,
            offset,
            size,
            digest::to_hex(&md5)
        );

        let names = describe_file_flags(flags);
        debug!("File flags: {}", names);
        if flags != 0 {
            return Err(Error::UnsupportedEntryFlags { path, flags, names });
        }

        Ok(Self {
            path,
            offset,
            size,
            md5,
            encrypted: flags & file_flags::ENCRYPTED != 0,
        })
    }

    /// Get the archive-internal path.
    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Get the payload offset relative to the files-base.
    #[inline]
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Get the payload size in bytes.
    #[inline]
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Get the stored MD5 digest.
    #[inline]
    pub fn md5(&self) -> &[u8; 16] {
        &self.md5
    }

    /// Check if the entry is encrypted.
    #[inline]
    pub fn is_encrypted(&self) -> bool {
        self.encrypted
    }

    /// Get the path relative to the output root.
    ///
    /// A leading `res://` is stripped. Paths without the scheme, including
    /// ones shorter than it, are kept as they are.
    pub fn relative_path(&self) -> &str {
        self.path.strip_prefix(RES_SCHEME).unwrap_or(&self.path)
    }

    /// Get the extraction destination under `output_root`.
    ///
    /// Only plain name components are kept. Root, prefix, `.` and `..`
    /// components are dropped, so the destination always stays under
    /// `output_root`.
    pub fn output_path(&self, output_root: &Path) -> PathBuf {
        let mut destination = output_root.to_path_buf();
        for component in Path::new(self.relative_path()).components() {
            if let Component::Normal(name) = component {
                destination.push(name);
            }
        }
        destination
    }
}
