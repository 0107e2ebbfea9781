//! PCK archive reader.
//!
//! The whole archive is memory-mapped once. The header and directory table
//! are parsed in a single forward pass; payloads are then addressed by
//! absolute offset, so each entry can be read independently.

use std::fs::File;
use std::ops::Deref;
use std::path::Path;

use gdpck_common::BinaryReader;
use memmap2::Mmap;

use crate::entry::PckEntry;
use crate::header::ArchiveHeader;
use crate::{Error, Result};

/// Backing bytes of an archive.
enum Source {
    Mapped(Mmap),
    Owned(Vec<u8>),
}

impl Deref for Source {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            Self::Mapped(mmap) => &mmap[..],
            Self::Owned(data) => data.as_slice(),
        }
    }
}

/// A parsed PCK archive.
pub struct PckArchive {
    /// Archive bytes
    data: Source,
    /// Archive file name
    name: String,
    /// Validated header
    header: ArchiveHeader,
    /// Directory entries in table order
    entries: Vec<PckEntry>,
}

impl PckArchive {
    /// Open and parse a PCK archive from disk.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        // SAFETY: the mapping is read-only and the archive is not expected to
        // change while it is being extracted.
        let mmap = unsafe { Mmap::map(&file)? };

        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();

        Self::from_source(Source::Mapped(mmap), name)
    }

    /// Parse a PCK archive held in memory.
    pub fn from_vec(data: Vec<u8>, name: impl Into<String>) -> Result<Self> {
        Self::from_source(Source::Owned(data), name.into())
    }

    fn from_source(data: Source, name: String) -> Result<Self> {
        let (header, entries) = Self::parse(&data)?;
        Ok(Self {
            data,
            name,
            header,
            entries,
        })
    }

    /// Parse the header and directory table.
    fn parse(data: &[u8]) -> Result<(ArchiveHeader, Vec<PckEntry>)> {
        let mut reader = BinaryReader::new(data);
        let header = ArchiveHeader::read(&mut reader)?;

        // Never trust the count for preallocation beyond what the buffer
        // could possibly hold.
        let capacity = (header.entry_count as usize).min(reader.remaining() / 40);
        let mut entries = Vec::with_capacity(capacity);
        for _ in 0..header.entry_count {
            entries.push(PckEntry::read(&mut reader)?);
        }

        Ok((header, entries))
    }

    /// Get the archive name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the validated header.
    #[inline]
    pub fn header(&self) -> &ArchiveHeader {
        &self.header
    }

    /// Get the absolute offset of the payload region.
    #[inline]
    pub fn files_base(&self) -> u64 {
        self.header.files_base
    }

    /// Get the archive size in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check whether the archive has no bytes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get the number of entries.
    #[inline]
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Get all entries in directory order.
    #[inline]
    pub fn entries(&self) -> &[PckEntry] {
        &self.entries
    }

    /// Iterate over entries in directory order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &PckEntry> + '_ {
        self.entries.iter()
    }

    /// Get entry by index.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&PckEntry> {
        self.entries.get(index)
    }

    /// Find an entry by its archive-internal path.
    pub fn find(&self, path: &str) -> Option<&PckEntry> {
        self.entries.iter().find(|e| e.path() == path)
    }

    /// Read an entry's payload: exactly `size` bytes at
    /// `files_base + offset`.
    pub fn read(&self, entry: &PckEntry) -> Result<&[u8]> {
        let out_of_bounds = || Error::OutOfBounds {
            path: entry.path().to_string(),
            offset: self.files_base().wrapping_add(entry.offset()),
            size: entry.size(),
            archive_len: self.data.len(),
        };

        let start = self
            .files_base()
            .checked_add(entry.offset())
            .ok_or_else(out_of_bounds)?;
        let end = start.checked_add(entry.size()).ok_or_else(out_of_bounds)?;

        let (start, end) = match (usize::try_from(start), usize::try_from(end)) {
            (Ok(start), Ok(end)) if end <= self.data.len() => (start, end),
            _ => return Err(out_of_bounds()),
        };

        Ok(&self.data[start..end])
    }
}

impl std::fmt::Debug for PckArchive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PckArchive")
            .field("name", &self.name)
            .field("header", &self.header)
            .field("entries", &self.entries.len())
            .finish()
    }
}
