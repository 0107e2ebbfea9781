//! PCK header and directory record structures.

use std::fmt;

use gdpck_common::BinaryReader;
use log::{debug, info};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::{Error, Result};

/// Archive magic bytes.
pub const PCK_MAGIC: [u8; 4] = *b"GDPC";

/// The only supported archive format version.
pub const FORMAT_VERSION: u32 = 2;

/// Number of reserved 32-bit words after the files-base field.
pub const RESERVED_WORDS: usize = 16;

/// Archive-level flag bits.
pub mod pack_flags {
    /// The directory table is encrypted.
    pub const DIR_ENCRYPTED: u32 = 1 << 0;
    /// The files-base is relative to the header.
    pub const REL_FILEBASE: u32 = 1 << 1;
    /// Union of all known archive flags.
    pub const KNOWN: u32 = DIR_ENCRYPTED | REL_FILEBASE;
}

/// Entry-level flag bits.
pub mod file_flags {
    /// The entry payload is encrypted.
    pub const ENCRYPTED: u32 = 1 << 0;
    /// Union of all known entry flags.
    pub const KNOWN: u32 = ENCRYPTED;
}

/// Archive header body (without the magic).
///
/// The 4-byte magic is read separately before this struct.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct HeaderBody {
    /// Format version
    pub format_version: u32,
    /// Engine major version
    pub engine_major: u32,
    /// Engine minor version
    pub engine_minor: u32,
    /// Engine patch version
    pub engine_patch: u32,
    /// Archive flags
    pub flags: u32,
    /// Absolute offset of the payload region
    pub files_base: u64,
    /// Reserved, ignored
    pub reserved: [u32; RESERVED_WORDS],
    /// Number of directory entries
    pub entry_count: u32,
}

impl HeaderBody {
    /// Total header size on disk, magic included.
    pub const SIZE_WITH_MAGIC: usize = 4 + std::mem::size_of::<Self>();
}

/// Fixed-size tail of a directory record, following the padded path.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct EntryTrailer {
    /// Payload offset relative to the files-base
    pub offset: u64,
    /// Payload size in bytes
    pub size: u64,
    /// MD5 of the payload
    pub md5: [u8; 16],
    /// Entry flags
    pub flags: u32,
}

/// Engine version triple recorded in the header. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl fmt::Display for EngineVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// A validated archive header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveHeader {
    /// Format version (always [`FORMAT_VERSION`]).
    pub format_version: u32,
    /// Engine version that produced the archive.
    pub engine_version: EngineVersion,
    /// Archive flags (always zero once validated).
    pub flags: u32,
    /// Absolute offset where payload data begins.
    pub files_base: u64,
    /// Number of directory entries.
    pub entry_count: u32,
}

impl ArchiveHeader {
    /// Read and validate the header, leaving the reader at the first
    /// directory record.
    pub fn read(reader: &mut BinaryReader<'_>) -> Result<Self> {
        let magic: [u8; 4] = reader.read_array()?;
        if magic != PCK_MAGIC {
            return Err(Error::InvalidMagic(magic));
        }

        // Version is checked before the rest of the header is trusted.
        let format_version = reader.peek_u32()?;
        info!("PCK file version: {}", format_version);
        if format_version != FORMAT_VERSION {
            return Err(Error::UnsupportedVersion(format_version));
        }

        let body: HeaderBody = reader.read_struct()?;
        let engine_version = EngineVersion {
            major: body.engine_major,
            minor: body.engine_minor,
            patch: body.engine_patch,
        };
        info!("Engine version: {}", engine_version);

        let flags = body.flags;
        let names = describe_pack_flags(flags);
        info!("Flags: {}", names);
        if flags != 0 {
            return Err(Error::UnsupportedFlags { flags, names });
        }

        let files_base = body.files_base;
        let entry_count = body.entry_count;
        debug!("Files base: {:#x}", files_base);
        info!("Number of files: {}", entry_count);

        Ok(Self {
            format_version,
            engine_version,
            flags,
            files_base,
            entry_count,
        })
    }
}

/// Render archive flags by name for diagnostics.
pub fn describe_pack_flags(flags: u32) -> String {
    describe(
        flags,
        pack_flags::KNOWN,
        &[
            (pack_flags::DIR_ENCRYPTED, "PACK_DIR_ENCRYPTED"),
            (pack_flags::REL_FILEBASE, "PACK_REL_FILEBASE"),
        ],
    )
}

/// Render entry flags by name for diagnostics.
pub fn describe_file_flags(flags: u32) -> String {
    describe(
        flags,
        file_flags::KNOWN,
        &[(file_flags::ENCRYPTED, "PACK_FILE_ENCRYPTED")],
    )
}

fn describe(flags: u32, known: u32, names: &[(u32, &str)]) -> String {
    if flags == 0 {
        return "None".to_string();
    }

    let mut parts: Vec<String> = names
        .iter()
        .filter(|(bit, _)| flags & bit != 0)
        .map(|(_, name)| (*name).to_string())
        .collect();

    let unknown = flags & !known;
    if unknown != 0 {
        parts.push(format!("UNKNOWN({:#x})", unknown));
    }

    parts.join(" ")
}
