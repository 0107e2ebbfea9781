//! Compiled texture header structures.

use std::fmt;

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// Compiled texture header (without the signature).
///
/// The field at offset 36 of the container is both the data format and the
/// mipmap count. Current containers do not store a separate count.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct CtexHeader {
    /// Container version.
    pub version: u32,
    /// Image width.
    pub width: u32,
    /// Image height.
    pub height: u32,
    /// Format specific, unused here (offsets 16..36).
    pub reserved: [u8; 20],
    /// Data format, also read as the mipmap count.
    pub format_and_count: u32,
}

impl CtexHeader {
    /// Offset of the first mipmap record.
    pub const MIPMAP_BASE: usize = 0x34;

    /// Offset of the aliased format/count field.
    pub const FORMAT_OFFSET: usize = 36;
}

/// Image data format of a compiled texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum DataFormat {
    /// Raw engine image.
    Image = 0,
    /// PNG-compressed.
    Png = 1,
    /// WebP-compressed.
    Webp = 2,
    /// Basis Universal supercompressed.
    BasisUniversal = 3,
}

impl DataFormat {
    /// Engine name of the format.
    pub fn name(self) -> &'static str {
        match self {
            Self::Image => "DATA_FORMAT_IMAGE",
            Self::Png => "DATA_FORMAT_PNG",
            Self::Webp => "DATA_FORMAT_WEBP",
            Self::BasisUniversal => "DATA_FORMAT_BASIS_UNIVERSAL",
        }
    }
}

impl TryFrom<u32> for DataFormat {
    type Error = u32;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Image),
            1 => Ok(Self::Png),
            2 => Ok(Self::Webp),
            3 => Ok(Self::BasisUniversal),
            other => Err(other),
        }
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
