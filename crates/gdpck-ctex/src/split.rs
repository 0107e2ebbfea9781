//! Mipmap splitting.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use gdpck_common::BinaryReader;
use log::debug;

use crate::header::{CtexHeader, DataFormat};
use crate::{Error, Result, CTEX_SIGNATURE, CTEX_VERSION};

/// One mipmap level stored in a compiled texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mipmap<'a> {
    /// Level index in container order.
    pub index: u32,
    /// Raw mipmap payload.
    pub data: &'a [u8],
}

/// A decoded compiled texture container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledTexture<'a> {
    /// Container version (always [`CTEX_VERSION`]).
    pub version: u32,
    /// Image width.
    pub width: u32,
    /// Image height.
    pub height: u32,
    /// Raw value of the format/count field.
    pub format_raw: u32,
    /// Declared mipmap count. Same field as `format_raw`.
    pub mipmap_count: u32,
    /// Mipmaps that were fully present in the buffer.
    pub mipmaps: Vec<Mipmap<'a>>,
}

impl<'a> CompiledTexture<'a> {
    /// Check whether `data` starts with the compiled texture signature.
    #[inline]
    pub fn is_compiled_texture(data: &[u8]) -> bool {
        data.starts_with(CTEX_SIGNATURE)
    }

    /// Decode a compiled texture.
    ///
    /// Returns `Ok(None)` when `data` does not start with the signature.
    /// The mipmap scan stops quietly once fewer than 4 bytes remain for a
    /// size field, so truncated containers yield the levels read so far. A
    /// size field that promises more bytes than remain is an error.
    pub fn parse(data: &'a [u8]) -> Result<Option<Self>> {
        if !Self::is_compiled_texture(data) {
            return Ok(None);
        }

        let mut reader = BinaryReader::new_at(data, CTEX_SIGNATURE.len());
        let version = reader.peek_u32()?;
        if version != CTEX_VERSION {
            return Err(Error::UnsupportedVersion(version));
        }

        let header: CtexHeader = reader.read_struct()?;
        let format_raw = header.format_and_count;
        let mipmap_count = format_raw;

        let mut mipmaps = Vec::new();
        reader.seek(CtexHeader::MIPMAP_BASE);
        for index in 0..mipmap_count {
            if reader.remaining() < 4 {
                break;
            }
            let size = reader.read_u32()?;
            let available = reader.remaining();
            let payload = reader
                .read_bytes(size as usize)
                .map_err(|_| Error::MipmapOutOfBounds {
                    index,
                    size,
                    available,
                })?;
            mipmaps.push(Mipmap {
                index,
                data: payload,
            });
        }

        Ok(Some(Self {
            version,
            width: header.width,
            height: header.height,
            format_raw,
            mipmap_count,
            mipmaps,
        }))
    }

    /// The data format, if the field holds a known value.
    pub fn format(&self) -> Option<DataFormat> {
        DataFormat::try_from(self.format_raw).ok()
    }
}

/// Path of the file holding mipmap `index` of the texture at `path`.
pub fn mipmap_path(path: &Path, index: u32) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(format!("_{}", index));
    PathBuf::from(name)
}

/// Split the mipmaps of a compiled texture into sibling files.
///
/// Each mipmap is written to `<destination>_<index>`. Returns `Ok(None)`
/// without touching the filesystem when `data` is not a compiled texture.
pub fn split_mipmaps<'a>(
    destination: &Path,
    data: &'a [u8],
) -> Result<Option<CompiledTexture<'a>>> {
    let Some(texture) = CompiledTexture::parse(data)? else {
        debug!("{} is not a compiled texture, skipping", destination.display());
        return Ok(None);
    };

    debug!("Unpacking GST2");
    debug!("Version: {}", texture.version);
    debug!("Width: {}", texture.width);
    debug!("Height: {}", texture.height);
    if let Some(format) = texture.format() {
        debug!("{}", format);
    }
    debug!("Mipmaps: {}", texture.mipmap_count);

    for mipmap in &texture.mipmaps {
        debug!("Mipmap {} size: {}", mipmap.index, mipmap.data.len());
        let path = mipmap_path(destination, mipmap.index);
        fs::write(&path, mipmap.data).map_err(|source| Error::Write { path, source })?;
    }

    Ok(Some(texture))
}
