//! MD5 digest utilities.
//!
//! PCK archives store a 128-bit MD5 of every entry's payload, which is
//! recomputed after extraction to detect corruption.

/// Size in bytes of an MD5 digest.
pub const DIGEST_LEN: usize = 16;

/// Compute the MD5 digest of a byte slice.
#[inline]
pub fn md5(data: &[u8]) -> [u8; DIGEST_LEN] {
    ::md5::compute(data).0
}

/// Render a digest as lowercase hex.
pub fn to_hex(digest: &[u8; DIGEST_LEN]) -> String {
    format!("{:x}", ::md5::Digest(*digest))
}
