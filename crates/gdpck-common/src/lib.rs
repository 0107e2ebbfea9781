//! Common utilities for gdpck.
//!
//! This crate provides the foundational pieces shared by the archive and
//! texture crates:
//!
//! - [`BinaryReader`] - Zero-copy little-endian reading from byte slices
//! - [`padding`] - Alignment padding arithmetic
//! - [`digest`] - MD5 content digests
//! - [`ErrorKind`] - The error taxonomy every gdpck error maps onto

mod align;
mod error;
mod reader;

pub mod digest;

pub use align::padding;
pub use error::{Error, ErrorKind, Result};
pub use reader::BinaryReader;

/// Re-export zerocopy traits for convenience
pub use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};
