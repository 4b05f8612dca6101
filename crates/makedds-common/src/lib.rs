//! Common utilities for makedds.
//!
//! This crate provides foundational types and utilities used across all makedds crates:
//!
//! - [`BinaryReader`] - Zero-copy binary reading from byte slices
//! - [`fourcc`] - Packing of four-character codes
//! - [`base64`] - Single-line base64 encoding and lenient decoding
//! - [`text`] - Byte-order-mark detection and whole-file loading

mod error;
mod reader;

pub mod base64;
pub mod text;

pub use error::{Error, Result};
pub use reader::BinaryReader;
pub use text::{load_binary, load_text, TextBuffer, TextEncoding};

/// Re-export zerocopy traits for convenience
pub use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// Re-export memchr for SIMD-accelerated byte searching
pub use memchr;

/// Pack four characters into a little-endian FourCC code.
///
/// ```
/// assert_eq!(makedds_common::fourcc(b"DDS "), 0x2053_4444);
/// ```
#[inline]
pub const fn fourcc(code: &[u8; 4]) -> u32 {
    u32::from_le_bytes(*code)
}

/// Pack four characters into a big-endian FourCC code.
#[inline]
pub const fn fourcc_be(code: &[u8; 4]) -> u32 {
    u32::from_be_bytes(*code)
}
