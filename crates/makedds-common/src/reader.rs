//! Bounds-checked cursor over container bytes.
//!
//! Every format handled by makedds is little-endian and laid out as a fixed
//! header followed by sized blocks, so [`BinaryReader`] offers fixed-size
//! reads ([`read_array`](BinaryReader::read_array),
//! [`read_struct`](BinaryReader::read_struct)) and carving out sized blocks
//! ([`read_bytes`](BinaryReader::read_bytes),
//! [`sub_reader`](BinaryReader::sub_reader)). A failed read leaves the
//! cursor where it was and reports the offset it failed at.

use zerocopy::FromBytes;

use crate::{Error, Result};

/// Cursor over a borrowed byte slice.
///
/// ```
/// use makedds_common::BinaryReader;
///
/// let data = [0x44, 0x44, 0x53, 0x20, 0x7C, 0x00, 0x00, 0x00];
/// let mut reader = BinaryReader::new(&data);
///
/// reader.expect_magic(b"DDS ").unwrap();
/// assert_eq!(reader.read_u32().unwrap(), 124);
/// assert!(reader.is_empty());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BinaryReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> BinaryReader<'a> {
    #[inline]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Start reading at `offset`. An offset past the end yields an empty reader.
    #[inline]
    pub const fn new_at(data: &'a [u8], offset: usize) -> Self {
        Self { data, pos: offset }
    }

    #[inline]
    pub const fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub const fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Unread bytes.
    pub fn rest(&self) -> &'a [u8] {
        self.data.get(self.pos..).unwrap_or_default()
    }

    fn eof(&self, needed: usize) -> Error {
        Error::UnexpectedEof {
            offset: self.pos,
            needed,
            available: self.remaining(),
        }
    }

    /// Move to an absolute offset, which may equal the buffer length.
    pub fn seek(&mut self, offset: usize) -> Result<()> {
        if offset > self.data.len() {
            return Err(Error::SeekOutOfRange {
                offset,
                len: self.data.len(),
            });
        }
        self.pos = offset;
        Ok(())
    }

    /// Skip `count` bytes.
    pub fn advance(&mut self, count: usize) -> Result<()> {
        self.read_bytes(count).map(|_| ())
    }

    pub fn peek_bytes(&self, count: usize) -> Result<&'a [u8]> {
        self.rest().get(..count).ok_or_else(|| self.eof(count))
    }

    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        let bytes = self.peek_bytes(count)?;
        self.pos += count;
        Ok(bytes)
    }

    /// Split off the next `len` bytes as a reader of their own.
    ///
    /// Offsets reported by the returned reader are relative to the block.
    pub fn sub_reader(&mut self, len: usize) -> Result<BinaryReader<'a>> {
        self.read_bytes(len).map(BinaryReader::new)
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    #[inline]
    pub fn read_u8(&mut self) -> Result<u8> {
        self.read_array::<1>().map(|[b]| b)
    }

    #[inline]
    pub fn read_u16(&mut self) -> Result<u16> {
        self.read_array().map(u16::from_le_bytes)
    }

    #[inline]
    pub fn read_i16(&mut self) -> Result<i16> {
        self.read_array().map(i16::from_le_bytes)
    }

    #[inline]
    pub fn read_u32(&mut self) -> Result<u32> {
        self.read_array().map(u32::from_le_bytes)
    }

    /// Read a fixed-layout record.
    pub fn read_struct<T: FromBytes>(&mut self) -> Result<T> {
        let size = std::mem::size_of::<T>();
        let bytes = self.peek_bytes(size)?;
        let value = T::read_from_bytes(bytes).map_err(|_| self.eof(size))?;
        self.pos += size;
        Ok(value)
    }

    /// Consume a four-character code and check it against `expected`.
    pub fn expect_magic(&mut self, expected: &[u8; 4]) -> Result<()> {
        let offset = self.pos;
        let found = self.read_array::<4>()?;
        if &found != expected {
            self.pos = offset;
            return Err(Error::InvalidMagic {
                offset,
                expected: *expected,
                found,
            });
        }
        Ok(())
    }
}
