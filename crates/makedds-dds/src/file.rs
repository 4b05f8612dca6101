//! Reading and writing the DDS container framing.

use std::io::Write;

use makedds_common::{BinaryReader, IntoBytes};

use crate::codec::{self, array_count, level_count};
use crate::describe::{describe_levels, LevelDesc};
use crate::format::DxgiFormat;
use crate::header::{DdsHeader, DdsHeaderDxt10, DdsPixelFormat};
use crate::{Error, Result};

/// Magic bytes at the start of every DDS file.
pub const DDS_MAGIC: &[u8; 4] = b"DDS ";

/// Offset of pixel data when the DX10 header is present.
pub const DX10_DATA_OFFSET: usize = 4 + DdsHeader::SIZE as usize + DdsHeaderDxt10::SIZE as usize;

/// Read the primary header of a DDS file, validating magic and sizes.
pub fn read_header(data: &[u8]) -> Result<DdsHeader> {
    let mut reader = BinaryReader::new(data);
    let magic = reader.read_array::<4>()?;
    if &magic != DDS_MAGIC {
        return Err(Error::InvalidMagic(magic));
    }

    let header: DdsHeader = reader.read_struct()?;
    let size = header.size;
    if size != DdsHeader::SIZE {
        return Err(Error::InvalidHeader(format!("header size {size}, expected 124")));
    }
    let pf_size = header.pixel_format.size;
    if pf_size != DdsPixelFormat::SIZE {
        return Err(Error::InvalidHeader(format!("pixel format size {pf_size}, expected 32")));
    }
    Ok(header)
}

/// Read the DX10 extension header, if the primary header announces one.
pub fn read_header_dxt10(data: &[u8]) -> Result<Option<DdsHeaderDxt10>> {
    let header = read_header(data)?;
    if !header.is_dx10() {
        return Ok(None);
    }
    let mut reader = BinaryReader::new_at(data, 4 + DdsHeader::SIZE as usize);
    Ok(Some(reader.read_struct()?))
}

/// A DDS file viewed in place.
#[derive(Debug, Clone, Copy)]
pub struct DdsFile<'a> {
    pub header: DdsHeader,
    pub header_dxt10: Option<DdsHeaderDxt10>,
    /// Bytes of framing before the pixel data.
    pub header_len: usize,
    /// Pixel data following the headers.
    pub blob: &'a [u8],
}

impl<'a> DdsFile<'a> {
    pub fn parse(data: &'a [u8]) -> Result<Self> {
        let header = read_header(data)?;
        let header_dxt10 = read_header_dxt10(data)?;
        let header_len = match header_dxt10 {
            Some(_) => DX10_DATA_OFFSET,
            None => 4 + DdsHeader::SIZE as usize,
        };
        Ok(Self {
            header,
            header_dxt10,
            header_len,
            blob: &data[header_len..],
        })
    }

    #[inline]
    fn ex(&self) -> Option<&DdsHeaderDxt10> {
        self.header_dxt10.as_ref()
    }

    pub fn format(&self) -> DxgiFormat {
        codec::resolve_format(&self.header, self.ex())
    }

    pub fn is_cubemap(&self) -> bool {
        codec::is_cubemap(&self.header, self.ex())
    }

    pub fn is_volume(&self) -> bool {
        codec::is_volume(&self.header, self.ex())
    }

    pub fn is_array(&self) -> bool {
        codec::is_array(&self.header, self.ex())
    }

    pub fn has_mipmaps(&self) -> bool {
        codec::has_mipmaps(&self.header, self.ex())
    }

    pub fn array_count(&self) -> usize {
        array_count(&self.header, self.ex())
    }

    pub fn level_count(&self) -> usize {
        level_count(&self.header, self.ex())
    }

    /// Describe every level of every element present in the blob.
    pub fn levels(&self) -> Vec<LevelDesc<'a>> {
        let max = self.array_count().saturating_mul(self.level_count());
        describe_levels(self.blob, &self.header, self.ex(), max)
    }
}

/// Write the magic, the primary header and the DX10 header.
pub fn write_headers<W: Write>(
    writer: &mut W,
    header: &DdsHeader,
    header_dxt10: &DdsHeaderDxt10,
) -> Result<()> {
    writer.write_all(DDS_MAGIC)?;
    writer.write_all(header.as_bytes())?;
    writer.write_all(header_dxt10.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alpha::AlphaMode;
    use crate::codec::{build_headers, SurfaceLayout};
    use crate::header::{FourCC, PixelFormatFlags};

    fn cube_layout() -> SurfaceLayout {
        SurfaceLayout {
            width: 4,
            height: 4,
            depth: 1,
            format: DxgiFormat::R8G8B8A8Unorm,
            alpha_mode: AlphaMode::Opaque,
            levels: 3,
            array_size: 1,
            mipmaps: true,
            cubemap: true,
            volume: false,
        }
    }

    #[test]
    fn test_write_then_parse() {
        let (header, dx10) = build_headers(&cube_layout());
        let mut bytes = Vec::new();
        write_headers(&mut bytes, &header, &dx10).unwrap();
        assert_eq!(bytes.len(), DX10_DATA_OFFSET);
        assert_eq!(&bytes[..4], b"DDS ");

        // six faces of 4x4 + 2x2 + 1x1 texels
        bytes.extend(std::iter::repeat(0xAB).take(6 * (64 + 16 + 4)));

        let file = DdsFile::parse(&bytes).unwrap();
        assert_eq!(file.header_len, 148);
        assert_eq!(file.format(), DxgiFormat::R8G8B8A8Unorm);
        assert!(file.is_cubemap());
        assert!(file.has_mipmaps());
        assert!(!file.is_volume());
        assert_eq!(file.array_count(), 6);
        assert_eq!(file.level_count(), 3);
        assert_eq!(file.header_dxt10.map(|ex| ex.alpha_mode()), Some(AlphaMode::Opaque));

        let levels = file.levels();
        assert_eq!(levels.len(), 18);
        assert_eq!(levels[17].offset + levels[17].data_size, file.blob.len());
    }

    #[test]
    fn test_legacy_file_has_no_extension() {
        let (mut header, _) = build_headers(&cube_layout());
        header.pixel_format.four_cc = FourCC::DXT1;
        header.pixel_format.flags = PixelFormatFlags::FOURCC.bits();

        let mut bytes = DDS_MAGIC.to_vec();
        bytes.extend_from_slice(header.as_bytes());

        assert!(read_header_dxt10(&bytes).unwrap().is_none());
        let file = DdsFile::parse(&bytes).unwrap();
        assert_eq!(file.header_len, 128);
        assert_eq!(file.format(), DxgiFormat::Bc1Unorm);
        assert!(file.blob.is_empty());
        assert!(file.levels().is_empty());
    }

    #[test]
    fn test_bad_magic_and_size() {
        let (mut header, dx10) = build_headers(&cube_layout());
        let mut bytes = Vec::new();
        write_headers(&mut bytes, &header, &dx10).unwrap();
        bytes[0] = b'X';
        assert!(matches!(read_header(&bytes), Err(Error::InvalidMagic(m)) if &m == b"XDS "));

        header.size = 100;
        let mut bytes = Vec::new();
        write_headers(&mut bytes, &header, &dx10).unwrap();
        assert!(matches!(read_header(&bytes), Err(Error::InvalidHeader(_))));
    }

    #[test]
    fn test_extreme_header_values_stop_the_walk() {
        let (mut header, mut dx10) = build_headers(&SurfaceLayout {
            format: DxgiFormat::R32G32B32A32Float,
            cubemap: false,
            ..cube_layout()
        });
        header.width = u32::MAX;
        header.height = u32::MAX;
        header.mipmap_count = u32::MAX;
        dx10.array_size = u32::MAX;

        let mut bytes = Vec::new();
        write_headers(&mut bytes, &header, &dx10).unwrap();
        bytes.extend_from_slice(&[0u8; 64]);

        let file = DdsFile::parse(&bytes).unwrap();
        assert_eq!(file.level_count(), u32::MAX as usize);
        assert!(file.levels().is_empty());

        // a sane base size with huge counts ends when the blob runs out
        header.width = 2;
        header.height = 2;
        let mut bytes = Vec::new();
        write_headers(&mut bytes, &header, &dx10).unwrap();
        bytes.extend_from_slice(&[0u8; 64 + 16 + 16]);

        let levels = DdsFile::parse(&bytes).unwrap().levels();
        assert_eq!(levels.len(), 3);
        assert_eq!(levels.iter().map(|l| l.data_size).sum::<usize>(), 96);
    }

    #[test]
    fn test_sizeless_format_describes_nothing() {
        let (header, dx10) = build_headers(&SurfaceLayout {
            format: DxgiFormat::Nv12,
            ..cube_layout()
        });
        let mut bytes = Vec::new();
        write_headers(&mut bytes, &header, &dx10).unwrap();
        bytes.extend_from_slice(&[0u8; 16]);

        assert!(DdsFile::parse(&bytes).unwrap().levels().is_empty());
    }

    #[test]
    fn test_truncated_header() {
        assert!(matches!(read_header(b"DDS "), Err(Error::Common(_))));
        assert!(read_header(b"DD").is_err());
    }
}
