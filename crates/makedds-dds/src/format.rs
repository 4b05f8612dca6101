//! DXGI pixel formats and their per-format metadata.
//!
//! The enum and [`FORMAT_TABLE`] are generated from one declaration list, so
//! every variant has exactly one table entry at the index of its code.

use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// How a format lays out its pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatClass {
    /// One element per pixel; size given by bits per pixel.
    Plain,
    /// 4x4 pixel blocks of a fixed byte size.
    BlockCompressed,
    /// Two pixels share one 32-bit element (4:2:2).
    Packed,
}

/// Static description of a [`DxgiFormat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatInfo {
    pub format: DxgiFormat,
    /// Name without the `DXGI_FORMAT_` prefix.
    pub name: &'static str,
    /// Bits per pixel for plain formats; 0 for block-compressed, packed and unknown.
    pub bits_per_pixel: u32,
    /// Bytes per 4x4 block for block-compressed formats; 0 otherwise.
    pub bytes_per_block: u32,
    pub class: FormatClass,
}

macro_rules! dxgi_formats {
    ($($variant:ident = $code:literal, $name:literal, $bpp:literal, $block:literal, $class:ident;)*) => {
        /// DXGI format code as stored in the DX10 extension header.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u32)]
        pub enum DxgiFormat {
            $($variant = $code,)*
        }

        /// Metadata for every format, indexed by format code.
        pub static FORMAT_TABLE: [FormatInfo; 116] = [
            $(FormatInfo {
                format: DxgiFormat::$variant,
                name: $name,
                bits_per_pixel: $bpp,
                bytes_per_block: $block,
                class: FormatClass::$class,
            },)*
        ];
    };
}

dxgi_formats! {
    Unknown = 0, "UNKNOWN", 0, 0, Plain;
    R32G32B32A32Typeless = 1, "R32G32B32A32_TYPELESS", 128, 0, Plain;
    R32G32B32A32Float = 2, "R32G32B32A32_FLOAT", 128, 0, Plain;
    R32G32B32A32Uint = 3, "R32G32B32A32_UINT", 128, 0, Plain;
    R32G32B32A32Sint = 4, "R32G32B32A32_SINT", 128, 0, Plain;
    R32G32B32Typeless = 5, "R32G32B32_TYPELESS", 96, 0, Plain;
    R32G32B32Float = 6, "R32G32B32_FLOAT", 96, 0, Plain;
    R32G32B32Uint = 7, "R32G32B32_UINT", 96, 0, Plain;
    R32G32B32Sint = 8, "R32G32B32_SINT", 96, 0, Plain;
    R16G16B16A16Typeless = 9, "R16G16B16A16_TYPELESS", 64, 0, Plain;
    R16G16B16A16Float = 10, "R16G16B16A16_FLOAT", 64, 0, Plain;
    R16G16B16A16Unorm = 11, "R16G16B16A16_UNORM", 64, 0, Plain;
    R16G16B16A16Uint = 12, "R16G16B16A16_UINT", 64, 0, Plain;
    R16G16B16A16Snorm = 13, "R16G16B16A16_SNORM", 64, 0, Plain;
    R16G16B16A16Sint = 14, "R16G16B16A16_SINT", 64, 0, Plain;
    R32G32Typeless = 15, "R32G32_TYPELESS", 64, 0, Plain;
    R32G32Float = 16, "R32G32_FLOAT", 64, 0, Plain;
    R32G32Uint = 17, "R32G32_UINT", 64, 0, Plain;
    R32G32Sint = 18, "R32G32_SINT", 64, 0, Plain;
    R32G8X24Typeless = 19, "R32G8X24_TYPELESS", 64, 0, Plain;
    D32FloatS8X24Uint = 20, "D32_FLOAT_S8X24_UINT", 64, 0, Plain;
    R32FloatX8X24Typeless = 21, "R32_FLOAT_X8X24_TYPELESS", 64, 0, Plain;
    X32TypelessG8X24Uint = 22, "X32_TYPELESS_G8X24_UINT", 64, 0, Plain;
    R10G10B10A2Typeless = 23, "R10G10B10A2_TYPELESS", 32, 0, Plain;
    R10G10B10A2Unorm = 24, "R10G10B10A2_UNORM", 32, 0, Plain;
    R10G10B10A2Uint = 25, "R10G10B10A2_UINT", 32, 0, Plain;
    R11G11B10Float = 26, "R11G11B10_FLOAT", 32, 0, Plain;
    R8G8B8A8Typeless = 27, "R8G8B8A8_TYPELESS", 32, 0, Plain;
    R8G8B8A8Unorm = 28, "R8G8B8A8_UNORM", 32, 0, Plain;
    R8G8B8A8UnormSrgb = 29, "R8G8B8A8_UNORM_SRGB", 32, 0, Plain;
    R8G8B8A8Uint = 30, "R8G8B8A8_UINT", 32, 0, Plain;
    R8G8B8A8Snorm = 31, "R8G8B8A8_SNORM", 32, 0, Plain;
    R8G8B8A8Sint = 32, "R8G8B8A8_SINT", 32, 0, Plain;
    R16G16Typeless = 33, "R16G16_TYPELESS", 32, 0, Plain;
    R16G16Float = 34, "R16G16_FLOAT", 32, 0, Plain;
    R16G16Unorm = 35, "R16G16_UNORM", 32, 0, Plain;
    R16G16Uint = 36, "R16G16_UINT", 32, 0, Plain;
    R16G16Snorm = 37, "R16G16_SNORM", 32, 0, Plain;
    R16G16Sint = 38, "R16G16_SINT", 32, 0, Plain;
    R32Typeless = 39, "R32_TYPELESS", 32, 0, Plain;
    D32Float = 40, "D32_FLOAT", 32, 0, Plain;
    R32Float = 41, "R32_FLOAT", 32, 0, Plain;
    R32Uint = 42, "R32_UINT", 32, 0, Plain;
    R32Sint = 43, "R32_SINT", 32, 0, Plain;
    R24G8Typeless = 44, "R24G8_TYPELESS", 32, 0, Plain;
    D24UnormS8Uint = 45, "D24_UNORM_S8_UINT", 32, 0, Plain;
    R24UnormX8Typeless = 46, "R24_UNORM_X8_TYPELESS", 32, 0, Plain;
    X24TypelessG8Uint = 47, "X24_TYPELESS_G8_UINT", 32, 0, Plain;
    R8G8Typeless = 48, "R8G8_TYPELESS", 16, 0, Plain;
    R8G8Unorm = 49, "R8G8_UNORM", 16, 0, Plain;
    R8G8Uint = 50, "R8G8_UINT", 16, 0, Plain;
    R8G8Snorm = 51, "R8G8_SNORM", 16, 0, Plain;
    R8G8Sint = 52, "R8G8_SINT", 16, 0, Plain;
    R16Typeless = 53, "R16_TYPELESS", 16, 0, Plain;
    R16Float = 54, "R16_FLOAT", 16, 0, Plain;
    D16Unorm = 55, "D16_UNORM", 16, 0, Plain;
    R16Unorm = 56, "R16_UNORM", 16, 0, Plain;
    R16Uint = 57, "R16_UINT", 16, 0, Plain;
    R16Snorm = 58, "R16_SNORM", 16, 0, Plain;
    R16Sint = 59, "R16_SINT", 16, 0, Plain;
    R8Typeless = 60, "R8_TYPELESS", 8, 0, Plain;
    R8Unorm = 61, "R8_UNORM", 8, 0, Plain;
    R8Uint = 62, "R8_UINT", 8, 0, Plain;
    R8Snorm = 63, "R8_SNORM", 8, 0, Plain;
    R8Sint = 64, "R8_SINT", 8, 0, Plain;
    A8Unorm = 65, "A8_UNORM", 8, 0, Plain;
    R1Unorm = 66, "R1_UNORM", 1, 0, Plain;
    R9G9B9E5SharedExp = 67, "R9G9B9E5_SHAREDEXP", 32, 0, Plain;
    R8G8B8G8Unorm = 68, "R8G8_B8G8_UNORM", 0, 0, Packed;
    G8R8G8B8Unorm = 69, "G8R8_G8B8_UNORM", 0, 0, Packed;
    Bc1Typeless = 70, "BC1_TYPELESS", 0, 8, BlockCompressed;
    Bc1Unorm = 71, "BC1_UNORM", 0, 8, BlockCompressed;
    Bc1UnormSrgb = 72, "BC1_UNORM_SRGB", 0, 8, BlockCompressed;
    Bc2Typeless = 73, "BC2_TYPELESS", 0, 16, BlockCompressed;
    Bc2Unorm = 74, "BC2_UNORM", 0, 16, BlockCompressed;
    Bc2UnormSrgb = 75, "BC2_UNORM_SRGB", 0, 16, BlockCompressed;
    Bc3Typeless = 76, "BC3_TYPELESS", 0, 16, BlockCompressed;
    Bc3Unorm = 77, "BC3_UNORM", 0, 16, BlockCompressed;
    Bc3UnormSrgb = 78, "BC3_UNORM_SRGB", 0, 16, BlockCompressed;
    Bc4Typeless = 79, "BC4_TYPELESS", 0, 8, BlockCompressed;
    Bc4Unorm = 80, "BC4_UNORM", 0, 8, BlockCompressed;
    Bc4Snorm = 81, "BC4_SNORM", 0, 8, BlockCompressed;
    Bc5Typeless = 82, "BC5_TYPELESS", 0, 16, BlockCompressed;
    Bc5Unorm = 83, "BC5_UNORM", 0, 16, BlockCompressed;
    Bc5Snorm = 84, "BC5_SNORM", 0, 16, BlockCompressed;
    B5G6R5Unorm = 85, "B5G6R5_UNORM", 16, 0, Plain;
    B5G5R5A1Unorm = 86, "B5G5R5A1_UNORM", 16, 0, Plain;
    B8G8R8A8Unorm = 87, "B8G8R8A8_UNORM", 32, 0, Plain;
    B8G8R8X8Unorm = 88, "B8G8R8X8_UNORM", 32, 0, Plain;
    R10G10B10XrBiasA2Unorm = 89, "R10G10B10_XR_BIAS_A2_UNORM", 32, 0, Plain;
    B8G8R8A8Typeless = 90, "B8G8R8A8_TYPELESS", 32, 0, Plain;
    B8G8R8A8UnormSrgb = 91, "B8G8R8A8_UNORM_SRGB", 32, 0, Plain;
    B8G8R8X8Typeless = 92, "B8G8R8X8_TYPELESS", 32, 0, Plain;
    B8G8R8X8UnormSrgb = 93, "B8G8R8X8_UNORM_SRGB", 32, 0, Plain;
    Bc6hTypeless = 94, "BC6H_TYPELESS", 0, 16, BlockCompressed;
    Bc6hUf16 = 95, "BC6H_UF16", 0, 16, BlockCompressed;
    Bc6hSf16 = 96, "BC6H_SF16", 0, 16, BlockCompressed;
    Bc7Typeless = 97, "BC7_TYPELESS", 0, 16, BlockCompressed;
    Bc7Unorm = 98, "BC7_UNORM", 0, 16, BlockCompressed;
    Bc7UnormSrgb = 99, "BC7_UNORM_SRGB", 0, 16, BlockCompressed;
    Ayuv = 100, "AYUV", 0, 0, Plain;
    Y410 = 101, "Y410", 0, 0, Plain;
    Y416 = 102, "Y416", 0, 0, Plain;
    Nv12 = 103, "NV12", 0, 0, Plain;
    P010 = 104, "P010", 0, 0, Plain;
    P016 = 105, "P016", 0, 0, Plain;
    Opaque420 = 106, "420_OPAQUE", 0, 0, Plain;
    Yuy2 = 107, "YUY2", 0, 0, Plain;
    Y210 = 108, "Y210", 0, 0, Plain;
    Y216 = 109, "Y216", 0, 0, Plain;
    Nv11 = 110, "NV11", 0, 0, Plain;
    Ai44 = 111, "AI44", 0, 0, Plain;
    Ia44 = 112, "IA44", 0, 0, Plain;
    P8 = 113, "P8", 0, 0, Plain;
    A8P8 = 114, "A8P8", 0, 0, Plain;
    B4G4R4A4Unorm = 115, "B4G4R4A4_UNORM", 16, 0, Plain;
}

const NAME_PREFIX: &str = "DXGI_FORMAT_";

impl DxgiFormat {
    /// Look up a format by its numeric code.
    pub fn from_code(code: u32) -> Option<Self> {
        FORMAT_TABLE.get(code as usize).map(|info| info.format)
    }

    /// Look up a format by name, ignoring case and an optional `DXGI_FORMAT_` prefix.
    pub fn from_name(name: &str) -> Result<Self> {
        let trimmed = name.trim();
        let bare = match trimmed.get(..NAME_PREFIX.len()) {
            Some(prefix) if prefix.eq_ignore_ascii_case(NAME_PREFIX) => &trimmed[NAME_PREFIX.len()..],
            _ => trimmed,
        };
        FORMAT_TABLE
            .iter()
            .find(|info| info.name.eq_ignore_ascii_case(bare))
            .map(|info| info.format)
            .ok_or_else(|| Error::UnknownFormatName(name.to_string()))
    }

    #[inline]
    pub const fn code(self) -> u32 {
        self as u32
    }

    #[inline]
    pub fn info(self) -> &'static FormatInfo {
        &FORMAT_TABLE[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.info().name
    }

    /// Bits per pixel; 0 for block-compressed, packed and video formats.
    pub fn bits_per_pixel(self) -> u32 {
        self.info().bits_per_pixel
    }

    /// Bytes per 4x4 block; 0 unless block-compressed.
    pub fn bytes_per_block(self) -> u32 {
        self.info().bytes_per_block
    }

    pub fn is_block_compressed(self) -> bool {
        self.info().class == FormatClass::BlockCompressed
    }

    /// `R8G8_B8G8_UNORM` or `G8R8_G8B8_UNORM`.
    pub fn is_packed(self) -> bool {
        self.info().class == FormatClass::Packed
    }

    pub fn is_srgb(self) -> bool {
        self.name().ends_with("_SRGB")
    }
}

impl Default for DxgiFormat {
    fn default() -> Self {
        Self::Unknown
    }
}

impl fmt::Display for DxgiFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DxgiFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_indexed_by_code() {
        for (index, info) in FORMAT_TABLE.iter().enumerate() {
            assert_eq!(info.format.code() as usize, index, "{}", info.name);
            assert_eq!(DxgiFormat::from_code(index as u32), Some(info.format));
        }
        assert_eq!(DxgiFormat::from_code(116), None);
    }

    #[test]
    fn test_every_entry_is_consistent() {
        for info in &FORMAT_TABLE {
            match info.class {
                FormatClass::BlockCompressed => {
                    assert!(info.bytes_per_block == 8 || info.bytes_per_block == 16, "{}", info.name);
                    assert_eq!(info.bits_per_pixel, 0, "{}", info.name);
                }
                FormatClass::Packed | FormatClass::Plain => {
                    assert_eq!(info.bytes_per_block, 0, "{}", info.name);
                }
            }
            assert_eq!(DxgiFormat::from_name(info.name).unwrap(), info.format);
        }
    }

    #[test]
    fn test_from_name() {
        assert_eq!(DxgiFormat::from_name("r8g8b8a8_unorm").unwrap(), DxgiFormat::R8G8B8A8Unorm);
        assert_eq!(DxgiFormat::from_name("DXGI_FORMAT_BC3_UNORM").unwrap(), DxgiFormat::Bc3Unorm);
        assert_eq!("dxgi_format_420_opaque".parse::<DxgiFormat>().unwrap(), DxgiFormat::Opaque420);
        assert!(matches!(
            DxgiFormat::from_name("R8G8B8"),
            Err(Error::UnknownFormatName(name)) if name == "R8G8B8"
        ));
    }

    #[test]
    fn test_metadata() {
        assert_eq!(DxgiFormat::R32G32B32A32Float.bits_per_pixel(), 128);
        assert_eq!(DxgiFormat::R1Unorm.bits_per_pixel(), 1);
        assert_eq!(DxgiFormat::Bc1Unorm.bytes_per_block(), 8);
        assert_eq!(DxgiFormat::Bc7UnormSrgb.bytes_per_block(), 16);
        assert_eq!(DxgiFormat::Bc1Unorm.bits_per_pixel(), 0);
        assert_eq!(DxgiFormat::G8R8G8B8Unorm.bits_per_pixel(), 0);
        assert!(DxgiFormat::R8G8B8G8Unorm.is_packed());
        assert!(DxgiFormat::Bc6hSf16.is_block_compressed());
        assert!(DxgiFormat::B8G8R8X8UnormSrgb.is_srgb());
        assert!(!DxgiFormat::R8G8B8A8Unorm.is_srgb());
        assert_eq!(DxgiFormat::B4G4R4A4Unorm.to_string(), "B4G4R4A4_UNORM");
    }
}
