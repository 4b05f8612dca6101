//! Truevision TGA description and decoding.
//!
//! Decoders produce tightly packed rows in file order; `origin_bottom` tells
//! the caller whether the first row is the bottom of the image.

use makedds_common::{BinaryReader, FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::{Error, Result};

/// Signature found in the footer of TGA 2.0 files.
pub const FOOTER_SIGNATURE: &[u8; 16] = b"TRUEVISION-XFILE";

/// 18-byte file header.
#[derive(Debug, Clone, Copy, Default, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct TgaHeader {
    pub image_id_length: u8,
    pub colormap_type: u8,
    pub image_type: u8,
    pub cmap_first_entry: u16,
    pub cmap_length: u16,
    /// Bits per colormap entry.
    pub cmap_entry_size: u8,
    pub x_origin: u16,
    pub y_origin: u16,
    pub width: u16,
    pub height: u16,
    pub bits_per_pixel: u8,
    /// Bits 0-3 attribute bits, bits 4-5 origin.
    pub descriptor: u8,
}

/// 26-byte TGA 2.0 footer.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct TgaFooter {
    pub extension_offset: u32,
    pub developer_offset: u32,
    pub signature: [u8; 16],
    pub period: u8,
    pub zero: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum TgaImageType {
    NoImageData = 0,
    UncompressedPalette = 1,
    UncompressedTrueColor = 2,
    UncompressedGray = 3,
    RlePalette = 9,
    RleTrueColor = 10,
    RleGray = 11,
}

impl TgaImageType {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::NoImageData),
            1 => Some(Self::UncompressedPalette),
            2 => Some(Self::UncompressedTrueColor),
            3 => Some(Self::UncompressedGray),
            9 => Some(Self::RlePalette),
            10 => Some(Self::RleTrueColor),
            11 => Some(Self::RleGray),
            _ => None,
        }
    }

    pub fn is_rle(self) -> bool {
        matches!(self, Self::RlePalette | Self::RleTrueColor | Self::RleGray)
    }
}

/// An image header with views of the colormap and pixel data.
#[derive(Debug, Clone, Copy)]
pub struct TgaDescription<'a> {
    pub image_type: Option<TgaImageType>,
    pub colormap_type: u8,
    pub cmap_first_entry: u16,
    pub cmap_length: u16,
    pub cmap_entry_size: u8,
    /// Set when `y_origin` is 0 or descriptor bit 5 is clear.
    pub origin_bottom: bool,
    pub width: usize,
    pub height: usize,
    pub bits_per_pixel: u8,
    /// Size of the buffer a decoder needs; 0 for unsupported types.
    pub pixel_data_size: usize,
    pub colormap: &'a [u8],
    /// Encoded pixel data through the end of the file.
    pub pixel_data: &'a [u8],
}

pub fn header(data: &[u8]) -> Result<TgaHeader> {
    let needed = std::mem::size_of::<TgaHeader>();
    if data.len() < needed {
        return Err(Error::TooShort {
            container: "TGA",
            needed,
            available: data.len(),
        });
    }
    Ok(BinaryReader::new(data).read_struct()?)
}

/// Read the TGA 2.0 footer, if the file has one.
pub fn footer(data: &[u8]) -> Result<TgaFooter> {
    let footer_size = std::mem::size_of::<TgaFooter>();
    let needed = std::mem::size_of::<TgaHeader>() + footer_size;
    if data.len() < needed {
        return Err(Error::TooShort {
            container: "TGA",
            needed,
            available: data.len(),
        });
    }
    let footer: TgaFooter = BinaryReader::new_at(data, data.len() - footer_size).read_struct()?;
    if &footer.signature != FOOTER_SIGNATURE {
        return Err(Error::InvalidSignature {
            container: "TGA footer",
            actual: footer.signature.to_vec(),
        });
    }
    Ok(footer)
}

pub fn describe(data: &[u8]) -> Result<TgaDescription<'_>> {
    let header = header(data)?;

    let width = header.width as usize;
    let height = header.height as usize;
    let cmap_length = header.cmap_length;
    let cmap_offset = std::mem::size_of::<TgaHeader>() + header.image_id_length as usize;
    let cmap_size = cmap_length as usize * (header.cmap_entry_size as usize / 8);
    let data_offset = cmap_offset + cmap_size;

    let colormap = data.get(cmap_offset..data_offset).ok_or(Error::Truncated {
        what: "colormap",
        offset: cmap_offset,
    })?;
    let pixel_data = &data[data_offset..];

    let image_type = TgaImageType::from_code(header.image_type);
    let pixel_data_size = match image_type {
        Some(TgaImageType::UncompressedGray | TgaImageType::RleGray) => width * height,
        Some(
            TgaImageType::UncompressedPalette
            | TgaImageType::UncompressedTrueColor
            | TgaImageType::RlePalette
            | TgaImageType::RleTrueColor,
        ) => width * height * 4,
        Some(TgaImageType::NoImageData) | None => 0,
    };

    Ok(TgaDescription {
        image_type,
        colormap_type: header.colormap_type,
        cmap_first_entry: header.cmap_first_entry,
        cmap_length,
        cmap_entry_size: header.cmap_entry_size,
        origin_bottom: header.y_origin == 0 || header.descriptor & 0x20 == 0,
        width,
        height,
        bits_per_pixel: header.bits_per_pixel,
        pixel_data_size,
        colormap,
        pixel_data,
    })
}

fn unsupported(desc: &TgaDescription<'_>) -> Error {
    Error::UnsupportedImage {
        image_type: desc.image_type.map_or(0xFF, |t| t as u8),
        bits: desc.bits_per_pixel,
    }
}

fn check_destination(desc: &TgaDescription<'_>, dst: &[u8]) -> Result<()> {
    if dst.len() < desc.pixel_data_size {
        return Err(Error::DestinationTooSmall {
            needed: desc.pixel_data_size,
            available: dst.len(),
        });
    }
    Ok(())
}

/// Expand run-length packets of `N`-byte source pixels.
///
/// Each source pixel is handed to `emit` together with the destination
/// slot it fills.
fn decode_rle<const N: usize, const M: usize>(
    src: &[u8],
    dst: &mut [u8],
    emit: impl Fn(&[u8; N], &mut [u8]),
) -> Result<()> {
    let mut reader = BinaryReader::new(src);
    let mut pixels = dst.chunks_exact_mut(M);
    let mut remaining = pixels.len();

    while remaining > 0 {
        let packet = reader.read_u8().map_err(|_| truncated(&reader))?;
        let run = ((packet & 0x7F) as usize + 1).min(remaining);

        if packet & 0x80 != 0 {
            let value = read_pixel::<N>(&mut reader)?;
            for slot in pixels.by_ref().take(run) {
                emit(&value, slot);
            }
        } else {
            for slot in pixels.by_ref().take(run) {
                let value = read_pixel::<N>(&mut reader)?;
                emit(&value, slot);
            }
        }
        remaining -= run;
    }
    Ok(())
}

fn read_pixel<const N: usize>(reader: &mut BinaryReader<'_>) -> Result<[u8; N]> {
    reader.read_array().map_err(|_| truncated(reader))
}

fn truncated(reader: &BinaryReader<'_>) -> Error {
    Error::Truncated {
        what: "TGA pixel data",
        offset: reader.position(),
    }
}

/// Decode a grayscale image into one byte per pixel.
pub fn decode_r8(desc: &TgaDescription<'_>, dst: &mut [u8]) -> Result<()> {
    if desc.bits_per_pixel != 8 {
        return Err(unsupported(desc));
    }
    check_destination(desc, dst)?;
    let size = desc.pixel_data_size;
    let dst = &mut dst[..size];

    match desc.image_type {
        Some(TgaImageType::UncompressedGray) => {
            let src = desc.pixel_data.get(..size).ok_or(Error::Truncated {
                what: "TGA pixel data",
                offset: desc.pixel_data.len(),
            })?;
            dst.copy_from_slice(src);
            Ok(())
        }
        Some(TgaImageType::RleGray) => {
            decode_rle::<1, 1>(desc.pixel_data, dst, |&[v], out| out[0] = v)
        }
        _ => Err(unsupported(desc)),
    }
}

fn bgr_to_rgba(&[b, g, r]: &[u8; 3], out: &mut [u8]) {
    out.copy_from_slice(&[r, g, b, 0xFF]);
}

fn bgra_to_rgba(&[b, g, r, a]: &[u8; 4], out: &mut [u8]) {
    out.copy_from_slice(&[r, g, b, a]);
}

/// Decode a 24- or 32-bit truecolor image into RGBA8.
pub fn decode_rgba32(desc: &TgaDescription<'_>, dst: &mut [u8]) -> Result<()> {
    let rle = match desc.image_type {
        Some(TgaImageType::UncompressedTrueColor) => false,
        Some(TgaImageType::RleTrueColor) => true,
        _ => return Err(unsupported(desc)),
    };
    check_destination(desc, dst)?;
    let dst = &mut dst[..desc.pixel_data_size];

    match (desc.bits_per_pixel, rle) {
        (24, true) => decode_rle::<3, 4>(desc.pixel_data, dst, bgr_to_rgba),
        (32, true) => decode_rle::<4, 4>(desc.pixel_data, dst, bgra_to_rgba),
        (24, false) => decode_raw::<3>(desc.pixel_data, dst, bgr_to_rgba),
        (32, false) => decode_raw::<4>(desc.pixel_data, dst, bgra_to_rgba),
        _ => Err(unsupported(desc)),
    }
}

fn decode_raw<const N: usize>(
    src: &[u8],
    dst: &mut [u8],
    emit: impl Fn(&[u8; N], &mut [u8]),
) -> Result<()> {
    let mut reader = BinaryReader::new(src);
    for slot in dst.chunks_exact_mut(4) {
        let value = read_pixel::<N>(&mut reader)?;
        emit(&value, slot);
    }
    Ok(())
}
