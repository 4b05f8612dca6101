//! Source image decoding and pixel encoding.

use std::path::Path;

use image::imageops::FilterType;
use image::{ColorType, DynamicImage};
use makedds_dds::DxgiFormat;

use crate::{Error, Result};

/// A decoded source image and the format it maps to by default.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub image: DynamicImage,
    pub width: u32,
    pub height: u32,
    pub channels: u8,
    pub default_format: DxgiFormat,
    pub is_hdr: bool,
}

impl DecodedImage {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("decoding {}", path.display());
        Ok(Self::from_dynamic(image::open(path)?))
    }

    pub fn from_dynamic(image: DynamicImage) -> Self {
        let color = image.color();
        let channels = color.channel_count();
        let is_hdr = matches!(color, ColorType::Rgb32F | ColorType::Rgba32F);

        let default_format = match (is_hdr, channels) {
            (true, 1) => DxgiFormat::R32Float,
            (true, 2) => DxgiFormat::R32G32Float,
            (true, 3) => DxgiFormat::R32G32B32Float,
            (true, _) => DxgiFormat::R32G32B32A32Float,
            (false, 1) => DxgiFormat::R8Unorm,
            (false, 2) => DxgiFormat::R8G8Unorm,
            (false, _) => DxgiFormat::R8G8B8A8Unorm,
        };

        Self {
            width: image.width(),
            height: image.height(),
            channels,
            default_format,
            is_hdr,
            image,
        }
    }

    pub fn has_alpha(&self) -> bool {
        self.image.color().has_alpha()
    }

    /// Resize to exactly `width` x `height`, keeping the default format.
    pub fn resized(self, width: u32, height: u32) -> Self {
        if self.width == width && self.height == height {
            return self;
        }
        Self {
            image: self.image.resize_exact(width, height, FilterType::Lanczos3),
            width,
            height,
            ..self
        }
    }

    /// Encode the pixels as tightly packed rows of `format`.
    pub fn encode(&self, format: DxgiFormat) -> Result<Vec<u8>> {
        use DxgiFormat::*;

        if !is_encodable(format) {
            return Err(Error::UnsupportedFormat(format));
        }
        let bytes = match format {
            R8Unorm => self.image.to_luma8().into_raw(),
            A8Unorm => self.image.to_rgba8().pixels().map(|p| p.0[3]).collect(),
            R8G8Unorm if self.channels == 2 => self.image.to_luma_alpha8().into_raw(),
            R8G8Unorm => self
                .image
                .to_rgba8()
                .pixels()
                .flat_map(|p| [p.0[0], p.0[1]])
                .collect(),
            R8G8B8A8Unorm | R8G8B8A8UnormSrgb | R8G8B8A8Typeless => self.image.to_rgba8().into_raw(),
            B8G8R8A8Unorm | B8G8R8A8UnormSrgb => self
                .image
                .to_rgba8()
                .pixels()
                .flat_map(|p| [p.0[2], p.0[1], p.0[0], p.0[3]])
                .collect(),
            B8G8R8X8Unorm | B8G8R8X8UnormSrgb => self
                .image
                .to_rgba8()
                .pixels()
                .flat_map(|p| [p.0[2], p.0[1], p.0[0], 0xFF])
                .collect(),
            R16Unorm => le_bytes_u16(self.image.to_luma16().into_raw()),
            R16G16B16A16Unorm => le_bytes_u16(self.image.to_rgba16().into_raw()),
            R32Float => self.float_channels(&[0]),
            R32G32Float if self.channels == 2 => self.float_channels(&[0, 3]),
            R32G32Float => self.float_channels(&[0, 1]),
            R32G32B32Float => self.float_channels(&[0, 1, 2]),
            R32G32B32A32Float => self.float_channels(&[0, 1, 2, 3]),
            other => return Err(Error::UnsupportedFormat(other)),
        };
        Ok(bytes)
    }

    fn float_channels(&self, channels: &[usize]) -> Vec<u8> {
        let pixels = self.image.to_rgba32f();
        let mut out = Vec::with_capacity(pixels.len() / 4 * channels.len() * 4);
        for pixel in pixels.pixels() {
            for &channel in channels {
                out.extend_from_slice(&pixel.0[channel].to_le_bytes());
            }
        }
        out
    }
}

/// Whether [`DecodedImage::encode`] can produce `format`.
pub fn is_encodable(format: DxgiFormat) -> bool {
    use DxgiFormat::*;

    matches!(
        format,
        R8Unorm
            | A8Unorm
            | R8G8Unorm
            | R8G8B8A8Unorm
            | R8G8B8A8UnormSrgb
            | R8G8B8A8Typeless
            | B8G8R8A8Unorm
            | B8G8R8A8UnormSrgb
            | B8G8R8X8Unorm
            | B8G8R8X8UnormSrgb
            | R16Unorm
            | R16G16B16A16Unorm
            | R32Float
            | R32G32Float
            | R32G32B32Float
            | R32G32B32A32Float
    )
}

fn le_bytes_u16(values: Vec<u16>) -> Vec<u8> {
    values.into_iter().flat_map(u16::to_le_bytes).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayAlphaImage, LumaA, Rgb32FImage, Rgba, RgbaImage};

    fn rgba(width: u32, height: u32) -> DecodedImage {
        DecodedImage::from_dynamic(DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            width,
            height,
            Rgba([10, 20, 30, 40]),
        )))
    }

    #[test]
    fn test_default_formats() {
        let image = rgba(4, 4);
        assert_eq!(image.default_format, DxgiFormat::R8G8B8A8Unorm);
        assert_eq!(image.channels, 4);
        assert!(image.has_alpha());
        assert!(!image.is_hdr);

        let gray = DecodedImage::from_dynamic(DynamicImage::new_luma8(2, 2));
        assert_eq!(gray.default_format, DxgiFormat::R8Unorm);
        assert!(!gray.has_alpha());

        let rgb = DecodedImage::from_dynamic(DynamicImage::new_rgb8(2, 2));
        assert_eq!(rgb.default_format, DxgiFormat::R8G8B8A8Unorm);

        let hdr = DecodedImage::from_dynamic(DynamicImage::ImageRgb32F(Rgb32FImage::new(2, 2)));
        assert!(hdr.is_hdr);
        assert_eq!(hdr.default_format, DxgiFormat::R32G32B32Float);
    }

    #[test]
    fn test_encode_swizzles() {
        let image = rgba(1, 1);
        assert_eq!(image.encode(DxgiFormat::R8G8B8A8Unorm).unwrap(), [10, 20, 30, 40]);
        assert_eq!(image.encode(DxgiFormat::B8G8R8A8Unorm).unwrap(), [30, 20, 10, 40]);
        assert_eq!(image.encode(DxgiFormat::B8G8R8X8Unorm).unwrap(), [30, 20, 10, 255]);
        assert_eq!(image.encode(DxgiFormat::A8Unorm).unwrap(), [40]);
        assert_eq!(image.encode(DxgiFormat::R8G8Unorm).unwrap(), [10, 20]);
    }

    #[test]
    fn test_encode_gray_alpha_pairs() {
        let image = DecodedImage::from_dynamic(DynamicImage::ImageLumaA8(GrayAlphaImage::from_pixel(
            2,
            1,
            LumaA([7, 9]),
        )));
        assert_eq!(image.default_format, DxgiFormat::R8G8Unorm);
        assert_eq!(image.encode(DxgiFormat::R8G8Unorm).unwrap(), [7, 9, 7, 9]);
    }

    #[test]
    fn test_encode_sizes_match_pitch() {
        let image = rgba(5, 3);
        for format in [
            DxgiFormat::R8Unorm,
            DxgiFormat::R16Unorm,
            DxgiFormat::R16G16B16A16Unorm,
            DxgiFormat::R32Float,
            DxgiFormat::R32G32B32A32Float,
        ] {
            let bytes = image.encode(format).unwrap();
            assert_eq!(bytes.len(), makedds_dds::pitch(format, 5) * 3, "{format}");
        }
    }

    #[test]
    fn test_encode_float_is_little_endian() {
        let image = DecodedImage::from_dynamic(DynamicImage::new_luma8(1, 1));
        assert_eq!(image.encode(DxgiFormat::R32Float).unwrap(), 0f32.to_le_bytes());
    }

    #[test]
    fn test_block_compressed_unsupported() {
        assert!(matches!(
            rgba(4, 4).encode(DxgiFormat::Bc1Unorm),
            Err(Error::UnsupportedFormat(DxgiFormat::Bc1Unorm))
        ));
    }

    #[test]
    fn test_encodable_matches_encoder() {
        let image = rgba(2, 2);
        for info in makedds_dds::FORMAT_TABLE.iter() {
            assert_eq!(
                is_encodable(info.format),
                image.encode(info.format).is_ok(),
                "{}",
                info.name
            );
        }
    }

    #[test]
    fn test_resized() {
        let image = rgba(8, 8).resized(3, 2);
        assert_eq!((image.width, image.height), (3, 2));
        assert_eq!((image.image.width(), image.image.height()), (3, 2));
        assert_eq!(image.default_format, DxgiFormat::R8G8B8A8Unorm);
    }
}
