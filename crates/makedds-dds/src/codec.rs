//! Header construction, classification and format resolution.
//!
//! Readers cannot trust a stored pitch, so [`pitch`] is always recomputed
//! from the format and width. Classification prefers DX10 header evidence
//! and falls back to the legacy caps bits for files that predate it.

use crate::alpha::AlphaMode;
use crate::format::DxgiFormat;
use crate::header::{
    Caps, Caps2, DdsHeader, DdsHeaderDxt10, DdsPixelFormat, FourCC, HeaderFlags, MiscFlags,
    PixelFormatFlags, ResourceDimension,
};

/// Bytes per row (or per row of 4x4 blocks) at the given width.
pub fn pitch(format: DxgiFormat, width: usize) -> usize {
    if format.is_block_compressed() {
        return width.div_ceil(4).max(1).saturating_mul(format.bytes_per_block() as usize);
    }
    if format.is_packed() {
        return width.div_ceil(2).saturating_mul(4);
    }
    width.saturating_mul(format.bits_per_pixel() as usize).div_ceil(8)
}

/// Number of levels in a full mip chain down to 1x1.
pub fn mip_level_count(width: u32, height: u32) -> u32 {
    let largest = width.max(height).max(1);
    u32::BITS - largest.leading_zeros()
}

const fn masked(flags: PixelFormatFlags, bits: u32, masks: [u32; 4]) -> DdsPixelFormat {
    DdsPixelFormat {
        size: DdsPixelFormat::SIZE,
        flags: flags.bits(),
        four_cc: FourCC([0; 4]),
        rgb_bit_count: bits,
        r_bit_mask: masks[0],
        g_bit_mask: masks[1],
        b_bit_mask: masks[2],
        a_bit_mask: masks[3],
    }
}

const fn coded(four_cc: FourCC) -> DdsPixelFormat {
    DdsPixelFormat {
        size: DdsPixelFormat::SIZE,
        flags: PixelFormatFlags::FOURCC.bits(),
        four_cc,
        rgb_bit_count: 0,
        r_bit_mask: 0,
        g_bit_mask: 0,
        b_bit_mask: 0,
        a_bit_mask: 0,
    }
}

const RGB: PixelFormatFlags = PixelFormatFlags::RGB;
const RGBA: PixelFormatFlags = PixelFormatFlags::RGB.union(PixelFormatFlags::ALPHAPIXELS);
const LUMINANCE: PixelFormatFlags = PixelFormatFlags::LUMINANCE;
const LUMINANCE_ALPHA: PixelFormatFlags =
    PixelFormatFlags::LUMINANCE.union(PixelFormatFlags::ALPHAPIXELS);

/// Pre-DX10 pixel format records for formats a legacy reader can understand.
///
/// The 10:10:10:2 entry uses the red/blue-swapped masks common legacy
/// writers produce. `R24G8_TYPELESS` is described as luminance with alpha.
pub static LEGACY_PIXEL_FORMATS: [(DxgiFormat, DdsPixelFormat); 36] = [
    (DxgiFormat::R8G8B8A8Unorm, masked(RGBA, 32, [0xff, 0xff00, 0xff_0000, 0xff00_0000])),
    (DxgiFormat::R8G8B8A8UnormSrgb, masked(RGBA, 32, [0xff, 0xff00, 0xff_0000, 0xff00_0000])),
    (DxgiFormat::B8G8R8A8Unorm, masked(RGBA, 32, [0xff_0000, 0xff00, 0xff, 0xff00_0000])),
    (DxgiFormat::B8G8R8A8UnormSrgb, masked(RGBA, 32, [0xff_0000, 0xff00, 0xff, 0xff00_0000])),
    (DxgiFormat::B8G8R8X8Unorm, masked(RGB, 32, [0xff_0000, 0xff00, 0xff, 0])),
    (DxgiFormat::B8G8R8X8UnormSrgb, masked(RGB, 32, [0xff_0000, 0xff00, 0xff, 0])),
    (DxgiFormat::R10G10B10A2Unorm, masked(RGBA, 32, [0x3ff0_0000, 0x000f_fc00, 0x3ff, 0xc000_0000])),
    (DxgiFormat::R16G16Unorm, masked(RGB, 32, [0xffff, 0xffff_0000, 0, 0])),
    (DxgiFormat::B5G6R5Unorm, masked(RGB, 16, [0xf800, 0x07e0, 0x001f, 0])),
    (DxgiFormat::B5G5R5A1Unorm, masked(RGBA, 16, [0x7c00, 0x03e0, 0x001f, 0x8000])),
    (DxgiFormat::B4G4R4A4Unorm, masked(RGBA, 16, [0x0f00, 0x00f0, 0x000f, 0xf000])),
    (DxgiFormat::A8Unorm, masked(PixelFormatFlags::ALPHA, 8, [0, 0, 0, 0xff])),
    (DxgiFormat::R8Unorm, masked(LUMINANCE, 8, [0xff, 0, 0, 0])),
    (DxgiFormat::R16Unorm, masked(LUMINANCE, 16, [0xffff, 0, 0, 0])),
    (DxgiFormat::R8G8Unorm, masked(LUMINANCE_ALPHA, 16, [0xff, 0, 0, 0xff00])),
    (DxgiFormat::R24G8Typeless, masked(LUMINANCE_ALPHA, 32, [0x00ff_ffff, 0, 0, 0xff00_0000])),
    (DxgiFormat::Bc1Unorm, coded(FourCC::DXT1)),
    (DxgiFormat::Bc1UnormSrgb, coded(FourCC::DXT1)),
    (DxgiFormat::Bc2Unorm, coded(FourCC::DXT3)),
    (DxgiFormat::Bc2UnormSrgb, coded(FourCC::DXT3)),
    (DxgiFormat::Bc3Unorm, coded(FourCC::DXT5)),
    (DxgiFormat::Bc3UnormSrgb, coded(FourCC::DXT5)),
    (DxgiFormat::Bc4Unorm, coded(FourCC::BC4U)),
    (DxgiFormat::Bc4Snorm, coded(FourCC::BC4S)),
    (DxgiFormat::Bc5Unorm, coded(FourCC::BC5U)),
    (DxgiFormat::Bc5Snorm, coded(FourCC::BC5S)),
    (DxgiFormat::R8G8B8G8Unorm, coded(FourCC::RGBG)),
    (DxgiFormat::G8R8G8B8Unorm, coded(FourCC::GRGB)),
    (DxgiFormat::R16G16B16A16Unorm, coded(FourCC::from_code(36))),
    (DxgiFormat::R16G16B16A16Snorm, coded(FourCC::from_code(110))),
    (DxgiFormat::R16Float, coded(FourCC::from_code(111))),
    (DxgiFormat::R16G16Float, coded(FourCC::from_code(112))),
    (DxgiFormat::R16G16B16A16Float, coded(FourCC::from_code(113))),
    (DxgiFormat::R32Float, coded(FourCC::from_code(114))),
    (DxgiFormat::R32G32Float, coded(FourCC::from_code(115))),
    (DxgiFormat::R32G32B32A32Float, coded(FourCC::from_code(116))),
];

/// Legacy pixel format record for `format`.
///
/// Formats without a legacy description get a record with no flags or masks.
pub fn legacy_pixel_format(format: DxgiFormat) -> DdsPixelFormat {
    LEGACY_PIXEL_FORMATS
        .iter()
        .find(|(candidate, _)| *candidate == format)
        .map(|&(_, pf)| pf)
        .unwrap_or(DdsPixelFormat {
            size: DdsPixelFormat::SIZE,
            ..DdsPixelFormat::default()
        })
}

/// Everything needed to emit the header pair for a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceLayout {
    pub width: u32,
    pub height: u32,
    /// Slice count for volumes; 1 otherwise.
    pub depth: u32,
    pub format: DxgiFormat,
    pub alpha_mode: AlphaMode,
    /// Resolved mip count, including the base level.
    pub levels: u32,
    /// Array elements; for cubemaps the number of whole cubes.
    pub array_size: u32,
    pub mipmaps: bool,
    pub cubemap: bool,
    pub volume: bool,
}

impl SurfaceLayout {
    /// Number of 2D images per array element.
    pub fn faces(&self) -> u32 {
        if self.cubemap {
            6
        } else {
            1
        }
    }
}

/// Build the primary and DX10 headers for `layout`.
///
/// The pixel format always carries the `DX10` FourCC, so readers must look
/// for the extension header first; legacy masks are included when known.
pub fn build_headers(layout: &SurfaceLayout) -> (DdsHeader, DdsHeaderDxt10) {
    let mut flags = HeaderFlags::CAPS
        | HeaderFlags::HEIGHT
        | HeaderFlags::WIDTH
        | HeaderFlags::PIXELFORMAT
        | HeaderFlags::MIPMAPCOUNT;
    if layout.volume {
        flags |= HeaderFlags::DEPTH;
    }
    if layout.format.is_block_compressed() {
        flags |= HeaderFlags::LINEARSIZE;
    } else {
        flags |= HeaderFlags::PITCH;
    }

    let mut caps = Caps::TEXTURE;
    if layout.mipmaps {
        caps |= Caps::COMPLEX | Caps::MIPMAP;
    }
    if layout.cubemap || layout.volume {
        caps |= Caps::COMPLEX;
    }

    let mut caps2 = Caps2::empty();
    if layout.cubemap {
        caps2 |= Caps2::CUBEMAP | Caps2::CUBEMAP_ALLFACES;
    }
    if layout.volume {
        caps2 |= Caps2::VOLUME;
    }

    let mut pixel_format = legacy_pixel_format(layout.format);
    pixel_format.flags |= PixelFormatFlags::FOURCC.bits();
    pixel_format.four_cc = FourCC::DX10;

    let row_pitch = pitch(layout.format, layout.width as usize);

    let header = DdsHeader {
        size: DdsHeader::SIZE,
        flags: flags.bits(),
        height: layout.height,
        width: layout.width,
        pitch_or_linear_size: u32::try_from(row_pitch).unwrap_or(u32::MAX),
        depth: layout.depth,
        mipmap_count: layout.levels,
        reserved1: [0; 11],
        pixel_format,
        caps: caps.bits(),
        caps2: caps2.bits(),
        caps3: 0,
        caps4: 0,
        reserved2: 0,
    };

    let dimension = if layout.volume {
        ResourceDimension::Texture3D
    } else {
        ResourceDimension::Texture2D
    };
    let misc = if layout.cubemap {
        MiscFlags::TEXTURECUBE
    } else {
        MiscFlags::empty()
    };

    let dx10 = DdsHeaderDxt10 {
        dxgi_format: layout.format.code(),
        resource_dimension: dimension as u32,
        misc_flag: misc.bits(),
        array_size: layout.array_size,
        misc_flags2: layout.alpha_mode.code(),
    };

    (header, dx10)
}

pub fn is_cubemap(header: &DdsHeader, header_ex: Option<&DdsHeaderDxt10>) -> bool {
    if let Some(ex) = header_ex {
        if ex.dimension() == Some(ResourceDimension::Texture2D)
            && ex.misc_flag == MiscFlags::TEXTURECUBE.bits()
        {
            return true;
        }
    }
    let caps2 = header.caps2_flags();
    header.caps_flags().contains(Caps::COMPLEX)
        && caps2.contains(Caps2::CUBEMAP)
        && caps2.intersects(Caps2::CUBEMAP_ALLFACES)
}

/// Volume textures cannot be arrays.
pub fn is_volume(header: &DdsHeader, header_ex: Option<&DdsHeaderDxt10>) -> bool {
    if header_ex.is_some_and(|ex| ex.array_size != 1) {
        return false;
    }
    let depth = header.depth;
    header.caps_flags().contains(Caps::COMPLEX)
        && header.caps2_flags().contains(Caps2::VOLUME)
        && header.header_flags().contains(HeaderFlags::DEPTH)
        && depth > 1
}

/// Arrays require the DX10 header.
pub fn is_array(_header: &DdsHeader, header_ex: Option<&DdsHeaderDxt10>) -> bool {
    header_ex.is_some_and(|ex| ex.array_size > 1)
}

pub fn has_mipmaps(header: &DdsHeader, header_ex: Option<&DdsHeaderDxt10>) -> bool {
    if let Some(ex) = header_ex {
        if !matches!(
            ex.dimension(),
            Some(
                ResourceDimension::Texture1D
                    | ResourceDimension::Texture2D
                    | ResourceDimension::Texture3D
            )
        ) {
            return false;
        }
    }
    let levels = header.mipmap_count;
    header.caps_flags().contains(Caps::MIPMAP)
        || header.header_flags().contains(HeaderFlags::MIPMAPCOUNT)
        || levels > 0
}

/// Number of 2D surfaces stored per level: array elements times cube faces.
pub fn array_count(header: &DdsHeader, header_ex: Option<&DdsHeaderDxt10>) -> usize {
    let faces = if is_cubemap(header, header_ex) { 6 } else { 1 };
    match header_ex {
        Some(ex) => (ex.array_size.max(1) as usize).saturating_mul(faces),
        None => faces,
    }
}

pub fn level_count(header: &DdsHeader, header_ex: Option<&DdsHeaderDxt10>) -> usize {
    if has_mipmaps(header, header_ex) {
        header.mipmap_count.max(1) as usize
    } else {
        1
    }
}

/// Determine the pixel format of a surface.
///
/// Without a DX10 header the format is inferred from the legacy FourCC or
/// channel masks. Unrecognised layouts give [`DxgiFormat::Unknown`].
pub fn resolve_format(header: &DdsHeader, header_ex: Option<&DdsHeaderDxt10>) -> DxgiFormat {
    if let Some(ex) = header_ex {
        return ex.format();
    }

    let pf = header.pixel_format;
    let flags = pf.pixel_flags();
    let bits = pf.rgb_bit_count;
    let masks = pf.masks();

    if flags.contains(PixelFormatFlags::FOURCC) {
        return match pf.four_cc {
            FourCC::DXT1 => DxgiFormat::Bc1Unorm,
            FourCC::DXT2 | FourCC::DXT3 => DxgiFormat::Bc2Unorm,
            FourCC::DXT4 | FourCC::DXT5 => DxgiFormat::Bc3Unorm,
            FourCC::ATI1 | FourCC::BC4U => DxgiFormat::Bc4Unorm,
            FourCC::BC4S => DxgiFormat::Bc4Snorm,
            FourCC::ATI2 | FourCC::BC5U => DxgiFormat::Bc5Unorm,
            FourCC::BC5S => DxgiFormat::Bc5Snorm,
            FourCC::RGBG => DxgiFormat::R8G8B8G8Unorm,
            FourCC::GRGB => DxgiFormat::G8R8G8B8Unorm,
            other => match other.code() {
                36 => DxgiFormat::R16G16B16A16Unorm,
                110 => DxgiFormat::R16G16B16A16Snorm,
                111 => DxgiFormat::R16Float,
                112 => DxgiFormat::R16G16Float,
                113 => DxgiFormat::R16G16B16A16Float,
                114 => DxgiFormat::R32Float,
                115 => DxgiFormat::R32G32Float,
                116 => DxgiFormat::R32G32B32A32Float,
                _ => DxgiFormat::Unknown,
            },
        };
    }

    if flags.contains(PixelFormatFlags::RGB) {
        let resolved = match (bits, masks) {
            (32, [0xff, 0xff00, 0xff_0000, 0xff00_0000]) => DxgiFormat::R8G8B8A8Unorm,
            (32, [0xff_0000, 0xff00, 0xff, 0xff00_0000]) => DxgiFormat::B8G8R8A8Unorm,
            (32, [0xff_0000, 0xff00, 0xff, 0]) => DxgiFormat::B8G8R8X8Unorm,
            (32, [0x3ff0_0000, 0x000f_fc00, 0x3ff, 0xc000_0000]) => DxgiFormat::R10G10B10A2Unorm,
            (32, [0xffff, 0xffff_0000, 0, 0]) => DxgiFormat::R16G16Unorm,
            (32, [0xffff_ffff, 0, 0, 0]) => DxgiFormat::R32Float,
            (16, [0x7c00, 0x03e0, 0x001f, 0x8000]) => DxgiFormat::B5G5R5A1Unorm,
            (16, [0xf800, 0x07e0, 0x001f, 0]) => DxgiFormat::B5G6R5Unorm,
            (16, [0x0f00, 0x00f0, 0x000f, 0xf000]) => DxgiFormat::B4G4R4A4Unorm,
            _ => DxgiFormat::Unknown,
        };
        if resolved != DxgiFormat::Unknown {
            return resolved;
        }
    }

    if flags.contains(PixelFormatFlags::ALPHA) && bits == 8 {
        return DxgiFormat::A8Unorm;
    }

    if flags.contains(PixelFormatFlags::LUMINANCE) {
        match (bits, masks) {
            (8, [0xff, 0, 0, 0]) => return DxgiFormat::R8Unorm,
            (16, [0xffff, 0, 0, 0]) => return DxgiFormat::R16Unorm,
            (16, [0xff, 0, 0, 0xff00]) => return DxgiFormat::R8G8Unorm,
            _ => {}
        }
    }

    DxgiFormat::Unknown
}

#[cfg(test)]
mod tests {
    use super::*;

    fn legacy_header(pf: DdsPixelFormat) -> DdsHeader {
        DdsHeader {
            size: DdsHeader::SIZE,
            pixel_format: pf,
            ..DdsHeader::default()
        }
    }

    #[test]
    fn test_pitch_branches() {
        // block-compressed
        assert_eq!(pitch(DxgiFormat::Bc1Unorm, 256), 64 * 8);
        assert_eq!(pitch(DxgiFormat::Bc3Unorm, 5), 2 * 16);
        assert_eq!(pitch(DxgiFormat::Bc1Unorm, 1), 8);
        // packed
        assert_eq!(pitch(DxgiFormat::R8G8B8G8Unorm, 5), 12);
        assert_eq!(pitch(DxgiFormat::G8R8G8B8Unorm, 4), 8);
        // plain
        assert_eq!(pitch(DxgiFormat::R8G8B8A8Unorm, 256), 1024);
        assert_eq!(pitch(DxgiFormat::R1Unorm, 9), 2);
        assert_eq!(pitch(DxgiFormat::Unknown, 64), 0);
    }

    #[test]
    fn test_mip_level_count() {
        assert_eq!(mip_level_count(64, 64), 7);
        assert_eq!(mip_level_count(256, 16), 9);
        assert_eq!(mip_level_count(1, 1), 1);
        assert_eq!(mip_level_count(0, 0), 1);
        assert_eq!(mip_level_count(100, 3), 7);
    }

    #[test]
    fn test_legacy_masks_resolve_back() {
        for &(format, pf) in &LEGACY_PIXEL_FORMATS {
            let resolved = resolve_format(&legacy_header(pf), None);
            match format {
                DxgiFormat::R24G8Typeless => assert_eq!(resolved, DxgiFormat::Unknown),
                _ if format.is_srgb() => {
                    let linear = DxgiFormat::from_name(format.name().trim_end_matches("_SRGB")).unwrap();
                    assert_eq!(resolved, linear, "{format}");
                }
                _ => assert_eq!(resolved, format, "{format}"),
            }
        }
    }

    #[test]
    fn test_swapped_10_10_10_2_masks() {
        let pf = legacy_pixel_format(DxgiFormat::R10G10B10A2Unorm);
        let (r, b) = (pf.r_bit_mask, pf.b_bit_mask);
        assert_eq!(r, 0x3ff0_0000);
        assert_eq!(b, 0x3ff);

        let correct = masked(RGBA, 32, [0x3ff, 0x000f_fc00, 0x3ff0_0000, 0xc000_0000]);
        assert_eq!(resolve_format(&legacy_header(correct), None), DxgiFormat::Unknown);
    }

    #[test]
    fn test_r24g8_is_luminance_alpha() {
        let pf = legacy_pixel_format(DxgiFormat::R24G8Typeless);
        assert_eq!(pf.pixel_flags(), PixelFormatFlags::LUMINANCE | PixelFormatFlags::ALPHAPIXELS);
    }

    #[test]
    fn test_legacy_fourcc_aliases() {
        for (code, expected) in [
            (FourCC::DXT2, DxgiFormat::Bc2Unorm),
            (FourCC::DXT4, DxgiFormat::Bc3Unorm),
            (FourCC::ATI1, DxgiFormat::Bc4Unorm),
            (FourCC::ATI2, DxgiFormat::Bc5Unorm),
            (FourCC(*b"XYZW"), DxgiFormat::Unknown),
        ] {
            assert_eq!(resolve_format(&legacy_header(coded(code)), None), expected);
        }
    }

    #[test]
    fn test_unlisted_format_has_empty_legacy_record() {
        let pf = legacy_pixel_format(DxgiFormat::Bc7Unorm);
        let (flags, size) = (pf.flags, pf.size);
        assert_eq!(flags, 0);
        assert_eq!(size, 32);
        assert_eq!(pf.masks(), [0; 4]);
    }

    fn layout() -> SurfaceLayout {
        SurfaceLayout {
            width: 64,
            height: 32,
            depth: 1,
            format: DxgiFormat::R8G8B8A8Unorm,
            alpha_mode: AlphaMode::Straight,
            levels: 7,
            array_size: 1,
            mipmaps: true,
            cubemap: false,
            volume: false,
        }
    }

    #[test]
    fn test_build_headers_mipmapped_texture() {
        let (header, dx10) = build_headers(&layout());

        assert_eq!(
            header.header_flags(),
            HeaderFlags::CAPS
                | HeaderFlags::HEIGHT
                | HeaderFlags::WIDTH
                | HeaderFlags::PIXELFORMAT
                | HeaderFlags::MIPMAPCOUNT
                | HeaderFlags::PITCH
        );
        assert_eq!(header.caps_flags(), Caps::TEXTURE | Caps::COMPLEX | Caps::MIPMAP);
        assert_eq!(header.caps2_flags(), Caps2::empty());
        assert!(header.is_dx10());

        let (pitch, levels, width, height) = (
            header.pitch_or_linear_size,
            header.mipmap_count,
            header.width,
            header.height,
        );
        assert_eq!((pitch, levels, width, height), (256, 7, 64, 32));

        let (format, dimension, alpha) = (dx10.dxgi_format, dx10.resource_dimension, dx10.misc_flags2);
        assert_eq!(format, DxgiFormat::R8G8B8A8Unorm.code());
        assert_eq!(dimension, ResourceDimension::Texture2D as u32);
        assert_eq!(alpha, AlphaMode::Straight.code());

        assert!(has_mipmaps(&header, Some(&dx10)));
        assert!(!is_cubemap(&header, Some(&dx10)));
        assert_eq!(level_count(&header, Some(&dx10)), 7);
        assert_eq!(resolve_format(&header, Some(&dx10)), DxgiFormat::R8G8B8A8Unorm);
    }

    #[test]
    fn test_build_headers_cubemap_array() {
        let (header, dx10) = build_headers(&SurfaceLayout {
            cubemap: true,
            mipmaps: false,
            levels: 1,
            array_size: 2,
            ..layout()
        });

        assert_eq!(header.caps_flags(), Caps::TEXTURE | Caps::COMPLEX);
        assert!(header.caps2_flags().contains(Caps2::CUBEMAP | Caps2::CUBEMAP_ALLFACES));
        assert_eq!(dx10.misc_flags(), MiscFlags::TEXTURECUBE);

        assert!(is_cubemap(&header, Some(&dx10)));
        assert!(is_cubemap(&header, None));
        assert!(is_array(&header, Some(&dx10)));
        assert_eq!(array_count(&header, Some(&dx10)), 12);
        assert_eq!(array_count(&header, None), 6);
    }

    #[test]
    fn test_build_headers_volume() {
        let (header, dx10) = build_headers(&SurfaceLayout {
            depth: 8,
            volume: true,
            mipmaps: false,
            levels: 1,
            ..layout()
        });

        assert!(header.header_flags().contains(HeaderFlags::DEPTH));
        assert!(header.caps2_flags().contains(Caps2::VOLUME));
        assert!(header.caps_flags().contains(Caps::COMPLEX));
        assert_eq!(dx10.dimension(), Some(ResourceDimension::Texture3D));
        assert!(is_volume(&header, Some(&dx10)));
        assert!(!is_array(&header, Some(&dx10)));

        let arrayed = DdsHeaderDxt10 {
            array_size: 2,
            ..dx10
        };
        assert!(!is_volume(&header, Some(&arrayed)));
    }

    #[test]
    fn test_block_compressed_uses_linear_size() {
        let (header, _) = build_headers(&SurfaceLayout {
            format: DxgiFormat::Bc1Unorm,
            ..layout()
        });
        assert!(header.header_flags().contains(HeaderFlags::LINEARSIZE));
        assert!(!header.header_flags().contains(HeaderFlags::PITCH));
        let linear = header.pitch_or_linear_size;
        assert_eq!(linear, 16 * 8);
    }

    #[test]
    fn test_mipmaps_rejected_for_buffer_dimension() {
        let (header, dx10) = build_headers(&layout());
        let buffer = DdsHeaderDxt10 {
            resource_dimension: ResourceDimension::Buffer as u32,
            ..dx10
        };
        assert!(!has_mipmaps(&header, Some(&buffer)));
        assert_eq!(level_count(&header, Some(&buffer)), 1);
    }
}
