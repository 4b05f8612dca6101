//! On-disk DDS headers.
//!
//! A file is the magic `DDS `, a 124-byte [`DdsHeader`] with an embedded
//! [`DdsPixelFormat`], and, when the pixel format's FourCC is `DX10`, a
//! 20-byte [`DdsHeaderDxt10`]. Flag words stay raw `u32`s so unknown bits
//! survive a read/write cycle; the typed views use `from_bits_retain`.

use bitflags::bitflags;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::alpha::AlphaMode;
use crate::format::DxgiFormat;

/// `DDS_HEADER`.
#[derive(Debug, Clone, Copy, Default, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct DdsHeader {
    /// Always [`DdsHeader::SIZE`] in a valid file.
    pub size: u32,
    pub flags: u32,
    pub height: u32,
    pub width: u32,
    /// Row pitch for uncompressed surfaces, top-level byte size otherwise.
    pub pitch_or_linear_size: u32,
    /// Slice count of a volume texture, 0 or 1 elsewhere.
    pub depth: u32,
    pub mipmap_count: u32,
    pub reserved1: [u32; 11],
    pub pixel_format: DdsPixelFormat,
    pub caps: u32,
    pub caps2: u32,
    pub caps3: u32,
    pub caps4: u32,
    pub reserved2: u32,
}

impl DdsHeader {
    pub const SIZE: u32 = 124;

    /// Whether a [`DdsHeaderDxt10`] follows this header.
    pub fn is_dx10(&self) -> bool {
        self.pixel_format.pixel_flags().contains(PixelFormatFlags::FOURCC)
            && self.pixel_format.four_cc == FourCC::DX10
    }

    pub fn header_flags(&self) -> HeaderFlags {
        HeaderFlags::from_bits_retain(self.flags)
    }

    pub fn caps_flags(&self) -> Caps {
        Caps::from_bits_retain(self.caps)
    }

    pub fn caps2_flags(&self) -> Caps2 {
        Caps2::from_bits_retain(self.caps2)
    }
}

/// `DDS_PIXELFORMAT`, the legacy description of the texel layout.
///
/// Writers fill in masks for formats D3D9 could express and leave them zero
/// otherwise, relying on the DX10 header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct DdsPixelFormat {
    pub size: u32,
    pub flags: u32,
    pub four_cc: FourCC,
    pub rgb_bit_count: u32,
    pub r_bit_mask: u32,
    pub g_bit_mask: u32,
    pub b_bit_mask: u32,
    pub a_bit_mask: u32,
}

impl DdsPixelFormat {
    pub const SIZE: u32 = 32;

    pub fn pixel_flags(&self) -> PixelFormatFlags {
        PixelFormatFlags::from_bits_retain(self.flags)
    }

    /// Channel masks in R, G, B, A order.
    pub fn masks(&self) -> [u32; 4] {
        [self.r_bit_mask, self.g_bit_mask, self.b_bit_mask, self.a_bit_mask]
    }
}

/// Contents of `DDS_PIXELFORMAT.dwFourCC`.
///
/// Besides ASCII codes the field may hold a numeric D3D9 format such as
/// 113 (`D3DFMT_A16B16G16R16F`); see [`FourCC::from_code`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(transparent)]
pub struct FourCC(pub [u8; 4]);

impl FourCC {
    // BC1 to BC3, with the premultiplied variants.
    pub const DXT1: Self = Self(*b"DXT1");
    pub const DXT2: Self = Self(*b"DXT2");
    pub const DXT3: Self = Self(*b"DXT3");
    pub const DXT4: Self = Self(*b"DXT4");
    pub const DXT5: Self = Self(*b"DXT5");
    // BC4 and BC5 under their vendor and later names.
    pub const ATI1: Self = Self(*b"ATI1");
    pub const ATI2: Self = Self(*b"ATI2");
    pub const BC4U: Self = Self(*b"BC4U");
    pub const BC4S: Self = Self(*b"BC4S");
    pub const BC5U: Self = Self(*b"BC5U");
    pub const BC5S: Self = Self(*b"BC5S");
    // Packed 4:2:2 layouts.
    pub const RGBG: Self = Self(*b"RGBG");
    pub const GRGB: Self = Self(*b"GRGB");
    /// Marks the presence of [`DdsHeaderDxt10`].
    pub const DX10: Self = Self(*b"DX10");

    pub const fn from_code(code: u32) -> Self {
        Self(code.to_le_bytes())
    }

    pub const fn code(self) -> u32 {
        u32::from_le_bytes(self.0)
    }
}

/// `DDS_HEADER_DXT10`.
#[derive(Debug, Clone, Copy, Default, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct DdsHeaderDxt10 {
    /// A `DXGI_FORMAT` code, see [`DxgiFormat::from_code`].
    pub dxgi_format: u32,
    pub resource_dimension: u32,
    pub misc_flag: u32,
    /// Element count; counts whole cubes for cubemaps.
    pub array_size: u32,
    /// Low three bits carry the [`AlphaMode`].
    pub misc_flags2: u32,
}

impl DdsHeaderDxt10 {
    pub const SIZE: u32 = 20;

    pub fn format(&self) -> DxgiFormat {
        DxgiFormat::from_code(self.dxgi_format).unwrap_or_default()
    }

    pub fn dimension(&self) -> Option<ResourceDimension> {
        ResourceDimension::from_code(self.resource_dimension)
    }

    pub fn misc_flags(&self) -> MiscFlags {
        MiscFlags::from_bits_retain(self.misc_flag)
    }

    pub fn alpha_mode(&self) -> AlphaMode {
        AlphaMode::from_code(self.misc_flags2 & 0x7).unwrap_or_default()
    }
}

/// D3D10 resource dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ResourceDimension {
    Unknown = 0,
    Buffer = 1,
    Texture1D = 2,
    Texture2D = 3,
    Texture3D = 4,
}

impl ResourceDimension {
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(Self::Unknown),
            1 => Some(Self::Buffer),
            2 => Some(Self::Texture1D),
            3 => Some(Self::Texture2D),
            4 => Some(Self::Texture3D),
            _ => None,
        }
    }
}

bitflags! {
    /// `DDS_HEADER.dwFlags`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct HeaderFlags: u32 {
        const CAPS = 0x1;
        const HEIGHT = 0x2;
        const WIDTH = 0x4;
        const PITCH = 0x8;
        const PIXELFORMAT = 0x1000;
        const MIPMAPCOUNT = 0x20000;
        const LINEARSIZE = 0x80000;
        const DEPTH = 0x80_0000;
    }
}

bitflags! {
    /// `DDS_HEADER.dwCaps`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Caps: u32 {
        const COMPLEX = 0x8;
        const TEXTURE = 0x1000;
        const MIPMAP = 0x40_0000;
    }
}

bitflags! {
    /// `DDS_HEADER.dwCaps2`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Caps2: u32 {
        const CUBEMAP = 0x200;
        const CUBEMAP_POSITIVEX = 0x400;
        const CUBEMAP_NEGATIVEX = 0x800;
        const CUBEMAP_POSITIVEY = 0x1000;
        const CUBEMAP_NEGATIVEY = 0x2000;
        const CUBEMAP_POSITIVEZ = 0x4000;
        const CUBEMAP_NEGATIVEZ = 0x8000;
        const CUBEMAP_ALLFACES = Self::CUBEMAP_POSITIVEX.bits()
            | Self::CUBEMAP_NEGATIVEX.bits()
            | Self::CUBEMAP_POSITIVEY.bits()
            | Self::CUBEMAP_NEGATIVEY.bits()
            | Self::CUBEMAP_POSITIVEZ.bits()
            | Self::CUBEMAP_NEGATIVEZ.bits();
        const VOLUME = 0x20_0000;
    }
}

bitflags! {
    /// `DDS_PIXELFORMAT.dwFlags`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PixelFormatFlags: u32 {
        const ALPHAPIXELS = 0x1;
        const ALPHA = 0x2;
        const FOURCC = 0x4;
        const RGB = 0x40;
        const YUV = 0x200;
        const LUMINANCE = 0x2_0000;
    }
}

bitflags! {
    /// `DDS_HEADER_DXT10.miscFlag`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MiscFlags: u32 {
        const TEXTURECUBE = 0x4;
    }
}
