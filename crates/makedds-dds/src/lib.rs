//! DDS (DirectDraw Surface) container support.
//!
//! # File Format
//!
//! - 4 bytes: Magic (`"DDS "`)
//! - 124 bytes: [`DdsHeader`] with an embedded 32-byte [`DdsPixelFormat`]
//! - 20 bytes: [`DdsHeaderDxt10`], present when the FourCC is `DX10`
//! - Pixel data: per array element (or cube face), each mip level in turn
//!
//! Files written by [`build_headers`] always carry the DX10 header. Legacy
//! files are understood by inferring the DXGI format from the FourCC or
//! channel masks.
//!
//! # Example
//!
//! ```
//! use makedds_dds::{build_headers, write_headers, AlphaMode, DdsFile, DxgiFormat, SurfaceLayout};
//!
//! let layout = SurfaceLayout {
//!     width: 2,
//!     height: 2,
//!     depth: 1,
//!     format: DxgiFormat::R8G8B8A8Unorm,
//!     alpha_mode: AlphaMode::Straight,
//!     levels: 1,
//!     array_size: 1,
//!     mipmaps: false,
//!     cubemap: false,
//!     volume: false,
//! };
//! let (header, dx10) = build_headers(&layout);
//!
//! let mut bytes = Vec::new();
//! write_headers(&mut bytes, &header, &dx10)?;
//! bytes.extend_from_slice(&[0u8; 16]);
//!
//! let file = DdsFile::parse(&bytes)?;
//! assert_eq!(file.format(), DxgiFormat::R8G8B8A8Unorm);
//! assert_eq!(file.levels()[0].bytes_per_row, 8);
//! # Ok::<(), makedds_dds::Error>(())
//! ```

mod alpha;
mod codec;
mod describe;
mod error;
mod file;
mod format;
mod header;

pub use alpha::AlphaMode;
pub use codec::{
    array_count, build_headers, has_mipmaps, is_array, is_cubemap, is_volume, legacy_pixel_format,
    level_count, mip_level_count, pitch, resolve_format, SurfaceLayout, LEGACY_PIXEL_FORMATS,
};
pub use describe::{describe_levels, image_dimension, level_dimension, LevelDesc};
pub use error::{Error, Result};
pub use file::{read_header, read_header_dxt10, write_headers, DdsFile, DDS_MAGIC, DX10_DATA_OFFSET};
pub use format::{DxgiFormat, FormatClass, FormatInfo, FORMAT_TABLE};
pub use header::{
    Caps, Caps2, DdsHeader, DdsHeaderDxt10, DdsPixelFormat, FourCC, HeaderFlags, MiscFlags,
    PixelFormatFlags, ResourceDimension,
};
