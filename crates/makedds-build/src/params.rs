//! Surface parameters and their validation.

use makedds_dds::{mip_level_count, AlphaMode, DxgiFormat, SurfaceLayout};

use crate::source::DecodedImage;
use crate::{Error, Result};

/// Describes the surface under construction.
///
/// Zero dimensions, [`DxgiFormat::Unknown`] and [`AlphaMode::Unknown`] mean
/// "take it from the first source image"; see
/// [`apply_image_defaults`](Self::apply_image_defaults).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SurfaceParams {
    /// Output width.
    pub width: u32,
    /// Output height.
    pub height: u32,
    /// Width of the first source image.
    pub base_width: u32,
    /// Height of the first source image.
    pub base_height: u32,
    /// Mip levels to emit, base included. 0 requests the full chain.
    pub max_mip_levels: u32,
    pub array_size: u32,
    pub format: DxgiFormat,
    pub alpha_mode: AlphaMode,
    pub mipmaps: bool,
    pub cubemap: bool,
    pub volume: bool,
    pub force_pow2: bool,
}

impl SurfaceParams {
    /// Check the options against the number of source images and resolve
    /// the array size.
    pub fn validate(&mut self, source_count: usize) -> Result<()> {
        if source_count == 0 {
            return Err(Error::NoSources);
        }

        if self.volume {
            if self.cubemap {
                return Err(Error::InvalidSurface("a volume cannot also be a cubemap"));
            }
            if self.mipmaps {
                return Err(Error::InvalidSurface("volumes do not support mipmaps"));
            }
            if self.array_size > 1 {
                return Err(Error::InvalidSurface("arrays of volumes are not supported"));
            }
            self.array_size = 1;
            return Ok(());
        }

        if self.cubemap {
            if source_count % 6 != 0 {
                return Err(Error::CubemapSourceCount(source_count));
            }
            self.array_size = to_u32(source_count / 6)?;
            return Ok(());
        }

        let count = to_u32(source_count)?;
        if self.array_size <= 1 {
            self.array_size = count;
        } else if self.array_size != count {
            return Err(Error::ArraySizeMismatch {
                array_size: self.array_size,
                sources: source_count,
            });
        }
        Ok(())
    }

    /// The format the surface is written in once `image` fills the defaults.
    pub fn resolved_format(&self, image: &DecodedImage) -> DxgiFormat {
        match self.format {
            DxgiFormat::Unknown => image.default_format,
            format => format,
        }
    }

    /// Fill unset fields from the first decoded source image.
    pub fn apply_image_defaults(&mut self, image: &DecodedImage) {
        self.format = self.resolved_format(image);
        if self.alpha_mode == AlphaMode::Unknown {
            self.alpha_mode = if image.has_alpha() {
                AlphaMode::Straight
            } else {
                AlphaMode::Opaque
            };
        }

        self.base_width = image.width;
        self.base_height = image.height;
        if self.width == 0 {
            self.width = self.base_width;
        }
        if self.height == 0 {
            self.height = self.base_height;
        }
        if self.force_pow2 {
            self.width = self.width.max(1).next_power_of_two();
            self.height = self.height.max(1).next_power_of_two();
        }

        let full_chain = mip_level_count(self.width, self.height);
        self.max_mip_levels = if !self.mipmaps {
            1
        } else if self.max_mip_levels == 0 || self.max_mip_levels > full_chain {
            full_chain
        } else {
            self.max_mip_levels
        };
    }

    /// Layout for header emission. Call after validation and defaulting.
    pub fn layout(&self, source_count: usize) -> SurfaceLayout {
        SurfaceLayout {
            width: self.width,
            height: self.height,
            depth: if self.volume {
                u32::try_from(source_count).unwrap_or(u32::MAX)
            } else {
                1
            },
            format: self.format,
            alpha_mode: self.alpha_mode,
            levels: self.max_mip_levels.max(1),
            array_size: self.array_size.max(1),
            mipmaps: self.mipmaps,
            cubemap: self.cubemap,
            volume: self.volume,
        }
    }
}

fn to_u32(count: usize) -> Result<u32> {
    u32::try_from(count).map_err(|_| Error::InvalidSurface("too many source images"))
}
