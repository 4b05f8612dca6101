//! Per-level layout of a DDS pixel blob.

use crate::codec::{array_count, is_volume, level_count, pitch, resolve_format};
use crate::format::DxgiFormat;
use crate::header::{DdsHeader, DdsHeaderDxt10, HeaderFlags};

/// One mip level of one array element (or cube face).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelDesc<'a> {
    /// Array element (cube faces count as elements).
    pub element: usize,
    /// Mip level index, 0 is the base.
    pub index: usize,
    /// Width, rounded up to a whole block for block-compressed formats.
    pub width: usize,
    pub height: usize,
    /// Depth slices at this level; 1 unless the surface is a volume.
    pub slices: usize,
    pub bytes_per_element: usize,
    pub bytes_per_row: usize,
    pub bytes_per_slice: usize,
    pub data_size: usize,
    /// Offset of `data` within the blob.
    pub offset: usize,
    pub data: &'a [u8],
    pub format: DxgiFormat,
}

/// Size of level `level` of a dimension that starts at `base`.
#[inline]
pub fn level_dimension(base: usize, level: usize) -> usize {
    base.checked_shr(level as u32).unwrap_or(0).max(1)
}

/// Dimension as stored, rounded up to whole 4x4 blocks when compressed.
#[inline]
pub fn image_dimension(format: DxgiFormat, dimension: usize) -> usize {
    if format.is_block_compressed() {
        dimension.div_ceil(4).max(1).saturating_mul(4)
    } else {
        dimension.max(1)
    }
}

fn bytes_per_element(format: DxgiFormat) -> usize {
    if format.is_block_compressed() {
        format.bytes_per_block() as usize
    } else if format.is_packed() {
        4
    } else {
        format.bits_per_pixel() as usize / 8
    }
}

/// Walk `blob` element by element, each element's levels in order.
///
/// Stops after `max_levels` entries, or at the first level that would run
/// past the end of `blob`, has no computable size, or whose size does not
/// fit in `usize`. An unresolvable format describes nothing.
pub fn describe_levels<'a>(
    blob: &'a [u8],
    header: &DdsHeader,
    header_ex: Option<&DdsHeaderDxt10>,
    max_levels: usize,
) -> Vec<LevelDesc<'a>> {
    let format = resolve_format(header, header_ex);
    if format == DxgiFormat::Unknown {
        return Vec::new();
    }

    let flags = header.header_flags();
    let base_width = if flags.contains(HeaderFlags::WIDTH) { header.width as usize } else { 0 };
    let base_height = if flags.contains(HeaderFlags::HEIGHT) { header.height as usize } else { 0 };
    let base_depth = if is_volume(header, header_ex) { header.depth as usize } else { 1 };

    let elements = array_count(header, header_ex);
    let levels = level_count(header, header_ex);
    let element_size = bytes_per_element(format);

    let mut out = Vec::new();
    let mut offset = 0usize;

    'elements: for element in 0..elements {
        for index in 0..levels {
            if out.len() >= max_levels {
                break 'elements;
            }

            let width = image_dimension(format, level_dimension(base_width, index));
            let height = image_dimension(format, level_dimension(base_height, index));
            let slices = level_dimension(base_depth, index);

            let bytes_per_row = pitch(format, width);
            let rows = if format.is_block_compressed() { height / 4 } else { height };
            let Some(bytes_per_slice) = bytes_per_row.checked_mul(rows) else {
                break 'elements;
            };
            let Some(data_size) = bytes_per_slice.checked_mul(slices).filter(|&size| size > 0) else {
                break 'elements;
            };
            let Some(data) = offset
                .checked_add(data_size)
                .and_then(|end| blob.get(offset..end))
            else {
                break 'elements;
            };

            out.push(LevelDesc {
                element,
                index,
                width,
                height,
                slices,
                bytes_per_element: element_size,
                bytes_per_row,
                bytes_per_slice,
                data_size,
                offset,
                data,
                format,
            });
            offset += data_size;
        }
    }

    out
}
