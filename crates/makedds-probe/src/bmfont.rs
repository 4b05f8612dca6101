//! AngelCode BMFont binary (version 3) description.
//!
//! # File Format
//!
//! - 4 bytes: `"BMF"` followed by the version byte
//! - Blocks, each a 1-byte id and a 4-byte length followed by the payload:
//!   1 info, 2 common, 3 page names, 4 chars, 5 kerning pairs

use bitflags::bitflags;
use makedds_common::{BinaryReader, FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::{Error, Result};

const MAGIC: &[u8; 3] = b"BMF";
const SUPPORTED_VERSION: u8 = 3;

const BLOCK_INFO: u8 = 1;
const BLOCK_COMMON: u8 = 2;
const BLOCK_PAGES: u8 = 3;
const BLOCK_CHARS: u8 = 4;
const BLOCK_KERNING: u8 = 5;

#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct BmFontHeader {
    pub magic: [u8; 3],
    pub version: u8,
}

#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct BlockHeader {
    pub id: u8,
    pub size: u32,
}

/// Fixed part of the info block; the NUL-terminated font name follows.
#[derive(Debug, Clone, Copy, Default, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct InfoBlock {
    /// Points; negative values request a matching cell height.
    pub font_size: i16,
    pub attributes: u8,
    pub char_set: u8,
    /// Percent; 100 means no stretch.
    pub stretch_h: u16,
    pub aa: u8,
    pub padding_top: u8,
    pub padding_right: u8,
    pub padding_bottom: u8,
    pub padding_left: u8,
    pub spacing_x: u8,
    pub spacing_y: u8,
    pub outline: u8,
}

impl InfoBlock {
    pub fn attributes(&self) -> FontAttributes {
        FontAttributes::from_bits_retain(self.attributes)
    }
}

#[derive(Debug, Clone, Copy, Default, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct CommonBlock {
    pub line_height: u16,
    pub base_line: u16,
    pub scale_width: u16,
    pub scale_height: u16,
    pub page_count: u16,
    pub attributes: u8,
    pub alpha_channel: u8,
    pub red_channel: u8,
    pub green_channel: u8,
    pub blue_channel: u8,
}

/// One glyph on a texture page.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct BmChar {
    pub codepoint: u32,
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
    pub offset_x: i16,
    pub offset_y: i16,
    pub advance_x: i16,
    pub page: u8,
    pub channel: u8,
}

impl BmChar {
    pub fn channels(&self) -> CharChannels {
        CharChannels::from_bits_retain(self.channel)
    }
}

#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct BmKerning {
    pub first: u32,
    pub second: u32,
    pub amount: i16,
}

bitflags! {
    /// `InfoBlock::attributes`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FontAttributes: u8 {
        const SMOOTH = 0x01;
        const UNICODE = 0x02;
        const ITALIC = 0x04;
        const BOLD = 0x08;
        const FIXED_HEIGHT = 0x10;
    }
}

bitflags! {
    /// Texture channels holding a glyph.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CharChannels: u8 {
        const BLUE = 0x1;
        const GREEN = 0x2;
        const RED = 0x4;
        const ALPHA = 0x8;
        const ALL = 0xF;
    }
}

/// A BMFont file viewed in place. Absent blocks leave their fields empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct BmFontDescription<'a> {
    pub version: u8,
    pub info: Option<InfoBlock>,
    pub font_name: Option<&'a str>,
    pub common: Option<CommonBlock>,
    pub num_pages: usize,
    /// Bytes per page name, including padding and the terminator.
    pub page_length: usize,
    pub pages: &'a [u8],
    pub chars: &'a [BmChar],
    pub kerning: &'a [BmKerning],
}

impl<'a> BmFontDescription<'a> {
    /// Texture page file names in page order.
    pub fn page_names(&self) -> impl Iterator<Item = &'a str> + 'a {
        let length = self.page_length;
        let pages = if length == 0 { &[][..] } else { self.pages };
        pages
            .chunks(length.max(1))
            .take(self.num_pages)
            .map(|page| nul_terminated(page).unwrap_or_default())
    }
}

fn nul_terminated(bytes: &[u8]) -> Option<&str> {
    let end = memchr::memchr(0, bytes).unwrap_or(bytes.len());
    std::str::from_utf8(&bytes[..end]).ok()
}

fn records<T: FromBytes + KnownLayout + Immutable>(payload: &[u8]) -> Result<&[T]> {
    let size = std::mem::size_of::<T>();
    let whole = payload.len() / size * size;
    <[T]>::ref_from_bytes(&payload[..whole]).map_err(|_| Error::Truncated {
        what: "record block",
        offset: 0,
    })
}

pub fn describe(data: &[u8]) -> Result<BmFontDescription<'_>> {
    let mut reader = BinaryReader::new(data);
    let header: BmFontHeader = reader.read_struct()?;
    if &header.magic != MAGIC {
        return Err(Error::InvalidSignature {
            container: "BMFont",
            actual: header.magic.to_vec(),
        });
    }
    if header.version != SUPPORTED_VERSION {
        return Err(Error::UnsupportedVersion(header.version));
    }

    let mut desc = BmFontDescription {
        version: header.version,
        ..BmFontDescription::default()
    };

    while !reader.is_empty() {
        let offset = reader.position();
        let block: BlockHeader = reader.read_struct()?;
        let size = block.size as usize;
        let mut block_reader = reader.sub_reader(size).map_err(|_| Error::Truncated {
            what: "BMFont block",
            offset,
        })?;
        let payload = block_reader.rest();

        match block.id {
            BLOCK_INFO => {
                desc.info = Some(block_reader.read_struct()?);
                desc.font_name = nul_terminated(block_reader.rest());
            }
            BLOCK_COMMON => {
                let common: CommonBlock = block_reader.read_struct()?;
                desc.num_pages = common.page_count as usize;
                desc.common = Some(common);
            }
            BLOCK_PAGES => {
                desc.pages = payload;
                desc.page_length = size.checked_div(desc.num_pages).unwrap_or(0);
            }
            BLOCK_CHARS => desc.chars = records(payload)?,
            BLOCK_KERNING => desc.kerning = records(payload)?,
            _ => {}
        }
    }

    Ok(desc)
}
