//! Read-only probes for WAV, TGA and BMFont containers.
//!
//! Each probe validates framing, then returns a description that borrows
//! from the input buffer. Nothing is copied except fixed-size headers.
//!
//! # Example
//!
//! ```no_run
//! use makedds_probe::{sniff, tga, ContainerKind};
//!
//! let data = std::fs::read("glyphs.tga")?;
//! if sniff(&data, Some("tga")) == Some(ContainerKind::Tga) {
//!     let desc = tga::describe(&data)?;
//!     let mut rgba = vec![0u8; desc.pixel_data_size];
//!     tga::decode_rgba32(&desc, &mut rgba)?;
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;

pub mod bmfont;
pub mod tga;
pub mod wav;

pub use error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    Wav,
    Tga,
    BmFont,
}

impl ContainerKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Wav => "WAV",
            Self::Tga => "TGA",
            Self::BmFont => "BMFont",
        }
    }
}

/// Guess the container from its signature, falling back to the file extension.
///
/// TGA files without a 2.0 footer carry no signature and are only
/// recognised by extension.
pub fn sniff(data: &[u8], extension: Option<&str>) -> Option<ContainerKind> {
    if data.len() >= 12 && &data[..4] == b"RIFF" && &data[8..12] == b"WAVE" {
        return Some(ContainerKind::Wav);
    }
    if data.starts_with(b"BMF") {
        return Some(ContainerKind::BmFont);
    }
    if tga::footer(data).is_ok() {
        return Some(ContainerKind::Tga);
    }
    match extension {
        Some(ext) if ext.eq_ignore_ascii_case("wav") => Some(ContainerKind::Wav),
        Some(ext) if ext.eq_ignore_ascii_case("tga") => Some(ContainerKind::Tga),
        Some(ext) if ext.eq_ignore_ascii_case("fnt") => Some(ContainerKind::BmFont),
        _ => None,
    }
}
