//! Alpha modes stored in the DX10 header's second flags word.

use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// How the alpha channel of a surface should be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u32)]
pub enum AlphaMode {
    #[default]
    Unknown = 0,
    Straight = 1,
    Premultiplied = 2,
    Opaque = 3,
    Custom = 4,
}

const ALPHA_MODES: [(AlphaMode, &str); 5] = [
    (AlphaMode::Unknown, "UNKNOWN"),
    (AlphaMode::Straight, "STRAIGHT"),
    (AlphaMode::Premultiplied, "PREMULTIPLIED"),
    (AlphaMode::Opaque, "OPAQUE"),
    (AlphaMode::Custom, "CUSTOM"),
];

const NAME_PREFIX: &str = "DDS_ALPHA_MODE_";

impl AlphaMode {
    pub fn from_code(code: u32) -> Option<Self> {
        ALPHA_MODES.get(code as usize).map(|&(mode, _)| mode)
    }

    /// Look up a mode by name, ignoring case and an optional `DDS_ALPHA_MODE_` prefix.
    pub fn from_name(name: &str) -> Result<Self> {
        let trimmed = name.trim();
        let bare = match trimmed.get(..NAME_PREFIX.len()) {
            Some(prefix) if prefix.eq_ignore_ascii_case(NAME_PREFIX) => &trimmed[NAME_PREFIX.len()..],
            _ => trimmed,
        };
        ALPHA_MODES
            .iter()
            .find(|(_, candidate)| candidate.eq_ignore_ascii_case(bare))
            .map(|&(mode, _)| mode)
            .ok_or_else(|| Error::UnknownAlphaMode(name.to_string()))
    }

    #[inline]
    pub const fn code(self) -> u32 {
        self as u32
    }

    pub const fn name(self) -> &'static str {
        ALPHA_MODES[self as usize].1
    }
}

impl fmt::Display for AlphaMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AlphaMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s)
    }
}
