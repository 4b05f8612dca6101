//! Whole-file loading and byte-order-mark handling.
//!
//! Text content is never transcoded. The BOM is detected, stripped and
//! reported so the caller can decide how to interpret the remaining bytes.

use std::fs;
use std::path::Path;

use crate::Result;

/// Text encoding as indicated by a byte-order mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextEncoding {
    /// No recognised BOM.
    #[default]
    Unsure,
    Ascii,
    Utf8,
    Utf16Be,
    Utf16Le,
    Utf32Be,
    Utf32Le,
}

impl TextEncoding {
    /// Human-readable name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Unsure => "unknown",
            Self::Ascii => "ASCII",
            Self::Utf8 => "UTF-8",
            Self::Utf16Be => "UTF-16 BE",
            Self::Utf16Le => "UTF-16 LE",
            Self::Utf32Be => "UTF-32 BE",
            Self::Utf32Le => "UTF-32 LE",
        }
    }
}

/// The byte-order mark written for `encoding`. Empty for encodings without one.
pub const fn bom(encoding: TextEncoding) -> &'static [u8] {
    match encoding {
        TextEncoding::Utf8 => &[0xEF, 0xBB, 0xBF],
        TextEncoding::Utf16Be => &[0xFE, 0xFF],
        TextEncoding::Utf16Le => &[0xFF, 0xFE],
        TextEncoding::Utf32Be => &[0x00, 0x00, 0xFE, 0xFF],
        TextEncoding::Utf32Le => &[0xFF, 0xFE, 0x00, 0x00],
        TextEncoding::Unsure | TextEncoding::Ascii => &[],
    }
}

/// Detect a BOM in the first (up to) four bytes of `bytes`.
///
/// Returns the encoding and the BOM length in bytes.
pub fn detect_encoding(bytes: &[u8]) -> (TextEncoding, usize) {
    match bytes {
        [0x00, 0x00, 0xFE, 0xFF, ..] => (TextEncoding::Utf32Be, 4),
        [0xFF, 0xFE, 0x00, 0x00, ..] => (TextEncoding::Utf32Le, 4),
        [0xFF, 0xFE, ..] => (TextEncoding::Utf16Le, 2),
        [0xFE, 0xFF, ..] => (TextEncoding::Utf16Be, 2),
        [0xEF, 0xBB, 0xBF, ..] => (TextEncoding::Utf8, 3),
        _ => (TextEncoding::Unsure, 0),
    }
}

/// Text content with its BOM removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    bytes: Vec<u8>,
    encoding: TextEncoding,
}

impl TextBuffer {
    /// Content bytes, excluding the BOM and the terminator.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Encoding reported by the stripped BOM.
    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    /// Consume the buffer, returning the content followed by a single NUL byte.
    pub fn into_bytes(self) -> Vec<u8> {
        let mut bytes = self.bytes;
        bytes.push(0);
        bytes
    }
}

/// Strip the BOM from raw file content.
pub fn decode_text(mut raw: Vec<u8>) -> TextBuffer {
    let (encoding, bom_len) = detect_encoding(&raw);
    raw.drain(..bom_len);
    TextBuffer {
        bytes: raw,
        encoding,
    }
}

/// Load a text file, stripping any BOM.
pub fn load_text(path: impl AsRef<Path>) -> Result<TextBuffer> {
    Ok(decode_text(fs::read(path)?))
}

/// Load a file as raw bytes.
pub fn load_binary(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    Ok(fs::read(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_detect_encoding_precedence() {
        assert_eq!(detect_encoding(&[0xFF, 0xFE, 0x00, 0x00]), (TextEncoding::Utf32Le, 4));
        assert_eq!(detect_encoding(&[0xFF, 0xFE, 0x41, 0x00]), (TextEncoding::Utf16Le, 2));
        assert_eq!(detect_encoding(&[0x00, 0x00, 0xFE, 0xFF]), (TextEncoding::Utf32Be, 4));
        assert_eq!(detect_encoding(&[0xFE, 0xFF]), (TextEncoding::Utf16Be, 2));
        assert_eq!(detect_encoding(b"\xEF\xBB\xBF{}"), (TextEncoding::Utf8, 3));
        assert_eq!(detect_encoding(b"{}"), (TextEncoding::Unsure, 0));
        assert_eq!(detect_encoding(&[]), (TextEncoding::Unsure, 0));
    }

    #[test]
    fn test_bom_matches_detection() {
        for encoding in [
            TextEncoding::Utf8,
            TextEncoding::Utf16Be,
            TextEncoding::Utf16Le,
            TextEncoding::Utf32Be,
            TextEncoding::Utf32Le,
        ] {
            let mut bytes = bom(encoding).to_vec();
            bytes.extend_from_slice(b"xx");
            assert_eq!(detect_encoding(&bytes), (encoding, bom(encoding).len()));
        }
        assert!(bom(TextEncoding::Unsure).is_empty());
    }

    #[test]
    fn test_load_text_strips_bom() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"\xEF\xBB\xBF{\"Width\": 4}").unwrap();

        let text = load_text(file.path()).unwrap();
        assert_eq!(text.encoding(), TextEncoding::Utf8);
        assert_eq!(text.as_bytes(), b"{\"Width\": 4}");

        let bytes = text.into_bytes();
        assert_eq!(bytes.last(), Some(&0));
        assert_eq!(bytes.len(), 13);
    }

    #[test]
    fn test_load_empty_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let text = load_text(file.path()).unwrap();
        assert!(text.is_empty());
        assert_eq!(text.encoding(), TextEncoding::Unsure);
        assert_eq!(text.into_bytes(), vec![0]);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_binary(dir.path().join("missing.bin")).is_err());
    }
}
