use thiserror::Error;

/// Failures shared by every makedds reader.
#[derive(Debug, Error)]
pub enum Error {
    #[error("need {needed} bytes at offset {offset}, {available} left")]
    UnexpectedEof {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("bad magic at offset {offset}: expected {expected:02X?}, found {found:02X?}")]
    InvalidMagic {
        offset: usize,
        expected: [u8; 4],
        found: [u8; 4],
    },

    #[error("seek to {offset} outside a {len}-byte buffer")]
    SeekOutOfRange { offset: usize, len: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
