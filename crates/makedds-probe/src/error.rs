//! Error types for container probes.

use thiserror::Error;

/// Errors that can occur when describing WAV, TGA or BMFont data.
#[derive(Debug, Error)]
pub enum Error {
    /// Common library error.
    #[error("{0}")]
    Common(#[from] makedds_common::Error),

    /// Buffer shorter than the container's fixed framing.
    #[error("{container} data too short: need {needed} bytes, have {available}")]
    TooShort {
        container: &'static str,
        needed: usize,
        available: usize,
    },

    /// Signature bytes did not match.
    #[error("invalid {container} signature: {actual:?}")]
    InvalidSignature {
        container: &'static str,
        actual: Vec<u8>,
    },

    /// A required RIFF chunk is absent.
    #[error("missing '{0}' chunk")]
    MissingChunk(&'static str),

    /// BMFont version other than 3.
    #[error("unsupported BMFont version {0}")]
    UnsupportedVersion(u8),

    /// A block or chunk extends past the end of the buffer.
    #[error("{what} at offset {offset} runs past the end of the data")]
    Truncated { what: &'static str, offset: usize },

    /// TGA image type or bit depth the decoders cannot handle.
    #[error("unsupported TGA image: type {image_type}, {bits} bits per pixel")]
    UnsupportedImage { image_type: u8, bits: u8 },

    /// Destination buffer smaller than the decoded image.
    #[error("destination buffer holds {available} bytes, image needs {needed}")]
    DestinationTooSmall { needed: usize, available: usize },
}

/// Result type for probe operations.
pub type Result<T> = std::result::Result<T, Error>;
