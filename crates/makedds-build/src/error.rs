//! Error types for DDS assembly.

use makedds_dds::DxgiFormat;
use thiserror::Error;

/// Errors that can occur while configuring or assembling a DDS file.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Common library error.
    #[error("{0}")]
    Common(#[from] makedds_common::Error),

    /// JSON configuration could not be parsed.
    #[error("{0}")]
    Json(#[from] makedds_json::Error),

    /// DDS codec error, including unknown format or alpha names.
    #[error("{0}")]
    Dds(#[from] makedds_dds::Error),

    /// Source image could not be decoded or resized.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// A configuration field has the wrong type or is not allowed.
    #[error("configuration error: {0}")]
    Config(String),

    #[error("no source images were given")]
    NoSources,

    #[error("cubemaps need a multiple of 6 source images, got {0}")]
    CubemapSourceCount(usize),

    /// Invalid combination of surface options.
    #[error("invalid surface: {0}")]
    InvalidSurface(&'static str),

    #[error("array size {array_size} does not match {sources} source images")]
    ArraySizeMismatch { array_size: u32, sources: usize },

    /// Pixel format the encoder cannot produce.
    #[error("cannot encode pixels as {0}")]
    UnsupportedFormat(DxgiFormat),
}

/// Result type for assembly operations.
pub type Result<T> = std::result::Result<T, Error>;
