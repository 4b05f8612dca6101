use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] makedds_common::Error),

    #[error("not a DDS file (magic {0:02X?})")]
    InvalidMagic([u8; 4]),

    #[error("malformed DDS header: {0}")]
    InvalidHeader(String),

    /// A name that matches no entry of the DXGI format table.
    #[error("unknown DXGI format '{0}'")]
    UnknownFormatName(String),

    #[error("unknown alpha mode '{0}'")]
    UnknownAlphaMode(String),
}

pub type Result<T> = std::result::Result<T, Error>;
