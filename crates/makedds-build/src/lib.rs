//! Assemble DDS files from source images.
//!
//! A build combines [`SurfaceParams`] (from the command line or a JSON
//! [`BuildConfig`]) with a list of source images. Depending on the options
//! the sources become a single texture, a texture array, one or more
//! cubemaps (six faces each) or the slices of a volume texture.
//!
//! # Example
//!
//! ```no_run
//! use std::path::{Path, PathBuf};
//! use makedds_build::{build_dds, SurfaceParams};
//!
//! let params = SurfaceParams {
//!     mipmaps: true,
//!     ..SurfaceParams::default()
//! };
//! let summary = build_dds(params, &[PathBuf::from("albedo.png")], Path::new("albedo.dds"))?;
//! println!("{} levels", summary.layout.levels);
//! # Ok::<(), makedds_build::Error>(())
//! ```

mod assemble;
mod config;
mod error;
mod params;
mod source;

pub use assemble::{build_dds, build_dds_with_progress, Assembler, BuildSummary};
pub use config::{BuildConfig, MAX_SOURCE_FILES};
pub use error::{Error, Result};
pub use params::SurfaceParams;
pub use source::{is_encodable, DecodedImage};
