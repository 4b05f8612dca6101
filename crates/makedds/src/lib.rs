//! makedds - DDS texture assembly and game asset probing library.
//!
//! This crate provides a unified interface to the makedds library ecosystem.
//!
//! # Crates
//!
//! - [`makedds_common`] - Common utilities (binary reading, FourCC, base64, text loading)
//! - [`makedds_json`] - JSON document model with pluggable node pools
//! - [`makedds_dds`] - DDS headers, DXGI format tables and level description
//! - [`makedds_probe`] - WAV, TGA and BMFont container probes
//! - [`makedds_build`] - Building DDS files from source images
//!
//! # Example
//!
//! ```no_run
//! use makedds::prelude::*;
//!
//! let data = std::fs::read("albedo.dds")?;
//! let file = DdsFile::parse(&data)?;
//! for level in file.levels() {
//!     println!("{}x{} at {}", level.width, level.height, level.offset);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Re-export all sub-crates
pub use makedds_build as build;
pub use makedds_common as common;
pub use makedds_dds as dds;
pub use makedds_json as json;
pub use makedds_probe as probe;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use makedds_build::{build_dds, build_dds_with_progress, BuildConfig, SurfaceParams};
    pub use makedds_common::{base64, fourcc, load_binary, load_text, BinaryReader};
    pub use makedds_dds::{AlphaMode, DdsFile, DxgiFormat, LevelDesc};
    pub use makedds_json::{JsonDocument, JsonItem, JsonType};
    pub use makedds_probe::{sniff, ContainerKind};
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
