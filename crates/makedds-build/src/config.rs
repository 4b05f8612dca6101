//! JSON build descriptions.
//!
//! ```json
//! {
//!     "Format": "R8G8B8A8_UNORM",
//!     "Cubemap": true,
//!     "Mipmaps": true,
//!     "SourceFiles": ["px.png", "nx.png", "py.png", "ny.png", "pz.png", "nz.png"]
//! }
//! ```
//!
//! Keys match case-insensitively. Unknown keys are reported as warnings,
//! except unknown keys holding arrays, which are errors.

use std::path::{Path, PathBuf};

use makedds_dds::{AlphaMode, DxgiFormat};
use makedds_json::{JsonDocument, JsonItem, JsonType, NodePool};

use crate::params::SurfaceParams;
use crate::{Error, Result};

/// Upper bound on `SourceFiles` entries; extra entries are dropped.
pub const MAX_SOURCE_FILES: usize = 1024;

/// Parameters and inputs read from a build description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildConfig {
    pub params: SurfaceParams,
    pub source_files: Vec<PathBuf>,
    /// Policy warnings raised while reading the description.
    pub warnings: Vec<String>,
}

impl BuildConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let doc = JsonDocument::load(path)?;
        Self::from_json(&doc)
    }

    pub fn from_json_bytes(text: Vec<u8>) -> Result<Self> {
        let doc = JsonDocument::parse(text)?;
        Self::from_json(&doc)
    }

    pub fn from_json<P: NodePool>(doc: &JsonDocument<P>) -> Result<Self> {
        let root = doc
            .root()
            .filter(|root| root.json_type() == JsonType::Object)
            .ok_or_else(|| Error::Config("top-level value must be an object".into()))?;

        let mut config = Self::default();
        for field in root.children() {
            let key = field.key().unwrap_or_default();
            config.apply_field(key, field)?;
        }
        Ok(config)
    }

    fn warn(&mut self, message: String) {
        log::warn!("{message}");
        self.warnings.push(message);
    }

    fn apply_field<P: NodePool>(&mut self, key: &str, value: JsonItem<'_, P>) -> Result<()> {
        let params = &mut self.params;
        match key.to_ascii_lowercase().as_str() {
            "width" => params.width = integer(key, value)?,
            "height" => params.height = integer(key, value)?,
            "maxmiplevels" => params.max_mip_levels = integer(key, value)?,
            "arraysize" => params.array_size = integer(key, value)?,
            "format" => params.format = DxgiFormat::from_name(string(key, value)?)?,
            "alphamode" => params.alpha_mode = AlphaMode::from_name(string(key, value)?)?,
            "cubemap" => params.cubemap = boolean(key, value)?,
            "mipmaps" => params.mipmaps = boolean(key, value)?,
            "volume" => params.volume = boolean(key, value)?,
            "forcepow2" => params.force_pow2 = boolean(key, value)?,
            "sourcefiles" => self.read_source_files(value)?,
            _ if value.json_type() == JsonType::Array => {
                return Err(Error::Config(format!("unexpected array field '{key}'")));
            }
            _ => self.warn(format!("ignoring unexpected field '{key}'")),
        }
        Ok(())
    }

    fn read_source_files<P: NodePool>(&mut self, value: JsonItem<'_, P>) -> Result<()> {
        match value.json_type() {
            JsonType::Array => {}
            JsonType::Null => return Err(Error::Config("SourceFiles cannot be null".into())),
            other => {
                return Err(Error::Config(format!(
                    "SourceFiles must be an array, found {}",
                    other.name()
                )))
            }
        }

        let mut dropped = 0usize;
        for (index, element) in value.children().enumerate() {
            let Some(path) = element.as_str() else {
                self.warn(format!(
                    "skipping SourceFiles[{index}]: expected a string, found {}",
                    element.json_type().name()
                ));
                continue;
            };
            if self.source_files.len() >= MAX_SOURCE_FILES {
                dropped += 1;
                continue;
            }
            self.source_files.push(PathBuf::from(path));
        }

        if dropped > 0 {
            self.warn(format!(
                "dropping {dropped} source files beyond the limit of {MAX_SOURCE_FILES}"
            ));
        }
        Ok(())
    }
}

fn integer<P: NodePool>(key: &str, value: JsonItem<'_, P>) -> Result<u32> {
    value
        .as_i64()
        .and_then(|v| u32::try_from(v).ok())
        .ok_or_else(|| Error::Config(format!("{key} must be a non-negative integer")))
}

fn string<'a, P: NodePool>(key: &str, value: JsonItem<'a, P>) -> Result<&'a str> {
    value
        .as_str()
        .ok_or_else(|| Error::Config(format!("{key} must be a string")))
}

fn boolean<P: NodePool>(key: &str, value: JsonItem<'_, P>) -> Result<bool> {
    value
        .as_bool()
        .ok_or_else(|| Error::Config(format!("{key} must be true or false")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_full_description() {
        let config = BuildConfig::from_json_bytes(
            br#"{
                "Width": 256, "height": 128, "MaxMipLevels": 4, "ArraySize": 2,
                "Format": "DXGI_FORMAT_B8G8R8A8_UNORM", "AlphaMode": "premultiplied",
                "Cubemap": false, "Mipmaps": true, "Volume": false, "ForcePow2": true,
                "SourceFiles": ["a.png", "b.png"]
            }"#
            .to_vec(),
        )
        .unwrap();

        let params = &config.params;
        assert_eq!((params.width, params.height), (256, 128));
        assert_eq!(params.max_mip_levels, 4);
        assert_eq!(params.array_size, 2);
        assert_eq!(params.format, DxgiFormat::B8G8R8A8Unorm);
        assert_eq!(params.alpha_mode, AlphaMode::Premultiplied);
        assert!(params.mipmaps && params.force_pow2 && !params.cubemap && !params.volume);
        assert_eq!(config.source_files, [PathBuf::from("a.png"), PathBuf::from("b.png")]);
        assert!(config.warnings.is_empty());
    }

    #[test]
    fn test_unknown_fields() {
        let config = BuildConfig::from_json_bytes(br#"{"Comment": "hi", "Width": 8}"#.to_vec()).unwrap();
        assert_eq!(config.warnings.len(), 1);
        assert_eq!(config.params.width, 8);

        let err = BuildConfig::from_json_bytes(br#"{"Extra": [1, 2]}"#.to_vec()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_source_files_policy() {
        let err = BuildConfig::from_json_bytes(br#"{"SourceFiles": null}"#.to_vec()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let config = BuildConfig::from_json_bytes(br#"{"SourceFiles": ["a.png", 3, "b.png"]}"#.to_vec()).unwrap();
        assert_eq!(config.source_files.len(), 2);
        assert_eq!(config.warnings.len(), 1);
    }

    #[test]
    fn test_source_file_limit() {
        let names: Vec<String> = (0..MAX_SOURCE_FILES + 3).map(|i| format!("\"{i}.png\"")).collect();
        let text = format!("{{\"SourceFiles\": [{}]}}", names.join(","));

        let config = BuildConfig::from_json_bytes(text.into_bytes()).unwrap();
        assert_eq!(config.source_files.len(), MAX_SOURCE_FILES);
        assert_eq!(config.warnings.len(), 1);
    }

    #[test]
    fn test_wrong_types_are_errors() {
        for text in [
            r#"{"Width": "wide"}"#,
            r#"{"Width": -1}"#,
            r#"{"Mipmaps": 1}"#,
            r#"{"Format": 28}"#,
            r#"{"SourceFiles": "a.png"}"#,
            r#"[1]"#,
        ] {
            assert!(
                matches!(BuildConfig::from_json_bytes(text.as_bytes().to_vec()), Err(Error::Config(_))),
                "{text}"
            );
        }
        assert!(matches!(
            BuildConfig::from_json_bytes(br#"{"Format": "R9"}"#.to_vec()),
            Err(Error::Dds(_))
        ));
        assert!(matches!(
            BuildConfig::from_json_bytes(br#"{"Width": }"#.to_vec()),
            Err(Error::Json(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"\xEF\xBB\xBF{\"Volume\": true, \"SourceFiles\": [\"s0.png\"]}").unwrap();

        let config = BuildConfig::load(file.path()).unwrap();
        assert!(config.params.volume);
        assert_eq!(config.source_files.len(), 1);
    }
}
