//! Configuration types for conversion and packaging.

use crate::extract::ResizeFilter;
use crate::package::PackMode;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SkypackConfig {
    /// Face extraction settings.
    pub extract: ExtractConfig,
    /// Pack layout and output settings.
    pub pack: PackConfig,
    /// Manifest constants.
    pub manifest: ManifestConfig,
}

/// Face extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Resampling filter used to stretch each source region into a face.
    pub filter: ResizeFilter,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            filter: ResizeFilter::Triangle,
        }
    }
}

/// Pack layout configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PackConfig {
    /// Layout used when the CLI is not given `--mode`.
    pub default_mode: PackMode,
    /// Directory packs are written to (None = platform downloads directory).
    pub output_dir: Option<PathBuf>,
}

impl Default for PackConfig {
    fn default() -> Self {
        Self {
            default_mode: PackMode::Cubemap,
            output_dir: None,
        }
    }
}

impl PackConfig {
    /// Resolve the output directory, falling back to [`crate::skypack_dirs::output_dir`].
    pub fn resolved_output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(crate::skypack_dirs::output_dir)
    }
}

/// Fixed manifest fields.
///
/// `header.name` and both UUIDs are filled in per build; everything here is
/// copied into every manifest verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManifestConfig {
    /// `header.description`.
    pub header_description: String,
    /// `modules[0].description`.
    pub module_description: String,
    /// Pack version, used for both `header.version` and `modules[0].version`.
    pub version: [u32; 3],
    /// `header.min_engine_version`.
    pub min_engine_version: [u32; 3],
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            header_description: "https://discord.gg/hXRBsvksRX".to_owned(),
            module_description: "Custom sky texture pack".to_owned(),
            version: [1, 0, 0],
            min_engine_version: [1, 16, 0],
        }
    }
}

impl SkypackConfig {
    /// Load configuration from a TOML file, falling back to defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| crate::error::PackError::Config(e.to_string()))
    }

    /// Load the config at [`Self::default_config_path`] if it exists, otherwise defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_or_default() -> crate::error::Result<Self> {
        let path = Self::default_config_path();
        if path.is_file() {
            Self::from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &std::path::Path) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::PackError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the default config file path: `<config dir>/skypack/config.toml`.
    pub fn default_config_path() -> PathBuf {
        crate::skypack_dirs::config_file()
    }
}
