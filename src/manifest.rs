//! Bedrock resource pack manifest (`manifest.json`).
//!
//! # Example
//!
//! ```json
//! {
//!   "format_version": 2,
//!   "header": {
//!     "description": "https://discord.gg/hXRBsvksRX",
//!     "name": "sunset",
//!     "uuid": "0b4c6f0e-3c0a-4f8e-9d8a-5a0f1b6c2e11",
//!     "version": [1, 0, 0],
//!     "min_engine_version": [1, 16, 0]
//!   },
//!   "modules": [
//!     {
//!       "description": "Custom sky texture pack",
//!       "type": "resources",
//!       "uuid": "7f1d2a9c-8b3e-4c5d-a6f7-0e1d2c3b4a59",
//!       "version": [1, 0, 0]
//!     }
//!   ]
//! }
//! ```

use crate::config::ManifestConfig;
use crate::error::{PackError, Result};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Manifest schema version.
pub const FORMAT_VERSION: u32 = 2;

/// Module type for texture/resource packs.
pub const RESOURCES_MODULE_TYPE: &str = "resources";

/// Top-level manifest document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Always [`FORMAT_VERSION`].
    pub format_version: u32,
    /// Pack identity.
    pub header: ManifestHeader,
    /// Exactly one resources module.
    pub modules: Vec<ManifestModule>,
}

/// The `header` block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestHeader {
    /// Pack description.
    pub description: String,
    /// Pack display name.
    pub name: String,
    /// Pack UUID, fresh per build.
    pub uuid: String,
    /// Pack version.
    pub version: [u32; 3],
    /// Minimum engine version the pack targets.
    pub min_engine_version: [u32; 3],
}

/// An entry in `modules`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestModule {
    /// Module description.
    pub description: String,
    /// Module type, [`RESOURCES_MODULE_TYPE`] for texture packs.
    #[serde(rename = "type")]
    pub module_type: String,
    /// Module UUID, distinct from the header UUID.
    pub uuid: String,
    /// Module version.
    pub version: [u32; 3],
}

/// Generate a manifest with default constants.
///
/// Only `header.name` depends on input. The header and module each get their
/// own freshly generated v4 UUID.
pub fn generate_manifest(pack_display_name: &str) -> Manifest {
    generate_manifest_with(pack_display_name, &ManifestConfig::default())
}

/// Generate a manifest using the constants in `config`.
pub fn generate_manifest_with(pack_display_name: &str, config: &ManifestConfig) -> Manifest {
    Manifest {
        format_version: FORMAT_VERSION,
        header: ManifestHeader {
            description: config.header_description.clone(),
            name: pack_display_name.to_owned(),
            uuid: Uuid::new_v4().to_string(),
            version: config.version,
            min_engine_version: config.min_engine_version,
        },
        modules: vec![ManifestModule {
            description: config.module_description.clone(),
            module_type: RESOURCES_MODULE_TYPE.to_owned(),
            uuid: Uuid::new_v4().to_string(),
            version: config.version,
        }],
    }
}

impl Manifest {
    /// Serialize as 2-space indented JSON.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::Archive`] if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| PackError::Archive(format!("manifest serialization: {e}")))
    }

    /// Parse manifest JSON.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::Archive`] if the text is not a valid manifest.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| PackError::Archive(format!("invalid manifest: {e}")))
    }

    /// Check the structural invariants of a pack manifest.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::Archive`] describing the first violation found.
    pub fn validate(&self) -> Result<()> {
        if self.format_version != FORMAT_VERSION {
            return Err(PackError::Archive(format!(
                "unsupported format_version {}",
                self.format_version
            )));
        }
        let [module] = self.modules.as_slice() else {
            return Err(PackError::Archive(format!(
                "expected exactly one module, found {}",
                self.modules.len()
            )));
        };
        if module.module_type != RESOURCES_MODULE_TYPE {
            return Err(PackError::Archive(format!(
                "module type `{}` is not `{RESOURCES_MODULE_TYPE}`",
                module.module_type
            )));
        }
        let header_uuid = parse_v4(&self.header.uuid)?;
        let module_uuid = parse_v4(&module.uuid)?;
        if header_uuid == module_uuid {
            return Err(PackError::Archive(
                "header and module share the same uuid".to_owned(),
            ));
        }
        Ok(())
    }
}

fn parse_v4(text: &str) -> Result<Uuid> {
    let uuid =
        Uuid::parse_str(text).map_err(|e| PackError::Archive(format!("bad uuid `{text}`: {e}")))?;
    if uuid.get_version_num() != 4 {
        return Err(PackError::Archive(format!("uuid `{text}` is not version 4")));
    }
    Ok(uuid)
}
