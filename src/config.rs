//! Codec configuration
//!
//! Every default the codec falls back to lives here. The stock values match
//! what Cura 5.x writes for a quality-changes profile; a JSON file can
//! override any subset of them.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ProfileError, Result};

/// Defaults applied while importing a profile into a layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImportSettings {
    /// Layer name when `[general] name` is missing
    pub default_layer_name: String,
    /// Value of the layer's `source` metadata
    pub source: String,
    /// Version recorded when `[general] version` is missing
    pub default_version: String,
    /// Printer definition recorded when `[general] definition` is missing
    pub default_definition: String,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            default_layer_name: "Imported Cura Profile".to_string(),
            source: "Ultimaker Cura".to_string(),
            default_version: "4".to_string(),
            default_definition: "fdmprinter".to_string(),
        }
    }
}

/// Fixed header values written on export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExportSettings {
    /// Profile name when the snapshot carries none
    pub default_profile_name: String,
    pub version: String,
    pub definition: String,
    /// `[metadata] type`
    pub profile_type: String,
    pub quality_type: String,
    pub setting_version: u32,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            default_profile_name: "LamiNode Export".to_string(),
            version: "4".to_string(),
            definition: "fdmprinter".to_string(),
            profile_type: "quality_changes".to_string(),
            quality_type: "normal".to_string(),
            setting_version: 22,
        }
    }
}

/// Complete codec configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CodecConfig {
    pub import: ImportSettings,
    pub export: ExportSettings,
}

impl CodecConfig {
    /// Parse a JSON configuration. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: CodecConfig = serde_json::from_str(json)?;
        config.check()?;
        Ok(config)
    }

    /// Load a JSON configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ProfileError::FileNotFound {
                path: path.to_path_buf(),
                source: None,
            });
        }
        let json = fs::read_to_string(path)?;
        log::debug!("Loaded codec config from {}", path.display());
        Self::from_json_str(&json)
    }

    /// Reject settings that would produce a malformed profile.
    pub fn check(&self) -> Result<()> {
        if self.export.setting_version == 0 {
            return Err(ProfileError::InvalidConfig {
                reason: "export.settingVersion must be greater than 0".to_string(),
            });
        }

        let header_fields = [
            ("export.version", &self.export.version),
            ("export.definition", &self.export.definition),
            ("export.profileType", &self.export.profile_type),
            ("export.qualityType", &self.export.quality_type),
            ("export.defaultProfileName", &self.export.default_profile_name),
        ];
        for (field, value) in header_fields {
            if value.trim().is_empty() {
                return Err(ProfileError::InvalidConfig {
                    reason: format!("{} must not be empty", field),
                });
            }
            if value.contains(|c: char| c == '\n' || c == '\r') {
                return Err(ProfileError::InvalidConfig {
                    reason: format!("{} must be a single line", field),
                });
            }
        }

        Ok(())
    }
}
