//! Profile export from host snapshots

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::value::{format_value, CoercedValue};
use crate::config::ExportSettings;
use crate::error::{ProfileError, Result};

/// The host's in-memory profile being exported.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSnapshot {
    /// Host schema identifier. Cura profiles do not record it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_name: Option<String>,
    /// Overridden settings; `None` marks a setting without a value.
    #[serde(default)]
    pub modified_params: BTreeMap<String, Option<CoercedValue>>,
}

impl ProfileSnapshot {
    pub fn new(profile_name: impl Into<String>) -> Self {
        Self {
            profile_name: Some(profile_name.into()),
            ..Self::default()
        }
    }

    /// Builder-style helper for setting a parameter
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<CoercedValue>) -> Self {
        self.modified_params.insert(name.into(), Some(value.into()));
        self
    }

    /// Build a snapshot from loosely typed host JSON.
    ///
    /// The value must be an object. Unexpected field types are ignored with a
    /// warning rather than rejected.
    pub fn from_json(value: &Value) -> Result<Self> {
        let object = value.as_object().ok_or(ProfileError::InvalidSnapshot)?;

        let text_field = |field: &str| match object.get(field) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => {
                log::warn!("Ignoring non-string snapshot field '{}': {}", field, other);
                None
            }
        };

        let modified_params = match object.get("modifiedParams") {
            None | Some(Value::Null) => BTreeMap::new(),
            Some(Value::Object(params)) => params
                .iter()
                .map(|(name, value)| (name.clone(), CoercedValue::from_json(value)))
                .collect(),
            Some(other) => {
                log::warn!("Ignoring modifiedParams that is not an object: {}", other);
                BTreeMap::new()
            }
        };

        Ok(Self {
            schema_id: text_field("schemaId"),
            profile_name: text_field("profileName"),
            modified_params,
        })
    }
}

/// Generated profile text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportResult {
    pub file_content: String,
}

/// Export a snapshot as Cura profile text.
///
/// Headers are fixed by `settings`; parameters are written sorted by name
/// and settings without a value are left out. The text ends with a newline.
pub fn export_profile(
    snapshot: Option<&ProfileSnapshot>,
    settings: &ExportSettings,
) -> Result<ExportResult> {
    let snapshot = snapshot.ok_or(ProfileError::InvalidSnapshot)?;

    let profile_name = single_line(
        "profile name",
        snapshot
            .profile_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(settings.default_profile_name.as_str()),
    );

    let mut lines = vec![
        "[general]".to_string(),
        format!("version = {}", settings.version),
        format!("name = {}", profile_name),
        format!("definition = {}", settings.definition),
        String::new(),
        "[metadata]".to_string(),
        format!("type = {}", settings.profile_type),
        format!("quality_type = {}", settings.quality_type),
        format!("setting_version = {}", settings.setting_version),
        String::new(),
        "[values]".to_string(),
    ];

    // BTreeMap iterates in byte order, which for UTF-8 is code point order
    let mut written = 0usize;
    for (name, value) in &snapshot.modified_params {
        if let Some(value) = value {
            lines.push(format!(
                "{} = {}",
                single_line("parameter name", name),
                single_line(name, &format_value(value))
            ));
            written += 1;
        }
    }
    lines.push(String::new());

    log::debug!(
        "Exported profile '{}' with {} parameter(s), {} without value",
        profile_name,
        written,
        snapshot.modified_params.len() - written
    );

    Ok(ExportResult {
        file_content: lines.join("\n"),
    })
}

/// Fold line breaks into spaces so a field stays on its own line.
fn single_line(field: &str, text: &str) -> String {
    if !text.contains(|c: char| c == '\n' || c == '\r') {
        return text.to_string();
    }
    log::warn!("Replacing line breaks in '{}' with spaces on export", field);
    text.replace("\r\n", " ").replace(['\r', '\n'], " ")
}
