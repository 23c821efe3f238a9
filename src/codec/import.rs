//! Profile import into host layer records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::sections::{parse_sections, Section};
use super::value::{coerce_value, CoercedValue};
use crate::clock::Clock;
use crate::config::ImportSettings;
use crate::error::{ProfileError, Result};

/// A single imported setting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub value: CoercedValue,
}

impl Parameter {
    pub fn new(name: impl Into<String>, value: CoercedValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Provenance recorded on an imported layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerMetadata {
    pub source: String,
    pub import_date: DateTime<Utc>,
    pub original_version: String,
    pub definition: String,
}

/// The host's view of one imported profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerRecord {
    pub layer_name: String,
    /// Settings in the order they appear under `[values]`
    pub parameters: Vec<Parameter>,
    pub description: String,
    pub metadata: LayerMetadata,
}

impl LayerRecord {
    /// Find a parameter by name
    pub fn parameter(&self, name: &str) -> Option<&CoercedValue> {
        self.parameters
            .iter()
            .find(|p| p.name == name)
            .map(|p| &p.value)
    }
}

fn header_or<'a>(general: Option<&'a Section>, key: &str, default: &'a str) -> &'a str {
    general
        .and_then(|g| g.get_non_empty(key))
        .unwrap_or(default)
}

/// Import profile text as a layer.
///
/// Does not validate; run [`validate`](super::validate) first when the
/// content comes from an untrusted source. Values that are empty after
/// trimming are dropped.
pub fn import_layer(
    content: Option<&str>,
    settings: &ImportSettings,
    clock: &dyn Clock,
) -> Result<LayerRecord> {
    let content = content.ok_or(ProfileError::MissingFileContent)?;
    let sections = parse_sections(content);
    let general = sections.get("general");

    let layer_name = header_or(general, "name", &settings.default_layer_name).to_string();

    let parameters: Vec<Parameter> = sections
        .get("values")
        .map(|values| {
            values
                .iter()
                .filter(|(_, raw)| !raw.trim().is_empty())
                .map(|(name, raw)| Parameter::new(name, coerce_value(raw)))
                .collect()
        })
        .unwrap_or_default();

    log::debug!(
        "Imported layer '{}' with {} parameter(s)",
        layer_name,
        parameters.len()
    );

    Ok(LayerRecord {
        description: format!("Imported from Cura profile: {}", layer_name),
        metadata: LayerMetadata {
            source: settings.source.clone(),
            import_date: clock.now(),
            original_version: header_or(general, "version", &settings.default_version)
                .to_string(),
            definition: header_or(general, "definition", &settings.default_definition)
                .to_string(),
        },
        layer_name,
        parameters,
    })
}
