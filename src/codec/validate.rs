//! Structural validation of profile text
//!
//! Failures are returned as a [`ValidationResult`], never as errors. Rules run
//! in a fixed order and the first failing rule decides the message.

use serde::{Deserialize, Serialize};

use super::sections::{parse_sections, SectionMap};
use super::value::parse_number;

/// Sections of which at least one must be present.
pub const EXPECTED_SECTIONS: [&str; 3] = ["general", "values", "metadata"];

const UNNAMED_PROFILE: &str = "Unnamed";

/// Summary of a profile that passed validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationMetadata {
    /// Section names in the order they appear
    pub sections: Vec<String>,
    /// Number of keys under `[values]`
    pub parameter_count: usize,
    pub profile_name: String,
}

/// Outcome of [`validate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ValidationMetadata>,
}

impl ValidationResult {
    pub fn valid(metadata: ValidationMetadata) -> Self {
        Self {
            is_valid: true,
            error: None,
            metadata: Some(metadata),
        }
    }

    pub fn invalid(error: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            error: Some(error.into()),
            metadata: None,
        }
    }
}

/// Validate profile text.
///
/// `None` stands for content the host could not supply as text.
pub fn validate(content: Option<&str>) -> ValidationResult {
    let Some(content) = content else {
        return ValidationResult::invalid("File content is empty or invalid");
    };

    if content.trim().is_empty() {
        return ValidationResult::invalid("File is empty");
    }

    check_structure(&parse_sections(content))
}

/// Validate raw file bytes. Bytes that are not UTF-8 fail to parse.
pub fn validate_bytes(bytes: &[u8]) -> ValidationResult {
    match std::str::from_utf8(bytes) {
        Ok(text) => validate(Some(text)),
        Err(e) => {
            log::warn!("Profile is not valid UTF-8: {}", e);
            ValidationResult::invalid(format!("Failed to parse file: {}", e))
        }
    }
}

fn check_structure(sections: &SectionMap) -> ValidationResult {
    if !EXPECTED_SECTIONS.iter().any(|name| sections.contains(name)) {
        return ValidationResult::invalid(format!(
            "No valid sections found. Expected at least one of: {}",
            EXPECTED_SECTIONS
                .iter()
                .map(|name| format!("[{}]", name))
                .collect::<Vec<_>>()
                .join(", ")
        ));
    }

    let general = sections.get("general");

    if let Some(version) = general.and_then(|g| g.get("version")) {
        if parse_number(version).is_none() {
            return ValidationResult::invalid(format!(
                "Invalid version in [general] section: \"{}\"",
                version
            ));
        }
    }

    let values = sections.get("values");
    if values.is_some_and(|v| v.is_empty()) {
        return ValidationResult::invalid("[values] section exists but contains no parameters");
    }

    ValidationResult::valid(ValidationMetadata {
        sections: sections.names().map(String::from).collect(),
        parameter_count: values.map_or(0, |v| v.len()),
        profile_name: general
            .and_then(|g| g.get_non_empty("name"))
            .unwrap_or(UNNAMED_PROFILE)
            .to_string(),
    })
}
