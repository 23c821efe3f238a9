//! CLI Command Implementations
//!
//! Each command reads its input from disk, runs the codec and prints the
//! outcome. The return values let callers and tests inspect the result.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use log::{info, warn};

use crate::codec::{
    parse_sections, ExportResult, LayerRecord, ProfileSnapshot, SectionMap, ValidationResult,
};
use crate::config::CodecConfig;
use crate::error::{ProfileError, Result};
use crate::format::{CuraProfileFormat, FormatRegistry, ProfileFormat};

/// Build the registry, applying an optional config file to the built-in formats.
pub fn build_registry(config_path: Option<&Path>) -> Result<FormatRegistry> {
    let mut registry = FormatRegistry::with_defaults();
    if let Some(path) = config_path {
        let config = CodecConfig::load(path)?;
        registry.register(Arc::new(CuraProfileFormat::with_config(config)));
    }
    Ok(registry)
}

fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ProfileError::FileNotFound {
            path: path.to_path_buf(),
            source: Some(e),
        },
        _ => ProfileError::Io(e),
    })
}

fn read_text(path: &Path) -> Result<String> {
    let bytes = read_bytes(path)?;
    String::from_utf8(bytes).map_err(|e| {
        ProfileError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })
}

fn check_extension(format: &dyn ProfileFormat, path: &Path) {
    if !format.handles_path(path) {
        warn!(
            "{} does not have a {} extension ({})",
            path.display(),
            format.info().name,
            format.info().extensions.join(", ")
        );
    }
}

/// Print the parsed sections of a profile.
pub fn parse_file(path: &Path) -> Result<SectionMap> {
    info!("Parsing profile: {}", path.display());

    let sections = parse_sections(&read_text(path)?);
    println!("{}", serde_json::to_string_pretty(&sections)?);

    Ok(sections)
}

/// Validate a profile file.
pub fn validate_file(format: &dyn ProfileFormat, path: &Path) -> Result<ValidationResult> {
    info!("Validating profile: {}", path.display());
    check_extension(format, path);

    let result = format.validate_bytes(&read_bytes(path)?);

    match (&result.error, &result.metadata) {
        (Some(error), _) => println!("Invalid: {}", error),
        (None, Some(metadata)) => {
            println!("Valid profile: {}", metadata.profile_name);
            println!("Sections: {}", metadata.sections.join(", "));
            println!("Parameters: {}", metadata.parameter_count);
        }
        (None, None) => println!("Valid"),
    }

    Ok(result)
}

/// Import a profile file and print the layer as JSON.
pub fn import_file(format: &dyn ProfileFormat, path: &Path, compact: bool) -> Result<LayerRecord> {
    info!("Importing profile: {}", path.display());
    check_extension(format, path);

    let content = read_text(path)?;
    let validation = format.validate(Some(content.as_str()));
    if let Some(error) = &validation.error {
        warn!("Importing a profile that failed validation: {}", error);
    }

    let layer = format.import_layer(Some(content.as_str()))?;
    let json = if compact {
        serde_json::to_string(&layer)?
    } else {
        serde_json::to_string_pretty(&layer)?
    };
    println!("{}", json);

    Ok(layer)
}

/// Export a JSON snapshot file as profile text.
pub fn export_snapshot(
    format: &dyn ProfileFormat,
    snapshot_path: &Path,
    output: Option<&Path>,
) -> Result<ExportResult> {
    info!("Exporting snapshot: {}", snapshot_path.display());

    let value: serde_json::Value = serde_json::from_str(&read_text(snapshot_path)?)?;
    let snapshot = ProfileSnapshot::from_json(&value)?;
    let result = format.export_profile(Some(&snapshot))?;

    match output {
        Some(path) => {
            check_extension(format, path);
            fs::write(path, &result.file_content)?;
            println!("Profile written: {}", path.display());
        }
        None => print!("{}", result.file_content),
    }

    Ok(result)
}

/// Print the registered formats.
pub fn list_formats(registry: &FormatRegistry) {
    println!("Available formats:");
    println!("{:-<60}", "");
    for info in registry.list_format_info() {
        println!(
            "{:<10} {} {} ({})",
            info.id,
            info.name,
            info.application_version,
            info.extensions.join(", ")
        );
    }
}
