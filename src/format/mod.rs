//! Host-facing profile format interface
//!
//! The host application talks to every slicer format through
//! [`ProfileFormat`]. Formats are looked up in a [`FormatRegistry`].

mod cura;
mod registry;

pub use cura::CuraProfileFormat;
pub use registry::FormatRegistry;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::codec::{self, ExportResult, LayerRecord, ProfileSnapshot, ValidationResult};
use crate::error::Result;

/// Description of a profile format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatInfo {
    /// Format identifier (e.g., "cura")
    pub id: String,

    /// Human-readable name
    pub name: String,

    pub description: String,

    /// Slicer release the format was written against
    pub application_version: String,

    /// File extensions including the leading dot
    pub extensions: Vec<String>,
}

/// Operations the host requires from every profile format.
pub trait ProfileFormat: Send + Sync {
    /// Format metadata
    fn info(&self) -> &FormatInfo;

    /// Check profile text without importing it
    fn validate(&self, content: Option<&str>) -> ValidationResult;

    /// Check raw file bytes; content that is not UTF-8 fails to parse
    fn validate_bytes(&self, bytes: &[u8]) -> ValidationResult {
        match std::str::from_utf8(bytes) {
            Ok(text) => self.validate(Some(text)),
            Err(_) => codec::validate_bytes(bytes),
        }
    }

    /// Import profile text as a layer
    fn import_layer(&self, content: Option<&str>) -> Result<LayerRecord>;

    /// Import profile text as a full profile.
    ///
    /// Formats that only support layer import return `None`.
    fn import_profile(&self, content: Option<&str>) -> Option<ProfileSnapshot>;

    /// Export a snapshot as file content
    fn export_profile(&self, snapshot: Option<&ProfileSnapshot>) -> Result<ExportResult>;

    /// Whether this format claims the file at `path`, judged by extension
    fn handles_path(&self, path: &Path) -> bool {
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        let file_name = file_name.to_lowercase();
        self.info()
            .extensions
            .iter()
            .any(|ext| file_name.ends_with(&ext.to_lowercase()))
    }
}
