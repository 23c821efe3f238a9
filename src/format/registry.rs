//! Profile format registry
//!
//! Maps format ids to their handlers.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use super::{CuraProfileFormat, FormatInfo, ProfileFormat};
use crate::error::{ProfileError, Result};

/// Registry of available profile formats
pub struct FormatRegistry {
    formats: HashMap<String, Arc<dyn ProfileFormat>>,
}

impl FormatRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            formats: HashMap::new(),
        }
    }

    /// Create registry with all built-in formats
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(CuraProfileFormat::new()));
        registry
    }

    /// Register a format, replacing any format with the same id
    pub fn register(&mut self, format: Arc<dyn ProfileFormat>) {
        let id = format.info().id.clone();
        if self.formats.insert(id.clone(), format).is_some() {
            log::debug!("Replaced profile format '{}'", id);
        }
    }

    /// Get a format by ID
    pub fn get(&self, id: &str) -> Result<Arc<dyn ProfileFormat>> {
        self.formats
            .get(id)
            .cloned()
            .ok_or_else(|| ProfileError::UnknownFormat { id: id.to_string() })
    }

    /// Find the format that claims a file by its extension
    pub fn find_for_path(&self, path: &Path) -> Result<Arc<dyn ProfileFormat>> {
        self.formats
            .values()
            .find(|format| format.handles_path(path))
            .cloned()
            .ok_or_else(|| ProfileError::UnsupportedFile {
                path: path.to_path_buf(),
            })
    }

    /// List all registered format IDs, sorted
    pub fn list_formats(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.formats.keys().map(|s| s.as_str()).collect();
        ids.sort_unstable();
        ids
    }

    /// List all format info, sorted by id
    pub fn list_format_info(&self) -> Vec<&FormatInfo> {
        let mut infos: Vec<&FormatInfo> = self.formats.values().map(|f| f.info()).collect();
        infos.sort_by(|a, b| a.id.cmp(&b.id));
        infos
    }

    /// Check if a format is registered
    pub fn has_format(&self, id: &str) -> bool {
        self.formats.contains_key(id)
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
