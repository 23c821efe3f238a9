//! Ultimaker Cura `.curaprofile` format

use std::sync::Arc;

use super::{FormatInfo, ProfileFormat};
use crate::clock::{Clock, SystemClock};
use crate::codec::{self, ExportResult, LayerRecord, ProfileSnapshot, ValidationResult};
use crate::config::CodecConfig;
use crate::error::Result;

/// Cura quality-changes profiles.
pub struct CuraProfileFormat {
    info: FormatInfo,
    config: CodecConfig,
    clock: Arc<dyn Clock>,
}

impl CuraProfileFormat {
    /// Format identifier
    pub const ID: &'static str = "cura";

    /// Create with default settings and the system clock
    pub fn new() -> Self {
        Self::with_config(CodecConfig::default())
    }

    pub fn with_config(config: CodecConfig) -> Self {
        Self {
            info: FormatInfo {
                id: Self::ID.to_string(),
                name: "Ultimaker Cura".to_string(),
                description: "Cura quality-changes profile (INI-style text)".to_string(),
                application_version: "5.4.3".to_string(),
                extensions: vec![".curaprofile".to_string()],
            },
            config,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the clock used for import timestamps
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }
}

impl Default for CuraProfileFormat {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileFormat for CuraProfileFormat {
    fn info(&self) -> &FormatInfo {
        &self.info
    }

    fn validate(&self, content: Option<&str>) -> ValidationResult {
        codec::validate(content)
    }

    fn import_layer(&self, content: Option<&str>) -> Result<LayerRecord> {
        codec::import_layer(content, &self.config.import, self.clock.as_ref())
    }

    fn import_profile(&self, _content: Option<&str>) -> Option<ProfileSnapshot> {
        None
    }

    fn export_profile(&self, snapshot: Option<&ProfileSnapshot>) -> Result<ExportResult> {
        codec::export_profile(snapshot, &self.config.export)
    }
}
