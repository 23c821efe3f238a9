//! Error handling for the profile codec
//!
//! Structural problems in a profile are reported through
//! [`ValidationResult`](crate::codec::ValidationResult) and never surface here.
//! These errors cover precondition violations and the I/O around the codec.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for codec operations
pub type Result<T> = std::result::Result<T, ProfileError>;

/// Main error type for codec operations
#[derive(Error, Debug)]
pub enum ProfileError {
    // Precondition Errors
    #[error("fileContent is required and must be a string")]
    MissingFileContent,

    #[error("profileSnapshot is required and must be an object")]
    InvalidSnapshot,

    // Format Errors
    #[error("Unknown profile format: {id}")]
    UnknownFormat { id: String },

    #[error("No registered format handles {path}")]
    UnsupportedFile { path: PathBuf },

    // File Errors
    #[error("File not found: {path}")]
    FileNotFound {
        path: PathBuf,
        #[source]
        source: Option<std::io::Error>,
    },

    // Configuration Errors
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    // I/O Errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization Errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ProfileError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            ProfileError::MissingFileContent => "MISSING_FILE_CONTENT",
            ProfileError::InvalidSnapshot => "INVALID_SNAPSHOT",
            ProfileError::UnknownFormat { .. } => "UNKNOWN_FORMAT",
            ProfileError::UnsupportedFile { .. } => "UNSUPPORTED_FILE",
            ProfileError::FileNotFound { .. } => "FILE_NOT_FOUND",
            ProfileError::InvalidConfig { .. } => "INVALID_CONFIG",
            ProfileError::Io(_) => "IO_ERROR",
            ProfileError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Returns a user-friendly recovery suggestion.
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            ProfileError::MissingFileContent => {
                Some("Read the .curaprofile file and pass its text content.")
            }
            ProfileError::InvalidSnapshot => {
                Some("Pass a JSON object with 'profileName' and 'modifiedParams'.")
            }
            ProfileError::UnknownFormat { .. } => {
                Some("Run 'cura-profile formats' to list the available formats.")
            }
            ProfileError::UnsupportedFile { .. } => {
                Some("Rename the file with a .curaprofile extension or pass --format.")
            }
            ProfileError::FileNotFound { .. } => Some("Check the file path and try again."),
            ProfileError::InvalidConfig { .. } => {
                Some("Fix the configuration file or remove it to use the defaults.")
            }
            _ => None,
        }
    }
}
