//! Cura Profile - slicer profile codec
//!
//! Converts Ultimaker Cura `.curaprofile` text into the host's layer records
//! and exports host profile snapshots back into Cura text.
//!
//! # Architecture
//!
//! - `codec`: section parsing, value coercion, validation, import and export
//! - `format`: the host-facing `ProfileFormat` trait and format registry
//! - `config` / `clock`: defaults and the injectable import timestamp
//! - `cli`: command-line front end
//!
//! # Example
//!
//! ```
//! use cura_profile::format::{CuraProfileFormat, ProfileFormat};
//!
//! let format = CuraProfileFormat::new();
//! let text = "[general]\nname = Fine\n[values]\nlayer_height = 0.1\n";
//!
//! assert!(format.validate(Some(text)).is_valid);
//! let layer = format.import_layer(Some(text)).unwrap();
//! assert_eq!(layer.layer_name, "Fine");
//! ```

pub mod cli;
pub mod clock;
pub mod codec;
pub mod config;
pub mod error;
pub mod format;

pub use error::{ProfileError, Result};
