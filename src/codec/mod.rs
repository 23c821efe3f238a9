//! Cura profile codec
//!
//! Bidirectional conversion between `.curaprofile` text and host records:
//!
//! ```text
//! text -> parse_sections -> SectionMap -> validate | import_layer
//! ProfileSnapshot -> export_profile -> text
//! ```
//!
//! All functions are pure apart from the import timestamp, which is read
//! from an injected [`Clock`](crate::clock::Clock).

mod export;
mod import;
mod sections;
mod validate;
mod value;

pub use export::{export_profile, ExportResult, ProfileSnapshot};
pub use import::{import_layer, LayerMetadata, LayerRecord, Parameter};
pub use sections::{parse_sections, Section, SectionMap};
pub use validate::{
    validate, validate_bytes, ValidationMetadata, ValidationResult, EXPECTED_SECTIONS,
};
pub use value::{coerce_value, format_value, parse_number, CoercedValue};
