//! Integration Tests
//!
//! End-to-end tests for the Cura profile codec through the host interface.

use std::collections::BTreeMap;
use std::sync::Arc;

use approx::assert_relative_eq;
use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use serde_json::json;

use cura_profile::clock::FixedClock;
use cura_profile::codec::{
    coerce_value, format_value, parse_sections, CoercedValue, ProfileSnapshot,
};
use cura_profile::format::{CuraProfileFormat, FormatRegistry, ProfileFormat};
use cura_profile::ProfileError;

const FINE_PROFILE: &str = "\
; exported by Cura 5.4.3
[general]
version = 4
name = Fine PLA
definition = ultimaker_s5

[metadata]
type = quality_changes
quality_type = fine
setting_version = 22

[values]
layer_height = 0.1
support_enable = True
adhesion_type = brim
infill_pattern = gyroid
retraction_amount = 6.5
";

fn format_at_fixed_time() -> CuraProfileFormat {
    let at = Utc.with_ymd_and_hms(2024, 6, 1, 9, 30, 0).unwrap();
    CuraProfileFormat::new().with_clock(Arc::new(FixedClock::new(at)))
}

fn header_count(text: &str, header: &str) -> usize {
    text.lines().filter(|line| *line == header).count()
}

// === Parsing ===

#[test]
fn test_text_without_structure_parses_empty() {
    for text in ["", "hello world", "no sections here\njust prose\n", "# only = comments"] {
        assert!(parse_sections(text).is_empty(), "expected empty map for {:?}", text);
    }
}

#[test]
fn test_coerce_then_format_is_stable() {
    for raw in ["True", "False", "42", "3.14", "hello"] {
        let formatted = format_value(&coerce_value(raw));
        assert_eq!(formatted, format_value(&coerce_value(&formatted)));
    }
}

// === Validation ===

#[test]
fn test_validation_failures() {
    let format = CuraProfileFormat::new();

    assert_eq!(
        format.validate(None).error.as_deref(),
        Some("File content is empty or invalid")
    );
    assert_eq!(format.validate(Some("")).error.as_deref(), Some("File is empty"));

    let version = format.validate(Some("[general]\nversion = abc"));
    assert!(!version.is_valid);
    assert!(version.error.unwrap().contains("Invalid version"));

    let values = format.validate(Some("[values]\n"));
    assert_eq!(
        values.error.as_deref(),
        Some("[values] section exists but contains no parameters")
    );
}

#[test]
fn test_validate_real_profile() {
    let result = CuraProfileFormat::new().validate(Some(FINE_PROFILE));
    assert!(result.is_valid);

    let metadata = result.metadata.unwrap();
    assert_eq!(metadata.profile_name, "Fine PLA");
    assert_eq!(metadata.parameter_count, 5);
    assert_eq!(metadata.sections, vec!["general", "metadata", "values"]);
}

// === Import ===

#[test]
fn test_import_example_profile() {
    let format = CuraProfileFormat::new();
    let layer = format
        .import_layer(Some(
            "[general]\nname = Test\n[values]\nlayer_height = 0.2\ninfill_sparse_density = 20\n",
        ))
        .unwrap();

    assert_eq!(layer.layer_name, "Test");
    assert_eq!(layer.parameters.len(), 2);
    assert_relative_eq!(layer.parameters[0].value.as_f64().unwrap(), 0.2);
    assert_relative_eq!(layer.parameters[1].value.as_f64().unwrap(), 20.0);
    assert_eq!(layer.metadata.source, "Ultimaker Cura");
}

#[test]
fn test_import_preserves_parameter_order_and_types() {
    let layer = format_at_fixed_time().import_layer(Some(FINE_PROFILE)).unwrap();

    let names: Vec<_> = layer.parameters.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "layer_height",
            "support_enable",
            "adhesion_type",
            "infill_pattern",
            "retraction_amount"
        ]
    );
    assert_eq!(
        layer.parameter("support_enable").and_then(CoercedValue::as_bool),
        Some(true)
    );
    assert_eq!(
        layer.parameter("infill_pattern").and_then(CoercedValue::as_str),
        Some("gyroid")
    );
    assert_eq!(layer.metadata.definition, "ultimaker_s5");
}

#[test]
fn test_import_layer_json_shape() {
    let layer = format_at_fixed_time().import_layer(Some(FINE_PROFILE)).unwrap();
    let json = serde_json::to_value(&layer).unwrap();

    assert_eq!(json["layerName"], "Fine PLA");
    assert_eq!(json["description"], "Imported from Cura profile: Fine PLA");
    assert_eq!(json["parameters"][1], json!({"name": "support_enable", "value": true}));
    assert_eq!(json["metadata"]["importDate"], "2024-06-01T09:30:00Z");
    assert_eq!(json["metadata"]["originalVersion"], "4");
}

#[test]
fn test_import_requires_content() {
    let err = CuraProfileFormat::new().import_layer(None).unwrap_err();
    assert!(matches!(err, ProfileError::MissingFileContent));
    assert_eq!(err.to_string(), "fileContent is required and must be a string");
}

#[test]
fn test_import_profile_always_none() {
    let format = CuraProfileFormat::new();
    assert!(format.import_profile(Some(FINE_PROFILE)).is_none());
    assert!(format.import_profile(Some("")).is_none());
    assert!(format.import_profile(None).is_none());
}

// === Export ===

#[test]
fn test_export_sorts_and_skips_null() {
    let snapshot = ProfileSnapshot::from_json(&json!({
        "modifiedParams": {"b": 1, "a": "x", "c": null},
        "profileName": "P"
    }))
    .unwrap();

    let text = CuraProfileFormat::new()
        .export_profile(Some(&snapshot))
        .unwrap()
        .file_content;

    let a = text.find("\na = x\n").unwrap();
    let b = text.find("\nb = 1\n").unwrap();
    assert!(a < b);
    assert!(!text.contains("c ="));
    assert!(text.contains("name = P\n"));
}

#[test]
fn test_export_headers_once_in_order() {
    let format = CuraProfileFormat::new();
    let snapshots = vec![
        ProfileSnapshot::default(),
        ProfileSnapshot::new("Draft").with_param("layer_height", 0.3),
        ProfileSnapshot {
            schema_id: Some("laminode/cura".to_string()),
            profile_name: None,
            modified_params: BTreeMap::from([("speed_print".to_string(), None)]),
        },
    ];

    for snapshot in &snapshots {
        let text = format.export_profile(Some(snapshot)).unwrap().file_content;
        for header in ["[general]", "[metadata]", "[values]"] {
            assert_eq!(header_count(&text, header), 1, "{} in {:?}", header, text);
        }
        let general = text.find("[general]").unwrap();
        let metadata = text.find("[metadata]").unwrap();
        let values = text.find("[values]").unwrap();
        assert!(general < metadata && metadata < values);
        assert!(text.ends_with('\n'));
    }
}

#[test]
fn test_export_keeps_multi_line_values_on_one_line() {
    let format = CuraProfileFormat::new();
    let snapshot = ProfileSnapshot::new("Evil\n[values]\n[general]")
        .with_param("start_gcode", "G28\nM104 S200");

    let text = format.export_profile(Some(&snapshot)).unwrap().file_content;
    for header in ["[general]", "[metadata]", "[values]"] {
        assert_eq!(header_count(&text, header), 1, "{} in {:?}", header, text);
    }

    let layer = format.import_layer(Some(text.as_str())).unwrap();
    assert_eq!(layer.layer_name, "Evil [values] [general]");
    assert_eq!(
        layer.parameter("start_gcode").and_then(CoercedValue::as_str),
        Some("G28 M104 S200")
    );
}

#[test]
fn test_export_requires_object_snapshot() {
    let err = ProfileSnapshot::from_json(&json!("not a snapshot")).unwrap_err();
    assert_eq!(err.to_string(), "profileSnapshot is required and must be an object");

    let err = CuraProfileFormat::new().export_profile(None).unwrap_err();
    assert!(matches!(err, ProfileError::InvalidSnapshot));
}

// === Round Trip ===

#[test]
fn test_import_then_export_round_trip() {
    let format = format_at_fixed_time();
    let layer = format.import_layer(Some(FINE_PROFILE)).unwrap();

    let mut snapshot = ProfileSnapshot::new(layer.layer_name.clone());
    for parameter in &layer.parameters {
        snapshot
            .modified_params
            .insert(parameter.name.clone(), Some(parameter.value.clone()));
    }

    let exported = format.export_profile(Some(&snapshot)).unwrap().file_content;
    assert!(format.validate(Some(exported.as_str())).is_valid);

    let reimported = format.import_layer(Some(exported.as_str())).unwrap();
    assert_eq!(reimported.layer_name, "Fine PLA");
    assert_eq!(reimported.parameters.len(), layer.parameters.len());
    for parameter in &layer.parameters {
        assert_eq!(reimported.parameter(&parameter.name), Some(&parameter.value));
    }
}

// === Registry ===

#[test]
fn test_registry_lookup_by_path() {
    let registry = FormatRegistry::with_defaults();
    let format = registry
        .find_for_path(std::path::Path::new("profiles/Fine PLA.curaprofile"))
        .unwrap();
    assert!(format.validate(Some(FINE_PROFILE)).is_valid);
}
