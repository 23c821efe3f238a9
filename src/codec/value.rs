//! Value coercion between raw profile strings and typed values

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A profile value after coercion from its raw string form.
///
/// Serializes untagged, so hosts see plain JSON booleans, numbers and strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CoercedValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl CoercedValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CoercedValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CoercedValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CoercedValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Convert a host JSON value. `null` has no value and maps to `None`.
    ///
    /// Arrays and objects are kept as their compact JSON text.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Bool(b) => Some(CoercedValue::Bool(*b)),
            Value::Number(n) => Some(match n.as_f64() {
                Some(f) => CoercedValue::Number(f),
                None => CoercedValue::Text(n.to_string()),
            }),
            Value::String(s) => Some(CoercedValue::Text(s.clone())),
            other => Some(CoercedValue::Text(other.to_string())),
        }
    }
}

impl fmt::Display for CoercedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_value(self))
    }
}

impl From<bool> for CoercedValue {
    fn from(value: bool) -> Self {
        CoercedValue::Bool(value)
    }
}

impl From<f64> for CoercedValue {
    fn from(value: f64) -> Self {
        CoercedValue::Number(value)
    }
}

impl From<i64> for CoercedValue {
    fn from(value: i64) -> Self {
        CoercedValue::Number(value as f64)
    }
}

impl From<&str> for CoercedValue {
    fn from(value: &str) -> Self {
        CoercedValue::Text(value.to_string())
    }
}

impl From<String> for CoercedValue {
    fn from(value: String) -> Self {
        CoercedValue::Text(value)
    }
}

/// Parse a finite decimal literal: optional sign, digits with an optional
/// fraction, optional exponent. Textual forms like `inf` or `NaN` are rejected.
pub fn parse_number(raw: &str) -> Option<f64> {
    if raw.is_empty() {
        return None;
    }
    let looks_decimal = raw
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'));
    if !looks_decimal {
        return None;
    }
    raw.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Coerce a raw profile string into a typed value.
///
/// Numbers lose their original spelling (`007` becomes `7`); that loss is
/// part of the format's contract.
pub fn coerce_value(raw: &str) -> CoercedValue {
    match raw {
        "True" | "true" => CoercedValue::Bool(true),
        "False" | "false" => CoercedValue::Bool(false),
        _ => match parse_number(raw) {
            Some(n) => CoercedValue::Number(n),
            None => CoercedValue::Text(raw.to_string()),
        },
    }
}

/// Render a number in plain decimal form, never in exponent notation.
fn format_number(n: f64) -> String {
    if n == 0.0 {
        // covers -0
        return "0".to_string();
    }
    format!("{}", n)
}

/// Format a typed value back into its profile string.
pub fn format_value(value: &CoercedValue) -> String {
    match value {
        CoercedValue::Bool(true) => "True".to_string(),
        CoercedValue::Bool(false) => "False".to_string(),
        CoercedValue::Number(n) => format_number(*n),
        CoercedValue::Text(s) => s.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use test_case::test_case;

    #[test_case("True", CoercedValue::Bool(true) ; "capital true")]
    #[test_case("true", CoercedValue::Bool(true) ; "lower true")]
    #[test_case("False", CoercedValue::Bool(false) ; "capital false")]
    #[test_case("false", CoercedValue::Bool(false) ; "lower false")]
    #[test_case("TRUE", CoercedValue::Text("TRUE".into()) ; "upper true stays text")]
    #[test_case("hello", CoercedValue::Text("hello".into()) ; "plain text")]
    #[test_case("", CoercedValue::Text(String::new()) ; "empty stays text")]
    #[test_case("12mm", CoercedValue::Text("12mm".into()) ; "unit suffix stays text")]
    #[test_case("inf", CoercedValue::Text("inf".into()) ; "infinity word stays text")]
    #[test_case("NaN", CoercedValue::Text("NaN".into()) ; "nan stays text")]
    fn test_coerce_non_numeric(raw: &str, expected: CoercedValue) {
        assert_eq!(coerce_value(raw), expected);
    }

    #[test_case("42", 42.0 ; "integer")]
    #[test_case("2.25", 2.25 ; "decimal")]
    #[test_case("-0.5", -0.5 ; "negative")]
    #[test_case("+7", 7.0 ; "explicit plus")]
    #[test_case(".5", 0.5 ; "bare fraction")]
    #[test_case("1e3", 1000.0 ; "exponent")]
    #[test_case("007", 7.0 ; "leading zeros")]
    fn test_coerce_numbers(raw: &str, expected: f64) {
        let value = coerce_value(raw);
        assert_relative_eq!(value.as_f64().unwrap(), expected);
    }

    #[test_case(CoercedValue::Bool(true), "True" ; "bool true")]
    #[test_case(CoercedValue::Bool(false), "False" ; "bool false")]
    #[test_case(CoercedValue::Number(20.0), "20" ; "integral number")]
    #[test_case(CoercedValue::Number(0.2), "0.2" ; "fractional number")]
    #[test_case(CoercedValue::Number(-0.0), "0" ; "negative zero")]
    #[test_case(CoercedValue::Number(1e21), "1000000000000000000000" ; "large number")]
    #[test_case(CoercedValue::Text("grid".into()), "grid" ; "text")]
    fn test_format_value(value: CoercedValue, expected: &str) {
        assert_eq!(format_value(&value), expected);
    }

    #[test]
    fn test_format_after_coerce_is_stable() {
        for raw in ["True", "False", "42", "3.14", "hello"] {
            let once = format_value(&coerce_value(raw));
            let twice = format_value(&coerce_value(&once));
            assert_eq!(once, twice);
            assert_eq!(once, raw);
        }
    }

    #[test]
    fn test_leading_zero_formatting_is_lost() {
        assert_eq!(format_value(&coerce_value("0050")), "50");
        assert_eq!(format_value(&coerce_value("1.50")), "1.5");
    }

    #[test]
    fn test_typed_accessors() {
        assert_eq!(coerce_value("True").as_bool(), Some(true));
        assert_eq!(coerce_value("grid").as_str(), Some("grid"));
        assert_eq!(coerce_value("20").as_bool(), None);
        assert_eq!(coerce_value("False").as_str(), None);
        assert_eq!(coerce_value("lines").as_f64(), None);
    }

    #[test]
    fn test_from_json() {
        assert_eq!(CoercedValue::from_json(&Value::Null), None);
        assert_eq!(
            CoercedValue::from_json(&serde_json::json!(1)),
            Some(CoercedValue::Number(1.0))
        );
        assert_eq!(
            CoercedValue::from_json(&serde_json::json!([1, 2])),
            Some(CoercedValue::Text("[1,2]".into()))
        );
    }

    #[test]
    fn test_serializes_untagged() {
        let values = vec![
            CoercedValue::Bool(true),
            CoercedValue::Number(0.2),
            CoercedValue::Text("lines".into()),
        ];
        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, r#"[true,0.2,"lines"]"#);
    }
}
