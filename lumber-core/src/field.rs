//! Typed log fields.
//!
//! Constructors produce opaque key/value pairs; only the encoding step in
//! [`crate::record`] interprets the values. Bytes encode as lossy UTF-8
//! text and durations as a human-readable string ("1.5ms", "2m30s").

use serde_json::Value;
use std::time::Duration;

/// A single key/value pair attached to a log record.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub key: String,
    pub value: FieldValue,
}

/// The closed set of value types a field can carry.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Str(String),
    Strs(Vec<String>),
    Int(i64),
    Bool(bool),
    Bytes(Vec<u8>),
    Duration(Duration),
}

impl Field {
    fn new(key: impl Into<String>, value: FieldValue) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }

    pub fn str(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(key, FieldValue::Str(value.into()))
    }

    pub fn strs(key: impl Into<String>, value: Vec<String>) -> Self {
        Self::new(key, FieldValue::Strs(value))
    }

    pub fn int(key: impl Into<String>, value: i64) -> Self {
        Self::new(key, FieldValue::Int(value))
    }

    pub fn bool(key: impl Into<String>, value: bool) -> Self {
        Self::new(key, FieldValue::Bool(value))
    }

    pub fn bytes(key: impl Into<String>, value: Vec<u8>) -> Self {
        Self::new(key, FieldValue::Bytes(value))
    }

    pub fn duration(key: impl Into<String>, value: Duration) -> Self {
        Self::new(key, FieldValue::Duration(value))
    }

    /// Category tag for grouping related records (`cat` key).
    pub fn category(value: impl Into<String>) -> Self {
        Self::str("cat", value)
    }
}

impl FieldValue {
    /// Encode the value as JSON. Bytes become lossy UTF-8 text, durations
    /// a formatted string.
    pub(crate) fn to_json(&self) -> Value {
        match self {
            FieldValue::Str(s) => Value::String(s.clone()),
            FieldValue::Strs(v) => Value::Array(
                v.iter().map(|s| Value::String(s.clone())).collect(),
            ),
            FieldValue::Int(i) => Value::from(*i),
            FieldValue::Bool(b) => Value::Bool(*b),
            FieldValue::Bytes(b) => Value::String(String::from_utf8_lossy(b).into_owned()),
            FieldValue::Duration(d) => Value::String(format_duration(*d)),
        }
    }
}

/// Format a duration the way Go's `Duration.String()` does: the largest
/// applicable unit, fractional part trimmed ("500ns", "1.5ms", "1m30s").
pub(crate) fn format_duration(d: Duration) -> String {
    let nanos = d.as_nanos();
    if nanos == 0 {
        return "0s".to_string();
    }
    if nanos < 1_000 {
        return format!("{}ns", nanos);
    }
    if nanos < 1_000_000 {
        return with_unit(nanos as f64 / 1_000.0, "µs");
    }
    if nanos < 1_000_000_000 {
        return with_unit(nanos as f64 / 1_000_000.0, "ms");
    }

    let total_secs = d.as_secs();
    let secs = total_secs % 60;
    let frac = f64::from(d.subsec_nanos()) / 1e9;
    let secs_part = with_unit(secs as f64 + frac, "s");
    let mins = (total_secs / 60) % 60;
    let hours = total_secs / 3600;
    match (hours, mins) {
        (0, 0) => secs_part,
        (0, m) => format!("{}m{}", m, secs_part),
        (h, m) => format!("{}h{}m{}", h, m, secs_part),
    }
}

fn with_unit(value: f64, unit: &str) -> String {
    let s = format!("{:.3}", value);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    format!("{}{}", s, unit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_formatting() {
        assert_eq!(format_duration(Duration::ZERO), "0s");
        assert_eq!(format_duration(Duration::from_nanos(500)), "500ns");
        assert_eq!(format_duration(Duration::from_nanos(1_500)), "1.5µs");
        assert_eq!(format_duration(Duration::from_micros(1_500)), "1.5ms");
        assert_eq!(format_duration(Duration::from_millis(2_500)), "2.5s");
        assert_eq!(format_duration(Duration::from_secs(2)), "2s");
        assert_eq!(format_duration(Duration::from_secs(90)), "1m30s");
        assert_eq!(format_duration(Duration::from_secs(3600)), "1h0m0s");
        assert_eq!(format_duration(Duration::from_secs(3723)), "1h2m3s");
    }

    #[test]
    fn bytes_encode_as_lossy_text() {
        let v = FieldValue::Bytes(b"hello".to_vec()).to_json();
        assert_eq!(v, serde_json::json!("hello"));

        let v = FieldValue::Bytes(vec![0xff, 0xfe]).to_json();
        assert!(v.as_str().is_some());
    }

    #[test]
    fn category_uses_cat_key() {
        let f = Field::category("auth");
        assert_eq!(f.key, "cat");
        assert_eq!(f.value, FieldValue::Str("auth".to_string()));
    }

    #[test]
    fn constructors_carry_typed_values() {
        assert_eq!(Field::int("n", 7).value, FieldValue::Int(7));
        assert_eq!(Field::bool("ok", true).value, FieldValue::Bool(true));
        assert_eq!(
            Field::strs("tags", vec!["a".into(), "b".into()]).value,
            FieldValue::Strs(vec!["a".into(), "b".into()])
        );
    }
}
