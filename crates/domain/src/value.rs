//! Field values reported by the gateway.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single value held in a device snapshot.
///
/// Scalars get their own variant. Anything else the gateway sends (arrays,
/// nested objects) is kept verbatim in [`Other`](Self::Other), and the typed
/// readers return `None` for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Other(serde_json::Value),
}

impl FieldValue {
    /// Whether this is an explicit JSON `null`.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Borrow the string content, if this is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Interpret the value as an integer.
    ///
    /// Accepts integers, floats without a fractional part and numeric strings,
    /// since gateways are not consistent about how they encode numbers.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            Self::Float(f)
                if f.is_finite()
                    && f.fract().abs() < f64::EPSILON
                    && *f >= i64::MIN as f64
                    && *f <= i64::MAX as f64 =>
            {
                Some(*f as i64)
            }
            Self::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Interpret the value as a float.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            Self::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Whether both values denote the same thing, comparing numbers by
    /// magnitude so `60`, `60.0` and `"60"` are equal.
    #[must_use]
    pub fn same_as(&self, other: &Self) -> bool {
        match (self.as_f64(), other.as_f64()) {
            (Some(a), Some(b)) => (a - b).abs() <= f64::EPSILON * a.abs().max(b.abs()).max(1.0),
            _ => self == other,
        }
    }

    /// Borrow the boolean, if this is a boolean.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => fmt::Display::fmt(b, f),
            Self::Int(i) => fmt::Display::fmt(i, f),
            Self::Float(v) => fmt::Display::fmt(v, f),
            Self::String(s) => f.write_str(s),
            Self::Other(v) => fmt::Display::fmt(v, f),
        }
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_deserialize_json_null_as_null_variant() {
        let val: FieldValue = serde_json::from_str("null").unwrap();
        assert!(val.is_null());
    }

    #[test]
    fn should_deserialize_whole_number_as_int() {
        let val: FieldValue = serde_json::from_str("42").unwrap();
        assert_eq!(val, FieldValue::Int(42));
    }

    #[test]
    fn should_deserialize_decimal_number_as_float() {
        let val: FieldValue = serde_json::from_str("21.5").unwrap();
        assert_eq!(val, FieldValue::Float(21.5));
    }

    #[test]
    fn should_serialize_string_variant_as_plain_string() {
        let val = FieldValue::from("on");
        assert_eq!(serde_json::to_string(&val).unwrap(), "\"on\"");
    }

    #[test]
    fn should_keep_array_as_other_variant() {
        let val: FieldValue = serde_json::from_str(r#"[{"type": "on", "dsc": "ON"}]"#).unwrap();
        assert!(matches!(val, FieldValue::Other(serde_json::Value::Array(_))));
        assert_eq!(val.as_str(), None);
        assert_eq!(val.as_i64(), None);
        assert_eq!(val.as_f64(), None);
    }

    #[test]
    fn should_serialize_other_variant_unchanged() {
        let json = r#"{"nested":1}"#;
        let val: FieldValue = serde_json::from_str(json).unwrap();
        assert_eq!(serde_json::to_string(&val).unwrap(), json);
        assert_eq!(val.to_string(), json);
    }

    #[test]
    fn should_treat_int_and_float_encodings_as_same() {
        assert!(FieldValue::Int(60).same_as(&FieldValue::Float(60.0)));
        assert!(FieldValue::from("60").same_as(&FieldValue::Int(60)));
        assert!(!FieldValue::Int(60).same_as(&FieldValue::Float(60.5)));
    }

    #[test]
    fn should_compare_non_numbers_structurally() {
        assert!(FieldValue::Bool(true).same_as(&FieldValue::Bool(true)));
        assert!(!FieldValue::from("on").same_as(&FieldValue::from("off")));
        assert!(!FieldValue::Bool(true).same_as(&FieldValue::Int(1)));
    }

    #[test]
    fn should_read_integer_from_numeric_string() {
        assert_eq!(FieldValue::from(" 17 ").as_i64(), Some(17));
        assert_eq!(FieldValue::from("lamp").as_i64(), None);
    }

    #[test]
    fn should_read_integer_from_integral_float_only() {
        assert_eq!(FieldValue::Float(3.0).as_i64(), Some(3));
        assert_eq!(FieldValue::Float(3.5).as_i64(), None);
        assert_eq!(FieldValue::Float(f64::NAN).as_i64(), None);
    }

    #[test]
    fn should_widen_int_when_reading_float() {
        assert_eq!(FieldValue::Int(2).as_f64(), Some(2.0));
        assert_eq!(FieldValue::Bool(true).as_f64(), None);
    }

    #[test]
    fn should_display_without_quotes() {
        assert_eq!(FieldValue::from("°C").to_string(), "°C");
        assert_eq!(FieldValue::Int(5).to_string(), "5");
        assert_eq!(FieldValue::Null.to_string(), "null");
    }
}
