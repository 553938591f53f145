//! Typed filter values
//!
//! Predicate values are tagged variants chosen at decode time and bound
//! natively through sqlx, replacing loosely-typed pass-through values.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A typed filter value. `List` only occurs before rendering; the rendered
/// parameter vector contains scalars exclusively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    DateTime(DateTime<Utc>),
    Uuid(Uuid),
    Text(String),
    List(Vec<FilterValue>),
}

impl FilterValue {
    /// Infer the natural type of a raw request-string value. Tried in
    /// order: integer, float, boolean, RFC 3339 datetime, UUID; anything
    /// else stays text.
    pub fn infer(raw: &str) -> Self {
        if let Ok(value) = raw.parse::<i64>() {
            return Self::Int(value);
        }
        if let Ok(value) = raw.parse::<f64>() {
            return Self::Float(value);
        }
        match raw {
            "true" => return Self::Bool(true),
            "false" => return Self::Bool(false),
            _ => {}
        }
        if let Ok(value) = DateTime::parse_from_rfc3339(raw) {
            return Self::DateTime(value.with_timezone(&Utc));
        }
        if let Ok(value) = Uuid::parse_str(raw) {
            return Self::Uuid(value);
        }
        Self::Text(raw.to_string())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[FilterValue]> {
        match self {
            Self::List(values) => Some(values),
            _ => None,
        }
    }

    /// Human-readable type tag for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::DateTime(_) => "datetime",
            Self::Uuid(_) => "uuid",
            Self::Text(_) => "text",
            Self::List(_) => "list",
        }
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for FilterValue {
    fn from(value: i32) -> Self {
        Self::Int(value as i64)
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for FilterValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<DateTime<Utc>> for FilterValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::DateTime(value)
    }
}

impl From<Uuid> for FilterValue {
    fn from(value: Uuid) -> Self {
        Self::Uuid(value)
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<FilterValue>> for FilterValue {
    fn from(values: Vec<FilterValue>) -> Self {
        Self::List(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_scalars() {
        assert_eq!(FilterValue::infer("42"), FilterValue::Int(42));
        assert_eq!(FilterValue::infer("-7"), FilterValue::Int(-7));
        assert_eq!(FilterValue::infer("3.5"), FilterValue::Float(3.5));
        assert_eq!(FilterValue::infer("true"), FilterValue::Bool(true));
        assert_eq!(FilterValue::infer("false"), FilterValue::Bool(false));
        assert_eq!(
            FilterValue::infer("active"),
            FilterValue::Text("active".to_string())
        );
    }

    #[test]
    fn test_infer_datetime() {
        let value = FilterValue::infer("2024-06-01T12:30:00Z");
        match value {
            FilterValue::DateTime(dt) => assert_eq!(dt.to_rfc3339(), "2024-06-01T12:30:00+00:00"),
            other => panic!("expected datetime, got {:?}", other),
        }
    }

    #[test]
    fn test_infer_uuid() {
        let raw = "7f2c1e18-9f6a-4f6e-8a0f-0c6d7b1d2e3f";
        assert_eq!(
            FilterValue::infer(raw),
            FilterValue::Uuid(Uuid::parse_str(raw).unwrap())
        );
    }

    #[test]
    fn test_infer_prefers_int_over_float() {
        // "5" parses as both; the narrower type wins
        assert_eq!(FilterValue::infer("5"), FilterValue::Int(5));
    }

    #[test]
    fn test_untagged_serde_round_trip() {
        let values = vec![
            FilterValue::Int(10),
            FilterValue::Text("high".to_string()),
            FilterValue::Bool(false),
        ];

        let json = serde_json::to_string(&FilterValue::List(values.clone())).unwrap();
        let back: FilterValue = serde_json::from_str(&json).unwrap();
        assert_eq!(back, FilterValue::List(values));
    }
}
