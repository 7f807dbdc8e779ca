//! Values carried by a submitted form.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single cleaned form value.
///
/// Deserializes untagged, so a host can hand over a plain JSON object:
/// RFC 3339 strings become [`FieldValue::DateTime`], `YYYY-MM-DDTHH:MM:SS`
/// becomes [`FieldValue::NaiveDateTime`], `YYYY-MM-DD` becomes
/// [`FieldValue::Date`], `{"name": ..}` objects become
/// [`FieldValue::Choice`] and any other string is [`FieldValue::Text`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    DateTime(DateTime<FixedOffset>),
    NaiveDateTime(NaiveDateTime),
    Date(NaiveDate),
    /// A related record or choice, stored by its `name`.
    Choice {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        display_name: Option<String>,
    },
    Text(String),
}

impl FieldValue {
    /// `Null` and empty text count as "not supplied".
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Short type name used in error messages and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::DateTime(_) => "datetime",
            Self::NaiveDateTime(_) => "naive datetime",
            Self::Date(_) => "date",
            Self::Choice { .. } => "choice",
            Self::Text(_) => "text",
        }
    }

    /// The stored name of a choice, or the text itself.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Choice { name, .. } => Some(name),
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => f.write_str("None"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::DateTime(dt) => write!(f, "{}", dt.to_rfc3339()),
            Self::NaiveDateTime(dt) => write!(f, "{dt}"),
            Self::Date(d) => write!(f, "{d}"),
            Self::Choice { name, .. } => f.write_str(name),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for FieldValue {
    fn from(v: i32) -> Self {
        Self::Integer(v.into())
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(v: NaiveDate) -> Self {
        Self::Date(v)
    }
}

impl From<NaiveDateTime> for FieldValue {
    fn from(v: NaiveDateTime) -> Self {
        Self::NaiveDateTime(v)
    }
}

impl From<DateTime<FixedOffset>> for FieldValue {
    fn from(v: DateTime<FixedOffset>) -> Self {
        Self::DateTime(v)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(v: DateTime<Utc>) -> Self {
        Self::DateTime(v.into())
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn deserializes_temporal_strings() {
        let aware: FieldValue = serde_json::from_value(json!("2024-03-01T23:30:00+02:00")).unwrap();
        let naive: FieldValue = serde_json::from_value(json!("2024-03-01T23:30:00")).unwrap();
        let date: FieldValue = serde_json::from_value(json!("2024-03-01")).unwrap();

        assert_eq!(aware.kind(), "datetime");
        assert_eq!(naive.kind(), "naive datetime");
        assert_eq!(date, FieldValue::Date(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()));
    }

    #[test]
    fn deserializes_scalars_and_choices() {
        assert_eq!(serde_json::from_value::<FieldValue>(json!(null)).unwrap(), FieldValue::Null);
        assert_eq!(serde_json::from_value::<FieldValue>(json!(10)).unwrap(), FieldValue::Integer(10));
        assert_eq!(serde_json::from_value::<FieldValue>(json!(2.5)).unwrap(), FieldValue::Float(2.5));
        assert_eq!(
            serde_json::from_value::<FieldValue>(json!("hello")).unwrap(),
            FieldValue::Text("hello".into())
        );

        let choice: FieldValue =
            serde_json::from_value(json!({"name": "yes", "display_name": "Yes"})).unwrap();
        assert_eq!(choice.name(), Some("yes"));
    }

    #[test]
    fn blank_values() {
        assert!(FieldValue::Null.is_blank());
        assert!(FieldValue::from("").is_blank());
        assert!(!FieldValue::from(0).is_blank());
        assert!(!FieldValue::from("x").is_blank());
    }

    #[test]
    fn option_converts_to_null() {
        assert_eq!(FieldValue::from(None::<i64>), FieldValue::Null);
        assert_eq!(FieldValue::from(Some(3)), FieldValue::Integer(3));
    }

    #[test]
    fn utc_datetime_keeps_instant() {
        let utc = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        match FieldValue::from(utc) {
            FieldValue::DateTime(dt) => assert_eq!(dt, utc),
            other => panic!("expected datetime, got {other:?}"),
        }
    }
}
