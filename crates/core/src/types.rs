/// Primary key of the record a form edits.
pub type DbId = i64;

/// Instants read from a [`Clock`](crate::clock::Clock) are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Submitted form data after field-level cleaning, keyed by field name.
pub type CleanedData = std::collections::BTreeMap<String, crate::value::FieldValue>;
