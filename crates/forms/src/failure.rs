//! Validation outcomes returned to the host.

use std::collections::BTreeMap;

use formcheck_core::codes::ErrorCode;
use formcheck_core::error::ValidatorError;
use serde::{Deserialize, Serialize};

/// Key under which failures not tied to a single field are reported.
pub const NON_FIELD_ERRORS: &str = "__all__";

/// One failed check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationFailure {
    /// Offending field, or `None` for a form-wide failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub message: String,
    pub code: ErrorCode,
}

impl ValidationFailure {
    pub fn new(field: Option<String>, message: impl Into<String>, code: ErrorCode) -> Self {
        Self {
            field,
            message: message.into(),
            code,
        }
    }

    pub fn for_field(field: impl Into<String>, message: impl Into<String>, code: ErrorCode) -> Self {
        Self::new(Some(field.into()), message, code)
    }

    /// The field name, or [`NON_FIELD_ERRORS`].
    pub fn key(&self) -> &str {
        self.field.as_deref().unwrap_or(NON_FIELD_ERRORS)
    }
}

impl std::fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.key(), self.message)
    }
}

/// All failures collected while validating one submission, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    failures: Vec<ValidationFailure>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, failure: ValidationFailure) {
        self.failures.push(failure);
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn len(&self) -> usize {
        self.failures.len()
    }

    pub fn failures(&self) -> &[ValidationFailure] {
        &self.failures
    }

    /// Messages grouped by field key, ready for rendering.
    pub fn by_field(&self) -> BTreeMap<&str, Vec<&str>> {
        let mut map: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for failure in &self.failures {
            map.entry(failure.key()).or_default().push(&failure.message);
        }
        map
    }

    /// Messages recorded against `key`.
    pub fn messages(&self, key: &str) -> Vec<&str> {
        self.failures
            .iter()
            .filter(|f| f.key() == key)
            .map(|f| f.message.as_str())
            .collect()
    }

    /// Error codes in the order the failures were recorded.
    pub fn codes(&self) -> Vec<ErrorCode> {
        self.failures.iter().map(|f| f.code).collect()
    }

    pub fn has_code(&self, code: ErrorCode) -> bool {
        self.failures.iter().any(|f| f.code == code)
    }
}

impl From<ValidationFailure> for ValidationErrors {
    fn from(failure: ValidationFailure) -> Self {
        Self {
            failures: vec![failure],
        }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, failure) in self.failures.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{failure}")?;
        }
        Ok(())
    }
}

/// Error returned by checks and by [`FormValidator::validate`](crate::FormValidator::validate).
///
/// `Invalid` is bad end-user input and is rendered back on the form.
/// `Misuse` is a bug in the calling code and must not be shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("Validation failed: {0}")]
    Invalid(ValidationErrors),

    #[error(transparent)]
    Misuse(#[from] ValidatorError),
}

impl FormError {
    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }

    /// The collected failures, if this is an `Invalid` error.
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Invalid(errors) => Some(errors),
            Self::Misuse(_) => None,
        }
    }
}

impl From<ValidationFailure> for FormError {
    fn from(failure: ValidationFailure) -> Self {
        Self::Invalid(failure.into())
    }
}
