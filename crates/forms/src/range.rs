//! Numeric range check.

use formcheck_core::codes::ErrorCode;
use formcheck_core::compare::{numeric_value, RangeBounds};
use formcheck_core::error::ValidatorError;

use crate::failure::{FormError, ValidationFailure};
use crate::form::FormValidator;

/// Arguments for [`FormValidator::out_of_range_if`].
///
/// Bounds are inclusive and a missing or blank value is `required` unless
/// told otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeCheck {
    field: String,
    bounds: RangeBounds,
    allow_none: bool,
}

impl RangeCheck {
    pub fn new(field: impl Into<String>, lower: f64, upper: f64) -> Self {
        Self {
            field: field.into(),
            bounds: RangeBounds::new(lower, upper),
            allow_none: false,
        }
    }

    pub fn lower_exclusive(mut self) -> Self {
        self.bounds = self.bounds.lower_exclusive();
        self
    }

    pub fn upper_exclusive(mut self) -> Self {
        self.bounds = self.bounds.upper_exclusive();
        self
    }

    /// A missing or blank value passes instead of failing with `required`.
    pub fn allow_none(mut self) -> Self {
        self.allow_none = true;
        self
    }

    pub fn bounds(&self) -> &RangeBounds {
        &self.bounds
    }
}

impl FormValidator {
    /// Fail unless the field's value lies within the check's bounds.
    ///
    /// Values that do not look numeric are left alone; the field's own type
    /// validation reports those.
    pub fn out_of_range_if(&mut self, check: &RangeCheck) -> Result<(), FormError> {
        let field = check.field.as_str();
        if field.trim().is_empty() {
            tracing::warn!("Range check configured without a field");
            return Err(ValidatorError::MissingField.into());
        }

        let present = self
            .get(field)
            .filter(|v| !v.is_blank())
            .map(|v| (numeric_value(v), v.kind()));

        let number = match present {
            None if check.allow_none => return Ok(()),
            None => {
                return Err(self.fail(ValidationFailure::for_field(
                    field,
                    "This field is required.",
                    ErrorCode::Required,
                )));
            }
            Some((None, kind)) => {
                tracing::trace!(field, kind, "Range check skipped, value not numeric");
                return Ok(());
            }
            Some((Some(number), _)) => number,
        };
        if check.bounds.contains(number.value) {
            return Ok(());
        }

        let message = format!(
            "This field is not within range. Expected {}.",
            check.bounds.expression(&number.text)
        );
        Err(self.fail(ValidationFailure::for_field(field, message, ErrorCode::OutOfRange)))
    }
}
