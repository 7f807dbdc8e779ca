//! Date checks relative to a reference date.

use std::fmt::Write as _;

use chrono::NaiveDate;
use formcheck_core::codes::ErrorCode;
use formcheck_core::compare::{compare_dates, local_date, DateOp};
use formcheck_core::error::ValidatorError;
use formcheck_core::value::FieldValue;

use crate::failure::{FormError, ValidationFailure};
use crate::form::FormValidator;

/// What a date is compared against.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
enum Reference {
    /// The configured report datetime field.
    #[default]
    ReportDatetime,
    Field(String),
    /// Today in the local zone, per the validator's clock.
    Today,
}

/// Arguments for a date check.
///
/// Name a field with [`DateCheck::field`] or supply a literal with
/// [`DateCheck::value`]. Giving both is a caller mistake.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DateCheck {
    field: Option<String>,
    value: Option<FieldValue>,
    reference: Reference,
    message: Option<String>,
    extra_message: Option<String>,
}

impl DateCheck {
    /// Check the submitted value of `field`.
    pub fn field(field: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            ..Self::default()
        }
    }

    /// Check a literal value instead of a submitted field.
    pub fn value(value: impl Into<FieldValue>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn with_value(mut self, value: impl Into<FieldValue>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Compare against `reference_field` instead of the report datetime.
    pub fn against(mut self, reference_field: impl Into<String>) -> Self {
        self.reference = Reference::Field(reference_field.into());
        self
    }

    /// Compare against today's date.
    pub fn against_today(mut self) -> Self {
        self.reference = Reference::Today;
        self
    }

    /// Replace the default failure message.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Appended to the default failure message.
    pub fn extra_message(mut self, extra: impl Into<String>) -> Self {
        self.extra_message = Some(extra.into());
        self
    }

    fn default_message(&mut self, base: &str) {
        if self.message.is_none() {
            let extra = self.extra_message.as_deref().unwrap_or("");
            self.message = Some(format!("{base} {extra}").trim().to_string());
        }
    }
}

impl FormValidator {
    /// Fail with `invalid` unless `<field> <op> <reference>` holds on local
    /// calendar dates. Skipped when either side is absent.
    pub fn date_is(&mut self, op: DateOp, check: DateCheck) -> Result<(), FormError> {
        let resolved = self
            .resolve_dates(&check)
            .inspect_err(|e| tracing::warn!(error = %e, "Date check misconfigured"))?;

        let Some((field_date, reference_date)) = resolved else {
            tracing::trace!(field = ?check.field, op = op.as_str(), "Date check skipped, value absent");
            return Ok(());
        };
        if compare_dates(op, field_date, reference_date) {
            return Ok(());
        }

        let message = match check.message {
            Some(message) => message,
            None => format!(
                "Invalid. Expected a date {} {}.",
                relation(op),
                self.reference_label(&check.reference)
            ),
        };
        Err(self.fail(ValidationFailure::new(check.field, message, ErrorCode::Invalid)))
    }

    /// The date must be strictly after the reference.
    pub fn date_is_future(&mut self, mut check: DateCheck) -> Result<(), FormError> {
        check.default_message("Invalid. Expected a future date.");
        self.date_is(DateOp::Gt, check)
    }

    /// The date must be strictly before the reference.
    pub fn date_is_past(&mut self, mut check: DateCheck) -> Result<(), FormError> {
        check.default_message("Invalid. Expected a past date.");
        self.date_is(DateOp::Lt, check)
    }

    pub fn date_is_equal(&mut self, mut check: DateCheck) -> Result<(), FormError> {
        check.default_message("Invalid. Expected dates to match.");
        self.date_is(DateOp::Eq, check)
    }

    /// `field` must fall before the report datetime. The failure message
    /// quotes the formatted report datetime.
    pub fn date_before_report_datetime(
        &mut self,
        field: &str,
        report_datetime_field: Option<&str>,
    ) -> Result<(), FormError> {
        let check = self.report_datetime_check(field, report_datetime_field, "before");
        self.date_is_past(check)
    }

    /// `field` must fall after the report datetime. The failure message
    /// quotes the formatted report datetime.
    pub fn date_after_report_datetime(
        &mut self,
        field: &str,
        report_datetime_field: Option<&str>,
    ) -> Result<(), FormError> {
        let check = self.report_datetime_check(field, report_datetime_field, "after");
        self.date_is_future(check)
    }

    fn report_datetime_check(
        &self,
        field: &str,
        report_datetime_field: Option<&str>,
        relation: &str,
    ) -> DateCheck {
        let reference_field = report_datetime_field
            .unwrap_or(self.settings.report_datetime_field.as_str())
            .to_string();
        let present = |name: &str| self.get(name).is_some_and(|v| !v.is_blank());

        let mut check = DateCheck::field(field).against(reference_field.clone());
        if present(field) && present(&reference_field) {
            if let Some(formatted) = self.get(&reference_field).and_then(|v| self.format_reference(v)) {
                check = check.message(format!(
                    "Invalid. Expected a date {relation} report date/time. Got {formatted}"
                ));
            }
        }
        check
    }

    fn resolve_dates(&self, check: &DateCheck) -> Result<Option<(NaiveDate, NaiveDate)>, ValidatorError> {
        let zone = &self.settings.time_zone;
        let field_date = match (&check.field, &check.value) {
            (Some(field), Some(_)) => {
                return Err(ValidatorError::FieldAndValue {
                    field: field.clone(),
                })
            }
            (Some(field), None) => {
                if field.trim().is_empty() {
                    return Err(ValidatorError::MissingField);
                }
                local_date(field, self.get(field), zone)?
            }
            (None, Some(value)) => local_date("value", Some(value), zone)?,
            (None, None) => return Err(ValidatorError::MissingField),
        };

        let reference_date = match &check.reference {
            Reference::ReportDatetime => {
                let name = &self.settings.report_datetime_field;
                local_date(name, self.get(name), zone)?
            }
            Reference::Field(name) => local_date(name, self.get(name), zone)?,
            Reference::Today => Some(zone.today(self.clock.as_ref())),
        };

        Ok(field_date.zip(reference_date))
    }

    fn reference_label(&self, reference: &Reference) -> String {
        match reference {
            Reference::ReportDatetime => self.settings.report_datetime_field.clone(),
            Reference::Field(name) => name.clone(),
            Reference::Today => "today".to_string(),
        }
    }

    /// Render a reference value in the local zone with the configured format.
    fn format_reference(&self, value: &FieldValue) -> Option<String> {
        let settings = &self.settings;
        let mut out = String::new();
        let written = match value {
            FieldValue::DateTime(dt) => {
                let local = settings.time_zone.to_local(dt);
                write!(out, "{}", local.format(&settings.datetime_format))
            }
            FieldValue::NaiveDateTime(dt) => write!(out, "{}", dt.format(&settings.datetime_format)),
            FieldValue::Date(d) => write!(out, "{}", d.format(&settings.date_format)),
            _ => return None,
        };
        // A format asking for fields the value lacks fails at render time.
        match written {
            Ok(()) => Some(out),
            Err(_) => Some(value.to_string()),
        }
    }
}

fn relation(op: DateOp) -> &'static str {
    match op {
        DateOp::Lt => "before",
        DateOp::Lte => "on or before",
        DateOp::Gt => "after",
        DateOp::Gte => "on or after",
        DateOp::Eq => "equal to",
    }
}
