use std::sync::Arc;

use formcheck_core::clock::{Clock, SystemClock};
use formcheck_core::codes::ErrorCode;
use formcheck_core::error::ValidatorError;
use formcheck_core::settings::ValidatorSettings;
use formcheck_core::types::{CleanedData, DbId};
use formcheck_core::value::FieldValue;
use serde::{Deserialize, Serialize};

use crate::failure::{FormError, ValidationErrors, ValidationFailure};

/// The record being edited, if the form is a change form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    /// `None` until the record has been saved.
    #[serde(default)]
    pub id: Option<DbId>,
    #[serde(flatten)]
    pub fields: CleanedData,
}

impl Instance {
    pub fn new(id: Option<DbId>, fields: CleanedData) -> Self {
        Self { id, fields }
    }
}

/// Validator for a single form submission.
///
/// Checks record every failure they report, so [`errors`](Self::errors)
/// always reflects what has gone wrong so far. Caller mistakes are returned
/// as [`FormError::Misuse`] and are never recorded.
pub struct FormValidator {
    pub(crate) cleaned_data: CleanedData,
    original_cleaned_data: CleanedData,
    instance: Option<Instance>,
    pub(crate) settings: ValidatorSettings,
    pub(crate) clock: Arc<dyn Clock>,
    errors: ValidationErrors,
}

impl FormValidator {
    /// Build a validator for an add form with default settings and the
    /// system clock.
    pub fn new(cleaned_data: CleanedData) -> Self {
        Self {
            original_cleaned_data: cleaned_data.clone(),
            cleaned_data,
            instance: None,
            settings: ValidatorSettings::default(),
            clock: Arc::new(SystemClock),
            errors: ValidationErrors::new(),
        }
    }

    /// Build a validator from a JSON object of submitted values.
    pub fn from_json(data: serde_json::Value) -> Result<Self, ValidatorError> {
        let cleaned_data: CleanedData = serde_json::from_value(data)
            .map_err(|e| ValidatorError::Config(format!("expected a JSON object of form values: {e}")))?;
        Ok(Self::new(cleaned_data))
    }

    pub fn with_instance(mut self, instance: Instance) -> Self {
        self.instance = Some(instance);
        self
    }

    pub fn with_settings(mut self, settings: ValidatorSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn cleaned_data(&self) -> &CleanedData {
        &self.cleaned_data
    }

    /// The submission as it was before any instance backfill.
    pub fn original_cleaned_data(&self) -> &CleanedData {
        &self.original_cleaned_data
    }

    pub fn instance(&self) -> Option<&Instance> {
        self.instance.as_ref()
    }

    pub fn settings(&self) -> &ValidatorSettings {
        &self.settings
    }

    /// An add form has no saved instance behind it.
    pub fn is_add_form(&self) -> bool {
        !self.is_change_form()
    }

    /// Only a saved instance, one with an id, makes a change form.
    pub fn is_change_form(&self) -> bool {
        self.instance.as_ref().is_some_and(|i| i.id.is_some())
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.cleaned_data.get(field)
    }

    /// The stored name of a choice field, or the text of a text field.
    pub fn get_name(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(FieldValue::name)
    }

    /// Copy a field the form did not submit from the instance.
    pub fn update_cleaned_data_from_instance(&mut self, field: &str) -> Result<(), ValidatorError> {
        if self.original_cleaned_data.contains_key(field) {
            return Err(ValidatorError::AlreadyInCleanedData(field.to_string()));
        }
        let instance = self
            .instance
            .as_ref()
            .ok_or_else(|| ValidatorError::NoInstance(field.to_string()))?;
        let value = instance
            .fields
            .get(field)
            .cloned()
            .ok_or_else(|| ValidatorError::MissingInstanceField(field.to_string()))?;
        self.cleaned_data.insert(field.to_string(), value);
        Ok(())
    }

    /// Every failure recorded so far.
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn error_codes(&self) -> Vec<ErrorCode> {
        self.errors.codes()
    }

    /// Record a failure and return it as an error, for rules written inline
    /// in a clean closure.
    pub fn raise(&mut self, field: Option<&str>, message: impl Into<String>, code: ErrorCode) -> FormError {
        self.fail(ValidationFailure::new(field.map(str::to_string), message, code))
    }

    pub(crate) fn fail(&mut self, failure: ValidationFailure) -> FormError {
        tracing::debug!(
            field = failure.key(),
            code = %failure.code,
            message = %failure.message,
            "Form check failed"
        );
        self.errors.push(failure.clone());
        FormError::from(failure)
    }

    /// Run `clean` against this submission.
    ///
    /// The first failing check stops `clean`. Returns the (possibly
    /// backfilled) cleaned data, every recorded failure plus any failure
    /// `clean` built without recording, or the caller mistake that aborted
    /// validation.
    pub fn validate<F>(mut self, clean: F) -> Result<CleanedData, FormError>
    where
        F: FnOnce(&mut Self) -> Result<(), FormError>,
    {
        match clean(&mut self) {
            Ok(()) if self.errors.is_empty() => Ok(self.cleaned_data),
            Ok(()) => Err(FormError::Invalid(self.errors)),
            Err(FormError::Invalid(returned)) => {
                for failure in returned.failures() {
                    if !self.errors.failures().contains(failure) {
                        self.errors.push(failure.clone());
                    }
                }
                Err(FormError::Invalid(self.errors))
            }
            Err(FormError::Misuse(err)) => {
                tracing::warn!(error = %err, "Form validator misused");
                Err(FormError::Misuse(err))
            }
        }
    }
}

impl std::fmt::Debug for FormValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormValidator")
            .field("cleaned_data", &self.cleaned_data)
            .field("instance", &self.instance)
            .field("settings", &self.settings)
            .field("errors", &self.errors)
            .finish_non_exhaustive()
    }
}
