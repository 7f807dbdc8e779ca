use chrono::format::{Item, StrftimeItems};

use crate::clock::LocalZone;
use crate::error::ValidatorError;

/// Field that date checks compare against when no reference is named.
pub const DEFAULT_REPORT_DATETIME_FIELD: &str = "report_datetime";

/// Validator configuration loaded from environment variables.
///
/// All fields have defaults suitable for tests and local development.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorSettings {
    /// Zone that aware datetimes are converted to before taking the date.
    pub time_zone: LocalZone,
    /// `strftime` format for datetimes quoted in error messages.
    pub datetime_format: String,
    /// `strftime` format for plain dates quoted in error messages.
    pub date_format: String,
    /// Reference field used when a date check names none.
    pub report_datetime_field: String,
}

impl Default for ValidatorSettings {
    fn default() -> Self {
        Self {
            time_zone: LocalZone::Utc,
            datetime_format: "%d %b %Y %H:%M".into(),
            date_format: "%d %b %Y".into(),
            report_datetime_field: DEFAULT_REPORT_DATETIME_FIELD.into(),
        }
    }
}

impl ValidatorSettings {
    /// Load a `.env` file if one exists, then read the environment.
    pub fn load() -> Result<Self, ValidatorError> {
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                           | Default            |
    /// |-----------------------------------|--------------------|
    /// | `FORMCHECK_TIME_ZONE`             | `UTC`              |
    /// | `FORMCHECK_DATETIME_FORMAT`       | `%d %b %Y %H:%M`   |
    /// | `FORMCHECK_DATE_FORMAT`           | `%d %b %Y`         |
    /// | `FORMCHECK_REPORT_DATETIME_FIELD` | `report_datetime`  |
    pub fn from_env() -> Result<Self, ValidatorError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ValidatorError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let time_zone = match lookup("FORMCHECK_TIME_ZONE") {
            Some(raw) => LocalZone::parse(&raw)?,
            None => defaults.time_zone,
        };
        let datetime_format = lookup("FORMCHECK_DATETIME_FORMAT").unwrap_or(defaults.datetime_format);
        let date_format = lookup("FORMCHECK_DATE_FORMAT").unwrap_or(defaults.date_format);
        let report_datetime_field = lookup("FORMCHECK_REPORT_DATETIME_FIELD")
            .map(|s| s.trim().to_string())
            .unwrap_or(defaults.report_datetime_field);

        let settings = Self {
            time_zone,
            datetime_format,
            date_format,
            report_datetime_field,
        };
        settings.check()?;

        tracing::debug!(
            time_zone = %settings.time_zone,
            report_datetime_field = %settings.report_datetime_field,
            "Validator settings loaded"
        );
        Ok(settings)
    }

    fn check(&self) -> Result<(), ValidatorError> {
        if self.report_datetime_field.is_empty() {
            return Err(ValidatorError::Config(
                "FORMCHECK_REPORT_DATETIME_FIELD must not be empty".into(),
            ));
        }
        for (name, format) in [
            ("FORMCHECK_DATETIME_FORMAT", &self.datetime_format),
            ("FORMCHECK_DATE_FORMAT", &self.date_format),
        ] {
            if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
                return Err(ValidatorError::Config(format!(
                    "{name} is not a valid strftime format: {format:?}"
                )));
            }
        }
        Ok(())
    }
}
