/// Caller-contract violations.
///
/// These are never shown to the end user. A form wired to the wrong field,
/// a check given mutually exclusive arguments, or a broken settings file is
/// a bug in the host application, not bad input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidatorError {
    #[error("Invalid field validator. The field attr cannot be empty.")]
    MissingField,

    #[error("Expected field name or field value but not both. Got field {field}.")]
    FieldAndValue { field: String },

    #[error("Invalid operator. Expected one of lt, lte, gt, gte, eq. Got {0}.")]
    UnknownOperator(String),

    #[error("Expected a date or datetime for {field}. Got {kind}.")]
    NotTemporal { field: String, kind: &'static str },

    #[error(
        "May not get form field value from instance. \
         This field is already in cleaned data. Got {0}."
    )]
    AlreadyInCleanedData(String),

    #[error("May not get form field value from instance. No instance given. Got {0}.")]
    NoInstance(String),

    #[error("Instance has no field {0}.")]
    MissingInstanceField(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}
