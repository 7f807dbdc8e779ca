//! Symbolic error codes attached to every validation failure.

use serde::{Deserialize, Serialize};

/// The fixed vocabulary of validation error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Applicable,
    NotApplicable,
    Required,
    NotRequired,
    Invalid,
    OutOfRange,
}

impl ErrorCode {
    /// Stable string representation matching serde's `rename_all = "snake_case"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Applicable => "applicable",
            Self::NotApplicable => "not_applicable",
            Self::Required => "required",
            Self::NotRequired => "not_required",
            Self::Invalid => "invalid",
            Self::OutOfRange => "out_of_range",
        }
    }

    /// Parse a code string. Returns `None` for unknown values.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "applicable" => Some(Self::Applicable),
            "not_applicable" => Some(Self::NotApplicable),
            "required" => Some(Self::Required),
            "not_required" => Some(Self::NotRequired),
            "invalid" => Some(Self::Invalid),
            "out_of_range" => Some(Self::OutOfRange),
            _ => None,
        }
    }

    /// All valid code values.
    pub const ALL: &'static [&'static str] = &[
        "applicable",
        "not_applicable",
        "required",
        "not_required",
        "invalid",
        "out_of_range",
    ];
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
