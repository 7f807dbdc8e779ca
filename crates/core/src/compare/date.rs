//! Relational comparison of calendar dates.
//!
//! Both sides are reduced to a local calendar date before comparing, so two
//! aware datetimes with different offsets that fall on the same local day
//! compare equal.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::clock::LocalZone;
use crate::error::ValidatorError;
use crate::value::FieldValue;

/// Relation that must hold between a field date and its reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateOp {
    Lt,
    Lte,
    Gt,
    Gte,
    Eq,
}

impl DateOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lt => "lt",
            Self::Lte => "lte",
            Self::Gt => "gt",
            Self::Gte => "gte",
            Self::Eq => "eq",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::Eq => "==",
        }
    }

    /// Whether `field <op> reference` holds.
    ///
    /// | op    | holds when               |
    /// |-------|--------------------------|
    /// | `lt`  | `field <  reference`     |
    /// | `lte` | `field <= reference`     |
    /// | `gt`  | `field >  reference`     |
    /// | `gte` | `field >= reference`     |
    /// | `eq`  | `field == reference`     |
    pub fn holds<T: PartialOrd>(&self, field: &T, reference: &T) -> bool {
        match self {
            Self::Lt => field < reference,
            Self::Lte => field <= reference,
            Self::Gt => field > reference,
            Self::Gte => field >= reference,
            Self::Eq => field == reference,
        }
    }
}

impl std::str::FromStr for DateOp {
    type Err = ValidatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lt" | "<" => Ok(Self::Lt),
            "lte" | "<=" => Ok(Self::Lte),
            "gt" | ">" => Ok(Self::Gt),
            "gte" | ">=" => Ok(Self::Gte),
            "eq" | "==" => Ok(Self::Eq),
            other => Err(ValidatorError::UnknownOperator(other.to_string())),
        }
    }
}

impl std::fmt::Display for DateOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Compare two calendar dates.
pub fn compare_dates(op: DateOp, field: NaiveDate, reference: NaiveDate) -> bool {
    op.holds(&field, &reference)
}

/// Reduce a value to its local calendar date.
///
/// Returns `Ok(None)` when the value is absent or blank. Aware datetimes are
/// converted to `zone` first; naive datetimes are taken as already local.
/// `label` names the value in the error raised for non-temporal input.
pub fn local_date(
    label: &str,
    value: Option<&FieldValue>,
    zone: &LocalZone,
) -> Result<Option<NaiveDate>, ValidatorError> {
    let value = match value {
        Some(v) if !v.is_blank() => v,
        _ => return Ok(None),
    };
    match value {
        FieldValue::Date(d) => Ok(Some(*d)),
        FieldValue::NaiveDateTime(dt) => Ok(Some(dt.date())),
        FieldValue::DateTime(dt) => Ok(Some(zone.to_local(dt).date())),
        other => Err(ValidatorError::NotTemporal {
            field: label.to_string(),
            kind: other.kind(),
        }),
    }
}
