//! `formcheck-forms`: the validator a host builds for each form submission.
//!
//! Construct a [`FormValidator`] from the cleaned submission (and the record
//! being edited, if any), run checks inside [`FormValidator::validate`], and
//! render the returned [`ValidationErrors`] back to the user.

pub mod dates;
pub mod failure;
pub mod form;
pub mod range;

pub use dates::DateCheck;
pub use failure::{FormError, ValidationErrors, ValidationFailure, NON_FIELD_ERRORS};
pub use form::{FormValidator, Instance};
pub use range::RangeCheck;

pub use formcheck_core::clock::{Clock, FixedClock, LocalZone, SystemClock};
pub use formcheck_core::codes::ErrorCode;
pub use formcheck_core::compare::{DateOp, RangeBounds};
pub use formcheck_core::error::ValidatorError;
pub use formcheck_core::settings::ValidatorSettings;
pub use formcheck_core::types::CleanedData;
pub use formcheck_core::value::FieldValue;
