//! Pure comparison logic: no form state, no clock.

pub mod date;
pub mod range;

pub use date::{compare_dates, local_date, DateOp};
pub use range::{numeric_value, within_range, NumericValue, RangeBounds};
