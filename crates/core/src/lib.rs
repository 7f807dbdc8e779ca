//! `formcheck-core`: comparison logic shared by form validators.
//!
//! Everything here is pure. The clock and the local timezone are passed in
//! as capabilities rather than read from the process.

pub mod clock;
pub mod codes;
pub mod compare;
pub mod error;
pub mod settings;
pub mod types;
pub mod value;
