//! Shared fixtures for form validator integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};
use formcheck_forms::{CleanedData, FieldValue, FixedClock, FormValidator, LocalZone, ValidatorSettings};

/// Install a test subscriber once; honours `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A fixed "now": 2024-06-15 10:00 UTC.
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 10, 0, 0).unwrap()
}

pub fn days(n: i64) -> Duration {
    Duration::days(n)
}

/// UTC+02:00, the offset used for the "local" zone in these tests.
pub fn gaborone() -> FixedOffset {
    FixedOffset::east_opt(2 * 3600).unwrap()
}

pub fn data(pairs: &[(&str, FieldValue)]) -> CleanedData {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

/// A validator with a fixed clock and a UTC+02:00 local zone.
pub fn validator(pairs: &[(&str, FieldValue)]) -> FormValidator {
    init_tracing();
    let settings = ValidatorSettings {
        time_zone: LocalZone::Fixed(gaborone()),
        ..ValidatorSettings::default()
    };
    FormValidator::new(data(pairs))
        .with_settings(settings)
        .with_clock(Arc::new(FixedClock(now())))
}
