//! Integration tests for the [`FormValidator::validate`] entry point.
//!
//! Exercises the host calling convention: build from submitted data, run a
//! clean closure, render the aggregate result.

mod common;

use std::sync::Arc;

use assert_matches::assert_matches;
use chrono::{NaiveDate, TimeZone, Utc};
use common::{days, now, validator};
use formcheck_forms::{
    CleanedData, DateCheck, ErrorCode, FieldValue, FixedClock, FormError, FormValidator, Instance,
    LocalZone, RangeCheck, ValidationFailure, ValidatorError, ValidatorSettings,
};
use serde_json::json;

// ---------------------------------------------------------------------------
// Test: validate returns cleaned data or aggregate failures
// ---------------------------------------------------------------------------

#[test]
fn valid_submission_returns_cleaned_data() {
    let form = validator(&[
        ("dob", NaiveDate::from_ymd_opt(1990, 1, 1).unwrap().into()),
        ("report_datetime", now().into()),
        ("weight", 70.into()),
    ]);

    let cleaned = form
        .validate(|f| {
            f.date_is_past(DateCheck::field("dob"))?;
            f.out_of_range_if(&RangeCheck::new("weight", 20.0, 200.0))?;
            Ok(())
        })
        .expect("submission should be valid");

    assert_eq!(cleaned["weight"], FieldValue::Integer(70));
}

/// The first failing check stops the clean closure.
#[test]
fn first_failure_short_circuits() {
    let form = validator(&[
        ("dob", (now() + days(1)).into()),
        ("report_datetime", now().into()),
        ("weight", FieldValue::Null),
    ]);

    let err = form
        .validate(|f| {
            f.date_is_past(DateCheck::field("dob"))?;
            f.out_of_range_if(&RangeCheck::new("weight", 20.0, 200.0))?;
            Ok(())
        })
        .unwrap_err();

    let errors = err.validation_errors().expect("should be invalid");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.codes(), vec![ErrorCode::Invalid]);
    assert!(errors.messages("weight").is_empty());
}

/// Inline rules raised through the validator are collected like built-in
/// checks.
#[test]
fn inline_rule_is_collected() {
    let form = validator(&[("smoker", "no".into()), ("cigarettes_per_day", 5.into())]);

    let err = form
        .validate(|f| {
            if f.get_name("smoker") == Some("no") && f.get("cigarettes_per_day").is_some() {
                return Err(f.raise(
                    Some("cigarettes_per_day"),
                    "This field is not applicable.",
                    ErrorCode::NotApplicable,
                ));
            }
            Ok(())
        })
        .unwrap_err();

    assert_matches!(
        err,
        FormError::Invalid(errors) if errors.codes() == vec![ErrorCode::NotApplicable]
    );
}

/// A failure built without being recorded is still reported alongside the
/// ones already recorded.
#[test]
fn returned_failure_joins_recorded_ones() {
    let form = validator(&[("score", 12.into()), ("visit_code", "1000".into())]);

    let err = form
        .validate(|f| {
            let _ = f.out_of_range_if(&RangeCheck::new("score", 0.0, 10.0));
            Err(ValidationFailure::for_field(
                "visit_code",
                "Unknown visit code.",
                ErrorCode::Invalid,
            )
            .into())
        })
        .unwrap_err();

    let errors = err.validation_errors().unwrap();
    assert_eq!(errors.codes(), vec![ErrorCode::OutOfRange, ErrorCode::Invalid]);
    assert_eq!(errors.messages("visit_code"), vec!["Unknown visit code."]);
}

/// Returning a recorded failure does not report it twice.
#[test]
fn recorded_failure_is_not_duplicated() {
    let form = validator(&[("score", 12.into())]);

    let err = form
        .validate(|f| f.out_of_range_if(&RangeCheck::new("score", 0.0, 10.0)))
        .unwrap_err();

    assert_eq!(err.validation_errors().unwrap().len(), 1);
}

/// Misuse aborts validation on its own channel.
#[test]
fn misuse_is_reported_separately() {
    let form = validator(&[("my_date", now().into()), ("report_datetime", now().into())]);

    let err = form
        .validate(|f| f.date_is_past(DateCheck::field("my_date").with_value(now())))
        .unwrap_err();

    assert_matches!(err, FormError::Misuse(ValidatorError::FieldAndValue { .. }));
    assert!(err.validation_errors().is_none());
}

// ---------------------------------------------------------------------------
// Test: host handover
// ---------------------------------------------------------------------------

/// Hosts can hand over a JSON object and configure the validator from
/// settings.
#[test]
fn json_submission_with_settings() {
    let settings = ValidatorSettings {
        time_zone: LocalZone::parse("+02:00").unwrap(),
        report_datetime_field: "visit_datetime".into(),
        ..ValidatorSettings::default()
    };
    let form = FormValidator::from_json(json!({
        "visit_datetime": "2024-06-15T23:30:00+00:00",
        "next_visit": "2024-06-16",
        "score": "7",
    }))
    .unwrap()
    .with_settings(settings)
    .with_clock(Arc::new(FixedClock(Utc.with_ymd_and_hms(2024, 6, 15, 0, 0, 0).unwrap())));

    // 23:30 UTC is 16 June locally, so the next visit is not after it.
    let err = form
        .validate(|f| {
            f.out_of_range_if(&RangeCheck::new("score", 0.0, 10.0))?;
            f.date_is_future(DateCheck::field("next_visit"))
        })
        .unwrap_err();
    let errors = err.validation_errors().unwrap();
    assert_eq!(errors.messages("next_visit"), vec!["Invalid. Expected a future date."]);

    let rendered = serde_json::to_value(errors).unwrap();
    assert_eq!(rendered[0]["code"], "invalid");
}

/// Values the form did not submit can be backfilled from the instance and
/// then checked.
#[test]
fn change_form_backfills_before_checking() {
    let report = now();
    let instance = Instance::new(
        Some(42),
        [("report_datetime".to_string(), FieldValue::from(report))]
            .into_iter()
            .collect::<CleanedData>(),
    );
    let form = validator(&[("my_date", (report - days(2)).into())]).with_instance(instance);
    assert!(form.is_change_form());

    let cleaned = form
        .validate(|f| {
            f.update_cleaned_data_from_instance("report_datetime")?;
            f.date_is_past(DateCheck::field("my_date"))
        })
        .expect("backfilled reference should validate");
    assert!(cleaned.contains_key("report_datetime"));
}
