//! Tests for JSON plan documents, test-date parsing and session serialization.

use chrono::{NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use study_planner::{GeneratorConfig, Plan, PlannerError, Test};

const PLAN: &str = r#"{
  "availability": { "1": [[1080, 1260]], "5": [[600, 720]] },
  "tests": [
    { "id": "t1", "subjectId": "s1", "subjectName": "Calculus",
      "testDateIso": "2026-03-23", "targetHours": 2 }
  ],
  "now": "2026-03-16T00:00:00Z"
}"#;

#[test]
fn plan_parses_with_default_config() {
    let plan = Plan::from_json(PLAN).unwrap();

    assert_eq!(plan.tests.len(), 1);
    assert_eq!(plan.tests[0].subject_name, "Calculus");
    assert_eq!(plan.config, GeneratorConfig::default());
    assert_eq!(plan.now, Some(Utc.with_ymd_and_hms(2026, 3, 16, 0, 0, 0).unwrap()));
}

#[test]
fn plan_generates_with_its_own_now() {
    let plan = Plan::from_json(PLAN).unwrap();
    let ignored = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();

    let sessions = plan.generate(ignored).unwrap();

    assert_eq!(sessions.len(), 2);
    assert_eq!(
        sessions[0].start_iso,
        Utc.with_ymd_and_hms(2026, 3, 16, 18, 0, 0).unwrap()
    );
}

#[test]
fn plan_without_now_uses_fallback() {
    let json = r#"{ "availability": { "1": [[1080, 1140]] },
                    "tests": [{ "id": "t1", "testDateIso": "2026-03-16", "targetHours": 1 }] }"#;
    let plan = Plan::from_json(json).unwrap();
    let now = Utc.with_ymd_and_hms(2026, 3, 16, 0, 0, 0).unwrap();

    let sessions = plan.generate(now).unwrap();

    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].subject_name, "");
}

#[test]
fn plan_config_accepts_camel_and_snake_case() {
    let camel = r#"{ "tests": [], "config": { "sessionLengthMinutes": 30, "allowOverlap": true } }"#;
    let snake = r#"{ "tests": [], "config": { "session_length_minutes": 30, "allow_overlap": true } }"#;

    let a = Plan::from_json(camel).unwrap();
    let b = Plan::from_json(snake).unwrap();

    assert_eq!(a.config, b.config);
    assert_eq!(a.config.session_length_minutes, 30);
    assert!(a.config.allow_overlap);
    assert_eq!(a.config.timezone, "UTC");
}

#[test]
fn malformed_plan_is_reported() {
    let err = Plan::from_json("{ not json").unwrap_err();

    assert!(matches!(err, PlannerError::InvalidPlan(_)));
}

#[test]
fn plan_missing_tests_is_reported() {
    assert!(Plan::from_json(r#"{ "availability": {} }"#).is_err());
}

#[test]
fn session_serializes_with_camel_case_fields() {
    let plan = Plan::from_json(PLAN).unwrap();
    let sessions = plan.generate(Utc::now()).unwrap();

    let value = serde_json::to_value(&sessions[0]).unwrap();

    assert_eq!(value["testId"], "t1");
    assert_eq!(value["subjectId"], "s1");
    assert_eq!(value["startIso"], "2026-03-16T18:00:00Z");
    assert_eq!(value["endIso"], "2026-03-16T19:00:00Z");
    assert_eq!(value["minutes"], 60);
    assert_eq!(value["id"], format!("t1-{}", 1_773_684_000_000i64));
}

// ── Test dates ──────────────────────────────────────────────────────────────

fn dated(value: &str) -> Test {
    Test::new("t", "s", "S", value, 1.0)
}

#[test]
fn bare_date_is_its_own_deadline_day() {
    let d = dated("2026-03-23").deadline_date(Tz::UTC).unwrap();

    assert_eq!(d, NaiveDate::from_ymd_opt(2026, 3, 23).unwrap());
}

#[test]
fn rfc3339_instant_is_converted_into_timezone() {
    // 03:00Z on the 23rd is still the 22nd in Los Angeles.
    let t = dated("2026-03-23T03:00:00.000Z");

    assert_eq!(
        t.deadline_date(Tz::UTC).unwrap(),
        NaiveDate::from_ymd_opt(2026, 3, 23).unwrap()
    );
    assert_eq!(
        t.deadline_date(Tz::America__Los_Angeles).unwrap(),
        NaiveDate::from_ymd_opt(2026, 3, 22).unwrap()
    );
}

#[test]
fn naive_datetime_is_taken_as_local() {
    let t = dated("2026-03-23T23:30:00");

    assert_eq!(
        t.deadline_date(Tz::Asia__Tokyo).unwrap(),
        NaiveDate::from_ymd_opt(2026, 3, 23).unwrap()
    );
    assert!(dated("2026-03-23T08:15").deadline_date(Tz::UTC).is_ok());
}

#[test]
fn garbage_dates_fail_validation() {
    for bad in ["", "23/03/2026", "2026-13-01", "tomorrow"] {
        assert!(dated(bad).validate(Tz::UTC).is_err(), "'{}' should be rejected", bad);
    }
}

#[test]
fn target_minutes_rounds_hours() {
    assert_eq!(dated("2026-03-23").target_minutes(), 60);
    assert_eq!(Test::new("t", "s", "S", "2026-03-23", 1.25).target_minutes(), 75);
    assert_eq!(Test::new("t", "s", "S", "2026-03-23", 0.0).target_minutes(), 0);
}

#[test]
fn deadline_instant_keeps_explicit_offsets() {
    let t = dated("2026-11-01T01:50:00-04:00");

    assert_eq!(
        t.deadline_instant(Tz::America__New_York).unwrap(),
        Utc.with_ymd_and_hms(2026, 11, 1, 5, 50, 0).unwrap()
    );
}

#[test]
fn naive_deadline_instant_resolves_across_dst() {
    let ny = Tz::America__New_York;

    // Repeated hour: first occurrence (EDT).
    assert_eq!(
        dated("2026-11-01T01:30:00").deadline_instant(ny).unwrap(),
        Utc.with_ymd_and_hms(2026, 11, 1, 5, 30, 0).unwrap()
    );
    // Skipped hour: read with the EST offset in force before the jump.
    assert_eq!(
        dated("2026-03-08T02:30:00").deadline_instant(ny).unwrap(),
        Utc.with_ymd_and_hms(2026, 3, 8, 7, 30, 0).unwrap()
    );
}
