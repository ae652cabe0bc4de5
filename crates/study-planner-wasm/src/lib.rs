//! WASM bindings for study-planner.
//!
//! Exposes schedule generation, per-test progress and session conflict
//! detection to JavaScript via `wasm-bindgen`. All complex types are passed
//! as JSON strings using the same camelCase field names as the plan document.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p study-planner-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir web/src/wasm/ \
//!   target/wasm32-unknown-unknown/release/study_planner_wasm.wasm
//! ```

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use study_planner::{Plan, StudySession, Test};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// JSON helpers
// ---------------------------------------------------------------------------

fn parse_json<T: DeserializeOwned>(json: &str, what: &str) -> Result<T, JsValue> {
    serde_json::from_str(json)
        .map_err(|e| JsValue::from_str(&format!("Invalid {} JSON: {}", what, e)))
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Parse an RFC 3339 instant such as `"2026-03-16T08:30:00+01:00"`.
fn parse_instant(s: &str) -> Result<DateTime<Utc>, JsValue> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| JsValue::from_str(&format!("Invalid datetime '{}': {}", s, e)))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Generate study sessions from a plan document.
///
/// `plan_json` has the shape
/// `{ availability, tests, now?, config? }`. The reference time is, in
/// order, `now_iso` when given, the plan's `now`, then the browser clock.
///
/// Returns a JSON array of sessions with `id`, `subjectId`, `subjectName`,
/// `testId`, `startIso`, `endIso` and `minutes`.
#[wasm_bindgen(js_name = "generateSchedule")]
pub fn generate_schedule(plan_json: &str, now_iso: Option<String>) -> Result<String, JsValue> {
    let mut plan = Plan::from_json(plan_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    if let Some(now) = now_iso.as_deref() {
        plan.now = Some(parse_instant(now)?);
    }

    let sessions = plan
        .generate(Utc::now())
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    to_json(&sessions)
}

/// Scheduled versus requested minutes for each test.
///
/// `tests_json` is an array of tests and `sessions_json` an array of sessions
/// as returned by [`generate_schedule`]. Returns an array of
/// `{ testId, subjectName, targetMinutes, scheduledMinutes, shortfallMinutes,
/// sessionCount }` in test order.
#[wasm_bindgen(js_name = "summarizeSchedule")]
pub fn summarize_schedule(tests_json: &str, sessions_json: &str) -> Result<String, JsValue> {
    let tests: Vec<Test> = parse_json(tests_json, "tests")?;
    let sessions: Vec<StudySession> = parse_json(sessions_json, "sessions")?;

    to_json(&study_planner::summarize(&tests, &sessions))
}

/// Find every pair of sessions whose time ranges overlap.
///
/// Returns an array of `{ sessionA, sessionB, overlapMinutes }`. An empty
/// array means no double booking.
#[wasm_bindgen(js_name = "findSessionConflicts")]
pub fn find_session_conflicts(sessions_json: &str) -> Result<String, JsValue> {
    let sessions: Vec<StudySession> = parse_json(sessions_json, "sessions")?;

    to_json(&study_planner::find_session_conflicts(&sessions))
}
