//! Tests for overlapping-session detection.

use chrono::{TimeZone, Utc};
use study_planner::{find_session_conflicts, StudySession};

/// Helper to create a session from hour/minute ranges on a given day.
fn session(test_id: &str, day: u32, start_hour: u32, start_min: u32, end_hour: u32, end_min: u32) -> StudySession {
    let start = Utc.with_ymd_and_hms(2026, 3, day, start_hour, start_min, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2026, 3, day, end_hour, end_min, 0).unwrap();
    StudySession {
        id: format!("{}-{}", test_id, start.timestamp_millis()),
        subject_id: "s".to_string(),
        subject_name: "Subject".to_string(),
        test_id: test_id.to_string(),
        start_iso: start,
        end_iso: end,
        minutes: (end - start).num_minutes() as u32,
    }
}

#[test]
fn two_overlapping_sessions_detected() {
    // A: 09:00-10:00, B: 09:30-10:30 → 30-min overlap
    let sessions = vec![session("a", 16, 9, 0, 10, 0), session("b", 16, 9, 30, 10, 30)];

    let conflicts = find_session_conflicts(&sessions);

    assert_eq!(conflicts.len(), 1, "should detect exactly one conflict");
    assert_eq!(conflicts[0].overlap_minutes, 30);
    assert_eq!(conflicts[0].session_a.test_id, "a");
    assert_eq!(conflicts[0].session_b.test_id, "b");
}

#[test]
fn back_to_back_sessions_are_not_conflicts() {
    let sessions = vec![session("a", 16, 9, 0, 10, 0), session("b", 16, 10, 0, 11, 0)];

    assert!(find_session_conflicts(&sessions).is_empty());
}

#[test]
fn identical_slots_overlap_fully() {
    let sessions = vec![session("a", 16, 18, 0, 19, 0), session("b", 16, 18, 0, 19, 0)];

    let conflicts = find_session_conflicts(&sessions);

    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].overlap_minutes, 60);
}

#[test]
fn same_time_on_different_days_is_not_a_conflict() {
    let sessions = vec![session("a", 16, 18, 0, 19, 0), session("b", 17, 18, 0, 19, 0)];

    assert!(find_session_conflicts(&sessions).is_empty());
}

#[test]
fn every_overlapping_pair_is_reported_once() {
    // Three sessions stacked in the same hour: 3 pairs.
    let sessions = vec![
        session("a", 16, 18, 0, 19, 0),
        session("b", 16, 18, 0, 19, 0),
        session("c", 16, 18, 30, 19, 30),
    ];

    let conflicts = find_session_conflicts(&sessions);

    assert_eq!(conflicts.len(), 3);
    let minutes: Vec<i64> = conflicts.iter().map(|c| c.overlap_minutes).collect();
    assert_eq!(minutes, vec![60, 30, 30]);
}

#[test]
fn empty_and_single_lists_have_no_conflicts() {
    assert!(find_session_conflicts(&[]).is_empty());
    assert!(find_session_conflicts(&[session("a", 16, 9, 0, 10, 0)]).is_empty());
}
