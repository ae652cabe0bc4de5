//! Detect overlapping study sessions.
//!
//! Performs pairwise comparison within one session list. Back-to-back
//! sessions (one ends exactly when the next starts) are NOT conflicts.

use serde::Serialize;

use crate::session::StudySession;

/// Two sessions that occupy some of the same time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionConflict {
    pub session_a: StudySession,
    pub session_b: StudySession,
    pub overlap_minutes: i64,
}

/// Find every overlapping pair in `sessions`.
///
/// Pairs are reported once, in input order (`session_a` precedes `session_b`).
/// Two sessions overlap when `a.start < b.end && b.start < a.end`; the overlap
/// is `min(a.end, b.end) - max(a.start, b.start)`.
pub fn find_session_conflicts(sessions: &[StudySession]) -> Vec<SessionConflict> {
    let mut conflicts = Vec::new();

    for (i, a) in sessions.iter().enumerate() {
        for b in &sessions[i + 1..] {
            if a.overlaps(b) {
                let overlap_start = a.start_iso.max(b.start_iso);
                let overlap_end = a.end_iso.min(b.end_iso);

                conflicts.push(SessionConflict {
                    session_a: a.clone(),
                    session_b: b.clone(),
                    overlap_minutes: (overlap_end - overlap_start).num_minutes(),
                });
            }
        }
    }

    conflicts
}
