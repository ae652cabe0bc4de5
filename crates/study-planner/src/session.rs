//! Generated study sessions.

use chrono::{DateTime, NaiveDate, Timelike, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::exam::Test;

/// One fixed-length study block assigned to a concrete instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudySession {
    /// `"{test_id}-{start_epoch_millis}"`; identical inputs regenerate identical ids.
    pub id: String,
    pub subject_id: String,
    pub subject_name: String,
    pub test_id: String,
    pub start_iso: DateTime<Utc>,
    pub end_iso: DateTime<Utc>,
    pub minutes: u32,
}

impl StudySession {
    pub(crate) fn for_test(test: &Test, start: DateTime<Utc>, end: DateTime<Utc>, minutes: u32) -> Self {
        Self {
            id: session_id(&test.id, start),
            subject_id: test.subject_id.clone(),
            subject_name: test.subject_name.clone(),
            test_id: test.id.clone(),
            start_iso: start,
            end_iso: end,
            minutes,
        }
    }

    /// Half-open overlap test; back-to-back sessions do not overlap.
    pub fn overlaps(&self, other: &StudySession) -> bool {
        self.start_iso < other.end_iso && other.start_iso < self.end_iso
    }

    /// Local date plus start/end minute offsets from that date's midnight in `tz`.
    ///
    /// The end offset is `start + minutes`, so a session ending at midnight
    /// reports 1440 rather than 0.
    pub fn local_span(&self, tz: Tz) -> (NaiveDate, u32, u32) {
        let local = self.start_iso.with_timezone(&tz);
        let start = local.hour() * 60 + local.minute();
        (local.date_naive(), start, start + self.minutes)
    }
}

/// Deterministic session id for a test and start instant.
pub fn session_id(test_id: &str, start: DateTime<Utc>) -> String {
    format!("{}-{}", test_id, start.timestamp_millis())
}
