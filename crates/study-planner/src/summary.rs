//! Per-test fulfillment: how much of each study budget made it onto the calendar.
//!
//! Generation never reports a shortfall itself; callers that want to warn
//! about under-fulfilled tests compare budgets against output here.

use std::collections::HashMap;

use serde::Serialize;

use crate::exam::Test;
use crate::session::StudySession;

/// Scheduled versus requested study time for one test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestProgress {
    pub test_id: String,
    pub subject_name: String,
    pub target_minutes: i64,
    pub scheduled_minutes: i64,
    pub shortfall_minutes: i64,
    pub session_count: usize,
}

impl TestProgress {
    pub fn is_fulfilled(&self) -> bool {
        self.shortfall_minutes == 0
    }
}

/// One [`TestProgress`] per test, in the order `tests` are given.
///
/// Sessions whose `test_id` matches no test are ignored.
pub fn summarize(tests: &[Test], sessions: &[StudySession]) -> Vec<TestProgress> {
    let mut totals: HashMap<&str, (i64, usize)> = HashMap::new();
    for session in sessions {
        let entry = totals.entry(session.test_id.as_str()).or_default();
        entry.0 += i64::from(session.minutes);
        entry.1 += 1;
    }

    tests
        .iter()
        .map(|test| {
            let target = test.target_minutes();
            let (scheduled, count) = totals.get(test.id.as_str()).copied().unwrap_or_default();
            TestProgress {
                test_id: test.id.clone(),
                subject_name: test.subject_name.clone(),
                target_minutes: target,
                scheduled_minutes: scheduled,
                shortfall_minutes: (target - scheduled).max(0),
                session_count: count,
            }
        })
        .collect()
}

/// Only the tests whose budget was not fully scheduled.
pub fn under_fulfilled(tests: &[Test], sessions: &[StudySession]) -> Vec<TestProgress> {
    summarize(tests, sessions)
        .into_iter()
        .filter(|p| !p.is_fulfilled())
        .collect()
}
