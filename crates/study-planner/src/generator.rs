//! Greedy earliest-deadline-first placement of study sessions.
//!
//! Tests are processed in ascending deadline order. For each one, calendar
//! days from today through the deadline day are walked in order; on each day
//! the weekday's windows are sliced back-to-back into fixed-length sessions
//! until the test's budget is spent. A test whose budget cannot be met before
//! its deadline simply receives fewer sessions.
//!
//! Generation is a pure function of its inputs: the caller supplies `now`.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use chrono_tz::Tz;
use tracing::{debug, trace};

use crate::availability::WeeklyAvailability;
use crate::config::GeneratorConfig;
use crate::dst;
use crate::error::Result;
use crate::exam::Test;
use crate::session::StudySession;

/// Generate sessions with the default configuration (60-minute sessions,
/// no overlap, UTC).
pub fn generate(
    availability: &WeeklyAvailability,
    tests: &[Test],
    now: DateTime<Utc>,
) -> Result<Vec<StudySession>> {
    generate_with_config(availability, tests, &GeneratorConfig::default(), now)
}

/// Generate sessions for `tests` inside `availability`.
///
/// All inputs are validated before any placement; on error nothing is
/// returned.
///
/// # Errors
/// Returns a [`crate::PlannerError`] for a zero or over-long session length,
/// an unknown timezone, a malformed window or weekday key, negative or
/// non-finite target hours, or an unparseable test date.
pub fn generate_with_config(
    availability: &WeeklyAvailability,
    tests: &[Test],
    config: &GeneratorConfig,
    now: DateTime<Utc>,
) -> Result<Vec<StudySession>> {
    ScheduleGenerator::new(config.clone())?.generate(availability, tests, now)
}

/// A validated generator configuration, reusable across runs.
#[derive(Debug, Clone)]
pub struct ScheduleGenerator {
    config: GeneratorConfig,
    tz: Tz,
}

impl ScheduleGenerator {
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        let tz = config.validate()?;
        Ok(Self { config, tz })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn generate(
        &self,
        availability: &WeeklyAvailability,
        tests: &[Test],
        now: DateTime<Utc>,
    ) -> Result<Vec<StudySession>> {
        availability.validate()?;

        let mut queue = Vec::with_capacity(tests.len());
        for test in tests {
            test.validate(self.tz)?;
            let instant = test.deadline_instant(self.tz)?;
            queue.push((instant, test.deadline_date(self.tz)?, test));
        }
        // sort_by_key is stable: equal deadlines keep input order.
        queue.sort_by_key(|&(instant, _, _)| instant);

        let today = now.with_timezone(&self.tz).date_naive();
        let mut placement = Placement {
            availability,
            tz: self.tz,
            length: self.config.session_length_minutes,
            earliest: self.config.skip_elapsed_slots.then_some(now),
            cap_at_budget: self.config.cap_at_budget,
            claims: (!self.config.allow_overlap).then(ClaimLedger::default),
        };

        let mut sessions = Vec::new();
        for (_, deadline, test) in queue {
            let before = sessions.len();
            let shortfall = placement.place(test, today, deadline, &mut sessions);
            let placed = sessions.len() - before;
            let placed_minutes = placed as u64 * u64::from(self.config.session_length_minutes);
            debug!(
                test_id = %test.id,
                deadline = %deadline,
                sessions = placed,
                minutes = placed_minutes,
                "placed test"
            );
            if shortfall > 0 {
                debug!(
                    test_id = %test.id,
                    shortfall_minutes = shortfall,
                    "test under-fulfilled before its deadline"
                );
            }
        }
        Ok(sessions)
    }
}

struct Placement<'a> {
    availability: &'a WeeklyAvailability,
    tz: Tz,
    length: u32,
    earliest: Option<DateTime<Utc>>,
    cap_at_budget: bool,
    /// `None` when overlapping sessions are allowed.
    claims: Option<ClaimLedger>,
}

impl Placement<'_> {
    /// Whether another session should be placed with `remaining` minutes left.
    fn wants_more(&self, remaining: i64) -> bool {
        if self.cap_at_budget {
            remaining >= i64::from(self.length)
        } else {
            remaining > 0
        }
    }

    /// Place sessions for one test, returning the minutes left unplaced.
    fn place(
        &mut self,
        test: &Test,
        first_day: NaiveDate,
        last_day: NaiveDate,
        out: &mut Vec<StudySession>,
    ) -> i64 {
        let mut remaining = test.target_minutes();
        if !self.wants_more(remaining) || self.availability.is_empty() {
            return remaining.max(0);
        }

        let availability = self.availability;
        let length = self.length;
        let mut day = first_day;
        while day <= last_day && self.wants_more(remaining) {
            for window in availability.windows_on(day.weekday()) {
                let mut cursor = window.start_minute;
                while self.wants_more(remaining) && cursor + length <= window.end_minute {
                    if let Some(claimed_until) = self
                        .claims
                        .as_ref()
                        .and_then(|c| c.blocked_until(day, cursor, cursor + length))
                    {
                        cursor = claimed_until;
                        continue;
                    }

                    let Some((start, end)) = dst::resolve_span(self.tz, day, cursor, length) else {
                        trace!(%day, minute = cursor, "slot distorted by DST transition, skipped");
                        cursor += length;
                        continue;
                    };
                    if self.earliest.is_some_and(|now| start < now) {
                        cursor += length;
                        continue;
                    }

                    out.push(StudySession::for_test(test, start, end, length));
                    if let Some(claims) = self.claims.as_mut() {
                        claims.claim(day, cursor, cursor + length);
                    }
                    remaining -= i64::from(length);
                    cursor += length;
                }
                if !self.wants_more(remaining) {
                    break;
                }
            }

            match day.succ_opt() {
                Some(next) => day = next,
                None => break,
            }
        }
        remaining.max(0)
    }
}

/// Minute ranges already handed out, per local calendar day.
#[derive(Debug, Default)]
struct ClaimLedger {
    days: BTreeMap<NaiveDate, Vec<(u32, u32)>>,
}

impl ClaimLedger {
    /// If `[start, end)` on `day` overlaps any claim, the latest end among
    /// the overlapping claims.
    fn blocked_until(&self, day: NaiveDate, start: u32, end: u32) -> Option<u32> {
        self.days
            .get(&day)?
            .iter()
            .filter(|&&(s, e)| s < end && start < e)
            .map(|&(_, e)| e)
            .max()
    }

    fn claim(&mut self, day: NaiveDate, start: u32, end: u32) {
        self.days.entry(day).or_default().push((start, end));
    }
}
