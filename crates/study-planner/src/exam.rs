//! Upcoming tests: the deadlines study sessions are scheduled against.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::dst;
use crate::error::{PlannerError, Result};

/// Naive date-time layouts accepted for `test_date_iso`, tried in order.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// An upcoming exam or deadline with a study-time budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Test {
    /// Stable identifier; session ids are derived from it.
    pub id: String,
    #[serde(default)]
    pub subject_id: String,
    #[serde(default)]
    pub subject_name: String,
    /// Deadline. RFC 3339 instant, naive `YYYY-MM-DDTHH:MM[:SS]` local time,
    /// or a bare `YYYY-MM-DD` date. Only the local calendar date bounds
    /// scheduling; the absolute instant decides priority.
    pub test_date_iso: String,
    /// Hours of study wanted before the deadline.
    #[serde(default)]
    pub target_hours: f64,
}

impl Test {
    pub fn new(
        id: impl Into<String>,
        subject_id: impl Into<String>,
        subject_name: impl Into<String>,
        test_date_iso: impl Into<String>,
        target_hours: f64,
    ) -> Self {
        Self {
            id: id.into(),
            subject_id: subject_id.into(),
            subject_name: subject_name.into(),
            test_date_iso: test_date_iso.into(),
            target_hours,
        }
    }

    /// Study budget in whole minutes, `round(target_hours * 60)`.
    ///
    /// Non-finite or negative hours yield 0; [`Test::validate`] rejects them first.
    pub fn target_minutes(&self) -> i64 {
        if !self.target_hours.is_finite() || self.target_hours <= 0.0 {
            return 0;
        }
        (self.target_hours * 60.0).round() as i64
    }

    /// The deadline as a wall-clock time in `tz`.
    ///
    /// Instants with an offset are converted into `tz`; naive values are taken
    /// to already be local to it.
    pub fn deadline_local(&self, tz: Tz) -> Result<NaiveDateTime> {
        let raw = self.test_date_iso.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Ok(dt.with_timezone(&tz).naive_local());
        }
        for format in NAIVE_DATETIME_FORMATS {
            if let Ok(ndt) = NaiveDateTime::parse_from_str(raw, format) {
                return Ok(ndt);
            }
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(|d| d.and_time(NaiveTime::MIN))
            .map_err(|_| PlannerError::InvalidDate {
                test_id: self.id.clone(),
                value: self.test_date_iso.clone(),
            })
    }

    /// The deadline as an absolute instant, used to order tests.
    ///
    /// A repeated local time resolves to its first occurrence. A local time
    /// inside a DST gap is read with the offset in force just before the gap.
    pub fn deadline_instant(&self, tz: Tz) -> Result<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(self.test_date_iso.trim()) {
            return Ok(dt.with_timezone(&Utc));
        }
        let local = self.deadline_local(tz)?;
        Ok(dst::resolve_local(tz, local).unwrap_or_else(|| {
            let before_gap = tz.offset_from_utc_datetime(&(local - Duration::days(1))).fix();
            (local - Duration::seconds(i64::from(before_gap.local_minus_utc()))).and_utc()
        }))
    }

    /// The last calendar day (local to `tz`) on which sessions may be placed.
    pub fn deadline_date(&self, tz: Tz) -> Result<NaiveDate> {
        self.deadline_local(tz).map(|ndt| ndt.date())
    }

    /// Reject negative or non-finite hours and unparseable dates.
    pub fn validate(&self, tz: Tz) -> Result<()> {
        if !self.target_hours.is_finite() || self.target_hours < 0.0 {
            return Err(PlannerError::InvalidTargetHours {
                test_id: self.id.clone(),
                value: self.target_hours,
            });
        }
        self.deadline_local(tz).map(|_| ())
    }
}
