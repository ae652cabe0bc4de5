//! Mapping local wall-clock slots onto absolute instants across DST transitions.
//!
//! A slot is usable only when its local start exists and the UTC offset stays
//! the same for the whole slot. Slots starting inside a spring-forward gap, or
//! running across any offset change, are rejected rather than stretched or
//! shrunk. Ambiguous local times (the repeated fall-back hour) resolve to the
//! earlier instant.
//!
//! Under these rules accepted slots map to absolute time by a constant shift,
//! so slots that are disjoint on the wall clock stay disjoint in UTC.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;

/// Resolve a local wall-clock time in `tz` to UTC.
///
/// Returns `None` for times that fall in a DST gap.
pub fn resolve_local(tz: Tz, local: NaiveDateTime) -> Option<DateTime<Utc>> {
    tz.from_local_datetime(&local)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Resolve the slot starting `start_minute` minutes after local midnight of
/// `date` and lasting `length_minutes` (at least one).
pub fn resolve_span(
    tz: Tz,
    date: NaiveDate,
    start_minute: u32,
    length_minutes: u32,
) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let length = Duration::minutes(i64::from(length_minutes));
    let local_start = date.and_time(NaiveTime::MIN) + Duration::minutes(i64::from(start_minute));

    let start = tz.from_local_datetime(&local_start).earliest()?;
    let last_minute = (start + length - Duration::minutes(1)).with_timezone(&tz);
    if start.offset().fix() != last_minute.offset().fix() {
        return None;
    }

    let start = start.with_timezone(&Utc);
    Some((start, start + length))
}

/// The first instant of `date` in `tz`.
///
/// Falls back to the first valid hour when midnight itself is skipped.
pub fn start_of_day(tz: Tz, date: NaiveDate) -> Option<DateTime<Utc>> {
    (0..=2)
        .map(|h| date.and_time(NaiveTime::MIN) + Duration::hours(h))
        .find_map(|local| resolve_local(tz, local))
}
