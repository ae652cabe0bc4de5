//! Recurring weekly availability: the windows a user is willing to study in.
//!
//! A window is a half-open `[start_minute, end_minute)` range of minutes since
//! local midnight. Windows never cross midnight; `1440` is the largest valid
//! end offset and means "until the end of the day".
//!
//! Availability is keyed by weekday index, 0 = Sunday through 6 = Saturday.
//! A missing key is the same as an empty list.

use std::collections::BTreeMap;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};

/// Minutes in one calendar day.
pub const MINUTES_PER_DAY: u32 = 1440;

/// One recurring study window within a single day.
///
/// Serialized as a two-element array `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(u32, u32)", into = "(u32, u32)")]
pub struct AvailabilityWindow {
    /// Minutes since local midnight at which the window opens (inclusive).
    pub start_minute: u32,
    /// Minutes since local midnight at which the window closes (exclusive).
    pub end_minute: u32,
}

impl AvailabilityWindow {
    /// Build a window, rejecting empty, inverted or cross-midnight ranges.
    pub fn new(start_minute: u32, end_minute: u32) -> Result<Self> {
        let window = Self {
            start_minute,
            end_minute,
        };
        window.validate()?;
        Ok(window)
    }

    /// Build a window from two `HH:MM` strings, e.g. `("18:00", "21:00")`.
    pub fn from_hhmm(start: &str, end: &str) -> Result<Self> {
        Self::new(parse_hhmm(start)?, parse_hhmm(end)?)
    }

    /// Check `start_minute < end_minute <= 1440`.
    pub fn validate(&self) -> Result<()> {
        if self.start_minute >= self.end_minute {
            return Err(PlannerError::InvalidWindow(format!(
                "[{}, {}): start must be before end",
                self.start_minute, self.end_minute
            )));
        }
        if self.end_minute > MINUTES_PER_DAY {
            return Err(PlannerError::InvalidWindow(format!(
                "[{}, {}): windows may not cross midnight",
                self.start_minute, self.end_minute
            )));
        }
        Ok(())
    }

    pub fn duration_minutes(&self) -> u32 {
        self.end_minute.saturating_sub(self.start_minute)
    }

    /// Whether `[start, end)` lies entirely inside this window.
    pub fn contains(&self, start: u32, end: u32) -> bool {
        start >= self.start_minute && end <= self.end_minute && start < end
    }
}

impl From<(u32, u32)> for AvailabilityWindow {
    fn from((start_minute, end_minute): (u32, u32)) -> Self {
        Self {
            start_minute,
            end_minute,
        }
    }
}

impl From<AvailabilityWindow> for (u32, u32) {
    fn from(w: AvailabilityWindow) -> Self {
        (w.start_minute, w.end_minute)
    }
}

/// Parse `HH:MM` into minutes since midnight. `24:00` is accepted as 1440.
pub fn parse_hhmm(s: &str) -> Result<u32> {
    let invalid = || PlannerError::InvalidWindow(format!("'{}' is not a HH:MM time", s));

    let (h, m) = s.trim().split_once(':').ok_or_else(invalid)?;
    let hours: u32 = h.parse().map_err(|_| invalid())?;
    let minutes: u32 = m.parse().map_err(|_| invalid())?;
    if minutes >= 60 {
        return Err(invalid());
    }

    let total = hours
        .checked_mul(60)
        .and_then(|h| h.checked_add(minutes))
        .ok_or_else(invalid)?;
    if total > MINUTES_PER_DAY {
        return Err(invalid());
    }
    Ok(total)
}

/// Format minutes since midnight as zero-padded `HH:MM`.
pub fn format_hhmm(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Weekly recurring availability, keyed by weekday index (0 = Sunday).
///
/// Serialized transparently as `{ "1": [[1080, 1260]], ... }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeeklyAvailability {
    days: BTreeMap<u8, Vec<AvailabilityWindow>>,
}

impl WeeklyAvailability {
    pub fn new() -> Self {
        Self::default()
    }

    /// Windows for a weekday, in their declared order.
    pub fn windows_on(&self, weekday: Weekday) -> &[AvailabilityWindow] {
        self.windows_for_index(weekday.num_days_from_sunday() as u8)
    }

    /// Windows for a raw weekday index. Unknown indices have no windows.
    pub fn windows_for_index(&self, day: u8) -> &[AvailabilityWindow] {
        self.days.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Replace every window on `day`.
    pub fn set_day(&mut self, day: Weekday, windows: Vec<AvailabilityWindow>) {
        let key = day.num_days_from_sunday() as u8;
        if windows.is_empty() {
            self.days.remove(&key);
        } else {
            self.days.insert(key, windows);
        }
    }

    /// Append a window to `day`, keeping earlier windows first.
    pub fn add_window(&mut self, day: Weekday, window: AvailabilityWindow) {
        self.days
            .entry(day.num_days_from_sunday() as u8)
            .or_default()
            .push(window);
    }

    /// Remove the window at `index` on `day`, returning it if present.
    pub fn remove_window(&mut self, day: Weekday, index: usize) -> Option<AvailabilityWindow> {
        let key = day.num_days_from_sunday() as u8;
        let windows = self.days.get_mut(&key)?;
        if index >= windows.len() {
            return None;
        }
        let removed = windows.remove(index);
        if windows.is_empty() {
            self.days.remove(&key);
        }
        Some(removed)
    }

    /// Sum of window lengths across the week. Overlapping windows count twice.
    pub fn total_weekly_minutes(&self) -> u32 {
        self.days
            .values()
            .flatten()
            .map(AvailabilityWindow::duration_minutes)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.days.values().all(Vec::is_empty)
    }

    /// Reject weekday keys outside 0..=6 and malformed windows.
    pub fn validate(&self) -> Result<()> {
        for (&day, windows) in &self.days {
            if day > 6 {
                return Err(PlannerError::InvalidWeekday(day));
            }
            for window in windows {
                window.validate()?;
            }
        }
        Ok(())
    }
}

impl From<BTreeMap<u8, Vec<AvailabilityWindow>>> for WeeklyAvailability {
    fn from(days: BTreeMap<u8, Vec<AvailabilityWindow>>) -> Self {
        Self { days }
    }
}

impl FromIterator<(u8, Vec<AvailabilityWindow>)> for WeeklyAvailability {
    fn from_iter<I: IntoIterator<Item = (u8, Vec<AvailabilityWindow>)>>(iter: I) -> Self {
        Self {
            days: iter.into_iter().collect(),
        }
    }
}
