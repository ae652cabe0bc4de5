//! Generator settings.

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::availability::MINUTES_PER_DAY;
use crate::error::{PlannerError, Result};

pub const DEFAULT_SESSION_LENGTH_MINUTES: u32 = 60;
pub const DEFAULT_TIMEZONE: &str = "UTC";

/// Knobs for a single generation run.
///
/// Every field has a default, so `{}` (JSON) or an empty `[generator]`
/// table (TOML) is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratorConfig {
    /// Length of every generated session. Must be in `1..=1440`.
    #[serde(alias = "session_length_minutes")]
    pub session_length_minutes: u32,

    /// When `false`, a slot already claimed by any earlier placement in the
    /// same run is never reused. When `true`, each test is placed against the
    /// raw availability and sessions of different tests may overlap.
    #[serde(alias = "allow_overlap")]
    pub allow_overlap: bool,

    /// IANA timezone that availability windows and test dates are local to.
    pub timezone: String,

    /// Skip slots on the current day that start before `now`.
    #[serde(alias = "skip_elapsed_slots")]
    pub skip_elapsed_slots: bool,

    /// Stop once less than a full session of budget remains, so scheduled
    /// time never exceeds the budget. Off by default: the last session of a
    /// test covers any remainder and may overshoot it.
    #[serde(alias = "cap_at_budget")]
    pub cap_at_budget: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            session_length_minutes: DEFAULT_SESSION_LENGTH_MINUTES,
            allow_overlap: false,
            timezone: DEFAULT_TIMEZONE.to_string(),
            skip_elapsed_slots: false,
            cap_at_budget: false,
        }
    }
}

impl GeneratorConfig {
    pub fn with_session_length(mut self, minutes: u32) -> Self {
        self.session_length_minutes = minutes;
        self
    }

    pub fn with_allow_overlap(mut self, allow: bool) -> Self {
        self.allow_overlap = allow;
        self
    }

    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = timezone.into();
        self
    }

    pub fn with_skip_elapsed_slots(mut self, skip: bool) -> Self {
        self.skip_elapsed_slots = skip;
        self
    }

    pub fn with_cap_at_budget(mut self, cap: bool) -> Self {
        self.cap_at_budget = cap;
        self
    }

    /// Parse the configured timezone.
    pub fn tz(&self) -> Result<Tz> {
        parse_timezone(&self.timezone)
    }

    /// Check the session length and return the parsed timezone.
    pub fn validate(&self) -> Result<Tz> {
        if self.session_length_minutes == 0 || self.session_length_minutes > MINUTES_PER_DAY {
            return Err(PlannerError::InvalidSessionLength(
                self.session_length_minutes,
            ));
        }
        self.tz()
    }
}

/// Parse an IANA timezone name such as `"America/New_York"`.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse()
        .map_err(|_| PlannerError::InvalidTimezone(name.to_string()))
}
