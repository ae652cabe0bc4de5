//! A complete generation request as a single JSON document.
//!
//! ```json
//! {
//!   "availability": { "1": [[1080, 1260]] },
//!   "tests": [{ "id": "t1", "subjectId": "s1", "subjectName": "Calculus",
//!               "testDateIso": "2026-03-23", "targetHours": 2 }],
//!   "now": "2026-03-16T00:00:00Z",
//!   "config": { "sessionLengthMinutes": 60 }
//! }
//! ```
//!
//! Everything except `tests` may be omitted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::availability::WeeklyAvailability;
use crate::config::GeneratorConfig;
use crate::error::{PlannerError, Result};
use crate::exam::Test;
use crate::generator::generate_with_config;
use crate::session::StudySession;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    #[serde(default)]
    pub availability: WeeklyAvailability,
    pub tests: Vec<Test>,
    /// Reference instant. When absent the caller's clock is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub now: Option<DateTime<Utc>>,
    #[serde(default)]
    pub config: GeneratorConfig,
}

impl Plan {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| PlannerError::InvalidPlan(e.to_string()))
    }

    /// The plan's own `now`, or `fallback` when it has none.
    pub fn reference_time(&self, fallback: DateTime<Utc>) -> DateTime<Utc> {
        self.now.unwrap_or(fallback)
    }

    /// Run the generator over this plan.
    pub fn generate(&self, fallback_now: DateTime<Utc>) -> Result<Vec<StudySession>> {
        generate_with_config(
            &self.availability,
            &self.tests,
            &self.config,
            self.reference_time(fallback_now),
        )
    }
}
