//! # study-planner
//!
//! Deterministic study-session scheduling for upcoming tests.
//!
//! Given a user's recurring weekly availability and a list of tests, each with
//! a deadline and a study-time budget, the generator proposes fixed-length
//! study sessions inside the availability windows, earliest deadline first.
//! It performs no I/O and never reads the system clock: "now" is an argument,
//! so identical inputs always produce identical sessions (ids included).
//!
//! ## Modules
//!
//! - [`availability`] — weekly windows, `HH:MM` helpers
//! - [`exam`] — tests, deadline parsing
//! - [`generator`] — the placement algorithm
//! - [`session`] — generated sessions and their ids
//! - [`config`] — session length, overlap policy, timezone
//! - [`dst`] — local wall-clock slots to UTC across DST transitions
//! - [`conflict`] — overlapping-session detection
//! - [`summary`] — scheduled versus requested minutes per test
//! - [`plan`] — one-document JSON requests
//! - [`error`] — Error types

pub mod availability;
pub mod config;
pub mod conflict;
pub mod dst;
pub mod error;
pub mod exam;
pub mod generator;
pub mod plan;
pub mod session;
pub mod summary;

pub use availability::{AvailabilityWindow, WeeklyAvailability};
pub use config::GeneratorConfig;
pub use conflict::{find_session_conflicts, SessionConflict};
pub use error::PlannerError;
pub use exam::Test;
pub use generator::{generate, generate_with_config, ScheduleGenerator};
pub use plan::Plan;
pub use session::StudySession;
pub use summary::{summarize, TestProgress};
