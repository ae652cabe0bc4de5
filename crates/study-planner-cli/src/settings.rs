//! Generator settings from a TOML file and command-line flags.
//!
//! ```toml
//! [generator]
//! session_length_minutes = 45
//! allow_overlap = false
//! timezone = "Europe/London"
//! skip_elapsed_slots = true
//! cap_at_budget = false
//! ```
//!
//! Every key is optional. Settings are layered over the plan's own `config`:
//! the file first, then command-line flags.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use study_planner::GeneratorConfig;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SettingsFile {
    #[serde(default)]
    pub generator: GeneratorSettings,
}

impl SettingsFile {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}

/// A partial [`GeneratorConfig`]: only the fields that are set get applied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorSettings {
    pub session_length_minutes: Option<u32>,
    pub allow_overlap: Option<bool>,
    pub timezone: Option<String>,
    pub skip_elapsed_slots: Option<bool>,
    pub cap_at_budget: Option<bool>,
}

impl GeneratorSettings {
    pub fn apply(&self, config: &mut GeneratorConfig) {
        if let Some(minutes) = self.session_length_minutes {
            config.session_length_minutes = minutes;
        }
        if let Some(allow) = self.allow_overlap {
            config.allow_overlap = allow;
        }
        if let Some(tz) = &self.timezone {
            config.timezone = tz.clone();
        }
        if let Some(skip) = self.skip_elapsed_slots {
            config.skip_elapsed_slots = skip;
        }
        if let Some(cap) = self.cap_at_budget {
            config.cap_at_budget = cap;
        }
    }
}
