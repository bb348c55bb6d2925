// src/config.rs
use std::fs;
use std::path::Path;

use chrono::Duration;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to decode config: {0}")]
    Format(#[from] serde_json::Error),
}

/// Externally supplied scheduler knobs. Everything else about the schedule
/// (the 60 s end lead, the 83 s escalation threshold, the 3 s countdown
/// tick) is fixed policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Seconds between reminder announcements.
    #[serde(
        rename = "reminderAnnounceIntervalSecs",
        default = "default_reminder_interval_secs"
    )]
    pub reminder_announce_interval_secs: i64,
    /// The number the countdown starts counting down from.
    #[serde(rename = "countdownFrom", default = "default_countdown_from")]
    pub countdown_from: u32,
}

fn default_reminder_interval_secs() -> i64 {
    300
}

fn default_countdown_from() -> u32 {
    20
}

impl Default for Config {
    fn default() -> Self {
        Config {
            reminder_announce_interval_secs: default_reminder_interval_secs(),
            countdown_from: default_countdown_from(),
        }
    }
}

impl Config {
    pub fn reminder_interval(&self) -> Duration {
        Duration::seconds(self.reminder_announce_interval_secs)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}
