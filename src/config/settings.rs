//! Settings configuration types

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::stats::TimeRange;

/// General settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Whose habits the CLI shows and edits
    #[serde(default = "default_user")]
    pub user: String,

    /// SQLite database file (defaults to ~/.habitline/habits.db)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_path: Option<PathBuf>,

    /// Window for `analytics` when no --range is given
    #[serde(default)]
    pub default_range: TimeRange,

    /// How many months back the heatmap reaches
    #[serde(default = "default_heatmap_months")]
    pub heatmap_months: u32,

    /// First row of the heatmap grid: 0 = Sunday, 1 = Monday
    #[serde(default)]
    pub week_starts_on: u8,

    /// Use the dark heatmap palette
    #[serde(default)]
    pub dark_mode: bool,

    /// How often `watch` polls the database for changes from other processes
    #[serde(default = "default_feed_poll_ms")]
    pub feed_poll_ms: u64,
}

fn default_user() -> String {
    "local".to_string()
}

fn default_heatmap_months() -> u32 {
    3
}

fn default_feed_poll_ms() -> u64 {
    1000
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            user: default_user(),
            database_path: None,
            default_range: TimeRange::default(),
            heatmap_months: default_heatmap_months(),
            week_starts_on: 0,
            dark_mode: false,
            feed_poll_ms: default_feed_poll_ms(),
        }
    }
}
