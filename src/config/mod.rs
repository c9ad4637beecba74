//! Configuration loading and management

mod io;
mod settings;

pub use settings::Settings;

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// General settings
    #[serde(default)]
    pub settings: Settings,
}

impl Config {
    /// Check values that parse fine but make no sense
    pub fn validate(&self) -> Result<()> {
        let s = &self.settings;
        if s.user.trim().is_empty() {
            bail!("settings.user must not be empty");
        }
        if s.week_starts_on > 1 {
            bail!("settings.week_starts_on must be 0 (Sunday) or 1 (Monday), got {}", s.week_starts_on);
        }
        if !(1..=12).contains(&s.heatmap_months) {
            bail!("settings.heatmap_months must be between 1 and 12, got {}", s.heatmap_months);
        }
        if s.feed_poll_ms < 100 {
            bail!("settings.feed_poll_ms must be at least 100, got {}", s.feed_poll_ms);
        }
        Ok(())
    }

    /// The database file to open
    pub fn database_path(&self) -> PathBuf {
        self.settings
            .database_path
            .clone()
            .unwrap_or_else(|| Self::global_config_dir().join("habits.db"))
    }

    /// Resolve a database path relative to the config file it came from
    pub fn resolve_relative_to(&mut self, config_path: &Path) {
        if let (Some(db), Some(dir)) = (&self.settings.database_path, config_path.parent()) {
            if db.is_relative() {
                self.settings.database_path = Some(dir.join(db));
            }
        }
    }
}
