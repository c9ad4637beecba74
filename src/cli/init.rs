//! Init command implementation

use anyhow::{Result, bail};
use std::path::Path;
use tracing::info;

/// Default configuration content for habitline init
pub const DEFAULT_CONFIG: &str = r#"# habitline configuration
# =======================
#
# Habits and check-ins live in a SQLite database next to this file unless
# database_path says otherwise.

[settings]
# Whose habits are shown and edited (override per run with --user)
user = "local"

# SQLite file; relative paths are resolved against this file's directory
# database_path = "habits.db"

# Window for `habitline analytics` without --range: "week" (7 days) or "month" (30 days)
default_range = "week"

# How many months back `habitline heatmap` reaches (1-12)
heatmap_months = 3

# First row of the heatmap: 0 = Sunday, 1 = Monday
week_starts_on = 0

# Darker heatmap glyphs for dark terminals
dark_mode = false

# How often `habitline watch` checks for changes made by other processes (ms)
feed_poll_ms = 1000
"#;

/// Write the default config file
pub async fn init_command(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(config_path, DEFAULT_CONFIG)?;

    info!(path = %config_path.display(), "Wrote config");
    println!("Created {}", config_path.display());
    Ok(())
}
