//! CLI command implementations

pub mod check;
pub mod habit;
pub mod init;
pub mod report;
pub mod watch;

use habitline::config::Config;
use habitline::stats::{self, DateKey};
use habitline::store::HabitFilter;

/// Who is looking and how things should look.
///
/// Built once at start-up and passed to every renderer; the aggregation
/// functions never see it.
#[derive(Debug, Clone)]
pub struct ViewContext {
    pub user: String,
    /// Pinned "today" from --as-of
    pub pinned_today: Option<DateKey>,
    pub dark_mode: bool,
    pub week_starts_on: u8,
    pub json: bool,
}

impl ViewContext {
    pub fn new(config: &Config, user: Option<String>, pinned_today: Option<DateKey>, json: bool) -> Self {
        Self {
            user: user.unwrap_or_else(|| config.settings.user.clone()),
            pinned_today,
            dark_mode: config.settings.dark_mode,
            week_starts_on: config.settings.week_starts_on,
            json,
        }
    }

    /// The day treated as today; re-read on every call unless pinned
    pub fn today(&self) -> DateKey {
        self.pinned_today.unwrap_or_else(stats::today)
    }
}

/// Map --all / --archived flags to a filter
pub fn filter_arg(all: bool, archived: bool) -> HabitFilter {
    match (all, archived) {
        (true, _) => HabitFilter::All,
        (_, true) => HabitFilter::Archived,
        _ => HabitFilter::Active,
    }
}

/// Parse an optional YYYY-MM-DD argument, defaulting to today
pub fn date_arg(ctx: &ViewContext, arg: Option<&str>) -> anyhow::Result<DateKey> {
    match arg {
        Some(s) => Ok(DateKey::parse(s)?),
        None => Ok(ctx.today()),
    }
}

/// Horizontal percentage bar, e.g. "██████░░░░"
pub fn bar(percentage: u32, width: usize) -> String {
    let filled = (percentage.min(100) as usize * width + 50) / 100;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// First eight characters of a habit id
pub fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

/// Print a serializable value as pretty JSON
pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
