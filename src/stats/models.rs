//! View models assembled from habit snapshots
//!
//! These are what the dashboard, today list, analytics and heatmap views
//! render. All of them serialize to JSON for `--json` output.

use serde::{Deserialize, Serialize};

use super::completion::{CompletionRate, DailyCompletion};
use super::date_key::{DateKey, trailing_days};
use super::heatmap::HeatmapCell;
use super::streaks::StreakInfo;
use crate::domain::Schedule;

/// Analytics window ending today
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    #[default]
    Week,
    Month,
}

impl TimeRange {
    /// Number of days in the window
    pub fn days(&self) -> u32 {
        match self {
            Self::Week => 7,
            Self::Month => 30,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Week => "Last 7 days",
            Self::Month => "Last 30 days",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "w" | "week" | "7" => Some(Self::Week),
            "m" | "month" | "30" => Some(Self::Month),
            _ => None,
        }
    }

    /// The window's days, ascending, ending at `as_of`
    pub fn window(&self, as_of: DateKey) -> Vec<DateKey> {
        trailing_days(as_of, self.days())
    }
}

/// One habit card on the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HabitCard {
    pub id: String,
    pub name: String,
    pub schedule: Schedule,
    pub start_date: DateKey,
    pub archived: bool,
    /// Today is one of the habit's target days
    pub scheduled_today: bool,
    pub completed_today: bool,
    pub streak: StreakInfo,
}

/// Dashboard totals plus a card per habit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub as_of: DateKey,
    pub total_habits: usize,
    /// Habits checked in today, scheduled or not
    pub completed_today: usize,
    /// Sum of every habit's current streak
    pub total_current_streaks: u32,
    pub cards: Vec<HabitCard>,
}

/// A habit on today's list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TodayItem {
    pub id: String,
    pub name: String,
    pub completed: bool,
}

/// Habits scheduled today and how many are done
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TodaySummary {
    pub as_of: DateKey,
    pub items: Vec<TodayItem>,
    pub rate: CompletionRate,
}

/// A habit's completion over the analytics window
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HabitRanking {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub rate: CompletionRate,
}

/// Everything the analytics view shows for one window
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalyticsReport {
    pub range: TimeRange,
    pub start: Option<DateKey>,
    pub end: DateKey,
    pub daily: Vec<DailyCompletion>,
    /// Highest completion first, ties in dashboard order
    pub ranking: Vec<HabitRanking>,
    pub overall: CompletionRate,
}

impl AnalyticsReport {
    /// Scheduled habit-days in the window that were not done
    pub fn missed(&self) -> u32 {
        self.overall.missed()
    }
}

/// Heatmap of one habit over a trailing window
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeatmapReport {
    pub habit_id: String,
    pub name: String,
    pub start: DateKey,
    pub end: DateKey,
    pub cells: Vec<HeatmapCell>,
}

impl HeatmapReport {
    pub fn completed_days(&self) -> usize {
        self.cells.iter().filter(|c| c.present).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_range_window() {
        let as_of = DateKey::parse("2025-01-04").unwrap();
        let week = TimeRange::Week.window(as_of);
        assert_eq!(week.len(), 7);
        assert_eq!(week.first().map(|d| d.to_string()).as_deref(), Some("2024-12-29"));

        let month = TimeRange::Month.window(as_of);
        assert_eq!(month.len(), 30);
        assert_eq!(month.last(), Some(&as_of));
    }

    #[test]
    fn test_time_range_parse() {
        assert_eq!(TimeRange::from_str("Week"), Some(TimeRange::Week));
        assert_eq!(TimeRange::from_str("m"), Some(TimeRange::Month));
        assert_eq!(TimeRange::from_str("year"), None);
        assert_eq!(TimeRange::default(), TimeRange::Week);
    }
}
