//! Check-in aggregation engine
//!
//! Derives streaks, completion rates and heatmap series from a habit's
//! schedule and its sparse date-keyed check-in log.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐  snapshot   ┌─────────────────┐
//! │   HabitStore    │ ──────────► │   StatsQuery    │
//! │ (habits.db)     │             │ (views)         │
//! └─────────────────┘             └────────┬────────┘
//!                                          │
//!            ┌──────────────┬──────────────┼──────────────┐
//!            ▼              ▼              ▼              ▼
//!        date_key        streaks       completion      heatmap
//! ```
//!
//! Everything below `StatsQuery` is pure: no I/O, no clock reads. "Today"
//! is always passed in as `as_of`.
//!
//! # Usage
//!
//! ```ignore
//! let query = StatsQuery::new(store.reader(), "local");
//! let report = query.analytics(TimeRange::Week, stats::today())?;
//! println!("{}% overall", report.overall.percentage);
//! ```

mod completion;
mod date_key;
mod heatmap;
mod models;
mod queries;
mod streaks;

pub use completion::{
    CompletionRate, DailyCompletion, RankedHabit, daily_completion, habit_completion, overall_completion,
    range_series, ranked_habit_completion,
};
pub use date_key::{DateKey, date_key, day_difference, days_in_interval, today, trailing_days, weekday};
pub use heatmap::{HeatmapCell, heatmap_series, trailing_heatmap, weeks};
pub use models::{
    AnalyticsReport, DashboardSummary, HabitCard, HabitRanking, HeatmapReport, TimeRange, TodayItem,
    TodaySummary,
};
pub use queries::{StatsQuery, build_analytics, build_dashboard, build_today};
pub use streaks::{StreakInfo, current_streak, longest_streak};
