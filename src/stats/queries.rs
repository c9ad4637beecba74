//! Stats queries for the dashboard, today list, analytics and heatmap views
//!
//! Each query pulls a fresh snapshot from the store and runs the pure
//! aggregation functions over it. Nothing is cached between calls.

use anyhow::Result;
use tracing::debug;

use super::completion::{daily_completion, overall_completion, range_series, ranked_habit_completion};
use super::date_key::DateKey;
use super::heatmap::trailing_heatmap;
use super::models::{
    AnalyticsReport, DashboardSummary, HabitCard, HabitRanking, HeatmapReport, TimeRange, TodayItem,
    TodaySummary,
};
use super::streaks::StreakInfo;
use crate::domain::{HabitSnapshot, Tracked};
use crate::store::{HabitFilter, HabitReader};

/// Query interface for one user's statistics
pub struct StatsQuery {
    reader: HabitReader,
    user: String,
}

impl StatsQuery {
    pub fn new(reader: HabitReader, user: impl Into<String>) -> Self {
        Self {
            reader,
            user: user.into(),
        }
    }

    pub fn dashboard(&self, filter: HabitFilter, as_of: DateKey) -> Result<DashboardSummary> {
        let snapshots = self.reader.snapshot(&self.user, filter)?;
        debug!(user = %self.user, habits = snapshots.len(), "Building dashboard");
        Ok(build_dashboard(&snapshots, as_of))
    }

    pub fn today(&self, as_of: DateKey) -> Result<TodaySummary> {
        let snapshots = self.reader.snapshot(&self.user, HabitFilter::Active)?;
        Ok(build_today(&snapshots, as_of))
    }

    pub fn analytics(&self, range: TimeRange, as_of: DateKey) -> Result<AnalyticsReport> {
        let snapshots = self.reader.snapshot(&self.user, HabitFilter::Active)?;
        debug!(user = %self.user, habits = snapshots.len(), range = range.label(), "Building analytics");
        Ok(build_analytics(&snapshots, range, as_of))
    }

    pub fn heatmap(&self, habit_id: &str, as_of: DateKey, months: u32) -> Result<HeatmapReport> {
        let habit = self.reader.resolve(&self.user, habit_id)?;
        let log = self.reader.log(&habit.id)?;
        let cells = trailing_heatmap(&log, as_of, months)?;
        Ok(HeatmapReport {
            start: cells.first().map(|c| c.date).unwrap_or(as_of),
            end: as_of,
            habit_id: habit.id,
            name: habit.name,
            cells,
        })
    }
}

/// Dashboard totals and cards, in snapshot order
pub fn build_dashboard(snapshots: &[HabitSnapshot], as_of: DateKey) -> DashboardSummary {
    let cards: Vec<HabitCard> = snapshots
        .iter()
        .map(|s| HabitCard {
            id: s.habit.id.clone(),
            name: s.habit.name.clone(),
            schedule: s.habit.schedule,
            start_date: s.habit.start_date,
            archived: s.habit.archived,
            scheduled_today: s.habit.is_scheduled_on(as_of),
            completed_today: s.log.is_completed(as_of),
            streak: StreakInfo::compute(&s.log, as_of),
        })
        .collect();

    DashboardSummary {
        as_of,
        total_habits: cards.len(),
        completed_today: cards.iter().filter(|c| c.completed_today).count(),
        total_current_streaks: cards.iter().map(|c| c.streak.current).sum(),
        cards,
    }
}

/// Habits scheduled on `as_of` with their completion
pub fn build_today(snapshots: &[HabitSnapshot], as_of: DateKey) -> TodaySummary {
    let scheduled: Vec<&HabitSnapshot> = snapshots
        .iter()
        .filter(|s| s.habit.is_scheduled_on(as_of))
        .collect();

    TodaySummary {
        as_of,
        items: scheduled
            .iter()
            .map(|s| TodayItem {
                id: s.habit.id.clone(),
                name: s.habit.name.clone(),
                completed: s.log().is_completed(as_of),
            })
            .collect(),
        rate: daily_completion(&scheduled, as_of),
    }
}

/// Series, ranking and overall completion for the window ending `as_of`
pub fn build_analytics(snapshots: &[HabitSnapshot], range: TimeRange, as_of: DateKey) -> AnalyticsReport {
    let days = range.window(as_of);

    let ranking = ranked_habit_completion(snapshots, &days)
        .into_iter()
        .map(|r| HabitRanking {
            id: r.habit.habit.id.clone(),
            name: r.habit.habit.name.clone(),
            rate: r.rate,
        })
        .collect();

    AnalyticsReport {
        range,
        start: days.first().copied(),
        end: as_of,
        daily: range_series(snapshots, &days),
        ranking,
        overall: overall_completion(snapshots, &days),
    }
}
