//! Calendar heatmap series
//!
//! Projects a log onto a fixed window of days. The schedule is not consulted,
//! so an empty cell on a day off looks the same as a missed scheduled day.

use serde::Serialize;

use super::date_key::{DateKey, days_in_interval};
use crate::domain::CheckinLog;
use crate::error::Result;

/// One heatmap cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HeatmapCell {
    pub date: DateKey,
    pub present: bool,
}

/// One cell per day in `[window_start, window_end]`, ascending.
pub fn heatmap_series(log: &CheckinLog, window_start: DateKey, window_end: DateKey) -> Result<Vec<HeatmapCell>> {
    Ok(days_in_interval(window_start, window_end)?
        .into_iter()
        .map(|date| HeatmapCell {
            date,
            present: log.is_completed(date),
        })
        .collect())
}

/// Heatmap over the `months` months ending at `as_of`.
///
/// The window starts on the same day-of-month `months` earlier (clamped to
/// month end), so three months back from 2025-05-31 starts at 2025-02-28.
pub fn trailing_heatmap(log: &CheckinLog, as_of: DateKey, months: u32) -> Result<Vec<HeatmapCell>> {
    let start = as_of.sub_months(months).unwrap_or(as_of);
    heatmap_series(log, start, as_of)
}

/// Group cells into calendar weeks for grid rendering.
///
/// Each week has seven slots ordered from `week_starts_on` (0 = Sunday,
/// 1 = Monday); slots outside the window are None.
pub fn weeks(cells: &[HeatmapCell], week_starts_on: u8) -> Vec<[Option<HeatmapCell>; 7]> {
    let mut grid: Vec<[Option<HeatmapCell>; 7]> = Vec::new();
    let start = week_starts_on % 7;

    for cell in cells {
        let slot = ((cell.date.weekday() + 7 - start) % 7) as usize;
        if slot == 0 || grid.is_empty() {
            grid.push([None; 7]);
        }
        if let Some(week) = grid.last_mut() {
            week[slot] = Some(*cell);
        }
    }
    grid
}
