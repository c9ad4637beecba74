//! Report commands: today, dashboard, analytics, heatmap

use anyhow::{Result, bail};

use habitline::domain::WEEKDAY_NAMES;
use habitline::stats::{
    AnalyticsReport, DashboardSummary, HeatmapReport, StatsQuery, TimeRange, TodaySummary, weeks,
};
use habitline::store::{HabitFilter, HabitStore};

use super::{ViewContext, bar, print_json, short_id};

/// Resolve --range, falling back to the configured default
pub fn range_arg(range: Option<&str>, default: TimeRange) -> Result<TimeRange> {
    match range {
        None => Ok(default),
        Some(r) => match TimeRange::from_str(r) {
            Some(range) => Ok(range),
            None => bail!("Unknown range '{}'. Use week or month", r),
        },
    }
}

fn query(store: &HabitStore, ctx: &ViewContext) -> StatsQuery {
    StatsQuery::new(store.reader(), ctx.user.clone())
}

pub async fn today_command(store: &HabitStore, ctx: &ViewContext) -> Result<()> {
    let summary = query(store, ctx).today(ctx.today())?;
    if ctx.json {
        return print_json(&summary);
    }
    print!("{}", render_today(&summary));
    Ok(())
}

pub async fn dashboard_command(store: &HabitStore, ctx: &ViewContext, filter: HabitFilter) -> Result<()> {
    let summary = query(store, ctx).dashboard(filter, ctx.today())?;
    if ctx.json {
        return print_json(&summary);
    }
    print!("{}", render_dashboard(&summary));
    Ok(())
}

pub async fn analytics_command(store: &HabitStore, ctx: &ViewContext, range: TimeRange) -> Result<()> {
    let report = query(store, ctx).analytics(range, ctx.today())?;
    if ctx.json {
        return print_json(&report);
    }
    print!("{}", render_analytics(&report));
    Ok(())
}

pub async fn heatmap_command(store: &HabitStore, ctx: &ViewContext, id: &str, months: u32) -> Result<()> {
    let report = query(store, ctx).heatmap(id, ctx.today(), months)?;
    if ctx.json {
        return print_json(&report);
    }
    print!("{}", render_heatmap(&report, ctx));
    Ok(())
}

pub fn render_today(summary: &TodaySummary) -> String {
    let mut out = format!("Today ({}, {})\n\n", summary.as_of, WEEKDAY_NAMES[summary.as_of.weekday() as usize]);
    if summary.items.is_empty() {
        out.push_str("Nothing scheduled today.\n");
        return out;
    }

    out.push_str(&format!(
        "{} of {} completed  {} {}%\n\n",
        summary.rate.completed,
        summary.rate.scheduled,
        bar(summary.rate.percentage, 20),
        summary.rate.percentage
    ));
    for item in &summary.items {
        let mark = if item.completed { "✓" } else { " " };
        out.push_str(&format!("  [{}] {}  {}\n", mark, short_id(&item.id), item.name));
    }
    out
}

pub fn render_dashboard(summary: &DashboardSummary) -> String {
    let mut out = format!(
        "Habits: {}   Completed today: {} / {}   Total streak days: {}\n\n",
        summary.total_habits, summary.completed_today, summary.total_habits, summary.total_current_streaks
    );
    if summary.cards.is_empty() {
        out.push_str("No habits yet. Add one with `habitline add \"Drink 2L water\"`.\n");
        return out;
    }

    for card in &summary.cards {
        let today = match (card.completed_today, card.scheduled_today) {
            (true, _) => "✓ Completed today",
            (false, true) => "  Due today",
            (false, false) => "  Not today",
        };
        let archived = if card.archived { " (archived)" } else { "" };
        out.push_str(&format!(
            "{}  {}{}\n    {}  started {}  {}\n    Current: {} days  Best: {} days\n\n",
            short_id(&card.id),
            card.name,
            archived,
            card.schedule.label(),
            card.start_date,
            today,
            card.streak.current,
            card.streak.best,
        ));
    }
    out
}

pub fn render_analytics(report: &AnalyticsReport) -> String {
    let mut out = format!("{}", report.range.label());
    if let Some(start) = report.start {
        out.push_str(&format!(" ({} to {})", start, report.end));
    }
    out.push_str("\n\n");

    out.push_str(&format!(
        "Overall: {}%  ({} completed, {} missed, {} scheduled)\n\n",
        report.overall.percentage,
        report.overall.completed,
        report.missed(),
        report.overall.scheduled
    ));

    out.push_str("Daily completion\n");
    for point in &report.daily {
        out.push_str(&format!(
            "  {} {}  {} {:>3}%\n",
            point.date,
            WEEKDAY_NAMES[point.date.weekday() as usize],
            bar(point.rate.percentage, 20),
            point.rate.percentage
        ));
    }

    out.push_str("\nBy habit\n");
    if report.ranking.is_empty() {
        out.push_str("  (no active habits)\n");
    }
    for row in &report.ranking {
        out.push_str(&format!(
            "  {:<30} {} {:>3}%  {}/{}\n",
            row.name,
            bar(row.rate.percentage, 10),
            row.rate.percentage,
            row.rate.completed,
            row.rate.scheduled
        ));
    }
    out
}

pub fn render_heatmap(report: &HeatmapReport, ctx: &ViewContext) -> String {
    let (filled, empty) = if ctx.dark_mode { ("█", "░") } else { ("■", "·") };
    let grid = weeks(&report.cells, ctx.week_starts_on);

    let mut out = format!(
        "{}  {} to {}  ({} days completed)\n\n",
        report.name,
        report.start,
        report.end,
        report.completed_days()
    );
    for row in 0..7usize {
        let weekday = (row + ctx.week_starts_on as usize) % 7;
        out.push_str(&format!("{} ", WEEKDAY_NAMES[weekday]));
        for week in &grid {
            let glyph = match week[row] {
                Some(cell) if cell.present => filled,
                Some(_) => empty,
                None => " ",
            };
            out.push_str(glyph);
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use habitline::config::Config;
    use habitline::domain::CheckinLog;
    use habitline::stats::{DateKey, trailing_heatmap};

    #[test]
    fn test_range_arg() {
        assert_eq!(range_arg(None, TimeRange::Month).unwrap(), TimeRange::Month);
        assert_eq!(range_arg(Some("week"), TimeRange::Month).unwrap(), TimeRange::Week);
        assert!(range_arg(Some("year"), TimeRange::Week).is_err());
    }

    #[test]
    fn test_render_heatmap_rows() {
        let as_of = DateKey::parse("2025-01-11").unwrap();
        let log = CheckinLog::from_raw([("2025-01-11", true)]).unwrap();
        let cells = trailing_heatmap(&log, as_of, 1).unwrap();
        let report = HeatmapReport {
            habit_id: "h".to_string(),
            name: "Read".to_string(),
            start: cells[0].date,
            end: as_of,
            cells,
        };
        let ctx = ViewContext::new(&Config::default(), None, Some(as_of), false);

        let rendered = render_heatmap(&report, &ctx);
        let lines: Vec<&str> = rendered.lines().collect();
        assert!(lines[0].contains("1 days completed"));
        assert!(lines[2].starts_with("Sun "));
        // 2025-01-11 is a Saturday, the last row ends with the filled glyph
        assert!(lines[8].starts_with("Sat "));
        assert!(lines[8].ends_with('■'));
    }
}
