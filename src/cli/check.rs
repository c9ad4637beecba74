//! Check command implementation

use anyhow::Result;

use habitline::stats::{self, StreakInfo};
use habitline::store::HabitStore;

use super::{ViewContext, date_arg};

/// Toggle a habit's check-in for one day and show the resulting streak
pub async fn check_command(store: &HabitStore, ctx: &ViewContext, id: &str, date: Option<&str>) -> Result<()> {
    let day = date_arg(ctx, date)?;
    let habit = store.reader().resolve(&ctx.user, id)?;
    let completed = store.recorder().toggle_checkin(&habit.id, day)?;

    let log = store.reader().log(&habit.id)?;
    let streak = StreakInfo::compute(&log, ctx.today());

    if ctx.json {
        return super::print_json(&serde_json::json!({
            "habit_id": habit.id,
            "date": day,
            "completed": completed,
            "streak": streak,
        }));
    }

    let mark = if completed { "✓ Completed" } else { "✗ Not completed" };
    let note = if habit.is_scheduled_on(day) { "" } else { " (not a target day)" };
    println!("{} {} on {}{}", mark, habit.name, day, note);
    println!(
        "  Current streak: {} days  Best: {} days",
        streak.current, streak.best
    );
    if stats::day_difference(ctx.today(), day) > 0 && !streak.is_active() {
        println!("  Today is not checked in yet");
    }
    Ok(())
}
