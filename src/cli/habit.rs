//! Habit management commands: add, edit, archive, delete, list

use anyhow::{Result, bail};

use habitline::domain::{NewHabit, Schedule};
use habitline::stats::DateKey;
use habitline::store::{HabitFilter, HabitStore};

use super::{ViewContext, print_json, short_id};

/// Resolve the schedule flags of `add`
pub fn schedule_arg(days: Option<&str>, weekdays: bool, weekends: bool) -> Result<Schedule> {
    if weekdays {
        return Ok(Schedule::weekdays());
    }
    if weekends {
        return Ok(Schedule::weekends());
    }
    match days {
        Some(d) => parse_days(d),
        None => Ok(Schedule::every_day()),
    }
}

fn parse_days(days: &str) -> Result<Schedule> {
    match Schedule::parse(days) {
        Some(schedule) if !schedule.is_empty() => Ok(schedule),
        Some(_) => bail!("A habit needs at least one target day"),
        None => bail!("Invalid days '{}'. Use weekday numbers 0-6 (0 = Sunday), e.g. 1,3,5", days),
    }
}

pub async fn add_command(
    store: &HabitStore,
    ctx: &ViewContext,
    name: &str,
    schedule: Schedule,
    start: Option<&str>,
) -> Result<()> {
    let start = match start {
        Some(s) => DateKey::parse(s)?,
        None => ctx.today(),
    };
    let habit = store
        .recorder()
        .add_habit(&ctx.user, NewHabit::new(name).with_schedule(schedule).starting(start))?;

    if ctx.json {
        return print_json(&habit);
    }
    println!("Added {} [{}] ({})", habit.name, short_id(&habit.id), habit.schedule);
    Ok(())
}

pub async fn edit_command(
    store: &HabitStore,
    ctx: &ViewContext,
    id: &str,
    name: Option<&str>,
    days: Option<&str>,
) -> Result<()> {
    if name.is_none() && days.is_none() {
        bail!("Nothing to change. Pass --name and/or --days");
    }
    let habit = store.reader().resolve(&ctx.user, id)?;
    let schedule = days.map(parse_days).transpose()?;
    let habit = store.recorder().update_habit(&habit.id, name, schedule)?;

    if ctx.json {
        return print_json(&habit);
    }
    println!("Updated {} [{}] ({})", habit.name, short_id(&habit.id), habit.schedule);
    Ok(())
}

pub async fn archive_command(store: &HabitStore, ctx: &ViewContext, id: &str) -> Result<()> {
    let habit = store.reader().resolve(&ctx.user, id)?;
    let archived = store.recorder().toggle_archived(&habit.id)?;
    let verb = if archived { "Archived" } else { "Unarchived" };
    println!("{} {}", verb, habit.name);
    Ok(())
}

pub async fn delete_command(store: &HabitStore, ctx: &ViewContext, id: &str, yes: bool) -> Result<()> {
    let habit = store.reader().resolve(&ctx.user, id)?;
    if !yes {
        bail!(
            "Deleting '{}' removes all of its check-ins and cannot be undone. Re-run with --yes.",
            habit.name
        );
    }
    store.recorder().delete_habit(&habit.id)?;
    println!("Deleted {}", habit.name);
    Ok(())
}

pub async fn list_command(store: &HabitStore, ctx: &ViewContext, filter: HabitFilter) -> Result<()> {
    let habits = store.reader().habits(&ctx.user, filter)?;

    if ctx.json {
        return print_json(&habits);
    }
    if habits.is_empty() {
        println!("No habits found. Add one with `habitline add \"Drink 2L water\"`.");
        return Ok(());
    }

    println!("{} habits ({}):\n", filter.label(), habits.len());
    for habit in habits {
        let archived = if habit.archived { "  (archived)" } else { "" };
        println!(
            "  {}  {}  {:<30} since {}{}",
            short_id(&habit.id),
            habit.schedule.label(),
            habit.name,
            habit.start_date,
            archived
        );
    }
    Ok(())
}
