//! End-to-end tests: habits recorded in the store, read back through StatsQuery

mod common;

use habitline::domain::Schedule;
use habitline::stats::{CompletionRate, StatsQuery, StreakInfo, TimeRange};
use habitline::store::HabitFilter;

use common::{USER, add_habit, check_days, create_test_store, key};

#[test]
fn test_dashboard_from_store() {
    let (_dir, store) = create_test_store();
    let read = add_habit(&store, "Read", Schedule::every_day());
    let run = add_habit(&store, "Run", Schedule::weekends());
    check_days(&store, &read, &["2025-01-01", "2025-01-02", "2025-01-03", "2025-01-05", "2025-01-06"]);
    check_days(&store, &run, &["2025-01-04"]);

    let query = StatsQuery::new(store.reader(), USER);
    let summary = query.dashboard(HabitFilter::Active, key("2025-01-06")).unwrap();

    assert_eq!(summary.total_habits, 2);
    assert_eq!(summary.completed_today, 1);
    // Newest first: Run, then Read
    assert_eq!(summary.cards[0].name, "Run");
    assert_eq!(summary.cards[0].streak, StreakInfo { current: 0, best: 1 });
    assert_eq!(summary.cards[1].streak, StreakInfo { current: 2, best: 3 });
    assert_eq!(summary.total_current_streaks, 2);
}

#[test]
fn test_archived_habits_leave_analytics() {
    let (_dir, store) = create_test_store();
    let read = add_habit(&store, "Read", Schedule::every_day());
    let run = add_habit(&store, "Run", Schedule::every_day());
    check_days(&store, &read, &["2025-01-11"]);
    store.recorder().set_archived(&run.id, true).unwrap();

    let query = StatsQuery::new(store.reader(), USER);
    let report = query.analytics(TimeRange::Week, key("2025-01-11")).unwrap();

    assert_eq!(report.ranking.len(), 1);
    assert_eq!(report.overall, CompletionRate::new(1, 7));
    assert_eq!(report.overall.percentage, 14);

    let archived = query.dashboard(HabitFilter::Archived, key("2025-01-11")).unwrap();
    assert_eq!(archived.cards.len(), 1);
    assert!(archived.cards[0].archived);
}

#[test]
fn test_month_analytics_ranks_habits() {
    let (_dir, store) = create_test_store();
    // Window: 2024-12-13 .. 2025-01-11
    let mwf = add_habit(&store, "Gym", Schedule::from_days([1, 3, 5]).unwrap());
    let daily = add_habit(&store, "Read", Schedule::every_day());
    check_days(&store, &mwf, &["2025-01-06", "2025-01-08", "2025-01-10"]);
    check_days(&store, &daily, &["2025-01-10", "2025-01-11"]);

    let query = StatsQuery::new(store.reader(), USER);
    let report = query.analytics(TimeRange::Month, key("2025-01-11")).unwrap();

    assert_eq!(report.start, Some(key("2024-12-13")));
    assert_eq!(report.daily.len(), 30);

    let names: Vec<&str> = report.ranking.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Gym", "Read"]);
    // 13 Mon/Wed/Fri in the window
    assert_eq!(report.ranking[0].rate, CompletionRate::new(3, 13));
    assert_eq!(report.ranking[1].rate, CompletionRate::new(2, 30));
    assert_eq!(report.overall, CompletionRate::new(5, 43));
    assert_eq!(report.missed(), 38);
}

#[test]
fn test_today_and_heatmap_from_store() {
    let (_dir, store) = create_test_store();
    let read = add_habit(&store, "Read", Schedule::every_day());
    add_habit(&store, "Run", Schedule::weekends());
    check_days(&store, &read, &["2025-01-06", "2024-12-01"]);

    let query = StatsQuery::new(store.reader(), USER);

    // Monday: only the every-day habit is due
    let today = query.today(key("2025-01-06")).unwrap();
    assert_eq!(today.items.len(), 1);
    assert!(today.items[0].completed);
    assert_eq!(today.rate.percentage, 100);

    let heatmap = query.heatmap(&read.id[..8], key("2025-01-06"), 1).unwrap();
    assert_eq!(heatmap.habit_id, read.id);
    assert_eq!(heatmap.start, key("2024-12-06"));
    assert_eq!(heatmap.cells.len(), 32);
    // 2024-12-01 is outside the window
    assert_eq!(heatmap.completed_days(), 1);
    assert!(heatmap.cells.last().is_some_and(|c| c.present));
}
