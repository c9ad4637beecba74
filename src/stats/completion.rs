//! Windowed completion rates
//!
//! Only scheduled days enter a denominator. A habit with an empty schedule
//! therefore always reports 0 scheduled and 0%.

use std::iter::Sum;
use std::ops::Add;

use serde::Serialize;

use super::date_key::DateKey;
use crate::domain::{CheckinLog, Schedule, Tracked};

/// Completed and scheduled counts over some window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CompletionRate {
    pub completed: u32,
    pub scheduled: u32,
    /// round(100 * completed / scheduled), 0 when nothing was scheduled
    pub percentage: u32,
}

impl CompletionRate {
    pub fn new(completed: u32, scheduled: u32) -> Self {
        Self {
            completed,
            scheduled,
            percentage: percentage(completed, scheduled),
        }
    }

    /// Scheduled days that were not completed
    pub fn missed(&self) -> u32 {
        self.scheduled.saturating_sub(self.completed)
    }
}

impl Add for CompletionRate {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.completed + rhs.completed, self.scheduled + rhs.scheduled)
    }
}

impl Sum for CompletionRate {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

/// Integer percentage rounded half up, matching `Math.round` for
/// non-negative ratios.
fn percentage(completed: u32, scheduled: u32) -> u32 {
    if scheduled == 0 {
        return 0;
    }
    let c = completed as u64;
    let s = scheduled as u64;
    ((200 * c + s) / (2 * s)) as u32
}

/// One point of a per-day completion series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyCompletion {
    pub date: DateKey,
    #[serde(flatten)]
    pub rate: CompletionRate,
}

/// A habit with its completion over a window
#[derive(Debug, Clone, Copy)]
pub struct RankedHabit<'a, H> {
    pub habit: &'a H,
    pub rate: CompletionRate,
}

/// Completion across all habits on one day.
///
/// Habits not scheduled on `date` are skipped entirely, even if checked in.
pub fn daily_completion<H: Tracked>(habits: &[H], date: DateKey) -> CompletionRate {
    let weekday = date.weekday();
    let (completed, scheduled) = habits
        .iter()
        .filter(|h| h.schedule().contains(weekday))
        .fold((0, 0), |(completed, scheduled), h| {
            (completed + h.log().is_completed(date) as u32, scheduled + 1)
        });
    CompletionRate::new(completed, scheduled)
}

/// Completion of one habit over the given days.
pub fn habit_completion(schedule: &Schedule, log: &CheckinLog, range: &[DateKey]) -> CompletionRate {
    let (completed, scheduled) = range
        .iter()
        .filter(|d| schedule.contains(d.weekday()))
        .fold((0, 0), |(completed, scheduled), d| {
            (completed + log.is_completed(*d) as u32, scheduled + 1)
        });
    CompletionRate::new(completed, scheduled)
}

/// Per-day completion for every day of `range`, in range order.
pub fn range_series<H: Tracked>(habits: &[H], range: &[DateKey]) -> Vec<DailyCompletion> {
    range
        .iter()
        .map(|date| DailyCompletion {
            date: *date,
            rate: daily_completion(habits, *date),
        })
        .collect()
}

/// Per-habit completion over `range`, highest percentage first.
///
/// Equal percentages keep their input order.
pub fn ranked_habit_completion<'a, H: Tracked>(habits: &'a [H], range: &[DateKey]) -> Vec<RankedHabit<'a, H>> {
    let mut ranked: Vec<RankedHabit<'a, H>> = habits
        .iter()
        .map(|habit| RankedHabit {
            habit,
            rate: habit_completion(habit.schedule(), habit.log(), range),
        })
        .collect();
    // Vec::sort_by is stable
    ranked.sort_by(|a, b| b.rate.percentage.cmp(&a.rate.percentage));
    ranked
}

/// Completion summed over every habit-day in `range`.
///
/// This weights habits by how often they were scheduled; it is not the mean
/// of per-habit percentages.
pub fn overall_completion<H: Tracked>(habits: &[H], range: &[DateKey]) -> CompletionRate {
    habits
        .iter()
        .map(|h| habit_completion(h.schedule(), h.log(), range))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::date_key::days_in_interval;

    fn key(s: &str) -> DateKey {
        DateKey::parse(s).unwrap()
    }

    fn range(start: &str, end: &str) -> Vec<DateKey> {
        days_in_interval(key(start), key(end)).unwrap()
    }

    fn log(entries: &[(&str, bool)]) -> CheckinLog {
        CheckinLog::from_raw(entries.iter().copied()).unwrap()
    }

    #[test]
    fn test_percentage_rounding() {
        assert_eq!(CompletionRate::new(1, 3).percentage, 33);
        assert_eq!(CompletionRate::new(2, 3).percentage, 67);
        assert_eq!(CompletionRate::new(1, 8).percentage, 13); // 12.5 rounds up
        assert_eq!(CompletionRate::new(1, 4).percentage, 25);
        assert_eq!(CompletionRate::new(0, 0).percentage, 0);
        assert_eq!(CompletionRate::new(5, 5).percentage, 100);
    }

    #[test]
    fn test_weekday_schedule_over_week() {
        // 2025-01-05 is a Sunday
        let days = range("2025-01-05", "2025-01-11");
        let l = log(&[
            ("2025-01-06", true),
            ("2025-01-07", true),
            ("2025-01-08", true),
            ("2025-01-09", true),
            ("2025-01-10", true),
        ]);
        assert_eq!(
            habit_completion(&Schedule::weekdays(), &l, &days),
            CompletionRate { completed: 5, scheduled: 5, percentage: 100 }
        );
    }

    #[test]
    fn test_unscheduled_checkins_are_ignored() {
        let days = range("2025-01-05", "2025-01-11");
        let l = log(&[("2025-01-05", true), ("2025-01-06", true)]);
        let rate = habit_completion(&Schedule::weekdays(), &l, &days);
        assert_eq!(rate, CompletionRate::new(1, 5));
    }

    #[test]
    fn test_scheduled_count_by_construction() {
        let days = range("2025-01-01", "2025-01-30");
        let schedule = Schedule::weekdays();
        let expected = days.iter().filter(|d| (1..=5).contains(&d.weekday())).count() as u32;
        let rate = habit_completion(&schedule, &CheckinLog::new(), &days);
        assert_eq!(rate.scheduled, expected);
        assert_eq!(rate.scheduled, 22);
    }

    #[test]
    fn test_empty_schedule_is_zero_not_error() {
        let days = range("2025-01-01", "2025-01-30");
        let l = log(&[("2025-01-02", true)]);
        assert_eq!(habit_completion(&Schedule::empty(), &l, &days), CompletionRate::default());

        let habits = vec![(Schedule::empty(), l)];
        assert_eq!(daily_completion(&habits, key("2025-01-02")), CompletionRate::default());
        assert_eq!(overall_completion(&habits, &days), CompletionRate::default());
    }

    #[test]
    fn test_empty_logs_yield_zero_percentages() {
        let days = range("2025-01-01", "2025-01-14");
        let habits = vec![
            (Schedule::every_day(), CheckinLog::new()),
            (Schedule::weekends(), CheckinLog::new()),
        ];
        assert!(range_series(&habits, &days).iter().all(|p| p.rate.percentage == 0));
        assert!(ranked_habit_completion(&habits, &days).iter().all(|r| r.rate.percentage == 0));
        assert_eq!(overall_completion(&habits, &days).percentage, 0);
    }

    #[test]
    fn test_daily_completion() {
        let day = key("2025-01-06"); // Monday
        let habits = vec![
            (Schedule::weekdays(), log(&[("2025-01-06", true)])),
            (Schedule::every_day(), log(&[("2025-01-06", false)])),
            (Schedule::every_day(), CheckinLog::new()),
            // done but not scheduled on Monday, skipped
            (Schedule::weekends(), log(&[("2025-01-06", true)])),
        ];
        assert_eq!(daily_completion(&habits, day), CompletionRate::new(1, 3));
        assert_eq!(daily_completion(&habits, day).percentage, 33);
        assert_eq!(daily_completion::<(Schedule, CheckinLog)>(&[], day), CompletionRate::default());
    }

    #[test]
    fn test_range_series_follows_range_order() {
        let days = range("2025-01-04", "2025-01-06");
        let habits = vec![(Schedule::every_day(), log(&[("2025-01-05", true)]))];
        let series = range_series(&habits, &days);

        let dates: Vec<DateKey> = series.iter().map(|p| p.date).collect();
        assert_eq!(dates, days);
        let percentages: Vec<u32> = series.iter().map(|p| p.rate.percentage).collect();
        assert_eq!(percentages, vec![0, 100, 0]);
    }

    #[test]
    fn test_ranked_ties_keep_input_order() {
        let days = range("2025-01-05", "2025-01-11");
        let habits = vec![
            ("a", Schedule::every_day(), log(&[("2025-01-05", true)])),
            ("b", Schedule::weekdays(), log(&[("2025-01-06", true), ("2025-01-07", true), ("2025-01-08", true)])),
            ("c", Schedule::every_day(), log(&[("2025-01-06", true)])),
            ("d", Schedule::weekends(), log(&[("2025-01-05", true), ("2025-01-11", true)])),
            ("e", Schedule::empty(), CheckinLog::new()),
        ];
        let tracked: Vec<(Schedule, CheckinLog)> = habits.iter().map(|(_, s, l)| (*s, l.clone())).collect();

        let ranked = ranked_habit_completion(&tracked, &days);
        let order: Vec<&str> = ranked
            .iter()
            .map(|r| {
                let idx = tracked.iter().position(|t| std::ptr::eq(t, r.habit)).unwrap();
                habits[idx].0
            })
            .collect();
        let percentages: Vec<u32> = ranked.iter().map(|r| r.rate.percentage).collect();

        // a and c both 14%, e is 0%
        assert_eq!(order, vec!["d", "b", "a", "c", "e"]);
        assert_eq!(percentages, vec![100, 60, 14, 14, 0]);
    }

    #[test]
    fn test_overall_is_not_mean_of_percentages() {
        // Habit A: scheduled once (Mon), done. Habit B: scheduled three times, never done.
        let days = range("2025-01-05", "2025-01-11");
        let habits = vec![
            (Schedule::from_days([1]).unwrap(), log(&[("2025-01-06", true)])),
            (Schedule::from_days([2, 3, 4]).unwrap(), CheckinLog::new()),
        ];

        let per_habit: Vec<u32> = ranked_habit_completion(&habits, &days)
            .iter()
            .map(|r| r.rate.percentage)
            .collect();
        assert_eq!(per_habit, vec![100, 0]);

        let overall = overall_completion(&habits, &days);
        assert_eq!(overall, CompletionRate { completed: 1, scheduled: 4, percentage: 25 });
        assert_eq!(overall.missed(), 3);
    }

    #[test]
    fn test_sum_matches_manual_totals() {
        let total: CompletionRate = [CompletionRate::new(1, 2), CompletionRate::new(2, 2)].into_iter().sum();
        assert_eq!(total, CompletionRate::new(3, 4));
        assert_eq!(total.percentage, 75);
    }
}
