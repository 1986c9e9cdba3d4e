//! Record aggregation
//!
//! Folds dated records into per-key sums, weekday completion rates, and
//! weekly rollups. All folds treat empty input as a valid degenerate case
//! and never divide by zero.

use crate::types::{CompletionRecord, DayOfWeekRate, ProgressRecord, WeeklyCompletion};
use chrono::{Datelike, Duration, NaiveDate};
use std::collections::{BTreeMap, HashMap};

/// Sum values grouped by key. Empty input yields an empty map.
pub fn aggregate_by_key<I>(records: I) -> HashMap<String, f64>
where
    I: IntoIterator<Item = (String, f64)>,
{
    let mut totals = HashMap::new();
    for (key, value) in records {
        *totals.entry(key).or_insert(0.0) += value;
    }
    totals
}

/// Sum progress contributions per calendar date
pub fn progress_totals_by_date(records: &[ProgressRecord]) -> BTreeMap<NaiveDate, f64> {
    let mut totals = BTreeMap::new();
    for record in records {
        *totals.entry(record.date).or_insert(0.0) += record.value;
    }
    totals
}

/// All dates from `start` through `end`, inclusive. Empty when start > end.
pub fn date_window(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    let mut day = start;
    while day <= end {
        dates.push(day);
        day = match day.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }
    dates
}

/// Completion rate per weekday bucket (0 = Sunday .. 6 = Saturday).
///
/// For each bucket, `possible` is the number of window dates falling on that
/// weekday times the number of tracked habits; the rate is completions over
/// possible as a percentage, 0 when the bucket has no possible slots.
pub fn day_of_week_rates(
    window: &[NaiveDate],
    records: &[CompletionRecord],
    habit_count: u32,
) -> [DayOfWeekRate; 7] {
    let mut window_days = [0u32; 7];
    for date in window {
        window_days[date.weekday().num_days_from_sunday() as usize] += 1;
    }

    let mut completions = [0u32; 7];
    for record in records {
        if record.completed {
            completions[record.date.weekday().num_days_from_sunday() as usize] += 1;
        }
    }

    std::array::from_fn(|i| {
        let possible = window_days[i] * habit_count;
        DayOfWeekRate {
            weekday: i as u8,
            completions: completions[i],
            possible,
            rate: if possible == 0 {
                0.0
            } else {
                f64::from(completions[i]) / f64::from(possible) * 100.0
            },
        }
    })
}

/// Monday of the week containing `date`
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Completion rollup for the Monday-anchored week starting at `week_start`.
///
/// `possible` is 7 days times the number of tracked habits; 0 habits yields
/// a 0% week rather than an error.
pub fn weekly_completion(
    records: &[CompletionRecord],
    habit_count: u32,
    week_start: NaiveDate,
) -> WeeklyCompletion {
    let week_end = week_start + Duration::days(6);
    let completions = records
        .iter()
        .filter(|r| r.completed && r.date >= week_start && r.date <= week_end)
        .count() as u32;
    let possible = 7 * habit_count;

    WeeklyCompletion {
        week_start,
        completions,
        possible,
        percent: if possible == 0 {
            0.0
        } else {
            f64::from(completions) / f64::from(possible) * 100.0
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn log(habit_id: i64, d: NaiveDate, completed: bool) -> CompletionRecord {
        CompletionRecord {
            habit_id,
            date: d,
            completed,
        }
    }

    #[test]
    fn test_aggregate_by_key_sums_per_key() {
        let totals = aggregate_by_key(vec![
            ("V3".to_string(), 2.0),
            ("V5".to_string(), 1.0),
            ("V3".to_string(), 1.0),
        ]);

        assert_eq!(totals.len(), 2);
        assert!((totals["V3"] - 3.0).abs() < f64::EPSILON);
        assert!((totals["V5"] - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_aggregate_by_key_empty() {
        let totals = aggregate_by_key(Vec::<(String, f64)>::new());
        assert!(totals.is_empty());
    }

    #[test]
    fn test_progress_totals_sums_same_date() {
        let records = vec![
            ProgressRecord { goal_id: 1, date: date(2024, 3, 10), value: 2.5 },
            ProgressRecord { goal_id: 1, date: date(2024, 3, 10), value: 1.5 },
            ProgressRecord { goal_id: 1, date: date(2024, 3, 11), value: 3.0 },
        ];

        let totals = progress_totals_by_date(&records);
        assert_eq!(totals.len(), 2);
        assert!((totals[&date(2024, 3, 10)] - 4.0).abs() < f64::EPSILON);
        assert!((totals[&date(2024, 3, 11)] - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_date_window_inclusive() {
        let window = date_window(date(2024, 2, 28), date(2024, 3, 1));
        assert_eq!(
            window,
            vec![date(2024, 2, 28), date(2024, 2, 29), date(2024, 3, 1)]
        );

        assert!(date_window(date(2024, 3, 2), date(2024, 3, 1)).is_empty());
    }

    #[test]
    fn test_day_of_week_rates() {
        // Two-week window starting Sunday 2024-03-03
        let window = date_window(date(2024, 3, 3), date(2024, 3, 16));
        // One habit, completed both Sundays and one Monday
        let records = vec![
            log(1, date(2024, 3, 3), true),
            log(1, date(2024, 3, 10), true),
            log(1, date(2024, 3, 4), true),
            log(1, date(2024, 3, 11), false),
        ];

        let rates = day_of_week_rates(&window, &records, 1);

        // Sunday bucket: 2 completions over 2 possible
        assert_eq!(rates[0].completions, 2);
        assert_eq!(rates[0].possible, 2);
        assert!((rates[0].rate - 100.0).abs() < 0.001);

        // Monday bucket: 1 of 2
        assert!((rates[1].rate - 50.0).abs() < 0.001);

        // Tuesday bucket: no completions
        assert_eq!(rates[2].completions, 0);
        assert!((rates[2].rate - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_day_of_week_rates_zero_possible() {
        // Empty window means every bucket has zero possible slots
        let rates = day_of_week_rates(&[], &[log(1, date(2024, 3, 4), true)], 1);
        for bucket in &rates {
            assert_eq!(bucket.possible, 0);
            assert!((bucket.rate - 0.0).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_week_start_is_monday() {
        // 2024-03-15 is a Friday
        assert_eq!(week_start(date(2024, 3, 15)), date(2024, 3, 11));
        // Monday maps to itself
        assert_eq!(week_start(date(2024, 3, 11)), date(2024, 3, 11));
        // Sunday belongs to the preceding Monday
        assert_eq!(week_start(date(2024, 3, 17)), date(2024, 3, 11));
    }

    #[test]
    fn test_weekly_completion() {
        let monday = date(2024, 3, 11);
        let records = vec![
            log(1, date(2024, 3, 11), true),
            log(1, date(2024, 3, 12), true),
            log(2, date(2024, 3, 12), true),
            log(2, date(2024, 3, 13), false),
            // Outside the week
            log(1, date(2024, 3, 10), true),
        ];

        let weekly = weekly_completion(&records, 2, monday);
        assert_eq!(weekly.completions, 3);
        assert_eq!(weekly.possible, 14);
        assert!((weekly.percent - 3.0 / 14.0 * 100.0).abs() < 0.001);
    }

    #[test]
    fn test_weekly_completion_no_habits() {
        let weekly = weekly_completion(&[], 0, date(2024, 3, 11));
        assert_eq!(weekly.possible, 0);
        assert!((weekly.percent - 0.0).abs() < f64::EPSILON);
    }
}
