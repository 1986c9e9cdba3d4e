//! Streak calculation
//!
//! Consecutive-day completion streaks over a set of distinct completion
//! dates, plus the achievement thresholds unlocked by them. The reference
//! date is always passed in explicitly so results are reproducible.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Streak achievement thresholds (consecutive days)
pub const STREAK_THRESHOLDS: &[(u32, &str)] = &[
    (7, "Week Warrior"),
    (14, "Two Week Titan"),
    (30, "Month Master"),
    (60, "Two Month Legend"),
    (90, "Quarter Champion"),
    (180, "Half Year Hero"),
    (365, "Year of Excellence"),
];

/// Total-completion achievement thresholds
pub const COMPLETION_THRESHOLDS: &[(u32, &str)] = &[
    (50, "Getting Started"),
    (100, "Century Club"),
    (250, "Quarter Thousand"),
    (500, "Half Grand"),
    (1000, "Millennium Master"),
];

/// Count consecutive completed days ending at (or adjacent to) `today`.
///
/// Walks backward from `today` one calendar day at a time. A missing `today`
/// is tolerated without breaking the run (the day is still in progress), but
/// any other missing day ends the walk.
pub fn current_streak(completion_dates: &HashSet<NaiveDate>, today: NaiveDate) -> u32 {
    let mut streak = 0;
    let mut day = today;

    loop {
        if completion_dates.contains(&day) {
            streak += 1;
        } else if day != today {
            break;
        }
        day = match day.pred_opt() {
            Some(prev) => prev,
            None => break,
        };
    }

    streak
}

/// Length of the longest run of exactly consecutive completion dates.
///
/// Returns 0 for an empty set and 1 for a single date.
pub fn longest_streak(completion_dates: &HashSet<NaiveDate>) -> u32 {
    let mut dates: Vec<NaiveDate> = completion_dates.iter().copied().collect();
    dates.sort_unstable();

    let mut longest = 0;
    let mut run = 0;
    let mut prev: Option<NaiveDate> = None;

    for date in dates {
        run = match prev {
            Some(p) if p.succ_opt() == Some(date) => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        prev = Some(date);
    }

    longest
}

/// Kind of achievement threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementKind {
    Streak,
    Completion,
}

/// One achievement threshold with its unlock state
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub kind: AchievementKind,
    pub threshold: u32,
    pub title: &'static str,
    pub unlocked: bool,
}

/// All achievement thresholds with unlock state for the given totals.
///
/// Streak achievements come first, then completion achievements, each in
/// ascending threshold order.
pub fn achievements(current_streak: u32, total_completions: u32) -> Vec<Achievement> {
    let streaks = STREAK_THRESHOLDS.iter().map(|&(threshold, title)| Achievement {
        kind: AchievementKind::Streak,
        threshold,
        title,
        unlocked: current_streak >= threshold,
    });
    let completions = COMPLETION_THRESHOLDS.iter().map(|&(threshold, title)| Achievement {
        kind: AchievementKind::Completion,
        threshold,
        title,
        unlocked: total_completions >= threshold,
    });
    streaks.chain(completions).collect()
}

/// The first achievement not yet unlocked, if any
pub fn next_achievement(current_streak: u32, total_completions: u32) -> Option<Achievement> {
    achievements(current_streak, total_completions)
        .into_iter()
        .find(|a| !a.unlocked)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dates(days: &[(i32, u32, u32)]) -> HashSet<NaiveDate> {
        days.iter().map(|&(y, m, d)| date(y, m, d)).collect()
    }

    #[test]
    fn test_current_streak_empty() {
        let today = date(2024, 3, 15);
        assert_eq!(current_streak(&HashSet::new(), today), 0);
    }

    #[test]
    fn test_current_streak_today_only() {
        let today = date(2024, 3, 15);
        let completed = dates(&[(2024, 3, 15)]);
        assert_eq!(current_streak(&completed, today), 1);
    }

    #[test]
    fn test_current_streak_tolerates_missing_today() {
        // Day in progress: yesterday and the day before still count
        let today = date(2024, 3, 15);
        let completed = dates(&[(2024, 3, 14), (2024, 3, 13)]);
        assert_eq!(current_streak(&completed, today), 2);
    }

    #[test]
    fn test_current_streak_breaks_on_gap_before_today() {
        let today = date(2024, 3, 15);
        // 2024-03-13 missing: only today and yesterday count
        let completed = dates(&[(2024, 3, 15), (2024, 3, 14), (2024, 3, 12), (2024, 3, 11)]);
        assert_eq!(current_streak(&completed, today), 2);
    }

    #[test]
    fn test_current_streak_gap_at_yesterday() {
        let today = date(2024, 3, 15);
        let completed = dates(&[(2024, 3, 13), (2024, 3, 12)]);
        // Today absent is tolerated, yesterday absent is a break
        assert_eq!(current_streak(&completed, today), 0);
    }

    #[test]
    fn test_current_streak_full_week() {
        let today = date(2024, 3, 15);
        let completed: HashSet<NaiveDate> =
            (9..=15).map(|d| date(2024, 3, d)).collect();
        assert_eq!(current_streak(&completed, today), 7);
    }

    #[test]
    fn test_current_streak_ignores_future_dates() {
        let today = date(2024, 3, 15);
        let completed = dates(&[(2024, 3, 20), (2024, 3, 15), (2024, 3, 14)]);
        assert_eq!(current_streak(&completed, today), 2);
    }

    #[test]
    fn test_longest_streak_empty() {
        assert_eq!(longest_streak(&HashSet::new()), 0);
    }

    #[test]
    fn test_longest_streak_single_date() {
        let completed = dates(&[(2024, 3, 15)]);
        assert_eq!(longest_streak(&completed), 1);
    }

    #[test]
    fn test_longest_streak_with_gap() {
        // d, d+1, d+2, then a gap, then d+5, d+6
        let completed = dates(&[
            (2024, 3, 1),
            (2024, 3, 2),
            (2024, 3, 3),
            (2024, 3, 6),
            (2024, 3, 7),
        ]);
        assert_eq!(longest_streak(&completed), 3);
    }

    #[test]
    fn test_longest_streak_across_month_boundary() {
        let completed = dates(&[(2024, 2, 28), (2024, 2, 29), (2024, 3, 1)]);
        assert_eq!(longest_streak(&completed), 3);
    }

    #[test]
    fn test_achievements_unlock_state() {
        let all = achievements(14, 120);

        let streak_unlocked: Vec<u32> = all
            .iter()
            .filter(|a| a.kind == AchievementKind::Streak && a.unlocked)
            .map(|a| a.threshold)
            .collect();
        assert_eq!(streak_unlocked, vec![7, 14]);

        let completion_unlocked: Vec<u32> = all
            .iter()
            .filter(|a| a.kind == AchievementKind::Completion && a.unlocked)
            .map(|a| a.threshold)
            .collect();
        assert_eq!(completion_unlocked, vec![50, 100]);
    }

    #[test]
    fn test_next_achievement() {
        let next = next_achievement(14, 0).unwrap();
        assert_eq!(next.threshold, 30);
        assert_eq!(next.title, "Month Master");

        // Everything unlocked
        assert!(next_achievement(365, 1000).is_none());
    }
}
