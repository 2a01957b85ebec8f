//! Consecutive-day streaks and the streak bonus.
//!
//! Streaks are never stored. They are re-derived from the completion log
//! on demand:
//! 1. No completions on or before `as_of` → 0
//! 2. Most recent completion more than one day before `as_of` → 0
//! 3. Otherwise count back from the most recent day while each earlier
//!    completion is exactly one day older than the previous one

use chrono::NaiveDate;

use super::model::Completion;

/// Days per bonus block.
pub const STREAK_BLOCK_DAYS: u32 = 3;

/// Bonus points per completed block.
pub const STREAK_BONUS_PER_BLOCK: u32 = 5;

/// Current streak for completions of a single (task, child) pair.
///
/// The caller is responsible for filtering to one pair; see
/// [`streak_for`] for the filtering variant. Completions dated after
/// `as_of` are ignored, so a backdated completion only sees the run that
/// led up to its own day.
pub fn streak<'a, I>(completions: I, as_of: NaiveDate) -> u32
where
    I: IntoIterator<Item = &'a Completion>,
{
    let mut dates: Vec<NaiveDate> = completions
        .into_iter()
        .map(|c| c.date)
        .filter(|d| *d <= as_of)
        .collect();
    if dates.is_empty() {
        return 0;
    }

    dates.sort_unstable_by(|a, b| b.cmp(a));

    // A streak only counts while it is live: continued today or yesterday
    if (as_of - dates[0]).num_days() > 1 {
        return 0;
    }

    let mut count = 1;
    for pair in dates.windows(2) {
        if (pair[0] - pair[1]).num_days() == 1 {
            count += 1;
        } else {
            break;
        }
    }
    count
}

/// Current streak for `task_id` completed by `child_id`, filtering the
/// full completion log.
pub fn streak_for(
    completions: &[Completion],
    task_id: &str,
    child_id: &str,
    as_of: NaiveDate,
) -> u32 {
    streak(
        completions.iter().filter(|c| c.is_for(task_id, child_id)),
        as_of,
    )
}

/// Bonus earned for completing a task with `prior_streak` days already
/// in progress: 5 points per full 3-day block.
pub fn streak_bonus(prior_streak: u32) -> u32 {
    (prior_streak / STREAK_BLOCK_DAYS) * STREAK_BONUS_PER_BLOCK
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(offset: i64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 10).unwrap() + chrono::Duration::days(offset)
    }

    fn completion(date: NaiveDate) -> Completion {
        Completion {
            id: Completion::id_for("task-1", date),
            task_id: "task-1".to_string(),
            child_id: "child-1".to_string(),
            date,
            points: 10,
            streak_bonus: 0,
        }
    }

    fn log(offsets: &[i64]) -> Vec<Completion> {
        offsets.iter().map(|o| completion(day(*o))).collect()
    }

    #[test]
    fn test_empty_is_zero() {
        assert_eq!(streak(&Vec::<Completion>::new(), day(0)), 0);
    }

    #[test]
    fn test_four_consecutive_days() {
        let completions = log(&[0, -1, -2, -3]);
        assert_eq!(streak(&completions, day(0)), 4);
    }

    #[test]
    fn test_gap_truncates_run() {
        // Missing D-2
        let completions = log(&[0, -1, -3, -4]);
        assert_eq!(streak(&completions, day(0)), 2);
    }

    #[test]
    fn test_yesterday_keeps_streak_live() {
        let completions = log(&[-1, -2, -3]);
        assert_eq!(streak(&completions, day(0)), 3);
    }

    #[test]
    fn test_missed_day_breaks_streak() {
        let completions = log(&[-2, -3, -4, -5, -6]);
        assert_eq!(streak(&completions, day(0)), 0);
    }

    #[test]
    fn test_unsorted_input() {
        let completions = log(&[-2, 0, -1]);
        assert_eq!(streak(&completions, day(0)), 3);
    }

    #[test]
    fn test_single_completion_today() {
        assert_eq!(streak(&log(&[0]), day(0)), 1);
    }

    #[test]
    fn test_streak_for_filters_pair() {
        let mut completions = log(&[0, -1]);
        let mut other_task = completion(day(-2));
        other_task.task_id = "task-2".to_string();
        completions.push(other_task);
        let mut other_child = completion(day(-2));
        other_child.child_id = "child-2".to_string();
        completions.push(other_child);

        assert_eq!(streak_for(&completions, "task-1", "child-1", day(0)), 2);
        assert_eq!(streak_for(&completions, "task-2", "child-1", day(0)), 0);
        assert_eq!(streak_for(&completions, "task-1", "child-3", day(0)), 0);
    }

    #[test]
    fn test_later_completions_ignored() {
        // A run on D+1..D+5 says nothing about the streak as of D
        let completions = log(&[1, 2, 3, 4, 5]);
        assert_eq!(streak(&completions, day(0)), 0);

        // Only the part of the log up to as_of counts
        let completions = log(&[3, 2, 0, -1]);
        assert_eq!(streak(&completions, day(0)), 2);
        assert_eq!(streak(&completions, day(-1)), 1);
    }

    #[test]
    fn test_bonus_staircase() {
        let expected = [0, 0, 0, 5, 5, 5, 10, 10, 10, 15];
        for (prior, bonus) in expected.iter().enumerate() {
            assert_eq!(streak_bonus(prior as u32), *bonus, "prior streak {prior}");
        }
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            // Property: a run of n consecutive days ending at as_of has streak n
            #[test]
            fn prop_consecutive_run(n in 1i64..60) {
                let offsets: Vec<i64> = (0..n).map(|i| -i).collect();
                prop_assert_eq!(streak(&log(&offsets), day(0)), n as u32);
            }

            // Property: a stale log scores zero regardless of run length
            #[test]
            fn prop_stale_log_is_zero(n in 1i64..30, stale in 2i64..30) {
                let offsets: Vec<i64> = (0..n).map(|i| -stale - i).collect();
                prop_assert_eq!(streak(&log(&offsets), day(0)), 0);
            }

            // Property: the streak never exceeds the number of completions
            #[test]
            fn prop_bounded_by_len(offsets in proptest::collection::btree_set(-20i64..=0, 0..15)) {
                let offsets: Vec<i64> = offsets.into_iter().collect();
                prop_assert!(streak(&log(&offsets), day(0)) as usize <= offsets.len());
            }

            // Property: appending completions after as_of never changes the streak
            #[test]
            fn prop_future_entries_ignored(
                past in proptest::collection::btree_set(-20i64..=0, 0..15),
                future in proptest::collection::btree_set(1i64..20, 0..15),
            ) {
                let past: Vec<i64> = past.into_iter().collect();
                let mixed: Vec<i64> = past.iter().copied().chain(future).collect();
                prop_assert_eq!(streak(&log(&mixed), day(0)), streak(&log(&past), day(0)));
            }

            #[test]
            fn prop_bonus_formula(prior in 0u32..10_000) {
                prop_assert_eq!(streak_bonus(prior), 5 * (prior / 3));
            }
        }
    }
}
