//! Recording task completions.
//!
//! A completion is accepted at most once per (task, child, day). The
//! streak bonus is computed from the streak *before* today's completion is
//! inserted, so today's completion never counts toward its own bonus.

use chrono::NaiveDate;
use serde::Serialize;

use super::model::{Child, Completion, Task};
use super::streak::{streak_bonus, streak_for};
use crate::error::{ChoreError, Result};

/// New snapshots produced by a successful completion.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionOutcome {
    /// The completion log with the new record appended.
    pub completions: Vec<Completion>,
    /// The children collection with the credited child replaced.
    pub children: Vec<Child>,
    /// What was recorded.
    pub receipt: CompletionReceipt,
}

/// Summary of a single recorded completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionReceipt {
    pub completion: Completion,
    /// Streak in progress before today's completion.
    pub prior_streak: u32,
    /// Base task points plus streak bonus.
    pub points_awarded: u32,
    pub new_points: u32,
    pub new_level: u32,
    pub leveled_up: bool,
}

/// Whether `task_id` was completed by `child_id` on `day`.
pub fn is_completed_on(
    completions: &[Completion],
    task_id: &str,
    child_id: &str,
    day: NaiveDate,
) -> bool {
    completions
        .iter()
        .any(|c| c.is_for(task_id, child_id) && c.date == day)
}

/// Record that `child_id` completed `task_id` on `today`.
///
/// Returns new completion and children collections; the inputs are not
/// modified. Fails with `AlreadyCompletedToday` if the pair already has a
/// completion for `today`, and with `NotFound` if the task or child does
/// not exist or the task belongs to a different child.
pub fn record_completion(
    task_id: &str,
    child_id: &str,
    completions: &[Completion],
    tasks: &[Task],
    children: &[Child],
    today: NaiveDate,
) -> Result<CompletionOutcome> {
    let task = tasks
        .iter()
        .find(|t| t.id == task_id && t.child_id == child_id)
        .ok_or_else(|| ChoreError::not_found("task", task_id))?;
    let child = children
        .iter()
        .find(|c| c.id == child_id)
        .ok_or_else(|| ChoreError::not_found("child", child_id))?;

    if is_completed_on(completions, task_id, child_id, today) {
        return Err(ChoreError::already_completed(task_id, child_id, today));
    }

    let prior_streak = streak_for(completions, task_id, child_id, today);
    let bonus = streak_bonus(prior_streak);
    let points_awarded = task.points.checked_add(bonus).ok_or_else(|| {
        ChoreError::invalid_input(format!("points for task {} overflow", task_id))
    })?;

    let completion = Completion {
        id: Completion::id_for(task_id, today),
        task_id: task_id.to_string(),
        child_id: child_id.to_string(),
        date: today,
        points: points_awarded,
        streak_bonus: bonus,
    };

    let credited = child.credit(points_awarded).ok_or_else(|| {
        ChoreError::invalid_input(format!("point balance of child {} overflows", child_id))
    })?;
    let receipt = CompletionReceipt {
        completion: completion.clone(),
        prior_streak,
        points_awarded,
        new_points: credited.points(),
        new_level: credited.level(),
        leveled_up: credited.level() > child.level(),
    };

    let mut next_completions = completions.to_vec();
    next_completions.push(completion);

    let next_children = children
        .iter()
        .map(|c| {
            if c.id == child_id {
                credited.clone()
            } else {
                c.clone()
            }
        })
        .collect();

    tracing::debug!(
        task_id,
        child_id,
        %today,
        prior_streak,
        points_awarded,
        "recorded completion"
    );

    Ok(CompletionOutcome {
        completions: next_completions,
        children: next_children,
        receipt,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::tasks_for_child;
    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
    }

    fn fixture() -> (Vec<Task>, Vec<Child>) {
        let ada = Child::new("child-1", "Ada", 7, "🦊");
        let bo = Child::new("child-2", "Bo", 4, "🐼");
        let mut tasks = tasks_for_child(&ada);
        tasks.extend(tasks_for_child(&bo));
        (tasks, vec![ada, bo])
    }

    /// Complete `task_id` on each of the given days in order.
    fn complete_on(
        task_id: &str,
        days: &[NaiveDate],
        tasks: &[Task],
        children: Vec<Child>,
    ) -> (Vec<Completion>, Vec<Child>) {
        let mut completions = Vec::new();
        let mut children = children;
        for day in days {
            let outcome =
                record_completion(task_id, "child-1", &completions, tasks, &children, *day)
                    .unwrap();
            completions = outcome.completions;
            children = outcome.children;
        }
        (completions, children)
    }

    #[test]
    fn test_first_completion_awards_base_points() {
        let (tasks, children) = fixture();
        // "Make bed" is worth 15
        let outcome =
            record_completion("task-child-1-2", "child-1", &[], &tasks, &children, today())
                .unwrap();

        assert_eq!(outcome.completions.len(), 1);
        assert_eq!(outcome.receipt.points_awarded, 15);
        assert_eq!(outcome.receipt.prior_streak, 0);
        assert_eq!(outcome.completions[0].streak_bonus, 0);
        assert_eq!(outcome.completions[0].date, today());
        assert_eq!(outcome.children[0].points(), 15);
        // Other children untouched
        assert_eq!(outcome.children[1], children[1]);
    }

    #[test]
    fn test_second_completion_same_day_rejected() {
        let (tasks, children) = fixture();
        let first =
            record_completion("task-child-1-0", "child-1", &[], &tasks, &children, today())
                .unwrap();

        let err = record_completion(
            "task-child-1-0",
            "child-1",
            &first.completions,
            &tasks,
            &first.children,
            today(),
        )
        .unwrap_err();

        assert!(matches!(err, ChoreError::AlreadyCompletedToday { .. }));
        assert!(err.is_recoverable());
        assert_eq!(first.completions.len(), 1);
        assert_eq!(first.children[0].points(), 10);
    }

    #[test]
    fn test_same_task_next_day_allowed() {
        let (tasks, children) = fixture();
        let days = [today(), today() + Duration::days(1)];
        let (completions, children) = complete_on("task-child-1-0", &days, &tasks, children);
        assert_eq!(completions.len(), 2);
        assert_eq!(children[0].points(), 20);
    }

    #[test]
    fn test_bonus_uses_prior_streak() {
        let (tasks, children) = fixture();
        // Three consecutive days before today
        let days: Vec<NaiveDate> = (1..=3).rev().map(|d| today() - Duration::days(d)).collect();
        let (completions, children) = complete_on("task-child-1-0", &days, &tasks, children);
        // The third day saw a prior streak of 2: no bonus yet
        assert!(completions.iter().all(|c| c.streak_bonus == 0));

        let outcome = record_completion(
            "task-child-1-0",
            "child-1",
            &completions,
            &tasks,
            &children,
            today(),
        )
        .unwrap();

        assert_eq!(outcome.receipt.prior_streak, 3);
        assert_eq!(outcome.receipt.completion.streak_bonus, 5);
        assert_eq!(outcome.receipt.points_awarded, 15);
        assert_eq!(outcome.children[0].points(), 10 * 3 + 15);
    }

    #[test]
    fn test_broken_streak_resets_bonus() {
        let (tasks, children) = fixture();
        let days: Vec<NaiveDate> = (3..=8).rev().map(|d| today() - Duration::days(d)).collect();
        let (completions, children) = complete_on("task-child-1-0", &days, &tasks, children);

        let outcome = record_completion(
            "task-child-1-0",
            "child-1",
            &completions,
            &tasks,
            &children,
            today(),
        )
        .unwrap();
        assert_eq!(outcome.receipt.prior_streak, 0);
        assert_eq!(outcome.receipt.completion.streak_bonus, 0);
    }

    #[test]
    fn test_backdated_completion_ignores_later_run() {
        let (tasks, children) = fixture();
        // Six consecutive days from today onwards
        let days: Vec<NaiveDate> = (0..6).map(|d| today() + Duration::days(d)).collect();
        let (completions, children) = complete_on("task-child-1-0", &days, &tasks, children);
        let before = children[0].points();

        let backdated = today() - Duration::days(8);
        let outcome = record_completion(
            "task-child-1-0",
            "child-1",
            &completions,
            &tasks,
            &children,
            backdated,
        )
        .unwrap();

        assert_eq!(outcome.receipt.prior_streak, 0);
        assert_eq!(outcome.receipt.completion.streak_bonus, 0);
        assert_eq!(outcome.receipt.points_awarded, 10);
        assert_eq!(outcome.children[0].points(), before + 10);
    }

    #[test]
    fn test_backfilled_day_sees_only_earlier_run() {
        let (tasks, children) = fixture();
        // D-4..D-2 and D+1..D+3 logged, D-1 filled in afterwards
        let days: Vec<NaiveDate> = [-4, -3, -2, 1, 2, 3]
            .iter()
            .map(|d| today() + Duration::days(*d))
            .collect();
        let (completions, children) = complete_on("task-child-1-0", &days, &tasks, children);

        let outcome = record_completion(
            "task-child-1-0",
            "child-1",
            &completions,
            &tasks,
            &children,
            today() - Duration::days(1),
        )
        .unwrap();

        assert_eq!(outcome.receipt.prior_streak, 3);
        assert_eq!(outcome.receipt.completion.streak_bonus, 5);
    }

    #[test]
    fn test_overflowing_points_rejected() {
        let (mut tasks, children) = fixture();
        let days: Vec<NaiveDate> = (1..=3).rev().map(|d| today() - Duration::days(d)).collect();
        let (completions, children) = complete_on("task-child-1-0", &days, &tasks, children);

        // Base points plus the streak bonus overflow
        tasks[0].points = u32::MAX - 1;
        let err = record_completion(
            "task-child-1-0",
            "child-1",
            &completions,
            &tasks,
            &children,
            today(),
        )
        .unwrap_err();
        assert!(matches!(err, ChoreError::InvalidInput { .. }));

        // Balance overflow
        tasks[0].points = 10;
        let mut rich = children.clone();
        rich[0] = rich[0].clone().with_points(u32::MAX - 5);
        let err = record_completion(
            "task-child-1-0",
            "child-1",
            &completions,
            &tasks,
            &rich,
            today(),
        )
        .unwrap_err();
        assert!(matches!(err, ChoreError::InvalidInput { .. }));
        assert!(err.to_string().contains("overflows"));
    }

    #[test]
    fn test_level_up_reported() {
        let (tasks, mut children) = fixture();
        children[0] = children[0].clone().with_points(95);
        let outcome =
            record_completion("task-child-1-0", "child-1", &[], &tasks, &children, today())
                .unwrap();
        assert!(outcome.receipt.leveled_up);
        assert_eq!(outcome.receipt.new_level, 2);
        assert_eq!(outcome.children[0].level(), 2);
    }

    #[test]
    fn test_unknown_task() {
        let (tasks, children) = fixture();
        let err = record_completion("nope", "child-1", &[], &tasks, &children, today())
            .unwrap_err();
        assert!(matches!(err, ChoreError::NotFound { kind: "task", .. }));
    }

    #[test]
    fn test_unknown_child() {
        let (tasks, children) = fixture();
        let err = record_completion("task-child-1-0", "ghost", &[], &tasks, &children, today())
            .unwrap_err();
        assert!(matches!(err, ChoreError::NotFound { .. }));
    }

    #[test]
    fn test_task_of_other_child_rejected() {
        let (tasks, children) = fixture();
        let err = record_completion("task-child-2-0", "child-1", &[], &tasks, &children, today())
            .unwrap_err();
        assert!(matches!(err, ChoreError::NotFound { kind: "task", .. }));
    }

    #[test]
    fn test_is_completed_on() {
        let (tasks, children) = fixture();
        let outcome =
            record_completion("task-child-1-0", "child-1", &[], &tasks, &children, today())
                .unwrap();
        let log = &outcome.completions;
        assert!(is_completed_on(log, "task-child-1-0", "child-1", today()));
        assert!(!is_completed_on(
            log,
            "task-child-1-0",
            "child-1",
            today() + Duration::days(1)
        ));
        assert!(!is_completed_on(log, "task-child-1-1", "child-1", today()));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            // Property: points equal the sum of completion points and level
            // tracks the formula after every completion
            #[test]
            fn prop_points_match_log(day_offsets in proptest::collection::btree_set(0i64..40, 1..25)) {
                let (tasks, children) = fixture();
                let days: Vec<NaiveDate> =
                    day_offsets.iter().map(|o| today() + Duration::days(*o)).collect();
                let (completions, children) =
                    complete_on("task-child-1-4", &days, &tasks, children);

                let total: u32 = completions.iter().map(|c| c.points).sum();
                prop_assert_eq!(children[0].points(), total);
                prop_assert_eq!(children[0].level(), total / 100 + 1);
                for c in &completions {
                    prop_assert_eq!(c.points, 20 + c.streak_bonus);
                }
            }
        }
    }
}
