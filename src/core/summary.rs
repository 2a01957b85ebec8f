//! Read-only dashboard queries over a household snapshot.

use chrono::NaiveDate;
use serde::Serialize;

use super::completion::is_completed_on;
use super::household::Household;
use super::model::{Completion, Reward, Task, TaskCategory, TaskType};
use super::redemption::can_afford;
use super::streak::streak_for;
use crate::error::{ChoreError, Result};

/// Dashboard grouping for a task.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Morning,
    Afternoon,
    Evening,
    Household,
    Values,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Morning,
        Section::Afternoon,
        Section::Evening,
        Section::Household,
        Section::Values,
    ];

    /// Behaviors always land in Values; chores follow their category.
    pub fn of(task: &Task) -> Self {
        if task.task_type == TaskType::Behavior {
            return Section::Values;
        }
        match task.category {
            TaskCategory::Morning => Section::Morning,
            TaskCategory::Afternoon => Section::Afternoon,
            TaskCategory::Evening => Section::Evening,
            TaskCategory::Household => Section::Household,
            TaskCategory::Values => Section::Values,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Section::Morning => "Morning Routine",
            Section::Afternoon => "After School",
            Section::Evening => "Evening Routine",
            Section::Household => "Household Help",
            Section::Values => "Character & Values",
        }
    }
}

/// A task with its state for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskStatus {
    pub task: Task,
    pub section: Section,
    pub completed_today: bool,
    /// Live streak as of the board's day.
    pub streak: u32,
}

/// A reward with affordability for one child.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RewardStatus {
    pub reward: Reward,
    pub affordable: bool,
}

/// Everything a child's dashboard shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChildSummary {
    pub child_id: String,
    pub name: String,
    pub avatar: String,
    pub points: u32,
    pub level: u32,
    pub points_today: u32,
    pub completed_today: usize,
    pub task_count: usize,
    pub tasks: Vec<TaskStatus>,
    pub rewards: Vec<RewardStatus>,
}

impl ChildSummary {
    /// Tasks in one section, in catalog order.
    pub fn section(&self, section: Section) -> impl Iterator<Item = &TaskStatus> {
        self.tasks.iter().filter(move |t| t.section == section)
    }
}

/// Points a child earned on `day`.
pub fn points_earned_on(completions: &[Completion], child_id: &str, day: NaiveDate) -> u32 {
    completions
        .iter()
        .filter(|c| c.child_id == child_id && c.date == day)
        .map(|c| c.points)
        .sum()
}

/// Per-task status for a child on `today`, in catalog order.
pub fn task_board(household: &Household, child_id: &str, today: NaiveDate) -> Vec<TaskStatus> {
    household
        .tasks_for(child_id)
        .map(|task| TaskStatus {
            section: Section::of(task),
            completed_today: is_completed_on(&household.completions, &task.id, child_id, today),
            streak: streak_for(&household.completions, &task.id, child_id, today),
            task: task.clone(),
        })
        .collect()
}

/// Dashboard summary for one child.
pub fn child_summary(
    household: &Household,
    child_id: &str,
    today: NaiveDate,
) -> Result<ChildSummary> {
    let child = household
        .child(child_id)
        .ok_or_else(|| ChoreError::not_found("child", child_id))?;

    let tasks = task_board(household, child_id, today);
    let rewards = household
        .rewards
        .iter()
        .map(|reward| RewardStatus {
            affordable: can_afford(child, reward),
            reward: reward.clone(),
        })
        .collect();

    Ok(ChildSummary {
        child_id: child.id.clone(),
        name: child.name.clone(),
        avatar: child.avatar.clone(),
        points: child.points(),
        level: child.level(),
        points_today: points_earned_on(&household.completions, child_id, today),
        completed_today: tasks.iter().filter(|t| t.completed_today).count(),
        task_count: tasks.len(),
        tasks,
        rewards,
    })
}
