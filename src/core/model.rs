//! Entity types for the chore tracker.
//!
//! These are the five records kept in the key-value store. Field names
//! serialize in camelCase (`childId`, `taskId`, `streakBonus`) so the stored
//! collections are plain JSON arrays of the records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Points needed to advance one level.
pub const POINTS_PER_LEVEL: u32 = 100;

/// Level for a point total: `floor(points / 100) + 1`.
pub fn level_for(points: u32) -> u32 {
    points / POINTS_PER_LEVEL + 1
}

/// A caregiver. The PIN is a display code only and is never checked.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Caregiver {
    pub id: String,
    pub name: String,
    pub pin: String,
}

/// A child taking part in the points economy.
///
/// `points` is private so every change goes through [`Child::credit`] or
/// [`Child::debit`]. `level` is not stored on the struct at all: it is
/// derived from `points` and only materialized in the serialized record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "ChildRecord", into = "ChildRecord")]
pub struct Child {
    pub id: String,
    pub name: String,
    pub age: u32,
    pub avatar: String,
    points: u32,
}

impl Child {
    /// Create a new child with zero points.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        age: u32,
        avatar: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            age,
            avatar: avatar.into(),
            points: 0,
        }
    }

    /// Set the starting point balance.
    pub fn with_points(mut self, points: u32) -> Self {
        self.points = points;
        self
    }

    /// Current point balance.
    pub fn points(&self) -> u32 {
        self.points
    }

    /// Current level, always `floor(points / 100) + 1`.
    pub fn level(&self) -> u32 {
        level_for(self.points)
    }

    /// Return a copy with `amount` points added, or `None` if the balance
    /// would overflow.
    pub fn credit(&self, amount: u32) -> Option<Self> {
        let points = self.points.checked_add(amount)?;
        let mut next = self.clone();
        next.points = points;
        Some(next)
    }

    /// Return a copy with `amount` points removed, or `None` if the balance
    /// is too small. Balances never go negative.
    pub fn debit(&self, amount: u32) -> Option<Self> {
        let points = self.points.checked_sub(amount)?;
        let mut next = self.clone();
        next.points = points;
        Some(next)
    }
}

/// Serialized shape of a [`Child`], including the derived level.
#[derive(Serialize, Deserialize)]
struct ChildRecord {
    id: String,
    name: String,
    age: u32,
    points: u32,
    #[serde(default)]
    level: u32,
    avatar: String,
}

impl From<ChildRecord> for Child {
    fn from(record: ChildRecord) -> Self {
        let expected = level_for(record.points);
        if record.level != expected {
            tracing::warn!(
                child_id = %record.id,
                stored = record.level,
                expected,
                "stored level disagrees with points, recomputing"
            );
        }
        Self {
            id: record.id,
            name: record.name,
            age: record.age,
            avatar: record.avatar,
            points: record.points,
        }
    }
}

impl From<Child> for ChildRecord {
    fn from(child: Child) -> Self {
        Self {
            level: child.level(),
            id: child.id,
            name: child.name,
            age: child.age,
            points: child.points,
            avatar: child.avatar,
        }
    }
}

/// Whether a task is a routine chore or a rewarded behavior.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    Chore,
    Behavior,
}

/// Time-of-day or theme bucket for a task.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TaskCategory {
    Morning,
    Afternoon,
    Evening,
    Household,
    Values,
}

/// A task assigned to exactly one child.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub child_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub task_type: TaskType,
    pub category: TaskCategory,
    pub points: u32,
    pub icon: String,
}

/// One completion of a task by a child on a calendar day.
///
/// `points` is the total credited (base plus streak bonus) and is fixed at
/// creation time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Completion {
    pub id: String,
    pub task_id: String,
    pub child_id: String,
    pub date: NaiveDate,
    pub points: u32,
    pub streak_bonus: u32,
}

impl Completion {
    /// Completion id, unique per (task, day).
    pub fn id_for(task_id: &str, date: NaiveDate) -> String {
        format!("comp-{}-{}", task_id, date.format("%Y%m%d"))
    }

    /// Whether this completion belongs to the given (task, child) pair.
    pub fn is_for(&self, task_id: &str, child_id: &str) -> bool {
        self.task_id == task_id && self.child_id == child_id
    }
}

/// A reward that can be bought with points.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Reward {
    pub id: String,
    pub name: String,
    pub cost: u32,
    pub icon: String,
}
