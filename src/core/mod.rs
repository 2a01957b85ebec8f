//! Core types and logic for the chore tracker.
//!
//! This module contains the entity model, the default catalog, and the
//! progress & rewards engine: streaks, completion recording and reward
//! redemption. Everything here is pure over explicit snapshots.

pub mod catalog;
pub mod completion;
pub mod household;
pub mod model;
pub mod redemption;
pub mod setup;
pub mod streak;
pub mod summary;

pub use catalog::{default_avatar, default_rewards, generate, tasks_for_child, TaskTemplate, AVATARS};
pub use completion::{is_completed_on, record_completion, CompletionOutcome, CompletionReceipt};
pub use household::Household;
pub use model::{
    level_for, Caregiver, Child, Completion, Reward, Task, TaskCategory, TaskType,
    POINTS_PER_LEVEL,
};
pub use redemption::{can_afford, redeem, RedemptionOutcome, RedemptionReceipt};
pub use setup::{generate_pin, setup_caregivers, setup_children, NewChild};
pub use streak::{streak, streak_bonus, streak_for, STREAK_BLOCK_DAYS, STREAK_BONUS_PER_BLOCK};
pub use summary::{
    child_summary, points_earned_on, task_board, ChildSummary, RewardStatus, Section, TaskStatus,
};
