//! Chores - household chore tracker with points, streaks and rewards.
//!
//! Caregivers set up a household of children; each child gets an
//! age-appropriate task catalog. Completing a task awards points plus a
//! streak bonus for consecutive days, points accumulate into levels, and
//! points can be spent on rewards. All state lives in a key-value store as
//! five JSON collections.

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod storage;
pub mod util;

pub use config::Config;
pub use core::{
    Caregiver, Child, ChildSummary, Completion, CompletionReceipt, Household, RedemptionReceipt,
    Reward, Task, TaskCategory, TaskType,
};
pub use error::{ChoreError, Result};
pub use storage::{FileStore, KeyValueStore, Ledger, MemoryStore};

// CLI commands
pub use cli::{CompleteCommand, RedeemCommand, SetupCommand, StatusCommand};
