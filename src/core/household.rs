//! The household snapshot: all five collections at one point in time.

use chrono::NaiveDate;

use super::catalog::{default_rewards, tasks_for_child};
use super::completion::{record_completion, CompletionOutcome};
use super::model::{Caregiver, Child, Completion, Reward, Task};
use super::redemption::{redeem, RedemptionOutcome};
use crate::error::Result;

/// Immutable snapshot of every collection.
///
/// Engine operations never modify a snapshot in place; they return
/// outcomes that the owner applies with [`Household::apply_completion`] or
/// [`Household::apply_redemption`] to get the next snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Household {
    pub caregivers: Vec<Caregiver>,
    pub children: Vec<Child>,
    pub tasks: Vec<Task>,
    pub completions: Vec<Completion>,
    pub rewards: Vec<Reward>,
}

impl Household {
    /// Build the initial snapshot: default tasks for every child and,
    /// optionally, the default reward catalog.
    pub fn setup(caregivers: Vec<Caregiver>, children: Vec<Child>, seed_rewards: bool) -> Self {
        let tasks = children.iter().flat_map(tasks_for_child).collect();
        let rewards = if seed_rewards {
            default_rewards()
        } else {
            Vec::new()
        };
        Self {
            caregivers,
            children,
            tasks,
            completions: Vec::new(),
            rewards,
        }
    }

    /// Whether setup has run.
    pub fn is_initialized(&self) -> bool {
        !self.caregivers.is_empty()
    }

    pub fn child(&self, id: &str) -> Option<&Child> {
        self.children.iter().find(|c| c.id == id)
    }

    pub fn reward(&self, id: &str) -> Option<&Reward> {
        self.rewards.iter().find(|r| r.id == id)
    }

    /// Tasks assigned to a child, in catalog order.
    pub fn tasks_for<'a>(&'a self, child_id: &'a str) -> impl Iterator<Item = &'a Task> + 'a {
        self.tasks.iter().filter(move |t| t.child_id == child_id)
    }

    /// Compute the result of completing a task without changing `self`.
    pub fn complete_task(
        &self,
        task_id: &str,
        child_id: &str,
        today: NaiveDate,
    ) -> Result<CompletionOutcome> {
        record_completion(
            task_id,
            child_id,
            &self.completions,
            &self.tasks,
            &self.children,
            today,
        )
    }

    /// Compute the result of redeeming a reward without changing `self`.
    pub fn redeem(&self, reward_id: &str, child_id: &str) -> Result<RedemptionOutcome> {
        redeem(reward_id, child_id, &self.children, &self.rewards)
    }

    /// Next snapshot after a completion.
    pub fn apply_completion(&self, outcome: &CompletionOutcome) -> Self {
        Self {
            completions: outcome.completions.clone(),
            children: outcome.children.clone(),
            ..self.clone()
        }
    }

    /// Next snapshot after a redemption.
    pub fn apply_redemption(&self, outcome: &RedemptionOutcome) -> Self {
        Self {
            children: outcome.children.clone(),
            ..self.clone()
        }
    }
}
