//! Reward redemption.

use serde::Serialize;

use super::model::{Child, Reward};
use crate::error::{ChoreError, Result};

/// New children snapshot produced by a successful redemption.
#[derive(Debug, Clone, PartialEq)]
pub struct RedemptionOutcome {
    pub children: Vec<Child>,
    pub receipt: RedemptionReceipt,
}

/// Summary of a single redemption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RedemptionReceipt {
    pub child_id: String,
    pub reward_id: String,
    pub reward_name: String,
    pub cost: u32,
    pub new_points: u32,
    pub new_level: u32,
}

/// Whether the child's balance covers the reward.
pub fn can_afford(child: &Child, reward: &Reward) -> bool {
    child.points() >= reward.cost
}

/// Redeem `reward_id` for `child_id`, debiting the reward cost.
///
/// Fails with `InsufficientPoints` when the balance is too small (there is
/// no partial redemption) and `NotFound` when either id does not resolve.
/// The level is recomputed from the lower balance and may drop.
pub fn redeem(
    reward_id: &str,
    child_id: &str,
    children: &[Child],
    rewards: &[Reward],
) -> Result<RedemptionOutcome> {
    let reward = rewards
        .iter()
        .find(|r| r.id == reward_id)
        .ok_or_else(|| ChoreError::not_found("reward", reward_id))?;
    let child = children
        .iter()
        .find(|c| c.id == child_id)
        .ok_or_else(|| ChoreError::not_found("child", child_id))?;

    let debited = child.debit(reward.cost).ok_or_else(|| {
        ChoreError::insufficient_points(child_id, reward_id, child.points(), reward.cost)
    })?;

    let receipt = RedemptionReceipt {
        child_id: child_id.to_string(),
        reward_id: reward_id.to_string(),
        reward_name: reward.name.clone(),
        cost: reward.cost,
        new_points: debited.points(),
        new_level: debited.level(),
    };

    let next_children = children
        .iter()
        .map(|c| {
            if c.id == child_id {
                debited.clone()
            } else {
                c.clone()
            }
        })
        .collect();

    tracing::debug!(reward_id, child_id, cost = reward.cost, "redeemed reward");

    Ok(RedemptionOutcome {
        children: next_children,
        receipt,
    })
}
