//! Redeem command.
//!
//! Spends a child's points on a reward. A balance below the reward cost is
//! a rejection, not a failure: nothing changes and the caller is told why.

use serde::Serialize;

use crate::core::RedemptionReceipt;
use crate::error::ChoreError;
use crate::storage::{KeyValueStore, Ledger};

/// Options for the redeem command.
#[derive(Debug, Clone, Default)]
pub struct RedeemOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
}

/// Output format for the redeem command.
#[derive(Debug, Clone, Serialize)]
pub struct RedeemOutput {
    /// Whether the reward was redeemed.
    pub success: bool,
    pub reward_id: String,
    pub child_id: String,
    /// The child cannot afford the reward.
    pub rejected: bool,
    /// Balance at the time of a rejection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available: Option<u32>,
    /// What was redeemed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt: Option<RedemptionReceipt>,
    /// Error message if redemption failed or was rejected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RedeemOutput {
    /// Create a successful output.
    pub fn success(receipt: RedemptionReceipt) -> Self {
        Self {
            success: true,
            reward_id: receipt.reward_id.clone(),
            child_id: receipt.child_id.clone(),
            rejected: false,
            available: None,
            receipt: Some(receipt),
            error: None,
        }
    }

    /// Create an output for a reward the child cannot afford.
    pub fn rejected(reward_id: &str, child_id: &str, available: u32, error: String) -> Self {
        Self {
            rejected: true,
            available: Some(available),
            ..Self::failure(reward_id, child_id, error)
        }
    }

    /// Create a failed output.
    pub fn failure(reward_id: &str, child_id: &str, error: impl Into<String>) -> Self {
        Self {
            success: false,
            reward_id: reward_id.to_string(),
            child_id: child_id.to_string(),
            rejected: false,
            available: None,
            receipt: None,
            error: Some(error.into()),
        }
    }
}

/// The redeem command implementation.
pub struct RedeemCommand<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> RedeemCommand<S> {
    /// Create a new redeem command.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Run the redeem command.
    pub fn run(&self, reward_id: &str, child_id: &str) -> RedeemOutput {
        let result = Ledger::open(&self.store).and_then(|mut l| l.redeem(reward_id, child_id));

        match result {
            Ok(receipt) => RedeemOutput::success(receipt),
            Err(e) => match &e {
                ChoreError::InsufficientPoints { available, .. } => {
                    RedeemOutput::rejected(reward_id, child_id, *available, e.to_string())
                }
                _ => RedeemOutput::failure(reward_id, child_id, e.to_string()),
            },
        }
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &RedeemOutput, options: &RedeemOptions) -> String {
        if options.quiet {
            return String::new();
        }

        if options.json {
            serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string())
        } else {
            self.format_human_readable(output)
        }
    }

    /// Format output as human-readable text.
    fn format_human_readable(&self, output: &RedeemOutput) -> String {
        if output.rejected {
            return format!(
                "Not enough points for {} (have {}).\n",
                output.reward_id,
                output.available.unwrap_or(0)
            );
        }

        if !output.success {
            return format!(
                "Redeem failed: {}\n",
                output.error.as_deref().unwrap_or("unknown error")
            );
        }

        match &output.receipt {
            Some(receipt) => format!(
                "Redeemed {} for {} points.\nBalance: {} points | Level {}",
                receipt.reward_name, receipt.cost, receipt.new_points, receipt.new_level
            ),
            None => String::new(),
        }
    }
}
