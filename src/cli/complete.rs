//! Complete command.
//!
//! Marks a task done for a child on a day, awarding base points plus any
//! streak bonus. Completing the same task twice on one day is a no-op.

use chrono::NaiveDate;
use serde::Serialize;

use crate::core::CompletionReceipt;
use crate::error::ChoreError;
use crate::storage::{KeyValueStore, Ledger};

/// Options for the complete command.
#[derive(Debug, Clone, Default)]
pub struct CompleteOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
}

/// Output format for the complete command.
#[derive(Debug, Clone, Serialize)]
pub struct CompleteOutput {
    /// Whether the command succeeded (a repeat completion counts).
    pub success: bool,
    pub task_id: String,
    pub child_id: String,
    pub date: String,
    /// The task was already completed on this day; nothing was recorded.
    pub already_completed: bool,
    /// What was recorded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt: Option<CompletionReceipt>,
    /// Error message if the completion failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CompleteOutput {
    fn base(task_id: &str, child_id: &str, date: NaiveDate) -> Self {
        Self {
            success: true,
            task_id: task_id.to_string(),
            child_id: child_id.to_string(),
            date: date.to_string(),
            already_completed: false,
            receipt: None,
            error: None,
        }
    }

    /// Create a successful output.
    pub fn success(receipt: CompletionReceipt) -> Self {
        let completion = &receipt.completion;
        let base = Self::base(&completion.task_id, &completion.child_id, completion.date);
        Self {
            receipt: Some(receipt),
            ..base
        }
    }

    /// Create an output for a completion that already exists.
    pub fn already_completed(task_id: &str, child_id: &str, date: NaiveDate) -> Self {
        Self {
            already_completed: true,
            ..Self::base(task_id, child_id, date)
        }
    }

    /// Create a failed output.
    pub fn failure(
        task_id: &str,
        child_id: &str,
        date: NaiveDate,
        error: impl Into<String>,
    ) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            ..Self::base(task_id, child_id, date)
        }
    }
}

/// The complete command implementation.
pub struct CompleteCommand<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> CompleteCommand<S> {
    /// Create a new complete command.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Run the complete command.
    pub fn run(&self, task_id: &str, child_id: &str, today: NaiveDate) -> CompleteOutput {
        let result =
            Ledger::open(&self.store).and_then(|mut l| l.complete_task(task_id, child_id, today));

        match result {
            Ok(receipt) => CompleteOutput::success(receipt),
            Err(ChoreError::AlreadyCompletedToday { .. }) => {
                tracing::debug!(task_id, child_id, %today, "already completed, nothing recorded");
                CompleteOutput::already_completed(task_id, child_id, today)
            }
            Err(e) => CompleteOutput::failure(task_id, child_id, today, e.to_string()),
        }
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &CompleteOutput, options: &CompleteOptions) -> String {
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
    fn format_human_readable(&self, output: &CompleteOutput) -> String {
        if !output.success {
            return format!(
                "Complete failed: {}\n",
                output.error.as_deref().unwrap_or("unknown error")
            );
        }

        if output.already_completed {
            return format!(
                "Task {} was already completed on {}. No points awarded.\n",
                output.task_id, output.date
            );
        }

        let Some(receipt) = &output.receipt else {
            return String::new();
        };

        let mut lines = vec![format!(
            "+{} points for {} ({})",
            receipt.points_awarded, output.task_id, output.date
        )];
        if receipt.completion.streak_bonus > 0 {
            lines.push(format!(
                "Streak bonus: +{} ({} days in a row)",
                receipt.completion.streak_bonus, receipt.prior_streak
            ));
        }
        lines.push(format!(
            "Balance: {} points | Level {}",
            receipt.new_points, receipt.new_level
        ));
        if receipt.leveled_up {
            lines.push(format!("Level up! Now level {}.", receipt.new_level));
        }

        lines.join("\n")
    }
}
