//! Status command.
//!
//! Shows each child's dashboard for a day: points, level, today's stars,
//! the task board grouped by section, and which rewards are affordable.

use chrono::NaiveDate;
use serde::Serialize;

use crate::core::{child_summary, ChildSummary, Section};
use crate::error::{ChoreError, Result};
use crate::storage::{load_household, KeyValueStore};

/// Options for the status command.
#[derive(Debug, Clone, Default)]
pub struct StatusOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
    /// Only show this child.
    pub child: Option<String>,
}

/// Output format for the status command.
#[derive(Debug, Clone, Serialize)]
pub struct StatusOutput {
    /// Whether the status was loaded.
    pub success: bool,
    /// Day the board was computed for (YYYY-MM-DD).
    pub date: String,
    pub children: Vec<ChildSummary>,
    /// Error message if loading failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StatusOutput {
    /// Create a successful output.
    pub fn success(date: NaiveDate, children: Vec<ChildSummary>) -> Self {
        Self {
            success: true,
            date: date.to_string(),
            children,
            error: None,
        }
    }

    /// Create a failed output.
    pub fn failure(date: NaiveDate, error: impl Into<String>) -> Self {
        Self {
            success: false,
            date: date.to_string(),
            children: Vec::new(),
            error: Some(error.into()),
        }
    }
}

/// The status command implementation.
pub struct StatusCommand<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> StatusCommand<S> {
    /// Create a new status command.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Run the status command for `today`.
    pub fn run(&self, options: &StatusOptions, today: NaiveDate) -> StatusOutput {
        match self.summaries(options, today) {
            Ok(children) => StatusOutput::success(today, children),
            Err(e) => StatusOutput::failure(today, e.to_string()),
        }
    }

    fn summaries(&self, options: &StatusOptions, today: NaiveDate) -> Result<Vec<ChildSummary>> {
        let household = load_household(&self.store)?;
        if !household.is_initialized() {
            return Err(ChoreError::invalid_input(
                "household not set up (run `chores setup` first)",
            ));
        }

        match &options.child {
            Some(child_id) => Ok(vec![child_summary(&household, child_id, today)?]),
            None => household
                .children
                .iter()
                .map(|c| child_summary(&household, &c.id, today))
                .collect(),
        }
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &StatusOutput, options: &StatusOptions) -> String {
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
    fn format_human_readable(&self, output: &StatusOutput) -> String {
        if !output.success {
            return format!(
                "Status failed: {}\n",
                output.error.as_deref().unwrap_or("unknown error")
            );
        }

        if output.children.is_empty() {
            return "No children found.\n".to_string();
        }

        let mut lines = vec![format!("Status for {}", output.date), String::new()];

        for summary in &output.children {
            lines.push(format!(
                "{} {} | Level {} | {} points (+{} today) | ID: {}",
                summary.avatar,
                summary.name,
                summary.level,
                summary.points,
                summary.points_today,
                summary.child_id
            ));
            lines.push(format!(
                "Done today: {}/{}",
                summary.completed_today, summary.task_count
            ));

            for section in Section::ALL {
                let mut tasks = summary.section(section).peekable();
                if tasks.peek().is_none() {
                    continue;
                }
                lines.push(String::new());
                lines.push(format!("  {}", section.title()));
                for status in tasks {
                    let mark = if status.completed_today { "x" } else { " " };
                    let streak = if status.streak > 0 {
                        format!(" 🔥{}", status.streak)
                    } else {
                        String::new()
                    };
                    lines.push(format!(
                        "  [{}] {} {} (+{}){} | ID: {}",
                        mark,
                        status.task.icon,
                        status.task.name,
                        status.task.points,
                        streak,
                        status.task.id
                    ));
                }
            }

            if !summary.rewards.is_empty() {
                lines.push(String::new());
                lines.push("  Rewards".to_string());
                for status in &summary.rewards {
                    let mark = if status.affordable { "$" } else { " " };
                    lines.push(format!(
                        "  [{}] {} {} ({} points) | ID: {}",
                        mark,
                        status.reward.icon,
                        status.reward.name,
                        status.reward.cost,
                        status.reward.id
                    ));
                }
            }

            lines.push(String::new());
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Caregiver, Child, Household};
    use crate::storage::{save_household, Ledger, MemoryStore};
    use std::sync::Arc;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
    }

    fn seeded_store() -> Arc<MemoryStore> {
        let store = Arc::new(MemoryStore::new());
        let caregivers = vec![Caregiver {
            id: "cg-1".to_string(),
            name: "Dad".to_string(),
            pin: "4321".to_string(),
        }];
        let children = vec![
            Child::new("child-1", "Ada", 4, "🦄").with_points(60),
            Child::new("child-2", "Max", 9, "🦖"),
        ];
        save_household(store.as_ref(), &Household::setup(caregivers, children, true)).unwrap();
        store
    }

    #[test]
    fn test_status_not_set_up() {
        let cmd = StatusCommand::new(MemoryStore::new());
        let output = cmd.run(&StatusOptions::default(), today());
        assert!(!output.success);
        assert!(output.error.unwrap().contains("not set up"));
    }

    #[test]
    fn test_status_all_children() {
        let cmd = StatusCommand::new(seeded_store());
        let output = cmd.run(&StatusOptions::default(), today());

        assert!(output.success);
        assert_eq!(output.date, "2024-03-10");
        assert_eq!(output.children.len(), 2);
        assert_eq!(output.children[0].task_count, 13);
        assert_eq!(output.children[1].task_count, 19);
    }

    #[test]
    fn test_status_single_child_reflects_completions() {
        let store = seeded_store();
        let mut ledger = Ledger::open(Arc::clone(&store)).unwrap();
        ledger
            .complete_task("task-child-1-0", "child-1", today())
            .unwrap();

        let cmd = StatusCommand::new(Arc::clone(&store));
        let options = StatusOptions {
            child: Some("child-1".to_string()),
            ..Default::default()
        };
        let output = cmd.run(&options, today());

        assert!(output.success);
        let summary = &output.children[0];
        assert_eq!(summary.points, 70);
        assert_eq!(summary.points_today, 10);
        assert_eq!(summary.completed_today, 1);
        let done = summary.tasks.iter().find(|t| t.completed_today).unwrap();
        assert_eq!(done.task.id, "task-child-1-0");
        assert_eq!(done.streak, 1);
    }

    #[test]
    fn test_status_unknown_child() {
        let cmd = StatusCommand::new(seeded_store());
        let options = StatusOptions {
            child: Some("ghost".to_string()),
            ..Default::default()
        };
        let output = cmd.run(&options, today());
        assert!(!output.success);
        assert!(output.error.unwrap().contains("child not found: ghost"));
    }

    #[test]
    fn test_format_human_readable() {
        let cmd = StatusCommand::new(seeded_store());
        let options = StatusOptions {
            child: Some("child-1".to_string()),
            ..Default::default()
        };
        let output = cmd.run(&options, today());
        let text = cmd.format_output(&output, &options);

        assert!(text.contains("Status for 2024-03-10"));
        assert!(text.contains("Ada | Level 1 | 60 points (+0 today)"));
        assert!(text.contains("Done today: 0/13"));
        assert!(text.contains("Morning Routine"));
        assert!(text.contains("Character & Values"));
        // 60 points covers r1 (50) but not r2 (100)
        assert!(text.contains("[$] 📱 30 min screen time"));
        assert!(text.contains("[ ] 🍕 Choose dinner"));
    }

    #[test]
    fn test_format_json_and_quiet() {
        let cmd = StatusCommand::new(seeded_store());
        let json_opts = StatusOptions {
            json: true,
            ..Default::default()
        };
        let output = cmd.run(&json_opts, today());
        let value: serde_json::Value =
            serde_json::from_str(&cmd.format_output(&output, &json_opts)).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["children"][0]["level"], 1);

        let quiet = StatusOptions {
            quiet: true,
            ..Default::default()
        };
        assert!(cmd.format_output(&output, &quiet).is_empty());
    }
}
