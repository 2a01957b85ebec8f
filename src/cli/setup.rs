//! Setup command.
//!
//! Creates caregivers and children, generates each child's default tasks,
//! optionally seeds the reward catalog, and persists the new household.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::Config;
use crate::core::{setup_caregivers, setup_children, Household, NewChild};
use crate::error::{ChoreError, Result};
use crate::storage::{KeyValueStore, Ledger};

/// Options for the setup command.
#[derive(Debug, Clone, Default)]
pub struct SetupOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
    /// Caregiver names.
    pub caregivers: Vec<String>,
    /// Children to create.
    pub children: Vec<NewChild>,
    /// Replace an existing household.
    pub force: bool,
}

/// A created caregiver, with the PIN shown once.
#[derive(Debug, Clone, Serialize)]
pub struct CaregiverInfo {
    pub id: String,
    pub name: String,
    pub pin: String,
}

/// A created child.
#[derive(Debug, Clone, Serialize)]
pub struct ChildInfo {
    pub id: String,
    pub name: String,
    pub age: u32,
    pub avatar: String,
    /// Number of generated tasks.
    pub task_count: usize,
}

/// Output format for the setup command.
#[derive(Debug, Clone, Serialize)]
pub struct SetupOutput {
    /// Whether setup was successful.
    pub success: bool,
    pub caregivers: Vec<CaregiverInfo>,
    pub children: Vec<ChildInfo>,
    /// Number of rewards in the catalog.
    pub reward_count: usize,
    /// Error message if setup failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SetupOutput {
    /// Create a successful output from the persisted household.
    pub fn success(household: &Household) -> Self {
        Self {
            success: true,
            caregivers: household
                .caregivers
                .iter()
                .map(|c| CaregiverInfo {
                    id: c.id.clone(),
                    name: c.name.clone(),
                    pin: c.pin.clone(),
                })
                .collect(),
            children: household
                .children
                .iter()
                .map(|c| ChildInfo {
                    id: c.id.clone(),
                    name: c.name.clone(),
                    age: c.age,
                    avatar: c.avatar.clone(),
                    task_count: household.tasks_for(&c.id).count(),
                })
                .collect(),
            reward_count: household.rewards.len(),
            error: None,
        }
    }

    /// Create a failed output.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            caregivers: Vec::new(),
            children: Vec::new(),
            reward_count: 0,
            error: Some(error.into()),
        }
    }
}

/// The setup command implementation.
pub struct SetupCommand<S: KeyValueStore> {
    store: S,
    config: Config,
}

impl<S: KeyValueStore> SetupCommand<S> {
    /// Create a new setup command.
    pub fn new(store: S, config: Config) -> Self {
        Self { store, config }
    }

    /// Run the setup command.
    pub fn run(&self, options: &SetupOptions, now: DateTime<Utc>) -> SetupOutput {
        match self.setup(options, now) {
            Ok(household) => SetupOutput::success(&household),
            Err(e) => SetupOutput::failure(e.to_string()),
        }
    }

    fn setup(&self, options: &SetupOptions, now: DateTime<Utc>) -> Result<Household> {
        let caregivers = setup_caregivers(&options.caregivers, now)?;
        if caregivers.is_empty() {
            return Err(ChoreError::invalid_input("at least one caregiver is required"));
        }
        if options.children.is_empty() {
            return Err(ChoreError::invalid_input("at least one child is required"));
        }
        let children = setup_children(&options.children, now)?;

        let household =
            Household::setup(caregivers, children, self.config.setup.seed_default_rewards);

        let mut ledger = Ledger::open(&self.store)?;
        ledger.initialize(household, options.force)?;
        Ok(ledger.household().clone())
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &SetupOutput, options: &SetupOptions) -> String {
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
    fn format_human_readable(&self, output: &SetupOutput) -> String {
        if !output.success {
            return format!(
                "Setup failed: {}\n",
                output.error.as_deref().unwrap_or("unknown error")
            );
        }

        let mut lines = vec!["Household ready.".to_string(), String::new()];

        lines.push("Caregivers:".to_string());
        for caregiver in &output.caregivers {
            lines.push(format!(
                "  {} (PIN {}) | ID: {}",
                caregiver.name, caregiver.pin, caregiver.id
            ));
        }

        lines.push(String::new());
        lines.push("Children:".to_string());
        for child in &output.children {
            lines.push(format!(
                "  {} {}, age {}: {} tasks | ID: {}",
                child.avatar, child.name, child.age, child.task_count, child.id
            ));
        }

        lines.push(String::new());
        lines.push(format!("Rewards available: {}", output.reward_count));

        lines.join("\n")
    }
}
