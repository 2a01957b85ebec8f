//! Chores - household chore tracker
//!
//! CLI entry point with global panic handler.

use std::io::Write;
use std::process::ExitCode;

use chrono::{Local, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use chores::config::{crash_log_path, Config};
use chores::core::NewChild;
use chores::error::exit_codes;
use chores::storage::FileStore;

// =============================================================================
// CLI Definition
// =============================================================================

/// Chores - track chores, streaks, levels and rewards for a household
#[derive(Parser)]
#[command(name = "chores")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the household: caregivers, children and their tasks
    Setup {
        /// Caregiver name (repeatable)
        #[arg(long = "caregiver", required = true)]
        caregivers: Vec<String>,
        /// Child as NAME:AGE[:AVATAR] (repeatable)
        #[arg(long = "child", required = true)]
        children: Vec<NewChild>,
        /// Replace an existing household
        #[arg(long)]
        force: bool,
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
    },

    /// Show the dashboard for every child, or one
    Status {
        /// Only show this child ID
        #[arg(long)]
        child: Option<String>,
        /// Day to show (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
    },

    /// Mark a task done for a child
    Complete {
        /// Task ID
        task_id: String,
        /// Child ID
        #[arg(long)]
        child: String,
        /// Day of the completion (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
    },

    /// Spend a child's points on a reward
    Redeem {
        /// Reward ID
        reward_id: String,
        /// Child ID
        #[arg(long)]
        child: String,
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
    },
}

// =============================================================================
// Main Entry Point
// =============================================================================

fn main() -> ExitCode {
    setup_panic_handler();
    init_logging();

    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("chores error: {}", e);
            ExitCode::from(exit_codes::ERROR as u8)
        }
    }
}

/// Install the stderr subscriber, filtered by `CHORES_LOG` (default: warn).
fn init_logging() {
    let default_level = "warn";
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("CHORES_LOG")
                .or_else(|_| EnvFilter::try_new(default_level))
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

/// Set up the global panic handler.
///
/// On panic, logs to ~/.chores/crash.log and exits with code 3.
fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|info| {
        eprintln!("chores panic: {}", info);

        if let Some(crash_log) = crash_log_path() {
            if let Some(parent) = crash_log.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            if let Ok(mut file) = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&crash_log)
            {
                let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
                let _ = writeln!(file, "[{}] {}", timestamp, info);
            }
        }

        std::process::exit(exit_codes::CRASH);
    }));
}

/// Run the CLI and return the exit code.
fn run() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Setup {
            caregivers,
            children,
            force,
            json,
            quiet,
        } => run_setup(caregivers, children, force, json, quiet),
        Commands::Status {
            child,
            date,
            json,
            quiet,
        } => run_status(child, date, json, quiet),
        Commands::Complete {
            task_id,
            child,
            date,
            json,
            quiet,
        } => run_complete(&task_id, &child, date, json, quiet),
        Commands::Redeem {
            reward_id,
            child,
            json,
            quiet,
        } => run_redeem(&reward_id, &child, json, quiet),
    }
}

// =============================================================================
// Command Implementations
// =============================================================================

/// Resolve the effective day: an explicit `--date`, else the local date.
fn resolve_date(date: Option<NaiveDate>) -> NaiveDate {
    date.unwrap_or_else(|| Local::now().date_naive())
}

/// Convert a success boolean to an exit code.
fn success_to_exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::from(exit_codes::SUCCESS as u8)
    } else {
        ExitCode::from(exit_codes::ERROR as u8)
    }
}

fn print_output(formatted: &str) {
    if !formatted.is_empty() {
        println!("{}", formatted);
    }
}

fn run_setup(
    caregivers: Vec<String>,
    children: Vec<NewChild>,
    force: bool,
    json: bool,
    quiet: bool,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    use chores::cli::setup::{SetupCommand, SetupOptions};

    let config = Config::load();
    let store = FileStore::new(&config)?;

    let cmd = SetupCommand::new(store, config);
    let options = SetupOptions {
        json,
        quiet,
        caregivers,
        children,
        force,
    };

    let output = cmd.run(&options, Utc::now());
    print_output(&cmd.format_output(&output, &options));

    Ok(success_to_exit_code(output.success))
}

fn run_status(
    child: Option<String>,
    date: Option<NaiveDate>,
    json: bool,
    quiet: bool,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    use chores::cli::status::{StatusCommand, StatusOptions};

    let config = Config::load();
    let store = FileStore::new(&config)?;

    let cmd = StatusCommand::new(store);
    let options = StatusOptions { json, quiet, child };

    let output = cmd.run(&options, resolve_date(date));
    print_output(&cmd.format_output(&output, &options));

    Ok(success_to_exit_code(output.success))
}

fn run_complete(
    task_id: &str,
    child: &str,
    date: Option<NaiveDate>,
    json: bool,
    quiet: bool,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    use chores::cli::complete::{CompleteCommand, CompleteOptions};

    let config = Config::load();
    let store = FileStore::new(&config)?;

    let cmd = CompleteCommand::new(store);
    let options = CompleteOptions { json, quiet };

    let output = cmd.run(task_id, child, resolve_date(date));
    print_output(&cmd.format_output(&output, &options));

    Ok(success_to_exit_code(output.success))
}

fn run_redeem(
    reward_id: &str,
    child: &str,
    json: bool,
    quiet: bool,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    use chores::cli::redeem::{RedeemCommand, RedeemOptions};

    let config = Config::load();
    let store = FileStore::new(&config)?;

    let cmd = RedeemCommand::new(store);
    let options = RedeemOptions { json, quiet };

    let output = cmd.run(reward_id, child);
    print_output(&cmd.format_output(&output, &options));

    if output.rejected {
        return Ok(ExitCode::from(exit_codes::REJECTED as u8));
    }
    Ok(success_to_exit_code(output.success))
}

// =============================================================================
// Tests
// =============================================================================
