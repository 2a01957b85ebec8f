//! CLI commands for the chore tracker.
//!
//! Each command takes its options, runs against a key-value store, and
//! returns a serializable output that renders as text or JSON:
//! - **setup**: create the household
//! - **status**: per-child dashboard for a day
//! - **complete**: record a task completion
//! - **redeem**: spend points on a reward

pub mod complete;
pub mod redeem;
pub mod setup;
pub mod status;

pub use complete::CompleteCommand;
pub use redeem::RedeemCommand;
pub use setup::SetupCommand;
pub use status::StatusCommand;
