//! Unified error types for the chore tracker.
//!
//! Engine rejections (`AlreadyCompletedToday`, `InsufficientPoints`) are
//! ordinary, recoverable outcomes of user intents. `NotFound` means the
//! caller passed an id that is not part of the snapshot. Storage and
//! persistence errors come from the key-value store boundary and never
//! leave the in-memory snapshot half-updated.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for chore tracker operations.
#[derive(Error, Debug)]
pub enum ChoreError {
    /// The task was already completed by this child on this day.
    #[error("task {task_id} already completed by {child_id} on {date}")]
    AlreadyCompletedToday {
        task_id: String,
        child_id: String,
        date: String,
    },

    /// The child cannot afford the reward.
    #[error("insufficient points: {child_id} has {available}, reward {reward_id} costs {cost}")]
    InsufficientPoints {
        child_id: String,
        reward_id: String,
        available: u32,
        cost: u32,
    },

    /// A task, child or reward id did not resolve.
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// Setup input rejected (blank names, non-positive ages).
    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    /// I/O errors from file store operations.
    #[error("storage error at {path}: {source}")]
    Storage {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Key-value store failures that are not plain I/O.
    #[error("store error: {message}")]
    Store { message: String },

    /// A collection could not be written back to the store.
    #[error("failed to persist {key}: {message}")]
    Persistence { key: String, message: String },

    /// JSON or TOML serialization errors.
    #[error("serialization error: {message}")]
    Serde { message: String },

    /// Configuration loading errors.
    #[error("config error: {message}")]
    Config { message: String },
}

/// A specialized Result type for chore tracker operations.
pub type Result<T> = std::result::Result<T, ChoreError>;

impl ChoreError {
    /// Create an already-completed error.
    pub fn already_completed(
        task_id: impl Into<String>,
        child_id: impl Into<String>,
        date: impl ToString,
    ) -> Self {
        Self::AlreadyCompletedToday {
            task_id: task_id.into(),
            child_id: child_id.into(),
            date: date.to_string(),
        }
    }

    /// Create an insufficient points error.
    pub fn insufficient_points(
        child_id: impl Into<String>,
        reward_id: impl Into<String>,
        available: u32,
        cost: u32,
    ) -> Self {
        Self::InsufficientPoints {
            child_id: child_id.into(),
            reward_id: reward_id.into(),
            available,
            cost,
        }
    }

    /// Create a not found error for the given entity kind.
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// Create an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a storage error from an I/O error.
    pub fn storage(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Storage {
            path: path.into(),
            source,
        }
    }

    /// Create a store error.
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }

    /// Create a persistence error for a collection key.
    pub fn persistence(key: impl Into<String>, cause: &ChoreError) -> Self {
        Self::Persistence {
            key: key.into(),
            message: cause.to_string(),
        }
    }

    /// Create a serialization error.
    pub fn serde(message: impl Into<String>) -> Self {
        Self::Serde {
            message: message.into(),
        }
    }

    /// Create a config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Whether this error is an expected rejection of a user intent.
    ///
    /// Recoverable errors leave every collection untouched and are shown to
    /// the user as a no-op rather than a failure.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::AlreadyCompletedToday { .. } | Self::InsufficientPoints { .. }
        )
    }
}

impl From<io::Error> for ChoreError {
    fn from(err: io::Error) -> Self {
        Self::Storage {
            path: PathBuf::new(),
            source: err,
        }
    }
}

impl From<serde_json::Error> for ChoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde {
            message: err.to_string(),
        }
    }
}

/// Trait for best-effort error handling.
///
/// Used where a failure should be logged and replaced with a safe value
/// instead of aborting the command (config loading, rollback writes).
pub trait FailOpen<T> {
    /// Handle an error by logging a warning and returning the default value.
    fn fail_open_default(self, context: &str) -> T
    where
        T: Default;

    /// Handle an error by logging a warning and returning the provided fallback.
    fn fail_open_with(self, context: &str, fallback: T) -> T;
}

impl<T> FailOpen<T> for Result<T> {
    fn fail_open_default(self, context: &str) -> T
    where
        T: Default,
    {
        match self {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!("{}: {} (using default)", context, err);
                T::default()
            }
        }
    }

    fn fail_open_with(self, context: &str, fallback: T) -> T {
        match self {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!("{}: {} (using fallback)", context, err);
                fallback
            }
        }
    }
}

/// Exit codes for the `chores` CLI.
pub mod exit_codes {
    /// The command succeeded (including idempotent no-ops).
    pub const SUCCESS: i32 = 0;

    /// The command failed.
    pub const ERROR: i32 = 1;

    /// The intent was rejected by the engine (e.g. insufficient points).
    pub const REJECTED: i32 = 2;

    /// The process panicked.
    pub const CRASH: i32 = 3;
}
