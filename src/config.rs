//! Configuration loading for the chore tracker.
//!
//! Configuration follows a precedence chain:
//! 1. Environment variables (highest priority)
//! 2. Project config (`.chores/config.toml` in the working directory)
//! 3. User config (`~/.chores/config.toml`)
//! 4. Defaults (lowest priority)
//!
//! All configuration is optional. The system runs with sensible defaults
//! when no config exists.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ChoreError, FailOpen, Result};
use crate::util::MAX_FILE_SIZE;

/// Main configuration struct.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Where and how collections are stored.
    pub storage: StorageConfig,
    /// First-run setup behavior.
    pub setup: SetupConfig,
}

/// Storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory for collection files. Defaults to `<chores_home>/data`.
    pub data_dir: Option<PathBuf>,
    /// Largest collection file that will be read.
    pub max_file_bytes: u64,
}

/// Smallest accepted `max_file_bytes`.
pub const MIN_FILE_BYTES: u64 = 1024;

impl StorageConfig {
    /// Check if a max_file_bytes value is valid.
    pub fn is_valid_max_file_bytes(value: u64) -> bool {
        value >= MIN_FILE_BYTES
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            max_file_bytes: MAX_FILE_SIZE,
        }
    }
}

/// Setup configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SetupConfig {
    /// Whether setup seeds the default reward catalog.
    pub seed_default_rewards: bool,
}

impl Default for SetupConfig {
    fn default() -> Self {
        Self {
            seed_default_rewards: true,
        }
    }
}

/// One config file as written: only the keys it actually sets.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
struct ConfigLayer {
    storage: StorageLayer,
    setup: SetupLayer,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
struct StorageLayer {
    data_dir: Option<PathBuf>,
    max_file_bytes: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
struct SetupLayer {
    seed_default_rewards: Option<bool>,
}

impl ConfigLayer {
    /// Parse a config file.
    fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| ChoreError::storage(path, e))?;
        toml::from_str(&content).map_err(|e| ChoreError::config(e.to_string()))
    }
}

impl Config {
    /// Load configuration with full precedence chain.
    pub fn load() -> Self {
        match env::current_dir() {
            Ok(cwd) => Self::load_from_cwd(&cwd),
            Err(_) => {
                let mut config = Config::default();
                if let Some(user_config) = Self::load_user_config() {
                    config = config.merge(user_config);
                }
                config.apply_env_overrides();
                config
            }
        }
    }

    /// Load configuration with a specific working directory.
    pub fn load_from_cwd(cwd: &Path) -> Self {
        let mut config = Config::default();

        if let Some(user_config) = Self::load_user_config() {
            config = config.merge(user_config);
        }

        if let Some(project_config) = Self::load_project_config(cwd) {
            config = config.merge(project_config);
        }

        config.apply_env_overrides();

        config
    }

    /// Load user config from `<chores_home>/config.toml`.
    fn load_user_config() -> Option<ConfigLayer> {
        let home = chores_home()?;
        Self::load_optional(&home.join("config.toml"))
    }

    /// Load project config from `.chores/config.toml` in the given directory.
    fn load_project_config(cwd: &Path) -> Option<ConfigLayer> {
        Self::load_optional(&cwd.join(".chores").join("config.toml"))
    }

    /// Load a config file that may not exist. Parse errors are logged and
    /// the layer is skipped.
    fn load_optional(path: &Path) -> Option<ConfigLayer> {
        if !path.exists() {
            return None;
        }
        ConfigLayer::load(path)
            .map(Some)
            .fail_open_default(&format!("ignoring config file {}", path.display()))
    }

    /// Load config from a specific file path.
    ///
    /// Keys the file does not set keep their defaults.
    pub fn load_from_file(path: &Path) -> Result<Config> {
        Ok(Config::default().merge(ConfigLayer::load(path)?))
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = env::var("CHORES_DATA_DIR") {
            if val.is_empty() {
                tracing::warn!("CHORES_DATA_DIR is empty, ignoring");
            } else {
                self.storage.data_dir = Some(PathBuf::from(val));
            }
        }

        if let Ok(val) = env::var("CHORES_MAX_FILE_BYTES") {
            match val.parse::<u64>() {
                Ok(n) if StorageConfig::is_valid_max_file_bytes(n) => {
                    self.storage.max_file_bytes = n;
                }
                Ok(n) => {
                    tracing::warn!(
                        "CHORES_MAX_FILE_BYTES={} is below the minimum of {}, ignoring",
                        n,
                        MIN_FILE_BYTES
                    );
                }
                Err(_) => {
                    tracing::warn!("CHORES_MAX_FILE_BYTES={} is not a number, ignoring", val);
                }
            }
        }

        if let Ok(val) = env::var("CHORES_SEED_REWARDS") {
            match val.to_lowercase().as_str() {
                "true" | "1" | "yes" => self.setup.seed_default_rewards = true,
                "false" | "0" | "no" => self.setup.seed_default_rewards = false,
                _ => tracing::warn!("CHORES_SEED_REWARDS={} is not a boolean, ignoring", val),
            }
        }
    }

    /// Merge a config file layer into this one, field by field.
    ///
    /// Every key the layer sets wins, including one set back to its default.
    fn merge(mut self, layer: ConfigLayer) -> Self {
        if let Some(data_dir) = layer.storage.data_dir {
            self.storage.data_dir = Some(data_dir);
        }
        match layer.storage.max_file_bytes {
            Some(n) if StorageConfig::is_valid_max_file_bytes(n) => {
                self.storage.max_file_bytes = n;
            }
            Some(n) => {
                tracing::warn!(
                    "max_file_bytes={} is below the minimum of {}, ignoring",
                    n,
                    MIN_FILE_BYTES
                );
            }
            None => {}
        }
        if let Some(seed) = layer.setup.seed_default_rewards {
            self.setup.seed_default_rewards = seed;
        }

        self
    }

    /// Resolved data directory: the configured one, or `<chores_home>/data`.
    pub fn data_dir(&self) -> Option<PathBuf> {
        self.storage
            .data_dir
            .clone()
            .or_else(|| chores_home().map(|h| h.join("data")))
    }
}

/// Get the chores home directory.
///
/// `CHORES_HOME` when set and non-empty, otherwise `~/.chores`.
pub fn chores_home() -> Option<PathBuf> {
    if let Ok(home) = env::var("CHORES_HOME") {
        if home.is_empty() {
            tracing::warn!("CHORES_HOME is empty, using default");
        } else {
            return Some(PathBuf::from(home));
        }
    }

    dirs::home_dir().map(|home| home.join(".chores"))
}

/// Path of the crash log written by the panic handler.
pub fn crash_log_path() -> Option<PathBuf> {
    chores_home().map(|h| h.join("crash.log"))
}
