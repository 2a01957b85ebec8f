//! File-based key-value store.
//!
//! Each key is stored as `<data_dir>/<key>.json`. Atomic writes are
//! achieved via temp file + rename.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{ChoreError, Result};
use crate::storage::KeyValueStore;
use crate::util::{read_to_string_with_limit, MAX_FILE_SIZE};

/// File-based key-value store.
#[derive(Debug, Clone)]
pub struct FileStore {
    /// Directory holding one file per key.
    data_dir: PathBuf,
    /// Largest file `get` will read.
    max_file_bytes: u64,
}

impl FileStore {
    /// Create a store in the data directory named by the configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let dir = config.data_dir().ok_or_else(|| {
            ChoreError::config("Could not determine data directory (no home directory)")
        })?;
        Ok(Self::with_dir(dir)?.with_max_file_bytes(config.storage.max_file_bytes))
    }

    /// Create a store in a custom directory, creating it if needed.
    pub fn with_dir(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.into();

        if !data_dir.exists() {
            fs::create_dir_all(&data_dir).map_err(|e| ChoreError::storage(&data_dir, e))?;
        }

        Ok(Self {
            data_dir,
            max_file_bytes: MAX_FILE_SIZE,
        })
    }

    /// Override the read size limit.
    pub fn with_max_file_bytes(mut self, max_file_bytes: u64) -> Self {
        self.max_file_bytes = max_file_bytes;
        self
    }

    /// Directory holding the collection files.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Get the path for a key, rejecting keys that could escape the directory.
    fn key_path(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(ChoreError::store(format!("invalid key '{}'", key)));
        }
        Ok(self.data_dir.join(format!("{}.json", key)))
    }

    /// Get the path for a temp file used during atomic writes.
    fn temp_path(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!(".{}.json.tmp", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key)?;

        if !path.exists() {
            return Ok(None);
        }

        read_to_string_with_limit(&path, self.max_file_bytes).map(Some)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let final_path = self.key_path(key)?;
        let temp_path = self.temp_path(key);

        {
            let mut file =
                fs::File::create(&temp_path).map_err(|e| ChoreError::storage(&temp_path, e))?;
            file.write_all(value.as_bytes())
                .map_err(|e| ChoreError::storage(&temp_path, e))?;
            file.sync_all()
                .map_err(|e| ChoreError::storage(&temp_path, e))?;
        }

        // Rename temp file to final path (atomic on POSIX)
        fs::rename(&temp_path, &final_path).map_err(|e| ChoreError::storage(&final_path, e))?;

        Ok(())
    }
}
