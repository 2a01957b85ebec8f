//! Utility functions for the chore tracker.

use std::fs;
use std::path::Path;

use crate::error::{ChoreError, Result};

/// Default maximum size of a collection file (10 MB).
///
/// A household's collections stay far below this; the limit guards
/// against reading an unrelated or corrupted file into memory.
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Read a file into a string with a size limit.
///
/// # Errors
///
/// Returns an error if the file cannot be read or exceeds `max_size`.
pub fn read_to_string_with_limit(path: &Path, max_size: u64) -> Result<String> {
    let metadata = fs::metadata(path).map_err(|e| ChoreError::storage(path, e))?;

    let size = metadata.len();
    if size > max_size {
        return Err(ChoreError::store(format!(
            "File {} is too large ({} bytes, max {} bytes)",
            path.display(),
            size,
            max_size
        )));
    }

    fs::read_to_string(path).map_err(|e| ChoreError::storage(path, e))
}
