//! First-run household setup: caregivers, children and their default tasks.

use std::str::FromStr;

use chrono::{DateTime, Utc};

use super::catalog::default_avatar;
use super::model::{Caregiver, Child};
use crate::error::{ChoreError, Result};

/// A child as entered during setup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewChild {
    pub name: String,
    pub age: u32,
    /// Avatar emoji; a default is picked by position when absent.
    pub avatar: Option<String>,
}

impl NewChild {
    pub fn new(name: impl Into<String>, age: u32) -> Self {
        Self {
            name: name.into(),
            age,
            avatar: None,
        }
    }

    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }
}

/// Parses `name:age` or `name:age:avatar`.
impl FromStr for NewChild {
    type Err = ChoreError;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.splitn(3, ':');
        let name = parts.next().unwrap_or_default().trim();
        let age = parts
            .next()
            .ok_or_else(|| ChoreError::invalid_input(format!("missing age in '{}'", s)))?
            .trim();
        let age: u32 = age
            .parse()
            .map_err(|_| ChoreError::invalid_input(format!("invalid age '{}'", age)))?;

        let mut child = NewChild::new(name, age);
        if let Some(avatar) = parts.next().map(str::trim).filter(|a| !a.is_empty()) {
            child = child.with_avatar(avatar);
        }
        Ok(child)
    }
}

/// Generate a 4-digit display PIN in `1000..=9999`.
pub fn generate_pin() -> Result<String> {
    let mut bytes = [0u8; 4];
    getrandom::getrandom(&mut bytes)
        .map_err(|e| ChoreError::store(format!("failed to generate PIN: {}", e)))?;
    let value = u32::from_le_bytes(bytes) % 9000 + 1000;
    Ok(value.to_string())
}

/// Create caregivers from names, dropping blank entries.
///
/// Ids are `cg-<unix-millis>-<index>` where index counts kept names.
pub fn setup_caregivers(names: &[String], now: DateTime<Utc>) -> Result<Vec<Caregiver>> {
    let stamp = now.timestamp_millis();
    names
        .iter()
        .map(|n| n.trim())
        .filter(|n| !n.is_empty())
        .enumerate()
        .map(|(idx, name)| -> Result<Caregiver> {
            Ok(Caregiver {
                id: format!("cg-{}-{}", stamp, idx),
                name: name.to_string(),
                pin: generate_pin()?,
            })
        })
        .collect()
}

/// Create children with zero points.
///
/// Every entry must have a non-blank name and an age of at least 1.
pub fn setup_children(entries: &[NewChild], now: DateTime<Utc>) -> Result<Vec<Child>> {
    let stamp = now.timestamp_millis();
    entries
        .iter()
        .enumerate()
        .map(|(idx, entry)| {
            let name = entry.name.trim();
            if name.is_empty() {
                return Err(ChoreError::invalid_input(format!(
                    "child #{} has no name",
                    idx + 1
                )));
            }
            if entry.age == 0 {
                return Err(ChoreError::invalid_input(format!(
                    "child '{}' must be at least 1 year old",
                    name
                )));
            }
            let avatar = entry
                .avatar
                .clone()
                .unwrap_or_else(|| default_avatar(idx).to_string());
            Ok(Child::new(
                format!("child-{}-{}", stamp, idx),
                name,
                entry.age,
                avatar,
            ))
        })
        .collect()
}
