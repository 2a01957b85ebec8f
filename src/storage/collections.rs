//! Collection (de)serialization against a key-value store.
//!
//! Each collection is a JSON array of its records stored under a fixed key.
//! A key that was never written reads as an empty collection.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::core::Household;
use crate::error::{ChoreError, Result};
use crate::storage::KeyValueStore;

/// The five persisted collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Caregivers,
    Children,
    Tasks,
    Completions,
    Rewards,
}

impl Collection {
    pub const ALL: [Collection; 5] = [
        Collection::Caregivers,
        Collection::Children,
        Collection::Tasks,
        Collection::Completions,
        Collection::Rewards,
    ];

    /// Store key for this collection.
    pub fn key(&self) -> &'static str {
        match self {
            Collection::Caregivers => "caregivers",
            Collection::Children => "children",
            Collection::Tasks => "tasks",
            Collection::Completions => "completions",
            Collection::Rewards => "rewards",
        }
    }
}

/// Load one collection. Missing keys read as empty.
pub fn load_collection<S, T>(store: &S, collection: Collection) -> Result<Vec<T>>
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned,
{
    match store.get(collection.key())? {
        Some(raw) => serde_json::from_str(&raw).map_err(|e| {
            ChoreError::serde(format!("invalid {} collection: {}", collection.key(), e))
        }),
        None => Ok(Vec::new()),
    }
}

/// Overwrite one collection.
pub fn save_collection<S, T>(store: &S, collection: Collection, items: &[T]) -> Result<()>
where
    S: KeyValueStore + ?Sized,
    T: Serialize,
{
    let raw = serde_json::to_string(items)?;
    store
        .set(collection.key(), &raw)
        .map_err(|e| ChoreError::persistence(collection.key(), &e))
}

/// Whether setup has been persisted.
pub fn is_initialized<S: KeyValueStore + ?Sized>(store: &S) -> Result<bool> {
    store.contains(Collection::Caregivers.key())
}

/// Load every collection into a snapshot.
pub fn load_household<S: KeyValueStore + ?Sized>(store: &S) -> Result<Household> {
    Ok(Household {
        caregivers: load_collection(store, Collection::Caregivers)?,
        children: load_collection(store, Collection::Children)?,
        tasks: load_collection(store, Collection::Tasks)?,
        completions: load_collection(store, Collection::Completions)?,
        rewards: load_collection(store, Collection::Rewards)?,
    })
}

/// Write every collection of a snapshot.
///
/// `caregivers` is written last: its presence marks the store as
/// initialized, so a write that fails part way never leaves a store that
/// looks set up.
pub fn save_household<S: KeyValueStore + ?Sized>(store: &S, household: &Household) -> Result<()> {
    save_household_data(store, household)?;
    save_collection(store, Collection::Caregivers, &household.caregivers)
}

/// Write every collection except `caregivers`.
pub fn save_household_data<S: KeyValueStore + ?Sized>(
    store: &S,
    household: &Household,
) -> Result<()> {
    save_collection(store, Collection::Children, &household.children)?;
    save_collection(store, Collection::Tasks, &household.tasks)?;
    save_collection(store, Collection::Completions, &household.completions)?;
    save_collection(store, Collection::Rewards, &household.rewards)?;
    Ok(())
}
