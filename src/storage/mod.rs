//! Persistence for the chore tracker.
//!
//! This module provides the key-value store boundary (file-based and
//! in-memory backends), collection (de)serialization, and the ledger that
//! commits engine results only after they are persisted.

pub mod collections;
pub mod file;
pub mod ledger;
pub mod memory;
pub mod traits;

pub use collections::{
    is_initialized, load_collection, load_household, save_collection, save_household,
    save_household_data, Collection,
};
pub use file::FileStore;
pub use ledger::Ledger;
pub use memory::MemoryStore;
pub use traits::KeyValueStore;
