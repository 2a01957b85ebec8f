//! Ledger: the owner of the current snapshot and its transaction boundary.
//!
//! Every mutation computes the next snapshot with the pure engine, writes
//! the touched collections, and only then replaces the in-memory snapshot.
//! If a write fails the snapshot stays as it was, and a collection already
//! written for the same step is restored to its previous contents.

use chrono::NaiveDate;

use crate::core::{CompletionReceipt, Household, RedemptionReceipt};
use crate::error::{ChoreError, FailOpen, Result};
use crate::storage::collections::{
    is_initialized, load_household, save_collection, save_household, save_household_data,
    Collection,
};
use crate::storage::KeyValueStore;

/// Current household snapshot bound to its store.
pub struct Ledger<S: KeyValueStore> {
    store: S,
    household: Household,
}

impl<S: KeyValueStore> Ledger<S> {
    /// Load the current snapshot from the store.
    pub fn open(store: S) -> Result<Self> {
        let household = load_household(&store)?;
        tracing::debug!(
            children = household.children.len(),
            completions = household.completions.len(),
            "opened ledger"
        );
        Ok(Self { store, household })
    }

    /// The committed snapshot.
    pub fn household(&self) -> &Household {
        &self.household
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Persist a freshly set up household.
    ///
    /// Refuses to overwrite an initialized store unless `force` is set.
    pub fn initialize(&mut self, household: Household, force: bool) -> Result<()> {
        if !force && is_initialized(&self.store)? {
            return Err(ChoreError::invalid_input(
                "household already set up (use --force to start over)",
            ));
        }
        if let Err(err) = save_household(&self.store, &household) {
            // The marker was not written; put back what the previous
            // snapshot had so a forced re-setup does not mix households
            save_household_data(&self.store, &self.household)
                .fail_open_with("restoring household after failed setup", ());
            return Err(err);
        }
        tracing::info!(
            caregivers = household.caregivers.len(),
            children = household.children.len(),
            tasks = household.tasks.len(),
            "household initialized"
        );
        self.household = household;
        Ok(())
    }

    /// Record a completion and persist the completion log and children.
    pub fn complete_task(
        &mut self,
        task_id: &str,
        child_id: &str,
        today: NaiveDate,
    ) -> Result<CompletionReceipt> {
        let outcome = self.household.complete_task(task_id, child_id, today)?;

        save_collection(&self.store, Collection::Completions, &outcome.completions)?;
        if let Err(err) = save_collection(&self.store, Collection::Children, &outcome.children) {
            save_collection(
                &self.store,
                Collection::Completions,
                &self.household.completions,
            )
            .fail_open_with("restoring completions after failed children write", ());
            return Err(err);
        }

        self.household = self.household.apply_completion(&outcome);
        tracing::info!(
            task_id,
            child_id,
            points = outcome.receipt.points_awarded,
            streak_bonus = outcome.receipt.completion.streak_bonus,
            "task completed"
        );
        Ok(outcome.receipt)
    }

    /// Redeem a reward and persist the children collection.
    pub fn redeem(&mut self, reward_id: &str, child_id: &str) -> Result<RedemptionReceipt> {
        let outcome = self.household.redeem(reward_id, child_id)?;
        save_collection(&self.store, Collection::Children, &outcome.children)?;

        self.household = self.household.apply_redemption(&outcome);
        tracing::info!(reward_id, child_id, cost = outcome.receipt.cost, "reward redeemed");
        Ok(outcome.receipt)
    }
}
