//! # State Repository
//!
//! The authoritative in-memory inventory and transaction lists, mirrored to a
//! [`KeyValueStore`].
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    LoadPhase                                            │
//! │                                                                         │
//! │   new(store) ──► Loading ── load() ──► Ready                            │
//! │                     │                    │                              │
//! │                     │ mutations fail     │ mutate, then persist         │
//! │                     │ with NotReady      │ (whole-list writes)          │
//! │                     │ NO WRITES          │                              │
//! │                                                                         │
//! │  The empty in-memory lists that exist before load() must never reach    │
//! │  the store: they would clobber the real data.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Load Rules
//! ```text
//! ┌────────────────┬──────────────────┬──────────────────┬──────────────────┐
//! │ list           │ key absent       │ decodes          │ corrupted        │
//! ├────────────────┼──────────────────┼──────────────────┼──────────────────┤
//! │ inventory      │ seed list        │ as stored        │ empty + warning  │
//! │                │                  │ ([] stays [])    │ + quarantine     │
//! │ transactions   │ empty            │ as stored        │ empty + warning  │
//! │                │                  │                  │ + quarantine     │
//! └────────────────┴──────────────────┴──────────────────┴──────────────────┘
//! ```
//!
//! A corrupted payload is kept in memory and copied to
//! [`quarantine_key`](crate::keys::quarantine_key) on the first
//! synchronize, just before the list key is overwritten. A copy left by an
//! earlier run is never overwritten; a different payload goes to the next
//! numbered slot (`_corrupt_2`, ...).
//!
//! ## Mutations
//! Every public mutation updates memory and then persists before returning.
//! Destructive ones (delete item, delete transaction, clear all) ask a
//! [`Confirm`] first; a declined prompt changes nothing and writes nothing.

use std::fmt;

use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use quickbill_core::{Item, Transaction};

use crate::backend::KeyValueStore;
use crate::error::{StoreError, StoreResult};
use crate::keys::{quarantine_keys, INVENTORY_KEY, TRANSACTIONS_KEY};

pub const DELETE_ITEM_PROMPT: &str = "Are you sure you want to delete this item?";
pub const DELETE_TRANSACTION_PROMPT: &str = "Permanently delete this record?";
pub const CLEAR_ALL_PROMPT: &str =
    "CRITICAL: This will delete ALL items and ALL transaction history. Continue?";

// =============================================================================
// Capabilities
// =============================================================================

/// Asks the operator to approve a destructive operation.
///
/// Closures work directly:
/// ```rust
/// # use quickbill_store::Confirm;
/// let mut always_yes = |_prompt: &str| true;
/// assert!(always_yes.confirm("Delete?"));
/// ```
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Receives every transaction after it has been saved and persisted.
///
/// The terminal app uses this to schedule the receipt print.
pub trait TransactionListener: Send {
    fn transaction_saved(&mut self, transaction: &Transaction);
}

// =============================================================================
// Status Types
// =============================================================================

/// Repository lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Loading,
    Ready,
}

/// What a mutation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// State changed and was persisted.
    Applied,
    /// No entry had the requested id. Lists were still persisted.
    NoMatch,
    /// The operator declined. Nothing changed, nothing was written.
    Declined,
}

/// How one list came out of [`StateRepository::load`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListLoad {
    /// Key was never written.
    Absent,
    /// Decoded this many records.
    Decoded(usize),
    /// Payload could not be decoded; the list starts empty.
    Corrupted { reason: String },
}

/// Result of the initial load, for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub inventory: ListLoad,
    pub transactions: ListLoad,
}

// =============================================================================
// Repository
// =============================================================================

/// In-memory inventory and transaction lists backed by a key/value store.
///
/// ## Usage
/// ```rust
/// use std::sync::Arc;
/// use quickbill_core::Item;
/// use quickbill_store::{MemoryStore, StateRepository};
///
/// let store = Arc::new(MemoryStore::new());
/// let mut repo = StateRepository::new(store.clone());
/// repo.load()?;
///
/// repo.add_item(Item {
///     id: "i1".into(),
///     name: "Tea".into(),
///     rate: 10.0,
///     category: "Beverage".into(),
/// })?;
/// assert_eq!(repo.items().len(), 1);
/// # Ok::<(), quickbill_store::StoreError>(())
/// ```
pub struct StateRepository<S> {
    store: S,
    phase: LoadPhase,
    seed: Vec<Item>,
    items: Vec<Item>,
    transactions: Vec<Transaction>,
    quarantine: Vec<(&'static str, String)>,
    listeners: Vec<Box<dyn TransactionListener>>,
}

impl<S: KeyValueStore> StateRepository<S> {
    /// Creates a repository in the `Loading` phase with an empty seed list.
    pub fn new(store: S) -> Self {
        StateRepository {
            store,
            phase: LoadPhase::Loading,
            seed: Vec::new(),
            items: Vec::new(),
            transactions: Vec::new(),
            quarantine: Vec::new(),
            listeners: Vec::new(),
        }
    }

    /// Sets the inventory used when the inventory key has never been written.
    pub fn with_seed(mut self, seed: Vec<Item>) -> Self {
        self.seed = seed;
        self
    }

    /// Registers a listener for saved transactions.
    pub fn subscribe(&mut self, listener: Box<dyn TransactionListener>) {
        self.listeners.push(listener);
    }

    // =========================================================================
    // Load / Synchronize
    // =========================================================================

    /// Reads both lists from the store and moves to `Ready`.
    ///
    /// Decode failures are logged and reported, never returned as errors.
    /// Only a failing store read is an error, and it leaves the repository
    /// in `Loading`.
    pub fn load(&mut self) -> StoreResult<LoadReport> {
        if self.phase == LoadPhase::Ready {
            return Err(StoreError::AlreadyLoaded);
        }

        let raw_transactions = self.store.get(TRANSACTIONS_KEY)?;
        let raw_inventory = self.store.get(INVENTORY_KEY)?;

        let (transactions, transactions_report) = match raw_transactions {
            None => (Vec::new(), ListLoad::Absent),
            Some(raw) => self.decode_or_quarantine(TRANSACTIONS_KEY, raw),
        };

        let (items, inventory_report) = match raw_inventory {
            None => (self.seed.clone(), ListLoad::Absent),
            Some(raw) => self.decode_or_quarantine(INVENTORY_KEY, raw),
        };

        self.transactions = transactions;
        self.items = items;
        self.phase = LoadPhase::Ready;

        info!(
            items = self.items.len(),
            transactions = self.transactions.len(),
            "State loaded"
        );

        Ok(LoadReport {
            inventory: inventory_report,
            transactions: transactions_report,
        })
    }

    fn decode_or_quarantine<T: DeserializeOwned>(
        &mut self,
        key: &'static str,
        raw: String,
    ) -> (Vec<T>, ListLoad) {
        match serde_json::from_str::<Vec<T>>(&raw) {
            Ok(list) => {
                let count = list.len();
                (list, ListLoad::Decoded(count))
            }
            Err(e) => {
                warn!(key, error = %e, "Stored list could not be decoded, starting empty");
                self.quarantine.push((key, raw));
                (
                    Vec::new(),
                    ListLoad::Corrupted {
                        reason: e.to_string(),
                    },
                )
            }
        }
    }

    /// Writes both lists to the store, each under its own key.
    ///
    /// Both writes are attempted even if the first fails; the first error is
    /// returned. Pending quarantine copies are written first.
    pub fn synchronize(&mut self) -> StoreResult<()> {
        self.ensure_ready()?;

        while let Some((key, raw)) = self.quarantine.first() {
            for target in quarantine_keys(key) {
                match self.store.get(&target)? {
                    None => {
                        warn!(key = %target, bytes = raw.len(), "Preserving corrupted payload");
                        self.store.set(&target, raw)?;
                        break;
                    }
                    Some(existing) if existing == *raw => {
                        debug!(key = %target, "Corrupted payload already preserved");
                        break;
                    }
                    Some(_) => {}
                }
            }
            self.quarantine.remove(0);
        }

        let inventory = serde_json::to_string(&self.items)
            .map_err(StoreError::from)
            .and_then(|encoded| self.store.set(INVENTORY_KEY, &encoded));
        let transactions = serde_json::to_string(&self.transactions)
            .map_err(StoreError::from)
            .and_then(|encoded| self.store.set(TRANSACTIONS_KEY, &encoded));

        debug!(
            items = self.items.len(),
            transactions = self.transactions.len(),
            "State synchronized"
        );

        inventory.and(transactions)
    }

    fn ensure_ready(&self) -> StoreResult<()> {
        match self.phase {
            LoadPhase::Ready => Ok(()),
            LoadPhase::Loading => Err(StoreError::NotReady),
        }
    }

    // =========================================================================
    // Inventory Mutations
    // =========================================================================

    /// Appends an item. Duplicate ids are accepted.
    pub fn add_item(&mut self, item: Item) -> StoreResult<()> {
        self.ensure_ready()?;
        debug!(id = %item.id, name = %item.name, "Adding item");

        self.items.push(item);
        self.synchronize()
    }

    /// Replaces the first item with the same id.
    pub fn update_item(&mut self, item: Item) -> StoreResult<Outcome> {
        self.ensure_ready()?;
        debug!(id = %item.id, "Updating item");

        let outcome = match self.items.iter_mut().find(|i| i.id == item.id) {
            Some(existing) => {
                *existing = item;
                Outcome::Applied
            }
            None => Outcome::NoMatch,
        };

        self.synchronize()?;
        Ok(outcome)
    }

    /// Removes every item with `id`, after confirmation.
    pub fn delete_item(&mut self, id: &str, confirm: &mut dyn Confirm) -> StoreResult<Outcome> {
        self.ensure_ready()?;

        if !confirm.confirm(DELETE_ITEM_PROMPT) {
            debug!(id, "Item deletion declined");
            return Ok(Outcome::Declined);
        }

        let before = self.items.len();
        self.items.retain(|i| i.id != id);
        let removed = before - self.items.len();
        debug!(id, removed, "Deleted item");

        self.synchronize()?;
        Ok(if removed > 0 {
            Outcome::Applied
        } else {
            Outcome::NoMatch
        })
    }

    // =========================================================================
    // Transaction Mutations
    // =========================================================================

    /// Appends a transaction, persists, then notifies listeners.
    ///
    /// The transaction is stored exactly as given; totals are not recomputed.
    pub fn save_transaction(&mut self, transaction: Transaction) -> StoreResult<()> {
        self.ensure_ready()?;
        info!(
            id = %transaction.id,
            lines = transaction.items.len(),
            total = transaction.total_amount,
            "Saving transaction"
        );

        self.transactions.push(transaction);
        self.synchronize()?;

        if let Some(saved) = self.transactions.last() {
            for listener in self.listeners.iter_mut() {
                listener.transaction_saved(saved);
            }
        }
        Ok(())
    }

    /// Removes the transaction with `id`, after confirmation.
    pub fn delete_transaction(
        &mut self,
        id: &str,
        confirm: &mut dyn Confirm,
    ) -> StoreResult<Outcome> {
        self.ensure_ready()?;

        if !confirm.confirm(DELETE_TRANSACTION_PROMPT) {
            debug!(id, "Transaction deletion declined");
            return Ok(Outcome::Declined);
        }

        let before = self.transactions.len();
        self.transactions.retain(|t| t.id != id);
        let removed = before - self.transactions.len();
        debug!(id, removed, "Deleted transaction");

        self.synchronize()?;
        Ok(if removed > 0 {
            Outcome::Applied
        } else {
            Outcome::NoMatch
        })
    }

    /// Empties both lists and removes both list keys, after confirmation.
    ///
    /// The keys are removed rather than written as `[]`, so the next load
    /// sees "never initialized" and applies the seed list again. The user
    /// profile and any quarantined payloads are left alone.
    pub fn clear_all(&mut self, confirm: &mut dyn Confirm) -> StoreResult<Outcome> {
        self.ensure_ready()?;

        if !confirm.confirm(CLEAR_ALL_PROMPT) {
            debug!("Clear all declined");
            return Ok(Outcome::Declined);
        }

        warn!(
            items = self.items.len(),
            transactions = self.transactions.len(),
            "Clearing all data"
        );

        self.items.clear();
        self.transactions.clear();

        let inventory = self.store.remove(INVENTORY_KEY);
        let transactions = self.store.remove(TRANSACTIONS_KEY);
        inventory.and(transactions)?;

        Ok(Outcome::Applied)
    }

    // =========================================================================
    // Read Access
    // =========================================================================

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    pub fn is_ready(&self) -> bool {
        self.phase == LoadPhase::Ready
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// First item with `id`.
    pub fn item(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }

    /// First transaction with `id`.
    pub fn transaction(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    /// The most recently saved transaction.
    pub fn latest_transaction(&self) -> Option<&Transaction> {
        self.transactions.last()
    }

    /// The backing store.
    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S> fmt::Debug for StateRepository<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateRepository")
            .field("phase", &self.phase)
            .field("items", &self.items.len())
            .field("transactions", &self.transactions.len())
            .field("quarantine", &self.quarantine.len())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use quickbill_core::BillItem;

    use crate::backend::MemoryStore;
    use crate::keys::quarantine_key;

    fn item(id: &str, name: &str, rate: f64) -> Item {
        Item {
            id: id.to_string(),
            name: name.to_string(),
            rate,
            category: "Beverage".to_string(),
        }
    }

    fn transaction(id: &str, total: f64) -> Transaction {
        Transaction {
            id: id.to_string(),
            timestamp: 1_700_000_000_000,
            items: vec![BillItem {
                id: format!("{}-line", id),
                item_id: "i1".to_string(),
                name: "Tea".to_string(),
                rate: 12.0,
                quantity: 2.0,
                total,
            }],
            total_amount: total,
            customer_name: None,
        }
    }

    fn yes() -> impl FnMut(&str) -> bool {
        |_: &str| true
    }

    fn no() -> impl FnMut(&str) -> bool {
        |_: &str| false
    }

    fn loaded(store: &Arc<MemoryStore>) -> StateRepository<Arc<MemoryStore>> {
        let mut repo = StateRepository::new(store.clone());
        repo.load().unwrap();
        repo
    }

    fn stored_items(store: &MemoryStore) -> Vec<Item> {
        serde_json::from_str(&store.get(INVENTORY_KEY).unwrap().unwrap()).unwrap()
    }

    // -------------------------------------------------------------------------
    // Load
    // -------------------------------------------------------------------------

    #[test]
    fn test_load_absent_keys_uses_seed_and_empty_history() {
        let store = Arc::new(MemoryStore::new());
        let mut repo =
            StateRepository::new(store.clone()).with_seed(vec![item("s1", "Water", 5.0)]);

        let report = repo.load().unwrap();

        assert_eq!(report.inventory, ListLoad::Absent);
        assert_eq!(report.transactions, ListLoad::Absent);
        assert_eq!(repo.items(), &[item("s1", "Water", 5.0)]);
        assert!(repo.transactions().is_empty());
        assert!(repo.is_ready());
    }

    #[test]
    fn test_load_honors_explicitly_emptied_inventory() {
        let store = Arc::new(MemoryStore::with_entries([(INVENTORY_KEY, "[]")]));
        let mut repo =
            StateRepository::new(store.clone()).with_seed(vec![item("s1", "Water", 5.0)]);

        let report = repo.load().unwrap();

        assert_eq!(report.inventory, ListLoad::Decoded(0));
        assert!(repo.items().is_empty());
    }

    #[test]
    fn test_load_corrupted_lists_fall_back_to_empty() {
        let store = Arc::new(MemoryStore::with_entries([
            (INVENTORY_KEY, "{not json"),
            (TRANSACTIONS_KEY, "{\"id\":\"t1\"}"),
        ]));
        let mut repo =
            StateRepository::new(store.clone()).with_seed(vec![item("s1", "Water", 5.0)]);

        let report = repo.load().unwrap();

        assert!(matches!(report.inventory, ListLoad::Corrupted { .. }));
        assert!(matches!(report.transactions, ListLoad::Corrupted { .. }));
        assert!(repo.items().is_empty());
        assert!(repo.transactions().is_empty());
    }

    #[test]
    fn test_load_performs_no_writes() {
        let store = Arc::new(MemoryStore::with_entries([
            (INVENTORY_KEY, "garbage"),
            (TRANSACTIONS_KEY, "[]"),
        ]));
        let _repo = loaded(&store);

        assert_eq!(store.write_count(), 0);
        assert_eq!(store.get(INVENTORY_KEY).unwrap().as_deref(), Some("garbage"));
    }

    #[test]
    fn test_mutations_before_load_are_rejected() {
        let store = Arc::new(MemoryStore::new());
        let mut repo = StateRepository::new(store.clone());

        assert_eq!(repo.phase(), LoadPhase::Loading);
        assert!(matches!(
            repo.add_item(item("i1", "Tea", 10.0)),
            Err(StoreError::NotReady)
        ));
        assert!(matches!(
            repo.save_transaction(transaction("t1", 24.0)),
            Err(StoreError::NotReady)
        ));
        assert!(matches!(repo.synchronize(), Err(StoreError::NotReady)));
        assert!(repo.items().is_empty());
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn test_second_load_is_rejected() {
        let store = Arc::new(MemoryStore::new());
        let mut repo = loaded(&store);
        assert!(matches!(repo.load(), Err(StoreError::AlreadyLoaded)));
    }

    // -------------------------------------------------------------------------
    // Inventory
    // -------------------------------------------------------------------------

    #[test]
    fn test_item_add_update_delete_scenario() {
        let store = Arc::new(MemoryStore::new());
        let mut repo = loaded(&store);

        repo.add_item(item("i1", "Tea", 10.0)).unwrap();
        assert_eq!(repo.items(), &[item("i1", "Tea", 10.0)]);
        assert_eq!(stored_items(&store), vec![item("i1", "Tea", 10.0)]);

        let outcome = repo.update_item(item("i1", "Tea", 12.0)).unwrap();
        assert_eq!(outcome, Outcome::Applied);
        assert_eq!(repo.items().len(), 1);
        assert_eq!(repo.items()[0].rate, 12.0);
        assert_eq!(stored_items(&store)[0].rate, 12.0);

        let outcome = repo.delete_item("i1", &mut yes()).unwrap();
        assert_eq!(outcome, Outcome::Applied);
        assert!(repo.items().is_empty());
        assert!(stored_items(&store).is_empty());
    }

    #[test]
    fn test_duplicate_ids_are_accepted_and_update_hits_first() {
        let store = Arc::new(MemoryStore::new());
        let mut repo = loaded(&store);

        repo.add_item(item("dup", "First", 1.0)).unwrap();
        repo.add_item(item("dup", "Second", 2.0)).unwrap();
        repo.update_item(item("dup", "Updated", 3.0)).unwrap();

        assert_eq!(repo.items()[0].name, "Updated");
        assert_eq!(repo.items()[1].name, "Second");

        repo.delete_item("dup", &mut yes()).unwrap();
        assert!(repo.items().is_empty());
    }

    #[test]
    fn test_update_unknown_id_is_silent_no_op() {
        let store = Arc::new(MemoryStore::new());
        let mut repo = loaded(&store);
        repo.add_item(item("i1", "Tea", 10.0)).unwrap();

        let outcome = repo.update_item(item("ghost", "Ghost", 1.0)).unwrap();

        assert_eq!(outcome, Outcome::NoMatch);
        assert_eq!(repo.items(), &[item("i1", "Tea", 10.0)]);
    }

    #[test]
    fn test_declined_delete_changes_nothing() {
        let store = Arc::new(MemoryStore::new());
        let mut repo = loaded(&store);
        repo.add_item(item("i1", "Tea", 10.0)).unwrap();
        let writes = store.write_count();

        let mut asked = Vec::new();
        let mut decline = |prompt: &str| {
            asked.push(prompt.to_string());
            false
        };
        let outcome = repo.delete_item("i1", &mut decline).unwrap();

        assert_eq!(outcome, Outcome::Declined);
        assert_eq!(asked, vec![DELETE_ITEM_PROMPT.to_string()]);
        assert_eq!(repo.items().len(), 1);
        assert_eq!(store.write_count(), writes);
    }

    // -------------------------------------------------------------------------
    // Transactions
    // -------------------------------------------------------------------------

    #[test]
    fn test_save_transaction_appends_without_recomputing() {
        let store = Arc::new(MemoryStore::new());
        let mut repo = loaded(&store);
        repo.save_transaction(transaction("t0", 5.0)).unwrap();
        let before = repo.transactions().to_vec();

        repo.save_transaction(transaction("t1", 24.0)).unwrap();

        assert_eq!(repo.transactions().len(), before.len() + 1);
        assert_eq!(&repo.transactions()[..before.len()], &before[..]);
        assert_eq!(repo.latest_transaction().unwrap().total_amount, 24.0);

        let stored: Vec<Transaction> =
            serde_json::from_str(&store.get(TRANSACTIONS_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(stored.len(), 2);
    }

    #[test]
    fn test_trusts_caller_totals() {
        let store = Arc::new(MemoryStore::new());
        let mut repo = loaded(&store);

        let mut odd = transaction("t1", 24.0);
        odd.total_amount = 1.0;
        repo.save_transaction(odd).unwrap();

        assert_eq!(repo.transaction("t1").unwrap().total_amount, 1.0);
    }

    struct Recorder(Arc<Mutex<Vec<String>>>);

    impl TransactionListener for Recorder {
        fn transaction_saved(&mut self, transaction: &Transaction) {
            self.0.lock().unwrap().push(transaction.id.clone());
        }
    }

    #[test]
    fn test_listeners_see_saved_transaction() {
        let store = Arc::new(MemoryStore::new());
        let mut repo = loaded(&store);
        let seen = Arc::new(Mutex::new(Vec::new()));
        repo.subscribe(Box::new(Recorder(seen.clone())));

        repo.save_transaction(transaction("t1", 24.0)).unwrap();
        repo.save_transaction(transaction("t2", 12.0)).unwrap();

        assert_eq!(*seen.lock().unwrap(), vec!["t1", "t2"]);
    }

    #[test]
    fn test_delete_transaction() {
        let store = Arc::new(MemoryStore::new());
        let mut repo = loaded(&store);
        repo.save_transaction(transaction("t1", 24.0)).unwrap();
        repo.save_transaction(transaction("t2", 12.0)).unwrap();

        assert_eq!(
            repo.delete_transaction("t1", &mut no()).unwrap(),
            Outcome::Declined
        );
        assert_eq!(repo.transactions().len(), 2);

        assert_eq!(
            repo.delete_transaction("t1", &mut yes()).unwrap(),
            Outcome::Applied
        );
        assert_eq!(repo.transactions().len(), 1);
        assert_eq!(repo.transactions()[0].id, "t2");

        assert_eq!(
            repo.delete_transaction("missing", &mut yes()).unwrap(),
            Outcome::NoMatch
        );
    }

    // -------------------------------------------------------------------------
    // Clear All
    // -------------------------------------------------------------------------

    #[test]
    fn test_clear_all_removes_keys() {
        let store = Arc::new(MemoryStore::with_entries([(
            crate::keys::USER_PROFILE_KEY,
            r#"{"phone":"03001234567","pin":"1234"}"#,
        )]));
        let mut repo = loaded(&store);
        repo.add_item(item("i1", "Tea", 10.0)).unwrap();
        repo.save_transaction(transaction("t1", 24.0)).unwrap();

        let outcome = repo.clear_all(&mut yes()).unwrap();

        assert_eq!(outcome, Outcome::Applied);
        assert!(repo.items().is_empty());
        assert!(repo.transactions().is_empty());
        assert!(!store.contains(INVENTORY_KEY));
        assert!(!store.contains(TRANSACTIONS_KEY));
        assert!(store.contains(crate::keys::USER_PROFILE_KEY));
    }

    #[test]
    fn test_clear_all_declined() {
        let store = Arc::new(MemoryStore::new());
        let mut repo = loaded(&store);
        repo.add_item(item("i1", "Tea", 10.0)).unwrap();

        assert_eq!(repo.clear_all(&mut no()).unwrap(), Outcome::Declined);
        assert_eq!(repo.items().len(), 1);
        assert!(store.contains(INVENTORY_KEY));
    }

    #[test]
    fn test_reload_after_clear_all_applies_seed() {
        let store = Arc::new(MemoryStore::new());
        let mut repo = loaded(&store);
        repo.add_item(item("i1", "Tea", 10.0)).unwrap();
        repo.clear_all(&mut yes()).unwrap();

        let mut reloaded =
            StateRepository::new(store.clone()).with_seed(vec![item("s1", "Water", 5.0)]);
        reloaded.load().unwrap();

        assert_eq!(reloaded.items(), &[item("s1", "Water", 5.0)]);
    }

    // -------------------------------------------------------------------------
    // Quarantine
    // -------------------------------------------------------------------------

    #[test]
    fn test_corrupted_payload_is_quarantined_on_first_write() {
        let store = Arc::new(MemoryStore::with_entries([(TRANSACTIONS_KEY, "[{broken")]));
        let mut repo = loaded(&store);
        assert!(!store.contains(&quarantine_key(TRANSACTIONS_KEY)));

        repo.add_item(item("i1", "Tea", 10.0)).unwrap();

        assert_eq!(
            store
                .get(&quarantine_key(TRANSACTIONS_KEY))
                .unwrap()
                .as_deref(),
            Some("[{broken")
        );
        assert_eq!(store.get(TRANSACTIONS_KEY).unwrap().as_deref(), Some("[]"));

        // Only preserved once.
        let writes = store.write_count();
        repo.add_item(item("i2", "Coffee", 15.0)).unwrap();
        assert_eq!(store.write_count(), writes + 2);
    }

    #[test]
    fn test_earlier_quarantine_copy_is_never_overwritten() {
        let store = Arc::new(MemoryStore::with_entries([(INVENTORY_KEY, "{first")]));
        loaded(&store).add_item(item("i1", "Tea", 10.0)).unwrap();

        store.set(INVENTORY_KEY, "{second").unwrap();
        loaded(&store).add_item(item("i2", "Coffee", 15.0)).unwrap();

        store.set(INVENTORY_KEY, "{second").unwrap();
        loaded(&store).add_item(item("i3", "Water", 5.0)).unwrap();

        let first = quarantine_key(INVENTORY_KEY);
        let second = format!("{}_2", first);
        assert_eq!(store.get(&first).unwrap().as_deref(), Some("{first"));
        assert_eq!(store.get(&second).unwrap().as_deref(), Some("{second"));
        assert!(!store.contains(&format!("{}_3", first)));
    }

    #[test]
    fn test_repeated_loads_of_corrupted_inventory_are_stable() {
        let store = Arc::new(MemoryStore::with_entries([(INVENTORY_KEY, "42")]));

        for _ in 0..3 {
            let mut repo = StateRepository::new(store.clone());
            let report = repo.load().unwrap();
            assert!(matches!(report.inventory, ListLoad::Corrupted { .. }));
            assert!(repo.items().is_empty());
        }
        assert_eq!(store.write_count(), 0);
    }
}
