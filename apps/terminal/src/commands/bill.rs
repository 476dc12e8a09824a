//! # Bill Commands
//!
//! Compose the current bill and save it as a transaction.
//!
//! ## Bill Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Bill Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────────┐     ┌──────────┐    │
//! │  │  Empty   │────►│ In Bill  │────►│  Saved       │────►│ Receipt  │    │
//! │  │  Bill    │     │          │     │  Transaction │     │ printed  │    │
//! │  └──────────┘     └──────────┘     └──────────────┘     └──────────┘    │
//! │                        │                  │                             │
//! │                   bill add            bill save                         │
//! │                   bill qty            (repo + listener)                 │
//! │                   bill remove                                           │
//! │                   bill customer                                         │
//! │                        │                                                │
//! │                        ▼                                                │
//! │                   bill clear ──────────────────► (back to empty)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use quickbill_core::validation::parse_number;
use quickbill_store::KeyValueStore;

use crate::commands::resolve_id;
use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::views::short_id;

/// Adds an inventory item to the bill. Adding it again raises the quantity.
pub fn add<S: KeyValueStore>(
    state: &mut AppState<S>,
    item_id: &str,
    quantity: Option<&str>,
) -> AppResult<String> {
    let quantity = match quantity {
        Some(raw) => parse_number("quantity", raw)?,
        None => 1.0,
    };
    let item_id = resolve_id("Item", item_id, state.repo.items().iter().map(|i| i.id.as_str()))?;
    let item = state
        .repo
        .item(&item_id)
        .cloned()
        .ok_or_else(|| AppError::not_found("Item", item_id.as_str()))?;
    debug!(item_id = %item.id, quantity, "bill add command");

    let line = state.bill.add_item(&item, quantity)?;
    let message = format!("Added {} (x{}) to bill", line.name, line.quantity);

    Ok(format!(
        "{}. Bill total: {} {}",
        message,
        state.currency,
        state.bill.total()
    ))
}

/// Sets a line's quantity; zero removes the line.
pub fn set_quantity<S: KeyValueStore>(
    state: &mut AppState<S>,
    line_id: &str,
    quantity: &str,
) -> AppResult<String> {
    let quantity = parse_number("quantity", quantity)?;
    let line_id = resolve_id("Bill line", line_id, state.bill.lines().iter().map(|l| l.id.as_str()))?;
    debug!(line_id = %line_id, quantity, "bill qty command");

    state.bill.set_quantity(&line_id, quantity)?;
    Ok(format!(
        "Bill total: {} {}",
        state.currency,
        state.bill.total()
    ))
}

pub fn remove<S: KeyValueStore>(state: &mut AppState<S>, line_id: &str) -> AppResult<String> {
    let line_id = resolve_id("Bill line", line_id, state.bill.lines().iter().map(|l| l.id.as_str()))?;
    debug!(line_id = %line_id, "bill remove command");

    let removed = state.bill.remove_line(&line_id)?;
    Ok(format!(
        "Removed {}. Bill total: {} {}",
        removed.name,
        state.currency,
        state.bill.total()
    ))
}

/// Sets the customer name; blank means walk-in.
pub fn set_customer<S: KeyValueStore>(state: &mut AppState<S>, name: &str) -> String {
    state.bill.set_customer_name(Some(name));
    match state.bill.customer_name() {
        Some(name) => format!("Customer: {}", name),
        None => "Customer: Walk-in Customer".to_string(),
    }
}

pub fn clear<S: KeyValueStore>(state: &mut AppState<S>) -> String {
    state.bill.clear();
    "Bill cleared.".to_string()
}

/// Finalizes the bill into a transaction and saves it.
///
/// The bill is emptied once the transaction is recorded, even if writing it
/// to the store failed, so it cannot be saved twice.
pub fn save<S: KeyValueStore>(state: &mut AppState<S>) -> AppResult<String> {
    let transaction = state
        .bill
        .finalize(Uuid::new_v4().to_string(), Utc::now().timestamp_millis())?;
    let id = transaction.id.clone();
    let total = transaction.total();
    debug!(id = %id, lines = transaction.items.len(), "bill save command");

    let result = state.repo.save_transaction(transaction);
    if state.repo.transaction(&id).is_some() {
        state.bill.clear();
    }
    result?;

    Ok(format!(
        "Saved transaction [{}]: {} {}. Printing receipt...",
        short_id(&id),
        state.currency,
        total
    ))
}
