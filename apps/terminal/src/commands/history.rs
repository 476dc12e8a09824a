//! Transaction history commands and the Clear All reset.

use tracing::debug;

use quickbill_store::{Confirm, KeyValueStore, Outcome};

use crate::commands::resolve_or_raw;
use crate::error::AppResult;
use crate::state::AppState;
use crate::views::short_id;

pub fn delete_transaction<S: KeyValueStore>(
    state: &mut AppState<S>,
    id: &str,
    confirm: &mut dyn Confirm,
) -> AppResult<String> {
    let id = resolve_or_raw(
        "Transaction",
        id,
        state.repo.transactions().iter().map(|t| t.id.as_str()),
    )?;
    debug!(id = %id, "tx delete command");

    Ok(match state.repo.delete_transaction(&id, confirm)? {
        Outcome::Applied => format!("Deleted transaction [{}]", short_id(&id)),
        Outcome::NoMatch => format!("No transaction with id '{}'", id),
        Outcome::Declined => "Cancelled.".to_string(),
    })
}

/// Empties inventory and history. The bill being composed goes too; its
/// lines may refer to items that no longer exist.
pub fn clear_all<S: KeyValueStore>(
    state: &mut AppState<S>,
    confirm: &mut dyn Confirm,
) -> AppResult<String> {
    debug!("clear-all command");

    Ok(match state.repo.clear_all(confirm)? {
        Outcome::Applied => {
            state.bill.clear();
            "All data cleared.".to_string()
        }
        Outcome::NoMatch | Outcome::Declined => "Cancelled.".to_string(),
    })
}
