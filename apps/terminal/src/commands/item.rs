//! Inventory commands: add, edit and delete items.

use tracing::debug;
use uuid::Uuid;

use quickbill_core::validation::{
    parse_number, validate_category, validate_item_name, validate_rate,
};
use quickbill_core::Item;
use quickbill_store::{Confirm, KeyValueStore, Outcome};

use crate::commands::resolve_or_raw;
use crate::error::AppResult;
use crate::state::AppState;
use crate::views::short_id;

/// Builds a validated item from typed fields. `-` as category means default.
fn build_item(id: String, rate: &str, category: &str, name: &str) -> AppResult<Item> {
    let rate = parse_number("rate", rate)?;
    validate_rate(rate)?;

    let category = if category == "-" { "" } else { category };

    Ok(Item {
        id,
        name: validate_item_name(name)?,
        rate,
        category: validate_category(category)?,
    })
}

pub fn add<S: KeyValueStore>(
    state: &mut AppState<S>,
    rate: &str,
    category: &str,
    name: &str,
) -> AppResult<String> {
    let item = build_item(Uuid::new_v4().to_string(), rate, category, name)?;
    debug!(name = %item.name, rate = item.rate, "item add command");

    let message = format!(
        "Added item [{}] {} ({}) at {} {}",
        short_id(&item.id),
        item.name,
        item.category,
        state.currency,
        item.price()
    );
    state.repo.add_item(item)?;
    Ok(message)
}

pub fn edit<S: KeyValueStore>(
    state: &mut AppState<S>,
    id: &str,
    rate: &str,
    category: &str,
    name: &str,
) -> AppResult<String> {
    let id = resolve_or_raw("Item", id, state.repo.items().iter().map(|i| i.id.as_str()))?;
    let item = build_item(id, rate, category, name)?;
    debug!(id = %item.id, "item edit command");

    let label = format!("[{}] {}", short_id(&item.id), item.name);
    Ok(match state.repo.update_item(item)? {
        Outcome::Applied => format!("Updated item {}", label),
        Outcome::NoMatch | Outcome::Declined => {
            format!("No item with id {}; nothing changed", label)
        }
    })
}

pub fn delete<S: KeyValueStore>(
    state: &mut AppState<S>,
    id: &str,
    confirm: &mut dyn Confirm,
) -> AppResult<String> {
    let id = resolve_or_raw("Item", id, state.repo.items().iter().map(|i| i.id.as_str()))?;
    debug!(id = %id, "item delete command");

    Ok(match state.repo.delete_item(&id, confirm)? {
        Outcome::Applied => format!("Deleted item [{}]", short_id(&id)),
        Outcome::NoMatch => format!("No item with id '{}'", id),
        Outcome::Declined => "Cancelled.".to_string(),
    })
}
