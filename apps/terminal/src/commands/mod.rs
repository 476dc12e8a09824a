//! # Shell Commands
//!
//! Every line the operator types is parsed into a [`ShellCommand`] and
//! executed against the [`AppState`].
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (grammar + dispatch)
//! ├── session.rs  ◄─── login, logout, view, show
//! ├── item.rs     ◄─── item add / edit / delete
//! ├── bill.rs     ◄─── bill add / qty / remove / customer / clear / save
//! └── history.rs  ◄─── tx delete, clear-all
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Shell Command Flow                                   │
//! │                                                                         │
//! │  quickbill> item add 12 Beverage Green Tea                              │
//! │         │                                                               │
//! │         │ split on whitespace, clap parses                              │
//! │         ▼                                                               │
//! │  ShellCommand::Item(ItemCommand::Add { rate, category, name })          │
//! │         │                                                               │
//! │         │ execute(state, command, confirm)                              │
//! │         ▼                                                               │
//! │  item::add(state, ...) -> AppResult<String>                             │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Flow::Continue("Added item [3f2a9c1e] Green Tea")                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Ids are shown shortened; any unique prefix of an id is accepted.

pub mod bill;
pub mod history;
pub mod item;
pub mod session;

use clap::{Parser, Subcommand};

use quickbill_core::AppView;
use quickbill_store::{Confirm, KeyValueStore};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

// =============================================================================
// Grammar
// =============================================================================

/// One shell line.
#[derive(Debug, Parser)]
#[command(
    name = "quickbill",
    no_binary_name = true,
    disable_version_flag = true,
    override_usage = "<command> [args]"
)]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

#[derive(Debug, Subcommand)]
pub enum ShellCommand {
    /// Log in; the first login creates the profile
    Login { phone: String, pin: String },

    /// Log out (the profile stays stored)
    Logout,

    /// Switch to billing, history or inventory
    View { view: AppView },

    /// Show the current view
    Show,

    /// Manage inventory items
    #[command(subcommand)]
    Item(ItemCommand),

    /// Compose the current bill
    #[command(subcommand)]
    Bill(BillCommand),

    /// Manage saved transactions
    #[command(subcommand)]
    Tx(TxCommand),

    /// Delete ALL items and ALL transaction history
    ClearAll,

    /// Leave QuickBill
    #[command(alias = "exit")]
    Quit,
}

#[derive(Debug, Subcommand)]
pub enum ItemCommand {
    /// Add an item (use - as category for General)
    Add {
        rate: String,
        category: String,
        #[arg(required = true)]
        name: Vec<String>,
    },

    /// Replace an item's rate, category and name
    Edit {
        id: String,
        rate: String,
        category: String,
        #[arg(required = true)]
        name: Vec<String>,
    },

    /// Delete an item (asks first)
    Delete { id: String },
}

#[derive(Debug, Subcommand)]
pub enum BillCommand {
    /// Add an inventory item to the bill (quantity defaults to 1)
    Add { item: String, qty: Option<String> },

    /// Set a line's quantity (0 removes it)
    Qty { line: String, qty: String },

    /// Remove a line
    Remove { line: String },

    /// Set the customer name; no name means walk-in
    Customer { name: Vec<String> },

    /// Empty the bill
    Clear,

    /// Save the bill as a transaction and print the receipt
    Save,
}

#[derive(Debug, Subcommand)]
pub enum TxCommand {
    /// Delete a transaction (asks first)
    Delete { id: String },
}

/// Parses one input line. `Ok(None)` for a blank line.
///
/// Help requests come back as `AppError::Usage` carrying the help text.
pub fn parse_line(line: &str) -> AppResult<Option<ShellCommand>> {
    let words: Vec<&str> = line.split_whitespace().collect();
    if words.is_empty() {
        return Ok(None);
    }

    CommandLine::try_parse_from(words)
        .map(|parsed| Some(parsed.command))
        .map_err(|e| AppError::Usage(e.render().to_string().trim_end().to_string()))
}

// =============================================================================
// Dispatch
// =============================================================================

/// What the shell does after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    /// Print this and read the next line.
    Continue(String),
    Quit,
}

/// Runs one command. Destructive commands ask `confirm` first.
pub fn execute<S: KeyValueStore>(
    state: &mut AppState<S>,
    command: ShellCommand,
    confirm: &mut dyn Confirm,
) -> AppResult<Flow> {
    let output = match command {
        ShellCommand::Login { phone, pin } => session::login(state, &phone, &pin)?,
        ShellCommand::Logout => session::logout(state),
        ShellCommand::View { view } => session::switch_view(state, view)?,
        ShellCommand::Show => session::show(state),
        ShellCommand::Item(command) => {
            state.require_login()?;
            match command {
                ItemCommand::Add {
                    rate,
                    category,
                    name,
                } => item::add(state, &rate, &category, &name.join(" "))?,
                ItemCommand::Edit {
                    id,
                    rate,
                    category,
                    name,
                } => item::edit(state, &id, &rate, &category, &name.join(" "))?,
                ItemCommand::Delete { id } => item::delete(state, &id, confirm)?,
            }
        }
        ShellCommand::Bill(command) => {
            state.require_login()?;
            match command {
                BillCommand::Add { item, qty } => bill::add(state, &item, qty.as_deref())?,
                BillCommand::Qty { line, qty } => bill::set_quantity(state, &line, &qty)?,
                BillCommand::Remove { line } => bill::remove(state, &line)?,
                BillCommand::Customer { name } => bill::set_customer(state, &name.join(" ")),
                BillCommand::Clear => bill::clear(state),
                BillCommand::Save => bill::save(state)?,
            }
        }
        ShellCommand::Tx(TxCommand::Delete { id }) => {
            state.require_login()?;
            history::delete_transaction(state, &id, confirm)?
        }
        ShellCommand::ClearAll => {
            state.require_login()?;
            history::clear_all(state, confirm)?
        }
        ShellCommand::Quit => return Ok(Flow::Quit),
    };

    Ok(Flow::Continue(output))
}

// =============================================================================
// Id Resolution
// =============================================================================

/// Resolves a typed id against `ids`: an exact match wins, otherwise the
/// typed text must be a prefix of exactly one distinct id.
pub(crate) fn resolve_id<'a>(
    entity: &'static str,
    typed: &str,
    ids: impl IntoIterator<Item = &'a str>,
) -> AppResult<String> {
    let mut candidates: Vec<&str> = Vec::new();
    for id in ids {
        if id == typed {
            return Ok(id.to_string());
        }
        if id.starts_with(typed) && !candidates.contains(&id) {
            candidates.push(id);
        }
    }

    match candidates.as_slice() {
        [] => Err(AppError::not_found(entity, typed)),
        [only] => Ok(only.to_string()),
        _ => Err(AppError::Ambiguous {
            entity,
            prefix: typed.to_string(),
        }),
    }
}

/// Like [`resolve_id`], but an unknown id is passed through unchanged so the
/// repository can report it as a no-op.
pub(crate) fn resolve_or_raw<'a>(
    entity: &'static str,
    typed: &str,
    ids: impl IntoIterator<Item = &'a str>,
) -> AppResult<String> {
    match resolve_id(entity, typed, ids) {
        Err(AppError::NotFound { .. }) => Ok(typed.to_string()),
        other => other,
    }
}
