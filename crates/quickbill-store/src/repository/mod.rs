//! # Repository Module
//!
//! In-memory state mirrored to a [`KeyValueStore`](crate::KeyValueStore).
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Flow                                      │
//! │                                                                         │
//! │  Shell command                                                          │
//! │       │                                                                 │
//! │       │  repo.save_transaction(tx)                                      │
//! │       ▼                                                                 │
//! │  StateRepository                                                        │
//! │  ├── items / transactions (authoritative, in memory)                    │
//! │  ├── mutate, then synchronize                                           │
//! │  └── notify TransactionListeners ──► receipt printer                    │
//! │       │                                                                 │
//! │       │  set("quickbill_v2_transactions", "[...]")                      │
//! │       ▼                                                                 │
//! │  KeyValueStore (memory | files)                                         │
//! │       ▲                                                                 │
//! │       │  get/set("quickbill_user_profile")                              │
//! │  SessionHolder                                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`StateRepository`] - Inventory and transaction lists
//! - [`SessionHolder`] - Operator profile and login flag

pub mod session;
pub mod state;

pub use session::SessionHolder;
pub use state::{
    Confirm, ListLoad, LoadPhase, LoadReport, Outcome, StateRepository, TransactionListener,
    CLEAR_ALL_PROMPT, DELETE_ITEM_PROMPT, DELETE_TRANSACTION_PROMPT,
};
