//! # quickbill-store: Persistence Layer for QuickBill
//!
//! Owns the authoritative inventory and transaction lists and mirrors them
//! into a key/value store as JSON text.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        QuickBill Data Flow                              │
//! │                                                                         │
//! │  Shell command (bill save)                                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │                  quickbill-store (THIS CRATE)                   │    │
//! │  │                                                                 │    │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐    │    │
//! │  │   │  Repository   │    │    Keys       │    │   Backends   │    │    │
//! │  │   │               │    │               │    │              │    │    │
//! │  │   │ StateRepo     │───►│ inventory     │───►│ MemoryStore  │    │    │
//! │  │   │ SessionHolder │    │ transactions  │    │ FileStore    │    │    │
//! │  │   │               │    │ user_profile  │    │              │    │    │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘    │    │
//! │  │                                                                 │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │   ~/.local/share/quickbill/   (one file per key)                │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`backend`] - The `KeyValueStore` trait and its memory/file backends
//! - [`keys`] - Storage key names
//! - [`error`] - Store error types
//! - [`repository`] - State repository and session holder
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use quickbill_store::{FileStore, SessionHolder, StateRepository};
//!
//! let store = Arc::new(FileStore::open("./data")?);
//!
//! let mut repo = StateRepository::new(store.clone());
//! let report = repo.load()?;
//! println!("inventory: {:?}", report.inventory);
//!
//! let mut session = SessionHolder::new(store);
//! session.load()?;
//! # Ok::<(), quickbill_store::StoreError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod backend;
pub mod error;
pub mod keys;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use backend::{FileStore, KeyValueStore, MemoryStore};
pub use error::{StoreError, StoreResult};

// Repository re-exports for convenience
pub use repository::session::SessionHolder;
pub use repository::state::{
    Confirm, ListLoad, LoadPhase, LoadReport, Outcome, StateRepository, TransactionListener,
};
