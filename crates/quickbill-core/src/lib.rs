//! # quickbill-core: Pure Business Logic for QuickBill
//!
//! This crate holds the records QuickBill persists and the pure logic built
//! on top of them. It has zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        QuickBill Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Terminal front end (apps/terminal)              │   │
//! │  │      Billing view ──► History view ──► Inventory view           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            ★ quickbill-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   bill    │  │  receipt  │  │   │
//! │  │   │   Item    │  │   Money   │  │   Bill    │  │  render   │  │   │
//! │  │   │Transaction│  │           │  │ finalize  │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO TERMINAL • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 quickbill-store (Persistence Layer)             │   │
//! │  │          key/value store, state repository, session holder      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Persisted records (Item, BillItem, Transaction, User) and `AppView`
//! - [`money`] - Money type with integer arithmetic for bill totals
//! - [`bill`] - The in-progress bill and its finalization into a Transaction
//! - [`receipt`] - Plain-text receipt layout
//! - [`error`] - Domain error types
//! - [`validation`] - Front-end input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use quickbill_core::{Bill, Item};
//!
//! let tea = Item {
//!     id: "i1".to_string(),
//!     name: "Tea".to_string(),
//!     rate: 12.0,
//!     category: "Beverage".to_string(),
//! };
//!
//! let mut bill = Bill::new();
//! bill.add_item(&tea, 2.0).unwrap();
//!
//! let transaction = bill.finalize("t1", 1_700_000_000_000).unwrap();
//! assert_eq!(transaction.total_amount, 24.0);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod bill;
pub mod error;
pub mod money;
pub mod receipt;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use bill::Bill;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use receipt::{render_receipt, ReceiptOptions};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum lines allowed in a single bill.
///
/// ## Business Reason
/// Keeps a receipt printable on one roll segment and stops runaway bills.
pub const MAX_BILL_LINES: usize = 100;

/// Maximum quantity of a single line in a bill.
///
/// ## Business Reason
/// Catches typing 1000 instead of 10 at the counter.
pub const MAX_ITEM_QUANTITY: f64 = 999.0;

/// Maximum unit rate of an item.
///
/// ## Business Reason
/// A full bill at this rate and [`MAX_ITEM_QUANTITY`] still fits in
/// [`money::Money`] minor units.
pub const MAX_ITEM_RATE: f64 = 10_000_000.0;

/// Category applied when an item is created without one.
pub const DEFAULT_CATEGORY: &str = "General";
