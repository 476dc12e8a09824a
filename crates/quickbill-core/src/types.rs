//! # Domain Types
//!
//! The records QuickBill persists, plus the view enumeration.
//!
//! ## Record Shapes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Item       │   │    BillItem     │   │   Transaction   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │◄──│  itemId         │   │  id             │       │
//! │  │  name           │   │  name, rate     │──►│  items[]        │       │
//! │  │  rate           │   │  quantity       │   │  totalAmount    │       │
//! │  │  category       │   │  total          │   │  customerName?  │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                              │
//! │  │      User       │   │     AppView     │                              │
//! │  │  phone, pin     │   │  billing        │                              │
//! │  └─────────────────┘   │  history        │                              │
//! │                        │  inventory      │                              │
//! │                        │  auth           │                              │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Encoding
//! Field names are camelCase on the wire (`itemId`, `totalAmount`,
//! `customerName`) so stored lists stay readable by any front end that
//! shares the key/value store. Numbers are plain JSON numbers.
//!
//! ## Trust-the-caller totals
//! `BillItem::total` and `Transaction::total_amount` are written by whoever
//! builds the record (normally [`crate::Bill::finalize`]). Nothing downstream
//! recomputes or validates them.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Item
// =============================================================================

/// A sellable inventory line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Item {
    /// Caller-assigned identifier, unique within the inventory.
    pub id: String,

    /// Display name shown on the bill and the receipt.
    pub name: String,

    /// Unit price.
    pub rate: f64,

    /// Free-form grouping label (e.g. "Beverage").
    pub category: String,
}

impl Item {
    /// Returns the rate as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_amount(self.rate)
    }
}

// =============================================================================
// Bill Item
// =============================================================================

/// One line of a bill.
/// Uses the snapshot pattern: name and rate are frozen when the line is added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BillItem {
    pub id: String,
    /// Inventory item this line was taken from. Not a live reference: the
    /// item may since have been edited or deleted.
    pub item_id: String,
    /// Item name at time of billing (frozen).
    pub name: String,
    /// Unit price at time of billing (frozen).
    pub rate: f64,
    pub quantity: f64,
    /// rate × quantity.
    pub total: f64,
}

impl BillItem {
    /// Returns the line total as Money.
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_amount(self.total)
    }
}

// =============================================================================
// Transaction
// =============================================================================

/// A finalized sale. Immutable once created; only whole-record deletion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Transaction {
    pub id: String,
    /// Epoch milliseconds.
    pub timestamp: i64,
    pub items: Vec<BillItem>,
    /// Σ items[].total at creation time.
    pub total_amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub customer_name: Option<String>,
}

impl Transaction {
    /// Returns the total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_amount(self.total_amount)
    }

    /// Returns the timestamp as a UTC date, if it is in range.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }

    /// Customer name, or the walk-in placeholder when none was entered.
    pub fn customer_label(&self) -> &str {
        match self.customer_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => "Walk-in Customer",
        }
    }
}

// =============================================================================
// User
// =============================================================================

/// The single local operator profile.
///
/// The PIN is stored and compared in plaintext. This is a counter-top gate,
/// not a trust boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct User {
    pub phone: String,
    pub pin: String,
}

// =============================================================================
// App View
// =============================================================================

/// Which screen the front end is showing. Session state only; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum AppView {
    #[default]
    Billing,
    History,
    Inventory,
    Auth,
}

impl AppView {
    /// Views reachable from the navigation bar once logged in.
    pub const NAVIGABLE: [AppView; 3] = [AppView::Billing, AppView::History, AppView::Inventory];
}

impl fmt::Display for AppView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppView::Billing => write!(f, "billing"),
            AppView::History => write!(f, "history"),
            AppView::Inventory => write!(f, "inventory"),
            AppView::Auth => write!(f, "auth"),
        }
    }
}

impl FromStr for AppView {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "billing" | "bill" => Ok(AppView::Billing),
            "history" => Ok(AppView::History),
            "inventory" | "items" => Ok(AppView::Inventory),
            "auth" | "login" => Ok(AppView::Auth),
            _ => Err(ValidationError::NotAllowed {
                field: "view".to_string(),
                allowed: vec![
                    "billing".to_string(),
                    "history".to_string(),
                    "inventory".to_string(),
                ],
            }),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
