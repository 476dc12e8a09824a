//! # Views
//!
//! Which screen is active, and the text each screen renders.
//!
//! ## View Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    View Coordinator                                     │
//! │                                                                         │
//! │   start ──► auth ── login ──► billing ◄──► history ◄──► inventory       │
//! │              ▲                   │            │             │           │
//! │              └───── logout ──────┴────────────┴─────────────┘           │
//! │                                                                         │
//! │   switch(auth) while logged in  → rejected                              │
//! │   switch(anything) logged out   → NotLoggedIn                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;
use std::fmt::Write as _;

use quickbill_core::{AppView, Bill, Item, Money, Transaction, User, ValidationError};

use crate::error::{AppError, AppResult};

/// Number of id characters shown in listings. Commands accept any unique
/// prefix.
pub const SHORT_ID_LEN: usize = 8;

// =============================================================================
// Coordinator
// =============================================================================

/// Tracks the active view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewCoordinator {
    current: AppView,
}

impl Default for ViewCoordinator {
    fn default() -> Self {
        ViewCoordinator {
            current: AppView::Auth,
        }
    }
}

impl ViewCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> AppView {
        self.current
    }

    /// Login lands on billing.
    pub fn on_login(&mut self) {
        self.current = AppView::Billing;
    }

    pub fn on_logout(&mut self) {
        self.current = AppView::Auth;
    }

    /// Switches to `view`.
    ///
    /// Only the navigable views can be selected, and only when logged in.
    pub fn switch(&mut self, view: AppView, authenticated: bool) -> AppResult<AppView> {
        if !authenticated {
            return Err(AppError::NotLoggedIn);
        }
        if !AppView::NAVIGABLE.contains(&view) {
            return Err(ValidationError::NotAllowed {
                field: "view".to_string(),
                allowed: AppView::NAVIGABLE.iter().map(ToString::to_string).collect(),
            }
            .into());
        }
        self.current = view;
        Ok(view)
    }
}

// =============================================================================
// Rendering
// =============================================================================

/// Leading characters of an id, for listings.
pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(SHORT_ID_LEN) {
        Some((end, _)) => &id[..end],
        None => id,
    }
}

/// Login screen.
pub fn render_auth(profile: Option<&User>) -> String {
    let mut out = String::from("== QuickBill: Login ==\n");
    match profile {
        Some(user) => {
            let _ = writeln!(out, "Welcome back, {}.", user.phone);
            out.push_str("Enter: login <phone> <pin>\n");
        }
        None => {
            out.push_str("No profile yet. The first login creates it.\n");
            out.push_str("Enter: login <phone> <4-6 digit pin>\n");
        }
    }
    out
}

/// Billing screen: the inventory to pick from and the bill being composed.
pub fn render_billing(items: &[Item], bill: &Bill, currency: &str) -> String {
    let mut out = String::from("== Billing ==\n");

    if items.is_empty() {
        out.push_str("No items in inventory. Add one with: item add <rate> <category> <name>\n");
    } else {
        for item in items {
            let _ = writeln!(
                out,
                "  [{:<8}] {:<28} {} {:>10}",
                short_id(&item.id),
                item.name,
                currency,
                item.price().to_string()
            );
        }
    }

    out.push_str("-- Current bill --\n");
    let _ = writeln!(
        out,
        "  Customer: {}",
        bill.customer_name().unwrap_or("Walk-in Customer")
    );
    if bill.is_empty() {
        out.push_str("  (empty) bill add <item-id> [qty]\n");
    } else {
        for line in bill.lines() {
            let _ = writeln!(
                out,
                "  [{:<8}] {} (x{}) @ {}  {} {}",
                short_id(&line.id),
                line.name,
                line.quantity,
                Money::from_amount(line.rate),
                currency,
                line.line_total()
            );
        }
    }
    let _ = writeln!(out, "  TOTAL: {} {}", currency, bill.total());
    out
}

/// History screen: transactions newest first with their totals.
pub fn render_history(transactions: &[Transaction], currency: &str) -> String {
    let mut out = String::from("== History ==\n");

    if transactions.is_empty() {
        out.push_str("No transactions yet.\n");
        return out;
    }

    for tx in transactions.iter().rev() {
        let when = tx
            .created_at()
            .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "unknown time".to_string());
        let _ = writeln!(
            out,
            "  [{:<8}] {}  {:<20} {:>2} line(s)  {} {}",
            short_id(&tx.id),
            when,
            tx.customer_label(),
            tx.items.len(),
            currency,
            tx.total()
        );
    }

    let revenue: Money = transactions.iter().map(Transaction::total).sum();
    let _ = writeln!(
        out,
        "  {} transaction(s), {} {} total",
        transactions.len(),
        currency,
        revenue
    );
    out
}

/// Inventory screen: items grouped under their category.
pub fn render_inventory(items: &[Item], currency: &str) -> String {
    let mut out = String::from("== Inventory ==\n");

    if items.is_empty() {
        out.push_str("Inventory is empty.\n");
        return out;
    }

    let mut by_category: BTreeMap<&str, Vec<&Item>> = BTreeMap::new();
    for item in items {
        by_category.entry(item.category.as_str()).or_default().push(item);
    }

    for (category, items) in by_category {
        let _ = writeln!(out, "{} ({})", category, items.len());
        for item in items {
            let _ = writeln!(
                out,
                "  [{:<8}] {:<28} {} {:>10}",
                short_id(&item.id),
                item.name,
                currency,
                item.price().to_string()
            );
        }
    }
    let _ = writeln!(out, "{} item(s)", items.len());
    out
}
