//! # Bill
//!
//! The bill being composed at the counter, before it becomes a Transaction.
//!
//! ## Bill Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Bill Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────────┐                     │
//! │  │  Empty   │────►│ In Bill  │────►│ Transaction  │                     │
//! │  │  Bill    │     │          │     │ (finalize)   │                     │
//! │  └──────────┘     └──────────┘     └──────────────┘                     │
//! │       ▲                │                                                │
//! │       │           add_item                                             │
//! │       │           set_quantity                                         │
//! │       │           remove_line                                          │
//! │       │                │                                                │
//! │       └──── clear ─────┘                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A bill is never persisted. Only the Transaction produced by
//! [`Bill::finalize`] reaches the store.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{BillItem, Item, Transaction};
use crate::validation::validate_quantity;
use crate::{MAX_BILL_LINES, MAX_ITEM_QUANTITY};

/// An in-progress bill.
///
/// ## Invariants
/// - Lines are unique by `item_id` (adding the same item increases quantity)
/// - Every line has `quantity > 0` and `total = rate × quantity`
/// - At most [`MAX_BILL_LINES`] lines
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    lines: Vec<BillItem>,
    customer_name: Option<String>,
}

impl Bill {
    /// Creates a new empty bill.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an inventory item or increases its quantity if already billed.
    ///
    /// ## Price Freezing
    /// Name and rate are copied from the item now. Editing the item later
    /// does not change this line.
    pub fn add_item(&mut self, item: &Item, quantity: f64) -> CoreResult<&BillItem> {
        validate_quantity(quantity)?;

        if let Some(index) = self.lines.iter().position(|l| l.item_id == item.id) {
            let new_qty = self.lines[index].quantity + quantity;
            if new_qty > MAX_ITEM_QUANTITY {
                return Err(CoreError::QuantityTooLarge {
                    requested: new_qty,
                    max: MAX_ITEM_QUANTITY,
                });
            }
            let line = &mut self.lines[index];
            line.quantity = new_qty;
            line.total = line_total(line.rate, new_qty);
            return Ok(&self.lines[index]);
        }

        if self.lines.len() >= MAX_BILL_LINES {
            return Err(CoreError::BillTooLarge {
                max: MAX_BILL_LINES,
            });
        }

        self.lines.push(BillItem {
            id: Uuid::new_v4().to_string(),
            item_id: item.id.clone(),
            name: item.name.clone(),
            rate: item.rate,
            quantity,
            total: line_total(item.rate, quantity),
        });

        Ok(&self.lines[self.lines.len() - 1])
    }

    /// Sets the quantity of a line. A quantity of zero removes the line.
    pub fn set_quantity(&mut self, line_id: &str, quantity: f64) -> CoreResult<()> {
        if quantity == 0.0 {
            self.remove_line(line_id)?;
            return Ok(());
        }

        validate_quantity(quantity)?;

        let line = self
            .lines
            .iter_mut()
            .find(|l| l.id == line_id)
            .ok_or_else(|| CoreError::LineNotFound(line_id.to_string()))?;

        line.quantity = quantity;
        line.total = line_total(line.rate, quantity);
        Ok(())
    }

    /// Removes a line and returns it.
    pub fn remove_line(&mut self, line_id: &str) -> CoreResult<BillItem> {
        let index = self
            .lines
            .iter()
            .position(|l| l.id == line_id)
            .ok_or_else(|| CoreError::LineNotFound(line_id.to_string()))?;

        Ok(self.lines.remove(index))
    }

    /// Sets the customer name. Blank names clear it.
    pub fn set_customer_name(&mut self, name: Option<&str>) {
        self.customer_name = name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string);
    }

    pub fn customer_name(&self) -> Option<&str> {
        self.customer_name.as_deref()
    }

    pub fn lines(&self) -> &[BillItem] {
        &self.lines
    }

    /// Finds a line by its id.
    pub fn line(&self, line_id: &str) -> Option<&BillItem> {
        self.lines.iter().find(|l| l.id == line_id)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Sum of line totals.
    pub fn total(&self) -> Money {
        self.lines.iter().map(BillItem::line_total).sum()
    }

    /// Empties the bill, including the customer name.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.customer_name = None;
    }

    /// Produces the Transaction for this bill.
    ///
    /// `totalAmount` is computed here, once. Nothing downstream recomputes it.
    ///
    /// ## Errors
    /// `CoreError::EmptyBill` if the bill has no lines.
    pub fn finalize(&self, id: impl Into<String>, timestamp: i64) -> CoreResult<Transaction> {
        if self.lines.is_empty() {
            return Err(CoreError::EmptyBill);
        }

        Ok(Transaction {
            id: id.into(),
            timestamp,
            items: self.lines.clone(),
            total_amount: self.total().amount(),
            customer_name: self.customer_name.clone(),
        })
    }
}

/// Unrounded; rounding to minor units happens once, in [`Bill::total`].
fn line_total(rate: f64, quantity: f64) -> f64 {
    rate * quantity
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, rate: f64) -> Item {
        Item {
            id: id.to_string(),
            name: format!("Item {}", id),
            rate,
            category: "General".to_string(),
        }
    }

    #[test]
    fn test_add_item_snapshots_rate_and_computes_total() {
        let mut bill = Bill::new();
        let line = bill.add_item(&item("i1", 12.0), 2.0).unwrap().clone();

        assert_eq!(line.item_id, "i1");
        assert_eq!(line.name, "Item i1");
        assert_eq!(line.total, 24.0);
        assert_eq!(bill.total().amount(), 24.0);
    }

    #[test]
    fn test_add_same_item_increases_quantity() {
        let mut bill = Bill::new();
        let tea = item("i1", 10.0);

        bill.add_item(&tea, 2.0).unwrap();
        bill.add_item(&tea, 3.0).unwrap();

        assert_eq!(bill.len(), 1);
        assert_eq!(bill.lines()[0].quantity, 5.0);
        assert_eq!(bill.lines()[0].total, 50.0);
    }

    #[test]
    fn test_quantity_limits() {
        let mut bill = Bill::new();
        let tea = item("i1", 10.0);

        assert!(bill.add_item(&tea, 0.0).is_err());
        bill.add_item(&tea, 900.0).unwrap();
        let err = bill.add_item(&tea, 100.0).unwrap_err();
        assert!(matches!(err, CoreError::QuantityTooLarge { .. }));
        assert_eq!(bill.lines()[0].quantity, 900.0);
    }

    #[test]
    fn test_line_limit() {
        let mut bill = Bill::new();
        for i in 0..MAX_BILL_LINES {
            bill.add_item(&item(&i.to_string(), 1.0), 1.0).unwrap();
        }
        let err = bill.add_item(&item("overflow", 1.0), 1.0).unwrap_err();
        assert!(matches!(err, CoreError::BillTooLarge { max: MAX_BILL_LINES }));
    }

    #[test]
    fn test_set_quantity_and_remove() {
        let mut bill = Bill::new();
        let line_id = bill.add_item(&item("i1", 4.5), 1.0).unwrap().id.clone();

        bill.set_quantity(&line_id, 4.0).unwrap();
        assert_eq!(bill.line(&line_id).unwrap().total, 18.0);

        bill.set_quantity(&line_id, 0.0).unwrap();
        assert!(bill.is_empty());

        assert!(matches!(
            bill.remove_line(&line_id),
            Err(CoreError::LineNotFound(_))
        ));
    }

    #[test]
    fn test_finalize() {
        let mut bill = Bill::new();
        bill.add_item(&item("i1", 12.0), 2.0).unwrap();
        bill.add_item(&item("i2", 0.1), 1.0).unwrap();
        bill.add_item(&item("i3", 0.2), 1.0).unwrap();
        bill.set_customer_name(Some("  Asha "));

        let tx = bill.finalize("t1", 1_700_000_000_000).unwrap();

        assert_eq!(tx.id, "t1");
        assert_eq!(tx.items.len(), 3);
        assert_eq!(tx.total_amount, 24.3);
        assert_eq!(tx.customer_name.as_deref(), Some("Asha"));
    }

    #[test]
    fn test_sub_paisa_rate_is_not_rounded_before_multiplying() {
        let mut bill = Bill::new();
        let line = bill.add_item(&item("i1", 0.125), 2.0).unwrap().clone();

        assert_eq!(line.total, line.rate * line.quantity);
        assert_eq!(line.total, 0.25);
        assert_eq!(bill.total().minor(), 25);

        let line_id = line.id.clone();
        bill.set_quantity(&line_id, 3.0).unwrap();
        let line = bill.line(&line_id).unwrap();
        assert_eq!(line.total, 0.375);
    }

    #[test]
    fn test_total_at_rate_cap_does_not_overflow() {
        let mut bill = Bill::new();
        bill.add_item(&item("i1", crate::MAX_ITEM_RATE), MAX_ITEM_QUANTITY)
            .unwrap();
        bill.add_item(&item("i2", crate::MAX_ITEM_RATE), MAX_ITEM_QUANTITY)
            .unwrap();

        let expected = 2.0 * crate::MAX_ITEM_RATE * MAX_ITEM_QUANTITY;
        assert_eq!(bill.total().amount(), expected);
    }

    #[test]
    fn test_finalize_empty_bill_fails() {
        let bill = Bill::new();
        assert!(matches!(bill.finalize("t1", 0), Err(CoreError::EmptyBill)));
    }

    #[test]
    fn test_clear_resets_customer() {
        let mut bill = Bill::new();
        bill.add_item(&item("i1", 1.0), 1.0).unwrap();
        bill.set_customer_name(Some("Asha"));
        bill.clear();

        assert!(bill.is_empty());
        assert_eq!(bill.customer_name(), None);
    }
}
