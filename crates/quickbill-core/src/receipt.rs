//! # Receipt Layout
//!
//! Plain-text rendering of a saved Transaction for a receipt printer or a
//! terminal.
//!
//! ```text
//!             BUSINESS RECEIPT
//!           2023-11-14 22:13 UTC
//! ----------------------------------------
//! Customer:               Walk-in Customer
//! ----------------------------------------
//! Tea (x2)                       RS. 24.00
//! ========================================
//! TOTAL AMOUNT                   RS. 24.00
//!
//!       Thank you for your business!
//!          Phone ID: 03001234567
//! ```

use crate::types::{Transaction, User};

/// Presentation settings for [`render_receipt`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptOptions {
    pub title: String,
    /// Label printed before every amount (e.g. "RS.").
    pub currency: String,
    /// Line width in characters.
    pub width: usize,
}

impl Default for ReceiptOptions {
    fn default() -> Self {
        ReceiptOptions {
            title: "Business Receipt".to_string(),
            currency: "RS.".to_string(),
            width: 40,
        }
    }
}

/// Renders the receipt for `transaction`.
///
/// `user` supplies the phone id printed at the bottom; it is omitted when no
/// one is logged in.
pub fn render_receipt(
    transaction: &Transaction,
    user: Option<&User>,
    options: &ReceiptOptions,
) -> String {
    let width = options.width.max(24);
    let rule = "-".repeat(width);
    let mut lines = Vec::new();

    lines.push(center(&options.title.to_uppercase(), width));
    let when = transaction
        .created_at()
        .map(|at| at.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| "unknown time".to_string());
    lines.push(center(&when, width));
    lines.push(rule.clone());

    lines.push(columns("Customer:", transaction.customer_label(), width));
    lines.push(rule);

    for item in &transaction.items {
        let label = format!("{} (x{})", item.name, item.quantity);
        let amount = format!("{} {}", options.currency, item.line_total());
        lines.push(columns(&label, &amount, width));
    }

    lines.push("=".repeat(width));
    let total = format!("{} {}", options.currency, transaction.total());
    lines.push(columns("TOTAL AMOUNT", &total, width));
    lines.push(String::new());

    lines.push(center("Thank you for your business!", width));
    if let Some(user) = user {
        lines.push(center(&format!("Phone ID: {}", user.phone), width));
    }

    let mut out = lines
        .iter()
        .map(|l| l.trim_end())
        .collect::<Vec<_>>()
        .join("\n");
    out.push('\n');
    out
}

/// Left and right text separated by at least one space.
fn columns(left: &str, right: &str, width: usize) -> String {
    let used = left.chars().count() + right.chars().count();
    let gap = width.saturating_sub(used).max(1);
    format!("{}{}{}", left, " ".repeat(gap), right)
}

fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    let pad = width.saturating_sub(len) / 2;
    format!("{}{}", " ".repeat(pad), text)
}
