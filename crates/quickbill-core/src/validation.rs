//! # Validation Module
//!
//! Input validation for the operator-facing front end.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Front end (apps/terminal)                                    │
//! │  ├── Parse the typed command                                           │
//! │  └── THIS MODULE: field rules before a record is built                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Repository (quickbill-store)                                 │
//! │  └── Trusts its caller: no checks, no recomputation                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use quickbill_core::validation::{validate_pin, validate_rate};
//!
//! assert!(validate_pin("1234").is_ok());
//! assert!(validate_rate(-1.0).is_err());
//! ```

use crate::error::ValidationError;
use crate::{DEFAULT_CATEGORY, MAX_ITEM_QUANTITY, MAX_ITEM_RATE};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_NAME_LEN: usize = 100;
const MAX_CATEGORY_LEN: usize = 50;

// =============================================================================
// String Validators
// =============================================================================

/// Validates an item name and returns it trimmed.
///
/// ## Rules
/// - Must not be empty
/// - At most 100 characters
pub fn validate_item_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(name.to_string())
}

/// Validates a category and returns it trimmed.
///
/// An empty category becomes [`DEFAULT_CATEGORY`].
pub fn validate_category(category: &str) -> ValidationResult<String> {
    let category = category.trim();

    if category.is_empty() {
        return Ok(DEFAULT_CATEGORY.to_string());
    }

    if category.chars().count() > MAX_CATEGORY_LEN {
        return Err(ValidationError::TooLong {
            field: "category".to_string(),
            max: MAX_CATEGORY_LEN,
        });
    }

    Ok(category.to_string())
}

/// Validates the operator's phone number.
///
/// ## Rules
/// - 7 to 15 digits
/// - Optional leading `+`; spaces and hyphens are ignored
///
/// ## Returns
/// The phone number with separators removed.
pub fn validate_phone(phone: &str) -> ValidationResult<String> {
    let compact: String = phone
        .trim()
        .chars()
        .filter(|c| *c != ' ' && *c != '-')
        .collect();

    if compact.is_empty() {
        return Err(ValidationError::Required {
            field: "phone".to_string(),
        });
    }

    let digits = compact.strip_prefix('+').unwrap_or(&compact);
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: "must contain only digits".to_string(),
        });
    }

    if !(7..=15).contains(&digits.len()) {
        return Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: "must be 7 to 15 digits".to_string(),
        });
    }

    Ok(compact)
}

/// Validates a login PIN: 4 to 6 digits.
pub fn validate_pin(pin: &str) -> ValidationResult<()> {
    if pin.is_empty() {
        return Err(ValidationError::Required {
            field: "pin".to_string(),
        });
    }

    if !pin.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "pin".to_string(),
            reason: "must contain only digits".to_string(),
        });
    }

    if !(4..=6).contains(&pin.len()) {
        return Err(ValidationError::InvalidFormat {
            field: "pin".to_string(),
            reason: "must be 4 to 6 digits".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates an item rate (unit price).
///
/// ## Rules
/// - Must be a finite number
/// - Zero is allowed (free items, e.g. a complimentary glass of water)
/// - Must not exceed [`MAX_ITEM_RATE`]
pub fn validate_rate(rate: f64) -> ValidationResult<()> {
    if !rate.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: "rate".to_string(),
            reason: "must be a number".to_string(),
        });
    }

    if rate < 0.0 {
        return Err(ValidationError::Negative {
            field: "rate".to_string(),
        });
    }

    if rate > MAX_ITEM_RATE {
        return Err(ValidationError::InvalidFormat {
            field: "rate".to_string(),
            reason: format!("must be at most {}", MAX_ITEM_RATE),
        });
    }

    Ok(())
}

/// Validates a bill line quantity.
///
/// ## Rules
/// - Must be a finite number greater than zero
/// - Must not exceed [`MAX_ITEM_QUANTITY`]
pub fn validate_quantity(quantity: f64) -> ValidationResult<()> {
    if !quantity.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: "quantity".to_string(),
            reason: "must be a number".to_string(),
        });
    }

    if quantity <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if quantity > MAX_ITEM_QUANTITY {
        return Err(ValidationError::InvalidFormat {
            field: "quantity".to_string(),
            reason: format!("must be at most {}", MAX_ITEM_QUANTITY),
        });
    }

    Ok(())
}

/// Parses a typed number (rate or quantity) from operator input.
pub fn parse_number(field: &str, raw: &str) -> ValidationResult<f64> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: format!("'{}' is not a number", raw.trim()),
        })
}

// =============================================================================
// Unit Tests
// =============================================================================
