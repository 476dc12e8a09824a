//! # App Error Type
//!
//! Unified error type for the terminal front end.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in QuickBill                              │
//! │                                                                         │
//! │  quickbill> bill add tea 0                                              │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐   │
//! │  │  Command handler                                                 │   │
//! │  │  AppResult<String>                                               │   │
//! │  │         │                                                        │   │
//! │  │  Validation error? ─── ValidationError::MustBePositive ──┐       │   │
//! │  │         │                                                 │      │   │
//! │  │  Store error? ──────── StoreError::Io ───────────────── AppError │   │
//! │  │         │                                                 │      │   │
//! │  │  Success ─────────────────────────────────────────────► output   │   │
//! │  └──────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  The shell prints "error: <message>" and reads the next line.           │
//! │  Only startup errors (config, opening the store) end the program.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use quickbill_core::{CoreError, ValidationError};
use quickbill_store::StoreError;

/// Terminal application errors.
#[derive(Debug, Error)]
pub enum AppError {
    // =========================================================================
    // Wrapped Errors
    // =========================================================================
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    #[error("Failed to parse config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Failed to encode config: {0}")]
    ConfigEncode(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // =========================================================================
    // Session Errors
    // =========================================================================
    #[error("Log in first: login <phone> <pin>")]
    NotLoggedIn,

    #[error("Incorrect PIN for {phone}")]
    IncorrectPin { phone: String },

    // =========================================================================
    // Lookup Errors
    // =========================================================================
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("{entity} id '{prefix}' is ambiguous; type more characters")]
    Ambiguous {
        entity: &'static str,
        prefix: String,
    },

    // =========================================================================
    // Shell Errors
    // =========================================================================
    #[error("{0}")]
    Usage(String),

    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl AppError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        AppError::NotFound {
            entity,
            id: id.into(),
        }
    }
}

/// Result type for terminal operations.
pub type AppResult<T> = Result<T, AppError>;
