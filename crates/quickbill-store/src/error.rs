//! # Store Error Types
//!
//! Error types for persistence operations.
//!
//! ## What is NOT an error
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Degrade, don't fail                                  │
//! │                                                                         │
//! │  Stored list cannot be decoded   → empty list + warning (LoadReport)   │
//! │  Key never written               → seed / empty list                   │
//! │  Update/delete of unknown id     → Outcome::NoMatch                    │
//! │  Operator declines confirmation  → Outcome::Declined                   │
//! │                                                                         │
//! │  StoreError is reserved for the store itself misbehaving (I/O, bad     │
//! │  key) and for calling a mutation before the repository is loaded.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Persistence errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying file I/O failed.
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// A list could not be encoded for writing.
    #[error("Encoding failed: {0}")]
    Encode(#[from] serde_json::Error),

    /// Key contains characters the backend cannot store.
    ///
    /// ## When This Occurs
    /// - `FileStore` keys must be `[A-Za-z0-9_.-]`, since they become file names
    #[error("Invalid storage key: '{0}'")]
    InvalidKey(String),

    /// A write was requested before the initial load completed.
    #[error("Repository is still loading; writes are not allowed yet")]
    NotReady,

    /// `load` was called on a repository that is already loaded.
    #[error("Repository is already loaded")]
    AlreadyLoaded,
}

/// Result type for persistence operations.
pub type StoreResult<T> = Result<T, StoreError>;
