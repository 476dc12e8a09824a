//! # Key/Value Backends
//!
//! The persistent store adapter: opaque strings addressed by key.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    KeyValueStore                                        │
//! │                                                                         │
//! │   get(key)        → Some(string) | None                                 │
//! │   set(key, value) → overwrite                                           │
//! │   remove(key)     → key becomes absent (absent already is fine)         │
//! │                                                                         │
//! │   ┌──────────────┐          ┌──────────────┐                            │
//! │   │ MemoryStore  │          │  FileStore   │                            │
//! │   │ HashMap      │          │ one file per │                            │
//! │   │ (tests,      │          │ key in a     │                            │
//! │   │  --memory)   │          │ data dir     │                            │
//! │   └──────────────┘          └──────────────┘                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Backends are shared handles: the state repository and the session holder
//! both hold an `Arc` of the same store, so every method takes `&self`.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use std::sync::Arc;

use crate::error::StoreResult;

/// An opaque key → string store.
pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored under `key`, or `None` if the key is absent.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Removes `key`. Removing an absent key succeeds.
    fn remove(&self, key: &str) -> StoreResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        (**self).remove(key)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        (**self).remove(key)
    }
}
