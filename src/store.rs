//! Key/value store collaborator.
//!
//! Executors that change persistent state do so through [`Store`]. The crate
//! ships [`MemoryStore`]; host applications implement the trait over their
//! own preference backend.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::error::Error;
use std::sync::Arc;
use thiserror::Error;
use tracing::trace;
use url::Url;

/// A typed value as the store keeps it.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreValue {
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    String(String),
    Data(Vec<u8>),
    Url(Url),
    Date(DateTime<Utc>),
}

impl StoreValue {
    /// Short name of the variant, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            StoreValue::Bool(_) => "bool",
            StoreValue::I8(_) => "i8",
            StoreValue::I16(_) => "i16",
            StoreValue::I32(_) => "i32",
            StoreValue::I64(_) => "i64",
            StoreValue::U8(_) => "u8",
            StoreValue::U16(_) => "u16",
            StoreValue::U32(_) => "u32",
            StoreValue::U64(_) => "u64",
            StoreValue::F32(_) => "f32",
            StoreValue::F64(_) => "f64",
            StoreValue::String(_) => "string",
            StoreValue::Data(_) => "data",
            StoreValue::Url(_) => "url",
            StoreValue::Date(_) => "date",
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store rejected value for key '{key}': {reason}")]
    Rejected { key: String, reason: String },

    #[error("store backend failed: {0}")]
    Backend(Box<dyn Error + Send + Sync>),
}

impl StoreError {
    pub fn backend(error: impl Into<Box<dyn Error + Send + Sync>>) -> Self {
        StoreError::Backend(error.into())
    }
}

/// Minimal persistent key/value interface used by executors.
///
/// Each call is treated as atomic; callers never hold a lock across calls.
pub trait Store: Send + Sync {
    fn set(&self, key: &str, value: StoreValue) -> Result<(), StoreError>;

    fn get(&self, key: &str) -> Result<Option<StoreValue>, StoreError>;

    /// Remove `key`. Deleting a missing key is not an error.
    fn delete(&self, key: &str) -> Result<(), StoreError>;
}

impl<S: Store + ?Sized> Store for Arc<S> {
    fn set(&self, key: &str, value: StoreValue) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn get(&self, key: &str) -> Result<Option<StoreValue>, StoreError> {
        (**self).get(key)
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        (**self).delete(key)
    }
}

/// In-process [`Store`] backed by a hash map.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, StoreValue>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    pub fn len(&self) -> usize {
        self.values.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.read().is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.read().contains_key(key)
    }

    /// Stored keys, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.values.read().keys().cloned().collect();
        keys.sort();
        keys
    }
}

impl Store for MemoryStore {
    fn set(&self, key: &str, value: StoreValue) -> Result<(), StoreError> {
        trace!(key, kind = value.kind(), "store set");
        self.values.write().insert(key.to_string(), value);
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<StoreValue>, StoreError> {
        Ok(self.values.read().get(key).cloned())
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        trace!(key, "store delete");
        self.values.write().remove(key);
        Ok(())
    }
}
