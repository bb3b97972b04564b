//! Storage Layer
//!
//! Two stores back the note list: a synchronous fast store holding one JSON
//! snapshot of the whole list, and an asynchronous durable store holding one
//! record per item. Implementations: `localStorage` and IndexedDB in the
//! browser, in-memory for tests.

mod idb;
mod local;
mod shared_open;
#[cfg(test)]
mod memory;

pub use idb::IdbStore;
pub use local::LocalStorageStore;
#[cfg(test)]
pub use memory::{MemoryDurableStore, MemoryFastStore};

use async_trait::async_trait;
use wasm_bindgen::JsValue;

use crate::models::Item;

/// Common result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level errors
#[derive(Debug, Clone, PartialEq)]
pub enum StoreError {
    /// Backing API missing or refused (private mode, no window, blocked)
    Unavailable(String),
    /// Snapshot or record could not be encoded/decoded
    Serialization(String),
    /// Browser API call failed
    Js(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Unavailable(msg) => write!(f, "Store unavailable: {}", msg),
            StoreError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
            StoreError::Js(msg) => write!(f, "Browser error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<JsValue> for StoreError {
    fn from(value: JsValue) -> Self {
        StoreError::Js(format!("{:?}", value))
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

impl From<serde_wasm_bindgen::Error> for StoreError {
    fn from(err: serde_wasm_bindgen::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

/// Synchronous whole-list snapshot store
pub trait FastStore {
    /// `Ok(None)` when nothing has been saved yet
    fn get(&self) -> StoreResult<Option<Vec<Item>>>;

    fn set(&self, items: &[Item]) -> StoreResult<()>;
}

/// Asynchronous keyed record store (upsert by `id`)
#[async_trait(?Send)]
pub trait DurableStore {
    async fn put_one(&self, item: &Item) -> StoreResult<()>;

    async fn put_many(&self, items: &[Item]) -> StoreResult<()>;

    async fn get_all(&self) -> StoreResult<Vec<Item>>;

    /// Make the store hold exactly `items`, dropping records of deleted items
    async fn replace_all(&self, items: &[Item]) -> StoreResult<()>;
}

/// Encode the fast-store snapshot
pub fn encode_snapshot(items: &[Item]) -> StoreResult<String> {
    Ok(serde_json::to_string(items)?)
}

/// Decode the fast-store snapshot
pub fn decode_snapshot(raw: &str) -> StoreResult<Vec<Item>> {
    Ok(serde_json::from_str(raw)?)
}
