//! localStorage snapshot store

use super::{decode_snapshot, encode_snapshot, FastStore, StoreError, StoreResult};
use crate::models::Item;

/// Whole-list JSON snapshot under one `localStorage` key
#[derive(Debug, Clone)]
pub struct LocalStorageStore {
    key: String,
}

impl LocalStorageStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage(&self) -> StoreResult<web_sys::Storage> {
        let window = web_sys::window().ok_or_else(|| StoreError::Unavailable("no window".to_string()))?;
        window
            .local_storage()?
            .ok_or_else(|| StoreError::Unavailable("localStorage disabled".to_string()))
    }
}

impl FastStore for LocalStorageStore {
    fn get(&self) -> StoreResult<Option<Vec<Item>>> {
        match self.storage()?.get_item(&self.key)? {
            Some(raw) if !raw.is_empty() => decode_snapshot(&raw).map(Some),
            _ => Ok(None),
        }
    }

    fn set(&self, items: &[Item]) -> StoreResult<()> {
        let raw = encode_snapshot(items)?;
        self.storage()?.set_item(&self.key, &raw)?;
        Ok(())
    }
}
