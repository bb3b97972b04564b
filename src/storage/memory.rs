//! In-memory stores for tests

use std::cell::{Cell, RefCell};

use async_trait::async_trait;

use super::{decode_snapshot, encode_snapshot, DurableStore, FastStore, StoreError, StoreResult};
use crate::models::Item;

/// Holds the raw snapshot string so tests can plant malformed data
#[derive(Default)]
pub struct MemoryFastStore {
    pub raw: RefCell<Option<String>>,
    pub fail_writes: Cell<bool>,
}

impl MemoryFastStore {
    pub fn with_raw(raw: &str) -> Self {
        Self {
            raw: RefCell::new(Some(raw.to_string())),
            ..Default::default()
        }
    }

    /// Decoded snapshot, panicking on bad data
    pub fn snapshot(&self) -> Option<Vec<Item>> {
        self.raw
            .borrow()
            .as_deref()
            .map(|raw| decode_snapshot(raw).expect("snapshot should decode"))
    }
}

impl FastStore for MemoryFastStore {
    fn get(&self) -> StoreResult<Option<Vec<Item>>> {
        match self.raw.borrow().as_deref() {
            Some(raw) if !raw.is_empty() => decode_snapshot(raw).map(Some),
            _ => Ok(None),
        }
    }

    fn set(&self, items: &[Item]) -> StoreResult<()> {
        if self.fail_writes.get() {
            return Err(StoreError::Unavailable("quota exceeded".to_string()));
        }
        *self.raw.borrow_mut() = Some(encode_snapshot(items)?);
        Ok(())
    }
}

/// Records keyed by id, insertion order preserved
#[derive(Default)]
pub struct MemoryDurableStore {
    pub records: RefCell<Vec<Item>>,
    pub fail: Cell<bool>,
}

impl MemoryDurableStore {
    pub fn with_records(records: Vec<Item>) -> Self {
        Self {
            records: RefCell::new(records),
            ..Default::default()
        }
    }

    fn check(&self) -> StoreResult<()> {
        if self.fail.get() {
            return Err(StoreError::Js("transaction aborted".to_string()));
        }
        Ok(())
    }

    pub fn upsert(&self, item: &Item) {
        let mut records = self.records.borrow_mut();
        match records.iter_mut().find(|r| r.id == item.id) {
            Some(existing) => *existing = item.clone(),
            None => records.push(item.clone()),
        }
    }
}

#[async_trait(?Send)]
impl DurableStore for MemoryDurableStore {
    async fn put_one(&self, item: &Item) -> StoreResult<()> {
        self.check()?;
        self.upsert(item);
        Ok(())
    }

    async fn put_many(&self, items: &[Item]) -> StoreResult<()> {
        self.check()?;
        for item in items {
            self.upsert(item);
        }
        Ok(())
    }

    async fn get_all(&self) -> StoreResult<Vec<Item>> {
        self.check()?;
        Ok(self.records.borrow().clone())
    }

    async fn replace_all(&self, items: &[Item]) -> StoreResult<()> {
        self.check()?;
        *self.records.borrow_mut() = items.to_vec();
        Ok(())
    }
}
