//! IndexedDB record store
//!
//! One object store keyed by `id`. The database handle is opened lazily,
//! once, and shared; every operation runs in its own transaction.

use async_trait::async_trait;
use js_sys::{Promise, Reflect};
use tracing::debug;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    IdbDatabase, IdbObjectStore, IdbObjectStoreParameters, IdbOpenDbRequest, IdbRequest,
    IdbTransaction, IdbTransactionMode, IdbVersionChangeEvent,
};

use super::shared_open::SharedOpen;
use super::{DurableStore, StoreError, StoreResult};
use crate::models::Item;

pub struct IdbStore {
    name: String,
    version: u32,
    store_name: String,
    db: SharedOpen<IdbDatabase>,
}

impl IdbStore {
    pub fn new(name: impl Into<String>, version: u32, store_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version,
            store_name: store_name.into(),
            db: SharedOpen::new(),
        }
    }

    async fn database(&self) -> StoreResult<IdbDatabase> {
        let name = self.name.clone();
        let version = self.version;
        let store_name = self.store_name.clone();
        self.db
            .get_or_open(move || open_database(name, version, store_name))
            .await
    }

    async fn object_store(&self, mode: IdbTransactionMode) -> StoreResult<(IdbTransaction, IdbObjectStore)> {
        let db = self.database().await?;
        let tx = db.transaction_with_str_and_mode(&self.store_name, mode)?;
        let store = tx.object_store(&self.store_name)?;
        Ok((tx, store))
    }
}

/// Open the database, creating the object store on first use
async fn open_database(name: String, version: u32, store_name: String) -> StoreResult<IdbDatabase> {
    let factory = web_sys::window()
        .ok_or_else(|| StoreError::Unavailable("no window".to_string()))?
        .indexed_db()?
        .ok_or_else(|| StoreError::Unavailable("indexedDB disabled".to_string()))?;
    let request = factory.open_with_u32(&name, version)?;

    let on_upgrade = Closure::<dyn FnMut(IdbVersionChangeEvent)>::new(move |ev: IdbVersionChangeEvent| {
        let db = ev
            .target()
            .and_then(|t| t.dyn_into::<IdbOpenDbRequest>().ok())
            .and_then(|req| req.result().ok())
            .and_then(|res| res.dyn_into::<IdbDatabase>().ok());
        if let Some(db) = db {
            if !db.object_store_names().contains(&store_name) {
                let params = IdbObjectStoreParameters::new();
                let _ = Reflect::set(&params, &"keyPath".into(), &"id".into());
                let _ = db.create_object_store_with_optional_parameters(&store_name, &params);
            }
        }
    });
    request.set_onupgradeneeded(Some(on_upgrade.as_ref().unchecked_ref()));
    let opened = wait_request(&request).await;
    request.set_onupgradeneeded(None);
    drop(on_upgrade);

    let db: IdbDatabase = opened?.dyn_into()?;
    debug!("[IDB] Opened {} v{}", name, version);
    Ok(db)
}

/// Resolve once a request succeeds, yielding its result
async fn wait_request(request: &IdbRequest) -> StoreResult<JsValue> {
    let promise = Promise::new(&mut |resolve, reject| {
        request.set_onsuccess(Some(&resolve));
        request.set_onerror(Some(&reject));
    });
    JsFuture::from(promise).await?;
    Ok(request.result()?)
}

/// Resolve once a transaction commits
async fn wait_transaction(tx: &IdbTransaction) -> StoreResult<()> {
    let promise = Promise::new(&mut |resolve, reject| {
        tx.set_oncomplete(Some(&resolve));
        tx.set_onerror(Some(&reject));
        tx.set_onabort(Some(&reject));
    });
    JsFuture::from(promise).await?;
    Ok(())
}

fn put_all(store: &IdbObjectStore, items: &[Item]) -> StoreResult<()> {
    for item in items {
        store.put(&serde_wasm_bindgen::to_value(item)?)?;
    }
    Ok(())
}

#[async_trait(?Send)]
impl DurableStore for IdbStore {
    async fn put_one(&self, item: &Item) -> StoreResult<()> {
        let (tx, store) = self.object_store(IdbTransactionMode::Readwrite).await?;
        store.put(&serde_wasm_bindgen::to_value(item)?)?;
        wait_transaction(&tx).await
    }

    async fn put_many(&self, items: &[Item]) -> StoreResult<()> {
        let (tx, store) = self.object_store(IdbTransactionMode::Readwrite).await?;
        put_all(&store, items)?;
        wait_transaction(&tx).await
    }

    async fn get_all(&self) -> StoreResult<Vec<Item>> {
        let (_tx, store) = self.object_store(IdbTransactionMode::Readonly).await?;
        let records = wait_request(&store.get_all()?).await?;
        Ok(serde_wasm_bindgen::from_value(records)?)
    }

    async fn replace_all(&self, items: &[Item]) -> StoreResult<()> {
        let (tx, store) = self.object_store(IdbTransactionMode::Readwrite).await?;
        store.clear()?;
        put_all(&store, items)?;
        wait_transaction(&tx).await
    }
}
