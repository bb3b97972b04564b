//! Quix Service Worker
//!
//! Offline shell cache. `sw.js` imports this module and forwards the
//! install, activate and fetch events to the exports below.

mod shell;

pub use shell::{cache_first, precache, Served, ASSET_URLS, CACHE_NAME, FALLBACK_URL, SHELL_URLS};

use console_logger::LevelFilter;
use tracing::{debug, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Cache, CacheStorage, Request, Response, ServiceWorkerGlobalScope};

fn scope() -> ServiceWorkerGlobalScope {
    js_sys::global().unchecked_into()
}

/// Resolves to `Some(response)` or `None` when the cache has no match
async fn lookup(caches: &CacheStorage, request: &Request) -> Result<Option<Response>, JsValue> {
    let found = JsFuture::from(caches.match_with_request(request)).await?;
    if found.is_undefined() {
        return Ok(None);
    }
    Ok(Some(found.dyn_into()?))
}

async fn lookup_url(caches: &CacheStorage, url: &str) -> Result<Option<Response>, JsValue> {
    let found = JsFuture::from(caches.match_with_str(url)).await?;
    if found.is_undefined() {
        return Ok(None);
    }
    Ok(Some(found.dyn_into()?))
}

#[wasm_bindgen(start)]
pub fn start() {
    console_logger::init(LevelFilter::INFO);
}

/// Precache the shell, then activate without waiting for old workers
#[wasm_bindgen]
pub async fn on_install() -> Result<JsValue, JsValue> {
    let scope = scope();
    let caches = scope.caches()?;
    let cache: Cache = JsFuture::from(caches.open(CACHE_NAME)).await?.dyn_into()?;

    let cached = precache(|url| {
        let pending = cache.add_with_str(url);
        async move { JsFuture::from(pending).await.map(|_| ()) }
    })
    .await?;
    info!("[SW] Cached {} resources in {}", cached, CACHE_NAME);

    JsFuture::from(scope.skip_waiting()?).await
}

/// Take control of every open page immediately
#[wasm_bindgen]
pub async fn on_activate() -> Result<JsValue, JsValue> {
    let result = JsFuture::from(scope().clients().claim()).await?;
    info!("[SW] Activated");
    Ok(result)
}

/// Answer a fetch: cache, then network, then the cached root document
#[wasm_bindgen]
pub async fn on_fetch(request: Request) -> Result<JsValue, JsValue> {
    let scope = scope();
    let caches = scope.caches()?;

    let served = cache_first(
        lookup(&caches, &request),
        || async {
            let response = JsFuture::from(scope.fetch_with_request(&request)).await?;
            response.dyn_into::<Response>()
        },
        || async {
            warn!("[SW] Network failed for {}, serving shell", request.url());
            lookup_url(&caches, FALLBACK_URL).await
        },
    )
    .await?;

    if let Served::Cache(_) = &served {
        debug!("[SW] Cache hit {}", request.url());
    }

    Ok(served.into_inner().map(JsValue::from).unwrap_or(JsValue::UNDEFINED))
}
