//! Shell Cache Policy
//!
//! What gets precached and how a request is answered: cache first, then
//! network, then the cached root document.

use std::future::Future;

use tracing::warn;

/// Bump when the shell changes; there is no other invalidation.
pub const CACHE_NAME: &str = "quix-shell-v1";

/// Resources stored on install
pub const SHELL_URLS: &[&str] = &[
    ".",
    "index.html",
    "manifest.json",
    "icon-192.png",
    "icon-512.png",
];

/// Build output cached alongside the shell. A miss here is logged and
/// skipped so a renamed bundle cannot stop the worker from installing.
pub const ASSET_URLS: &[&str] = &[
    "styles.css",
    "quix-ui.js",
    "quix-ui_bg.wasm",
    "quix_sw.js",
    "quix_sw_bg.wasm",
];

/// Served when both cache and network miss
pub const FALLBACK_URL: &str = ".";

/// Cache every shell URL, failing on the first miss, then every asset URL
/// best effort. Returns how many URLs were cached.
pub async fn precache<E, F, Fut>(mut add: F) -> Result<usize, E>
where
    E: std::fmt::Debug,
    F: FnMut(&'static str) -> Fut,
    Fut: Future<Output = Result<(), E>>,
{
    for url in SHELL_URLS {
        add(url).await?;
    }
    let mut cached = SHELL_URLS.len();
    for url in ASSET_URLS {
        match add(url).await {
            Ok(()) => cached += 1,
            Err(err) => warn!("[SW] Skipped {}: {:?}", url, err),
        }
    }
    Ok(cached)
}

/// Where a response came from
#[derive(Debug, Clone, PartialEq)]
pub enum Served<T> {
    Cache(T),
    Network(T),
    /// Network failed; the cached root document, if it is still cached
    Fallback(Option<T>),
}

impl<T> Served<T> {
    pub fn into_inner(self) -> Option<T> {
        match self {
            Served::Cache(r) | Served::Network(r) => Some(r),
            Served::Fallback(r) => r,
        }
    }
}

/// Answer a request cache-first. `network` runs only on a cache miss and
/// `fallback` only when the network fails. Cache lookup errors propagate.
pub async fn cache_first<T, E, C, N, NF, F, FF>(
    cached: C,
    network: NF,
    fallback: FF,
) -> Result<Served<T>, E>
where
    C: Future<Output = Result<Option<T>, E>>,
    NF: FnOnce() -> N,
    N: Future<Output = Result<T, E>>,
    FF: FnOnce() -> F,
    F: Future<Output = Result<Option<T>, E>>,
{
    if let Some(hit) = cached.await? {
        return Ok(Served::Cache(hit));
    }
    match network().await {
        Ok(response) => Ok(Served::Network(response)),
        Err(_) => Ok(Served::Fallback(fallback().await?)),
    }
}
