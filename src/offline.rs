//! Service Worker Registration

use leptos::task::spawn_local;
use tracing::debug;
use wasm_bindgen_futures::JsFuture;

/// Register the offline shell worker, if the browser supports it.
/// Failures are only logged.
pub fn register(script: &'static str) {
    let Some(win) = web_sys::window() else {
        return;
    };
    let navigator = win.navigator();
    let supported = js_sys::Reflect::has(&navigator, &"serviceWorker".into()).unwrap_or(false);
    if !supported {
        debug!("[SW] Service workers unavailable");
        return;
    }

    let pending = navigator.service_worker().register(script);
    spawn_local(async move {
        match JsFuture::from(pending).await {
            Ok(_) => debug!("[SW] Registered {}", script),
            Err(e) => debug!("[SW] Registration failed: {:?}", e),
        }
    });
}
