//! Console Hooks
//!
//! `window.__quix` for poking at the app from devtools:
//! `getItems()`, `clearAll()` and `logs()`.

use js_sys::{Array, Object, Reflect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use tracing::{debug, warn};

use crate::context::AppContext;

const GLOBAL_NAME: &str = "__quix";

fn set_fn(target: &Object, name: &str, f: Closure<dyn Fn() -> JsValue>) -> Result<(), JsValue> {
    Reflect::set(target, &name.into(), f.as_ref().unchecked_ref())?;
    f.forget();
    Ok(())
}

fn build(ctx: AppContext) -> Result<Object, JsValue> {
    let hooks = Object::new();

    set_fn(
        &hooks,
        "getItems",
        Closure::new(move || {
            serde_wasm_bindgen::to_value(&ctx.items_snapshot()).unwrap_or(JsValue::NULL)
        }),
    )?;

    set_fn(
        &hooks,
        "clearAll",
        Closure::new(move || {
            ctx.clear_all();
            JsValue::UNDEFINED
        }),
    )?;

    set_fn(
        &hooks,
        "logs",
        Closure::new(|| {
            console_logger::recent_lines()
                .into_iter()
                .map(JsValue::from)
                .collect::<Array>()
                .into()
        }),
    )?;

    Ok(hooks)
}

/// Expose the hooks on `window`
pub fn install(ctx: AppContext) {
    let Some(win) = web_sys::window() else {
        return;
    };
    match build(ctx).and_then(|hooks| Reflect::set(&win, &GLOBAL_NAME.into(), &hooks)) {
        Ok(_) => debug!("[APP] window.{} installed", GLOBAL_NAME),
        Err(e) => warn!("[APP] Could not install window.{}: {:?}", GLOBAL_NAME, e),
    }
}
