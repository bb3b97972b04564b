//! Reorder Animation
//!
//! FLIP for the note list: record each row's top before a mutation, let the
//! list re-render, then slide every row that moved from its old position to
//! its new one.

use std::collections::HashMap;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::config::ReorderConfig;

/// Row top offsets keyed by item id
pub type Positions = HashMap<String, f64>;

/// Rows that need animating, with the offset (old − new) they start from.
/// Rows without a recorded old position are left alone.
pub fn plan(previous: &Positions, current: &[(String, f64)], min_delta: f64) -> Vec<(String, f64)> {
    current
        .iter()
        .filter_map(|(id, top)| {
            let delta = previous.get(id)? - top;
            (delta.abs() > min_delta).then(|| (id.clone(), delta))
        })
        .collect()
}

fn rows(container: &web_sys::Element) -> Vec<(web_sys::HtmlElement, String, f64)> {
    let Ok(nodes) = container.query_selector_all(".item") else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<web_sys::HtmlElement>().ok())
        .filter_map(|el| {
            let id = el.get_attribute("data-id")?;
            let top = el.get_bounding_client_rect().top();
            Some((el, id, top))
        })
        .collect()
}

/// Snapshot row positions inside `container`
pub fn capture(container: &web_sys::Element) -> Positions {
    rows(container)
        .into_iter()
        .map(|(_, id, top)| (id, top))
        .collect()
}

pub(crate) fn next_frame(f: impl FnOnce() + 'static) {
    if let Some(win) = web_sys::window() {
        let cb = Closure::once_into_js(f);
        let _ = win.request_animation_frame(cb.unchecked_ref());
    }
}

fn set_style(el: &web_sys::HtmlElement, property: &str, value: &str) {
    let _ = el.style().set_property(property, value);
}

/// Animate rows from `previous` to wherever the next render puts them.
/// Call right after the mutation that reorders the list.
pub fn animate(container: web_sys::Element, previous: Positions, config: ReorderConfig) {
    next_frame(move || {
        let current = rows(&container);
        let positions: Vec<(String, f64)> = current
            .iter()
            .map(|(_, id, top)| (id.clone(), *top))
            .collect();
        let moves: HashMap<String, f64> = plan(&previous, &positions, config.min_delta)
            .into_iter()
            .collect();

        let moved: Vec<web_sys::HtmlElement> = current
            .into_iter()
            .filter_map(|(el, id, _)| {
                let delta = moves.get(&id)?;
                // invert: jump back to the old spot with no transition
                set_style(&el, "transition", "none");
                set_style(&el, "transform", &format!("translateY({}px)", delta));
                set_style(&el, "will-change", "transform");
                Some(el)
            })
            .collect();
        if moved.is_empty() {
            return;
        }

        next_frame(move || {
            let transition = format!("transform {}ms {}", config.duration_ms, config.easing);
            for el in moved {
                set_style(&el, "transition", &transition);
                set_style(&el, "transform", "translateY(0)");
                clear_on_transition_end(el);
            }
        });
    });
}

fn clear_on_transition_end(el: web_sys::HtmlElement) {
    let target = el.clone();
    let cleanup = Closure::once_into_js(move || {
        set_style(&target, "transition", "");
        set_style(&target, "transform", "");
        set_style(&target, "will-change", "");
    });
    let options = web_sys::AddEventListenerOptions::new();
    options.set_once(true);
    let _ = el.add_event_listener_with_callback_and_add_event_listener_options(
        "transitionend",
        cleanup.unchecked_ref(),
        &options,
    );
}
