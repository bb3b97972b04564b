//! Leptos Swipe Utilities
//!
//! Swipe-to-reveal for Leptos list rows. Pointer events drive the gesture
//! when the browser has them; otherwise touch events on the row and mouse
//! events on the window feed the same state machine.

mod machine;

pub use machine::{RowState, SwipeBoard, SwipeConfig};

use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Transition used whenever a row snaps (open, closed, or closed by another row)
const SNAP_TRANSITION: &str = "transform 160ms ease";

/// Swipe state signals shared by every row of a list
pub struct SwipeSignals<K: Send + Sync + 'static> {
    pub board: RwSignal<SwipeBoard<K>>,
}

impl<K: Send + Sync + 'static> Clone for SwipeSignals<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K: Send + Sync + 'static> Copy for SwipeSignals<K> {}

pub fn create_swipe_signals<K>(config: SwipeConfig) -> SwipeSignals<K>
where
    K: Clone + PartialEq + Send + Sync + 'static,
{
    SwipeSignals {
        board: RwSignal::new(SwipeBoard::new(config)),
    }
}

/// Whether the browser exposes the unified `PointerEvent` API
pub fn supports_pointer_events() -> bool {
    web_sys::window()
        .and_then(|win| js_sys::Reflect::has(&win, &"PointerEvent".into()).ok())
        .unwrap_or(false)
}

/// Inline style for a row's sliding content
pub fn content_style<K>(swipe: SwipeSignals<K>, key: K) -> impl Fn() -> String + Clone + 'static
where
    K: Clone + PartialEq + Send + Sync + 'static,
{
    move || {
        swipe.board.with(|board| {
            let transition = if board.state(&key) == RowState::Dragging {
                "none"
            } else {
                SNAP_TRANSITION
            };
            format!(
                "transform: translateX({}px); transition: {};",
                board.offset(&key),
                transition
            )
        })
    }
}

/// Reactive open flag for a row
pub fn is_open<K>(swipe: SwipeSignals<K>, key: K) -> impl Fn() -> bool + Clone + 'static
where
    K: Clone + PartialEq + Send + Sync + 'static,
{
    move || swipe.board.with(|board| board.state(&key) == RowState::Open)
}

// ========================
// Pointer Events
// ========================

/// Press handler for a row. Takes pointer capture so the row keeps
/// receiving moves after the pointer leaves it.
pub fn make_on_pointerdown<K>(swipe: SwipeSignals<K>, key: K) -> impl Fn(web_sys::PointerEvent) + Clone + 'static
where
    K: Clone + PartialEq + Send + Sync + 'static,
{
    move |ev: web_sys::PointerEvent| {
        // Only the primary mouse button starts a swipe
        if ev.pointer_type() == "mouse" && ev.button() != 0 {
            return;
        }
        let pointer = ev.pointer_id();
        swipe
            .board
            .update(|board| board.press(key.clone(), Some(pointer), ev.client_x() as f64));
        if let Some(el) = ev.current_target().and_then(|t| t.dyn_into::<web_sys::Element>().ok()) {
            let _ = el.set_pointer_capture(pointer);
        }
    }
}

pub fn make_on_pointermove<K>(swipe: SwipeSignals<K>) -> impl Fn(web_sys::PointerEvent) + Clone + 'static
where
    K: Clone + PartialEq + Send + Sync + 'static,
{
    move |ev: web_sys::PointerEvent| {
        let dragging = swipe.board.with_untracked(|board| board.dragging_key().is_some());
        if !dragging {
            return;
        }
        let pointer = ev.pointer_id();
        swipe
            .board
            .update(|board| {
                board.drag(Some(pointer), ev.client_x() as f64);
            });
    }
}

/// Release handler, also used for `pointercancel`
pub fn make_on_pointerup<K>(swipe: SwipeSignals<K>) -> impl Fn(web_sys::PointerEvent) + Clone + 'static
where
    K: Clone + PartialEq + Send + Sync + 'static,
{
    move |ev: web_sys::PointerEvent| {
        let dragging = swipe.board.with_untracked(|board| board.dragging_key().is_some());
        if !dragging {
            return;
        }
        let pointer = ev.pointer_id();
        swipe.board.update(|board| {
            board.release(Some(pointer));
        });
        if let Some(el) = ev.current_target().and_then(|t| t.dyn_into::<web_sys::Element>().ok()) {
            let _ = el.release_pointer_capture(pointer);
        }
    }
}

/// Click on a row's content: closes the row when it is open
pub fn make_on_content_click<K>(swipe: SwipeSignals<K>, key: K) -> impl Fn(web_sys::MouseEvent) + Clone + 'static
where
    K: Clone + PartialEq + Send + Sync + 'static,
{
    move |_ev: web_sys::MouseEvent| {
        let open = swipe.board.with_untracked(|board| board.state(&key) == RowState::Open);
        if open {
            swipe.board.update(|board| {
                board.tap(&key);
            });
        }
    }
}

// ========================
// Touch / Mouse Fallback
// ========================

fn first_touch_x(ev: &web_sys::TouchEvent) -> Option<f64> {
    ev.touches().get(0).map(|touch| touch.client_x() as f64)
}

pub fn make_on_touchstart<K>(swipe: SwipeSignals<K>, key: K) -> impl Fn(web_sys::TouchEvent) + Clone + 'static
where
    K: Clone + PartialEq + Send + Sync + 'static,
{
    move |ev: web_sys::TouchEvent| {
        if let Some(x) = first_touch_x(&ev) {
            swipe.board.update(|board| board.press(key.clone(), None, x));
        }
    }
}

pub fn make_on_touchmove<K>(swipe: SwipeSignals<K>) -> impl Fn(web_sys::TouchEvent) + Clone + 'static
where
    K: Clone + PartialEq + Send + Sync + 'static,
{
    move |ev: web_sys::TouchEvent| {
        if let Some(x) = first_touch_x(&ev) {
            swipe.board.update(|board| {
                board.drag(None, x);
            });
        }
    }
}

pub fn make_on_touchend<K>(swipe: SwipeSignals<K>) -> impl Fn(web_sys::TouchEvent) + Clone + 'static
where
    K: Clone + PartialEq + Send + Sync + 'static,
{
    move |_ev: web_sys::TouchEvent| {
        swipe.board.update(|board| {
            board.release(None);
        });
    }
}

pub fn make_on_mousedown<K>(swipe: SwipeSignals<K>, key: K) -> impl Fn(web_sys::MouseEvent) + Clone + 'static
where
    K: Clone + PartialEq + Send + Sync + 'static,
{
    move |ev: web_sys::MouseEvent| {
        if ev.button() == 0 {
            swipe
                .board
                .update(|board| board.press(key.clone(), None, ev.client_x() as f64));
        }
    }
}

/// Bind window-level mousemove/mouseup for the mouse fallback.
/// Call once per list, only when pointer events are unavailable.
pub fn bind_global_mouse_fallback<K>(swipe: SwipeSignals<K>)
where
    K: Clone + PartialEq + Send + Sync + 'static,
{
    use wasm_bindgen::closure::Closure;

    let on_mousemove = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
        let dragging = swipe.board.with_untracked(|board| board.dragging_key().is_some());
        if dragging {
            swipe.board.update(|board| {
                board.drag(None, ev.client_x() as f64);
            });
        }
    });

    let on_mouseup = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |_ev: web_sys::MouseEvent| {
        let dragging = swipe.board.with_untracked(|board| board.dragging_key().is_some());
        if dragging {
            swipe.board.update(|board| {
                board.release(None);
            });
        }
    });

    if let Some(win) = web_sys::window() {
        let _ = win.add_event_listener_with_callback("mousemove", on_mousemove.as_ref().unchecked_ref());
        let _ = win.add_event_listener_with_callback("mouseup", on_mouseup.as_ref().unchecked_ref());
    }
    on_mousemove.forget();
    on_mouseup.forget();
}
