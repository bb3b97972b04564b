//! Inline Editor Component
//!
//! Edit field that replaces a row's text while the row is being edited.
//! Escape cancels; every other way of leaving the field commits.

use leptos::html;
use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use crate::context::AppContext;
use crate::editor::{edit_key, EditKey};
use crate::reorder::next_frame;

/// Targets that do not count as tapping outside the edit field. A tap on
/// another row's text is left to that row, which commits this edit when it
/// opens its own.
const INSIDE_SELECTOR: &str = ".inline-edit, .text";

#[component]
pub fn InlineEditor(id: String, text: String) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let input_ref = NodeRef::<html::Input>::new();
    input_ref.on_load(|input| {
        // focus once the row is in the document
        next_frame(move || {
            let _ = input.focus();
            input.select();
        });
    });

    view! {
        <input
            type="text"
            class="inline-edit"
            node_ref=input_ref
            value=text
            on:input={
                let id = id.clone();
                move |ev| ctx.set_draft(&id, event_target_value(&ev))
            }
            on:blur=move |_| ctx.commit_edit_for(&id)
            on:keydown=move |ev: web_sys::KeyboardEvent| match edit_key(&ev.key()) {
                Some(EditKey::Commit) => {
                    ev.prevent_default();
                    ctx.commit_edit();
                }
                Some(EditKey::Cancel) => ctx.cancel_edit(),
                None => {}
            }
            on:click=|ev| ev.stop_propagation()
        />
    }
}

/// Commit the open edit on any press outside the field.
/// Bound once, in the capture phase, on the document.
pub fn bind_outside_commit(ctx: AppContext, event: &str) {
    let on_press = Closure::<dyn FnMut(web_sys::Event)>::new(move |ev: web_sys::Event| {
        if !ctx.is_editing_untracked() {
            return;
        }
        let inside = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
            .and_then(|el| el.closest(INSIDE_SELECTOR).ok().flatten())
            .is_some();
        if !inside {
            ctx.commit_edit();
        }
    });

    if let Some(doc) = web_sys::window().and_then(|win| win.document()) {
        let _ = doc.add_event_listener_with_callback_and_bool(event, on_press.as_ref().unchecked_ref(), true);
    }
    on_press.forget();
}
