//! Note Row Component
//!
//! One note: toggle, text (tap to edit) and a delete action revealed by
//! swiping the content left.

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use leptos_swipe::{
    content_style, is_open, make_on_content_click, make_on_mousedown, make_on_pointerdown,
    make_on_pointermove, make_on_pointerup, make_on_touchend, make_on_touchmove,
    make_on_touchstart,
};

use crate::components::InlineEditor;
use crate::context::AppContext;
use crate::render::RowView;

/// Keys that activate the toggle control
pub fn activates_toggle(key: &str) -> bool {
    key == "Enter" || key == " "
}

/// Presses on the revealed actions must not start a swipe, or pointer
/// capture steals the button's click.
fn on_actions(ev: &web_sys::Event) -> bool {
    ev.target()
        .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
        .and_then(|el| el.closest(".actions").ok().flatten())
        .is_some()
}

#[component]
pub fn NoteRow(
    row: RowView,
    /// Id of the row being edited, if any
    editing: Memo<Option<String>>,
    /// Pointer events available; otherwise touch and mouse drive the swipe
    pointer: bool,
) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let swipe = ctx.swipe;

    let id = row.id.clone();
    let open = is_open(swipe, id.clone());
    let row_class = move || if open() { "item open" } else { "item" };

    let on_pointerdown = make_on_pointerdown(swipe, id.clone());
    let on_pointermove = make_on_pointermove(swipe);
    let on_pointerup = make_on_pointerup(swipe);
    let on_pointercancel = on_pointerup.clone();
    let on_touchstart = make_on_touchstart(swipe, id.clone());
    let on_touchmove = make_on_touchmove(swipe);
    let on_touchend = make_on_touchend(swipe);
    let on_mousedown = make_on_mousedown(swipe, id.clone());

    let toggle_id = id.clone();
    let key_id = id.clone();
    let delete_id = id.clone();
    let edit_id = id.clone();
    let is_editing = {
        let id = id.clone();
        move || editing.get().as_deref() == Some(id.as_str())
    };

    let text_class = row.text_class();
    let editor_id = id.clone();
    let editor_text = row.text.clone();
    let text = row.text.clone();
    let text_display = move || {
        let edit_id = edit_id.clone();
        let text = text.clone();
        let shown = text.clone();
        view! {
            <div
                class=text_class
                on:click=move |ev| {
                    ev.stop_propagation();
                    ctx.begin_edit(&edit_id, &text);
                }
            >
                {shown}
            </div>
        }
    };

    view! {
        <div
            class=row_class
            data-id=id.clone()
            on:pointerdown=move |ev| if pointer && !on_actions(&ev) { on_pointerdown(ev) }
            on:pointermove=move |ev| if pointer { on_pointermove(ev) }
            on:pointerup=move |ev| if pointer { on_pointerup(ev) }
            on:pointercancel=move |ev| if pointer { on_pointercancel(ev) }
            on:touchstart=move |ev| if !pointer && !on_actions(&ev) { on_touchstart(ev) }
            on:touchmove=move |ev| if !pointer { on_touchmove(ev) }
            on:touchend=move |ev| if !pointer { on_touchend(ev) }
            on:mousedown=move |ev| if !pointer && !on_actions(&ev) { on_mousedown(ev) }
        >
            <div
                class="content-wrap"
                role="listitem"
                style=content_style(swipe, id.clone())
                on:click=make_on_content_click(swipe, id.clone())
            >
                <div
                    class=row.toggle_class()
                    role="button"
                    tabindex="0"
                    aria-checked=row.aria_checked()
                    on:click=move |_| ctx.toggle(&toggle_id)
                    on:keydown=move |ev: web_sys::KeyboardEvent| {
                        if activates_toggle(&ev.key()) {
                            ev.prevent_default();
                            ctx.toggle(&key_id);
                        }
                    }
                />
                <Show when=is_editing fallback=text_display>
                    <InlineEditor id=editor_id.clone() text=editor_text.clone() />
                </Show>
            </div>
            <div class="actions">
                <button
                    class="delete-btn"
                    type="button"
                    on:click=move |_| ctx.remove(&delete_id)
                >
                    "Delete"
                </button>
            </div>
        </div>
    }
}
