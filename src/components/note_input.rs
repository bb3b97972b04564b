//! Note Input Component
//!
//! Text box and store button for adding notes.

use leptos::prelude::*;

use crate::context::AppContext;

/// Enter submits; Shift+Enter is left to the textarea
pub fn submits_note(key: &str, shift: bool) -> bool {
    key == "Enter" && !shift
}

#[component]
pub fn NoteInput() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let (new_text, set_new_text) = signal(String::new());

    let store_note = move || {
        if ctx.add(&new_text.get_untracked()) {
            set_new_text.set(String::new());
            ctx.focus_input();
        }
    };

    view! {
        <div class="composer">
            <textarea
                id="note"
                class="note-input"
                rows="1"
                placeholder="Write a note..."
                node_ref=ctx.input_ref
                prop:disabled=move || !ctx.ready()
                style=move || format!("transition: transform 150ms; transform: translateX({}px);", ctx.nudge())
                prop:value=move || new_text.get()
                on:input=move |ev| set_new_text.set(event_target_value(&ev))
                on:keydown=move |ev: web_sys::KeyboardEvent| {
                    if submits_note(&ev.key(), ev.shift_key()) {
                        ev.prevent_default();
                        store_note();
                    }
                }
            />
            <button
                id="store"
                class="store-btn"
                type="button"
                prop:disabled=move || !ctx.ready()
                on:click=move |_| store_note()
            >
                "Store"
            </button>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enter_submits_without_shift() {
        assert!(submits_note("Enter", false));
        assert!(!submits_note("Enter", true));
        assert!(!submits_note("a", false));
    }
}
