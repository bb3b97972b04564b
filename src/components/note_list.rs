//! Note List Component
//!
//! Renders active notes first, then done notes, each group oldest first.

use leptos::prelude::*;
use leptos_swipe::{bind_global_mouse_fallback, supports_pointer_events};

use crate::components::inline_editor::bind_outside_commit;
use crate::components::NoteRow;
use crate::context::AppContext;

#[component]
pub fn NoteList() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let pointer = supports_pointer_events();
    if pointer {
        bind_outside_commit(ctx, "pointerdown");
    } else {
        bind_global_mouse_fallback(ctx.swipe);
        bind_outside_commit(ctx, "mousedown");
    }

    // Draft keystrokes rewrite the edit session; only the id matters here
    let editing = Memo::new(move |_| ctx.editing_id());

    let rows = move || ctx.list_view().into_rows();

    view! {
        <div id="items" class="items" role="list" node_ref=ctx.list_ref>
            <For
                each=rows
                // text and done are in the key so an edit or toggle re-renders the row
                key=|row| (row.id.clone(), row.text.clone(), row.done)
                children=move |row| {
                    view! { <NoteRow row=row editing=editing pointer=pointer /> }
                }
            />
        </div>
    }
}
