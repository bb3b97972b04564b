//! Quix App
//!
//! Root component: note input above the list.

use leptos::prelude::*;

use crate::components::{NoteInput, NoteList};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::{debug, offline};

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    let ctx = AppContext::new(&config);
    provide_context(ctx);

    ctx.load();
    debug::install(ctx);
    offline::register(config.service_worker);

    let count_label = move || match ctx.count() {
        1 => "1 note".to_string(),
        n => format!("{} notes", n),
    };

    view! {
        <main class="app">
            <header class="app-header">
                <h1>"Quix"</h1>
                <span class="count">{count_label}</span>
            </header>
            <NoteInput />
            <Show when=move || ctx.ready() fallback=|| view! { <div class="items loading"></div> }>
                <NoteList />
            </Show>
        </main>
    }
}
