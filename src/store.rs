//! UI State Store
//!
//! Uses Leptos reactive_stores for the view-only session state. The note
//! collection itself lives in `AppContext`.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::editor::{self, Begin, EditSession};

/// Session state that never reaches storage
#[derive(Clone, Debug, Default, Store)]
pub struct UiState {
    /// The single inline edit session, if a row is being edited
    pub editing: Option<EditSession>,
    /// Horizontal offset of the note input while it shakes
    pub nudge: i32,
    /// Set once the saved notes have loaded
    pub ready: bool,
}

/// Type alias for the store
pub type UiStore = Store<UiState>;

// ========================
// Store Helper Functions
// ========================

pub fn store_begin_edit(store: &UiStore, id: &str, text: &str) -> Begin {
    editor::begin(&mut store.editing().write(), id, text)
}

pub fn store_set_draft(store: &UiStore, id: &str, draft: String) {
    editor::set_draft(&mut store.editing().write(), id, draft);
}

/// Close the edit session, returning it for commit
pub fn store_finish_edit(store: &UiStore) -> Option<EditSession> {
    editor::finish(&mut store.editing().write())
}

/// Close the edit session if it belongs to `id`
pub fn store_finish_edit_for(store: &UiStore, id: &str) -> Option<EditSession> {
    editor::finish_for(&mut store.editing().write(), id)
}

pub fn store_cancel_edit(store: &UiStore) -> bool {
    editor::cancel(&mut store.editing().write())
}

/// Id of the row being edited (tracked)
pub fn store_editing_id(store: &UiStore) -> Option<String> {
    store.editing().read().as_ref().map(|session| session.id.clone())
}

pub fn store_is_editing_untracked(store: &UiStore) -> bool {
    store.editing().read_untracked().is_some()
}

pub fn store_nudge(store: &UiStore) -> i32 {
    store.nudge().get()
}

pub fn store_set_nudge(store: &UiStore, offset: i32) {
    store.nudge().set(offset);
}

pub fn store_ready(store: &UiStore) -> bool {
    store.ready().get()
}

pub fn store_set_ready(store: &UiStore) {
    store.ready().set(true);
}
