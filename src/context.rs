//! Application Context
//!
//! Shared state provided via Leptos Context API, and the handlers every
//! mutation goes through: change the collection, write the fast store,
//! spawn the durable write, re-render.

use gloo_timers::future::TimeoutFuture;
use leptos::html;
use leptos::prelude::*;
use leptos::reactive::owner::LocalStorage;
use leptos::task::spawn_local;
use leptos_swipe::{create_swipe_signals, SwipeSignals};
use tracing::{debug, info};

use crate::config::{AppConfig, ReorderConfig};
use crate::editor::{Begin, EditSession};
use crate::models::Item;
use crate::notes::NoteError;
use crate::render::{project, ListView};
use crate::reorder::{self, next_frame};
use crate::state::StateManager;
use crate::storage::{IdbStore, LocalStorageStore};
use crate::store::*;

type Manager = StateManager<LocalStorageStore, IdbStore>;

/// Input shake: (offset px, hold ms)
const NUDGE_STEPS: &[(i32, u32)] = &[(-6, 150), (6, 150), (0, 0)];

/// App-wide state provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// The note collection and its stores (thread-local: browser handles)
    state: RwSignal<Manager, LocalStorage>,
    /// View-only session state
    pub ui: UiStore,
    /// Swipe-to-reveal state for every row
    pub swipe: SwipeSignals<String>,
    /// The list container, measured by the reorder animation
    pub list_ref: NodeRef<html::Div>,
    /// The add-note input
    pub input_ref: NodeRef<html::Textarea>,
    reorder: ReorderConfig,
}

impl AppContext {
    pub fn new(config: &AppConfig) -> Self {
        let manager = StateManager::new(
            LocalStorageStore::new(config.fast_store_key),
            IdbStore::new(config.db_name, config.db_version, config.db_store),
        );
        Self {
            state: RwSignal::new_local(manager),
            ui: UiStore::new(UiState::default()),
            swipe: create_swipe_signals(config.swipe),
            list_ref: NodeRef::new(),
            input_ref: NodeRef::new(),
            reorder: config.reorder,
        }
    }

    /// Load saved notes, then mark the UI ready and focus the input
    pub fn load(&self) {
        let ctx = *self;
        let pending = self.state.with_untracked(|state| state.load());
        spawn_local(async move {
            let items = pending.await;
            info!("[APP] Loaded {} notes", items.len());
            if let Some(backfill) = ctx.state.try_update(|state| state.adopt(items)) {
                backfill.spawn();
            }
            store_set_ready(&ctx.ui);
            next_frame(move || ctx.focus_input());
        });
    }

    /// Current rows in display order (tracked)
    pub fn list_view(&self) -> ListView {
        self.state.with(|state| project(state.items()))
    }

    pub fn count(&self) -> usize {
        self.state.with(|state| state.items().len())
    }

    pub fn items_snapshot(&self) -> Vec<Item> {
        self.state.with_untracked(|state| state.items().to_vec())
    }

    pub fn ready(&self) -> bool {
        store_ready(&self.ui)
    }

    pub fn focus_input(&self) {
        if let Some(input) = self.input_ref.get_untracked() {
            let _ = input.focus();
        }
    }

    // ========================
    // Mutations
    // ========================

    /// Add a note. Returns false, and shakes the input, for empty text.
    pub fn add(&self, text: &str) -> bool {
        match self.state.try_update(|state| state.add(text)) {
            Some(Ok(write)) => {
                write.spawn();
                true
            }
            Some(Err(NoteError::EmptyText)) => {
                self.nudge_input();
                false
            }
            Some(Err(NoteError::Loading)) => {
                debug!("[APP] Add ignored while loading");
                false
            }
            _ => false,
        }
    }

    /// Flip done, animating rows to their new places
    pub fn toggle(&self, id: &str) {
        let container = self.list_ref.get_untracked().map(web_sys::Element::from);
        let before = container.as_ref().map(reorder::capture).unwrap_or_default();

        if let Some(Ok(write)) = self.state.try_update(|state| state.toggle(id)) {
            write.spawn();
            if let Some(container) = container {
                reorder::animate(container, before, self.reorder);
            }
        }
    }

    pub fn remove(&self, id: &str) {
        if let Some(Ok(write)) = self.state.try_update(|state| state.remove(id)) {
            write.spawn();
        }
        let key = id.to_string();
        self.swipe.board.update(|board| board.forget(&key));
    }

    pub fn clear_all(&self) {
        if let Some(Ok(write)) = self.state.try_update(|state| state.clear_all()) {
            write.spawn();
        }
        store_cancel_edit(&self.ui);
        self.swipe.board.update(|board| board.close_all());
    }

    // ========================
    // Inline Editing
    // ========================

    /// Start editing a row, committing any other open edit first
    pub fn begin_edit(&self, id: &str, text: &str) {
        if let Begin::Opened { previous: Some(previous) } = store_begin_edit(&self.ui, id, text) {
            self.commit_session(previous);
        }
    }

    pub fn set_draft(&self, id: &str, draft: String) {
        store_set_draft(&self.ui, id, draft);
    }

    /// Commit the open edit, if any
    pub fn commit_edit(&self) {
        if let Some(session) = store_finish_edit(&self.ui) {
            self.commit_session(session);
        }
    }

    /// Commit the edit on `id` when its field loses focus
    pub fn commit_edit_for(&self, id: &str) {
        if let Some(session) = store_finish_edit_for(&self.ui, id) {
            self.commit_session(session);
        }
    }

    pub fn cancel_edit(&self) {
        if store_cancel_edit(&self.ui) {
            debug!("[APP] Edit cancelled");
        }
    }

    pub fn editing_id(&self) -> Option<String> {
        store_editing_id(&self.ui)
    }

    pub fn is_editing_untracked(&self) -> bool {
        store_is_editing_untracked(&self.ui)
    }

    fn commit_session(&self, session: EditSession) {
        // empty drafts are rejected by the manager and keep the old text
        if let Some(Ok(write)) = self
            .state
            .try_update(|state| state.edit_commit(&session.id, &session.draft))
        {
            write.spawn();
        }
    }

    // ========================
    // Input Feedback
    // ========================

    pub fn nudge(&self) -> i32 {
        store_nudge(&self.ui)
    }

    fn nudge_input(&self) {
        let ui = self.ui;
        spawn_local(async move {
            for (offset, hold_ms) in NUDGE_STEPS {
                store_set_nudge(&ui, *offset);
                if *hold_ms > 0 {
                    TimeoutFuture::new(*hold_ms).await;
                }
            }
        });
    }
}
