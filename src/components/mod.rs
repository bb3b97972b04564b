//! UI Components
//!
//! Leptos components for the note list.

mod note_input;
mod note_list;
mod note_row;
pub(crate) mod inline_editor;

pub use note_input::NoteInput;
pub use note_list::NoteList;
pub use note_row::NoteRow;
pub use inline_editor::InlineEditor;
