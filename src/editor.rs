//! Inline Edit Session
//!
//! At most one row is editable at a time. The session lives in a single
//! `Option<EditSession>` slot; these helpers are the only way it changes.

/// The row being edited and its unsaved text
#[derive(Debug, Clone, PartialEq)]
pub struct EditSession {
    pub id: String,
    pub draft: String,
}

/// Outcome of asking to edit a row
#[derive(Debug, Clone, PartialEq)]
pub enum Begin {
    /// This row is already being edited
    AlreadyEditing,
    /// A session was opened; `previous` must be committed by the caller
    Opened { previous: Option<EditSession> },
}

/// Keys the edit field reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKey {
    Commit,
    Cancel,
}

pub fn edit_key(key: &str) -> Option<EditKey> {
    match key {
        "Enter" => Some(EditKey::Commit),
        "Escape" => Some(EditKey::Cancel),
        _ => None,
    }
}

/// Open a session on `id`, pre-filled with its current text
pub fn begin(slot: &mut Option<EditSession>, id: &str, text: &str) -> Begin {
    if slot.as_ref().is_some_and(|s| s.id == id) {
        return Begin::AlreadyEditing;
    }
    let previous = slot.replace(EditSession {
        id: id.to_string(),
        draft: text.to_string(),
    });
    Begin::Opened { previous }
}

/// Record typing into the field. Ignored if `id` is not the open session.
pub fn set_draft(slot: &mut Option<EditSession>, id: &str, draft: String) -> bool {
    match slot {
        Some(session) if session.id == id => {
            session.draft = draft;
            true
        }
        _ => false,
    }
}

/// Close the session and return it for committing
pub fn finish(slot: &mut Option<EditSession>) -> Option<EditSession> {
    slot.take()
}

/// Close the session only if it belongs to `id`. A field losing focus
/// after another row took over the slot must not close that row's session.
pub fn finish_for(slot: &mut Option<EditSession>, id: &str) -> Option<EditSession> {
    if is_editing(slot, id) {
        slot.take()
    } else {
        None
    }
}

/// Close the session, discarding the draft
pub fn cancel(slot: &mut Option<EditSession>) -> bool {
    slot.take().is_some()
}

pub fn is_editing(slot: &Option<EditSession>, id: &str) -> bool {
    slot.as_ref().is_some_and(|s| s.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_opens_with_current_text() {
        let mut slot = None;
        assert_eq!(begin(&mut slot, "a", "Alpha"), Begin::Opened { previous: None });
        assert!(is_editing(&slot, "a"));
        assert_eq!(slot.as_ref().unwrap().draft, "Alpha");
    }

    #[test]
    fn test_begin_same_row_is_noop() {
        let mut slot = None;
        begin(&mut slot, "a", "Alpha");
        set_draft(&mut slot, "a", "Alp".to_string());
        assert_eq!(begin(&mut slot, "a", "Alpha"), Begin::AlreadyEditing);
        assert_eq!(slot.as_ref().unwrap().draft, "Alp");
    }

    #[test]
    fn test_begin_other_row_hands_back_previous() {
        let mut slot = None;
        begin(&mut slot, "a", "Alpha");
        set_draft(&mut slot, "a", "Alpha!".to_string());

        let outcome = begin(&mut slot, "b", "Beta");
        assert_eq!(
            outcome,
            Begin::Opened {
                previous: Some(EditSession {
                    id: "a".to_string(),
                    draft: "Alpha!".to_string()
                })
            }
        );
        assert!(is_editing(&slot, "b"));
        assert!(!is_editing(&slot, "a"));
    }

    #[test]
    fn test_draft_for_other_row_ignored() {
        let mut slot = None;
        begin(&mut slot, "a", "Alpha");
        assert!(!set_draft(&mut slot, "b", "x".to_string()));
        assert_eq!(slot.as_ref().unwrap().draft, "Alpha");
    }

    #[test]
    fn test_finish_and_cancel_clear_slot() {
        let mut slot = None;
        begin(&mut slot, "a", "Alpha");
        assert_eq!(finish(&mut slot).map(|s| s.id), Some("a".to_string()));
        assert!(slot.is_none());
        assert_eq!(finish(&mut slot), None);

        begin(&mut slot, "a", "Alpha");
        assert!(cancel(&mut slot));
        assert!(!cancel(&mut slot));
    }

    #[test]
    fn test_finish_for_ignores_stale_row() {
        let mut slot = None;
        begin(&mut slot, "a", "Alpha");
        begin(&mut slot, "b", "Beta");

        assert_eq!(finish_for(&mut slot, "a"), None);
        assert!(is_editing(&slot, "b"));
        assert_eq!(finish_for(&mut slot, "b").map(|s| s.draft), Some("Beta".to_string()));
        assert!(slot.is_none());
    }

    #[test]
    fn test_edit_keys() {
        assert_eq!(edit_key("Enter"), Some(EditKey::Commit));
        assert_eq!(edit_key("Escape"), Some(EditKey::Cancel));
        assert_eq!(edit_key("a"), None);
    }
}
