//! Note Collection
//!
//! The in-memory item list and the mutations the UI can apply to it.
//! Callers treat every error here as "nothing changed".

use crate::models::Item;

/// Why a mutation was rejected
#[derive(Debug, Clone, PartialEq)]
pub enum NoteError {
    /// Text was empty after trimming
    EmptyText,
    /// No item with this id
    NotFound(String),
    /// An item with this id already exists
    DuplicateId(String),
    /// Saved notes have not finished loading
    Loading,
}

impl std::fmt::Display for NoteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NoteError::EmptyText => write!(f, "Empty text"),
            NoteError::NotFound(id) => write!(f, "Not found: {}", id),
            NoteError::DuplicateId(id) => write!(f, "Duplicate id: {}", id),
            NoteError::Loading => write!(f, "Still loading"),
        }
    }
}

impl std::error::Error for NoteError {}

pub type NoteResult<T> = Result<T, NoteError>;

/// Items in insertion order. Display order is derived, never stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Notes {
    items: Vec<Item>,
}

impl Notes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: Vec<Item>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Create a note from user input
    pub fn add(&mut self, text: &str) -> NoteResult<&Item> {
        let text = text.trim();
        if text.is_empty() {
            return Err(NoteError::EmptyText);
        }
        self.insert(Item::new(text))
    }

    /// Append a prepared item, trimming its text
    pub fn insert(&mut self, mut item: Item) -> NoteResult<&Item> {
        let text = item.text.trim().to_string();
        if text.is_empty() {
            return Err(NoteError::EmptyText);
        }
        if self.get(&item.id).is_some() {
            return Err(NoteError::DuplicateId(item.id));
        }
        item.text = text;
        self.items.push(item);
        Ok(&self.items[self.items.len() - 1])
    }

    /// Flip `done`, returning the new value
    pub fn toggle(&mut self, id: &str) -> NoteResult<bool> {
        let item = self.find_mut(id)?;
        item.done = !item.done;
        Ok(item.done)
    }

    pub fn remove(&mut self, id: &str) -> NoteResult<Item> {
        let idx = self
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or_else(|| NoteError::NotFound(id.to_string()))?;
        Ok(self.items.remove(idx))
    }

    /// Replace an item's text. Empty text leaves the item untouched.
    pub fn edit(&mut self, id: &str, text: &str) -> NoteResult<()> {
        let text = text.trim();
        if text.is_empty() {
            return Err(NoteError::EmptyText);
        }
        self.find_mut(id)?.text = text.to_string();
        Ok(())
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    fn find_mut(&mut self, id: &str) -> NoteResult<&mut Item> {
        self.items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| NoteError::NotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notes_ab() -> Notes {
        Notes::from_items(vec![
            Item::with_id("a", "Alpha", 1),
            Item::with_id("b", "Beta", 2),
        ])
    }

    #[test]
    fn test_add_in_order() {
        let mut notes = Notes::new();
        notes.add("Buy milk").unwrap();
        notes.add("  Call Sam ").unwrap();

        let texts: Vec<_> = notes.items().iter().map(|i| i.text.as_str()).collect();
        assert_eq!(texts, vec!["Buy milk", "Call Sam"]);
        assert!(notes.items().iter().all(|i| !i.done));
    }

    #[test]
    fn test_add_whitespace_rejected() {
        let mut notes = notes_ab();
        let before = notes.clone();
        assert_eq!(notes.add("   \t\n").unwrap_err(), NoteError::EmptyText);
        assert_eq!(notes, before);
    }

    #[test]
    fn test_insert_duplicate_rejected() {
        let mut notes = notes_ab();
        let err = notes.insert(Item::with_id("a", "again", 3)).unwrap_err();
        assert_eq!(err, NoteError::DuplicateId("a".to_string()));
        assert_eq!(notes.len(), 2);
    }

    #[test]
    fn test_toggle_flips_done() {
        let mut notes = notes_ab();
        assert_eq!(notes.toggle("a"), Ok(true));
        assert!(notes.get("a").unwrap().done);
        assert_eq!(notes.toggle("a"), Ok(false));
        assert!(!notes.get("a").unwrap().done);
    }

    #[test]
    fn test_missing_id_is_noop() {
        let mut notes = notes_ab();
        let before = notes.clone();
        assert!(notes.toggle("zz").is_err());
        assert!(notes.remove("zz").is_err());
        assert!(notes.edit("zz", "text").is_err());
        assert_eq!(notes, before);
    }

    #[test]
    fn test_remove() {
        let mut notes = notes_ab();
        let removed = notes.remove("a").unwrap();
        assert_eq!(removed.text, "Alpha");
        assert_eq!(notes.len(), 1);
        assert!(notes.get("a").is_none());
    }

    #[test]
    fn test_edit_trims_and_ignores_empty() {
        let mut notes = notes_ab();
        notes.edit("a", "  Gamma ").unwrap();
        assert_eq!(notes.get("a").unwrap().text, "Gamma");

        assert_eq!(notes.edit("a", "   "), Err(NoteError::EmptyText));
        assert_eq!(notes.get("a").unwrap().text, "Gamma");
    }
}
