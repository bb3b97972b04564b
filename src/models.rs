//! Frontend Models
//!
//! Data structures shared by the UI and both stores.

use serde::{Deserialize, Serialize};

/// A single note.
///
/// Field names are the storage format: the fast-store snapshot and the
/// durable records both use them as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Opaque unique key, also the durable store's key path
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub done: bool,
    /// Creation time in epoch milliseconds; only used for ordering
    pub created: i64,
}

impl Item {
    /// Create a note with a fresh id, stamped with the current time
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_id(new_id(), text, chrono::Utc::now().timestamp_millis())
    }

    pub fn with_id(id: impl Into<String>, text: impl Into<String>, created: i64) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            done: false,
            created,
        }
    }
}

pub fn new_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_creation() {
        let item = Item::new("Buy milk");
        assert_eq!(item.text, "Buy milk");
        assert!(!item.done);
        assert_eq!(item.id.len(), 32);
        assert!(item.created > 0);
    }

    #[test]
    fn test_ids_are_unique() {
        let a = Item::new("a");
        let b = Item::new("b");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_decodes_legacy_record_without_done() {
        let item: Item =
            serde_json::from_str(r#"{"id":"k1","text":"hello","created":1700000000000}"#).unwrap();
        assert_eq!(item, Item::with_id("k1", "hello", 1_700_000_000_000));
    }
}
