//! List Projection
//!
//! Pure mapping from the note collection to the rows the list shows:
//! active notes by creation time, then done notes by creation time.

use crate::models::Item;

/// What one row displays
#[derive(Debug, Clone, PartialEq)]
pub struct RowView {
    pub id: String,
    pub text: String,
    pub done: bool,
}

impl RowView {
    fn from_item(item: &Item) -> Self {
        Self {
            id: item.id.clone(),
            text: item.text.clone(),
            done: item.done,
        }
    }

    pub fn aria_checked(&self) -> &'static str {
        if self.done { "true" } else { "false" }
    }

    pub fn toggle_class(&self) -> &'static str {
        if self.done { "radio checked" } else { "radio" }
    }

    pub fn text_class(&self) -> &'static str {
        if self.done { "text done" } else { "text" }
    }
}

/// The whole list, active group first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListView {
    pub active: Vec<RowView>,
    pub done: Vec<RowView>,
}

impl ListView {
    pub fn rows(&self) -> impl Iterator<Item = &RowView> {
        self.active.iter().chain(self.done.iter())
    }

    pub fn into_rows(self) -> Vec<RowView> {
        let mut rows = self.active;
        rows.extend(self.done);
        rows
    }

    pub fn ids(&self) -> Vec<&str> {
        self.rows().map(|row| row.id.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.active.len() + self.done.len()
    }
}

pub fn project(items: &[Item]) -> ListView {
    // stable sort: equal timestamps keep collection order
    let group = |done: bool| {
        let mut group: Vec<&Item> = items.iter().filter(|item| item.done == done).collect();
        group.sort_by_key(|item| item.created);
        group.into_iter().map(RowView::from_item).collect::<Vec<_>>()
    };
    ListView {
        active: group(false),
        done: group(true),
    }
}
