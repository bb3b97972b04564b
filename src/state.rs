//! State Manager
//!
//! Owns the note collection and writes it through to both stores on every
//! mutation. The fast store is written before a mutation returns; the
//! durable write comes back as a [`DurableWrite`] task for the caller to
//! spawn. Durable failures are logged and dropped, so the durable store may
//! miss the last write if the page dies first.

use std::future::Future;
use std::rc::Rc;

use futures::future::{FutureExt, LocalBoxFuture};
use tracing::{debug, info, warn};

use crate::models::Item;
use crate::notes::{NoteError, NoteResult, Notes};
use crate::storage::{DurableStore, FastStore};

/// Best-effort durable write of one collection snapshot
#[must_use = "spawn or run the write, or the durable store never sees it"]
pub struct DurableWrite {
    task: LocalBoxFuture<'static, ()>,
}

impl DurableWrite {
    fn new(task: impl Future<Output = ()> + 'static) -> Self {
        Self { task: task.boxed_local() }
    }

    /// Fire and forget on the UI thread
    pub fn spawn(self) {
        leptos::task::spawn_local(self.task);
    }

    pub async fn run(self) {
        self.task.await
    }
}

pub struct StateManager<F, D> {
    notes: Notes,
    fast: F,
    durable: Rc<D>,
    /// Set by `adopt`; mutations are refused until then so a pending load
    /// cannot be overwritten or wiped from the durable store.
    loaded: bool,
}

impl<F, D> StateManager<F, D>
where
    F: FastStore,
    D: DurableStore + 'static,
{
    pub fn new(fast: F, durable: D) -> Self {
        Self {
            notes: Notes::new(),
            fast,
            durable: Rc::new(durable),
            loaded: false,
        }
    }

    pub fn notes(&self) -> &Notes {
        &self.notes
    }

    pub fn items(&self) -> &[Item] {
        self.notes.items()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Read the saved collection: the fast snapshot if there is one,
    /// otherwise every durable record sorted by creation time. Any failure
    /// yields an empty list. The fast store is read before this returns.
    pub fn load(&self) -> impl Future<Output = Vec<Item>> + 'static {
        let snapshot = self.fast.get();
        let durable = Rc::clone(&self.durable);
        async move {
            match snapshot {
                Ok(Some(items)) => {
                    debug!("[STATE] Loaded {} items from fast store", items.len());
                    items
                }
                Ok(None) => match durable.get_all().await {
                    Ok(mut items) => {
                        items.sort_by_key(|item| item.created);
                        debug!("[STATE] Loaded {} items from durable store", items.len());
                        items
                    }
                    Err(err) => {
                        warn!("[STATE] Durable load failed, starting empty: {}", err);
                        Vec::new()
                    }
                },
                Err(err) => {
                    warn!("[STATE] Fast store unreadable, starting empty: {}", err);
                    Vec::new()
                }
            }
        }
    }

    /// Install a loaded collection and unlock mutations. The returned write
    /// upserts the loaded items so the durable store catches up with a
    /// fast snapshot it never saw.
    pub fn adopt(&mut self, items: Vec<Item>) -> DurableWrite {
        self.notes = Notes::from_items(items);
        self.loaded = true;
        if self.notes.is_empty() {
            return DurableWrite::new(async {});
        }
        let durable = Rc::clone(&self.durable);
        let items = self.notes.items().to_vec();
        DurableWrite::new(async move {
            if let Err(err) = durable.put_many(&items).await {
                warn!("[STATE] Durable backfill failed: {}", err);
            }
        })
    }

    fn ensure_loaded(&self) -> NoteResult<()> {
        if self.loaded {
            Ok(())
        } else {
            Err(NoteError::Loading)
        }
    }

    fn write_fast(&self) {
        if let Err(err) = self.fast.set(self.notes.items()) {
            warn!("[STATE] Fast store write failed: {}", err);
        }
    }

    /// Write the fast snapshot now and hand back a durable write that
    /// replaces every record (needed whenever items disappear)
    pub fn save(&self) -> DurableWrite {
        self.write_fast();
        let durable = Rc::clone(&self.durable);
        let items = self.notes.items().to_vec();
        DurableWrite::new(async move {
            if let Err(err) = durable.replace_all(&items).await {
                warn!("[STATE] Durable write failed: {}", err);
            }
        })
    }

    /// Write the fast snapshot now and hand back a durable upsert of one item
    fn save_one(&self, id: &str) -> DurableWrite {
        self.write_fast();
        let durable = Rc::clone(&self.durable);
        let item = self.notes.get(id).cloned();
        DurableWrite::new(async move {
            let Some(item) = item else { return };
            if let Err(err) = durable.put_one(&item).await {
                warn!("[STATE] Durable write failed for {}: {}", item.id, err);
            }
        })
    }

    pub fn add(&mut self, text: &str) -> NoteResult<DurableWrite> {
        self.ensure_loaded()?;
        let id = self.notes.add(text)?.id.clone();
        info!("[STATE] Added {}", id);
        Ok(self.save_one(&id))
    }

    pub fn toggle(&mut self, id: &str) -> NoteResult<DurableWrite> {
        self.ensure_loaded()?;
        let done = self.notes.toggle(id)?;
        debug!("[STATE] Toggled {} done={}", id, done);
        Ok(self.save_one(id))
    }

    pub fn remove(&mut self, id: &str) -> NoteResult<DurableWrite> {
        self.ensure_loaded()?;
        self.notes.remove(id)?;
        info!("[STATE] Removed {}", id);
        Ok(self.save())
    }

    /// Commit an inline edit. Empty text keeps the old text and writes nothing.
    pub fn edit_commit(&mut self, id: &str, text: &str) -> NoteResult<DurableWrite> {
        self.ensure_loaded()?;
        self.notes.edit(id, text)?;
        debug!("[STATE] Edited {}", id);
        Ok(self.save_one(id))
    }

    pub fn clear_all(&mut self) -> NoteResult<DurableWrite> {
        self.ensure_loaded()?;
        self.notes.clear();
        info!("[STATE] Cleared all items");
        Ok(self.save())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::project;
    use crate::storage::{MemoryDurableStore, MemoryFastStore};
    use futures::executor::block_on;

    type Manager = StateManager<MemoryFastStore, MemoryDurableStore>;

    /// Empty manager that has finished loading
    fn manager() -> Manager {
        let mut m = StateManager::new(MemoryFastStore::default(), MemoryDurableStore::default());
        m.adopt(Vec::new()).spawn_in_test();
        m
    }

    fn texts(m: &Manager) -> Vec<String> {
        m.items().iter().map(|i| i.text.clone()).collect()
    }

    #[test]
    fn test_load_prefers_fast_snapshot() {
        let fast = MemoryFastStore::with_raw(r#"[{"id":"f","text":"fast","done":false,"created":9}]"#);
        let durable = MemoryDurableStore::with_records(vec![Item::with_id("d", "durable", 1)]);
        let mut m = StateManager::new(fast, durable);

        let items = block_on(m.load());
        m.adopt(items).spawn_in_test();
        assert_eq!(texts(&m), vec!["fast"]);
    }

    #[test]
    fn test_load_falls_back_to_durable_sorted() {
        let durable = MemoryDurableStore::with_records(vec![
            Item::with_id("b", "second", 2),
            Item::with_id("a", "first", 1),
        ]);
        let mut m = StateManager::new(MemoryFastStore::default(), durable);

        let items = block_on(m.load());
        m.adopt(items).spawn_in_test();
        assert_eq!(texts(&m), vec!["first", "second"]);
    }

    #[test]
    fn test_blank_snapshot_reads_durable() {
        let fast = MemoryFastStore::with_raw("");
        let durable = MemoryDurableStore::with_records(vec![Item::with_id("d", "durable", 1)]);
        let m = StateManager::new(fast, durable);
        assert_eq!(block_on(m.load()).len(), 1);
    }

    #[test]
    fn test_malformed_snapshot_starts_empty() {
        let fast = MemoryFastStore::with_raw("{oops");
        let durable = MemoryDurableStore::with_records(vec![Item::with_id("d", "durable", 1)]);
        let m = StateManager::new(fast, durable);
        assert!(block_on(m.load()).is_empty());
    }

    #[test]
    fn test_durable_failure_starts_empty() {
        let m = manager();
        m.durable.fail.set(true);
        assert!(block_on(m.load()).is_empty());
    }

    #[test]
    fn test_scenario_add_two_notes() {
        let mut m = manager();
        m.add("Buy milk").unwrap().spawn_in_test();
        m.add("Call Sam").unwrap().spawn_in_test();

        assert_eq!(texts(&m), vec!["Buy milk", "Call Sam"]);
        assert!(m.items().iter().all(|i| !i.done));
    }

    #[test]
    fn test_fast_store_written_before_durable() {
        let mut m = manager();
        let write = m.add("Buy milk").unwrap();

        assert_eq!(m.fast.snapshot().unwrap(), m.items());
        assert!(m.durable.records.borrow().is_empty());

        block_on(write.run());
        assert_eq!(*m.durable.records.borrow(), m.items());
    }

    #[test]
    fn test_whitespace_add_leaves_collection_and_stores() {
        let mut m = manager();
        m.add("keep").unwrap().spawn_in_test();
        let before = m.fast.raw.borrow().clone();

        assert_eq!(m.add("   ").err(), Some(NoteError::EmptyText));
        assert_eq!(texts(&m), vec!["keep"]);
        assert_eq!(*m.fast.raw.borrow(), before);
    }

    #[test]
    fn test_scenario_toggle_moves_to_bottom() {
        let mut m = manager();
        m.adopt(vec![Item::with_id("A", "a", 1), Item::with_id("B", "b", 2)]).spawn_in_test();

        m.toggle("A").unwrap().spawn_in_test();
        assert_eq!(project(m.items()).ids(), vec!["B", "A"]);

        m.toggle("A").unwrap().spawn_in_test();
        assert_eq!(project(m.items()).ids(), vec!["A", "B"]);
    }

    #[test]
    fn test_remove_missing_id_unchanged() {
        let mut m = manager();
        m.adopt(vec![Item::with_id("A", "a", 1)]).spawn_in_test();
        let before = m.notes().clone();

        assert!(m.remove("nope").is_err());
        assert_eq!(*m.notes(), before);
        // nothing was persisted
        assert!(m.fast.raw.borrow().is_none());
    }

    #[test]
    fn test_scenario_empty_edit_keeps_text() {
        let mut m = manager();
        m.adopt(vec![Item::with_id("A", "original", 1)]).spawn_in_test();

        assert!(m.edit_commit("A", "   ").is_err());
        assert_eq!(texts(&m), vec!["original"]);

        m.edit_commit("A", " changed ").unwrap().spawn_in_test();
        assert_eq!(texts(&m), vec!["changed"]);
        assert_eq!(m.fast.snapshot().unwrap(), m.items());
    }

    #[test]
    fn test_remove_drops_durable_record() {
        let mut m = manager();
        m.adopt(vec![Item::with_id("A", "a", 1), Item::with_id("B", "b", 2)]).spawn_in_test();
        block_on(m.save().run());
        assert_eq!(m.durable.records.borrow().len(), 2);

        block_on(m.remove("A").unwrap().run());
        let ids: Vec<_> = m.durable.records.borrow().iter().map(|i| i.id.clone()).collect();
        assert_eq!(ids, vec!["B"]);
    }

    #[test]
    fn test_store_failures_are_swallowed() {
        let mut m = manager();
        m.fast.fail_writes.set(true);
        m.durable.fail.set(true);

        let write = m.add("still here").unwrap();
        block_on(write.run());
        assert_eq!(texts(&m), vec!["still here"]);
        assert!(m.fast.raw.borrow().is_none());
        assert!(m.durable.records.borrow().is_empty());
    }

    #[test]
    fn test_clear_all() {
        let mut m = manager();
        m.add("one").unwrap().spawn_in_test();
        block_on(m.clear_all().unwrap().run());
        assert!(m.items().is_empty());
        assert_eq!(m.fast.snapshot().unwrap(), Vec::<Item>::new());
        assert!(m.durable.records.borrow().is_empty());
    }

    /// Mixed operation sequence: display order and fast snapshot hold after every step
    #[test]
    fn test_random_sequence_keeps_order_and_snapshot() {
        let mut m = manager();
        let mut seed: u64 = 0x2545_f491;
        let mut next = move || {
            seed ^= seed << 13;
            seed ^= seed >> 7;
            seed ^= seed << 17;
            seed
        };

        for step in 0..300i64 {
            let ids: Vec<String> = m.items().iter().map(|i| i.id.clone()).collect();
            let pick = |r: u64| ids.get(r as usize % ids.len().max(1)).cloned().unwrap_or_default();
            let write = match next() % 5 {
                0 | 1 => {
                    let mut item = Item::with_id(format!("n{}", step), format!("note {}", step), step / 3);
                    item.done = false;
                    let _ = m.notes.insert(item);
                    Ok(m.save())
                }
                2 => m.toggle(&pick(next())),
                3 => m.remove(&pick(next())),
                _ => m.edit_commit(&pick(next()), if next() % 2 == 0 { "" } else { "edited" }),
            };
            if let Ok(write) = write {
                block_on(write.run());
            }

            let view = project(m.items());
            let rows: Vec<_> = view.rows().collect();
            let first_done = rows.iter().position(|r| r.done).unwrap_or(rows.len());
            assert!(rows[first_done..].iter().all(|r| r.done));
            for group in [&view.active, &view.done] {
                let created: Vec<i64> = group
                    .iter()
                    .map(|r| m.notes().get(&r.id).unwrap().created)
                    .collect();
                assert!(created.windows(2).all(|w| w[0] <= w[1]));
            }

            assert_eq!(m.fast.snapshot().unwrap_or_default(), m.items());
        }
    }

    #[test]
    fn test_mutations_refused_until_loaded() {
        let durable = MemoryDurableStore::with_records(vec![Item::with_id("s", "saved", 1)]);
        let mut m = StateManager::new(MemoryFastStore::default(), durable);
        let pending = m.load();

        assert!(!m.is_loaded());
        assert_eq!(m.add("typed early").err(), Some(NoteError::Loading));
        assert_eq!(m.clear_all().err(), Some(NoteError::Loading));
        assert!(m.fast.raw.borrow().is_none());
        assert_eq!(m.durable.records.borrow().len(), 1);

        let items = block_on(pending);
        m.adopt(items).spawn_in_test();
        assert_eq!(texts(&m), vec!["saved"]);

        m.add("typed later").unwrap().spawn_in_test();
        assert_eq!(texts(&m), vec!["saved", "typed later"]);
        assert_eq!(*m.durable.records.borrow(), m.items());
    }

    #[test]
    fn test_adopt_backfills_durable_from_fast() {
        let fast = MemoryFastStore::with_raw(r#"[{"id":"f","text":"fast","done":false,"created":9}]"#);
        let mut m = StateManager::new(fast, MemoryDurableStore::default());

        let items = block_on(m.load());
        m.adopt(items).spawn_in_test();
        let ids: Vec<_> = m.durable.records.borrow().iter().map(|i| i.id.clone()).collect();
        assert_eq!(ids, vec!["f"]);
    }

    #[test]
    fn test_single_item_changes_upsert_durable_record() {
        let mut m = manager();
        m.adopt(vec![Item::with_id("A", "a", 1), Item::with_id("B", "b", 2)]).spawn_in_test();
        // a record only the durable store knows about survives upserts
        m.durable.upsert(&Item::with_id("Z", "stray", 0));

        m.toggle("A").unwrap().spawn_in_test();
        m.edit_commit("B", "bee").unwrap().spawn_in_test();

        let records = m.durable.records.borrow().clone();
        let ids: Vec<_> = records.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B", "Z"]);
        assert!(records[0].done);
        assert_eq!(records[1].text, "bee");
    }

    impl DurableWrite {
        /// Run to completion inline; tests have no spawner
        fn spawn_in_test(self) {
            block_on(self.run());
        }
    }
}
