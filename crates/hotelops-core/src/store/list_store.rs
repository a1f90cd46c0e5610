// ── Accumulating list store ──
//
// Ordered, id-deduplicated sequence of records. Page 1 replaces the
// sequence, later pages append. Snapshots are copy-on-write so handing
// the current list to subscribers is an `Arc` clone.

use std::collections::HashSet;
use std::sync::Arc;

use crate::model::{EntityId, Identified};

/// Ordered records, unique by id, in page-then-fetch order.
#[derive(Debug)]
pub struct ListStore<T> {
    items: Arc<Vec<Arc<T>>>,
    ids: HashSet<EntityId>,
}

impl<T> Default for ListStore<T> {
    fn default() -> Self {
        Self {
            items: Arc::new(Vec::new()),
            ids: HashSet::new(),
        }
    }
}

impl<T: Identified> ListStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sequence to `items` verbatim.
    pub fn replace(&mut self, items: Vec<T>) {
        self.ids = items.iter().map(|i| i.id().clone()).collect();
        self.items = Arc::new(items.into_iter().map(Arc::new).collect());
    }

    /// Append items whose id is not present yet, in arrival order.
    ///
    /// First occurrence wins: an incoming duplicate is dropped and the
    /// existing item keeps its position. Returns how many were added.
    pub fn append(&mut self, items: Vec<T>) -> usize {
        let list = Arc::make_mut(&mut self.items);
        let before = list.len();
        for item in items {
            if self.ids.insert(item.id().clone()) {
                list.push(Arc::new(item));
            }
        }
        list.len() - before
    }

    /// Replace the record with the same id in place, or push it at the end.
    ///
    /// For presentation-side edits after a create/update call; not used
    /// by pagination.
    pub fn upsert_by_id(&mut self, item: T) -> bool {
        let list = Arc::make_mut(&mut self.items);
        if let Some(slot) = list.iter_mut().find(|i| i.id() == item.id()) {
            *slot = Arc::new(item);
            false
        } else {
            self.ids.insert(item.id().clone());
            list.push(Arc::new(item));
            true
        }
    }

    /// Remove a record by id, for presentation-side deletes.
    ///
    /// A page 1 kept verbatim may hold the id more than once; every row
    /// with it goes, and the first one is returned.
    pub fn remove_by_id(&mut self, id: &EntityId) -> Option<Arc<T>> {
        if !self.ids.remove(id) {
            return None;
        }
        let list = Arc::make_mut(&mut self.items);
        let pos = list.iter().position(|i| i.id() == id)?;
        let removed = list.remove(pos);
        list.retain(|i| i.id() != id);
        Some(removed)
    }

    pub fn contains(&self, id: &EntityId) -> bool {
        self.ids.contains(id)
    }

    pub fn get(&self, id: &EntityId) -> Option<Arc<T>> {
        self.items.iter().find(|i| i.id() == id).cloned()
    }

    /// Current sequence (cheap `Arc` clone).
    pub fn snapshot(&self) -> Arc<Vec<Arc<T>>> {
        Arc::clone(&self.items)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::Record;
    use pretty_assertions::assert_eq;

    fn rec(id: u64) -> Record {
        Record::new(id)
    }

    fn ids(store: &ListStore<Record>) -> Vec<String> {
        store.snapshot().iter().map(|r| r.id.to_string()).collect()
    }

    #[test]
    fn remove_clears_every_copy_from_a_verbatim_page() {
        let mut store = ListStore::new();
        store.replace(vec![rec(1), rec(2), rec(1)]);
        assert_eq!(ids(&store), vec!["1", "2", "1"]);

        assert!(store.remove_by_id(&EntityId::Numeric(1)).is_some());
        assert_eq!(ids(&store), vec!["2"]);

        assert_eq!(store.append(vec![rec(1)]), 1);
        assert_eq!(ids(&store), vec!["2", "1"]);
    }

    #[test]
    fn append_drops_known_ids() {
        let mut store = ListStore::new();
        store.replace(vec![rec(1), rec(2)]);
        let added = store.append(vec![rec(2), rec(3)]);

        assert_eq!(added, 1);
        assert_eq!(ids(&store), vec!["1", "2", "3"]);
    }

    #[test]
    fn first_seen_wins_and_keeps_position() {
        let mut store = ListStore::new();
        store.replace(vec![rec(1).with("v", "old"), rec(2)]);
        store.append(vec![rec(1).with("v", "new"), rec(4)]);

        let snap = store.snapshot();
        assert_eq!(ids(&store), vec!["1", "2", "4"]);
        assert_eq!(snap[0].display_field("v"), "old");
    }

    #[test]
    fn duplicates_inside_one_page_are_dropped_on_append() {
        let mut store = ListStore::new();
        store.append(vec![rec(5), rec(5), rec(6)]);
        assert_eq!(ids(&store), vec!["5", "6"]);
    }

    #[test]
    fn replace_discards_previous_items() {
        let mut store = ListStore::new();
        store.replace(vec![rec(1), rec(2), rec(3)]);
        store.replace(vec![rec(9)]);

        assert_eq!(ids(&store), vec!["9"]);
        assert!(!store.contains(&EntityId::Numeric(1)));
        assert_eq!(store.append(vec![rec(1)]), 1, "old ids are forgotten");
    }

    #[test]
    fn earlier_snapshots_are_not_mutated() {
        let mut store = ListStore::new();
        store.replace(vec![rec(1)]);
        let before = store.snapshot();
        store.append(vec![rec(2)]);

        assert_eq!(before.len(), 1);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn upsert_replaces_in_place() {
        let mut store = ListStore::new();
        store.replace(vec![rec(1), rec(2)]);

        assert!(!store.upsert_by_id(rec(1).with("name", "edited")));
        assert!(store.upsert_by_id(rec(3)));
        assert_eq!(ids(&store), vec!["1", "2", "3"]);
        assert_eq!(
            store.get(&EntityId::Numeric(1)).unwrap().display_field("name"),
            "edited"
        );
    }

    #[test]
    fn remove_by_id() {
        let mut store = ListStore::new();
        store.replace(vec![rec(1), rec(2)]);

        assert!(store.remove_by_id(&EntityId::Numeric(1)).is_some());
        assert!(store.remove_by_id(&EntityId::Numeric(1)).is_none());
        assert_eq!(ids(&store), vec!["2"]);
    }
}
