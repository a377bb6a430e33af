//! Ordered Item Store
//!
//! Client-side ordering of one scope. Positions are always derived from the
//! array index, never trusted from the server until the next full load.

/// Anything that can live in a sortable list
pub trait Ordered: Clone {
    /// Identifier, unique within a scope
    fn item_id(&self) -> &str;

    /// 1-indexed rank within the scope
    fn sort_order(&self) -> u32;

    fn set_sort_order(&mut self, sort_order: u32);
}

/// Plain ordered item, used where a feature has no richer model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedItem {
    pub id: String,
    pub sort_order: u32,
    pub scope_key: String,
}

impl OrderedItem {
    pub fn new(id: impl Into<String>, scope_key: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            sort_order: 0,
            scope_key: scope_key.into(),
        }
    }
}

impl Ordered for OrderedItem {
    fn item_id(&self) -> &str {
        &self.id
    }

    fn sort_order(&self) -> u32 {
        self.sort_order
    }

    fn set_sort_order(&mut self, sort_order: u32) {
        self.sort_order = sort_order;
    }
}

/// Move the element at `from` to `to`, shifting everything in between by one.
///
/// Relative order of untouched elements is preserved. Out-of-range indices
/// leave the slice untouched.
pub fn array_move<T>(items: &mut Vec<T>, from: usize, to: usize) {
    if from >= items.len() || to >= items.len() || from == to {
        return;
    }
    let item = items.remove(from);
    items.insert(to, item);
}

/// Locally authoritative ordering for one scope
#[derive(Debug, Clone)]
pub struct OrderedStore<T: Ordered> {
    scope_key: String,
    items: Vec<T>,
    /// Bumped on every mutation; lets a late rollback detect newer changes
    revision: u64,
    /// Bumped only by `replace`
    loads: u64,
}

impl<T: Ordered> OrderedStore<T> {
    pub fn new(scope_key: impl Into<String>, items: Vec<T>) -> Self {
        let mut store = Self {
            scope_key: scope_key.into(),
            items,
            revision: 0,
            loads: 0,
        };
        store.reindex();
        store
    }

    pub fn scope_key(&self) -> &str {
        &self.scope_key
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Full replacements so far; local moves leave it alone
    pub fn loads(&self) -> u64 {
        self.loads
    }

    pub fn ids(&self) -> Vec<String> {
        self.items.iter().map(|i| i.item_id().to_string()).collect()
    }

    /// Index of an item by identity
    pub fn index_of(&self, item_id: &str) -> Option<usize> {
        self.items.iter().position(|i| i.item_id() == item_id)
    }

    pub fn get(&self, item_id: &str) -> Option<&T> {
        self.items.iter().find(|i| i.item_id() == item_id)
    }

    /// Replace the whole list (scope change or explicit refresh)
    pub fn replace(&mut self, scope_key: impl Into<String>, items: Vec<T>) {
        self.scope_key = scope_key.into();
        self.items = items;
        self.reindex();
        self.revision += 1;
        self.loads += 1;
    }

    /// Move by index and reassign positions from the new order
    pub fn move_index(&mut self, from: usize, to: usize) {
        array_move(&mut self.items, from, to);
        self.reindex();
        self.revision += 1;
    }

    /// Restore a snapshot, but only if nothing changed after `expected_revision`.
    ///
    /// Returns whether the snapshot was applied.
    pub fn restore(&mut self, snapshot: Vec<T>, expected_revision: u64) -> bool {
        if self.revision != expected_revision {
            return false;
        }
        self.items = snapshot;
        self.reindex();
        self.revision += 1;
        true
    }

    fn reindex(&mut self) {
        for (index, item) in self.items.iter_mut().enumerate() {
            item.set_sort_order(index as u32 + 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(ids: &[&str]) -> OrderedStore<OrderedItem> {
        OrderedStore::new("tag:work", ids.iter().map(|id| OrderedItem::new(*id, "tag:work")).collect())
    }

    #[test]
    fn test_positions_derived_from_index() {
        let mut items = vec![OrderedItem::new("a", "s"), OrderedItem::new("b", "s")];
        items[0].sort_order = 42;
        items[1].sort_order = 42;
        let store = OrderedStore::new("s", items);
        let orders: Vec<u32> = store.items().iter().map(|i| i.sort_order).collect();
        assert_eq!(orders, vec![1, 2]);
    }

    #[test]
    fn test_array_move_preserves_relative_order() {
        let mut v = vec![1, 2, 3, 4, 5];
        array_move(&mut v, 1, 3);
        assert_eq!(v, vec![1, 3, 4, 2, 5]);
        array_move(&mut v, 4, 0);
        assert_eq!(v, vec![5, 1, 3, 4, 2]);
        array_move(&mut v, 0, 9);
        assert_eq!(v, vec![5, 1, 3, 4, 2]);
    }

    #[test]
    fn test_move_matches_remove_then_insert() {
        let base: Vec<&str> = vec!["a", "b", "c", "d", "e", "f"];
        for i in 0..base.len() {
            for j in 0..base.len() {
                if i == j {
                    continue;
                }
                let mut s = store(&base);
                s.move_index(i, j);

                let mut expected: Vec<String> = base.iter().map(|x| x.to_string()).collect();
                let moved = expected.remove(i);
                expected.insert(j, moved);

                assert_eq!(s.ids(), expected, "move {} -> {}", i, j);
                let orders: Vec<u32> = s.items().iter().map(|x| x.sort_order).collect();
                assert_eq!(orders, (1..=base.len() as u32).collect::<Vec<_>>());
            }
        }
    }

    #[test]
    fn test_restore_only_when_unchanged() {
        let mut s = store(&["a", "b", "c"]);
        let snapshot = s.items().to_vec();
        s.move_index(2, 0);
        let rev = s.revision();

        assert!(s.restore(snapshot.clone(), rev));
        assert_eq!(s.ids(), vec!["a", "b", "c"]);

        s.move_index(2, 0);
        let stale = s.revision();
        s.move_index(1, 2);
        assert!(!s.restore(snapshot, stale));
        assert_eq!(s.ids(), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_loads_count_replacements_only() {
        let mut s = store(&["a", "b", "c"]);
        s.move_index(0, 2);
        assert_eq!(s.loads(), 0);
        s.replace("tag:home", vec![OrderedItem::new("x", "tag:home")]);
        assert_eq!(s.loads(), 1);
        assert_eq!(s.get("x").map(|i| i.sort_order), Some(1));
    }
}
