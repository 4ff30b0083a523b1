use std::collections::BTreeMap;

use crossbeam::atomic::AtomicCell;
use parking_lot::RwLock;

use crate::{Id, IdType};

/// An ordered, lock-guarded collection holding every record of one entity kind.
///
/// The table is the sole authority for id allocation of its kind: ids start
/// at 1 and increase monotonically, so iteration order (id order) equals
/// insertion order. Every read-modify-write sequence runs under the write
/// lock, which keeps id allocation and counter increments atomic against
/// concurrent callers.
pub struct Table<T> {
    entries: RwLock<BTreeMap<Id<T>, T>>,
    next_id: AtomicCell<IdType>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            entries: RwLock::new(BTreeMap::new()),
            next_id: AtomicCell::new(1),
        }
    }
}

impl<T> Table<T>
where
    T: Clone,
{
    pub fn new() -> Self {
        Default::default()
    }

    /// Allocates the next id and inserts the record built from it,
    /// returning the stored value.
    pub fn insert_with<F>(&self, build: F) -> T
    where
        F: FnOnce(Id<T>) -> T,
    {
        let mut entries = self.entries.write();

        let id = Id::from_value(self.next_id.fetch_add(1));
        let record = build(id);

        entries.insert(id, record.clone());
        record
    }

    /// Returns the record with the given id, if it exists.
    pub fn get(&self, id: Id<T>) -> Option<T> {
        self.entries.read().get(&id).cloned()
    }

    /// Mutates the stored record in place, returning the merged result.
    /// Returns [None] if the id does not exist.
    pub fn update<F>(&self, id: Id<T>, apply: F) -> Option<T>
    where
        F: FnOnce(&mut T),
    {
        let mut entries = self.entries.write();
        let record = entries.get_mut(&id)?;

        apply(record);
        Some(record.clone())
    }

    /// Returns every record, in insertion order.
    pub fn all(&self) -> Vec<T> {
        self.entries.read().values().cloned().collect()
    }

    /// Returns the records matching the predicate, in insertion order.
    pub fn filter<P>(&self, mut keep: P) -> Vec<T>
    where
        P: FnMut(&T) -> bool,
    {
        self.entries
            .read()
            .values()
            .filter(|record| keep(record))
            .cloned()
            .collect()
    }

    /// Returns the first record matching the predicate, in insertion order.
    pub fn find<P>(&self, mut matches: P) -> Option<T>
    where
        P: FnMut(&T) -> bool,
    {
        self.entries
            .read()
            .values()
            .find(|record| matches(record))
            .cloned()
    }

    /// Deletes the first record matching the predicate, in insertion order.
    /// Returns whether a record was deleted.
    pub fn remove_first<P>(&self, mut matches: P) -> bool
    where
        P: FnMut(&T) -> bool,
    {
        let mut entries = self.entries.write();

        let found = entries
            .iter()
            .find(|(_, record)| matches(record))
            .map(|(id, _)| *id);

        match found {
            Some(id) => {
                entries.remove(&id);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[cfg(test)]
mod test {
    use std::thread;

    use super::Table;

    #[derive(Debug, Clone)]
    struct Counter {
        id: u64,
        hits: u64,
    }

    fn insert_counter(table: &Table<Counter>) -> Counter {
        table.insert_with(|id| Counter {
            id: id.value(),
            hits: 0,
        })
    }

    #[test]
    fn ids_are_monotonic_from_one() {
        let table = Table::new();

        let first = insert_counter(&table);
        let second = insert_counter(&table);
        let third = insert_counter(&table);

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(third.id, 3);
    }

    #[test]
    fn iteration_preserves_insertion_order() {
        let table = Table::new();

        for _ in 0..5 {
            insert_counter(&table);
        }

        let ids: Vec<_> = table.all().into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn get_missing_returns_none() {
        let table: Table<Counter> = Table::new();

        assert!(table.get(id_of(42)).is_none());
    }

    #[test]
    fn update_mutates_in_place() {
        let table = Table::new();
        let counter = insert_counter(&table);
        let id = id_of(counter.id);

        let updated = table.update(id, |c| c.hits += 1).unwrap();
        assert_eq!(updated.hits, 1);

        let stored = table.get(id).unwrap();
        assert_eq!(stored.hits, 1);
    }

    #[test]
    fn update_missing_returns_none() {
        let table: Table<Counter> = Table::new();

        assert!(table.update(id_of(1), |c| c.hits += 1).is_none());
    }

    #[test]
    fn remove_first_deletes_one_match() {
        let table = Table::new();

        insert_counter(&table);
        insert_counter(&table);

        assert!(table.remove_first(|_| true));
        assert_eq!(table.len(), 1);

        // The earliest record goes first
        assert_eq!(table.all()[0].id, 2);
    }

    #[test]
    fn remove_first_without_match_returns_false() {
        let table = Table::new();
        insert_counter(&table);

        assert!(!table.remove_first(|c| c.id == 99));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn concurrent_updates_lose_no_increments() {
        let table = Table::new();
        let counter = insert_counter(&table);
        let id = id_of(counter.id);

        thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    for _ in 0..100 {
                        table.update(id, |c| c.hits += 1);
                    }
                });
            }
        });

        assert_eq!(table.get(id).unwrap().hits, 800);
    }

    #[test]
    fn concurrent_inserts_allocate_unique_ids() {
        let table = Table::new();

        thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    for _ in 0..50 {
                        insert_counter(&table);
                    }
                });
            }
        });

        let mut ids: Vec<_> = table.all().into_iter().map(|c| c.id).collect();
        let amount = ids.len();

        ids.dedup();
        assert_eq!(amount, 400);
        assert_eq!(ids.len(), 400);
    }

    fn id_of(value: u64) -> crate::Id<Counter> {
        crate::Id::from_value(value)
    }
}
