//! In-memory record collections owned by a single page.

use crate::error::{AppError, Result};
use crate::table::{Record, RecordId};

/// A record type managed through the CRUD pages.
pub trait Entity: Record {
    /// Singular display name, e.g. "bank account".
    const NOUN: &'static str;

    /// Short human label used in notifications and confirmations.
    fn label(&self) -> String;

    /// Business rule checked before deletion.
    fn delete_guard(&self) -> Result<()> {
        Ok(())
    }
}

/// Ordered record collection with explicit create/update/delete.
#[derive(Debug, Clone)]
pub struct RecordStore<R> {
    records: Vec<R>,
    revision: u64,
}

impl<R: Record> RecordStore<R> {
    /// Seed the store; seed identifiers are kept as given.
    pub fn new(seed: Vec<R>) -> Self {
        Self {
            records: seed,
            revision: 0,
        }
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Bumped on every successful mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn get(&self, id: RecordId) -> Option<&R> {
        self.records.iter().find(|r| r.id() == id)
    }

    fn position(&self, id: RecordId) -> Result<usize> {
        self.records
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| AppError::not_found(format!("record #{id}")))
    }

    /// Identifier the next inserted record receives.
    pub fn next_id(&self) -> RecordId {
        self.records.iter().map(Record::id).max().unwrap_or(0) + 1
    }

    /// Append a record under a fresh identifier.
    pub fn insert(&mut self, mut record: R) -> RecordId {
        let id = self.next_id();
        record.set_id(id);
        self.records.push(record);
        self.revision += 1;
        id
    }

    /// Replace the record with `id` in place.
    pub fn update(&mut self, id: RecordId, mut record: R) -> Result<()> {
        let index = self.position(id)?;
        record.set_id(id);
        self.records[index] = record;
        self.revision += 1;
        Ok(())
    }

    /// Remove exactly one record.
    pub fn remove(&mut self, id: RecordId) -> Result<R> {
        self.remove_guarded(id, |_| Ok(()))
    }

    /// Remove a record unless `guard` rejects it; a rejection changes nothing.
    pub fn remove_guarded<F>(&mut self, id: RecordId, guard: F) -> Result<R>
    where
        F: FnOnce(&R) -> Result<()>,
    {
        let index = self.position(id)?;
        guard(&self.records[index])?;
        let removed = self.records.remove(index);
        self.revision += 1;
        Ok(removed)
    }
}

impl<E: Entity> RecordStore<E> {
    /// Remove a record subject to its own delete guard.
    pub fn delete(&mut self, id: RecordId) -> Result<E> {
        self.remove_guarded(id, E::delete_guard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::testing::{Row, sample};

    #[test]
    fn test_insert_assigns_next_id() {
        let mut store = RecordStore::new(sample());
        let id = store.insert(Row::new(0, "Fig", 15));
        assert_eq!(id, 7);
        assert_eq!(store.get(7).map(|r| r.name.as_str()), Some("Fig"));
        assert_eq!(store.records().last().map(|r| r.id), Some(7));
        assert_eq!(store.revision(), 1);
    }

    #[test]
    fn test_insert_into_empty_store() {
        let mut store = RecordStore::<Row>::new(Vec::new());
        assert_eq!(store.insert(Row::new(99, "first", 1)), 1);
    }

    #[test]
    fn test_update_keeps_position() {
        let mut store = RecordStore::new(sample());
        store.update(3, Row::new(0, "Blueberry", 25)).unwrap();
        assert_eq!(store.records()[2], Row::new(3, "Blueberry", 25));
        assert_eq!(store.len(), 6);
    }

    #[test]
    fn test_update_unknown_id() {
        let mut store = RecordStore::new(sample());
        assert!(matches!(store.update(42, Row::new(0, "x", 0)), Err(AppError::NotFound(_))));
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn test_remove_exactly_one() {
        let mut store = RecordStore::new(sample());
        let removed = store.remove(4).unwrap();
        assert_eq!(removed.name, "Artichoke");
        assert_eq!(store.len(), 5);
        assert!(store.get(4).is_none());
    }

    #[test]
    fn test_guard_rejection_changes_nothing() {
        let mut store = RecordStore::new(sample());
        let result = store.remove_guarded(1, |r| {
            if r.amount > 0 {
                Err(AppError::rejected("still in stock"))
            } else {
                Ok(())
            }
        });
        assert!(matches!(result, Err(AppError::Rejected(_))));
        assert_eq!(store.records(), sample().as_slice());
        assert_eq!(store.revision(), 0);
    }
}
