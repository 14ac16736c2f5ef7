use super::{Record, RecordId};

/// In-memory, insertion-ordered list of records of one kind.
///
/// Ids come from a counter that only moves forward, so removing a record and
/// adding another never hands out an id twice.
#[derive(Debug, Clone)]
pub struct RecordStore<T> {
    records: Vec<T>,
    next_id: RecordId,
}

impl<T: Record> RecordStore<T> {
    pub fn new(seed: Vec<T>) -> Self {
        let next_id = seed.iter().map(Record::id).max().unwrap_or(0) + 1;
        Self {
            records: seed,
            next_id,
        }
    }

    pub fn all(&self) -> &[T] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: RecordId) -> Option<&T> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// Appends `record` under a fresh id and returns that id.
    pub fn insert(&mut self, mut record: T) -> RecordId {
        let id = self.next_id;
        self.next_id += 1;
        record.set_id(id);
        self.records.push(record);
        id
    }

    /// Applies `change` to the record with `id`, keeping its position.
    pub fn update<F>(&mut self, id: RecordId, change: F) -> Option<&T>
    where
        F: FnOnce(&mut T),
    {
        let record = self.records.iter_mut().find(|r| r.id() == id)?;
        change(record);
        record.set_id(id);
        Some(record)
    }

    /// Removes the record with `id`. Missing ids leave the store untouched.
    pub fn remove(&mut self, id: RecordId) -> Option<T> {
        let index = self.records.iter().position(|r| r.id() == id)?;
        Some(self.records.remove(index))
    }
}
