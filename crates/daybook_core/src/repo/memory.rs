//! Vec-backed list repository.
//!
//! # Responsibility
//! - Hold one exclusively-owned list per record type.
//! - Implement `ListRepository` with position-preserving replace.

use super::{ListRepository, Record, RepoError, RepoResult};
use crate::model::journal::JournalEntry;
use crate::model::task::Task;
use std::collections::HashSet;
use uuid::Uuid;

pub type InMemoryJournalRepository = InMemoryRepository<JournalEntry>;
pub type InMemoryTaskRepository = InMemoryRepository<Task>;

/// In-memory list repository.
#[derive(Debug, Clone)]
pub struct InMemoryRepository<T> {
    records: Vec<T>,
}

impl<T> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<T: Record> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a repository from existing records, kept in the given order.
    ///
    /// Rejects invalid records and duplicate ids.
    pub fn with_records(records: Vec<T>) -> RepoResult<Self> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            record.check()?;
            if !seen.insert(record.id()) {
                return Err(RepoError::DuplicateId {
                    kind: T::KIND,
                    id: record.id(),
                });
            }
        }
        Ok(Self { records })
    }

    fn position(&self, id: Uuid) -> RepoResult<usize> {
        self.records
            .iter()
            .position(|record| record.id() == id)
            .ok_or(RepoError::NotFound { kind: T::KIND, id })
    }
}

impl<T: Record> ListRepository<T> for InMemoryRepository<T> {
    fn insert_front(&mut self, record: T) -> RepoResult<()> {
        record.check()?;
        if self.get(record.id()).is_some() {
            return Err(RepoError::DuplicateId {
                kind: T::KIND,
                id: record.id(),
            });
        }
        self.records.insert(0, record);
        Ok(())
    }

    fn replace(&mut self, record: T) -> RepoResult<T> {
        record.check()?;
        let index = self.position(record.id())?;
        Ok(std::mem::replace(&mut self.records[index], record))
    }

    fn remove(&mut self, id: Uuid) -> RepoResult<T> {
        let index = self.position(id)?;
        Ok(self.records.remove(index))
    }

    fn get(&self, id: Uuid) -> Option<&T> {
        self.records.iter().find(|record| record.id() == id)
    }

    fn list(&self) -> &[T] {
        &self.records
    }
}
