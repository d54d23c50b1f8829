//! Repository contracts for the in-memory record lists.
//!
//! # Responsibility
//! - Define the list operations services are allowed to perform.
//! - Return semantic errors (`NotFound`, `DuplicateId`) alongside record
//!   validation failures.
//!
//! # Invariants
//! - Every write validates the record before touching the list.
//! - Ids are unique within one repository.
//! - A failed write leaves the list unchanged.

pub mod memory;

use crate::model::journal::{EntryValidationError, JournalEntry};
use crate::model::task::{Task, TaskValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub use memory::{InMemoryJournalRepository, InMemoryRepository, InMemoryTaskRepository};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository-level error for list operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    InvalidEntry(EntryValidationError),
    InvalidTask(TaskValidationError),
    NotFound { kind: &'static str, id: Uuid },
    DuplicateId { kind: &'static str, id: Uuid },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidEntry(err) => write!(f, "{err}"),
            Self::InvalidTask(err) => write!(f, "{err}"),
            Self::NotFound { kind, id } => write!(f, "{kind} not found: {id}"),
            Self::DuplicateId { kind, id } => write!(f, "{kind} id already exists: {id}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidEntry(err) => Some(err),
            Self::InvalidTask(err) => Some(err),
            Self::NotFound { .. } | Self::DuplicateId { .. } => None,
        }
    }
}

impl From<EntryValidationError> for RepoError {
    fn from(value: EntryValidationError) -> Self {
        Self::InvalidEntry(value)
    }
}

impl From<TaskValidationError> for RepoError {
    fn from(value: TaskValidationError) -> Self {
        Self::InvalidTask(value)
    }
}

/// Record stored in a list repository.
pub trait Record: Clone {
    /// Human-readable kind used in errors and log events.
    const KIND: &'static str;

    fn id(&self) -> Uuid;

    /// Record-level invariants checked on every write.
    fn check(&self) -> RepoResult<()>;
}

impl Record for JournalEntry {
    const KIND: &'static str = "entry";

    fn id(&self) -> Uuid {
        self.id
    }

    fn check(&self) -> RepoResult<()> {
        self.validate().map_err(RepoError::from)
    }
}

impl Record for Task {
    const KIND: &'static str = "task";

    fn id(&self) -> Uuid {
        self.id
    }

    fn check(&self) -> RepoResult<()> {
        self.validate().map_err(RepoError::from)
    }
}

/// Ordered list of records, newest insert first.
pub trait ListRepository<T: Record> {
    /// Inserts at the front of the list.
    fn insert_front(&mut self, record: T) -> RepoResult<()>;
    /// Replaces the record with the same id in place; returns the old value.
    fn replace(&mut self, record: T) -> RepoResult<T>;
    /// Removes and returns the record with `id`.
    fn remove(&mut self, id: Uuid) -> RepoResult<T>;
    fn get(&self, id: Uuid) -> Option<&T>;
    /// All records in list order.
    fn list(&self) -> &[T];

    fn len(&self) -> usize {
        self.list().len()
    }

    fn is_empty(&self) -> bool {
        self.list().is_empty()
    }
}
