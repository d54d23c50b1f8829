//! Case-insensitive substring matching.
//!
//! # Responsibility
//! - Normalize a user search term once and test records against it.
//! - Let each record type declare which of its fields are searchable.
//!
//! # Invariants
//! - A blank term (empty string) matches every record.
//! - Filtering is idempotent: filtering a filtered list with the same term
//!   returns the same list.

use crate::model::journal::JournalEntry;
use crate::model::task::Task;

/// Record type with text fields visible to search.
pub trait Searchable {
    /// Calls `visit` once per searchable field; stops early when it returns
    /// `true`.
    fn any_field(&self, visit: &mut dyn FnMut(&str) -> bool) -> bool;
}

impl Searchable for JournalEntry {
    fn any_field(&self, visit: &mut dyn FnMut(&str) -> bool) -> bool {
        visit(&self.title) || visit(&self.content) || self.tags.iter().any(|tag| visit(tag))
    }
}

impl Searchable for Task {
    fn any_field(&self, visit: &mut dyn FnMut(&str) -> bool) -> bool {
        visit(&self.title) || visit(&self.description)
    }
}

/// Normalized search term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm {
    needle: String,
}

impl SearchTerm {
    /// Lowercases the raw term. Whitespace is kept as typed.
    pub fn new(raw: &str) -> Self {
        Self {
            needle: raw.to_lowercase(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.needle.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.needle
    }

    pub fn matches_text(&self, text: &str) -> bool {
        self.is_blank() || text.to_lowercase().contains(&self.needle)
    }

    pub fn matches<T: Searchable + ?Sized>(&self, record: &T) -> bool {
        self.is_blank() || record.any_field(&mut |field| self.matches_text(field))
    }

    /// Returns the matching records in their original order.
    pub fn filter<'a, T, I>(&self, records: I) -> Vec<T>
    where
        T: Searchable + Clone + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        records
            .into_iter()
            .filter(|record| self.matches(*record))
            .cloned()
            .collect()
    }
}
