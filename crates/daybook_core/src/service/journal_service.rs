//! Journal use-case service.
//!
//! # Responsibility
//! - Own the journal entry list and every mutation path into it.
//! - Stamp ids and timestamps; derive plain-text previews for list views.
//!
//! # Invariants
//! - New entries are prepended; updates keep list position.
//! - `update_entry` preserves `id` and `created_at` and strictly advances
//!   `updated_at`.
//! - Rejected calls leave the list unchanged.

use crate::clock::{Clock, Stamper, SystemClock};
use crate::model::journal::{EntryId, EntryValidationError, JournalEntry, NewEntry};
use crate::repo::{InMemoryJournalRepository, ListRepository, RepoError};
use crate::search::matcher::SearchTerm;
use log::{info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

const PREVIEW_MAX_CHARS: usize = 100;

/// Service error for journal use-cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JournalServiceError {
    /// Input failed validation; nothing was written.
    Invalid(EntryValidationError),
    EntryNotFound(EntryId),
    Repo(RepoError),
}

impl JournalServiceError {
    /// Stable short code for log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Invalid(EntryValidationError::EmptyTitle) => "empty_title",
            Self::Invalid(EntryValidationError::EmptyContent) => "empty_content",
            Self::Invalid(EntryValidationError::InvalidTag(_)) => "invalid_tag",
            Self::Invalid(EntryValidationError::DuplicateTag(_)) => "duplicate_tag",
            Self::Invalid(EntryValidationError::InvalidTimestamps { .. }) => "invalid_timestamps",
            Self::EntryNotFound(_) => "not_found",
            Self::Repo(_) => "repo_error",
        }
    }
}

impl Display for JournalServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Invalid(err) => write!(f, "{err}"),
            Self::EntryNotFound(id) => write!(f, "journal entry not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for JournalServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Invalid(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::EntryNotFound(_) => None,
        }
    }
}

impl From<EntryValidationError> for JournalServiceError {
    fn from(value: EntryValidationError) -> Self {
        Self::Invalid(value)
    }
}

impl From<RepoError> for JournalServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound { id, .. } => Self::EntryNotFound(id),
            RepoError::InvalidEntry(err) => Self::Invalid(err),
            other => Self::Repo(other),
        }
    }
}

/// Journal state owner.
pub struct JournalService<R = InMemoryJournalRepository, C = SystemClock>
where
    R: ListRepository<JournalEntry>,
    C: Clock,
{
    repo: R,
    stamper: Stamper<C>,
}

impl<R: ListRepository<JournalEntry>> JournalService<R, SystemClock> {
    /// Creates a service stamping records with the wall clock.
    pub fn new(repo: R) -> Self {
        Self::with_clock(repo, SystemClock)
    }
}

impl<R: ListRepository<JournalEntry>, C: Clock> JournalService<R, C> {
    pub fn with_clock(repo: R, clock: C) -> Self {
        Self {
            repo,
            stamper: Stamper::new(clock),
        }
    }

    /// Creates an entry and prepends it to the list.
    ///
    /// Title and content are stored trimmed; `date` defaults to today.
    pub fn create_entry(&mut self, input: NewEntry) -> Result<JournalEntry, JournalServiceError> {
        if let Err(err) = input.validate() {
            let err = JournalServiceError::from(err);
            warn!(
                "event=entry_create module=journal status=rejected error_code={}",
                err.code()
            );
            return Err(err);
        }

        let now = self.stamper.next();
        let entry = JournalEntry {
            id: Uuid::now_v7(),
            title: input.title.trim().to_string(),
            content: input.content.trim().to_string(),
            date: input.date.unwrap_or_else(|| self.stamper.today()),
            mood: input.mood,
            tags: input.tags,
            created_at: now,
            updated_at: now,
        };
        self.repo.insert_front(entry.clone())?;

        info!(
            "event=entry_create module=journal status=ok entry_id={} tag_count={} entries={}",
            entry.id,
            entry.tags.len(),
            self.repo.len()
        );
        Ok(entry)
    }

    /// Replaces the stored entry with the same id.
    ///
    /// Keeps the stored `created_at`; `updated_at` is re-stamped past the
    /// stored value.
    pub fn update_entry(
        &mut self,
        entry: JournalEntry,
    ) -> Result<JournalEntry, JournalServiceError> {
        let (created_at, previous) = match self.repo.get(entry.id) {
            Some(existing) => (existing.created_at, existing.updated_at),
            None => {
                warn!(
                    "event=entry_update module=journal status=rejected error_code=not_found entry_id={}",
                    entry.id
                );
                return Err(JournalServiceError::EntryNotFound(entry.id));
            }
        };

        let updated = JournalEntry {
            title: entry.title.trim().to_string(),
            content: entry.content.trim().to_string(),
            created_at,
            updated_at: self.stamper.next_after(previous),
            ..entry
        };
        if let Err(err) = self.repo.replace(updated.clone()) {
            let err = JournalServiceError::from(err);
            warn!(
                "event=entry_update module=journal status=rejected error_code={} entry_id={}",
                err.code(),
                updated.id
            );
            return Err(err);
        }

        info!(
            "event=entry_update module=journal status=ok entry_id={}",
            updated.id
        );
        Ok(updated)
    }

    /// Removes an entry and returns it.
    pub fn delete_entry(&mut self, id: EntryId) -> Result<JournalEntry, JournalServiceError> {
        let removed = self.repo.remove(id)?;
        info!(
            "event=entry_delete module=journal status=ok entry_id={} entries={}",
            id,
            self.repo.len()
        );
        Ok(removed)
    }

    /// Entries whose title, content or any tag contains `term`
    /// (case-insensitive), in list order.
    pub fn search(&self, term: &str) -> Vec<JournalEntry> {
        SearchTerm::new(term).filter(self.repo.list())
    }

    pub fn get_entry(&self, id: EntryId) -> Option<&JournalEntry> {
        self.repo.get(id)
    }

    /// All entries, newest created first.
    pub fn list_entries(&self) -> &[JournalEntry] {
        self.repo.list()
    }

    pub fn entry_count(&self) -> usize {
        self.repo.len()
    }

    /// Up to `limit` entries ordered by entry date, latest first.
    ///
    /// Entries sharing a date keep list order.
    pub fn recent_entries(&self, limit: usize) -> Vec<JournalEntry> {
        let mut entries = self.repo.list().to_vec();
        entries.sort_by(|left, right| right.date.cmp(&left.date));
        entries.truncate(limit);
        entries
    }
}

/// Derives a single-line plain-text preview of entry content.
///
/// Whitespace runs collapse to one space; output is capped at 100 chars with
/// a trailing `...` when cut.
pub fn derive_text_preview(content: &str) -> String {
    let normalized = WHITESPACE_RE.replace_all(content, " ");
    let trimmed = normalized.trim();
    if trimmed.chars().count() <= PREVIEW_MAX_CHARS {
        return trimmed.to_string();
    }
    let mut preview: String = trimmed.chars().take(PREVIEW_MAX_CHARS).collect();
    preview.truncate(preview.trim_end().len());
    preview.push_str("...");
    preview
}

#[cfg(test)]
mod tests {
    use super::{derive_text_preview, JournalService, JournalServiceError};
    use crate::clock::FixedClock;
    use crate::model::journal::{EntryValidationError, NewEntry};
    use crate::repo::InMemoryJournalRepository;

    fn service() -> JournalService<InMemoryJournalRepository, FixedClock> {
        JournalService::with_clock(
            InMemoryJournalRepository::new(),
            FixedClock::new(1_705_312_800_000),
        )
    }

    #[test]
    fn preview_collapses_whitespace_and_caps_length() {
        assert_eq!(derive_text_preview("  a\n\n b\tc "), "a b c");
        let long = "word ".repeat(40);
        let preview = derive_text_preview(&long);
        assert!(preview.ends_with("..."));
        assert!(preview.chars().count() <= 103);
    }

    #[test]
    fn create_defaults_date_to_clock_day_and_trims() {
        let mut journal = service();
        let created = journal
            .create_entry(NewEntry::new("  Morning  ", " thoughts "))
            .unwrap();
        assert_eq!(created.title, "Morning");
        assert_eq!(created.content, "thoughts");
        assert_eq!(created.date.to_string(), "2024-01-15");
    }

    #[test]
    fn rejected_create_reports_error_code() {
        let mut journal = service();
        let err = journal.create_entry(NewEntry::new("t", "  ")).unwrap_err();
        assert_eq!(
            err,
            JournalServiceError::Invalid(EntryValidationError::EmptyContent)
        );
        assert_eq!(err.code(), "empty_content");
        assert_eq!(journal.entry_count(), 0);
    }
}
