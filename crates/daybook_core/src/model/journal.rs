//! Journal entry domain model.
//!
//! # Responsibility
//! - Define the canonical journal record with mood and tag metadata.
//! - Own tag-set rules so every producer of tags obeys them.
//!
//! # Invariants
//! - `title` and `content` are non-blank.
//! - Tags are trimmed, non-blank and unique, in insertion order.
//! - `updated_at >= created_at`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Stable identifier for a journal entry.
pub type EntryId = Uuid;

/// Validation failures for journal entries and their tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryValidationError {
    EmptyTitle,
    EmptyContent,
    /// Tag is blank after trim.
    InvalidTag(String),
    /// Tag already present in the set.
    DuplicateTag(String),
    /// `updated_at` precedes `created_at`.
    InvalidTimestamps { created_at: i64, updated_at: i64 },
}

impl Display for EntryValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "entry title must not be blank"),
            Self::EmptyContent => write!(f, "entry content must not be blank"),
            Self::InvalidTag(value) => write!(f, "invalid tag: `{value}`"),
            Self::DuplicateTag(value) => write!(f, "duplicate tag: `{value}`"),
            Self::InvalidTimestamps {
                created_at,
                updated_at,
            } => write!(
                f,
                "updated_at ({updated_at}) must not be earlier than created_at ({created_at})"
            ),
        }
    }
}

impl Error for EntryValidationError {}

/// How the author felt when writing an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Excited,
    Neutral,
    Sad,
    Stressed,
}

impl Mood {
    /// Picker order used by editors.
    pub const ALL: [Mood; 5] = [
        Mood::Happy,
        Mood::Excited,
        Mood::Neutral,
        Mood::Sad,
        Mood::Stressed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Excited => "excited",
            Mood::Neutral => "neutral",
            Mood::Sad => "sad",
            Mood::Stressed => "stressed",
        }
    }
}

impl Display for Mood {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mood {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "happy" => Ok(Mood::Happy),
            "excited" => Ok(Mood::Excited),
            "neutral" => Ok(Mood::Neutral),
            "sad" => Ok(Mood::Sad),
            "stressed" => Ok(Mood::Stressed),
            other => Err(format!(
                "unknown mood `{other}`; expected happy|excited|neutral|sad|stressed"
            )),
        }
    }
}

/// Ordered set of free-text tags.
///
/// Tags compare exactly (case-sensitive) after trimming.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct TagSet(Vec<String>);

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a tag, returning the stored (trimmed) value.
    pub fn insert(&mut self, tag: &str) -> Result<&str, EntryValidationError> {
        let trimmed = tag.trim();
        if trimmed.is_empty() {
            return Err(EntryValidationError::InvalidTag(tag.to_string()));
        }
        if self.contains(trimmed) {
            return Err(EntryValidationError::DuplicateTag(trimmed.to_string()));
        }
        self.0.push(trimmed.to_string());
        Ok(self.0[self.0.len() - 1].as_str())
    }

    /// Removes a tag; returns whether it was present.
    pub fn remove(&mut self, tag: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|existing| existing != tag.trim());
        self.0.len() != before
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.iter().any(|existing| existing == tag)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl TryFrom<Vec<String>> for TagSet {
    type Error = EntryValidationError;

    fn try_from(value: Vec<String>) -> Result<Self, Self::Error> {
        let mut tags = TagSet::new();
        for tag in &value {
            tags.insert(tag)?;
        }
        Ok(tags)
    }
}

impl From<TagSet> for Vec<String> {
    fn from(value: TagSet) -> Self {
        value.0
    }
}

/// One journal record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: EntryId,
    pub title: String,
    pub content: String,
    /// Calendar day the entry is about.
    pub date: NaiveDate,
    pub mood: Option<Mood>,
    pub tags: TagSet,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Unix epoch milliseconds.
    pub updated_at: i64,
}

impl JournalEntry {
    /// Checks record-level invariants.
    pub fn validate(&self) -> Result<(), EntryValidationError> {
        validate_title_and_content(&self.title, &self.content)?;
        if self.updated_at < self.created_at {
            return Err(EntryValidationError::InvalidTimestamps {
                created_at: self.created_at,
                updated_at: self.updated_at,
            });
        }
        Ok(())
    }
}

/// Input for creating a journal entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewEntry {
    pub title: String,
    pub content: String,
    /// Defaults to the clock's current day when `None`.
    pub date: Option<NaiveDate>,
    pub mood: Option<Mood>,
    pub tags: TagSet,
}

impl NewEntry {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), EntryValidationError> {
        validate_title_and_content(&self.title, &self.content)
    }
}

pub(crate) fn validate_title_and_content(
    title: &str,
    content: &str,
) -> Result<(), EntryValidationError> {
    if title.trim().is_empty() {
        return Err(EntryValidationError::EmptyTitle);
    }
    if content.trim().is_empty() {
        return Err(EntryValidationError::EmptyContent);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{EntryValidationError, Mood, NewEntry, TagSet};

    #[test]
    fn tag_set_trims_and_rejects_blank_or_duplicate() {
        let mut tags = TagSet::new();
        assert_eq!(tags.insert("  work ").unwrap(), "work");
        assert_eq!(
            tags.insert("work").unwrap_err(),
            EntryValidationError::DuplicateTag("work".to_string())
        );
        assert!(matches!(
            tags.insert("   ").unwrap_err(),
            EntryValidationError::InvalidTag(_)
        ));
        tags.insert("Work").unwrap();
        assert_eq!(tags.as_slice(), ["work", "Work"]);
    }

    #[test]
    fn tag_set_remove_reports_presence() {
        let mut tags = TagSet::try_from(vec!["a".to_string(), "b".to_string()]).unwrap();
        assert!(tags.remove("a"));
        assert!(!tags.remove("a"));
        assert_eq!(tags.iter().collect::<Vec<_>>(), vec!["b"]);
    }

    #[test]
    fn mood_parses_case_insensitively() {
        assert_eq!(" Happy ".parse::<Mood>().unwrap(), Mood::Happy);
        assert!("grumpy".parse::<Mood>().is_err());
    }

    #[test]
    fn new_entry_requires_title_then_content() {
        assert_eq!(
            NewEntry::new(" ", "body").validate().unwrap_err(),
            EntryValidationError::EmptyTitle
        );
        assert_eq!(
            NewEntry::new("title", "\n\t").validate().unwrap_err(),
            EntryValidationError::EmptyContent
        );
        assert!(NewEntry::new("title", "body").validate().is_ok());
    }
}
