//! Journal entry editor state.

use crate::model::journal::{
    validate_title_and_content, EntryValidationError, JournalEntry, Mood, NewEntry, TagSet,
};
use chrono::NaiveDate;

/// What an entry draft produces on submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntrySubmission {
    Create(NewEntry),
    /// Full replacement for an existing entry.
    Update(JournalEntry),
}

/// Journal editor form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryDraft {
    original: Option<JournalEntry>,
    pub title: String,
    pub content: String,
    pub mood: Option<Mood>,
    /// `None` keeps the original date (or today for a new entry).
    pub date: Option<NaiveDate>,
    /// Pending text of the tag input box.
    pub tag_input: String,
    tags: TagSet,
}

impl EntryDraft {
    /// Blank form for a new entry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Form pre-filled from an existing entry.
    pub fn from_entry(entry: &JournalEntry) -> Self {
        Self {
            original: Some(entry.clone()),
            title: entry.title.clone(),
            content: entry.content.clone(),
            mood: entry.mood,
            date: None,
            tag_input: String::new(),
            tags: entry.tags.clone(),
        }
    }

    pub fn is_edit(&self) -> bool {
        self.original.is_some()
    }

    pub fn tags(&self) -> &TagSet {
        &self.tags
    }

    /// Commits `tag_input` as a tag and clears the input.
    ///
    /// On rejection (blank or duplicate) the input is kept for correction.
    pub fn add_tag(&mut self) -> Result<(), EntryValidationError> {
        self.tags.insert(&self.tag_input)?;
        self.tag_input.clear();
        Ok(())
    }

    pub fn remove_tag(&mut self, tag: &str) -> bool {
        self.tags.remove(tag)
    }

    /// Save is enabled only when title and content are non-blank.
    pub fn can_save(&self) -> bool {
        validate_title_and_content(&self.title, &self.content).is_ok()
    }

    pub fn submit(&self) -> Result<EntrySubmission, EntryValidationError> {
        validate_title_and_content(&self.title, &self.content)?;
        let title = self.title.trim().to_string();
        let content = self.content.trim().to_string();

        Ok(match &self.original {
            Some(original) => EntrySubmission::Update(JournalEntry {
                title,
                content,
                date: self.date.unwrap_or(original.date),
                mood: self.mood,
                tags: self.tags.clone(),
                ..original.clone()
            }),
            None => EntrySubmission::Create(NewEntry {
                title,
                content,
                date: self.date,
                mood: self.mood,
                tags: self.tags.clone(),
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{EntryDraft, EntrySubmission};
    use crate::model::journal::{EntryValidationError, Mood};

    #[test]
    fn blank_draft_cannot_save() {
        let mut draft = EntryDraft::new();
        assert!(!draft.can_save());
        draft.title = "Title".to_string();
        assert!(!draft.can_save());
        draft.content = "   ".to_string();
        assert!(!draft.can_save());
        assert_eq!(
            draft.submit().unwrap_err(),
            EntryValidationError::EmptyContent
        );
        draft.content = "Body".to_string();
        assert!(draft.can_save());
    }

    #[test]
    fn add_tag_clears_input_only_on_success() {
        let mut draft = EntryDraft::new();
        draft.tag_input = " gratitude ".to_string();
        draft.add_tag().unwrap();
        assert!(draft.tag_input.is_empty());

        draft.tag_input = "gratitude".to_string();
        assert!(draft.add_tag().is_err());
        assert_eq!(draft.tag_input, "gratitude");
        assert_eq!(draft.tags().len(), 1);

        assert!(draft.remove_tag("gratitude"));
        assert!(draft.tags().is_empty());
    }

    #[test]
    fn new_draft_submits_create_with_trimmed_fields() {
        let mut draft = EntryDraft::new();
        draft.title = " Evening ".to_string();
        draft.content = " calm day ".to_string();
        draft.mood = Some(Mood::Neutral);
        match draft.submit().unwrap() {
            EntrySubmission::Create(input) => {
                assert_eq!(input.title, "Evening");
                assert_eq!(input.content, "calm day");
                assert_eq!(input.mood, Some(Mood::Neutral));
                assert_eq!(input.date, None);
            }
            other => panic!("expected create submission, got {other:?}"),
        }
    }
}
