use chrono::NaiveDate;
use daybook_core::clock::FixedClock;
use daybook_core::model::journal::EntryValidationError;
use daybook_core::repo::InMemoryJournalRepository;
use daybook_core::{JournalService, JournalServiceError, Mood, NewEntry, TagSet};
use std::collections::HashSet;
use uuid::Uuid;

const NOW_MS: i64 = 1_705_305_600_000; // 2024-01-15T08:00:00Z

fn service() -> JournalService<InMemoryJournalRepository, FixedClock> {
    JournalService::with_clock(InMemoryJournalRepository::new(), FixedClock::new(NOW_MS))
}

fn tags(values: &[&str]) -> TagSet {
    TagSet::try_from(values.iter().map(|tag| tag.to_string()).collect::<Vec<_>>()).unwrap()
}

#[test]
fn create_assigns_unique_ids_and_equal_stamps() {
    let mut journal = service();
    let mut ids = HashSet::new();
    for index in 0..5 {
        let entry = journal
            .create_entry(NewEntry::new(format!("Entry {index}"), "body"))
            .unwrap();
        assert_eq!(entry.created_at, entry.updated_at);
        assert!(ids.insert(entry.id));
    }
    assert_eq!(journal.entry_count(), 5);
    assert_eq!(journal.list_entries()[0].title, "Entry 4");
}

#[test]
fn create_defaults_date_to_clock_day_and_trims_text() {
    let mut journal = service();
    let entry = journal
        .create_entry(NewEntry {
            mood: Some(Mood::Neutral),
            tags: tags(&["walk"]),
            ..NewEntry::new("  Walk  ", "\n around the lake \n")
        })
        .unwrap();
    assert_eq!(entry.date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
    assert_eq!(entry.title, "Walk");
    assert_eq!(entry.content, "around the lake");
    assert_eq!(entry.mood, Some(Mood::Neutral));
}

#[test]
fn update_preserves_id_and_created_at_and_advances_updated_at() {
    let mut journal = service();
    let created = journal.create_entry(NewEntry::new("Draft", "first")).unwrap();

    let mut edited = created.clone();
    edited.title = "Final".to_string();
    edited.content = "second".to_string();
    edited.tags = tags(&["done"]);
    edited.created_at = 0;
    let updated = journal.update_entry(edited).unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at > created.updated_at);
    assert_eq!(journal.get_entry(created.id).unwrap().title, "Final");
    assert_eq!(journal.entry_count(), 1);

    let again = journal.update_entry(updated.clone()).unwrap();
    assert!(again.updated_at > updated.updated_at);
}

#[test]
fn update_unknown_entry_is_not_found() {
    let mut journal = service();
    let mut entry = journal.create_entry(NewEntry::new("Kept", "body")).unwrap();
    entry.id = Uuid::now_v7();
    assert_eq!(
        journal.update_entry(entry.clone()).unwrap_err(),
        JournalServiceError::EntryNotFound(entry.id)
    );
}

#[test]
fn delete_removes_only_the_target() {
    let mut journal = service();
    let first = journal.create_entry(NewEntry::new("One", "a")).unwrap();
    let second = journal.create_entry(NewEntry::new("Two", "b")).unwrap();
    let third = journal.create_entry(NewEntry::new("Three", "c")).unwrap();

    let removed = journal.delete_entry(second.id).unwrap();
    assert_eq!(removed.id, second.id);

    let remaining: Vec<Uuid> = journal.list_entries().iter().map(|e| e.id).collect();
    assert_eq!(remaining, vec![third.id, first.id]);

    assert_eq!(
        journal.delete_entry(second.id).unwrap_err(),
        JournalServiceError::EntryNotFound(second.id)
    );
}

#[test]
fn blank_title_is_rejected_and_list_is_unchanged() {
    let mut journal = service();
    journal.create_entry(NewEntry::new("Existing", "body")).unwrap();
    let before = journal.list_entries().to_vec();

    let err = journal
        .create_entry(NewEntry::new("", "some content"))
        .unwrap_err();
    assert_eq!(err, JournalServiceError::Invalid(EntryValidationError::EmptyTitle));
    assert_eq!(err.code(), "empty_title");
    assert_eq!(journal.list_entries(), before.as_slice());

    let mut blanked = before[0].clone();
    blanked.content = "   ".to_string();
    assert_eq!(
        journal.update_entry(blanked).unwrap_err(),
        JournalServiceError::Invalid(EntryValidationError::EmptyContent)
    );
    assert_eq!(journal.list_entries(), before.as_slice());
}

#[test]
fn recent_entries_follow_entry_date() {
    let mut journal = service();
    for (title, day) in [("Mid", 10), ("Old", 1), ("New", 20)] {
        journal
            .create_entry(NewEntry {
                date: NaiveDate::from_ymd_opt(2024, 1, day),
                ..NewEntry::new(title, "body")
            })
            .unwrap();
    }
    let titles: Vec<String> = journal
        .recent_entries(2)
        .into_iter()
        .map(|entry| entry.title)
        .collect();
    assert_eq!(titles, vec!["New", "Mid"]);
}

#[test]
fn update_advances_past_stored_stamp_ahead_of_clock() {
    let mut earlier = JournalService::with_clock(
        InMemoryJournalRepository::new(),
        FixedClock::new(NOW_MS + 60_000),
    );
    let stored = earlier.create_entry(NewEntry::new("Ahead", "body")).unwrap();

    let repo = InMemoryJournalRepository::with_records(vec![stored.clone()]).unwrap();
    let mut journal = JournalService::with_clock(repo, FixedClock::new(NOW_MS));

    let mut edited = stored.clone();
    edited.title = "Still ahead".to_string();
    let updated = journal.update_entry(edited).unwrap();
    assert_eq!(updated.created_at, stored.created_at);
    assert!(updated.updated_at > stored.updated_at);
}
