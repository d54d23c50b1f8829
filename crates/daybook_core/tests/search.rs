use daybook_core::clock::FixedClock;
use daybook_core::repo::{InMemoryJournalRepository, InMemoryTaskRepository};
use daybook_core::search::matcher::SearchTerm;
use daybook_core::{JournalService, NewEntry, NewTask, TagSet, TaskService, User};

const NOW_MS: i64 = 1_705_305_600_000;

fn journal() -> JournalService<InMemoryJournalRepository, FixedClock> {
    let mut journal =
        JournalService::with_clock(InMemoryJournalRepository::new(), FixedClock::new(NOW_MS));
    for (title, content, tags) in [
        ("Morning Reflections", "gratitude and sun", vec!["Mindfulness"]),
        ("Project Milestone", "phase one shipped", vec!["work", "teamwork"]),
        ("Challenging Day", "setbacks and lessons", vec![]),
    ] {
        journal
            .create_entry(NewEntry {
                tags: TagSet::try_from(
                    tags.into_iter().map(str::to_string).collect::<Vec<_>>(),
                )
                .unwrap(),
                ..NewEntry::new(title, content)
            })
            .unwrap();
    }
    journal
}

fn titles<T>(records: &[T], title: impl Fn(&T) -> &str) -> Vec<String> {
    records.iter().map(|r| title(r).to_string()).collect()
}

#[test]
fn empty_term_matches_everything_in_list_order() {
    let journal = journal();
    assert_eq!(journal.search(""), journal.list_entries());
}

#[test]
fn journal_search_is_case_insensitive_over_title_content_and_tags() {
    let journal = journal();
    assert_eq!(
        titles(&journal.search("MILESTONE"), |e| e.title.as_str()),
        vec!["Project Milestone"]
    );
    assert_eq!(
        titles(&journal.search("lessons"), |e| e.title.as_str()),
        vec!["Challenging Day"]
    );
    assert_eq!(
        titles(&journal.search("mindful"), |e| e.title.as_str()),
        vec!["Morning Reflections"]
    );
    assert!(journal.search("nothing like this").is_empty());
}

#[test]
fn search_filtering_is_idempotent() {
    let journal = journal();
    let term = SearchTerm::new("work");
    let once = term.filter(journal.list_entries());
    let twice = term.filter(&once);
    assert_eq!(once, twice);
}

#[test]
fn term_is_not_trimmed() {
    let journal = journal();
    assert_eq!(journal.search(" sun").len(), 1);
    assert!(journal.search("sun ").is_empty());
}

#[test]
fn task_search_covers_title_and_description_but_not_comments() {
    let alex = User::new("Alex Johnson", "alex@example.com", "").unwrap();
    let mut tasks = TaskService::with_clock(InMemoryTaskRepository::new(), FixedClock::new(NOW_MS));
    let review = tasks
        .create_task(NewTask::new("Code Review", "Check the auth flow"), &alex)
        .unwrap();
    tasks
        .create_task(NewTask::new("Migration", "Move user data"), &alex)
        .unwrap();
    tasks
        .add_comment(review.id, &alex, "found a security issue")
        .unwrap();

    assert_eq!(titles(&tasks.search("AUTH"), |t| t.title.as_str()), vec!["Code Review"]);
    assert_eq!(titles(&tasks.search("user"), |t| t.title.as_str()), vec!["Migration"]);
    assert!(tasks.search("security").is_empty());

    let board = tasks.board("migration");
    assert_eq!(board.task_count(), 1);
}
