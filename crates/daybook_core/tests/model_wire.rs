use daybook_core::seed::demo_data;
use daybook_core::{JournalEntry, Mood, TagSet, Task, TaskPriority, TaskStatus};
use serde_json::{json, Value};

#[test]
fn enums_use_lowercase_wire_names() {
    assert_eq!(
        serde_json::to_value(TaskStatus::InProgress).unwrap(),
        json!("in-progress")
    );
    assert_eq!(serde_json::to_value(TaskPriority::Urgent).unwrap(), json!("urgent"));
    assert_eq!(serde_json::to_value(Mood::Stressed).unwrap(), json!("stressed"));
    assert_eq!(
        serde_json::from_value::<TaskStatus>(json!("review")).unwrap(),
        TaskStatus::Review
    );
    assert!(serde_json::from_value::<TaskStatus>(json!("in_progress")).is_err());
}

#[test]
fn tag_set_is_a_plain_array_and_rejects_duplicates() {
    let tags: TagSet = serde_json::from_value(json!(["a", "b"])).unwrap();
    assert_eq!(serde_json::to_value(&tags).unwrap(), json!(["a", "b"]));
    assert!(serde_json::from_value::<TagSet>(json!(["a", "a"])).is_err());
    assert!(serde_json::from_value::<TagSet>(json!(["  "])).is_err());
}

#[test]
fn records_serialize_with_expected_fields() {
    let seed = demo_data().unwrap();
    let entry: Value = serde_json::to_value(&seed.entries[0]).unwrap();
    assert_eq!(entry["title"], json!("Morning Reflections"));
    assert_eq!(entry["date"], json!("2024-01-15"));
    assert_eq!(entry["mood"], json!("happy"));
    assert_eq!(entry["tags"], json!(["gratitude", "mindfulness", "morning"]));
    assert!(entry["created_at"].is_i64());

    let task: Value = serde_json::to_value(&seed.tasks[0]).unwrap();
    assert_eq!(task["status"], json!("in-progress"));
    assert_eq!(task["priority"], json!("high"));
    assert_eq!(task["due_date"], json!("2024-01-20"));
    assert_eq!(task["assigned_to"][0]["email"], json!("sarah@example.com"));
    assert_eq!(task["comments"].as_array().unwrap().len(), 1);

    let entry_back: JournalEntry = serde_json::from_value(entry).unwrap();
    assert_eq!(entry_back, seed.entries[0]);
    let task_back: Task = serde_json::from_value(task).unwrap();
    assert_eq!(task_back, seed.tasks[0]);
}
