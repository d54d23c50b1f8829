//! Dashboard summary projection.
//!
//! # Responsibility
//! - Summarize journal and task state for the landing view.
//!
//! # Invariants
//! - Computed on demand from current records; never cached.

use crate::model::journal::{EntryId, JournalEntry};
use crate::model::task::{Task, TaskId, TaskPriority, TaskStatus};
use crate::service::journal_service::derive_text_preview;
use chrono::NaiveDate;
use serde::Serialize;

/// Short view of one journal entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryDigest {
    pub id: EntryId,
    pub title: String,
    pub date: NaiveDate,
    pub preview: String,
}

/// Short view of one upcoming task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskDigest {
    pub id: TaskId,
    pub title: String,
    pub due_date: Option<NaiveDate>,
    pub priority: TaskPriority,
    /// Name of the first assignee, if any.
    pub assignee: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub journal_entries: usize,
    pub tasks_completed: usize,
    pub team_members: usize,
    /// Completed tasks as a whole percentage of all tasks; 0 without tasks.
    pub completion_percent: u8,
    pub recent_entries: Vec<EntryDigest>,
    pub upcoming_tasks: Vec<TaskDigest>,
}

impl DashboardSummary {
    /// Builds a summary from already-selected recent entries and upcoming
    /// tasks, plus the full task list for counts.
    pub fn build(
        journal_entries: usize,
        all_tasks: &[Task],
        team_members: usize,
        recent_entries: &[JournalEntry],
        upcoming_tasks: &[Task],
    ) -> Self {
        let tasks_completed = all_tasks
            .iter()
            .filter(|task| task.status == TaskStatus::Completed)
            .count();

        Self {
            journal_entries,
            tasks_completed,
            team_members,
            completion_percent: completion_percent(tasks_completed, all_tasks.len()),
            recent_entries: recent_entries
                .iter()
                .map(|entry| EntryDigest {
                    id: entry.id,
                    title: entry.title.clone(),
                    date: entry.date,
                    preview: derive_text_preview(&entry.content),
                })
                .collect(),
            upcoming_tasks: upcoming_tasks
                .iter()
                .map(|task| TaskDigest {
                    id: task.id,
                    title: task.title.clone(),
                    due_date: task.due_date,
                    priority: task.priority,
                    assignee: task.assigned_to.first().map(|user| user.name.clone()),
                })
                .collect(),
        }
    }
}

fn completion_percent(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    // completed <= total, so the result is within 0..=100
    u8::try_from(completed * 100 / total).unwrap_or(100)
}
