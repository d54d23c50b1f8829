//! Task board domain model.
//!
//! # Responsibility
//! - Define tasks, their comments, and the closed status/priority sets.
//! - Define the status transition policy used by every status change.
//!
//! # Invariants
//! - Every task has exactly one `TaskStatus`; it is the only column key.
//! - Comments are append-only and kept in append order.
//! - Assignees are unique by user id.

use crate::model::user::{User, UserId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Stable identifier for a task.
pub type TaskId = Uuid;
/// Stable identifier for a task comment.
pub type CommentId = Uuid;

/// Validation failures for task writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    EmptyTitle,
    EmptyDescription,
    EmptyComment,
    /// Same user listed twice in `assigned_to`.
    DuplicateAssignee(UserId),
    /// Status change refused by the active policy.
    TransitionNotAllowed { from: TaskStatus, to: TaskStatus },
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "task title must not be blank"),
            Self::EmptyDescription => write!(f, "task description must not be blank"),
            Self::EmptyComment => write!(f, "comment must not be blank"),
            Self::DuplicateAssignee(id) => write!(f, "user {id} is assigned twice"),
            Self::TransitionNotAllowed { from, to } => {
                write!(f, "cannot move task from `{from}` to `{to}`")
            }
        }
    }
}

impl Error for TaskValidationError {}

/// Board column a task lives in.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Review,
    Completed,
}

impl TaskStatus {
    /// Board order, left to right.
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::Todo,
        TaskStatus::InProgress,
        TaskStatus::Review,
        TaskStatus::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::Review => "review",
            TaskStatus::Completed => "completed",
        }
    }

    /// Column heading.
    pub fn title(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "To Do",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Review => "Review",
            TaskStatus::Completed => "Completed",
        }
    }

    /// Zero-based column position.
    pub fn position(&self) -> usize {
        match self {
            TaskStatus::Todo => 0,
            TaskStatus::InProgress => 1,
            TaskStatus::Review => 2,
            TaskStatus::Completed => 3,
        }
    }
}

impl Display for TaskStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "todo" | "to-do" => Ok(TaskStatus::Todo),
            "in-progress" => Ok(TaskStatus::InProgress),
            "review" => Ok(TaskStatus::Review),
            "completed" | "done" => Ok(TaskStatus::Completed),
            other => Err(format!(
                "unknown status `{other}`; expected todo|in-progress|review|completed"
            )),
        }
    }
}

/// Task urgency.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl TaskPriority {
    pub const ALL: [TaskPriority; 4] = [
        TaskPriority::Low,
        TaskPriority::Medium,
        TaskPriority::High,
        TaskPriority::Urgent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
            TaskPriority::Urgent => "urgent",
        }
    }
}

impl Display for TaskPriority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskPriority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(TaskPriority::Low),
            "medium" => Ok(TaskPriority::Medium),
            "high" => Ok(TaskPriority::High),
            "urgent" => Ok(TaskPriority::Urgent),
            other => Err(format!(
                "unknown priority `{other}`; expected low|medium|high|urgent"
            )),
        }
    }
}

/// Rule set applied to status changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusPolicy {
    /// Any status is reachable from any other in one step.
    #[default]
    Free,
    /// Backward moves of any distance; forward moves by one column only.
    Workflow,
}

impl StatusPolicy {
    /// Checks whether `from -> to` is allowed. Staying put is always allowed.
    pub fn check(&self, from: TaskStatus, to: TaskStatus) -> Result<(), TaskValidationError> {
        match self {
            StatusPolicy::Free => Ok(()),
            StatusPolicy::Workflow => {
                if to.position() <= from.position() + 1 {
                    Ok(())
                } else {
                    Err(TaskValidationError::TransitionNotAllowed { from, to })
                }
            }
        }
    }
}

impl FromStr for StatusPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "free" => Ok(StatusPolicy::Free),
            "workflow" => Ok(StatusPolicy::Workflow),
            other => Err(format!(
                "unknown status policy `{other}`; expected free|workflow"
            )),
        }
    }
}

/// One message in a task's discussion thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskComment {
    pub id: CommentId,
    pub content: String,
    pub author: User,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

/// One unit of tracked work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub assigned_to: Vec<User>,
    pub created_by: User,
    pub due_date: Option<NaiveDate>,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Unix epoch milliseconds.
    pub updated_at: i64,
    pub comments: Vec<TaskComment>,
}

impl Task {
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        validate_title_and_description(&self.title, &self.description)?;
        validate_assignees(&self.assigned_to)
    }

    pub fn is_assigned(&self, user_id: UserId) -> bool {
        self.assigned_to.iter().any(|user| user.id == user_id)
    }

    /// Open task whose due date is before `today`.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.status != TaskStatus::Completed && self.due_date.is_some_and(|due| due < today)
    }
}

/// Input for creating a task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    /// Defaults to `todo` when `None`.
    pub status: Option<TaskStatus>,
    pub priority: TaskPriority,
    pub assigned_to: Vec<User>,
    pub due_date: Option<NaiveDate>,
}

impl NewTask {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), TaskValidationError> {
        validate_title_and_description(&self.title, &self.description)?;
        validate_assignees(&self.assigned_to)
    }
}

/// Partial update for a task. `None` leaves a field untouched.
///
/// `due_date: Some(None)` clears the due date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub assigned_to: Option<Vec<User>>,
    pub due_date: Option<Option<NaiveDate>>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        self == &TaskPatch::default()
    }
}

pub(crate) fn validate_title_and_description(
    title: &str,
    description: &str,
) -> Result<(), TaskValidationError> {
    if title.trim().is_empty() {
        return Err(TaskValidationError::EmptyTitle);
    }
    if description.trim().is_empty() {
        return Err(TaskValidationError::EmptyDescription);
    }
    Ok(())
}

pub(crate) fn validate_assignees(assignees: &[User]) -> Result<(), TaskValidationError> {
    for (index, user) in assignees.iter().enumerate() {
        if assignees[..index].iter().any(|other| other.id == user.id) {
            return Err(TaskValidationError::DuplicateAssignee(user.id));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{StatusPolicy, TaskStatus, TaskValidationError};

    #[test]
    fn free_policy_allows_any_jump() {
        for from in TaskStatus::ALL {
            for to in TaskStatus::ALL {
                assert!(StatusPolicy::Free.check(from, to).is_ok());
            }
        }
    }

    #[test]
    fn workflow_policy_refuses_skip_ahead_only() {
        let policy = StatusPolicy::Workflow;
        assert!(policy
            .check(TaskStatus::Todo, TaskStatus::InProgress)
            .is_ok());
        assert!(policy
            .check(TaskStatus::Completed, TaskStatus::Todo)
            .is_ok());
        assert!(policy.check(TaskStatus::Review, TaskStatus::Review).is_ok());
        assert_eq!(
            policy
                .check(TaskStatus::Todo, TaskStatus::Review)
                .unwrap_err(),
            TaskValidationError::TransitionNotAllowed {
                from: TaskStatus::Todo,
                to: TaskStatus::Review,
            }
        );
    }

    #[test]
    fn status_parses_board_spellings() {
        assert_eq!("in_progress".parse::<TaskStatus>().unwrap(), TaskStatus::InProgress);
        assert_eq!("To-Do".parse::<TaskStatus>().unwrap(), TaskStatus::Todo);
        assert_eq!("done".parse::<TaskStatus>().unwrap(), TaskStatus::Completed);
        assert!("blocked".parse::<TaskStatus>().is_err());
    }
}
