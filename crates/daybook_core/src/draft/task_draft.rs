//! Task editor state.

use crate::model::task::{
    validate_title_and_description, NewTask, Task, TaskId, TaskPatch, TaskPriority, TaskStatus,
    TaskValidationError,
};
use crate::model::user::User;
use chrono::NaiveDate;

/// What a task draft produces on submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskSubmission {
    Create(NewTask),
    Update { id: TaskId, patch: TaskPatch },
}

/// Task create/edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    editing: Option<TaskId>,
    pub title: String,
    pub description: String,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    pub due_date: Option<NaiveDate>,
    assigned_to: Vec<User>,
}

impl TaskDraft {
    /// Blank form: priority `medium`, status `todo`, nobody assigned.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_task(task: &Task) -> Self {
        Self {
            editing: Some(task.id),
            title: task.title.clone(),
            description: task.description.clone(),
            priority: task.priority,
            status: task.status,
            due_date: task.due_date,
            assigned_to: task.assigned_to.clone(),
        }
    }

    pub fn is_edit(&self) -> bool {
        self.editing.is_some()
    }

    pub fn assigned_to(&self) -> &[User] {
        &self.assigned_to
    }

    /// Assigns `user`, or unassigns them if already assigned.
    ///
    /// Returns whether the user is assigned afterwards.
    pub fn toggle_assignee(&mut self, user: &User) -> bool {
        if self.assigned_to.iter().any(|assignee| assignee.id == user.id) {
            self.assigned_to.retain(|assignee| assignee.id != user.id);
            false
        } else {
            self.assigned_to.push(user.clone());
            true
        }
    }

    pub fn can_save(&self) -> bool {
        validate_title_and_description(&self.title, &self.description).is_ok()
    }

    pub fn submit(&self) -> Result<TaskSubmission, TaskValidationError> {
        validate_title_and_description(&self.title, &self.description)?;
        let title = self.title.trim().to_string();
        let description = self.description.trim().to_string();

        Ok(match self.editing {
            Some(id) => TaskSubmission::Update {
                id,
                patch: TaskPatch {
                    title: Some(title),
                    description: Some(description),
                    status: Some(self.status),
                    priority: Some(self.priority),
                    assigned_to: Some(self.assigned_to.clone()),
                    due_date: Some(self.due_date),
                },
            },
            None => TaskSubmission::Create(NewTask {
                title,
                description,
                status: Some(self.status),
                priority: self.priority,
                assigned_to: self.assigned_to.clone(),
                due_date: self.due_date,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{TaskDraft, TaskSubmission};
    use crate::model::task::{TaskPriority, TaskStatus, TaskValidationError};
    use crate::model::user::User;

    #[test]
    fn blank_draft_uses_board_defaults() {
        let draft = TaskDraft::new();
        assert_eq!(draft.priority, TaskPriority::Medium);
        assert_eq!(draft.status, TaskStatus::Todo);
        assert!(!draft.can_save());
        assert_eq!(
            draft.submit().unwrap_err(),
            TaskValidationError::EmptyTitle
        );
    }

    #[test]
    fn toggle_assignee_adds_then_removes() {
        let user = User::new("Sarah Chen", "sarah@example.com", "").unwrap();
        let mut draft = TaskDraft::new();
        assert!(draft.toggle_assignee(&user));
        assert_eq!(draft.assigned_to().len(), 1);
        assert!(!draft.toggle_assignee(&user));
        assert!(draft.assigned_to().is_empty());
    }

    #[test]
    fn new_draft_submits_create() {
        let mut draft = TaskDraft::new();
        draft.title = "Spec".to_string();
        draft.description = " Write spec ".to_string();
        draft.priority = TaskPriority::Urgent;
        match draft.submit().unwrap() {
            TaskSubmission::Create(input) => {
                assert_eq!(input.description, "Write spec");
                assert_eq!(input.priority, TaskPriority::Urgent);
                assert_eq!(input.status, Some(TaskStatus::Todo));
            }
            other => panic!("expected create submission, got {other:?}"),
        }
    }
}
