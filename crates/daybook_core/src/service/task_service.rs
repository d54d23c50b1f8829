//! Task board use-case service.
//!
//! # Responsibility
//! - Own the task list and every mutation path into it.
//! - Apply the configured `StatusPolicy` to every status change, whether it
//!   comes from a column move or from an edit form.
//! - Append comments authored by the acting user.
//!
//! # Invariants
//! - New tasks are prepended with status `todo` unless given, and no comments.
//! - `id`, `created_by`, `created_at` and existing comments never change
//!   after creation.
//! - Every successful mutation strictly advances `updated_at`.
//! - Rejected calls leave the list unchanged.

use crate::clock::{Clock, Stamper, SystemClock};
use crate::model::task::{
    validate_title_and_description, NewTask, StatusPolicy, Task, TaskComment, TaskId, TaskPatch,
    TaskStatus, TaskValidationError,
};
use crate::model::user::User;
use crate::repo::{InMemoryTaskRepository, ListRepository, RepoError};
use crate::search::matcher::SearchTerm;
use crate::service::board::Board;
use chrono::NaiveDate;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Service error for task use-cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskServiceError {
    /// Input failed validation or policy; nothing was written.
    Invalid(TaskValidationError),
    TaskNotFound(TaskId),
    Repo(RepoError),
}

impl TaskServiceError {
    /// Stable short code for log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Invalid(TaskValidationError::EmptyTitle) => "empty_title",
            Self::Invalid(TaskValidationError::EmptyDescription) => "empty_description",
            Self::Invalid(TaskValidationError::EmptyComment) => "empty_comment",
            Self::Invalid(TaskValidationError::DuplicateAssignee(_)) => "duplicate_assignee",
            Self::Invalid(TaskValidationError::TransitionNotAllowed { .. }) => {
                "transition_not_allowed"
            }
            Self::TaskNotFound(_) => "not_found",
            Self::Repo(_) => "repo_error",
        }
    }
}

impl Display for TaskServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Invalid(err) => write!(f, "{err}"),
            Self::TaskNotFound(id) => write!(f, "task not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TaskServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Invalid(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::TaskNotFound(_) => None,
        }
    }
}

impl From<TaskValidationError> for TaskServiceError {
    fn from(value: TaskValidationError) -> Self {
        Self::Invalid(value)
    }
}

impl From<RepoError> for TaskServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound { id, .. } => Self::TaskNotFound(id),
            RepoError::InvalidTask(err) => Self::Invalid(err),
            other => Self::Repo(other),
        }
    }
}

/// Task board state owner.
pub struct TaskService<R = InMemoryTaskRepository, C = SystemClock>
where
    R: ListRepository<Task>,
    C: Clock,
{
    repo: R,
    stamper: Stamper<C>,
    policy: StatusPolicy,
}

impl<R: ListRepository<Task>> TaskService<R, SystemClock> {
    /// Creates a service with the wall clock and the permissive status policy.
    pub fn new(repo: R) -> Self {
        Self::with_clock(repo, SystemClock)
    }
}

impl<R: ListRepository<Task>, C: Clock> TaskService<R, C> {
    pub fn with_clock(repo: R, clock: C) -> Self {
        Self {
            repo,
            stamper: Stamper::new(clock),
            policy: StatusPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: StatusPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> StatusPolicy {
        self.policy
    }

    /// Creates a task owned by `creator` and prepends it to the list.
    pub fn create_task(
        &mut self,
        input: NewTask,
        creator: &User,
    ) -> Result<Task, TaskServiceError> {
        if let Err(err) = input.validate() {
            return Err(self.rejected("task_create", None, err.into()));
        }

        let now = self.stamper.next();
        let task = Task {
            id: Uuid::now_v7(),
            title: input.title.trim().to_string(),
            description: input.description.trim().to_string(),
            status: input.status.unwrap_or(TaskStatus::Todo),
            priority: input.priority,
            assigned_to: input.assigned_to,
            created_by: creator.clone(),
            due_date: input.due_date,
            created_at: now,
            updated_at: now,
            comments: Vec::new(),
        };
        self.repo.insert_front(task.clone())?;

        info!(
            "event=task_create module=tasks status=ok task_id={} task_status={} priority={} assignees={} tasks={}",
            task.id,
            task.status,
            task.priority,
            task.assigned_to.len(),
            self.repo.len()
        );
        Ok(task)
    }

    /// Merges `patch` into the task. A status change is checked against the
    /// active policy.
    pub fn update_task(&mut self, id: TaskId, patch: TaskPatch) -> Result<Task, TaskServiceError> {
        let mut task = self.load("task_update", id)?;

        if let Some(title) = patch.title {
            task.title = title.trim().to_string();
        }
        if let Some(description) = patch.description {
            task.description = description.trim().to_string();
        }
        if let Err(err) = validate_title_and_description(&task.title, &task.description) {
            return Err(self.rejected("task_update", Some(id), err.into()));
        }
        if let Some(status) = patch.status {
            if let Err(err) = self.policy.check(task.status, status) {
                return Err(self.rejected("task_update", Some(id), err.into()));
            }
            task.status = status;
        }
        if let Some(priority) = patch.priority {
            task.priority = priority;
        }
        if let Some(assigned_to) = patch.assigned_to {
            task.assigned_to = assigned_to;
        }
        if let Some(due_date) = patch.due_date {
            task.due_date = due_date;
        }

        let task = self.store("task_update", task)?;
        info!(
            "event=task_update module=tasks status=ok task_id={} task_status={} priority={}",
            task.id, task.status, task.priority
        );
        Ok(task)
    }

    /// Moves a task to `status`.
    pub fn set_status(&mut self, id: TaskId, status: TaskStatus) -> Result<Task, TaskServiceError> {
        let mut task = self.load("task_status", id)?;
        let from = task.status;
        if let Err(err) = self.policy.check(from, status) {
            return Err(self.rejected("task_status", Some(id), err.into()));
        }
        task.status = status;
        let task = self.store("task_status", task)?;
        info!(
            "event=task_status module=tasks status=ok task_id={} from={} to={}",
            id, from, status
        );
        Ok(task)
    }

    /// Drop handler for the board: dropping a card on a column is exactly a
    /// status change.
    pub fn move_task(&mut self, id: TaskId, column: TaskStatus) -> Result<Task, TaskServiceError> {
        self.set_status(id, column)
    }

    /// Appends a comment by `author`. Content is stored trimmed.
    pub fn add_comment(
        &mut self,
        task_id: TaskId,
        author: &User,
        content: &str,
    ) -> Result<Task, TaskServiceError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(self.rejected(
                "task_comment",
                Some(task_id),
                TaskValidationError::EmptyComment.into(),
            ));
        }
        let mut task = self.load("task_comment", task_id)?;
        let now = self.stamper.next_after(task.updated_at);
        task.comments.push(TaskComment {
            id: Uuid::now_v7(),
            content: content.to_string(),
            author: author.clone(),
            created_at: now,
        });
        task.updated_at = now;
        self.repo.replace(task.clone())?;

        info!(
            "event=task_comment module=tasks status=ok task_id={} comments={}",
            task_id,
            task.comments.len()
        );
        Ok(task)
    }

    /// Adds `user` to the assignees, or removes them if already assigned.
    pub fn toggle_assignee(&mut self, id: TaskId, user: &User) -> Result<Task, TaskServiceError> {
        let mut task = self.load("task_assign", id)?;
        if task.is_assigned(user.id) {
            task.assigned_to.retain(|assignee| assignee.id != user.id);
        } else {
            task.assigned_to.push(user.clone());
        }
        let task = self.store("task_assign", task)?;
        info!(
            "event=task_assign module=tasks status=ok task_id={} assignees={}",
            task.id,
            task.assigned_to.len()
        );
        Ok(task)
    }

    /// Removes a task and returns it.
    pub fn delete_task(&mut self, id: TaskId) -> Result<Task, TaskServiceError> {
        let removed = self.repo.remove(id)?;
        info!(
            "event=task_delete module=tasks status=ok task_id={} tasks={}",
            id,
            self.repo.len()
        );
        Ok(removed)
    }

    /// Tasks whose title or description contains `term` (case-insensitive),
    /// in list order.
    pub fn search(&self, term: &str) -> Vec<Task> {
        SearchTerm::new(term).filter(self.repo.list())
    }

    /// Board of the tasks matching `term`.
    pub fn board(&self, term: &str) -> Board {
        let term = SearchTerm::new(term);
        Board::from_tasks(self.repo.list().iter().filter(|task| term.matches(*task)))
    }

    pub fn get_task(&self, id: TaskId) -> Option<&Task> {
        self.repo.get(id)
    }

    pub fn list_tasks(&self) -> &[Task] {
        self.repo.list()
    }

    pub fn task_count(&self) -> usize {
        self.repo.len()
    }

    pub fn completed_count(&self) -> usize {
        self.repo
            .list()
            .iter()
            .filter(|task| task.status == TaskStatus::Completed)
            .count()
    }

    /// Open tasks with a due date, soonest first, at most `limit`.
    pub fn upcoming_tasks(&self, limit: usize) -> Vec<Task> {
        let mut open: Vec<Task> = self
            .repo
            .list()
            .iter()
            .filter(|task| task.status != TaskStatus::Completed && task.due_date.is_some())
            .cloned()
            .collect();
        open.sort_by_key(|task| task.due_date);
        open.truncate(limit);
        open
    }

    /// Open tasks due before `today`, in list order.
    pub fn overdue_tasks(&self, today: NaiveDate) -> Vec<Task> {
        self.repo
            .list()
            .iter()
            .filter(|task| task.is_overdue(today))
            .cloned()
            .collect()
    }

    fn load(&self, event: &str, id: TaskId) -> Result<Task, TaskServiceError> {
        match self.repo.get(id) {
            Some(task) => Ok(task.clone()),
            None => Err(self.rejected(event, Some(id), TaskServiceError::TaskNotFound(id))),
        }
    }

    fn store(&mut self, event: &str, mut task: Task) -> Result<Task, TaskServiceError> {
        task.updated_at = self.stamper.next_after(task.updated_at);
        if let Err(err) = self.repo.replace(task.clone()) {
            return Err(self.rejected(event, Some(task.id), err.into()));
        }
        Ok(task)
    }

    fn rejected(
        &self,
        event: &str,
        id: Option<TaskId>,
        err: TaskServiceError,
    ) -> TaskServiceError {
        match id {
            Some(id) => warn!(
                "event={} module=tasks status=rejected error_code={} task_id={}",
                event,
                err.code(),
                id
            ),
            None => warn!(
                "event={} module=tasks status=rejected error_code={}",
                event,
                err.code()
            ),
        }
        err
    }
}
