//! Board column projection.
//!
//! # Responsibility
//! - Partition a task list into the four fixed status columns.
//!
//! # Invariants
//! - Grouping is a pure function of the input tasks; columns hold no state
//!   of their own.
//! - Each task appears in exactly one column, the one keyed by its status.
//! - Within a column, tasks keep input order.

use crate::model::task::{Task, TaskId, TaskStatus};

/// One status column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardColumn {
    pub status: TaskStatus,
    pub tasks: Vec<Task>,
}

impl BoardColumn {
    pub fn title(&self) -> &'static str {
        self.status.title()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn contains(&self, id: TaskId) -> bool {
        self.tasks.iter().any(|task| task.id == id)
    }
}

/// Tasks grouped by status, in board order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    columns: [BoardColumn; 4],
}

impl Board {
    pub fn from_tasks<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Self {
        let mut columns = TaskStatus::ALL.map(|status| BoardColumn {
            status,
            tasks: Vec::new(),
        });
        for task in tasks {
            columns[task.status.position()].tasks.push(task.clone());
        }
        Self { columns }
    }

    /// Columns left to right: todo, in-progress, review, completed.
    pub fn columns(&self) -> &[BoardColumn] {
        &self.columns
    }

    pub fn column(&self, status: TaskStatus) -> &BoardColumn {
        &self.columns[status.position()]
    }

    /// Status of the column currently holding `id`.
    pub fn locate(&self, id: TaskId) -> Option<TaskStatus> {
        self.columns
            .iter()
            .find(|column| column.contains(id))
            .map(|column| column.status)
    }

    pub fn task_count(&self) -> usize {
        self.columns.iter().map(BoardColumn::len).sum()
    }
}
