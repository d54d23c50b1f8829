//! Core domain logic for Daybook, a personal journal plus team task board.
//! This crate is the single source of truth for business invariants.

pub mod app;
pub mod clock;
pub mod config;
pub mod draft;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod seed;
pub mod service;

pub use app::{resolve_id, short_id, Daybook, DaybookError, IdLookupError};
pub use config::{AppConfig, ConfigError};
pub use draft::entry_draft::EntryDraft;
pub use draft::task_draft::TaskDraft;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::journal::{EntryId, JournalEntry, Mood, NewEntry, TagSet};
pub use model::task::{
    NewTask, StatusPolicy, Task, TaskComment, TaskId, TaskPatch, TaskPriority, TaskStatus,
};
pub use model::user::{Team, User, UserId};
pub use repo::{ListRepository, RepoError, RepoResult};
pub use service::board::{Board, BoardColumn};
pub use service::dashboard::DashboardSummary;
pub use service::journal_service::{JournalService, JournalServiceError};
pub use service::task_service::{TaskService, TaskServiceError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
