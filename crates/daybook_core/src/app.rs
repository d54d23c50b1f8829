//! Application state owner.
//!
//! # Responsibility
//! - Gather the team directory, the acting user and both services into one
//!   value that front-ends hold and pass around.
//! - Route editor drafts and comments to the right service with the acting
//!   user attached.
//! - Resolve short id handles typed by people into full ids.
//!
//! # Invariants
//! - The acting user is always a member of the team.
//! - `Daybook` is the only owner of the journal and task lists.

use crate::config::AppConfig;
use crate::draft::entry_draft::{EntryDraft, EntrySubmission};
use crate::draft::task_draft::{TaskDraft, TaskSubmission};
use crate::model::journal::{EntryId, JournalEntry};
use crate::model::task::{Task, TaskId};
use crate::model::user::{Team, User, UserValidationError};
use crate::repo::{InMemoryJournalRepository, InMemoryTaskRepository, RepoError};
use crate::seed::{demo_data, demo_team, SeedData};
use crate::service::dashboard::DashboardSummary;
use crate::service::journal_service::{JournalService, JournalServiceError};
use crate::service::task_service::{TaskService, TaskServiceError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Length of the id handle shown to people.
pub const SHORT_ID_LEN: usize = 8;
const MIN_HANDLE_LEN: usize = 4;

/// Errors building or reconfiguring a `Daybook`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DaybookError {
    User(UserValidationError),
    Repo(RepoError),
    /// No team member has this email.
    UnknownUser(String),
    EmptyTeam,
    InvalidSeed(String),
}

impl Display for DaybookError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::UnknownUser(email) => write!(f, "no team member with email `{email}`"),
            Self::EmptyTeam => write!(f, "team must have at least one member"),
            Self::InvalidSeed(message) => write!(f, "invalid seed data: {message}"),
        }
    }
}

impl Error for DaybookError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::User(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<UserValidationError> for DaybookError {
    fn from(value: UserValidationError) -> Self {
        Self::User(value)
    }
}

impl From<RepoError> for DaybookError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Failure to turn a typed handle into one record id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdLookupError {
    /// Handle shorter than the minimum or not hex.
    InvalidHandle(String),
    NotFound(String),
    Ambiguous { handle: String, matches: Vec<String> },
}

impl Display for IdLookupError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidHandle(handle) => write!(
                f,
                "invalid id `{handle}`; use at least {MIN_HANDLE_LEN} hex characters"
            ),
            Self::NotFound(handle) => write!(f, "no record matches id `{handle}`"),
            Self::Ambiguous { handle, matches } => write!(
                f,
                "id `{handle}` is ambiguous; matches {}",
                matches.join(", ")
            ),
        }
    }
}

impl Error for IdLookupError {}

/// Display handle for an id: the last eight hex digits.
///
/// UUIDv7 values minted in the same millisecond share their leading digits,
/// so the random tail is the distinguishing part.
pub fn short_id(id: Uuid) -> String {
    let hex = id.simple().to_string();
    hex[hex.len() - SHORT_ID_LEN..].to_string()
}

/// Resolves a full id or a unique trailing hex handle.
pub fn resolve_id(
    handle: &str,
    ids: impl IntoIterator<Item = Uuid>,
) -> Result<Uuid, IdLookupError> {
    let trimmed = handle.trim();
    if let Ok(id) = Uuid::parse_str(trimmed) {
        return ids
            .into_iter()
            .find(|candidate| *candidate == id)
            .ok_or_else(|| IdLookupError::NotFound(trimmed.to_string()));
    }

    let needle = trimmed.to_ascii_lowercase().replace('-', "");
    if needle.len() < MIN_HANDLE_LEN || !needle.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(IdLookupError::InvalidHandle(trimmed.to_string()));
    }

    let matches: Vec<Uuid> = ids
        .into_iter()
        .filter(|id| id.simple().to_string().ends_with(&needle))
        .collect();
    match matches.as_slice() {
        [] => Err(IdLookupError::NotFound(trimmed.to_string())),
        [only] => Ok(*only),
        many => Err(IdLookupError::Ambiguous {
            handle: trimmed.to_string(),
            matches: many.iter().map(|id| id.to_string()).collect(),
        }),
    }
}

/// Journal + task board application state.
pub struct Daybook {
    config: AppConfig,
    team: Team,
    current_user: User,
    journal: JournalService,
    tasks: TaskService,
}

impl Daybook {
    /// Builds state from config, seeding demo records when enabled.
    ///
    /// Without seeding, the demo team is still installed so there is someone
    /// to act as and assign to.
    pub fn from_config(config: AppConfig) -> Result<Self, DaybookError> {
        let seed = if config.seed_demo_data {
            demo_data()?
        } else {
            SeedData {
                team: demo_team()?,
                entries: Vec::new(),
                tasks: Vec::new(),
            }
        };
        Self::with_records(config, seed.team, seed.entries, seed.tasks)
    }

    /// Builds state from explicit records, kept in the given list order.
    pub fn with_records(
        config: AppConfig,
        team: Team,
        entries: Vec<JournalEntry>,
        tasks: Vec<Task>,
    ) -> Result<Self, DaybookError> {
        let current_user = pick_current_user(&team, config.current_user.as_deref())?;
        let journal = JournalService::new(InMemoryJournalRepository::with_records(entries)?);
        let tasks = TaskService::new(InMemoryTaskRepository::with_records(tasks)?)
            .with_policy(config.board.status_policy);

        info!(
            "event=daybook_init module=app status=ok team={} entries={} tasks={} status_policy={:?}",
            team.len(),
            journal.entry_count(),
            tasks.task_count(),
            tasks.policy()
        );
        Ok(Self {
            config,
            team,
            current_user,
            journal,
            tasks,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn team(&self) -> &Team {
        &self.team
    }

    pub fn current_user(&self) -> &User {
        &self.current_user
    }

    /// Switches the acting user by email.
    pub fn switch_user(&mut self, email: &str) -> Result<&User, DaybookError> {
        self.current_user = pick_current_user(&self.team, Some(email))?;
        info!(
            "event=user_switch module=app status=ok user_id={}",
            self.current_user.id
        );
        Ok(&self.current_user)
    }

    pub fn journal(&self) -> &JournalService {
        &self.journal
    }

    pub fn journal_mut(&mut self) -> &mut JournalService {
        &mut self.journal
    }

    pub fn tasks(&self) -> &TaskService {
        &self.tasks
    }

    pub fn tasks_mut(&mut self) -> &mut TaskService {
        &mut self.tasks
    }

    /// Saves a journal editor form: creates or replaces an entry.
    pub fn save_entry_draft(
        &mut self,
        draft: &EntryDraft,
    ) -> Result<JournalEntry, JournalServiceError> {
        let submission = draft.submit().map_err(|err| {
            let err = JournalServiceError::from(err);
            warn!(
                "event=entry_draft_save module=app status=rejected error_code={} edit={}",
                err.code(),
                draft.is_edit()
            );
            err
        })?;
        match submission {
            EntrySubmission::Create(input) => self.journal.create_entry(input),
            EntrySubmission::Update(entry) => self.journal.update_entry(entry),
        }
    }

    /// Saves a task form. New tasks are created by the acting user.
    pub fn save_task_draft(&mut self, draft: &TaskDraft) -> Result<Task, TaskServiceError> {
        let submission = draft.submit().map_err(|err| {
            let err = TaskServiceError::from(err);
            warn!(
                "event=task_draft_save module=app status=rejected error_code={} edit={}",
                err.code(),
                draft.is_edit()
            );
            err
        })?;
        match submission {
            TaskSubmission::Create(input) => self.tasks.create_task(input, &self.current_user),
            TaskSubmission::Update { id, patch } => self.tasks.update_task(id, patch),
        }
    }

    /// Comments on a task as the acting user.
    pub fn comment(&mut self, task_id: TaskId, content: &str) -> Result<Task, TaskServiceError> {
        self.tasks.add_comment(task_id, &self.current_user, content)
    }

    pub fn dashboard(&self) -> DashboardSummary {
        let limit = self.config.dashboard.recent_limit;
        DashboardSummary::build(
            self.journal.entry_count(),
            self.tasks.list_tasks(),
            self.team.len(),
            &self.journal.recent_entries(limit),
            &self.tasks.upcoming_tasks(limit),
        )
    }

    pub fn resolve_entry_id(&self, handle: &str) -> Result<EntryId, IdLookupError> {
        resolve_id(handle, self.journal.list_entries().iter().map(|entry| entry.id))
    }

    pub fn resolve_task_id(&self, handle: &str) -> Result<TaskId, IdLookupError> {
        resolve_id(handle, self.tasks.list_tasks().iter().map(|task| task.id))
    }
}

fn pick_current_user(team: &Team, email: Option<&str>) -> Result<User, DaybookError> {
    match email {
        Some(email) => team
            .find_by_email(email)
            .cloned()
            .ok_or_else(|| DaybookError::UnknownUser(email.trim().to_string())),
        None => team.members().first().cloned().ok_or(DaybookError::EmptyTeam),
    }
}

#[cfg(test)]
mod tests {
    use super::{resolve_id, short_id, IdLookupError};
    use uuid::Uuid;

    #[test]
    fn short_id_is_trailing_hex() {
        let id = Uuid::parse_str("018d0a4e-1111-7222-8333-444455556666").unwrap();
        assert_eq!(short_id(id), "55556666");
    }

    #[test]
    fn resolve_accepts_full_id_and_unique_suffix() {
        let a = Uuid::parse_str("018d0a4e-1111-7222-8333-4444aaaa0001").unwrap();
        let b = Uuid::parse_str("018d0a4e-1111-7222-8333-4444bbbb0001").unwrap();
        assert_eq!(resolve_id(&a.to_string(), [a, b]).unwrap(), a);
        assert_eq!(resolve_id("AAAA0001", [a, b]).unwrap(), a);
        assert!(matches!(
            resolve_id("0001", [a, b]).unwrap_err(),
            IdLookupError::Ambiguous { .. }
        ));
        assert_eq!(
            resolve_id("cccc", [a, b]).unwrap_err(),
            IdLookupError::NotFound("cccc".to_string())
        );
        assert!(matches!(
            resolve_id("xyz!", [a, b]).unwrap_err(),
            IdLookupError::InvalidHandle(_)
        ));
    }
}
