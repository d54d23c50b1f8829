//! Shell command execution against one `Daybook`.

use crate::render;
use crate::shell::{help_text, ShellCommand};
use daybook_core::{
    short_id, Daybook, DaybookError, EntryDraft, IdLookupError, JournalServiceError, TaskDraft,
    TaskServiceError, User,
};
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::Write;

/// Whether the shell keeps reading after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

#[derive(Debug)]
pub enum CommandError {
    Lookup(IdLookupError),
    App(DaybookError),
    Journal(JournalServiceError),
    Task(TaskServiceError),
    Json(serde_json::Error),
    Io(std::io::Error),
}

impl Display for CommandError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lookup(err) => write!(f, "{err}"),
            Self::App(err) => write!(f, "{err}"),
            Self::Journal(err) => write!(f, "{err}"),
            Self::Task(err) => write!(f, "{err}"),
            Self::Json(err) => write!(f, "failed to encode json: {err}"),
            Self::Io(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CommandError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Lookup(err) => Some(err),
            Self::App(err) => Some(err),
            Self::Journal(err) => Some(err),
            Self::Task(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<IdLookupError> for CommandError {
    fn from(value: IdLookupError) -> Self {
        Self::Lookup(value)
    }
}

impl From<DaybookError> for CommandError {
    fn from(value: DaybookError) -> Self {
        Self::App(value)
    }
}

impl From<JournalServiceError> for CommandError {
    fn from(value: JournalServiceError) -> Self {
        Self::Journal(value)
    }
}

impl From<TaskServiceError> for CommandError {
    fn from(value: TaskServiceError) -> Self {
        Self::Task(value)
    }
}

impl From<serde_json::Error> for CommandError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<std::io::Error> for CommandError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Runs one command and writes its output to `out`.
pub fn execute(
    app: &mut Daybook,
    command: ShellCommand,
    out: &mut dyn Write,
) -> Result<Flow, CommandError> {
    match command {
        ShellCommand::Help => write!(out, "{}", help_text())?,
        ShellCommand::Team => write!(out, "{}", render::team(app.team(), app.current_user()))?,
        ShellCommand::User { email } => {
            let user = app.switch_user(&email)?;
            writeln!(out, "acting as {} <{}>", user.name, user.email)?;
        }
        ShellCommand::Dashboard { json } => {
            let summary = app.dashboard();
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&summary)?)?;
            } else {
                write!(out, "{}", render::dashboard(&summary))?;
            }
        }
        ShellCommand::Entries { term } => {
            let entries = app.journal().search(term.as_deref().unwrap_or_default());
            write!(out, "{}", render::entry_list(&entries))?;
        }
        ShellCommand::EntryNew {
            title,
            content,
            mood,
            date,
            tags,
        } => {
            let mut draft = EntryDraft::new();
            draft.title = title;
            draft.content = content;
            draft.mood = mood;
            draft.date = date;
            for tag in tags {
                draft.tag_input = tag;
                draft.add_tag().map_err(JournalServiceError::from)?;
            }
            let entry = app.save_entry_draft(&draft)?;
            writeln!(out, "created entry {}", short_id(entry.id))?;
        }
        ShellCommand::EntryEdit {
            id,
            title,
            content,
            mood,
            clear_mood,
            date,
            add_tags,
            remove_tags,
        } => {
            let id = app.resolve_entry_id(&id)?;
            let entry = app
                .journal()
                .get_entry(id)
                .ok_or(JournalServiceError::EntryNotFound(id))?;
            let mut draft = EntryDraft::from_entry(entry);
            if let Some(title) = title {
                draft.title = title;
            }
            if let Some(content) = content {
                draft.content = content;
            }
            if mood.is_some() {
                draft.mood = mood;
            } else if clear_mood {
                draft.mood = None;
            }
            draft.date = date;
            for tag in &remove_tags {
                draft.remove_tag(tag.trim());
            }
            for tag in add_tags {
                draft.tag_input = tag;
                draft.add_tag().map_err(JournalServiceError::from)?;
            }
            let entry = app.save_entry_draft(&draft)?;
            writeln!(out, "updated entry {}", short_id(entry.id))?;
        }
        ShellCommand::EntryShow { id, json } => {
            let id = app.resolve_entry_id(&id)?;
            let entry = app
                .journal()
                .get_entry(id)
                .ok_or(JournalServiceError::EntryNotFound(id))?;
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(entry)?)?;
            } else {
                write!(out, "{}", render::entry_detail(entry))?;
            }
        }
        ShellCommand::EntryRm { id } => {
            let id = app.resolve_entry_id(&id)?;
            let removed = app.journal_mut().delete_entry(id)?;
            writeln!(out, "deleted entry {}", short_id(removed.id))?;
        }
        ShellCommand::Board { term } => {
            let board = app.tasks().board(term.as_deref().unwrap_or_default());
            write!(out, "{}", render::board(&board))?;
        }
        ShellCommand::TaskNew {
            title,
            description,
            priority,
            status,
            due,
            assignees,
        } => {
            let mut draft = TaskDraft::new();
            draft.title = title;
            draft.description = description;
            if let Some(priority) = priority {
                draft.priority = priority;
            }
            if let Some(status) = status {
                draft.status = status;
            }
            draft.due_date = due;
            for email in &assignees {
                let user = team_member(app, email)?;
                if !draft.assigned_to().contains(&user) {
                    draft.toggle_assignee(&user);
                }
            }
            let task = app.save_task_draft(&draft)?;
            writeln!(out, "created task {}", short_id(task.id))?;
        }
        ShellCommand::TaskEdit {
            id,
            title,
            description,
            priority,
            status,
            due,
            clear_due,
        } => {
            let id = app.resolve_task_id(&id)?;
            let task = app
                .tasks()
                .get_task(id)
                .ok_or(TaskServiceError::TaskNotFound(id))?;
            let mut draft = TaskDraft::from_task(task);
            if let Some(title) = title {
                draft.title = title;
            }
            if let Some(description) = description {
                draft.description = description;
            }
            if let Some(priority) = priority {
                draft.priority = priority;
            }
            if let Some(status) = status {
                draft.status = status;
            }
            if due.is_some() {
                draft.due_date = due;
            } else if clear_due {
                draft.due_date = None;
            }
            let task = app.save_task_draft(&draft)?;
            writeln!(out, "updated task {}", short_id(task.id))?;
        }
        ShellCommand::TaskShow { id, json } => {
            let id = app.resolve_task_id(&id)?;
            let task = app
                .tasks()
                .get_task(id)
                .ok_or(TaskServiceError::TaskNotFound(id))?;
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(task)?)?;
            } else {
                write!(out, "{}", render::task_detail(task))?;
            }
        }
        ShellCommand::TaskMove { id, status } => {
            let id = app.resolve_task_id(&id)?;
            let task = app.tasks_mut().move_task(id, status)?;
            writeln!(out, "moved task {} to {}", short_id(task.id), task.status.title())?;
        }
        ShellCommand::TaskAssign { id, email } => {
            let id = app.resolve_task_id(&id)?;
            let user = team_member(app, &email)?;
            let task = app.tasks_mut().toggle_assignee(id, &user)?;
            let verb = if task.is_assigned(user.id) {
                "assigned"
            } else {
                "unassigned"
            };
            writeln!(out, "{verb} {} on task {}", user.name, short_id(task.id))?;
        }
        ShellCommand::TaskComment { id, text } => {
            let id = app.resolve_task_id(&id)?;
            let task = app.comment(id, &text.join(" "))?;
            writeln!(
                out,
                "commented on task {} ({} comment(s))",
                short_id(task.id),
                task.comments.len()
            )?;
        }
        ShellCommand::TaskRm { id } => {
            let id = app.resolve_task_id(&id)?;
            let removed = app.tasks_mut().delete_task(id)?;
            writeln!(out, "deleted task {}", short_id(removed.id))?;
        }
        ShellCommand::Quit => {
            debug!("event=shell_quit module=cli status=ok");
            return Ok(Flow::Quit);
        }
    }
    Ok(Flow::Continue)
}

fn team_member(app: &Daybook, email: &str) -> Result<User, DaybookError> {
    app.team()
        .find_by_email(email)
        .cloned()
        .ok_or_else(|| DaybookError::UnknownUser(email.trim().to_string()))
}
