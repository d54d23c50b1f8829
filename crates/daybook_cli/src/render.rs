//! Plain-text views for the shell.

use chrono::DateTime;
use daybook_core::service::dashboard::DashboardSummary;
use daybook_core::service::journal_service::derive_text_preview;
use daybook_core::{short_id, Board, JournalEntry, TagSet, Task, Team, User};
use std::fmt::Write;

const MAX_INLINE_TAGS: usize = 3;
const MAX_INLINE_ASSIGNEES: usize = 3;

/// `a, b, c +2 more`
pub fn tag_summary(tags: &TagSet) -> String {
    let shown: Vec<&str> = tags.iter().take(MAX_INLINE_TAGS).collect();
    let mut line = shown.join(", ");
    if tags.len() > MAX_INLINE_TAGS {
        let _ = write!(line, " +{} more", tags.len() - MAX_INLINE_TAGS);
    }
    line
}

/// `AJ, SC, MT +1`
pub fn assignee_summary(users: &[User]) -> String {
    if users.is_empty() {
        return "unassigned".to_string();
    }
    let shown: Vec<String> = users
        .iter()
        .take(MAX_INLINE_ASSIGNEES)
        .map(User::initials)
        .collect();
    let mut line = shown.join(", ");
    if users.len() > MAX_INLINE_ASSIGNEES {
        let _ = write!(line, " +{}", users.len() - MAX_INLINE_ASSIGNEES);
    }
    line
}

pub fn timestamp(ms: i64) -> String {
    DateTime::from_timestamp_millis(ms)
        .map(|instant| instant.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| ms.to_string())
}

pub fn team(team: &Team, current: &User) -> String {
    let mut out = String::new();
    for member in team.members() {
        let marker = if member.id == current.id { '*' } else { ' ' };
        let _ = writeln!(
            out,
            "{marker} {:<3} {} <{}>",
            member.initials(),
            member.name,
            member.email
        );
    }
    out
}

pub fn entry_list(entries: &[JournalEntry]) -> String {
    if entries.is_empty() {
        return "no journal entries\n".to_string();
    }
    let mut out = String::new();
    for entry in entries {
        let mood = entry.mood.map(|mood| mood.as_str()).unwrap_or("-");
        let _ = writeln!(
            out,
            "{}  {}  {:<8}  {}",
            short_id(entry.id),
            entry.date,
            mood,
            entry.title
        );
        let _ = writeln!(out, "    {}", derive_text_preview(&entry.content));
        if !entry.tags.is_empty() {
            let _ = writeln!(out, "    tags: {}", tag_summary(&entry.tags));
        }
    }
    out
}

pub fn entry_detail(entry: &JournalEntry) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}  {}", short_id(entry.id), entry.title);
    let _ = writeln!(out, "date:    {}", entry.date);
    if let Some(mood) = entry.mood {
        let _ = writeln!(out, "mood:    {mood}");
    }
    if !entry.tags.is_empty() {
        let _ = writeln!(out, "tags:    {}", entry.tags.as_slice().join(", "));
    }
    let _ = writeln!(out, "created: {}", timestamp(entry.created_at));
    let _ = writeln!(out, "updated: {}", timestamp(entry.updated_at));
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", entry.content);
    out
}

fn task_card(task: &Task) -> String {
    let mut line = format!(
        "{}  [{}] {}",
        short_id(task.id),
        task.priority,
        task.title
    );
    if let Some(due) = task.due_date {
        let _ = write!(line, "  due {due}");
    }
    let _ = write!(line, "  ({})", assignee_summary(&task.assigned_to));
    if !task.comments.is_empty() {
        let _ = write!(line, "  {} comment(s)", task.comments.len());
    }
    line
}

pub fn board(board: &Board) -> String {
    let mut out = String::new();
    for column in board.columns() {
        let _ = writeln!(out, "== {} ({}) ==", column.title(), column.len());
        for task in &column.tasks {
            let _ = writeln!(out, "  {}", task_card(task));
        }
    }
    out
}

pub fn task_detail(task: &Task) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}  {}", short_id(task.id), task.title);
    let _ = writeln!(out, "status:   {}", task.status.title());
    let _ = writeln!(out, "priority: {}", task.priority);
    if let Some(due) = task.due_date {
        let _ = writeln!(out, "due:      {due}");
    }
    let assignees: Vec<&str> = task
        .assigned_to
        .iter()
        .map(|user| user.name.as_str())
        .collect();
    let _ = writeln!(
        out,
        "assigned: {}",
        if assignees.is_empty() {
            "nobody".to_string()
        } else {
            assignees.join(", ")
        }
    );
    let _ = writeln!(out, "created:  {} by {}", timestamp(task.created_at), task.created_by.name);
    let _ = writeln!(out, "updated:  {}", timestamp(task.updated_at));
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", task.description);
    if !task.comments.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "comments ({}):", task.comments.len());
        for comment in &task.comments {
            let _ = writeln!(
                out,
                "  {} {}: {}",
                timestamp(comment.created_at),
                comment.author.name,
                comment.content
            );
        }
    }
    out
}

pub fn dashboard(summary: &DashboardSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "journal entries: {}   tasks completed: {} ({}%)   team members: {}",
        summary.journal_entries,
        summary.tasks_completed,
        summary.completion_percent,
        summary.team_members
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "recent entries:");
    if summary.recent_entries.is_empty() {
        let _ = writeln!(out, "  none");
    }
    for entry in &summary.recent_entries {
        let _ = writeln!(out, "  {}  {}  {}", short_id(entry.id), entry.date, entry.title);
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "upcoming tasks:");
    if summary.upcoming_tasks.is_empty() {
        let _ = writeln!(out, "  none");
    }
    for task in &summary.upcoming_tasks {
        let due = task
            .due_date
            .map(|date| date.to_string())
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(
            out,
            "  {}  {}  [{}] {}  {}",
            short_id(task.id),
            due,
            task.priority,
            task.title,
            task.assignee.as_deref().unwrap_or("unassigned")
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{assignee_summary, board, tag_summary};
    use daybook_core::{Board, TagSet, User};

    fn user(name: &str, email: &str) -> User {
        User::new(name, email, "").unwrap()
    }

    #[test]
    fn tag_summary_caps_at_three() {
        let tags = TagSet::try_from(vec!["a".to_string(), "b".to_string()]).unwrap();
        assert_eq!(tag_summary(&tags), "a, b");

        let tags = TagSet::try_from(
            ["a", "b", "c", "d", "e"]
                .iter()
                .map(|tag| tag.to_string())
                .collect::<Vec<_>>(),
        )
        .unwrap();
        assert_eq!(tag_summary(&tags), "a, b, c +2 more");
    }

    #[test]
    fn assignee_summary_shows_initials_and_overflow() {
        assert_eq!(assignee_summary(&[]), "unassigned");
        let users = vec![
            user("Alex Johnson", "alex@example.com"),
            user("Sarah Chen", "sarah@example.com"),
            user("Mike Torres", "mike@example.com"),
            user("Emma Wilson", "emma@example.com"),
        ];
        assert_eq!(assignee_summary(&users), "AJ, SC, MT +1");
    }

    #[test]
    fn empty_board_lists_all_columns() {
        let text = board(&Board::from_tasks(std::iter::empty()));
        assert_eq!(
            text,
            "== To Do (0) ==\n== In Progress (0) ==\n== Review (0) ==\n== Completed (0) ==\n"
        );
    }
}
