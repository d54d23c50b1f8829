//! Line shell grammar.
//!
//! # Responsibility
//! - Split one input line into words, honoring quotes.
//! - Parse the words into a typed `ShellCommand` with clap.

use chrono::NaiveDate;
use clap::{CommandFactory, Parser, Subcommand};
use daybook_core::{Mood, TaskPriority, TaskStatus};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// One shell line, parsed without a binary name.
#[derive(Debug, Parser)]
#[command(
    name = "daybook",
    no_binary_name = true,
    disable_help_subcommand = true,
    disable_version_flag = true
)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum ShellCommand {
    /// Show available commands
    Help,
    /// List team members; `*` marks the acting user
    Team,
    /// Act as another team member
    User { email: String },
    /// Show counts, recent entries and upcoming tasks
    Dashboard {
        #[arg(long)]
        json: bool,
    },
    /// List journal entries, optionally filtered by text
    Entries { term: Option<String> },
    /// Write a new journal entry
    EntryNew {
        title: String,
        content: String,
        #[arg(long)]
        mood: Option<Mood>,
        /// Entry date (YYYY-MM-DD); today when omitted
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Tag to attach; repeatable
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    /// Edit a journal entry
    EntryEdit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        mood: Option<Mood>,
        #[arg(long, conflicts_with = "mood")]
        clear_mood: bool,
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Tag to add; repeatable
        #[arg(long = "tag")]
        add_tags: Vec<String>,
        /// Tag to remove; repeatable
        #[arg(long = "untag")]
        remove_tags: Vec<String>,
    },
    /// Show one journal entry in full
    EntryShow {
        id: String,
        #[arg(long)]
        json: bool,
    },
    /// Delete a journal entry
    EntryRm { id: String },
    /// Show the task board, optionally filtered by text
    Board { term: Option<String> },
    /// Create a task as the acting user
    TaskNew {
        title: String,
        description: String,
        #[arg(long)]
        priority: Option<TaskPriority>,
        #[arg(long)]
        status: Option<TaskStatus>,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<NaiveDate>,
        /// Assignee email; repeatable
        #[arg(long = "assign")]
        assignees: Vec<String>,
    },
    /// Edit a task
    TaskEdit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        priority: Option<TaskPriority>,
        #[arg(long)]
        status: Option<TaskStatus>,
        #[arg(long)]
        due: Option<NaiveDate>,
        #[arg(long, conflicts_with = "due")]
        clear_due: bool,
    },
    /// Show one task with its comments
    TaskShow {
        id: String,
        #[arg(long)]
        json: bool,
    },
    /// Move a task to another board column
    TaskMove { id: String, status: TaskStatus },
    /// Assign a team member, or unassign if already assigned
    TaskAssign { id: String, email: String },
    /// Comment on a task as the acting user
    TaskComment {
        id: String,
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Delete a task
    TaskRm { id: String },
    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
}

#[derive(Debug)]
pub enum ShellError {
    UnterminatedQuote,
    Usage(clap::Error),
}

impl Display for ShellError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnterminatedQuote => writeln!(f, "error: unterminated quote"),
            Self::Usage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ShellError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Usage(err) => Some(err),
            Self::UnterminatedQuote => None,
        }
    }
}

impl From<clap::Error> for ShellError {
    fn from(value: clap::Error) -> Self {
        Self::Usage(value)
    }
}

/// Parses one line. Blank lines and `#` comments yield `None`.
pub fn parse_line(line: &str) -> Result<Option<ShellCommand>, ShellError> {
    let words = tokenize(line)?;
    match words.first() {
        Some(first) if !first.starts_with('#') => {
            Ok(Some(ShellLine::try_parse_from(words)?.command))
        }
        _ => Ok(None),
    }
}

/// Rendered command overview for `help`.
pub fn help_text() -> String {
    ShellLine::command().render_help().to_string()
}

/// Splits on whitespace. Single quotes are literal; inside double quotes
/// `\"` and `\\` are escapes. Adjacent quoted and bare parts join.
pub fn tokenize(line: &str) -> Result<Vec<String>, ShellError> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut chars = line.chars();

    while let Some(ch) = chars.next() {
        match ch {
            '\'' => {
                in_word = true;
                loop {
                    match chars.next() {
                        Some('\'') => break,
                        Some(inner) => current.push(inner),
                        None => return Err(ShellError::UnterminatedQuote),
                    }
                }
            }
            '"' => {
                in_word = true;
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some('\\') => match chars.next() {
                            Some(escaped @ ('"' | '\\')) => current.push(escaped),
                            Some(other) => {
                                current.push('\\');
                                current.push(other);
                            }
                            None => return Err(ShellError::UnterminatedQuote),
                        },
                        Some(inner) => current.push(inner),
                        None => return Err(ShellError::UnterminatedQuote),
                    }
                }
            }
            ch if ch.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            other => {
                in_word = true;
                current.push(other);
            }
        }
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::{parse_line, tokenize, ShellCommand, ShellError};
    use daybook_core::{Mood, TaskStatus};

    #[test]
    fn tokenize_honors_quotes() {
        let words = tokenize(r#"entry-new "Morning walk" 'sun, "wind"' --tag a"b c""#).unwrap();
        assert_eq!(
            words,
            vec!["entry-new", "Morning walk", "sun, \"wind\"", "--tag", "ab c"]
        );
        assert_eq!(tokenize(r#"x "" y"#).unwrap(), vec!["x", "", "y"]);
        assert!(matches!(
            tokenize("task-comment 1 \"oops").unwrap_err(),
            ShellError::UnterminatedQuote
        ));
    }

    #[test]
    fn blank_and_comment_lines_parse_to_none() {
        assert_eq!(parse_line("   ").unwrap(), None);
        assert_eq!(parse_line("# note to self").unwrap(), None);
    }

    #[test]
    fn parses_entry_new_with_options() {
        let command =
            parse_line(r#"entry-new "Title" "Body text" --mood happy --tag one --tag two"#)
                .unwrap()
                .unwrap();
        assert_eq!(
            command,
            ShellCommand::EntryNew {
                title: "Title".to_string(),
                content: "Body text".to_string(),
                mood: Some(Mood::Happy),
                date: None,
                tags: vec!["one".to_string(), "two".to_string()],
            }
        );
    }

    #[test]
    fn parses_task_move_and_comment_words() {
        assert_eq!(
            parse_line("task-move 1a2b3c4d in_progress").unwrap().unwrap(),
            ShellCommand::TaskMove {
                id: "1a2b3c4d".to_string(),
                status: TaskStatus::InProgress,
            }
        );
        assert_eq!(
            parse_line("task-comment 1a2b3c4d looks good").unwrap().unwrap(),
            ShellCommand::TaskComment {
                id: "1a2b3c4d".to_string(),
                text: vec!["looks".to_string(), "good".to_string()],
            }
        );
        assert_eq!(parse_line("exit").unwrap().unwrap(), ShellCommand::Quit);
    }

    #[test]
    fn rejects_unknown_commands_and_bad_values() {
        assert!(matches!(
            parse_line("frobnicate").unwrap_err(),
            ShellError::Usage(_)
        ));
        assert!(matches!(
            parse_line("task-move 1a2b3c4d sideways").unwrap_err(),
            ShellError::Usage(_)
        ));
        assert!(matches!(
            parse_line("entry-edit 1a2b --mood sad --clear-mood").unwrap_err(),
            ShellError::Usage(_)
        ));
    }
}
