//! Demo data for first launch.
//!
//! # Responsibility
//! - Build the demo team, journal entries and tasks used when
//!   `seed_demo_data` is enabled.
//!
//! # Invariants
//! - Seed records pass the same validation as service-created records.

use crate::app::DaybookError;
use crate::model::journal::{JournalEntry, Mood, TagSet};
use crate::model::task::{Task, TaskComment, TaskPriority, TaskStatus};
use crate::model::user::{Team, User};
use chrono::{DateTime, NaiveDate};
use uuid::Uuid;

const AVATAR_BASE: &str = "https://images.pexels.com/photos";

/// Records installed into a fresh `Daybook`.
#[derive(Debug, Clone)]
pub struct SeedData {
    pub team: Team,
    pub entries: Vec<JournalEntry>,
    pub tasks: Vec<Task>,
}

/// Team only; journal and board start empty.
pub fn demo_team() -> Result<Team, DaybookError> {
    let mut team = Team::new();
    for (name, email, photo) in [
        ("Alex Johnson", "alex@example.com", 614_810),
        ("Sarah Chen", "sarah@example.com", 415_829),
        ("Mike Torres", "mike@example.com", 1_043_471),
        ("Emma Wilson", "emma@example.com", 1_181_686),
    ] {
        let avatar = format!("{AVATAR_BASE}/{photo}/pexels-photo-{photo}.jpeg?w=100&h=100");
        team.add_member(User::new(name, email, avatar)?)?;
    }
    Ok(team)
}

/// Team plus sample entries and tasks.
pub fn demo_data() -> Result<SeedData, DaybookError> {
    let team = demo_team()?;
    let [alex, sarah, mike, emma] = match team.members() {
        [a, b, c, d] => [a.clone(), b.clone(), c.clone(), d.clone()],
        _ => return Err(DaybookError::InvalidSeed("demo team size".to_string())),
    };

    let entries = vec![
        entry(
            "Morning Reflections",
            "Today I want to focus on gratitude and mindfulness. The morning sun \
             streaming through my window reminds me of all the beauty in simple moments.",
            "2024-01-15",
            Mood::Happy,
            &["gratitude", "mindfulness", "morning"],
            "2024-01-15T08:30:00Z",
        )?,
        entry(
            "Project Milestone Reached",
            "Successfully completed the first phase of the project today. The team \
             worked incredibly well together, and I feel proud of what we accomplished.",
            "2024-01-14",
            Mood::Excited,
            &["work", "achievement", "teamwork"],
            "2024-01-14T18:45:00Z",
        )?,
        entry(
            "Challenging Day",
            "Today was tough. Faced several setbacks, but I learned valuable lessons \
             about persistence and problem-solving. Tomorrow is a new opportunity.",
            "2024-01-13",
            Mood::Stressed,
            &["challenges", "learning", "growth"],
            "2024-01-13T20:15:00Z",
        )?,
    ];

    let mut design_review = task(
        "Design System Review",
        "Review and update the design system components with latest brand guidelines.",
        (TaskStatus::InProgress, TaskPriority::High),
        vec![sarah.clone()],
        &alex,
        "2024-01-20",
        ("2024-01-10T10:00:00Z", "2024-01-15T14:30:00Z"),
    )?;
    design_review.comments.push(comment(
        "Started working on the color palette updates.",
        &sarah,
        "2024-01-15T14:30:00Z",
    )?);

    let presentation = task(
        "Client Presentation Prep",
        "Prepare presentation materials for the upcoming client meeting.",
        (TaskStatus::Todo, TaskPriority::Urgent),
        vec![alex.clone(), mike.clone()],
        &sarah,
        "2024-01-18",
        ("2024-01-12T09:15:00Z", "2024-01-12T09:15:00Z"),
    )?;

    let mut code_review = task(
        "Code Review - User Authentication",
        "Review the new authentication system implementation.",
        (TaskStatus::Review, TaskPriority::Medium),
        vec![mike.clone()],
        &emma,
        "2024-01-22",
        ("2024-01-13T16:45:00Z", "2024-01-16T11:20:00Z"),
    )?;
    code_review.comments.push(comment(
        "Found a few security improvements we can make.",
        &mike,
        "2024-01-16T11:20:00Z",
    )?);

    let mut migration = task(
        "Database Migration",
        "Migrate user data to the new database schema.",
        (TaskStatus::Completed, TaskPriority::High),
        vec![emma.clone()],
        &alex,
        "2024-01-15",
        ("2024-01-08T08:00:00Z", "2024-01-15T17:00:00Z"),
    )?;
    migration.comments.push(comment(
        "Migration completed successfully. All tests passed.",
        &emma,
        "2024-01-15T17:00:00Z",
    )?);

    Ok(SeedData {
        team,
        entries,
        tasks: vec![design_review, presentation, code_review, migration],
    })
}

fn entry(
    title: &str,
    content: &str,
    date: &str,
    mood: Mood,
    tags: &[&str],
    created_at: &str,
) -> Result<JournalEntry, DaybookError> {
    let stamp = epoch_ms(created_at)?;
    let tags = TagSet::try_from(tags.iter().map(|tag| tag.to_string()).collect::<Vec<_>>())
        .map_err(|err| DaybookError::InvalidSeed(err.to_string()))?;
    Ok(JournalEntry {
        id: Uuid::now_v7(),
        title: title.to_string(),
        content: content.to_string(),
        date: day(date)?,
        mood: Some(mood),
        tags,
        created_at: stamp,
        updated_at: stamp,
    })
}

fn task(
    title: &str,
    description: &str,
    (status, priority): (TaskStatus, TaskPriority),
    assigned_to: Vec<User>,
    created_by: &User,
    due: &str,
    (created_at, updated_at): (&str, &str),
) -> Result<Task, DaybookError> {
    Ok(Task {
        id: Uuid::now_v7(),
        title: title.to_string(),
        description: description.to_string(),
        status,
        priority,
        assigned_to,
        created_by: created_by.clone(),
        due_date: Some(day(due)?),
        created_at: epoch_ms(created_at)?,
        updated_at: epoch_ms(updated_at)?,
        comments: Vec::new(),
    })
}

fn comment(content: &str, author: &User, created_at: &str) -> Result<TaskComment, DaybookError> {
    Ok(TaskComment {
        id: Uuid::now_v7(),
        content: content.to_string(),
        author: author.clone(),
        created_at: epoch_ms(created_at)?,
    })
}

fn day(value: &str) -> Result<NaiveDate, DaybookError> {
    value
        .parse()
        .map_err(|err| DaybookError::InvalidSeed(format!("date `{value}`: {err}")))
}

fn epoch_ms(value: &str) -> Result<i64, DaybookError> {
    DateTime::parse_from_rfc3339(value)
        .map(|instant| instant.timestamp_millis())
        .map_err(|err| DaybookError::InvalidSeed(format!("timestamp `{value}`: {err}")))
}
