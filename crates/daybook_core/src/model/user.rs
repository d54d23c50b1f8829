//! User and team directory model.
//!
//! # Responsibility
//! - Define the immutable `User` record shared by journal, task and comment
//!   records.
//! - Resolve team members by id or email for assignment flows.
//!
//! # Invariants
//! - A `User` is never mutated after construction.
//! - Team member ids and emails are unique within one `Team`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

/// Stable identifier for a user.
pub type UserId = Uuid;

/// Validation failures for user construction and team membership.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// Display name is blank after trim.
    EmptyName,
    /// Email does not look like `local@domain.tld`.
    InvalidEmail(String),
    /// Another member already uses this id.
    DuplicateId(UserId),
    /// Another member already uses this email.
    DuplicateEmail(String),
}

impl Display for UserValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "user name must not be blank"),
            Self::InvalidEmail(value) => write!(f, "invalid email: `{value}`"),
            Self::DuplicateId(id) => write!(f, "team already has member {id}"),
            Self::DuplicateEmail(email) => write!(f, "team already has member `{email}`"),
        }
    }
}

impl Error for UserValidationError {}

/// One person known to the application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    /// Remote avatar image. Loaded by the presentation layer only.
    pub avatar_url: String,
}

impl User {
    /// Builds a user with a freshly generated id.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        avatar_url: impl Into<String>,
    ) -> Result<Self, UserValidationError> {
        Self::with_id(Uuid::now_v7(), name, email, avatar_url)
    }

    /// Builds a user with a caller-provided id.
    pub fn with_id(
        id: UserId,
        name: impl Into<String>,
        email: impl Into<String>,
        avatar_url: impl Into<String>,
    ) -> Result<Self, UserValidationError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        let email = email.into().trim().to_string();
        if !EMAIL_RE.is_match(&email) {
            return Err(UserValidationError::InvalidEmail(email));
        }
        Ok(Self {
            id,
            name,
            email,
            avatar_url: avatar_url.into(),
        })
    }

    /// Initials shown in place of a missing avatar, e.g. `AJ`.
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .flat_map(char::to_uppercase)
            .take(2)
            .collect()
    }
}

/// Team directory: users eligible for task assignment.
///
/// Members keep their insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Team {
    members: Vec<User>,
}

impl Team {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a member, rejecting id or email collisions.
    pub fn add_member(&mut self, user: User) -> Result<(), UserValidationError> {
        if self.members.iter().any(|member| member.id == user.id) {
            return Err(UserValidationError::DuplicateId(user.id));
        }
        if self.find_by_email(&user.email).is_some() {
            return Err(UserValidationError::DuplicateEmail(user.email));
        }
        self.members.push(user);
        Ok(())
    }

    pub fn members(&self) -> &[User] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn find(&self, id: UserId) -> Option<&User> {
        self.members.iter().find(|member| member.id == id)
    }

    /// Case-insensitive email lookup.
    pub fn find_by_email(&self, email: &str) -> Option<&User> {
        let needle = email.trim();
        self.members
            .iter()
            .find(|member| member.email.eq_ignore_ascii_case(needle))
    }
}
