//! Editor form models.
//!
//! # Responsibility
//! - Hold in-progress form state for creating or editing one record.
//! - Decide whether a form can be saved and turn it into a service input.
//!
//! # Invariants
//! - Drafts never touch service state; only `submit` output does, through
//!   the owning service.

pub mod entry_draft;
pub mod task_draft;
