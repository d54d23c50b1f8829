//! In-memory search over journal entries and tasks.
//!
//! # Responsibility
//! - Define one matching contract shared by every searchable record.
//! - Keep filtering side-effect free: search never mutates a list.

pub mod matcher;
