//! Domain model for the journal and task board.
//!
//! # Responsibility
//! - Define the records owned by the journal and task services.
//! - Keep status, priority and mood as closed enumerations.
//!
//! # Invariants
//! - Every record is identified by a timestamp-derived UUID (v7).
//! - Users are immutable and cloned into the records that reference them.

pub mod journal;
pub mod task;
pub mod user;
