//! Core use-case services.
//!
//! # Responsibility
//! - Own the journal and task lists and expose their mutation paths.
//! - Provide read projections (board columns, dashboard summary).
//!
//! # Invariants
//! - Services are the only writers of their repository.
//! - Projections are pure functions of service state.

pub mod board;
pub mod dashboard;
pub mod journal_service;
pub mod task_service;
