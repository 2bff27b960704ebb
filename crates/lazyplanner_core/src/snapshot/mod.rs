//! Snapshot persistence layer.
//!
//! # Responsibility
//! - Define the durable wire shape of planner entries and its mapping
//!   to and from the domain model.
//! - Provide the persistence collaborator contract plus its SQLite
//!   implementation.
//!
//! # Invariants
//! - Wire field names and value formats stay compatible with previously
//!   persisted data (`dueDate`, `repeatedDays`, `pomodoros`, ...).
//! - Load paths reject invalid persisted state instead of masking it.

pub mod record;
pub mod snapshot_repo;
