//! Unified domain model for tasks and goals.
//!
//! # Responsibility
//! - Define canonical data structures used by core scheduling logic.
//! - Keep one entry-centric shape for every planning horizon.
//!
//! # Invariants
//! - Every domain object is identified by a stable `EntryId`.
//! - Occurrence state is addressed by `OccurrenceKey` regardless of
//!   whether the entry is a dated task or a period goal.

pub mod entry;
pub mod time_frame;
