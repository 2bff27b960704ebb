//! In-memory task/goal store.
//!
//! # Responsibility
//! - Hold the authoritative set of planner entries in insertion order.
//! - Expose every mutation and derived view behind store methods.
//!
//! # Invariants
//! - The raw entry collection is never handed out mutably; all writes
//!   flow through the operation set in `planner_store`.
//! - Unknown ids are silent no-ops on mutation paths, never errors.

pub mod planner_store;
