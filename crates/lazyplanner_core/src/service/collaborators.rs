//! External collaborator contracts.
//!
//! # Responsibility
//! - Define the id-generation and completion-notification seams the
//!   core depends on, with default implementations.
//!
//! # Invariants
//! - Generated ids are globally unique; the core never checks for
//!   collisions beyond duplicate-id rejection on add.
//! - Completion notification is fire-and-forget; the core never
//!   depends on its outcome.

use crate::model::entry::EntryId;
use uuid::Uuid;

/// Produces globally-unique opaque entry ids.
pub trait IdGenerator {
    fn next_id(&self) -> EntryId;
}

/// Default id collaborator backed by random UUIDs.
#[derive(Debug, Default)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_id(&self) -> EntryId {
        Uuid::new_v4().to_string()
    }
}

/// Notified when a toggle transitions an occurrence to completed. The
/// application wires its completion sound through this seam.
pub trait CompletionListener {
    fn entry_completed(&self, id: &str);
}

/// Listener that ignores completion events.
#[derive(Debug, Default)]
pub struct NoopCompletionListener;

impl CompletionListener for NoopCompletionListener {
    fn entry_completed(&self, _id: &str) {}
}
