//! Planner use-case service.
//!
//! # Responsibility
//! - Load the persisted record set at open and expose the store
//!   operations to UI callers.
//! - Trigger a snapshot save after every mutation and notify the
//!   completion collaborator on completed transitions.
//! - Compose fork-on-move for recurring entries out of the store
//!   primitives.
//!
//! # Invariants
//! - Snapshot saves are fire-and-forget: failures are logged, never
//!   surfaced to callers (a crash between mutation and save loses at
//!   most the latest change).
//! - Moving an occurrence of a recurring entry never mutates the
//!   original's anchor; the original stays a template.

use crate::model::entry::{Entry, EntryId, EntryKind, EntryPatch, Priority, Recurrence};
use crate::model::time_frame::{OccurrenceKey, TimeFrameKey};
use crate::service::collaborators::{CompletionListener, IdGenerator};
use crate::snapshot::snapshot_repo::{SnapshotRepository, SnapshotResult};
use crate::store::planner_store::{PlannerStore, StoreResult};
use chrono::NaiveDate;
use log::{error, info};
use std::collections::BTreeSet;

/// Request model for creating an entry without a caller-provided id.
#[derive(Debug, Clone)]
pub struct NewEntry {
    pub name: String,
    pub description: Option<String>,
    pub kind: EntryKind,
    pub due_date: Option<NaiveDate>,
    pub time_frame: Option<TimeFrameKey>,
    pub recurrence: Recurrence,
    pub priority: Priority,
    pub tags: BTreeSet<String>,
}

impl NewEntry {
    pub fn new(kind: EntryKind, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            kind,
            due_date: None,
            time_frame: None,
            recurrence: Recurrence::None,
            priority: Priority::default(),
            tags: BTreeSet::new(),
        }
    }
}

/// Use-case service wrapper around the planner store and its
/// collaborators.
pub struct PlannerService<R, I, C>
where
    R: SnapshotRepository,
    I: IdGenerator,
    C: CompletionListener,
{
    store: PlannerStore,
    snapshots: R,
    ids: I,
    completion: C,
}

impl<R, I, C> PlannerService<R, I, C>
where
    R: SnapshotRepository,
    I: IdGenerator,
    C: CompletionListener,
{
    /// Opens the service by reloading the persisted record set.
    ///
    /// # Errors
    /// - Propagates snapshot load failures; an absent slot is an empty
    ///   planner, not an error.
    pub fn open(snapshots: R, ids: I, completion: C) -> SnapshotResult<Self> {
        let entries = snapshots.load()?;
        info!(
            "event=service_open module=service status=ok entries={}",
            entries.len()
        );
        Ok(Self {
            store: PlannerStore::from_entries(entries),
            snapshots,
            ids,
            completion,
        })
    }

    /// Read-only access to the underlying store for derived views.
    pub fn store(&self) -> &PlannerStore {
        &self.store
    }

    /// Creates an entry from a request, generating its id.
    pub fn create_entry(&mut self, request: NewEntry) -> StoreResult<EntryId> {
        let id = self.ids.next_id();
        let mut entry = Entry::new(id.clone(), request.kind, request.name);
        entry.description = request.description;
        entry.due_date = request.due_date;
        entry.time_frame = request.time_frame;
        entry.recurrence = request.recurrence;
        entry.priority = request.priority;
        entry.tags = request.tags;
        self.add_entry(entry)?;
        Ok(id)
    }

    /// Appends a fully-formed entry (id already assigned by the caller).
    pub fn add_entry(&mut self, entry: Entry) -> StoreResult<()> {
        self.store.add(entry)?;
        self.persist();
        Ok(())
    }

    /// Merges a partial update; silent no-op on unknown id.
    pub fn update_entry(&mut self, id: &str, patch: &EntryPatch) {
        self.store.update(id, patch);
        self.persist();
    }

    /// Removes an entry; idempotent.
    pub fn delete_entry(&mut self, id: &str) {
        self.store.remove(id);
        self.persist();
    }

    /// Flips completion for one occurrence and notifies the completion
    /// collaborator when the toggle lands on completed.
    pub fn toggle_complete(&mut self, id: &str, key: &OccurrenceKey) -> bool {
        let now_completed = self.store.toggle_complete(id, key);
        if now_completed {
            self.completion.entry_completed(id);
        }
        self.persist();
        now_completed
    }

    /// Applies a caller-supplied visual order for one bucket.
    pub fn reorder(&mut self, key: &OccurrenceKey, ids: &[&str]) {
        self.store.reorder(key, ids);
        self.persist();
    }

    /// Writes one entry's position in one bucket.
    pub fn set_position(&mut self, id: &str, key: &OccurrenceKey, position: u32) {
        self.store.set_position(id, key, position);
        self.persist();
    }

    /// Adds focused minutes recorded by the timer; silent no-op on
    /// unknown id.
    pub fn add_focus_minutes(&mut self, id: &str, minutes: u32) {
        let Some(entry) = self.store.get(id) else {
            return;
        };
        let patch = EntryPatch {
            focus_minutes: Some(entry.focus_minutes + minutes),
            ..EntryPatch::default()
        };
        self.store.update(id, &patch);
        self.persist();
    }

    /// Moves one occurrence of an entry to a different bucket.
    ///
    /// Recurring entries are forked: a new non-recurring entry anchored
    /// at the destination is created from the original, which keeps its
    /// recurrence and anchor untouched. Returns the fork's id.
    /// Non-recurring entries are re-anchored in place and return `None`.
    /// Unknown ids are a silent no-op.
    pub fn move_occurrence(
        &mut self,
        id: &str,
        destination: &OccurrenceKey,
    ) -> StoreResult<Option<EntryId>> {
        let Some(entry) = self.store.get(id) else {
            return Ok(None);
        };

        if entry.is_recurring() {
            let fork_id = self.ids.next_id();
            let mut fork = Entry::new(fork_id.clone(), kind_for(destination), entry.name.clone());
            fork.description = entry.description.clone();
            fork.priority = entry.priority;
            fork.tags = entry.tags.clone();
            match destination {
                OccurrenceKey::Date(date) => fork.due_date = Some(*date),
                OccurrenceKey::TimeFrame(frame) => fork.time_frame = Some(*frame),
            }
            self.add_entry(fork)?;
            return Ok(Some(fork_id));
        }

        let patch = match destination {
            OccurrenceKey::Date(date) => EntryPatch {
                due_date: Some(Some(*date)),
                ..EntryPatch::default()
            },
            OccurrenceKey::TimeFrame(frame) => EntryPatch {
                time_frame: Some(Some(*frame)),
                ..EntryPatch::default()
            },
        };
        self.update_entry(id, &patch);
        Ok(None)
    }

    fn persist(&self) {
        if let Err(err) = self.snapshots.save(self.store.entries()) {
            // The in-memory state stays authoritative; at worst the
            // latest change is lost on crash.
            error!("event=snapshot_save_failed module=service error={err}");
        }
    }
}

/// Entry kind implied by a destination bucket.
fn kind_for(key: &OccurrenceKey) -> EntryKind {
    match key {
        OccurrenceKey::Date(_) => EntryKind::Daily,
        OccurrenceKey::TimeFrame(TimeFrameKey::Week { .. }) => EntryKind::Weekly,
        OccurrenceKey::TimeFrame(TimeFrameKey::Month { .. }) => EntryKind::Monthly,
        OccurrenceKey::TimeFrame(TimeFrameKey::Year(_)) => EntryKind::Yearly,
        OccurrenceKey::TimeFrame(TimeFrameKey::Life) => EntryKind::Life,
    }
}
