//! Planner store operations and derived views.
//!
//! # Responsibility
//! - CRUD over planner entries with duplicate-id rejection.
//! - Per-occurrence completion toggling and position management.
//! - Recurrence projection: which entries appear on a date or in a
//!   period, sorted by their resolved positions.
//!
//! # Invariants
//! - Insertion order is preserved and breaks position ties (stable sort).
//! - `add` validates and assigns a position appending the entry after
//!   everything already visible in its bucket.
//! - Update/remove/toggle/position writes on unknown ids are silent
//!   no-ops; callers in this system probe speculatively.

use crate::model::entry::{
    Entry, EntryId, EntryKind, EntryPatch, EntryValidationError, UNSET_POSITION,
};
use crate::model::time_frame::{OccurrenceKey, TimeFrameKey};
use chrono::NaiveDate;
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Error raised by store write paths.
#[derive(Debug)]
pub enum StoreError {
    Validation(EntryValidationError),
    DuplicateId(EntryId),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::DuplicateId(id) => write!(f, "entry id already exists: {id}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::DuplicateId(_) => None,
        }
    }
}

impl From<EntryValidationError> for StoreError {
    fn from(value: EntryValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Authoritative in-memory table of planner entries.
#[derive(Debug, Default)]
pub struct PlannerStore {
    entries: Vec<Entry>,
}

impl PlannerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a store from a persisted snapshot, keeping the
    /// persisted order as insertion order.
    pub fn from_entries(entries: Vec<Entry>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Read-only view of every entry in insertion order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut Entry> {
        self.entries.iter_mut().find(|entry| entry.id == id)
    }

    /// Appends a new entry.
    ///
    /// When the entry carries no explicit position, one is assigned so
    /// the entry lands after everything already visible in its bucket:
    /// the due date's view for daily tasks, the kind + time-frame group
    /// for goals. Recurring entries additionally get their anchor
    /// occurrence seeded in the position overlay so the first occurrence
    /// has an explicit entry matching the assigned position.
    ///
    /// # Errors
    /// - `StoreError::DuplicateId` when the id is already present.
    /// - `StoreError::Validation` when the entry is malformed.
    pub fn add(&mut self, mut entry: Entry) -> StoreResult<()> {
        entry.validate()?;
        if self.get(&entry.id).is_some() {
            return Err(StoreError::DuplicateId(entry.id));
        }

        if entry.position.is_none() {
            entry.position = Some(self.next_position_for(&entry));
        }
        if entry.is_recurring() {
            if let (Some(anchor), Some(position)) = (entry.anchor(), entry.position) {
                entry.occurrence_positions.insert(anchor, position);
            }
        }

        debug!(
            "event=entry_added module=store id={} kind={} recurring={}",
            entry.id,
            entry.kind,
            entry.is_recurring()
        );
        self.entries.push(entry);
        Ok(())
    }

    /// Merges a partial update into the matching entry. Silent no-op on
    /// unknown id.
    pub fn update(&mut self, id: &str, patch: &EntryPatch) {
        if let Some(entry) = self.get_mut(id) {
            patch.apply_to(entry);
            debug!("event=entry_updated module=store id={id}");
        }
    }

    /// Removes the matching entry and, with it, all of its occurrence
    /// state. Idempotent; unknown ids are a silent no-op.
    pub fn remove(&mut self, id: &str) {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        if self.entries.len() != before {
            debug!("event=entry_removed module=store id={id}");
        }
    }

    /// Flips completion for `id` as observed at `key`. Returns true when
    /// the occurrence transitioned to completed; unknown ids return
    /// false and change nothing.
    pub fn toggle_complete(&mut self, id: &str, key: &OccurrenceKey) -> bool {
        match self.get_mut(id) {
            Some(entry) => {
                let now_completed = entry.toggle_completed_at(key);
                debug!(
                    "event=entry_toggled module=store id={id} occurrence={key} completed={now_completed}"
                );
                now_completed
            }
            None => false,
        }
    }

    /// Assigns 1-based positions following the order of `ids` for the
    /// bucket addressed by `key`. Ids not present in the store are
    /// skipped; their index still counts, matching how callers hand over
    /// a full visual list.
    pub fn reorder(&mut self, key: &OccurrenceKey, ids: &[&str]) {
        for (index, id) in ids.iter().enumerate() {
            let position = index as u32 + 1;
            if let Some(entry) = self.get_mut(id) {
                entry.set_position_at(key, position);
            }
        }
        debug!("event=entries_reordered module=store occurrence={key} count={}", ids.len());
    }

    /// Writes one entry's position at `key`. Silent no-op on unknown id.
    pub fn set_position(&mut self, id: &str, key: &OccurrenceKey, position: u32) {
        if let Some(entry) = self.get_mut(id) {
            entry.set_position_at(key, position);
        }
    }

    /// Resolved completion state for one occurrence; false on unknown id.
    pub fn is_completed_at(&self, id: &str, key: &OccurrenceKey) -> bool {
        self.get(id)
            .map(|entry| entry.is_completed_at(key))
            .unwrap_or(false)
    }

    /// Resolved position for one occurrence; `UNSET_POSITION` on unknown
    /// id or absent position.
    pub fn position_at(&self, id: &str, key: &OccurrenceKey) -> u32 {
        self.get(id)
            .map(|entry| entry.position_at(key))
            .unwrap_or(UNSET_POSITION)
    }

    /// Daily entries visible when viewing `date`, sorted by resolved
    /// position. Ties keep insertion order.
    pub fn entries_for_date(&self, date: NaiveDate) -> Vec<&Entry> {
        let key = OccurrenceKey::Date(date);
        let mut visible: Vec<&Entry> = self
            .entries
            .iter()
            .filter(|entry| entry.occurs_on(date))
            .collect();
        visible.sort_by_key(|entry| entry.position_at(&key));
        visible
    }

    /// Entries of `kind`, optionally scoped to a time frame. With a
    /// frame, exact anchors are joined by every-period goals anchored at
    /// or before it; all sorted by resolved position.
    pub fn entries_by_kind(&self, kind: EntryKind, frame: Option<&TimeFrameKey>) -> Vec<&Entry> {
        let mut matching: Vec<&Entry> = self
            .entries
            .iter()
            .filter(|entry| entry.kind == kind)
            .filter(|entry| match frame {
                Some(frame) => entry.occurs_in_frame(frame),
                None => true,
            })
            .collect();
        match frame {
            Some(frame) => {
                let key = OccurrenceKey::TimeFrame(*frame);
                matching.sort_by_key(|entry| entry.position_at(&key));
            }
            None => matching.sort_by_key(|entry| entry.position.unwrap_or(UNSET_POSITION)),
        }
        matching
    }

    /// Next free position appending after everything visible in the new
    /// entry's bucket. Unpositioned neighbors do not raise the base.
    fn next_position_for(&self, entry: &Entry) -> u32 {
        let max_position = match (entry.kind, entry.due_date) {
            (EntryKind::Daily, Some(due)) => {
                let key = OccurrenceKey::Date(due);
                self.entries
                    .iter()
                    .filter(|other| other.occurs_on(due))
                    .map(|other| other.position_at(&key))
                    .filter(|position| *position != UNSET_POSITION)
                    .max()
            }
            (EntryKind::Daily, None) => None,
            _ => self
                .entries
                .iter()
                .filter(|other| other.kind == entry.kind && other.time_frame == entry.time_frame)
                .map(|other| other.position.unwrap_or(UNSET_POSITION))
                .filter(|position| *position != UNSET_POSITION)
                .max(),
        };
        max_position.unwrap_or(0) + 1
    }
}
