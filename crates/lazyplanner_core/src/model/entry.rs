//! Planner entry domain model.
//!
//! # Responsibility
//! - Define the canonical record shared by daily tasks and goals.
//! - Resolve per-occurrence completion and position through one rule.
//!
//! # Invariants
//! - `id` is stable and never reused for another entry.
//! - Overlay maps live inside the entry, so deleting an entry removes all
//!   of its occurrence state atomically.
//! - The overlay is consulted for an occurrence key iff the entry recurs
//!   or the key differs from the entry's anchor; otherwise the plain
//!   `completed`/`position` fields are authoritative.

use crate::model::time_frame::{OccurrenceKey, TimeFrameKey};
use chrono::{Datelike, NaiveDate, Weekday};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable identifier for every planner entry.
///
/// Kept opaque: ids are produced by an external generator and the core
/// never inspects their contents.
pub type EntryId = String;

/// Resolved position reported when no explicit position exists for an
/// occurrence. Sorts unpositioned entries after everything else.
pub const UNSET_POSITION: u32 = 999;

/// Horizon of a planner entry: a dated task or a goal period kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Life,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::Life => "life",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "daily" => Some(Self::Daily),
            "weekly" => Some(Self::Weekly),
            "monthly" => Some(Self::Monthly),
            "yearly" => Some(Self::Yearly),
            "life" => Some(Self::Life),
            _ => None,
        }
    }

    /// Whether `key` addresses the period kind this entry kind lives in.
    fn matches_frame(&self, key: &TimeFrameKey) -> bool {
        matches!(
            (self, key),
            (Self::Weekly, TimeFrameKey::Week { .. })
                | (Self::Monthly, TimeFrameKey::Month { .. })
                | (Self::Yearly, TimeFrameKey::Year(_))
                | (Self::Life, TimeFrameKey::Life)
        )
    }
}

impl Display for EntryKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Weighting used by analytics and UI color, never by scheduling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

/// How an entry projects onto occurrences.
///
/// `Weekdays` recurs a daily task on matching weekdays; `EveryPeriod`
/// re-surfaces a goal in every period at or after its anchor.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Recurrence {
    #[default]
    None,
    Weekdays(HashSet<Weekday>),
    EveryPeriod,
}

impl Recurrence {
    pub fn is_recurring(&self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Validation error raised by entry write paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryValidationError {
    EmptyName,
    WeekdayRecurrenceOnGoal,
    PeriodRecurrenceOnDailyTask,
    TimeFrameOnDailyTask,
    TimeFrameKindMismatch {
        kind: EntryKind,
        time_frame: TimeFrameKey,
    },
}

impl Display for EntryValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "entry name cannot be empty"),
            Self::WeekdayRecurrenceOnGoal => {
                write!(f, "weekday recurrence is only valid on daily entries")
            }
            Self::PeriodRecurrenceOnDailyTask => {
                write!(f, "every-period recurrence is only valid on goals")
            }
            Self::TimeFrameOnDailyTask => {
                write!(f, "daily entries are anchored by due date, not time frame")
            }
            Self::TimeFrameKindMismatch { kind, time_frame } => write!(
                f,
                "time frame `{time_frame}` does not match entry kind `{kind}`"
            ),
        }
    }
}

impl Error for EntryValidationError {}

/// Canonical record for both daily tasks and goals.
///
/// One shape carries every horizon; daily entries anchor on `due_date`
/// and goals anchor on `time_frame`. Per-occurrence completion and
/// position state for recurring or off-anchor views lives in the
/// overlay collections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Stable opaque id, unique across the store.
    pub id: EntryId,
    /// Required display title.
    pub name: String,
    pub description: Option<String>,
    pub kind: EntryKind,
    /// Anchor date; only meaningful for `EntryKind::Daily`.
    pub due_date: Option<NaiveDate>,
    /// Anchor period; only meaningful for goal kinds.
    pub time_frame: Option<TimeFrameKey>,
    pub recurrence: Recurrence,
    pub priority: Priority,
    pub tags: BTreeSet<String>,
    /// Accumulated focused minutes, incremented by the focus timer.
    /// Persisted under the legacy name `pomodoros`.
    pub focus_minutes: u32,
    /// Completion flag for the single on-anchor occurrence of a
    /// non-recurring entry.
    pub completed: bool,
    /// Completion overlay for recurring or off-anchor occurrences.
    pub completed_occurrences: BTreeSet<OccurrenceKey>,
    /// Default ordering fallback for the on-anchor occurrence.
    pub position: Option<u32>,
    /// Ordering overlay for recurring or off-anchor occurrences.
    pub occurrence_positions: BTreeMap<OccurrenceKey, u32>,
}

impl Entry {
    /// Creates a minimal non-recurring entry with empty overlays.
    pub fn new(id: impl Into<EntryId>, kind: EntryKind, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            kind,
            due_date: None,
            time_frame: None,
            recurrence: Recurrence::None,
            priority: Priority::default(),
            tags: BTreeSet::new(),
            focus_minutes: 0,
            completed: false,
            completed_occurrences: BTreeSet::new(),
            position: None,
            occurrence_positions: BTreeMap::new(),
        }
    }

    /// Checks structural invariants before the entry enters the store.
    ///
    /// # Errors
    /// - Empty name.
    /// - Recurrence shape or time frame inconsistent with `kind`.
    pub fn validate(&self) -> Result<(), EntryValidationError> {
        if self.name.trim().is_empty() {
            return Err(EntryValidationError::EmptyName);
        }
        match (&self.recurrence, self.kind) {
            (Recurrence::Weekdays(_), kind) if kind != EntryKind::Daily => {
                return Err(EntryValidationError::WeekdayRecurrenceOnGoal);
            }
            (Recurrence::EveryPeriod, EntryKind::Daily) => {
                return Err(EntryValidationError::PeriodRecurrenceOnDailyTask);
            }
            _ => {}
        }
        if let Some(time_frame) = self.time_frame {
            if self.kind == EntryKind::Daily {
                return Err(EntryValidationError::TimeFrameOnDailyTask);
            }
            if !self.kind.matches_frame(&time_frame) {
                return Err(EntryValidationError::TimeFrameKindMismatch {
                    kind: self.kind,
                    time_frame,
                });
            }
        }
        Ok(())
    }

    pub fn is_recurring(&self) -> bool {
        self.recurrence.is_recurring()
    }

    /// The occurrence key the plain `completed`/`position` fields refer
    /// to: the due date for daily entries, the time frame for goals.
    pub fn anchor(&self) -> Option<OccurrenceKey> {
        match self.kind {
            EntryKind::Daily => self.due_date.map(OccurrenceKey::Date),
            _ => self.time_frame.map(OccurrenceKey::TimeFrame),
        }
    }

    /// Whether occurrence state for `key` is held in the overlay rather
    /// than the plain fields.
    pub fn uses_overlay(&self, key: &OccurrenceKey) -> bool {
        self.is_recurring() || self.anchor().as_ref() != Some(key)
    }

    /// Resolved completion state for one occurrence.
    pub fn is_completed_at(&self, key: &OccurrenceKey) -> bool {
        if self.uses_overlay(key) {
            self.completed_occurrences.contains(key)
        } else {
            self.completed
        }
    }

    /// Resolved position for one occurrence, `UNSET_POSITION` when no
    /// explicit position exists on the resolved side.
    pub fn position_at(&self, key: &OccurrenceKey) -> u32 {
        if self.uses_overlay(key) {
            self.occurrence_positions
                .get(key)
                .copied()
                .unwrap_or(UNSET_POSITION)
        } else {
            self.position.unwrap_or(UNSET_POSITION)
        }
    }

    /// Flips completion for one occurrence, routed through the overlay
    /// or the plain flag. Returns true when the occurrence transitioned
    /// to completed.
    pub fn toggle_completed_at(&mut self, key: &OccurrenceKey) -> bool {
        if self.uses_overlay(key) {
            if self.completed_occurrences.remove(key) {
                false
            } else {
                self.completed_occurrences.insert(*key);
                true
            }
        } else {
            self.completed = !self.completed;
            self.completed
        }
    }

    /// Writes a position for one occurrence, routed like completion.
    pub fn set_position_at(&mut self, key: &OccurrenceKey, position: u32) {
        if self.uses_overlay(key) {
            self.occurrence_positions.insert(*key, position);
        } else {
            self.position = Some(position);
        }
    }

    /// Whether this daily entry appears when viewing `date`: due exactly
    /// then, or recurring on that weekday at or after the due date. An
    /// unset due date places no lower bound on recurrence.
    pub fn occurs_on(&self, date: NaiveDate) -> bool {
        if self.kind != EntryKind::Daily {
            return false;
        }
        if self.due_date == Some(date) {
            return true;
        }
        match &self.recurrence {
            Recurrence::Weekdays(days) if days.contains(&date.weekday()) => {
                self.due_date.is_none_or(|due| date >= due)
            }
            _ => false,
        }
    }

    /// Whether this goal appears when viewing `frame`: anchored exactly
    /// there, or recurring every period from an anchor at or before it.
    pub fn occurs_in_frame(&self, frame: &TimeFrameKey) -> bool {
        if self.kind == EntryKind::Daily {
            return false;
        }
        if self.time_frame.as_ref() == Some(frame) {
            return true;
        }
        matches!(self.recurrence, Recurrence::EveryPeriod)
            && self
                .time_frame
                .as_ref()
                .is_some_and(|own| own.is_at_or_before(frame))
    }
}

/// Partial update applied over an existing entry with merge semantics:
/// absent fields keep their current value, `Some(None)` clears an
/// optional field.
#[derive(Debug, Clone, Default)]
pub struct EntryPatch {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub due_date: Option<Option<NaiveDate>>,
    pub time_frame: Option<Option<TimeFrameKey>>,
    pub recurrence: Option<Recurrence>,
    pub priority: Option<Priority>,
    pub tags: Option<BTreeSet<String>>,
    pub focus_minutes: Option<u32>,
}

impl EntryPatch {
    /// Merges this patch into `entry`. Overlay collections are never
    /// touched by patches; they change only through occurrence writes.
    pub fn apply_to(&self, entry: &mut Entry) {
        if let Some(name) = &self.name {
            entry.name = name.clone();
        }
        if let Some(description) = &self.description {
            entry.description = description.clone();
        }
        if let Some(due_date) = self.due_date {
            entry.due_date = due_date;
        }
        if let Some(time_frame) = self.time_frame {
            entry.time_frame = time_frame;
        }
        if let Some(recurrence) = &self.recurrence {
            entry.recurrence = recurrence.clone();
        }
        if let Some(priority) = self.priority {
            entry.priority = priority;
        }
        if let Some(tags) = &self.tags {
            entry.tags = tags.clone();
        }
        if let Some(focus_minutes) = self.focus_minutes {
            entry.focus_minutes = focus_minutes;
        }
    }
}
