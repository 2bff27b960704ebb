//! Durable wire shape of a planner entry.
//!
//! # Responsibility
//! - Mirror the persisted JSON record field-for-field so snapshots
//!   written by earlier versions of the application keep loading.
//! - Convert between the wire shape and the domain `Entry`.
//!
//! # Invariants
//! - `repeatedDays` carries full weekday names for daily recurrence, or
//!   a single element equal to the entry's own kind string for goals
//!   that recur every period.
//! - `pomodoros` keeps its legacy name but stores accumulated minutes.
//! - Conversion to the domain rejects malformed values rather than
//!   dropping them silently.

use crate::model::entry::{Entry, EntryKind, Priority, Recurrence};
use crate::model::time_frame::{
    parse_date, parse_weekday, weekday_name, OccurrenceKey, TimeFrameKey, DATE_FORMAT,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Persisted record, named and shaped exactly as the snapshot JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryRecord {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_frame_key: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub repeated_days: Vec<String>,
    pub priority: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Accumulated focused minutes under the legacy field name.
    #[serde(default)]
    pub pomodoros: u32,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub completed_dates: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub positions_by_date: BTreeMap<String, u32>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub positions_by_time_frame: BTreeMap<String, u32>,
}

/// Why a persisted record could not be mapped onto the domain model.
/// Rendered into `SnapshotError::InvalidData` by the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordConversionError {
    pub id: String,
    pub field: &'static str,
    pub value: String,
}

impl std::fmt::Display for RecordConversionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "entry `{}`: invalid {} value `{}`",
            self.id, self.field, self.value
        )
    }
}

impl std::error::Error for RecordConversionError {}

impl EntryRecord {
    fn invalid(&self, field: &'static str, value: &str) -> RecordConversionError {
        RecordConversionError {
            id: self.id.clone(),
            field,
            value: value.to_string(),
        }
    }

    /// Maps the wire record onto the domain model, splitting the merged
    /// `repeatedDays` convention back into a typed recurrence and the
    /// per-date/per-period overlay maps into occurrence keys.
    pub fn into_entry(self) -> Result<Entry, RecordConversionError> {
        let kind = EntryKind::parse(&self.kind)
            .ok_or_else(|| self.invalid("type", &self.kind))?;
        let priority = Priority::parse(&self.priority)
            .ok_or_else(|| self.invalid("priority", &self.priority))?;

        let due_date = match &self.due_date {
            Some(text) => {
                Some(parse_date(text).map_err(|_| self.invalid("dueDate", text))?)
            }
            None => None,
        };
        let time_frame = match &self.time_frame_key {
            Some(text) => Some(
                text.parse::<TimeFrameKey>()
                    .map_err(|_| self.invalid("timeFrameKey", text))?,
            ),
            None => None,
        };

        let recurrence = self.recurrence_for(kind)?;

        let mut completed_occurrences = BTreeSet::new();
        for text in &self.completed_dates {
            let key = text
                .parse::<OccurrenceKey>()
                .map_err(|_| self.invalid("completedDates", text))?;
            completed_occurrences.insert(key);
        }

        let mut occurrence_positions = BTreeMap::new();
        for (text, position) in &self.positions_by_date {
            let date = parse_date(text).map_err(|_| self.invalid("positionsByDate", text))?;
            occurrence_positions.insert(OccurrenceKey::Date(date), *position);
        }
        for (text, position) in &self.positions_by_time_frame {
            let key = text
                .parse::<TimeFrameKey>()
                .map_err(|_| self.invalid("positionsByTimeFrame", text))?;
            occurrence_positions.insert(OccurrenceKey::TimeFrame(key), *position);
        }

        Ok(Entry {
            id: self.id,
            name: self.name,
            description: self.description,
            kind,
            due_date,
            time_frame,
            recurrence,
            priority,
            tags: self.tags.into_iter().collect(),
            focus_minutes: self.pomodoros,
            completed: self.is_completed,
            completed_occurrences,
            position: self.position,
            occurrence_positions,
        })
    }

    /// Decodes the overloaded `repeatedDays` set: weekday names for
    /// daily tasks, the entry's own kind string as an every-period
    /// marker for goals.
    fn recurrence_for(&self, kind: EntryKind) -> Result<Recurrence, RecordConversionError> {
        if self.repeated_days.is_empty() {
            return Ok(Recurrence::None);
        }
        if kind != EntryKind::Daily {
            if self.repeated_days.iter().any(|day| day == kind.as_str()) {
                return Ok(Recurrence::EveryPeriod);
            }
            return Err(self.invalid("repeatedDays", &self.repeated_days.join(",")));
        }
        let mut days = HashSet::new();
        for text in &self.repeated_days {
            let day = parse_weekday(text).ok_or_else(|| self.invalid("repeatedDays", text))?;
            days.insert(day);
        }
        Ok(Recurrence::Weekdays(days))
    }
}

impl From<&Entry> for EntryRecord {
    fn from(entry: &Entry) -> Self {
        let repeated_days = match &entry.recurrence {
            Recurrence::None => Vec::new(),
            Recurrence::Weekdays(days) => {
                // Deterministic Monday-first order in the wire format.
                let mut sorted: Vec<_> = days.iter().copied().collect();
                sorted.sort_by_key(|day| day.num_days_from_monday());
                sorted
                    .into_iter()
                    .map(|day| weekday_name(day).to_string())
                    .collect()
            }
            Recurrence::EveryPeriod => vec![entry.kind.as_str().to_string()],
        };

        let mut positions_by_date = BTreeMap::new();
        let mut positions_by_time_frame = BTreeMap::new();
        for (key, position) in &entry.occurrence_positions {
            match key {
                OccurrenceKey::Date(date) => {
                    positions_by_date.insert(date.format(DATE_FORMAT).to_string(), *position);
                }
                OccurrenceKey::TimeFrame(frame) => {
                    positions_by_time_frame.insert(frame.to_string(), *position);
                }
            }
        }

        Self {
            id: entry.id.clone(),
            name: entry.name.clone(),
            description: entry.description.clone(),
            kind: entry.kind.as_str().to_string(),
            due_date: entry
                .due_date
                .map(|date| date.format(DATE_FORMAT).to_string()),
            time_frame_key: entry.time_frame.map(|key| key.to_string()),
            repeated_days,
            priority: entry.priority.as_str().to_string(),
            tags: entry.tags.iter().cloned().collect(),
            pomodoros: entry.focus_minutes,
            is_completed: entry.completed,
            completed_dates: entry
                .completed_occurrences
                .iter()
                .map(|key| key.to_string())
                .collect(),
            position: entry.position,
            positions_by_date,
            positions_by_time_frame,
        }
    }
}
