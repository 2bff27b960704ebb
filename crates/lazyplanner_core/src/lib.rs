//! Core domain logic for LazyPlanner.
//! This crate is the single source of truth for scheduling invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod service;
pub mod snapshot;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::entry::{
    Entry, EntryId, EntryKind, EntryPatch, EntryValidationError, Priority, Recurrence,
    UNSET_POSITION,
};
pub use model::time_frame::{
    parse_date, parse_weekday, weekday_name, OccurrenceKey, ParseKeyError, TimeFrameKey,
};
pub use service::collaborators::{
    CompletionListener, IdGenerator, NoopCompletionListener, UuidIdGenerator,
};
pub use service::planner_service::{NewEntry, PlannerService};
pub use snapshot::record::EntryRecord;
pub use snapshot::snapshot_repo::{
    SnapshotError, SnapshotRepository, SnapshotResult, SqliteSnapshotRepository,
};
pub use store::planner_store::{PlannerStore, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
