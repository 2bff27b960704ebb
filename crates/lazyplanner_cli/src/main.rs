//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `lazyplanner_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use lazyplanner_core::db::open_db_in_memory;
use lazyplanner_core::{SnapshotRepository, SqliteSnapshotRepository};

fn main() {
    println!("lazyplanner_core version={}", lazyplanner_core::core_version());

    // Exercise the storage path end to end against a throwaway database.
    let status = match open_db_in_memory()
        .map_err(|err| err.to_string())
        .and_then(|conn| {
            SqliteSnapshotRepository::new(&conn)
                .load()
                .map_err(|err| err.to_string())
        }) {
        Ok(entries) => format!("ok entries={}", entries.len()),
        Err(err) => format!("error {err}"),
    };
    println!("lazyplanner_core storage={status}");
}
