use chrono::{NaiveDate, Weekday};
use lazyplanner_core::{
    Entry, EntryKind, OccurrenceKey, PlannerStore, Recurrence, StoreError,
};
use std::collections::HashSet;

fn date(text: &str) -> NaiveDate {
    lazyplanner_core::parse_date(text).unwrap()
}

fn daily(id: &str, name: &str, due: Option<&str>) -> Entry {
    let mut entry = Entry::new(id, EntryKind::Daily, name);
    entry.due_date = due.map(date);
    entry
}

fn recurring_daily(id: &str, name: &str, due: Option<&str>, days: &[Weekday]) -> Entry {
    let mut entry = daily(id, name, due);
    entry.recurrence = Recurrence::Weekdays(days.iter().copied().collect::<HashSet<_>>());
    entry
}

#[test]
fn recurring_task_appears_on_matching_weekdays_after_due_date() {
    // 2024-01-01 is a Monday.
    let mut store = PlannerStore::new();
    store
        .add(recurring_daily(
            "t1",
            "standup",
            Some("2024-01-01"),
            &[Weekday::Mon, Weekday::Wed],
        ))
        .unwrap();

    let next_monday = store.entries_for_date(date("2024-01-08"));
    assert_eq!(next_monday.len(), 1);
    assert_eq!(next_monday[0].id, "t1");

    let monday_before_due = store.entries_for_date(date("2023-12-25"));
    assert!(monday_before_due.is_empty());

    let tuesday = store.entries_for_date(date("2024-01-02"));
    assert!(tuesday.is_empty());
}

#[test]
fn one_off_task_appears_only_on_its_due_date() {
    let mut store = PlannerStore::new();
    store.add(daily("a", "ship release", Some("2024-05-01"))).unwrap();

    let on_due = store.entries_for_date(date("2024-05-01"));
    assert_eq!(on_due.len(), 1);
    assert_eq!(on_due[0].id, "a");

    assert!(store.entries_for_date(date("2024-05-02")).is_empty());
}

#[test]
fn default_positions_append_in_insertion_order() {
    let mut store = PlannerStore::new();
    store.add(daily("t1", "first", Some("2024-05-01"))).unwrap();
    store.add(daily("t2", "second", Some("2024-05-01"))).unwrap();
    store.add(daily("t3", "third", Some("2024-05-01"))).unwrap();

    let key = OccurrenceKey::Date(date("2024-05-01"));
    assert_eq!(store.position_at("t1", &key), 1);
    assert_eq!(store.position_at("t2", &key), 2);
    assert_eq!(store.position_at("t3", &key), 3);

    let visible: Vec<&str> = store
        .entries_for_date(date("2024-05-01"))
        .iter()
        .map(|entry| entry.id.as_str())
        .collect();
    assert_eq!(visible, ["t1", "t2", "t3"]);
}

#[test]
fn new_task_lands_after_recurring_tasks_visible_that_day() {
    // 2024-05-06 is a Monday.
    let mut store = PlannerStore::new();
    store
        .add(recurring_daily("r1", "standup", Some("2024-05-06"), &[Weekday::Mon]))
        .unwrap();
    store.add(daily("t1", "one-off", Some("2024-05-06"))).unwrap();

    let key = OccurrenceKey::Date(date("2024-05-06"));
    assert_eq!(store.position_at("r1", &key), 1);
    assert_eq!(store.position_at("t1", &key), 2);
}

#[test]
fn recurring_add_seeds_anchor_overlay_entry() {
    let mut store = PlannerStore::new();
    store
        .add(recurring_daily("r1", "standup", Some("2024-01-01"), &[Weekday::Mon]))
        .unwrap();

    let entry = store.get("r1").unwrap();
    let anchor = OccurrenceKey::Date(date("2024-01-01"));
    assert_eq!(entry.occurrence_positions.get(&anchor), Some(&1));
    assert_eq!(entry.position, Some(1));
}

#[test]
fn duplicate_id_is_rejected() {
    let mut store = PlannerStore::new();
    store.add(daily("t1", "first", Some("2024-05-01"))).unwrap();

    let err = store.add(daily("t1", "imposter", Some("2024-05-02"))).unwrap_err();
    assert!(matches!(err, StoreError::DuplicateId(id) if id == "t1"));
    assert_eq!(store.len(), 1);
    assert_eq!(store.get("t1").unwrap().name, "first");
}

#[test]
fn delete_is_idempotent_and_silent_on_unknown_ids() {
    let mut store = PlannerStore::new();
    store.add(daily("t1", "first", Some("2024-05-01"))).unwrap();

    store.remove("t1");
    assert!(store.is_empty());

    store.remove("t1");
    store.remove("never-existed");
    assert!(store.is_empty());
}

#[test]
fn delete_drops_all_occurrence_state_with_the_entry() {
    let mut store = PlannerStore::new();
    store
        .add(recurring_daily("r1", "standup", Some("2024-01-01"), &[Weekday::Mon]))
        .unwrap();
    let key = OccurrenceKey::Date(date("2024-01-08"));
    store.toggle_complete("r1", &key);
    store.set_position("r1", &key, 4);

    store.remove("r1");
    assert!(store.get("r1").is_none());
    assert!(!store.is_completed_at("r1", &key));
    assert_eq!(store.position_at("r1", &key), 999);
}

#[test]
fn update_merges_partial_fields_and_ignores_unknown_ids() {
    use lazyplanner_core::{EntryPatch, Priority};

    let mut store = PlannerStore::new();
    store.add(daily("t1", "draft", Some("2024-05-01"))).unwrap();

    let patch = EntryPatch {
        name: Some("final".to_string()),
        priority: Some(Priority::High),
        ..EntryPatch::default()
    };
    store.update("t1", &patch);
    store.update("ghost", &patch);

    let entry = store.get("t1").unwrap();
    assert_eq!(entry.name, "final");
    assert_eq!(entry.priority, Priority::High);
    assert_eq!(entry.due_date, Some(date("2024-05-01")));
    assert!(store.get("ghost").is_none());
}

#[test]
fn update_can_clear_optional_fields() {
    use lazyplanner_core::EntryPatch;

    let mut store = PlannerStore::new();
    let mut entry = daily("t1", "draft", Some("2024-05-01"));
    entry.description = Some("with notes".to_string());
    store.add(entry).unwrap();

    let patch = EntryPatch {
        description: Some(None),
        due_date: Some(None),
        ..EntryPatch::default()
    };
    store.update("t1", &patch);

    let entry = store.get("t1").unwrap();
    assert_eq!(entry.description, None);
    assert_eq!(entry.due_date, None);
}
