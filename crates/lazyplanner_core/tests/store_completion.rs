use chrono::{NaiveDate, Weekday};
use lazyplanner_core::{Entry, EntryKind, OccurrenceKey, PlannerStore, Recurrence};
use std::collections::HashSet;

fn date(text: &str) -> NaiveDate {
    lazyplanner_core::parse_date(text).unwrap()
}

fn day_key(text: &str) -> OccurrenceKey {
    OccurrenceKey::Date(date(text))
}

#[test]
fn one_off_task_toggles_its_plain_flag_on_anchor() {
    let mut store = PlannerStore::new();
    let mut task = Entry::new("a", EntryKind::Daily, "ship release");
    task.due_date = Some(date("2024-05-01"));
    store.add(task).unwrap();

    let anchor = day_key("2024-05-01");
    assert!(store.toggle_complete("a", &anchor));
    assert!(store.is_completed_at("a", &anchor));
    assert!(store.get("a").unwrap().completed);
    assert!(store.get("a").unwrap().completed_occurrences.is_empty());

    assert!(!store.toggle_complete("a", &anchor));
    assert!(!store.is_completed_at("a", &anchor));
    assert!(!store.get("a").unwrap().completed);
}

#[test]
fn recurring_task_completion_is_isolated_per_date() {
    // 2024-05-07 is a Tuesday.
    let mut store = PlannerStore::new();
    let mut task = Entry::new("b", EntryKind::Daily, "water plants");
    task.due_date = Some(date("2024-05-07"));
    task.recurrence = Recurrence::Weekdays(HashSet::from([Weekday::Tue]));
    store.add(task).unwrap();

    let next_tuesday = day_key("2024-05-14");
    assert_eq!(store.entries_for_date(date("2024-05-14")).len(), 1);

    assert!(store.toggle_complete("b", &next_tuesday));
    assert!(store.is_completed_at("b", &next_tuesday));

    // The plain flag and every other occurrence stay untouched.
    let entry = store.get("b").unwrap();
    assert!(!entry.completed);
    assert_eq!(entry.completed_occurrences.len(), 1);
    assert!(!store.is_completed_at("b", &day_key("2024-05-07")));
    assert!(!store.is_completed_at("b", &day_key("2024-05-21")));

    assert!(!store.toggle_complete("b", &next_tuesday));
    assert!(!store.is_completed_at("b", &next_tuesday));
}

#[test]
fn completion_on_distinct_dates_is_independent() {
    let mut store = PlannerStore::new();
    let mut task = Entry::new("t1", EntryKind::Daily, "standup");
    task.recurrence = Recurrence::Weekdays(HashSet::from([Weekday::Mon]));
    store.add(task).unwrap();

    let d1 = day_key("2024-01-08");
    let d2 = day_key("2024-01-15");

    store.toggle_complete("t1", &d1);
    assert!(store.is_completed_at("t1", &d1));
    assert!(!store.is_completed_at("t1", &d2));

    store.toggle_complete("t1", &d2);
    store.toggle_complete("t1", &d1);
    assert!(!store.is_completed_at("t1", &d1));
    assert!(store.is_completed_at("t1", &d2));
}

#[test]
fn off_anchor_toggle_writes_the_overlay_for_one_off_tasks() {
    let mut store = PlannerStore::new();
    let mut task = Entry::new("t1", EntryKind::Daily, "ship");
    task.due_date = Some(date("2024-05-01"));
    store.add(task).unwrap();

    let off_anchor = day_key("2024-05-02");
    assert!(store.toggle_complete("t1", &off_anchor));

    let entry = store.get("t1").unwrap();
    assert!(!entry.completed);
    assert!(entry.completed_occurrences.contains(&off_anchor));
}

#[test]
fn toggle_on_unknown_id_is_a_silent_noop() {
    let mut store = PlannerStore::new();
    assert!(!store.toggle_complete("ghost", &day_key("2024-05-01")));
    assert!(store.is_empty());
}

#[test]
fn recurring_goal_completion_is_keyed_per_time_frame() {
    let mut store = PlannerStore::new();
    let mut goal = Entry::new("g1", EntryKind::Monthly, "read one book");
    goal.time_frame = Some("2024-01".parse().unwrap());
    goal.recurrence = Recurrence::EveryPeriod;
    store.add(goal).unwrap();

    let january = OccurrenceKey::TimeFrame("2024-01".parse().unwrap());
    let march = OccurrenceKey::TimeFrame("2024-03".parse().unwrap());

    assert!(store.toggle_complete("g1", &january));
    assert!(store.is_completed_at("g1", &january));
    assert!(!store.is_completed_at("g1", &march));
    assert!(!store.get("g1").unwrap().completed);
}
