use lazyplanner_core::{
    Entry, EntryKind, OccurrenceKey, PlannerStore, Recurrence, TimeFrameKey,
};

fn goal(id: &str, kind: EntryKind, frame: &str) -> Entry {
    let mut entry = Entry::new(id, kind, format!("goal {id}"));
    entry.time_frame = Some(frame.parse().unwrap());
    entry
}

fn recurring_goal(id: &str, kind: EntryKind, frame: &str) -> Entry {
    let mut entry = goal(id, kind, frame);
    entry.recurrence = Recurrence::EveryPeriod;
    entry
}

#[test]
fn recurring_monthly_goal_appears_in_later_months_only() {
    let mut store = PlannerStore::new();
    store
        .add(recurring_goal("g1", EntryKind::Monthly, "2024-01"))
        .unwrap();

    let march = "2024-03".parse::<TimeFrameKey>().unwrap();
    let december_before = "2023-12".parse::<TimeFrameKey>().unwrap();

    let in_march = store.entries_by_kind(EntryKind::Monthly, Some(&march));
    assert_eq!(in_march.len(), 1);
    assert_eq!(in_march[0].id, "g1");

    assert!(store
        .entries_by_kind(EntryKind::Monthly, Some(&december_before))
        .is_empty());
}

#[test]
fn non_recurring_goal_stays_in_its_own_period() {
    let mut store = PlannerStore::new();
    store.add(goal("g1", EntryKind::Monthly, "2024-01")).unwrap();

    let january = "2024-01".parse::<TimeFrameKey>().unwrap();
    let february = "2024-02".parse::<TimeFrameKey>().unwrap();

    assert_eq!(store.entries_by_kind(EntryKind::Monthly, Some(&january)).len(), 1);
    assert!(store.entries_by_kind(EntryKind::Monthly, Some(&february)).is_empty());
}

#[test]
fn recurring_weekly_goal_spans_year_boundaries() {
    let mut store = PlannerStore::new();
    store
        .add(recurring_goal("g1", EntryKind::Weekly, "2024-W52"))
        .unwrap();

    let first_week_2025 = "2025-W01".parse::<TimeFrameKey>().unwrap();
    let earlier_week = "2024-W50".parse::<TimeFrameKey>().unwrap();

    assert_eq!(
        store.entries_by_kind(EntryKind::Weekly, Some(&first_week_2025)).len(),
        1
    );
    assert!(store
        .entries_by_kind(EntryKind::Weekly, Some(&earlier_week))
        .is_empty());
}

#[test]
fn kind_filter_excludes_other_horizons() {
    let mut store = PlannerStore::new();
    store.add(goal("m1", EntryKind::Monthly, "2024-01")).unwrap();
    store.add(goal("y1", EntryKind::Yearly, "2024")).unwrap();
    store.add(goal("l1", EntryKind::Life, "life")).unwrap();

    let monthly = store.entries_by_kind(EntryKind::Monthly, None);
    assert_eq!(monthly.len(), 1);
    assert_eq!(monthly[0].id, "m1");

    let yearly = "2024".parse::<TimeFrameKey>().unwrap();
    let in_2024 = store.entries_by_kind(EntryKind::Yearly, Some(&yearly));
    assert_eq!(in_2024.len(), 1);
    assert_eq!(in_2024[0].id, "y1");
}

#[test]
fn goals_in_one_period_get_sequential_default_positions() {
    let mut store = PlannerStore::new();
    store.add(goal("g1", EntryKind::Monthly, "2024-01")).unwrap();
    store.add(goal("g2", EntryKind::Monthly, "2024-01")).unwrap();
    store.add(goal("other", EntryKind::Monthly, "2024-02")).unwrap();

    assert_eq!(store.get("g1").unwrap().position, Some(1));
    assert_eq!(store.get("g2").unwrap().position, Some(2));
    // Different period, separate bucket.
    assert_eq!(store.get("other").unwrap().position, Some(1));
}

#[test]
fn recurring_goals_sort_by_their_per_period_overlay() {
    let mut store = PlannerStore::new();
    store
        .add(recurring_goal("g1", EntryKind::Monthly, "2024-01"))
        .unwrap();
    store
        .add(recurring_goal("g2", EntryKind::Monthly, "2024-01"))
        .unwrap();

    let march = "2024-03".parse::<TimeFrameKey>().unwrap();
    let march_key = OccurrenceKey::TimeFrame(march);
    store.reorder(&march_key, &["g2", "g1"]);

    let in_march: Vec<&str> = store
        .entries_by_kind(EntryKind::Monthly, Some(&march))
        .iter()
        .map(|entry| entry.id.as_str())
        .collect();
    assert_eq!(in_march, ["g2", "g1"]);

    // January ordering still follows the seeded anchor overlay.
    let january = "2024-01".parse::<TimeFrameKey>().unwrap();
    let in_january: Vec<&str> = store
        .entries_by_kind(EntryKind::Monthly, Some(&january))
        .iter()
        .map(|entry| entry.id.as_str())
        .collect();
    assert_eq!(in_january, ["g1", "g2"]);
}

#[test]
fn life_goals_share_the_single_life_bucket() {
    let mut store = PlannerStore::new();
    store.add(recurring_goal("l1", EntryKind::Life, "life")).unwrap();

    let life = TimeFrameKey::Life;
    assert_eq!(store.entries_by_kind(EntryKind::Life, Some(&life)).len(), 1);
}
