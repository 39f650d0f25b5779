//! Integration tests for the in-memory schedule store.
//!
//! These tests exercise the full store trait surface through the public
//! crate API: registration, the append-only entry ledger, streak and total
//! queries, and window-scoped deletion.

use chrono::NaiveDate;

use shift_scheduler::db::{
    EmployeeStore, EntryStore, LocalStore, ScheduleEntry, ScheduleQueries, StoreError,
};
use shift_scheduler::models::{Employee, EmployeeId};
use shift_scheduler::DateRange;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

async fn register(store: &LocalStore, name: &str) -> EmployeeId {
    store
        .register_employee(&Employee::new(name).with_available_from(date(2020, 1, 1)))
        .await
        .unwrap()
}

#[tokio::test]
async fn test_registry_round_trips_full_profiles() {
    let store = LocalStore::new();

    let noa = Employee::new("Noa")
        .with_manager()
        .with_aliases(["noa", "n."])
        .with_partner("Amit")
        .with_min_home_days(3)
        .with_max_shift_days(10)
        .with_mandatory_home(DateRange::new(date(2025, 2, 1), date(2025, 2, 3)).unwrap())
        .with_available_from(date(2024, 6, 1));
    let amit = Employee::new("Amit").with_available_from(date(2024, 6, 1));

    let noa_id = store.register_employee(&noa).await.unwrap();
    let amit_id = store.register_employee(&amit).await.unwrap();
    assert_ne!(noa_id, amit_id);

    let loaded = store.load_employees().await.unwrap();
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded[0], (noa_id, noa));
    assert_eq!(loaded[1], (amit_id, amit));

    assert_eq!(store.employee_id("Noa").await.unwrap(), Some(noa_id));
    assert_eq!(store.employee_id("noa").await.unwrap(), None);
    assert_eq!(store.employee_id("Ghost").await.unwrap(), None);
}

#[tokio::test]
async fn test_ledger_rejects_double_writes_and_unknown_ids() {
    let store = LocalStore::new();
    let noa = register(&store, "Noa").await;

    store.upsert_entry(noa, date(2025, 1, 3), true).await.unwrap();
    let err = store.upsert_entry(noa, date(2025, 1, 3), false).await.unwrap_err();
    assert!(matches!(err, StoreError::DuplicateEntry { .. }));

    let err = store
        .upsert_entry(EmployeeId::new(999), date(2025, 1, 3), true)
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::UnknownEmployee(_)));

    // The original decision survived both rejections
    assert_eq!(store.on_shift_flag(noa, date(2025, 1, 3)).await.unwrap(), Some(true));
}

#[tokio::test]
async fn test_window_reads_order_by_date_then_id() {
    let store = LocalStore::new();
    let noa = register(&store, "Noa").await;
    let amit = register(&store, "Amit").await;

    // Written out of order on purpose
    store.upsert_entry(amit, date(2025, 1, 4), false).await.unwrap();
    store.upsert_entry(noa, date(2025, 1, 3), true).await.unwrap();
    store.upsert_entry(amit, date(2025, 1, 3), true).await.unwrap();
    store.upsert_entry(noa, date(2025, 1, 5), false).await.unwrap();

    let window = store
        .entries_in_window(date(2025, 1, 3), date(2025, 1, 4))
        .await
        .unwrap();
    assert_eq!(
        window,
        vec![
            ScheduleEntry { employee_id: noa, date: date(2025, 1, 3), on_shift: true },
            ScheduleEntry { employee_id: amit, date: date(2025, 1, 3), on_shift: true },
            ScheduleEntry { employee_id: amit, date: date(2025, 1, 4), on_shift: false },
        ]
    );

    let noa_entries = store.entries_for_employee(noa).await.unwrap();
    assert_eq!(noa_entries.len(), 2);
    assert_eq!(noa_entries[0].date, date(2025, 1, 3));
    assert_eq!(noa_entries[1].date, date(2025, 1, 5));

    assert_eq!(
        store.employees_on_shift(date(2025, 1, 3)).await.unwrap(),
        vec![noa, amit]
    );
    assert!(store.employees_on_shift(date(2025, 1, 4)).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_streaks_stop_at_gaps_and_kind_changes() {
    let store = LocalStore::new();
    let noa = register(&store, "Noa").await;

    // Shift 1-2, home 3-5, shift 7 (the 6th is unrecorded)
    store.upsert_entry(noa, date(2025, 1, 1), true).await.unwrap();
    store.upsert_entry(noa, date(2025, 1, 2), true).await.unwrap();
    for day in 3..=5 {
        store.upsert_entry(noa, date(2025, 1, day), false).await.unwrap();
    }
    store.upsert_entry(noa, date(2025, 1, 7), true).await.unwrap();

    assert_eq!(store.consecutive_same_kind(noa, date(2025, 1, 2), true).await.unwrap(), 2);
    assert_eq!(store.consecutive_same_kind(noa, date(2025, 1, 5), false).await.unwrap(), 3);
    // The gap on the 6th isolates the 7th
    assert_eq!(store.consecutive_same_kind(noa, date(2025, 1, 7), true).await.unwrap(), 1);
    // Asking for the wrong kind at an anchor yields zero
    assert_eq!(store.consecutive_same_kind(noa, date(2025, 1, 5), true).await.unwrap(), 0);

    assert_eq!(store.total_days(noa, true, date(2025, 1, 31)).await.unwrap(), 3);
    assert_eq!(store.total_days(noa, false, date(2025, 1, 31)).await.unwrap(), 3);
    assert_eq!(store.total_days(noa, true, date(2025, 1, 2)).await.unwrap(), 2);

    assert_eq!(
        store.schedule_date_range().await.unwrap(),
        Some((date(2025, 1, 1), date(2025, 1, 7)))
    );
}

#[tokio::test]
async fn test_clear_window_scopes_deletion() {
    let store = LocalStore::new();
    let noa = register(&store, "Noa").await;
    for day in 1..=6 {
        store.upsert_entry(noa, date(2025, 1, day), day % 2 == 0).await.unwrap();
    }

    store.clear_window(date(2025, 1, 2), date(2025, 1, 4)).await.unwrap();

    let remaining = store
        .entries_in_window(date(2025, 1, 1), date(2025, 1, 31))
        .await
        .unwrap();
    let dates: Vec<NaiveDate> = remaining.iter().map(|e| e.date).collect();
    assert_eq!(dates, vec![date(2025, 1, 1), date(2025, 1, 5), date(2025, 1, 6)]);

    store.clear_all_entries().await.unwrap();
    assert_eq!(store.schedule_date_range().await.unwrap(), None);
    // Registrations are untouched
    assert_eq!(store.employee_id("Noa").await.unwrap(), Some(noa));
}

#[tokio::test]
async fn test_clones_share_the_same_ledger() {
    let store = LocalStore::new();
    let noa = register(&store, "Noa").await;

    let handle = store.clone();
    handle.upsert_entry(noa, date(2025, 1, 3), true).await.unwrap();

    assert_eq!(store.on_shift_flag(noa, date(2025, 1, 3)).await.unwrap(), Some(true));
    assert_eq!(store.entry_count(), handle.entry_count());
}
