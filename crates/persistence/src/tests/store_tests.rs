// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::{create_test_counts, create_test_instant, create_test_snapshot};
use crate::{AreaFilter, Persistence, SnapshotStore, TimestampOrder};
use chrono::{DateTime, Utc};
use headcount_domain::{Count, OccupancyCounts, Snapshot, SnapshotKey};

#[test]
fn test_create_assigns_distinct_keys_to_identical_snapshots() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let snapshot: Snapshot = create_test_snapshot("Reading Room", create_test_instant(1, 9));

    let first: SnapshotKey = persistence.create(&snapshot).unwrap();
    let second: SnapshotKey = persistence.create(&snapshot).unwrap();

    assert_ne!(first, second);

    let (snapshots, keys) = persistence
        .query(AreaFilter::All, TimestampOrder::NewestFirst)
        .unwrap();
    assert_eq!(snapshots.len(), 2);
    assert_eq!(keys.len(), 2);
}

#[test]
fn test_create_then_query_round_trips_every_field() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let taken_at: DateTime<Utc> = create_test_instant(3, 14);
    let snapshot: Snapshot = Snapshot::new(
        "Atrium",
        create_test_counts(12, 5, 4, 3),
        Some(Count::from(52)),
        None,
        taken_at,
    );

    let key: SnapshotKey = persistence.create(&snapshot).unwrap();

    let (snapshots, keys) = persistence
        .query(AreaFilter::Area("Atrium"), TimestampOrder::NewestFirst)
        .unwrap();
    assert_eq!(snapshots.len(), 1);
    assert_eq!(keys, vec![key]);
    assert_eq!(snapshots[0], snapshot);
}

#[test]
fn test_query_filters_by_area_equality() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    persistence
        .create(&create_test_snapshot("Reading Room", create_test_instant(1, 9)))
        .unwrap();
    persistence
        .create(&create_test_snapshot("Atrium", create_test_instant(1, 10)))
        .unwrap();
    persistence
        .create(&create_test_snapshot("Reading Room", create_test_instant(1, 11)))
        .unwrap();

    let (snapshots, keys) = persistence
        .query(AreaFilter::Area("Reading Room"), TimestampOrder::NewestFirst)
        .unwrap();

    assert_eq!(snapshots.len(), 2);
    assert_eq!(keys.len(), 2);
    assert!(snapshots.iter().all(|s| s.area() == "Reading Room"));
}

#[test]
fn test_query_all_covers_every_area() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    persistence
        .create(&create_test_snapshot("Reading Room", create_test_instant(1, 9)))
        .unwrap();
    persistence
        .create(&create_test_snapshot("Atrium", create_test_instant(1, 10)))
        .unwrap();

    let (snapshots, _) = persistence
        .query(AreaFilter::All, TimestampOrder::NewestFirst)
        .unwrap();

    assert_eq!(snapshots.len(), 2);
}

#[test]
fn test_query_orders_newest_first_with_aligned_keys() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let oldest: SnapshotKey = persistence
        .create(&create_test_snapshot("Reading Room", create_test_instant(1, 9)))
        .unwrap();
    let newest: SnapshotKey = persistence
        .create(&create_test_snapshot("Reading Room", create_test_instant(2, 9)))
        .unwrap();
    let middle: SnapshotKey = persistence
        .create(&create_test_snapshot("Reading Room", create_test_instant(1, 15)))
        .unwrap();

    let (snapshots, keys) = persistence
        .query(AreaFilter::All, TimestampOrder::NewestFirst)
        .unwrap();

    assert_eq!(keys, vec![newest, middle, oldest]);
    assert_eq!(snapshots[0].taken_at(), create_test_instant(2, 9));
    assert_eq!(snapshots[2].taken_at(), create_test_instant(1, 9));
}

#[test]
fn test_query_orders_oldest_first() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let first: SnapshotKey = persistence
        .create(&create_test_snapshot("Reading Room", create_test_instant(2, 9)))
        .unwrap();
    let second: SnapshotKey = persistence
        .create(&create_test_snapshot("Reading Room", create_test_instant(1, 9)))
        .unwrap();

    let (_, keys) = persistence
        .query(AreaFilter::All, TimestampOrder::OldestFirst)
        .unwrap();

    assert_eq!(keys, vec![second, first]);
}

#[test]
fn test_update_overwrites_the_row_for_that_key() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let original: Snapshot = create_test_snapshot("Reading Room", create_test_instant(1, 9));
    let key: SnapshotKey = persistence.create(&original).unwrap();

    let corrected: Snapshot = Snapshot::new(
        "Reading Room",
        create_test_counts(8, 3, 3, 2),
        None,
        Some(Count::from(4)),
        create_test_instant(1, 10),
    );
    persistence.update(key, &corrected).unwrap();

    let (snapshots, keys) = persistence
        .query(AreaFilter::Area("Reading Room"), TimestampOrder::NewestFirst)
        .unwrap();

    // Exactly one row for the key; the overwrite left no duplicate revision.
    assert_eq!(keys, vec![key]);
    assert_eq!(snapshots, vec![corrected]);
}

#[test]
fn test_update_creates_the_row_when_the_key_is_free() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let key: SnapshotKey = SnapshotKey::new(777);
    let snapshot: Snapshot = create_test_snapshot("Atrium", create_test_instant(4, 12));

    persistence.update(key, &snapshot).unwrap();

    let (snapshots, keys) = persistence
        .query(AreaFilter::Area("Atrium"), TimestampOrder::NewestFirst)
        .unwrap();
    assert_eq!(keys, vec![key]);
    assert_eq!(snapshots, vec![snapshot]);
}

#[test]
fn test_update_can_move_a_snapshot_between_areas() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let original: Snapshot = create_test_snapshot("Reading Room", create_test_instant(1, 9));
    let key: SnapshotKey = persistence.create(&original).unwrap();

    let moved: Snapshot = create_test_snapshot("Atrium", create_test_instant(1, 9));
    persistence.update(key, &moved).unwrap();

    let (old_area, _) = persistence
        .query(AreaFilter::Area("Reading Room"), TimestampOrder::NewestFirst)
        .unwrap();
    let (new_area, new_keys) = persistence
        .query(AreaFilter::Area("Atrium"), TimestampOrder::NewestFirst)
        .unwrap();

    assert!(old_area.is_empty());
    assert_eq!(new_keys, vec![key]);
    assert_eq!(new_area[0].area(), "Atrium");
}

#[test]
fn test_absent_readings_round_trip_as_none() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let snapshot: Snapshot = Snapshot::new(
        "Reading Room",
        create_test_counts(10, 4, 3, 3),
        None,
        None,
        create_test_instant(1, 9),
    );

    persistence.create(&snapshot).unwrap();

    let (snapshots, _) = persistence
        .query(AreaFilter::All, TimestampOrder::NewestFirst)
        .unwrap();
    assert_eq!(snapshots[0].decibels(), None);
    assert_eq!(snapshots[0].laptops(), None);
}

#[test]
fn test_zero_reading_is_distinct_from_absent() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let snapshot: Snapshot = Snapshot::new(
        "Reading Room",
        create_test_counts(10, 4, 3, 3),
        Some(Count::from(0)),
        None,
        create_test_instant(1, 9),
    );

    persistence.create(&snapshot).unwrap();

    let (snapshots, _) = persistence
        .query(AreaFilter::All, TimestampOrder::NewestFirst)
        .unwrap();
    assert_eq!(snapshots[0].decibels(), Some(Count::from(0)));
}

#[test]
fn test_rows_from_every_generation_coexist() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let people: Snapshot = Snapshot::new(
        "Reading Room",
        OccupancyCounts::People {
            people: Count::from(31),
        },
        None,
        None,
        create_test_instant(1, 9),
    );
    let seating: Snapshot = Snapshot::new(
        "Reading Room",
        OccupancyCounts::Seating {
            seated: Count::from(8),
            floored: Count::from(2),
        },
        Some(Count::from(40)),
        None,
        create_test_instant(1, 10),
    );
    let breakdown: Snapshot =
        create_test_snapshot("Reading Room", create_test_instant(1, 11));

    persistence.create(&people).unwrap();
    persistence.create(&seating).unwrap();
    persistence.create(&breakdown).unwrap();

    let (snapshots, _) = persistence
        .query(AreaFilter::All, TimestampOrder::OldestFirst)
        .unwrap();
    assert_eq!(snapshots, vec![people, seating, breakdown]);
}
