// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use chrono::{DateTime, TimeZone, Utc};
use std::collections::HashMap;

use headcount_domain::{Count, OccupancyCounts, Snapshot, SnapshotKey};
use headcount_persistence::{AreaFilter, PersistenceError, SnapshotStore, TimestampOrder};

use crate::{CorrectSnapshotRequest, SubmitSnapshotRequest};

/// Store stub that counts calls and hands back whatever rows were written
/// into it, in write order.
pub struct RecordingStore {
    pub rows: Vec<(SnapshotKey, Snapshot)>,
    pub creates: usize,
    pub updates: usize,
    pub queries: usize,
    next_key: i64,
}

impl RecordingStore {
    pub const fn new() -> Self {
        Self {
            rows: Vec::new(),
            creates: 0,
            updates: 0,
            queries: 0,
            next_key: 1,
        }
    }
}

impl SnapshotStore for RecordingStore {
    fn create(&mut self, snapshot: &Snapshot) -> Result<SnapshotKey, PersistenceError> {
        self.creates += 1;
        let key: SnapshotKey = SnapshotKey::new(self.next_key);
        self.next_key += 1;
        self.rows.push((key, snapshot.clone()));
        Ok(key)
    }

    fn update(&mut self, key: SnapshotKey, snapshot: &Snapshot) -> Result<(), PersistenceError> {
        self.updates += 1;
        self.rows.retain(|(existing, _)| *existing != key);
        self.rows.push((key, snapshot.clone()));
        Ok(())
    }

    fn query(
        &mut self,
        _filter: AreaFilter<'_>,
        _order: TimestampOrder,
    ) -> Result<(Vec<Snapshot>, Vec<SnapshotKey>), PersistenceError> {
        self.queries += 1;
        let snapshots: Vec<Snapshot> = self.rows.iter().map(|(_, row)| row.clone()).collect();
        let keys: Vec<SnapshotKey> = self.rows.iter().map(|(key, _)| *key).collect();
        Ok((snapshots, keys))
    }
}

pub fn create_test_counts() -> OccupancyCounts {
    OccupancyCounts::Breakdown {
        total: Count::from(10u8),
        grouped: Count::from(4u8),
        solitary: Count::from(3u8),
        asleep: Count::from(3u8),
    }
}

pub fn create_test_instant(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, day, hour, 30, 0).unwrap()
}

pub fn create_test_snapshot(area: &str, taken_at: DateTime<Utc>) -> Snapshot {
    Snapshot::new(
        area,
        create_test_counts(),
        Some(Count::from(45u8)),
        Some(Count::from(6u8)),
        taken_at,
    )
}

/// Valid third-generation count fields summing 10 = 4 + 3 + 3.
pub fn breakdown_fields() -> HashMap<String, String> {
    let mut fields: HashMap<String, String> = HashMap::new();
    fields.insert(String::from("total"), String::from("10"));
    fields.insert(String::from("grouped"), String::from("4"));
    fields.insert(String::from("solitary"), String::from("3"));
    fields.insert(String::from("asleep"), String::from("3"));
    fields
}

pub fn create_submit_request(area: &str) -> SubmitSnapshotRequest {
    SubmitSnapshotRequest {
        area: String::from(area),
        fields: breakdown_fields(),
    }
}

pub fn create_correct_request(area: &str, id: &str, ts: &str) -> CorrectSnapshotRequest {
    let mut fields: HashMap<String, String> = breakdown_fields();
    fields.insert(String::from("id"), String::from(id));
    fields.insert(String::from("ts"), String::from(ts));
    CorrectSnapshotRequest {
        area: String::from(area),
        fields,
    }
}
