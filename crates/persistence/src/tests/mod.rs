// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod store_tests;

use chrono::{DateTime, TimeZone, Utc};
use headcount_domain::{Count, OccupancyCounts, Snapshot};

pub fn create_test_counts(total: u8, grouped: u8, solitary: u8, asleep: u8) -> OccupancyCounts {
    OccupancyCounts::Breakdown {
        total: Count::from(total),
        grouped: Count::from(grouped),
        solitary: Count::from(solitary),
        asleep: Count::from(asleep),
    }
}

pub fn create_test_instant(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, day, hour, 30, 0).unwrap()
}

pub fn create_test_snapshot(area: &str, taken_at: DateTime<Utc>) -> Snapshot {
    Snapshot::new(
        area,
        create_test_counts(10, 4, 3, 3),
        Some(Count::from(45)),
        Some(Count::from(6)),
        taken_at,
    )
}
