// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Snapshot read paths.

use diesel::prelude::*;
use diesel::SqliteConnection;
use headcount_domain::{Snapshot, SnapshotKey};

use crate::data_models::SnapshotRow;
use crate::diesel_schema;
use crate::error::PersistenceError;
use crate::store::{AreaFilter, TimestampOrder};

/// Loads every snapshot matching `filter` in `order`, paired with its key.
///
/// Timestamps are stored as fixed-width RFC 3339 text, so ordering on the
/// text column is chronological. The key is a secondary sort so rows
/// sharing an instant come back in a deterministic order.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `filter` - Which areas to cover
/// * `order` - Timestamp ordering of the batch
///
/// # Returns
///
/// Parallel vectors of snapshots and their keys, index-aligned.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row cannot be decoded.
pub fn query_snapshots(
    conn: &mut SqliteConnection,
    filter: AreaFilter<'_>,
    order: TimestampOrder,
) -> Result<(Vec<Snapshot>, Vec<SnapshotKey>), PersistenceError> {
    let mut query = diesel_schema::snapshots::table.into_boxed();

    if let AreaFilter::Area(area) = filter {
        query = query.filter(diesel_schema::snapshots::area.eq(area.to_string()));
    }

    query = match order {
        TimestampOrder::NewestFirst => query
            .order(diesel_schema::snapshots::taken_at.desc())
            .then_order_by(diesel_schema::snapshots::snapshot_id.desc()),
        TimestampOrder::OldestFirst => query
            .order(diesel_schema::snapshots::taken_at.asc())
            .then_order_by(diesel_schema::snapshots::snapshot_id.asc()),
    };

    let rows: Vec<SnapshotRow> = query.load::<SnapshotRow>(conn)?;

    let mut snapshots: Vec<Snapshot> = Vec::with_capacity(rows.len());
    let mut keys: Vec<SnapshotKey> = Vec::with_capacity(rows.len());
    for row in rows {
        let (snapshot, key): (Snapshot, SnapshotKey) = row.into_snapshot()?;
        snapshots.push(snapshot);
        keys.push(key);
    }

    Ok((snapshots, keys))
}
