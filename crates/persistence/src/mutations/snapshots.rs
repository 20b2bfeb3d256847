// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Snapshot write paths.

use diesel::prelude::*;
use diesel::SqliteConnection;
use headcount_domain::{Snapshot, SnapshotKey};
use tracing::debug;

use crate::backend;
use crate::data_models::{encode_reading, encode_taken_at};
use crate::diesel_schema;
use crate::error::PersistenceError;

/// Persists a new snapshot and returns the key the database assigned.
///
/// The `snapshots` table uses `AUTOINCREMENT`, so keys are never reused and
/// an insert can never land on an existing row.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `snapshot` - The snapshot to persist
///
/// # Errors
///
/// Returns an error if serialization or the insert fails.
pub fn create_snapshot(
    conn: &mut SqliteConnection,
    snapshot: &Snapshot,
) -> Result<SnapshotKey, PersistenceError> {
    let counts_json: String = serde_json::to_string(&snapshot.counts())?;

    diesel::insert_into(diesel_schema::snapshots::table)
        .values((
            diesel_schema::snapshots::area.eq(snapshot.area()),
            diesel_schema::snapshots::counts_json.eq(&counts_json),
            diesel_schema::snapshots::decibels.eq(encode_reading(snapshot.decibels())),
            diesel_schema::snapshots::laptops.eq(encode_reading(snapshot.laptops())),
            diesel_schema::snapshots::taken_at.eq(encode_taken_at(snapshot.taken_at())),
        ))
        .execute(conn)?;

    let snapshot_id: i64 = backend::sqlite::get_last_insert_rowid(conn)?;

    debug!(snapshot_id, area = snapshot.area(), "Persisted new snapshot");

    Ok(SnapshotKey::new(snapshot_id))
}

/// Writes a snapshot under a known key, overwriting any existing row.
///
/// `REPLACE INTO` keeps this a single-statement upsert: the row is created
/// if the key is free and replaced wholesale if it is not.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `key` - The key to write under
/// * `snapshot` - The snapshot to persist
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn upsert_snapshot(
    conn: &mut SqliteConnection,
    key: SnapshotKey,
    snapshot: &Snapshot,
) -> Result<(), PersistenceError> {
    let counts_json: String = serde_json::to_string(&snapshot.counts())?;

    diesel::replace_into(diesel_schema::snapshots::table)
        .values((
            diesel_schema::snapshots::snapshot_id.eq(key.value()),
            diesel_schema::snapshots::area.eq(snapshot.area()),
            diesel_schema::snapshots::counts_json.eq(&counts_json),
            diesel_schema::snapshots::decibels.eq(encode_reading(snapshot.decibels())),
            diesel_schema::snapshots::laptops.eq(encode_reading(snapshot.laptops())),
            diesel_schema::snapshots::taken_at.eq(encode_taken_at(snapshot.taken_at())),
        ))
        .execute(conn)?;

    debug!(
        snapshot_id = key.value(),
        area = snapshot.area(),
        "Wrote snapshot under existing key"
    );

    Ok(())
}
