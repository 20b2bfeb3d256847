// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::{DateTime, SecondsFormat, Utc};
use diesel::prelude::*;
use headcount_domain::{Count, OccupancyCounts, Snapshot, SnapshotKey};

use crate::error::PersistenceError;

/// One row of the `snapshots` table, in column order.
#[derive(Debug, Clone, Queryable)]
pub struct SnapshotRow {
    pub snapshot_id: i64,
    pub area: String,
    pub counts_json: String,
    pub decibels: Option<i32>,
    pub laptops: Option<i32>,
    pub taken_at: String,
}

impl SnapshotRow {
    /// Rebuilds the domain snapshot and its key from a stored row.
    ///
    /// # Errors
    ///
    /// Returns an error if the counts JSON, an optional reading, or the
    /// timestamp text does not decode. Rows only reach the table through
    /// validation, so a failure here means the store was modified from
    /// outside.
    pub fn into_snapshot(self) -> Result<(Snapshot, SnapshotKey), PersistenceError> {
        let counts: OccupancyCounts = serde_json::from_str(&self.counts_json)?;
        let decibels: Option<Count> = decode_reading("decibels", self.decibels)?;
        let laptops: Option<Count> = decode_reading("laptops", self.laptops)?;
        let taken_at: DateTime<Utc> = decode_taken_at(&self.taken_at)?;

        let snapshot: Snapshot = Snapshot::new(&self.area, counts, decibels, laptops, taken_at);
        Ok((snapshot, SnapshotKey::new(self.snapshot_id)))
    }
}

/// Encodes an observation instant as fixed-width RFC 3339 UTC text.
///
/// Fixed width keeps lexicographic ordering identical to chronological
/// ordering, which the query layer relies on for `ORDER BY`.
#[must_use]
pub fn encode_taken_at(taken_at: DateTime<Utc>) -> String {
    taken_at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Decodes a stored timestamp back to UTC.
///
/// # Errors
///
/// Returns an error if the text is not valid RFC 3339.
pub fn decode_taken_at(text: &str) -> Result<DateTime<Utc>, PersistenceError> {
    DateTime::parse_from_rfc3339(text)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|e| PersistenceError::RecordCorrupted(format!("bad taken_at '{text}': {e}")))
}

/// Encodes an optional count reading for a nullable integer column.
#[must_use]
pub fn encode_reading(reading: Option<Count>) -> Option<i32> {
    reading.map(|count| i32::from(count.value()))
}

/// Decodes a nullable integer column back to an optional count reading.
///
/// # Errors
///
/// Returns an error if the stored value does not fit a count.
pub fn decode_reading(
    column: &str,
    stored: Option<i32>,
) -> Result<Option<Count>, PersistenceError> {
    let Some(value) = stored else {
        return Ok(None);
    };
    u8::try_from(value)
        .map(|v| Some(Count::from(v)))
        .map_err(|_| PersistenceError::RecordCorrupted(format!("bad {column} reading: {value}")))
}
