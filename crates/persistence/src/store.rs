// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::PersistenceError;
use headcount_domain::{Snapshot, SnapshotKey};

/// Which areas a query covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AreaFilter<'a> {
    /// Every area.
    All,
    /// Exactly one area, matched by equality.
    Area(&'a str),
}

/// Timestamp ordering of query results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampOrder {
    /// Most recent observation first.
    NewestFirst,
    /// Oldest observation first.
    OldestFirst,
}

/// Contract between the operations layer and a snapshot store.
///
/// Implemented by the Diesel adapter and by test stubs. Callers hold either
/// a generated key from [`Self::create`] or a known key for
/// [`Self::update`]; there is no path that writes without one of the two.
pub trait SnapshotStore {
    /// Persists a new snapshot and returns the store-assigned key.
    ///
    /// Keys are never reused, so two identical snapshots receive distinct
    /// keys and a create can never overwrite an existing record.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails. There is no automatic retry.
    fn create(&mut self, snapshot: &Snapshot) -> Result<SnapshotKey, PersistenceError>;

    /// Writes a snapshot under a caller-supplied key, overwriting any
    /// existing record stored under that key.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn update(&mut self, key: SnapshotKey, snapshot: &Snapshot) -> Result<(), PersistenceError>;

    /// Loads every snapshot matching `filter` in `order`, as one batch.
    ///
    /// The returned records and keys are parallel sequences: the key at
    /// index `i` belongs to the snapshot at index `i`.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails or a stored row cannot be decoded.
    fn query(
        &mut self,
        filter: AreaFilter<'_>,
        order: TimestampOrder,
    ) -> Result<(Vec<Snapshot>, Vec<SnapshotKey>), PersistenceError>;
}
