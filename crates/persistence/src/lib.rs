// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the headcount occupancy tracker.
//!
//! This crate provides database persistence for occupancy snapshots. It is
//! built on Diesel over embedded `SQLite`, with the store contract expressed
//! as the [`SnapshotStore`] trait so the operations layer never depends on
//! the storage technology.
//!
//! ## Backend
//!
//! `SQLite` is the only backend:
//!
//! - In-memory databases for unit tests and ad-hoc runs
//! - File-based databases (WAL mode) for deployments
//!
//! Migrations are embedded in the binary and applied at construction, so a
//! fresh database file is usable without any external tooling.
//!
//! ## Storage shape
//!
//! One `snapshots` table. The generation-shaped counts payload is stored as
//! tagged JSON in a single text column, so rows written by any deployment
//! generation load back exactly as written. Timestamps are stored as
//! fixed-width RFC 3339 UTC text, which makes lexicographic `ORDER BY`
//! identical to chronological order.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use headcount_domain::{Snapshot, SnapshotKey};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;
mod store;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;
pub use store::{AreaFilter, SnapshotStore, TimestampOrder};

/// Atomic counter for generating unique in-memory database names.
///
/// This ensures deterministic test isolation by eliminating time-based collisions.
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Diesel-backed snapshot store.
///
/// Backend selection happens once at construction time; afterwards every
/// access goes through the [`SnapshotStore`] trait.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a store backed by an in-memory `SQLite` database.
    ///
    /// Each call receives a unique shared-memory database via an atomic
    /// counter, ensuring deterministic test isolation without time-based
    /// collisions. Migrations run before the connection is handed out.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name: String = format!("memdb_snapshots_{db_id}");
        let shared_memory_url: String = format!("file:{db_name}?mode=memory&cache=shared");

        let conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;

        Ok(Self { conn })
    }

    /// Creates a store backed by a file-based `SQLite` database.
    ///
    /// The file is created if it does not exist. WAL mode is enabled for
    /// better read concurrency.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;

        backend::sqlite::enable_wal_mode(&mut conn)?;

        Ok(Self { conn })
    }
}

impl SnapshotStore for Persistence {
    fn create(&mut self, snapshot: &Snapshot) -> Result<SnapshotKey, PersistenceError> {
        mutations::snapshots::create_snapshot(&mut self.conn, snapshot)
    }

    fn update(&mut self, key: SnapshotKey, snapshot: &Snapshot) -> Result<(), PersistenceError> {
        mutations::snapshots::upsert_snapshot(&mut self.conn, key, snapshot)
    }

    fn query(
        &mut self,
        filter: AreaFilter<'_>,
        order: TimestampOrder,
    ) -> Result<(Vec<Snapshot>, Vec<SnapshotKey>), PersistenceError> {
        queries::snapshots::query_snapshots(&mut self.conn, filter, order)
    }
}
