// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod display_time;
mod error;
mod extract;
mod snapshot;

#[cfg(test)]
mod tests;

pub use display_time::DisplayTimezone;
pub use error::{DomainError, ValidationErrors};
pub use extract::{FieldName, ValueSource, extract_numbers};
pub use snapshot::{
    Count, FIELD_ASLEEP, FIELD_DECIBELS, FIELD_FLOORED, FIELD_GROUPED, FIELD_LAPTOPS, FIELD_PEOPLE,
    FIELD_SEATED, FIELD_SOLITARY, FIELD_TOTAL, KeyedSnapshot, OccupancyCounts, SchemaGeneration,
    Snapshot, SnapshotKey,
};
