// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Operations boundary layer for the headcount occupancy tracker.
//!
//! Each operation takes raw submitted field values, runs them through
//! domain validation, and talks to the snapshot store through the
//! [`headcount_persistence::SnapshotStore`] trait. Domain and persistence
//! errors never cross this boundary directly; they are translated into
//! [`ApiError`] values the transport layer can map to status codes.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

mod csv_export;
mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use csv_export::CsvExportError;
pub use error::{ApiError, translate_domain_error, translate_validation_errors};
pub use handlers::{area_history, correct_snapshot, export_csv, submit_snapshot};
pub use request_response::{
    AreaListing, CorrectSnapshotRequest, CorrectSnapshotResponse, SnapshotRecordInfo,
    SubmitSnapshotRequest, SubmitSnapshotResponse,
};
