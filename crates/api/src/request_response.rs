// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use headcount_domain::OccupancyCounts;
use std::collections::HashMap;

/// API request to record a new occupancy snapshot.
///
/// This DTO is distinct from domain types and represents the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitSnapshotRequest {
    /// The area the snapshot describes.
    pub area: String,
    /// Raw form fields, keyed by field name, as received from the submitter.
    pub fields: HashMap<String, String>,
}

/// API response for a successfully recorded snapshot.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SubmitSnapshotResponse {
    /// The store-assigned key for the new snapshot.
    pub key: i64,
    /// The area the snapshot was recorded for.
    pub area: String,
    /// A success message.
    pub message: String,
}

/// API request to correct a previously recorded snapshot in place.
///
/// The record key and observation time travel in `fields` (under `id` and
/// `ts`) so they are validated in the same batch as the counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrectSnapshotRequest {
    /// The area the corrected snapshot describes.
    pub area: String,
    /// Raw form fields, keyed by field name, as received from the submitter.
    pub fields: HashMap<String, String>,
}

/// API response for a successful snapshot correction.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CorrectSnapshotResponse {
    /// The key the corrected snapshot was written under.
    pub key: i64,
    /// The area the snapshot was corrected for.
    pub area: String,
    /// Where the corrected area's history can be reviewed.
    pub history_location: String,
    /// A success message.
    pub message: String,
}

/// One snapshot record in an area history listing.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SnapshotRecordInfo {
    /// The store key, usable for corrections.
    pub id: i64,
    /// The per-generation counts payload.
    pub counts: OccupancyCounts,
    /// The headline people figure for the payload's generation.
    pub people: u16,
    /// Ambient sound level reading, if one was taken.
    pub decibels: Option<u8>,
    /// Laptops-open count, if one was taken.
    pub laptops: Option<u8>,
    /// Observation time, adjusted to the display timezone (RFC 3339).
    pub taken_at: String,
}

/// API response listing an area's snapshot history, newest first.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AreaListing {
    /// The area the listing covers.
    pub area: String,
    /// The area's records, newest first.
    pub records: Vec<SnapshotRecordInfo>,
}
