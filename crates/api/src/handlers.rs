// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Snapshot operations exposed at the API boundary.
//!
//! Each operation validates its input, makes exactly one store round trip,
//! and translates domain and store failures into `ApiError`. Domain types
//! never leak through the responses.

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use tracing::debug;

use headcount_domain::{
    Count, DisplayTimezone, DomainError, FIELD_DECIBELS, FIELD_LAPTOPS, FieldName, KeyedSnapshot,
    OccupancyCounts, SchemaGeneration, Snapshot, SnapshotKey, ValidationErrors, ValueSource,
    extract_numbers,
};
use headcount_persistence::{AreaFilter, SnapshotStore, TimestampOrder};

use crate::csv_export::render_csv;
use crate::error::{ApiError, translate_domain_error, translate_validation_errors};
use crate::request_response::{
    AreaListing, CorrectSnapshotRequest, CorrectSnapshotResponse, SnapshotRecordInfo,
    SubmitSnapshotRequest, SubmitSnapshotResponse,
};

/// Correction field carrying the key of the record to overwrite.
const FIELD_ID: FieldName = "id";
/// Correction field carrying the observation time as epoch seconds.
const FIELD_TS: FieldName = "ts";

/// Validates and normalizes a submitted area name.
///
/// Leading and trailing whitespace is not significant. An empty result is a
/// validation error raised before any store access.
fn validate_area(area: &str) -> Result<&str, ApiError> {
    let trimmed: &str = area.trim();
    if trimmed.is_empty() {
        return Err(translate_domain_error(DomainError::InvalidArea(
            String::from("Area cannot be empty"),
        )));
    }
    Ok(trimmed)
}

/// Assembles the extraction field list for a submission.
///
/// Required fields come from the generation. Optional readings join the list
/// only when the submitter supplied a non-empty value, so their absence is
/// omission rather than a parse failure.
fn submitted_fields(
    generation: SchemaGeneration,
    source: &impl ValueSource,
) -> Vec<FieldName> {
    let mut fields: Vec<FieldName> = generation.required_fields().to_vec();
    if source.has_value(FIELD_DECIBELS) {
        fields.push(FIELD_DECIBELS);
    }
    if generation == SchemaGeneration::Breakdown && source.has_value(FIELD_LAPTOPS) {
        fields.push(FIELD_LAPTOPS);
    }
    fields
}

/// Narrows an optional reading out of the extracted values.
///
/// Returns `None` when the field was never requested. Out-of-range values
/// join the aggregate alongside any count errors.
fn narrow_optional_reading(
    values: &BTreeMap<FieldName, i64>,
    field: FieldName,
    errors: &mut ValidationErrors,
) -> Option<Count> {
    let raw: i64 = *values.get(field)?;
    Count::new(field, raw).map_or_else(
        |error| {
            errors.push(error);
            None
        },
        Some,
    )
}

/// Builds counts and optional readings from extracted values.
///
/// Range failures and the sum invariant are reported together in one
/// aggregate so the submitter sees every problem at once.
fn assemble_readings(
    generation: SchemaGeneration,
    values: &BTreeMap<FieldName, i64>,
) -> Result<(OccupancyCounts, Option<Count>, Option<Count>), ApiError> {
    let (counts, mut errors) = generation.build_counts(values).map_or_else(
        |errors| (None, errors),
        |counts| (Some(counts), ValidationErrors::new()),
    );

    let decibels: Option<Count> = narrow_optional_reading(values, FIELD_DECIBELS, &mut errors);
    let laptops: Option<Count> = narrow_optional_reading(values, FIELD_LAPTOPS, &mut errors);

    let Some(counts) = counts else {
        return Err(translate_validation_errors(&errors));
    };
    if !errors.is_empty() {
        return Err(translate_validation_errors(&errors));
    }

    Ok((counts, decibels, laptops))
}

/// Records a new occupancy snapshot.
///
/// This function:
/// - Validates the submitted area
/// - Extracts and validates every field in one pass
/// - Builds the counts payload for the configured generation
/// - Persists the snapshot stamped with the current time
///
/// # Arguments
///
/// * `store` - The snapshot store
/// * `generation` - The configured schema generation
/// * `request` - The API request carrying the area and raw fields
///
/// # Errors
///
/// Returns an `ApiError` if any field fails validation or the store write
/// fails. All field failures are reported together.
pub fn submit_snapshot(
    store: &mut impl SnapshotStore,
    generation: SchemaGeneration,
    request: &SubmitSnapshotRequest,
) -> Result<SubmitSnapshotResponse, ApiError> {
    let area: &str = validate_area(&request.area)?;

    // Extract every requested field before judging any of them
    let fields: Vec<FieldName> = submitted_fields(generation, &request.fields);
    let (values, extraction_errors) = extract_numbers(&request.fields, &fields);
    if !extraction_errors.is_empty() {
        return Err(translate_validation_errors(&extraction_errors));
    }

    let (counts, decibels, laptops) = assemble_readings(generation, &values)?;

    let taken_at: DateTime<Utc> = Utc::now();
    let snapshot: Snapshot = Snapshot::new(area, counts, decibels, laptops, taken_at);
    let key: SnapshotKey = store.create(&snapshot)?;

    debug!(key = key.value(), area, "Recorded occupancy snapshot");

    Ok(SubmitSnapshotResponse {
        key: key.value(),
        area: area.to_string(),
        message: format!("Recorded snapshot for area '{area}'"),
    })
}

/// Corrects a previously recorded snapshot in place.
///
/// The record key (`id`) and observation time (`ts`, epoch seconds) travel
/// with the count fields and are validated in the same batch, so a bad key,
/// a bad timestamp, and a bad count all surface together. The write is an
/// upsert under the submitted key.
///
/// # Arguments
///
/// * `store` - The snapshot store
/// * `generation` - The configured schema generation
/// * `request` - The API request carrying the area and raw fields
///
/// # Errors
///
/// Returns an `ApiError` if any field fails validation or the store write
/// fails.
pub fn correct_snapshot(
    store: &mut impl SnapshotStore,
    generation: SchemaGeneration,
    request: &CorrectSnapshotRequest,
) -> Result<CorrectSnapshotResponse, ApiError> {
    let area: &str = validate_area(&request.area)?;

    // The key and timestamp are fields like any other so every failure
    // surfaces in one batch
    let mut fields: Vec<FieldName> = vec![FIELD_ID, FIELD_TS];
    fields.extend(submitted_fields(generation, &request.fields));
    let (values, extraction_errors) = extract_numbers(&request.fields, &fields);
    if !extraction_errors.is_empty() {
        return Err(translate_validation_errors(&extraction_errors));
    }

    let (counts, decibels, laptops) = assemble_readings(generation, &values)?;

    let seconds: i64 = values.get(FIELD_TS).copied().unwrap_or(0);
    let Some(taken_at) = DateTime::from_timestamp(seconds, 0) else {
        return Err(translate_domain_error(DomainError::InvalidTimestamp {
            seconds,
        }));
    };

    let key: SnapshotKey = SnapshotKey::new(values.get(FIELD_ID).copied().unwrap_or(0));
    let snapshot: Snapshot = Snapshot::new(area, counts, decibels, laptops, taken_at);
    store.update(key, &snapshot)?;

    debug!(key = key.value(), area, "Corrected occupancy snapshot");

    Ok(CorrectSnapshotResponse {
        key: key.value(),
        area: area.to_string(),
        history_location: format!("/history?area={area}"),
        message: format!("Corrected snapshot {} for area '{area}'", key.value()),
    })
}

/// Pairs queried snapshots with their keys and display-adjusted timestamps.
///
/// The two sequences from the store are index-aligned; zipping preserves
/// that alignment.
fn keyed_snapshots(
    snapshots: Vec<Snapshot>,
    keys: Vec<SnapshotKey>,
    timezone: &DisplayTimezone,
) -> Vec<KeyedSnapshot> {
    snapshots
        .into_iter()
        .zip(keys)
        .map(|(snapshot, key)| {
            let display_time = timezone.adjust(snapshot.taken_at());
            KeyedSnapshot {
                key,
                snapshot,
                display_time,
            }
        })
        .collect()
}

/// Lists an area's snapshot history, newest first.
///
/// Timezone decoration is best-effort: an unrecognized configured zone
/// leaves timestamps in UTC and never fails the query.
///
/// # Arguments
///
/// * `store` - The snapshot store
/// * `area` - The area to list history for
/// * `timezone` - The display timezone for rendered timestamps
///
/// # Errors
///
/// Returns an `ApiError` if the area is empty (before any store access) or
/// the store query fails.
pub fn area_history(
    store: &mut impl SnapshotStore,
    area: &str,
    timezone: &DisplayTimezone,
) -> Result<AreaListing, ApiError> {
    let area: &str = validate_area(area)?;

    let (snapshots, keys) = store.query(AreaFilter::Area(area), TimestampOrder::NewestFirst)?;
    let records: Vec<SnapshotRecordInfo> = keyed_snapshots(snapshots, keys, timezone)
        .into_iter()
        .map(|record| SnapshotRecordInfo {
            id: record.key.value(),
            counts: record.snapshot.counts(),
            people: record.snapshot.counts().headline(),
            decibels: record.snapshot.decibels().map(|count| count.value()),
            laptops: record.snapshot.laptops().map(|count| count.value()),
            taken_at: record.display_time.to_rfc3339(),
        })
        .collect();

    debug!(area, records = records.len(), "Listed area history");

    Ok(AreaListing {
        area: area.to_string(),
        records,
    })
}

/// Renders every area's history as a CSV document, newest first.
///
/// # Arguments
///
/// * `store` - The snapshot store
/// * `timezone` - The display timezone for rendered timestamps
///
/// # Errors
///
/// Returns an `ApiError` if the store query fails or the document cannot be
/// rendered.
pub fn export_csv(
    store: &mut impl SnapshotStore,
    timezone: &DisplayTimezone,
) -> Result<String, ApiError> {
    let (snapshots, keys) = store.query(AreaFilter::All, TimestampOrder::NewestFirst)?;
    let records: Vec<KeyedSnapshot> = keyed_snapshots(snapshots, keys, timezone);

    debug!(records = records.len(), "Rendered CSV export");

    Ok(render_csv(&records)?)
}
