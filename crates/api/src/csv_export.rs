// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! CSV rendering for snapshot exports.
//!
//! This module renders keyed snapshots as a spreadsheet-friendly document
//! without touching the store.

use headcount_domain::{Count, KeyedSnapshot};
use thiserror::Error;

/// CSV rendering errors.
#[derive(Debug, Error)]
pub enum CsvExportError {
    /// A row could not be written.
    #[error("Failed to write CSV row: {0}")]
    Write(#[from] csv::Error),

    /// The writer could not hand back its buffer.
    #[error("Failed to finish CSV output: {0}")]
    Finish(#[from] csv::IntoInnerError<csv::Writer<Vec<u8>>>),

    /// The rendered bytes were not valid UTF-8.
    #[error("CSV output was not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Column headers for the export document.
const HEADER: [&str; 5] = ["DateTime", "Area", "People", "Decibels", "Laptops"];

/// Display-timezone timestamp layout, e.g. `2026-02-14 @ 9:30 am`.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d @ %-I:%M %P";

/// Renders keyed snapshots as a CSV document, one row per snapshot.
///
/// Rows are emitted in the order given. The people column carries the
/// headline figure for whichever schema generation the snapshot uses, so
/// rows from different generations line up in one column. Absent sound and
/// laptop readings render as empty cells rather than zeros.
///
/// # Errors
///
/// Returns a `CsvExportError` if a row cannot be serialized or the output
/// buffer cannot be recovered as text.
pub fn render_csv(records: &[KeyedSnapshot]) -> Result<String, CsvExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(HEADER)?;

    for record in records {
        let timestamp: String = record.display_time.format(TIMESTAMP_FORMAT).to_string();
        let people: String = record.snapshot.counts().headline().to_string();
        let decibels: String = reading_cell(record.snapshot.decibels());
        let laptops: String = reading_cell(record.snapshot.laptops());

        writer.write_record([
            timestamp.as_str(),
            record.snapshot.area(),
            people.as_str(),
            decibels.as_str(),
            laptops.as_str(),
        ])?;
    }

    let bytes: Vec<u8> = writer.into_inner()?;
    Ok(String::from_utf8(bytes)?)
}

/// Renders an optional reading as a cell, blank when the reading is absent.
fn reading_cell(reading: Option<Count>) -> String {
    reading.map_or_else(String::new, |count| count.to_string())
}
