// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::{DomainError, ValidationErrors};
use crate::extract::FieldName;
use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Headline count field of the first-generation schema.
pub const FIELD_PEOPLE: FieldName = "people";
/// Seated-at-a-table count field of the seating schema.
pub const FIELD_SEATED: FieldName = "seated";
/// Seated-on-the-floor count field of the seating schema.
pub const FIELD_FLOORED: FieldName = "floored";
/// Total count field of the breakdown schema.
pub const FIELD_TOTAL: FieldName = "total";
/// Grouped-seating count field of the breakdown schema.
pub const FIELD_GROUPED: FieldName = "grouped";
/// Solitary-seating count field of the breakdown schema.
pub const FIELD_SOLITARY: FieldName = "solitary";
/// Asleep count field of the breakdown schema.
pub const FIELD_ASLEEP: FieldName = "asleep";
/// Optional ambient-noise field, accepted by every schema.
pub const FIELD_DECIBELS: FieldName = "db";
/// Optional laptop count field of the breakdown schema.
pub const FIELD_LAPTOPS: FieldName = "laptops";

/// A single occupancy or noise reading.
///
/// Counts are stored as 8-bit values. Input outside `0..=255` is rejected at
/// validation time, never wrapped or truncated.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Count(u8);

impl Count {
    /// Smallest accepted reading.
    pub const MIN: i64 = 0;
    /// Largest accepted reading.
    pub const MAX: i64 = 255;

    /// Narrows an extracted integer to a storable count.
    ///
    /// # Arguments
    ///
    /// * `field` - The field the value came from, named in the error
    /// * `value` - The extracted integer
    ///
    /// # Errors
    ///
    /// Returns `DomainError::CountOutOfRange` if `value` is outside
    /// `0..=255`.
    pub fn new(field: FieldName, value: i64) -> Result<Self, DomainError> {
        u8::try_from(value)
            .map(Self)
            .map_err(|_| DomainError::CountOutOfRange { field, value })
    }

    /// Returns the reading as a plain integer.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl From<u8> for Count {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for Count {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The record shape a deployment collects.
///
/// The collected fields changed twice over the service's life. Each shape is
/// kept as its own generation so historical rows deserialize exactly as they
/// were written, with no implicit zeroes for fields that did not exist yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SchemaGeneration {
    /// First generation: a single `people` figure.
    People,
    /// Second generation: `seated` plus `floored`.
    Seating,
    /// Third generation: `total` broken down by posture, with laptop counts.
    #[default]
    Breakdown,
}

impl FromStr for SchemaGeneration {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "people" => Ok(Self::People),
            "seating" => Ok(Self::Seating),
            "breakdown" => Ok(Self::Breakdown),
            _ => Err(DomainError::InvalidSchemaGeneration(s.to_string())),
        }
    }
}

impl std::fmt::Display for SchemaGeneration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl SchemaGeneration {
    /// Converts this generation to its configuration name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::People => "people",
            Self::Seating => "seating",
            Self::Breakdown => "breakdown",
        }
    }

    /// The count fields a submission for this generation must carry.
    #[must_use]
    pub const fn required_fields(&self) -> &'static [FieldName] {
        match self {
            Self::People => &[FIELD_PEOPLE],
            Self::Seating => &[FIELD_SEATED, FIELD_FLOORED],
            Self::Breakdown => &[FIELD_TOTAL, FIELD_GROUPED, FIELD_SOLITARY, FIELD_ASLEEP],
        }
    }

    /// Narrows extracted integers into this generation's counts payload.
    ///
    /// Every out-of-range field is reported, not just the first. For the
    /// breakdown generation the total must additionally equal the sum of its
    /// parts; a mismatch is reported with all operands.
    ///
    /// # Arguments
    ///
    /// * `values` - Extracted integers keyed by field name
    ///
    /// # Errors
    ///
    /// Returns the aggregate of every out-of-range field, plus the sum
    /// mismatch where applicable.
    pub fn build_counts(
        &self,
        values: &BTreeMap<FieldName, i64>,
    ) -> Result<OccupancyCounts, ValidationErrors> {
        let mut errors: ValidationErrors = ValidationErrors::new();

        let counts: Option<OccupancyCounts> = match self {
            Self::People => narrow_field(values, FIELD_PEOPLE, &mut errors)
                .map(|people| OccupancyCounts::People { people }),
            Self::Seating => {
                let seated: Option<Count> = narrow_field(values, FIELD_SEATED, &mut errors);
                let floored: Option<Count> = narrow_field(values, FIELD_FLOORED, &mut errors);
                match (seated, floored) {
                    (Some(seated), Some(floored)) => {
                        Some(OccupancyCounts::Seating { seated, floored })
                    }
                    _ => None,
                }
            }
            Self::Breakdown => {
                let total: Option<Count> = narrow_field(values, FIELD_TOTAL, &mut errors);
                let grouped: Option<Count> = narrow_field(values, FIELD_GROUPED, &mut errors);
                let solitary: Option<Count> = narrow_field(values, FIELD_SOLITARY, &mut errors);
                let asleep: Option<Count> = narrow_field(values, FIELD_ASLEEP, &mut errors);
                match (total, grouped, solitary, asleep) {
                    (Some(total), Some(grouped), Some(solitary), Some(asleep)) => {
                        Some(OccupancyCounts::Breakdown {
                            total,
                            grouped,
                            solitary,
                            asleep,
                        })
                    }
                    _ => None,
                }
            }
        };

        let Some(counts) = counts else {
            return Err(errors);
        };
        if let Err(error) = counts.verify_sum() {
            errors.push(error);
            return Err(errors);
        }
        Ok(counts)
    }
}

/// Narrows one extracted value, collecting the failure instead of returning
/// it so every out-of-range field in a submission is reported.
fn narrow_field(
    values: &BTreeMap<FieldName, i64>,
    field: FieldName,
    errors: &mut ValidationErrors,
) -> Option<Count> {
    let raw: i64 = values.get(field).copied().unwrap_or(0);
    Count::new(field, raw).map_or_else(
        |error| {
            errors.push(error);
            None
        },
        Some,
    )
}

/// The counts payload of a snapshot, shaped by the generation that recorded
/// it.
///
/// Serialized with an explicit `schema` tag so rows written by any
/// generation deserialize from the same store column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "schema", rename_all = "snake_case")]
pub enum OccupancyCounts {
    /// First-generation payload.
    People {
        /// Everyone present.
        people: Count,
    },
    /// Second-generation payload.
    Seating {
        /// People seated at tables.
        seated: Count,
        /// People seated on the floor.
        floored: Count,
    },
    /// Third-generation payload.
    Breakdown {
        /// Everyone present.
        total: Count,
        /// People sitting in groups.
        grouped: Count,
        /// People sitting alone.
        solitary: Count,
        /// People asleep.
        asleep: Count,
    },
}

impl OccupancyCounts {
    /// The generation that shaped this payload.
    #[must_use]
    pub const fn generation(&self) -> SchemaGeneration {
        match self {
            Self::People { .. } => SchemaGeneration::People,
            Self::Seating { .. } => SchemaGeneration::Seating,
            Self::Breakdown { .. } => SchemaGeneration::Breakdown,
        }
    }

    /// Checks the breakdown arithmetic.
    ///
    /// The total must equal grouped plus solitary plus asleep. The other
    /// generations have no cross-field arithmetic and always pass.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::CountMismatch` carrying all operands when the
    /// breakdown total differs from the sum of its parts.
    pub fn verify_sum(&self) -> Result<(), DomainError> {
        match self {
            Self::People { .. } | Self::Seating { .. } => Ok(()),
            Self::Breakdown {
                total,
                grouped,
                solitary,
                asleep,
            } => {
                let sum: u16 = u16::from(grouped.value())
                    + u16::from(solitary.value())
                    + u16::from(asleep.value());
                if u16::from(total.value()) == sum {
                    Ok(())
                } else {
                    Err(DomainError::CountMismatch {
                        total: total.value(),
                        grouped: grouped.value(),
                        solitary: solitary.value(),
                        asleep: asleep.value(),
                    })
                }
            }
        }
    }

    /// The headline occupancy figure shown in listings and exports.
    ///
    /// For the seating generation this is the sum of both seating counts;
    /// the other generations carry it directly.
    #[must_use]
    pub fn headline(&self) -> u16 {
        match self {
            Self::People { people } => u16::from(people.value()),
            Self::Seating { seated, floored } => {
                u16::from(seated.value()) + u16::from(floored.value())
            }
            Self::Breakdown { total, .. } => u16::from(total.value()),
        }
    }
}

/// One point-in-time observation of an area.
///
/// Snapshots are immutable once built. A correction builds a new value and
/// pairs it with the existing key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    area: String,
    counts: OccupancyCounts,
    decibels: Option<Count>,
    laptops: Option<Count>,
    taken_at: DateTime<Utc>,
}

impl Snapshot {
    /// Assembles a snapshot from validated parts.
    ///
    /// # Arguments
    ///
    /// * `area` - Identifier of the observed zone
    /// * `counts` - The generation-shaped counts payload
    /// * `decibels` - Ambient-noise reading, `None` when not supplied
    /// * `laptops` - Laptop count, `None` when not supplied
    /// * `taken_at` - Observation instant
    #[must_use]
    pub fn new(
        area: &str,
        counts: OccupancyCounts,
        decibels: Option<Count>,
        laptops: Option<Count>,
        taken_at: DateTime<Utc>,
    ) -> Self {
        Self {
            area: area.to_string(),
            counts,
            decibels,
            laptops,
            taken_at,
        }
    }

    /// Identifier of the observed zone.
    #[must_use]
    pub fn area(&self) -> &str {
        &self.area
    }

    /// The counts payload.
    #[must_use]
    pub const fn counts(&self) -> OccupancyCounts {
        self.counts
    }

    /// Ambient-noise reading, if one was supplied.
    #[must_use]
    pub const fn decibels(&self) -> Option<Count> {
        self.decibels
    }

    /// Laptop count, if one was supplied.
    #[must_use]
    pub const fn laptops(&self) -> Option<Count> {
        self.laptops
    }

    /// Observation instant in UTC.
    #[must_use]
    pub const fn taken_at(&self) -> DateTime<Utc> {
        self.taken_at
    }
}

/// Store-assigned identifier of a persisted snapshot.
///
/// Write paths never hold one for creates; the store mints it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SnapshotKey(i64);

impl SnapshotKey {
    /// Wraps a raw store identifier.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw store identifier.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for SnapshotKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A persisted snapshot paired with its key, carrying the observation
/// instant adjusted to the display timezone.
///
/// Produced only by read paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyedSnapshot {
    /// The store-assigned key.
    pub key: SnapshotKey,
    /// The persisted record.
    pub snapshot: Snapshot,
    /// `taken_at` shifted to the configured display timezone. The instant is
    /// unchanged; only the offset moves.
    pub display_time: DateTime<FixedOffset>,
}
