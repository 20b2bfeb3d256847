// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::extract::FieldName;
use crate::snapshot::Count;

/// Errors that can occur while validating snapshot input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A field's raw value could not be read as a whole number.
    FieldNotNumeric {
        /// The field that failed to parse.
        field: FieldName,
        /// The raw value as received. Empty when the field was missing.
        value: String,
    },
    /// A count falls outside the storable range.
    CountOutOfRange {
        /// The field carrying the value.
        field: FieldName,
        /// The out-of-range value.
        value: i64,
    },
    /// The breakdown total does not equal the sum of its parts.
    CountMismatch {
        /// The reported total.
        total: u8,
        /// People counted sitting in groups.
        grouped: u8,
        /// People counted sitting alone.
        solitary: u8,
        /// People counted asleep.
        asleep: u8,
    },
    /// Area identifier is empty or invalid.
    InvalidArea(String),
    /// Schema generation name is not recognized.
    InvalidSchemaGeneration(String),
    /// Epoch-seconds timestamp cannot be represented.
    InvalidTimestamp {
        /// The rejected epoch value.
        seconds: i64,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FieldNotNumeric { field, value } => {
                write!(f, "Field '{field}' must be a whole number, got '{value}'")
            }
            Self::CountOutOfRange { field, value } => {
                write!(
                    f,
                    "Field '{field}' must be between {} and {}, got {value}",
                    Count::MIN,
                    Count::MAX
                )
            }
            Self::CountMismatch {
                total,
                grouped,
                solitary,
                asleep,
            } => {
                let sum: u16 = u16::from(*grouped) + u16::from(*solitary) + u16::from(*asleep);
                write!(
                    f,
                    "Total {total} does not match grouped {grouped} + solitary {solitary} + asleep {asleep} = {sum}"
                )
            }
            Self::InvalidArea(msg) => write!(f, "Invalid area: {msg}"),
            Self::InvalidSchemaGeneration(name) => {
                write!(f, "Unknown schema generation: '{name}'")
            }
            Self::InvalidTimestamp { seconds } => {
                write!(f, "Timestamp {seconds} is outside the representable range")
            }
        }
    }
}

impl std::error::Error for DomainError {}

/// An aggregate of independent validation failures, reported together.
///
/// Extraction and count construction keep going after the first failure so a
/// submitter sees every invalid field at once. A non-empty aggregate is fatal
/// for the operation that produced it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<DomainError>,
}

impl ValidationErrors {
    /// Creates an empty aggregate.
    #[must_use]
    pub const fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Adds a failure to the aggregate.
    pub fn push(&mut self, error: DomainError) {
        self.errors.push(error);
    }

    /// Absorbs every failure from another aggregate.
    pub fn merge(&mut self, other: Self) {
        self.errors.extend(other.errors);
    }

    /// Number of failures collected so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Whether no failures were collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Iterates over the collected failures in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, DomainError> {
        self.errors.iter()
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.errors.is_empty() {
            return write!(f, "no validation errors");
        }
        let joined: String = self
            .errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<String>>()
            .join("; ");
        write!(f, "{joined}")
    }
}

impl std::error::Error for ValidationErrors {}

impl From<DomainError> for ValidationErrors {
    fn from(error: DomainError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

impl IntoIterator for ValidationErrors {
    type Item = DomainError;
    type IntoIter = std::vec::IntoIter<DomainError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a DomainError;
    type IntoIter = std::slice::Iter<'a, DomainError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}
