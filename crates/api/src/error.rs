// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the operations layer.

use crate::csv_export::CsvExportError;
use headcount_domain::{Count, DomainError, ValidationErrors};
use headcount_persistence::PersistenceError;

/// Operation-level errors.
///
/// These are distinct from domain and persistence errors and represent the
/// API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// One or more submitted fields failed validation.
    ValidationFailed {
        /// One human-readable message per failure, in reporting order.
        messages: Vec<String>,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// The snapshot store failed.
    PersistenceFailed {
        /// A description of the store failure.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ValidationFailed { messages } => {
                write!(f, "Validation failed: {}", messages.join("; "))
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::PersistenceFailed { message } => {
                write!(f, "Persistence failed: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        Self::PersistenceFailed {
            message: err.to_string(),
        }
    }
}

impl From<CsvExportError> for ApiError {
    fn from(err: CsvExportError) -> Self {
        Self::Internal {
            message: err.to_string(),
        }
    }
}

/// Translates a validation aggregate into an API error.
///
/// Every collected failure becomes one message, so a submitter sees all
/// invalid fields at once.
#[must_use]
pub fn translate_validation_errors(errors: &ValidationErrors) -> ApiError {
    ApiError::ValidationFailed {
        messages: errors.iter().map(ToString::to_string).collect(),
    }
}

/// Translates a single domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::FieldNotNumeric { field, value } => ApiError::InvalidInput {
            field: field.to_string(),
            message: format!("Must be a whole number, got '{value}'"),
        },
        DomainError::CountOutOfRange { field, value } => ApiError::InvalidInput {
            field: field.to_string(),
            message: format!(
                "Must be between {} and {}, got {value}",
                Count::MIN,
                Count::MAX
            ),
        },
        mismatch @ DomainError::CountMismatch { .. } => ApiError::ValidationFailed {
            messages: vec![mismatch.to_string()],
        },
        DomainError::InvalidArea(msg) => ApiError::InvalidInput {
            field: String::from("area"),
            message: msg,
        },
        DomainError::InvalidSchemaGeneration(name) => ApiError::InvalidInput {
            field: String::from("schema"),
            message: format!("Unknown schema generation: '{name}'"),
        },
        DomainError::InvalidTimestamp { seconds } => ApiError::InvalidInput {
            field: String::from("ts"),
            message: format!("Timestamp {seconds} is outside the representable range"),
        },
    }
}
