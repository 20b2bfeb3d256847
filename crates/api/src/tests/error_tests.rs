// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for API error display and domain error translation.

use headcount_domain::{DomainError, ValidationErrors};
use headcount_persistence::PersistenceError;

use crate::{ApiError, CsvExportError, translate_domain_error, translate_validation_errors};

// ============================================================================
// Display
// ============================================================================

#[test]
fn test_api_error_display_validation_failed() {
    let error: ApiError = ApiError::ValidationFailed {
        messages: vec![String::from("first problem"), String::from("second problem")],
    };
    assert_eq!(
        error.to_string(),
        "Validation failed: first problem; second problem"
    );
}

#[test]
fn test_api_error_display_invalid_input() {
    let error: ApiError = ApiError::InvalidInput {
        field: String::from("area"),
        message: String::from("Area cannot be empty"),
    };
    assert_eq!(
        error.to_string(),
        "Invalid input for field 'area': Area cannot be empty"
    );
}

#[test]
fn test_api_error_display_persistence_failed() {
    let error: ApiError = ApiError::PersistenceFailed {
        message: String::from("disk full"),
    };
    assert_eq!(error.to_string(), "Persistence failed: disk full");
}

#[test]
fn test_api_error_display_internal() {
    let error: ApiError = ApiError::Internal {
        message: String::from("render broke"),
    };
    assert_eq!(error.to_string(), "Internal error: render broke");
}

// ============================================================================
// Translation
// ============================================================================

#[test]
fn test_translate_validation_errors_preserves_order_and_count() {
    let mut errors: ValidationErrors = ValidationErrors::new();
    errors.push(DomainError::FieldNotNumeric {
        field: "seated",
        value: String::from("abc"),
    });
    errors.push(DomainError::CountOutOfRange {
        field: "floored",
        value: 300,
    });

    let error: ApiError = translate_validation_errors(&errors);

    assert!(matches!(error, ApiError::ValidationFailed { .. }));
    if let ApiError::ValidationFailed { messages } = error {
        assert_eq!(messages.len(), 2);
        assert_eq!(
            messages[0],
            "Field 'seated' must be a whole number, got 'abc'"
        );
        assert_eq!(messages[1], "Field 'floored' must be between 0 and 255, got 300");
    }
}

#[test]
fn test_field_not_numeric_translates_to_invalid_input() {
    let error: ApiError = translate_domain_error(DomainError::FieldNotNumeric {
        field: "seated",
        value: String::from("abc"),
    });

    assert!(matches!(error, ApiError::InvalidInput { ref field, .. } if field == "seated"));
    if let ApiError::InvalidInput { message, .. } = error {
        assert_eq!(message, "Must be a whole number, got 'abc'");
    }
}

#[test]
fn test_count_out_of_range_translates_with_bounds() {
    let error: ApiError = translate_domain_error(DomainError::CountOutOfRange {
        field: "total",
        value: 300,
    });

    assert!(matches!(error, ApiError::InvalidInput { ref field, .. } if field == "total"));
    if let ApiError::InvalidInput { message, .. } = error {
        assert_eq!(message, "Must be between 0 and 255, got 300");
    }
}

#[test]
fn test_count_mismatch_translates_to_validation_failed() {
    let error: ApiError = translate_domain_error(DomainError::CountMismatch {
        total: 10,
        grouped: 4,
        solitary: 3,
        asleep: 2,
    });

    assert!(matches!(error, ApiError::ValidationFailed { .. }));
    if let ApiError::ValidationFailed { messages } = error {
        assert_eq!(messages.len(), 1);
        assert_eq!(
            messages[0],
            "Total 10 does not match grouped 4 + solitary 3 + asleep 2 = 9"
        );
    }
}

#[test]
fn test_invalid_area_translates_to_area_field() {
    let error: ApiError = translate_domain_error(DomainError::InvalidArea(String::from(
        "Area cannot be empty",
    )));

    assert!(matches!(error, ApiError::InvalidInput { ref field, .. } if field == "area"));
}

#[test]
fn test_unknown_generation_translates_to_schema_field() {
    let error: ApiError =
        translate_domain_error(DomainError::InvalidSchemaGeneration(String::from("v4")));

    assert!(matches!(error, ApiError::InvalidInput { ref field, .. } if field == "schema"));
    if let ApiError::InvalidInput { message, .. } = error {
        assert_eq!(message, "Unknown schema generation: 'v4'");
    }
}

#[test]
fn test_invalid_timestamp_translates_to_ts_field() {
    let error: ApiError =
        translate_domain_error(DomainError::InvalidTimestamp { seconds: i64::MAX });

    assert!(matches!(error, ApiError::InvalidInput { ref field, .. } if field == "ts"));
}

// ============================================================================
// Conversions
// ============================================================================

#[test]
fn test_persistence_error_converts_to_persistence_failed() {
    let error: ApiError =
        ApiError::from(PersistenceError::QueryFailed(String::from("no such table")));

    assert!(matches!(error, ApiError::PersistenceFailed { .. }));
    if let ApiError::PersistenceFailed { message } = error {
        assert_eq!(message, "Query failed: no such table");
    }
}

#[test]
fn test_csv_export_error_converts_to_internal() {
    let bad_bytes: std::string::FromUtf8Error = String::from_utf8(vec![0xFF]).unwrap_err();
    let error: ApiError = ApiError::from(CsvExportError::Encoding(bad_bytes));

    assert!(matches!(error, ApiError::Internal { .. }));
}
