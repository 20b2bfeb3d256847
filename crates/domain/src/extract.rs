// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::{DomainError, ValidationErrors};
use std::collections::{BTreeMap, HashMap};

/// Name of a submitted field. Field vocabularies are fixed per schema
/// generation, so names are static.
pub type FieldName = &'static str;

/// A source of named raw string values, such as a decoded form body or a
/// query string.
pub trait ValueSource {
    /// Returns the raw value for `field`, or `None` when the field was not
    /// submitted at all.
    fn value(&self, field: FieldName) -> Option<&str>;

    /// Whether `field` was submitted with a non-empty raw value.
    ///
    /// Optional fields join an extraction only when this returns true, so a
    /// blank form input reads as "not provided" rather than as zero.
    fn has_value(&self, field: FieldName) -> bool {
        self.value(field).is_some_and(|raw| !raw.is_empty())
    }
}

impl ValueSource for HashMap<String, String> {
    fn value(&self, field: FieldName) -> Option<&str> {
        self.get(field).map(String::as_str)
    }
}

impl ValueSource for BTreeMap<String, String> {
    fn value(&self, field: FieldName) -> Option<&str> {
        self.get(field).map(String::as_str)
    }
}

/// Reads every requested field from `source` as a whole number, collecting
/// all parse failures instead of stopping at the first one.
///
/// A missing field is treated as an empty string, which fails to parse. Each
/// failed field still occupies a zero-valued entry in the returned map, so
/// downstream code can index the map without presence checks. Callers must
/// treat a non-empty aggregate as fatal and discard the map.
///
/// # Arguments
///
/// * `source` - The raw field values
/// * `fields` - The fields to extract, in reporting order
///
/// # Returns
///
/// The extracted values keyed by field name, paired with the aggregate of
/// every field that failed to parse.
#[must_use]
pub fn extract_numbers(
    source: &impl ValueSource,
    fields: &[FieldName],
) -> (BTreeMap<FieldName, i64>, ValidationErrors) {
    let mut values: BTreeMap<FieldName, i64> = BTreeMap::new();
    let mut errors: ValidationErrors = ValidationErrors::new();

    for &field in fields {
        let raw: &str = source.value(field).unwrap_or("");
        match raw.parse::<i64>() {
            Ok(number) => {
                values.insert(field, number);
            }
            Err(_) => {
                errors.push(DomainError::FieldNotNumeric {
                    field,
                    value: raw.to_string(),
                });
                values.insert(field, 0);
            }
        }
    }

    (values, errors)
}
