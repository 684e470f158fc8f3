//! Flat-document invariant for the persistence boundary.
//!
//! The underlying document store cannot represent an array nested inside
//! another array, directly or through an object that is itself an array
//! element. The invariant enforced here: no JSON array may appear anywhere
//! inside another JSON array's element tree. Checked once, at the
//! serialization boundary, before persistence.

use serde::Serialize;
use serde_json::Value as JsonValue;

use super::{DomainError, ErrorCode};

/// Validates that a serializable value contains no array nested within an
/// array, at any depth. Returns the offending JSON path on failure.
pub fn ensure_flat<T: Serialize>(field: &str, value: &T) -> Result<(), DomainError> {
    let json = serde_json::to_value(value).map_err(|e| {
        DomainError::new(
            ErrorCode::InternalError,
            format!("Failed to serialize '{}' for validation: {}", field, e),
        )
    })?;
    check(&json, field, false)
}

fn check(value: &JsonValue, path: &str, inside_array: bool) -> Result<(), DomainError> {
    match value {
        JsonValue::Array(items) => {
            if inside_array {
                return Err(DomainError::new(
                    ErrorCode::NestedStructure,
                    format!("Nested array is not storable at '{}'", path),
                )
                .with_detail("path", path));
            }
            for (i, item) in items.iter().enumerate() {
                check(item, &format!("{}[{}]", path, i), true)?;
            }
            Ok(())
        }
        JsonValue::Object(map) => {
            for (key, item) in map {
                // Entering an object resets array nesting only when we are
                // not inside an array element: an array under an object that
                // lives inside an array is still unstorable.
                check(item, &format!("{}.{}", path, key), inside_array)?;
            }
            Ok(())
        }
        _ => Ok(()),
    }
}
