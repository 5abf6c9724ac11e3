//! Structural and content validation run before trusting a loaded state
//! blob. This is a defense-in-depth guard against stored-payload injection,
//! not a full sanitizer: a blob that fails here is discarded in favor of
//! the backup slot.

use serde_json::Value;

/// Substrings that must never appear in a serialized state blob.
const INJECTION_MARKERS: &[&str] = &["<script>", "javascript:"];

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum IntegrityError {
    #[error("state blob is not a JSON object")]
    NotAnObject,
    #[error("state blob has no `projects` array")]
    MissingProjects,
    #[error("state blob contains injection marker {0:?}")]
    InjectionMarker(&'static str),
}

/// Validate a parsed state blob against the raw text it was parsed from.
///
/// Rules: the value must be an object, it must carry an array-valued
/// `projects` field, and the raw serialized form must not contain a known
/// injection marker.
pub fn check(raw: &str, value: &Value) -> Result<(), IntegrityError> {
    let Some(object) = value.as_object() else {
        return Err(IntegrityError::NotAnObject);
    };

    match object.get("projects") {
        Some(Value::Array(_)) => {}
        _ => return Err(IntegrityError::MissingProjects),
    }

    for marker in INJECTION_MARKERS {
        if raw.contains(marker) {
            return Err(IntegrityError::InjectionMarker(marker));
        }
    }

    Ok(())
}
