//! Best-effort forward migration of persisted slices
//!
//! The only migration implemented today is the version stamp: a record
//! whose tag is missing or stale gets the current version written in and is
//! re-validated. Real shape changes need explicit per-version transforms
//! added here before this is anything more than a placeholder.

use serde_json::Value;
use tracing::debug;

use super::{SCHEMA_VERSION, ValidationErrors};

/// Version tag carried by every persisted slice
fn version_of(value: &Value) -> Option<&str> {
    value.get("version").and_then(Value::as_str)
}

/// Bring a raw stored record up to the current schema and validate it
///
/// Current-version records that validate pass through untouched. Anything
/// else is stamped with [`SCHEMA_VERSION`] (all other fields preserved;
/// non-objects become an empty stamped record) and validated again. The
/// error carries every remaining violation.
pub fn migrate_slice<T>(
    value: &Value,
    validate: impl Fn(&Value) -> Result<T, ValidationErrors>,
) -> Result<T, ValidationErrors> {
    if version_of(value) == Some(SCHEMA_VERSION)
        && let Ok(current) = validate(value)
    {
        return Ok(current);
    }

    debug!(
        version = version_of(value).unwrap_or("<none>"),
        "migrate_slice: stamping record to current version"
    );

    let mut stamped = match value {
        Value::Object(_) => value.clone(),
        _ => Value::Object(serde_json::Map::new()),
    };
    if let Value::Object(map) = &mut stamped {
        map.insert(
            "version".to_string(),
            Value::String(SCHEMA_VERSION.to_string()),
        );
    }

    validate(&stamped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::validate_chat_state;
    use serde_json::json;

    #[test]
    fn test_current_version_passes_through() {
        let value = json!({
            "version": SCHEMA_VERSION,
            "messages": [],
        });
        let state = migrate_slice(&value, validate_chat_state).unwrap();
        assert_eq!(state.version, SCHEMA_VERSION);
    }

    #[test]
    fn test_stale_version_is_stamped() {
        let value = json!({
            "version": "0.9.0",
            "messages": [],
        });
        let state = migrate_slice(&value, validate_chat_state).unwrap();
        assert_eq!(state.version, SCHEMA_VERSION);
    }

    #[test]
    fn test_missing_version_is_stamped() {
        let value = json!({ "messages": [] });
        let state = migrate_slice(&value, validate_chat_state).unwrap();
        assert_eq!(state.version, SCHEMA_VERSION);
    }

    #[test]
    fn test_stamping_preserves_other_fields() {
        let value = json!({
            "messages": [{
                "id": 1,
                "text": "hi",
                "sender": "ai",
                "timestamp": "2024-01-01T00:00:00Z",
            }],
            "onboardingCompleted": true,
        });
        let state = migrate_slice(&value, validate_chat_state).unwrap();
        assert_eq!(state.messages.len(), 1);
        assert!(state.onboarding_completed);
    }

    #[test]
    fn test_unfixable_record_reports_errors() {
        let value = json!({ "messages": "nope" });
        let errors = migrate_slice(&value, validate_chat_state).unwrap_err();
        assert!(errors.to_string().contains("messages:"));
    }

    #[test]
    fn test_non_object_fails_validation() {
        let errors = migrate_slice(&json!(42), validate_chat_state).unwrap_err();
        assert!(!errors.messages().is_empty());
    }
}
