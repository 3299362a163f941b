//! Codec for rule action values.
//!
//! Terraform models an action value as a single string, while the Zendesk API
//! accepts either a string or an array (e.g. `notification_user` takes
//! `["requester_id", "subject", "body"]`). Array values travel through
//! Terraform as their JSON text.

use serde_json::Value;

use crate::error::DomainError;

/// Convert a Terraform action value into the JSON value sent to Zendesk.
///
/// A string starting with `[` must parse as JSON; anything else is sent as a
/// plain JSON string.
pub fn encode(raw: &str) -> Result<Value, DomainError> {
    if raw.starts_with('[') {
        return serde_json::from_str(raw).map_err(|source| DomainError::InvalidActionValue {
            value: raw.to_string(),
            source,
        });
    }
    Ok(Value::String(raw.to_string()))
}

/// Render an action value returned by Zendesk as the Terraform string.
pub fn decode(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
