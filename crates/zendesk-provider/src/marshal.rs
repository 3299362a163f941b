//! Conversions between Terraform's tri-state values and plain Rust values.
//!
//! Terraform hands every attribute over as known, null or unknown. Building a
//! request only looks at known values (the counterpart of the SDK's `GetOk`);
//! building state from a response decides per attribute whether an absent
//! value is null or falls back to what Terraform already holds.

use tf_provider::Value;

use crate::error::ProviderError;

/// A set (or list) of possibly-unknown elements, as Terraform sends them.
pub type ValueSet<T> = Value<Vec<Value<T>>>;

// ── Reading configuration ─────────────────────────────────────────────────────

pub fn known<T>(value: &Value<T>) -> Option<&T> {
    match value {
        Value::Value(v) => Some(v),
        _ => None,
    }
}

/// Known, non-empty string.
pub fn known_string(value: &Value<String>) -> Option<String> {
    known(value).filter(|s| !s.is_empty()).cloned()
}

/// Known, non-zero integer.
pub fn known_int(value: &Value<i64>) -> Option<i64> {
    known(value).copied().filter(|n| *n != 0)
}

pub fn known_bool(value: &Value<bool>) -> bool {
    matches!(value, Value::Value(true))
}

/// Known elements of a set; null and unknown elements are skipped.
pub fn items<T: Clone>(set: &ValueSet<T>) -> Vec<T> {
    known(set)
        .map(|elements| elements.iter().filter_map(known).cloned().collect())
        .unwrap_or_default()
}

/// Parse the numeric id Zendesk assigned to a resource.
pub fn parse_id(kind: &'static str, id: &Value<String>) -> Result<i64, ProviderError> {
    let raw = known(id).map(String::as_str).unwrap_or_default();
    raw.trim().parse().map_err(|source| ProviderError::InvalidId {
        kind,
        id: raw.to_string(),
        source,
    })
}

/// The string id of a resource, failing when it has not been assigned yet.
pub fn require_id(kind: &'static str, id: &Value<String>) -> Result<String, ProviderError> {
    known_string(id).ok_or_else(|| ProviderError::InvalidValue {
        attribute: "id",
        message: format!("{} has no id", kind),
    })
}

// ── Building state ────────────────────────────────────────────────────────────

pub fn value<T>(v: T) -> Value<T> {
    Value::Value(v)
}

/// `None` becomes null.
pub fn optional<T>(v: Option<T>) -> Value<T> {
    v.map(Value::Value).unwrap_or(Value::Null)
}

/// Optional strings the API reports as absent or empty both become null.
pub fn non_empty(v: Option<String>) -> Value<String> {
    optional(v.filter(|s| !s.is_empty()))
}

pub fn id_value(id: Option<i64>) -> Value<String> {
    optional(id.map(|id| id.to_string()))
}

pub fn set_of<T>(elements: impl IntoIterator<Item = T>) -> ValueSet<T> {
    Value::Value(elements.into_iter().map(Value::Value).collect())
}

/// Block or optional attribute sets reported by the API. An empty result keeps
/// the shape Terraform already has (null or empty) so an absent set does not diff.
pub fn block_set<T>(elements: Vec<T>, prior: &ValueSet<T>) -> ValueSet<T> {
    if elements.is_empty() && matches!(prior, Value::Null) {
        return Value::Null;
    }
    set_of(elements)
}

/// Write-only inputs the API never echoes keep the value Terraform holds.
pub fn carry_over<T: Clone>(prior: &Value<T>) -> Value<T> {
    match prior {
        Value::Unknown => Value::Null,
        other => other.clone(),
    }
}

// ── Planning ──────────────────────────────────────────────────────────────────

/// A null computed attribute becomes unknown so the API can fill it in.
pub fn unknown_if_null<T>(v: &mut Value<T>) {
    if matches!(v, Value::Null) {
        *v = Value::Unknown;
    }
}

/// Apply a schema default when the configuration leaves the attribute out.
pub fn default_if_null<T>(planned: &mut Value<T>, config: &Value<T>, default: T) {
    if matches!(config, Value::Null) {
        *planned = Value::Value(default);
    }
}

/// After apply, every value Terraform planned as known must come back
/// unchanged; only unknown values are taken from the API.
pub fn settle<T>(planned: &Value<T>, applied: Value<T>) -> Value<T>
where
    T: Clone,
{
    match planned {
        Value::Unknown => applied,
        known => known.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_string_skips_empty_null_and_unknown() {
        assert_eq!(known_string(&value("x".to_string())), Some("x".into()));
        assert_eq!(known_string(&value(String::new())), None);
        assert_eq!(known_string(&Value::Null), None);
        assert_eq!(known_string(&Value::Unknown), None);
    }

    #[test]
    fn known_int_treats_zero_as_unset() {
        assert_eq!(known_int(&value(9)), Some(9));
        assert_eq!(known_int(&value(0)), None);
    }

    #[test]
    fn items_skip_unknown_elements() {
        let set: ValueSet<i64> = Value::Value(vec![value(1), Value::Unknown, value(3), Value::Null]);
        assert_eq!(items(&set), vec![1, 3]);
        assert!(items::<i64>(&Value::Unknown).is_empty());
    }

    #[test]
    fn parse_id_errors_name_the_kind() {
        assert_eq!(parse_id("group", &value("42".to_string())).unwrap(), 42);
        let err = parse_id("group", &value("abc".to_string())).unwrap_err();
        assert!(err.to_string().contains("group id \"abc\""));
        assert!(parse_id("group", &Value::Null).is_err());
    }

    #[test]
    fn non_empty_maps_blank_to_null() {
        assert_eq!(non_empty(Some("x".into())), value("x".to_string()));
        assert_eq!(non_empty(Some(String::new())), Value::Null);
        assert_eq!(non_empty(None), Value::Null);
    }

    #[test]
    fn block_set_keeps_null_when_nothing_returned() {
        assert_eq!(block_set::<i64>(vec![], &Value::Null), Value::Null);
        assert_eq!(block_set::<i64>(vec![], &Value::Value(vec![])), Value::Value(vec![]));
        assert_eq!(block_set(vec![1], &Value::Null), set_of([1]));
    }

    #[test]
    fn settle_only_fills_unknowns() {
        assert_eq!(settle(&Value::Unknown, value(5)), value(5));
        assert_eq!(settle(&value(3), value(5)), value(3));
        assert_eq!(settle::<i64>(&Value::Null, value(5)), Value::Null);
    }

    #[test]
    fn defaults_follow_configuration() {
        let mut planned = value(false);
        default_if_null(&mut planned, &Value::Null, true);
        assert_eq!(planned, value(true));

        let mut planned = value(false);
        default_if_null(&mut planned, &value(false), true);
        assert_eq!(planned, value(false));
    }

    #[test]
    fn unknown_if_null_leaves_known_values() {
        let mut v: Value<i64> = Value::Null;
        unknown_if_null(&mut v);
        assert_eq!(v, Value::Unknown);
        let mut v = value(1);
        unknown_if_null(&mut v);
        assert_eq!(v, value(1));
    }
}
