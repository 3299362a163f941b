//! Configuration checks run during `validate`. Unknown and null values are
//! skipped: they are either filled in later or rejected by the schema.

use std::path::Path;

use tf_provider::Value;

use crate::marshal::known;

/// One rejected attribute, reported as an attribute-scoped diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub attribute: &'static str,
    pub message: String,
}

impl Violation {
    pub fn new(attribute: &'static str, message: impl Into<String>) -> Self {
        Self { attribute, message: message.into() }
    }
}

pub fn string_in_slice(attribute: &'static str, value: &Value<String>, allowed: &[&str]) -> Option<Violation> {
    let v = known(value)?;
    if allowed.contains(&v.as_str()) {
        return None;
    }
    Some(Violation::new(
        attribute,
        format!("expected one of [{}], got {:?}", allowed.join(", "), v),
    ))
}

pub fn int_at_least(attribute: &'static str, value: &Value<i64>, min: i64) -> Option<Violation> {
    let v = *known(value)?;
    (v < min).then(|| Violation::new(attribute, format!("expected at least {}, got {}", min, v)))
}

pub fn string_is_not_empty(attribute: &'static str, value: &Value<String>) -> Option<Violation> {
    let v = known(value)?;
    v.is_empty().then(|| Violation::new(attribute, "must not be empty"))
}

pub fn is_url_with_http_or_https(attribute: &'static str, value: &Value<String>) -> Option<Violation> {
    let v = known(value)?;
    match reqwest::Url::parse(v) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.host().is_some() => None,
        Ok(url) => Some(Violation::new(
            attribute,
            format!("expected an http or https URL with a host, got scheme {:?}", url.scheme()),
        )),
        Err(e) => Some(Violation::new(attribute, format!("invalid URL {:?}: {}", v, e))),
    }
}

pub fn string_is_json(attribute: &'static str, value: &Value<String>) -> Option<Violation> {
    let v = known(value)?;
    serde_json::from_str::<serde_json::Value>(v)
        .err()
        .map(|e| Violation::new(attribute, format!("invalid JSON: {}", e)))
}

/// The path must exist and must not be a directory.
pub fn is_valid_file(attribute: &'static str, value: &Value<String>) -> Option<Violation> {
    let v = known(value)?;
    match Path::new(v).metadata() {
        Ok(meta) if meta.is_dir() => Some(Violation::new(attribute, format!("{} is a directory", v))),
        Ok(_) => None,
        Err(e) => Some(Violation::new(attribute, format!("{}: {}", v, e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marshal::value;

    fn s(v: &str) -> Value<String> {
        value(v.to_string())
    }

    #[test]
    fn string_in_slice_accepts_listed_values() {
        assert_eq!(string_in_slice("status", &s("active"), &["active", "inactive"]), None);
        let v = string_in_slice("status", &s("paused"), &["active", "inactive"]).unwrap();
        assert_eq!(v.attribute, "status");
        assert!(v.message.contains("paused"));
    }

    #[test]
    fn unknown_and_null_are_not_checked() {
        assert_eq!(string_in_slice("status", &Value::Unknown, &["active"]), None);
        assert_eq!(int_at_least("position", &Value::Null, 8), None);
        assert_eq!(is_valid_file("file_path", &Value::Unknown), None);
    }

    #[test]
    fn int_at_least_bounds() {
        assert_eq!(int_at_least("position", &value(8), 8), None);
        assert!(int_at_least("position", &value(7), 8).is_some());
    }

    #[test]
    fn url_must_be_http_or_https() {
        assert_eq!(is_url_with_http_or_https("endpoint", &s("https://example.com/hook")), None);
        assert_eq!(is_url_with_http_or_https("endpoint", &s("http://localhost:8080")), None);
        assert!(is_url_with_http_or_https("endpoint", &s("ftp://example.com")).is_some());
        assert!(is_url_with_http_or_https("endpoint", &s("example.com")).is_some());
    }

    #[test]
    fn json_strings() {
        assert_eq!(string_is_json("data", &s(r#"{"token":"x"}"#)), None);
        assert!(string_is_json("data", &s("{token")).is_some());
    }

    #[test]
    fn not_empty() {
        assert_eq!(string_is_not_empty("account", &s("acme")), None);
        assert!(string_is_not_empty("account", &s("")).is_some());
    }

    #[test]
    fn file_checks() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("logo.png");
        std::fs::write(&file, b"png").unwrap();

        assert_eq!(is_valid_file("file_path", &s(file.to_str().unwrap())), None);
        let v = is_valid_file("file_path", &s(dir.path().to_str().unwrap())).unwrap();
        assert!(v.message.contains("directory"));
        assert!(is_valid_file("file_path", &s("/definitely/not/here")).is_some());
    }
}
