//! Loosely typed audit records as delivered by the audit backend.
//!
//! Every accessor here is total: a missing field, a `null`, or a value of an
//! unexpected shape renders as text instead of failing. Formatters rely on
//! that to stay infallible.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An audit record exactly as it came off the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawEvent(Value);

impl RawEvent {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// Looks up a top-level key. Dotted keys such as `addr.local` are taken
    /// literally. `null` counts as absent.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|v| !v.is_null())
    }

    /// Walks nested objects, e.g. `["identity", "user"]`.
    pub fn get_path(&self, path: &[&str]) -> Option<&Value> {
        let mut current = &self.0;
        for key in path {
            current = current.get(key)?;
        }
        (!current.is_null()).then_some(current)
    }

    /// Renders a field for interpolation into a message; absent fields are empty.
    pub fn text(&self, key: &str) -> String {
        self.get(key).map(render_value).unwrap_or_default()
    }

    pub fn text_path(&self, path: &[&str]) -> String {
        self.get_path(path).map(render_value).unwrap_or_default()
    }

    /// Text of the first truthy field among `keys`.
    pub fn first_text(&self, keys: &[&str]) -> String {
        keys.iter()
            .filter_map(|k| self.get(k))
            .find(|v| is_truthy(v))
            .map(render_value)
            .unwrap_or_default()
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_f64)
    }

    pub fn is_truthy(&self, key: &str) -> bool {
        self.get(key).is_some_and(is_truthy)
    }

    /// Reads a timestamp given either as an RFC 3339 string or as epoch milliseconds.
    pub fn timestamp(&self, key: &str) -> Option<DateTime<Utc>> {
        self.get(key).and_then(parse_timestamp)
    }
}

impl From<Value> for RawEvent {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl From<RawEvent> for Value {
    fn from(raw: RawEvent) -> Self {
        raw.0
    }
}

pub fn render_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(_) | Value::Number(_) | Value::Object(_) => value.to_string(),
        Value::Array(items) => items
            .iter()
            .map(render_value)
            .collect::<Vec<_>>()
            .join(","),
    }
}

pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

pub fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        Value::Number(n) => n
            .as_i64()
            .and_then(|ms| Utc.timestamp_millis_opt(ms).single()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn text_defaults_to_empty() {
        let raw = RawEvent::new(json!({"user": "alice", "gone": null}));
        assert_eq!(raw.text("user"), "alice");
        assert_eq!(raw.text("missing"), "");
        assert_eq!(raw.text("gone"), "");
    }

    #[test]
    fn text_renders_non_strings() {
        let raw = RawEvent::new(json!({
            "port": 22,
            "ok": true,
            "roles": ["dev", "ops"],
            "meta": {"a": 1}
        }));
        assert_eq!(raw.text("port"), "22");
        assert_eq!(raw.text("ok"), "true");
        assert_eq!(raw.text("roles"), "dev,ops");
        assert_eq!(raw.text("meta"), r#"{"a":1}"#);
    }

    #[test]
    fn dotted_keys_are_literal() {
        let raw = RawEvent::new(json!({"addr.local": "10.0.0.1:3022", "addr": {"local": "nope"}}));
        assert_eq!(raw.text("addr.local"), "10.0.0.1:3022");
        assert_eq!(raw.text_path(&["addr", "local"]), "nope");
    }

    #[test]
    fn nested_path_missing_step() {
        let raw = RawEvent::new(json!({"identity": "flat"}));
        assert_eq!(raw.text_path(&["identity", "user"]), "");
        assert_eq!(RawEvent::default().text_path(&["identity", "user"]), "");
    }

    #[test]
    fn truthiness() {
        let raw = RawEvent::new(json!({
            "empty": "", "zero": 0, "f": false, "s": "x", "n": 2, "t": true, "o": {}
        }));
        for key in ["empty", "zero", "f", "missing"] {
            assert!(!raw.is_truthy(key), "{key} should be falsy");
        }
        for key in ["s", "n", "t", "o"] {
            assert!(raw.is_truthy(key), "{key} should be truthy");
        }
    }

    #[test]
    fn first_text_skips_falsy() {
        let raw = RawEvent::new(json!({"server_hostname": "", "server_addr": "1.2.3.4", "server_id": "abc"}));
        assert_eq!(raw.first_text(&["server_hostname", "server_addr", "server_id"]), "1.2.3.4");
        assert_eq!(raw.first_text(&["nothing"]), "");
    }

    #[test]
    fn timestamps_from_strings_and_millis() {
        let raw = RawEvent::new(json!({
            "a": "2022-03-01T10:00:00Z",
            "b": 1_646_128_800_000_i64,
            "c": "yesterday"
        }));
        assert_eq!(raw.timestamp("a"), raw.timestamp("b"));
        assert!(raw.timestamp("a").is_some());
        assert!(raw.timestamp("c").is_none());
    }
}
