use chrono::format::{Item, StrftimeItems};
use std::env;

pub const DEFAULT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const DEFAULT_MESSAGE_WIDTH: usize = 100;

#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub log_level: String,
    pub log_json: bool,
    pub output_format: String,
    pub time_format: String,
    pub skip_unknown: bool,
    /// Table message column width; 0 disables truncation, values below 3
    /// are widened to fit the `...` marker.
    pub message_width: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl Settings {
    pub fn new() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(get: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            log_level: get("AUDITLOG_LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            log_json: get("AUDITLOG_LOG_JSON").map(|v| is_enabled(&v)).unwrap_or(false),
            output_format: get("AUDITLOG_OUTPUT_FORMAT")
                .map(|v| v.to_lowercase())
                .unwrap_or_else(|| "table".to_string()),
            time_format: get("AUDITLOG_TIME_FORMAT")
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_TIME_FORMAT.to_string()),
            skip_unknown: get("AUDITLOG_SKIP_UNKNOWN")
                .map(|v| is_enabled(&v))
                .unwrap_or(false),
            message_width: get("AUDITLOG_MESSAGE_WIDTH")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(DEFAULT_MESSAGE_WIDTH),
        }
    }
}

/// Whether `pattern` is a strftime pattern chrono can render.
pub fn is_valid_time_format(pattern: &str) -> bool {
    !StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error))
}

fn is_enabled(value: &str) -> bool {
    value.to_lowercase() == "true" || value == "1"
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> Settings {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let s = Settings::default();
        assert_eq!(s.log_level, "info");
        assert!(!s.log_json);
        assert_eq!(s.output_format, "table");
        assert_eq!(s.time_format, DEFAULT_TIME_FORMAT);
        assert!(!s.skip_unknown);
        assert_eq!(s.message_width, DEFAULT_MESSAGE_WIDTH);
    }

    #[test]
    fn reads_overrides() {
        let s = settings(&[
            ("AUDITLOG_LOG_LEVEL", "debug"),
            ("AUDITLOG_OUTPUT_FORMAT", "JSON"),
            ("AUDITLOG_SKIP_UNKNOWN", "TRUE"),
            ("AUDITLOG_MESSAGE_WIDTH", "0"),
            ("AUDITLOG_LOG_JSON", "1"),
        ]);
        assert_eq!(s.log_level, "debug");
        assert_eq!(s.output_format, "json");
        assert!(s.skip_unknown);
        assert!(s.log_json);
        assert_eq!(s.message_width, 0);
    }

    #[test]
    fn bad_values_fall_back() {
        let s = settings(&[
            ("AUDITLOG_MESSAGE_WIDTH", "wide"),
            ("AUDITLOG_SKIP_UNKNOWN", "yes"),
            ("AUDITLOG_TIME_FORMAT", ""),
        ]);
        assert_eq!(s.message_width, DEFAULT_MESSAGE_WIDTH);
        assert!(!s.skip_unknown);
        assert_eq!(s.time_format, DEFAULT_TIME_FORMAT);
    }

    #[test]
    fn time_format_validation() {
        assert!(is_valid_time_format(DEFAULT_TIME_FORMAT));
        assert!(is_valid_time_format("%d/%m %H:%M"));
        assert!(!is_valid_time_format("%Q"));
    }
}
