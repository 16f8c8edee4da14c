use crate::codes::EventCode;
use crate::error::{AuditError, Result};
use crate::formatters::{lookup, EventDescriptor};
use crate::metrics::{MetricNames, GLOBAL_METRICS};
use crate::raw::{render_value, RawEvent};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

/// An audit record ready for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedEvent {
    pub code_desc: String,
    pub message: String,
    pub id: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    pub time: Value,
    pub raw: RawEvent,
}

impl NormalizedEvent {
    pub fn descriptor(&self) -> &'static EventDescriptor {
        lookup(&self.code)
    }

    pub fn event_code(&self) -> Option<EventCode> {
        EventCode::from_code(&self.code)
    }

    /// `time` parsed as a UTC instant, if it is an RFC 3339 string or epoch millis.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.raw.timestamp("time")
    }

    pub fn is_unknown(&self) -> bool {
        self.descriptor().is_fallback()
    }
}

/// Resolves a raw audit record to its display form.
///
/// Never fails: unrecognised codes use the `Unknown` descriptor and absent
/// fields render as empty text. The record is moved into `raw` untouched.
pub fn make_event(raw: impl Into<RawEvent>) -> NormalizedEvent {
    let raw = raw.into();
    let code = raw.text("code");
    if code.is_empty() {
        warn!("audit record has no code");
    }

    let descriptor = lookup(&code);
    if descriptor.is_fallback() {
        debug!(code = %code, "no formatter registered for audit event code");
        GLOBAL_METRICS.increment(MetricNames::EVENTS_UNKNOWN, 1, &[]);
    }
    GLOBAL_METRICS.increment(MetricNames::EVENTS_FORMATTED, 1, &[("code", code.as_str())]);

    NormalizedEvent {
        code_desc: descriptor.desc.to_string(),
        message: descriptor.format(&raw),
        id: event_id(&raw),
        code,
        user: raw.get("user").map(render_value),
        time: raw.get("time").cloned().unwrap_or(Value::Null),
        raw,
    }
}

// Older records have no uid; compose one from the legacy event name and time.
fn event_id(raw: &RawEvent) -> String {
    if raw.is_truthy("uid") {
        return raw.text("uid");
    }
    format!("{}:{}", raw.text("event"), raw.text("time"))
}

/// Parses a single JSON object and normalizes it.
pub fn parse_event(input: &str) -> Result<NormalizedEvent> {
    let value: Value = serde_json::from_str(input)?;
    if !value.is_object() {
        return Err(AuditError::NotAnObject { position: 1 });
    }
    Ok(make_event(value))
}

/// Parses either a JSON array of records or newline-delimited records.
/// Blank lines are skipped; positions in errors are 1-based.
pub fn parse_events(input: &str) -> Result<Vec<NormalizedEvent>> {
    if input.trim_start().starts_with('[') {
        let values: Vec<Value> = serde_json::from_str(input)?;
        return values
            .into_iter()
            .enumerate()
            .map(|(i, value)| {
                if !value.is_object() {
                    return Err(AuditError::NotAnObject { position: i + 1 });
                }
                Ok(make_event(value))
            })
            .collect();
    }

    let mut events = Vec::new();
    for (i, line) in input.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let value: Value = serde_json::from_str(line)
            .map_err(|source| AuditError::InvalidLine { line: i + 1, source })?;
        if !value.is_object() {
            return Err(AuditError::NotAnObject { position: i + 1 });
        }
        events.push(make_event(value));
    }
    Ok(events)
}
