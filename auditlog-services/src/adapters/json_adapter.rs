use super::EventRenderer;
use auditlog_core::NormalizedEvent;
use tracing::warn;

/// One JSON document per event, newline separated.
pub struct JsonLinesRenderer;

impl EventRenderer for JsonLinesRenderer {
    fn name(&self) -> &str {
        "json"
    }

    fn render(&self, events: &[NormalizedEvent]) -> String {
        let mut out = String::new();
        for event in events {
            match serde_json::to_string(event) {
                Ok(line) => {
                    out.push_str(&line);
                    out.push('\n');
                }
                Err(e) => warn!("Failed to serialize audit event {}: {}", event.id, e),
            }
        }
        out
    }
}
