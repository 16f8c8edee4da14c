use super::EventRenderer;
use auditlog_core::raw::render_value;
use auditlog_core::text::truncate;
use auditlog_core::NormalizedEvent;
use std::fmt::Write;

const HEADERS: [&str; 5] = ["TIME", "CODE", "EVENT", "USER", "MESSAGE"];

/// Narrowest message column that still fits the `...` marker.
pub const MIN_MESSAGE_WIDTH: usize = 3;

/// Fixed-width text table, one row per event.
pub struct TableRenderer {
    time_format: String,
    message_width: usize,
}

impl TableRenderer {
    pub fn new(time_format: String, message_width: usize) -> Self {
        Self {
            time_format,
            message_width,
        }
    }

    fn row(&self, event: &NormalizedEvent) -> [String; 5] {
        let time = event
            .timestamp()
            .and_then(|ts| {
                let mut out = String::new();
                write!(out, "{}", ts.format(&self.time_format)).ok()?;
                Some(out)
            })
            .unwrap_or_else(|| render_value(&event.time));
        let message = if self.message_width == 0 {
            event.message.clone()
        } else {
            truncate(&event.message, self.message_width.max(MIN_MESSAGE_WIDTH))
        };
        [
            time,
            event.code.clone(),
            event.code_desc.clone(),
            event.user.clone().unwrap_or_default(),
            message,
        ]
    }
}

impl EventRenderer for TableRenderer {
    fn name(&self) -> &str {
        "table"
    }

    fn render(&self, events: &[NormalizedEvent]) -> String {
        let header = HEADERS.map(String::from);
        let rows: Vec<[String; 5]> = std::iter::once(header)
            .chain(events.iter().map(|e| self.row(e)))
            .collect();

        let mut widths = [0usize; 5];
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row.iter()) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut out = String::new();
        for row in &rows {
            let cells: Vec<String> = row
                .iter()
                .zip(widths.iter())
                .enumerate()
                .map(|(i, (cell, width))| {
                    // last column is never padded
                    if i == row.len() - 1 {
                        cell.clone()
                    } else {
                        format!("{:<width$}", cell, width = width)
                    }
                })
                .collect();
            out.push_str(cells.join(" | ").trim_end());
            out.push('\n');
        }
        out
    }
}
