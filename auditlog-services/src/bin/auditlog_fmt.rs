//! Renders already-fetched audit records for a terminal.
//!
//! ```bash
//! # JSON array or JSON lines, from a file or stdin
//! auditlog-fmt events.json
//! cat events.jsonl | auditlog-fmt --format json --skip-unknown
//! ```

use anyhow::{ensure, Context, Result};
use auditlog_core::parse_events;
use auditlog_services::adapters::{BaseAdapter, RendererRegistry};
use auditlog_services::config::{is_valid_time_format, Settings};
use auditlog_services::logging::setup_logging;
use clap::Parser;
use std::io::Read;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "auditlog-fmt")]
#[command(about = "Format audit log records into human readable events", long_about = None)]
struct Cli {
    /// Input file (JSON array or JSON lines); reads stdin when omitted
    input: Option<PathBuf>,

    /// Output format (table, json)
    #[arg(short = 'f', long = "format")]
    format: Option<String>,

    /// Omit events with unrecognised codes
    #[arg(long = "skip-unknown")]
    skip_unknown: bool,

    /// strftime pattern for the table time column
    #[arg(long = "time-format")]
    time_format: Option<String>,

    /// Table message column width (0 = unlimited)
    #[arg(short = 'w', long = "width")]
    width: Option<usize>,

    /// Log level when RUST_LOG is unset
    #[arg(long = "log-level")]
    log_level: Option<String>,
}

impl Cli {
    fn apply(self, mut settings: Settings) -> (Settings, Option<PathBuf>) {
        if let Some(format) = self.format {
            settings.output_format = format.to_lowercase();
        }
        if self.skip_unknown {
            settings.skip_unknown = true;
        }
        if let Some(time_format) = self.time_format {
            settings.time_format = time_format;
        }
        if let Some(width) = self.width {
            settings.message_width = width;
        }
        if let Some(level) = self.log_level {
            settings.log_level = level;
        }
        (settings, self.input)
    }
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn main() -> Result<()> {
    let (settings, input) = Cli::parse().apply(Settings::new());
    setup_logging(&settings.log_level, settings.log_json);
    ensure!(
        is_valid_time_format(&settings.time_format),
        "invalid time format: {:?}",
        settings.time_format
    );

    let text = read_input(input.as_ref())?;
    let events = parse_events(&text).context("failed to parse audit records")?;
    info!("Parsed {} audit records", events.len());

    let registry = RendererRegistry::with_defaults(&settings);
    let adapter = BaseAdapter::from_registry(settings, &registry)
        .with_context(|| format!("available formats: {}", registry.list().join(", ")))?;

    print!("{}", adapter.render(events));
    Ok(())
}
