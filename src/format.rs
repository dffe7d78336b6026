//! Per-sink rendering of log records.
//!
//! Every format renders exactly one newline-terminated line per record so a
//! sink can write it with a single call.

use chrono::SecondsFormat;
use colored::{Color, Colorize};
use serde::Serialize;

use crate::errors::{LogError, LogResult};
use crate::log_sink::LogRecord;
use crate::metadata::Metadata;
use crate::severity::Severity;

/// Width the level column is padded to in the human layout.
pub const LEVEL_COLUMN_WIDTH: usize = 18;

/// How a sink turns a record into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// `timestamp | level | message {metadata}`, optionally colored.
    Human { ansi: bool },
    /// The message text alone.
    Bare,
    /// One JSON document per line.
    Json,
}

#[derive(Serialize)]
struct JsonLine<'a> {
    level: &'a str,
    message: &'a str,
    metadata: &'a Metadata,
    timestamp: String,
}

impl Format {
    pub fn render(&self, record: &LogRecord) -> LogResult<String> {
        let mut line = match self {
            Format::Human { ansi } => render_human(record, *ansi)?,
            Format::Bare => record.message.clone(),
            Format::Json => {
                let doc = JsonLine {
                    level: record.severity.as_str(),
                    message: &record.message,
                    metadata: &record.metadata,
                    timestamp: iso_timestamp(record),
                };
                serde_json::to_string(&doc)
                    .map_err(|e| LogError::serialization("json log line", e))?
            }
        };
        line.push('\n');
        Ok(line)
    }
}

fn render_human(record: &LogRecord, ansi: bool) -> LogResult<String> {
    let padded = format!(
        "{:<width$}",
        record.severity.as_str(),
        width = LEVEL_COLUMN_WIDTH
    );
    let (level, message) = if ansi {
        let color = severity_color(record.severity);
        (
            padded.as_str().color(color).to_string(),
            record.message.as_str().color(color).to_string(),
        )
    } else {
        (padded, record.message.clone())
    };

    let mut line = format!("{} | {} | {}", iso_timestamp(record), level, message);
    if !record.metadata.is_empty() {
        let rendered = serde_json::to_string(&record.metadata)
            .map_err(|e| LogError::serialization("console metadata", e))?;
        line.push(' ');
        line.push_str(&rendered);
    }
    Ok(line)
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Error => Color::Red,
        Severity::Warn => Color::Yellow,
        Severity::Info => Color::Green,
        Severity::Verbose => Color::Cyan,
        Severity::Debug => Color::Blue,
    }
}

/// ISO 8601 UTC with millisecond precision, e.g. `2024-05-01T12:00:00.000Z`.
pub fn iso_timestamp(record: &LogRecord) -> String {
    record.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}
