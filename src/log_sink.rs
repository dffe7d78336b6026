// log_sink.rs
// Purpose: Destinations that receive formatted log records

use chrono::{DateTime, Utc};
use std::io::{self, Stdout, Write};
use std::path::PathBuf;
use std::sync::Mutex;

use crate::errors::{LogError, LogResult};
use crate::format::Format;
use crate::metadata::Metadata;
use crate::rotating_file::RotatingFile;
use crate::severity::Severity;

/// LogRecord is one dispatched message. It is built once per call, lent to
/// every sink and then dropped.
#[derive(Debug, Clone)]
pub struct LogRecord {
    pub severity: Severity,
    pub message: String,
    pub metadata: Metadata,
    pub timestamp: DateTime<Utc>,
}

impl LogRecord {
    pub fn new(severity: Severity, message: impl Into<String>, metadata: Metadata) -> Self {
        Self {
            severity,
            message: message.into(),
            metadata,
            timestamp: Utc::now(),
        }
    }
}

/// A destination for records. Implementations serialize their own writes so
/// a record's bytes never interleave with another's.
pub trait LogSink: Send + Sync {
    fn name(&self) -> &str;
    fn format(&self) -> Format;
    fn write_record(&self, record: &LogRecord) -> LogResult<()>;
}

/// Writes records to a stream, one rendered line per locked write.
pub struct ConsoleSink<W> {
    format: Format,
    writer: Mutex<W>,
}

impl ConsoleSink<Stdout> {
    pub fn stdout(format: Format) -> Self {
        Self::new(io::stdout(), format)
    }
}

impl<W: Write + Send> ConsoleSink<W> {
    pub fn new(writer: W, format: Format) -> Self {
        Self {
            format,
            writer: Mutex::new(writer),
        }
    }

    /// Consumes the sink and returns the wrapped writer.
    pub fn into_inner(self) -> LogResult<W> {
        self.writer
            .into_inner()
            .map_err(|_| LogError::sink_poisoned("console"))
    }
}

impl<W: Write + Send> LogSink for ConsoleSink<W> {
    fn name(&self) -> &str {
        "console"
    }

    fn format(&self) -> Format {
        self.format
    }

    fn write_record(&self, record: &LogRecord) -> LogResult<()> {
        let line = self.format.render(record)?;
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| LogError::sink_poisoned("console"))?;
        writer
            .write_all(line.as_bytes())
            .and_then(|_| writer.flush())
            .map_err(|e| LogError::io("writing console record", e))
    }
}

/// Newline-delimited JSON records in a size-rotated file.
pub struct FileSink {
    path: PathBuf,
    file: Mutex<RotatingFile>,
}

impl FileSink {
    pub fn open(path: impl Into<PathBuf>, max_bytes: u64, max_files: usize) -> LogResult<Self> {
        let file = RotatingFile::open(path, max_bytes, max_files)?;
        Ok(Self {
            path: file.path().to_path_buf(),
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl LogSink for FileSink {
    fn name(&self) -> &str {
        "file"
    }

    fn format(&self) -> Format {
        Format::Json
    }

    fn write_record(&self, record: &LogRecord) -> LogResult<()> {
        let line = Format::Json.render(record)?;
        let mut file = self
            .file
            .lock()
            .map_err(|_| LogError::sink_poisoned("file"))?;
        file.write_line(line.as_bytes())
    }
}
