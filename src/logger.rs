//! The leveled logger.
//!
//! A [`Logger`] owns an immutable threshold, its sinks and a caller
//! resolver. Every convenience method funnels into one dispatch path which
//! filters, attributes, stamps and fans the record out. Sink failures are
//! reported through `tracing` and never reach the caller.

use std::io::IsTerminal;
use std::panic::Location;

use crate::callsite::{CallSite, CallerResolver, LocationResolver};
use crate::config_loader::{LogsConfig, Output};
use crate::errors::LogResult;
use crate::format::Format;
use crate::log_sink::{ConsoleSink, FileSink, LogRecord, LogSink};
use crate::metadata::Metadata;
use crate::severity::{Severity, Threshold};

pub struct Logger {
    threshold: Threshold,
    sinks: Vec<Box<dyn LogSink>>,
    resolver: Box<dyn CallerResolver>,
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sinks: Vec<&str> = self.sinks.iter().map(|sink| sink.name()).collect();
        f.debug_struct("Logger")
            .field("threshold", &self.threshold)
            .field("sinks", &sinks)
            .finish()
    }
}

impl Logger {
    /// A logger with no sinks that attributes records to the caller's file.
    pub fn new(threshold: impl Into<Threshold>) -> Self {
        Logger {
            threshold: threshold.into(),
            sinks: Vec::new(),
            resolver: Box::new(LocationResolver),
        }
    }

    /// Builds the logger described by the `[logs]` configuration.
    ///
    /// Unknown level or output names and an unopenable log file are
    /// reported here rather than leaving the logger silently inert.
    pub fn from_config(config: &LogsConfig) -> LogResult<Self> {
        let threshold = config.threshold()?;
        let mut logger = Logger::new(threshold);

        for output in config.outputs()? {
            match output {
                Output::Console => {
                    let format = if threshold.wants_human_console() {
                        Format::Human {
                            ansi: std::io::stdout().is_terminal(),
                        }
                    } else {
                        Format::Bare
                    };
                    logger = logger.with_sink(ConsoleSink::stdout(format));
                }
                Output::File => {
                    let sink = FileSink::open(
                        &config.file.location,
                        config.file_max_bytes(),
                        config.file.file_count_max,
                    )?;
                    logger = logger.with_sink(sink);
                }
            }
        }

        tracing::debug!(
            target: "sigil_log",
            threshold = %threshold,
            sinks = logger.sinks.len(),
            "logger constructed"
        );
        Ok(logger)
    }

    pub fn with_sink(mut self, sink: impl LogSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    pub fn with_resolver(mut self, resolver: impl CallerResolver + 'static) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    pub fn threshold(&self) -> Threshold {
        self.threshold
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    /// Whether a record at `severity` would be dispatched at all.
    pub fn is_enabled(&self, severity: Severity) -> bool {
        self.threshold.enables(severity)
    }

    /// Dispatches a record attributed to the calling code.
    #[track_caller]
    pub fn log(&self, severity: Severity, message: impl AsRef<str>, metadata: impl Into<Metadata>) {
        if !self.is_enabled(severity) {
            return;
        }
        let site = self.resolver.resolve_caller(Location::caller());
        self.dispatch(severity, message.as_ref(), metadata.into(), site);
    }

    /// Like [`log`](Self::log), also naming the enclosing function when the
    /// resolver attributed the record. Used by the `sigil_*!` macros.
    #[track_caller]
    pub fn log_in_function(
        &self,
        severity: Severity,
        message: impl AsRef<str>,
        metadata: impl Into<Metadata>,
        function: &str,
    ) {
        if !self.is_enabled(severity) {
            return;
        }
        let site = self
            .resolver
            .resolve_caller(Location::caller())
            .map(|site| {
                if site.function.is_some() || function.is_empty() {
                    site
                } else {
                    site.with_function(function)
                }
            });
        self.dispatch(severity, message.as_ref(), metadata.into(), site);
    }

    /// Dispatches a record whose origin was resolved elsewhere.
    pub(crate) fn log_with_site(
        &self,
        severity: Severity,
        message: &str,
        metadata: Metadata,
        site: Option<CallSite>,
    ) {
        if self.is_enabled(severity) {
            self.dispatch(severity, message, metadata, site);
        }
    }

    fn dispatch(&self, severity: Severity, message: &str, mut metadata: Metadata, site: Option<CallSite>) {
        if let Some(site) = site {
            metadata.merge_attribution(site);
        }
        let record = LogRecord::new(severity, message, metadata);

        for sink in &self.sinks {
            if let Err(err) = sink.write_record(&record) {
                tracing::warn!(
                    target: "sigil_log::sink",
                    sink = sink.name(),
                    error = %err,
                    "dropped log record"
                );
            }
        }
    }

    #[track_caller]
    pub fn debug(&self, message: impl AsRef<str>, metadata: impl Into<Metadata>) {
        self.log(Severity::Debug, message, metadata);
    }

    #[track_caller]
    pub fn verbose(&self, message: impl AsRef<str>, metadata: impl Into<Metadata>) {
        self.log(Severity::Verbose, message, metadata);
    }

    #[track_caller]
    pub fn info(&self, message: impl AsRef<str>, metadata: impl Into<Metadata>) {
        self.log(Severity::Info, message, metadata);
    }

    #[track_caller]
    pub fn warn(&self, message: impl AsRef<str>, metadata: impl Into<Metadata>) {
        self.log(Severity::Warn, message, metadata);
    }

    #[track_caller]
    pub fn error(&self, message: impl AsRef<str>, metadata: impl Into<Metadata>) {
        self.log(Severity::Error, message, metadata);
    }
}
