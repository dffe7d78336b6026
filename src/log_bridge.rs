//! Routes records from the `log` crate facade into a [`Logger`].
//!
//! `log` has no verbose level: `Debug` and `Trace` both land on
//! [`Severity::Debug`]. The record's source file becomes the attribution.
//!
//! Records targeted at this crate are dropped. Its own `tracing`
//! diagnostics reach the `log` facade when `tracing`'s `log` feature is on,
//! and feeding a sink failure back into the failing sink never terminates.

use log::{Level, LevelFilter};

use crate::callsite::{file_basename, CallSite};
use crate::errors::{LogError, LogResult};
use crate::logger::Logger;
use crate::metadata::Metadata;
use crate::severity::{Severity, Threshold};

pub fn severity_for(level: Level) -> Severity {
    match level {
        Level::Error => Severity::Error,
        Level::Warn => Severity::Warn,
        Level::Info => Severity::Info,
        Level::Debug | Level::Trace => Severity::Debug,
    }
}

/// Target prefix of the diagnostics this crate emits through `tracing`.
pub const OWN_TARGET: &str = "sigil_log";

fn is_own_target(target: &str) -> bool {
    target
        .strip_prefix(OWN_TARGET)
        .map_or(false, |rest| rest.is_empty() || rest.starts_with("::"))
}

/// Most verbose `log` level that can pass `threshold`.
pub fn max_level_for(threshold: Threshold) -> LevelFilter {
    match threshold {
        Threshold::Silent => LevelFilter::Off,
        Threshold::At(Severity::Error) => LevelFilter::Error,
        Threshold::At(Severity::Warn) => LevelFilter::Warn,
        Threshold::At(Severity::Info) | Threshold::At(Severity::Verbose) => LevelFilter::Info,
        Threshold::At(Severity::Debug) => LevelFilter::Trace,
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        !is_own_target(metadata.target()) && self.is_enabled(severity_for(metadata.level()))
    }

    fn log(&self, record: &log::Record<'_>) {
        let severity = severity_for(record.level());
        if is_own_target(record.target()) || !self.is_enabled(severity) {
            return;
        }
        let site = record.file().map(|file| CallSite::new(file_basename(file)));
        let metadata = Metadata::new().with("target", record.target());
        self.log_with_site(severity, &record.args().to_string(), metadata, site);
    }

    fn flush(&self) {}
}

/// Makes `logger` the backend of the `log` macros.
pub fn install_log_bridge(logger: &'static Logger) -> LogResult<()> {
    log::set_logger(logger).map_err(|_| LogError::AlreadyInitialized)?;
    log::set_max_level(max_level_for(logger.threshold()));
    Ok(())
}
