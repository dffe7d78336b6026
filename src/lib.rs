//! Library root for the `sigil_log` crate
//! Leveled, structured logging with console and rotating-file sinks

// Core error handling
pub mod errors;

// Levels & record fields
pub mod metadata;
pub mod severity;

// Attribution
pub mod callsite;

// Configuration
pub mod config_loader;

// Formatting & sinks
pub mod format;
pub mod log_sink;
pub mod rotating_file;

// Logger & process-wide access
pub mod global;
pub mod log_bridge;
pub mod logger;

#[macro_use]
mod macros;

pub use callsite::{CallSite, CallerResolver, LocationResolver, NoCallerResolver};
pub use config_loader::{load_config, FileConfig, LogsConfig, Output};
pub use errors::{LogError, LogResult};
pub use format::Format;
pub use global::{get_logger, init, try_logger};
pub use log_bridge::install_log_bridge;
pub use log_sink::{ConsoleSink, FileSink, LogRecord, LogSink};
pub use logger::Logger;
pub use metadata::Metadata;
pub use severity::{Severity, Threshold};
