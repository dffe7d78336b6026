use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use sigil_log::{install_log_bridge, Format, LogError, LogRecord, LogResult, LogSink, Logger, Severity};

/// Counts write attempts and fails every one of them, like stdout after the
/// reading end of the pipe has gone away.
#[derive(Clone, Default)]
struct ClosedPipe(Arc<AtomicUsize>);

impl LogSink for ClosedPipe {
    fn name(&self) -> &str {
        "closed-pipe"
    }

    fn format(&self) -> Format {
        Format::Bare
    }

    fn write_record(&self, _record: &LogRecord) -> LogResult<()> {
        self.0.fetch_add(1, Ordering::SeqCst);
        Err(LogError::io(
            "writing",
            std::io::Error::new(std::io::ErrorKind::BrokenPipe, "broken pipe"),
        ))
    }
}

// With no tracing subscriber installed, `tracing`'s `log` feature turns the
// sink-failure warning into a `log` record that reaches the bridge.
#[test]
fn failing_sink_behind_the_bridge_is_written_once_per_record() {
    let pipe = ClosedPipe::default();
    let logger: &'static Logger =
        Box::leak(Box::new(Logger::new(Severity::Info).with_sink(pipe.clone())));
    install_log_bridge(logger).unwrap();

    logger.error("one record", ());
    assert_eq!(pipe.0.load(Ordering::SeqCst), 1);

    log::warn!("from the log facade");
    assert_eq!(pipe.0.load(Ordering::SeqCst), 2);

    log::debug!("below the threshold");
    assert_eq!(pipe.0.load(Ordering::SeqCst), 2);

    assert!(matches!(
        install_log_bridge(logger),
        Err(LogError::AlreadyInitialized)
    ));
}
