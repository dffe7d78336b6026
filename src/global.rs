// global.rs
// Purpose: The process-wide logger instance
//
// Prefer handing `&Logger` to components explicitly; these accessors exist
// for code that cannot thread a handle through.

use once_cell::sync::OnceCell;

use crate::config_loader::load_config;
use crate::errors::{LogError, LogResult};
use crate::logger::Logger;

static LOGGER: OnceCell<Logger> = OnceCell::new();

/// Returns the process-wide logger, building it from configuration on first
/// use. Concurrent first callers all observe the same instance. A
/// configuration error is returned and construction is retried next call.
pub fn get_logger() -> LogResult<&'static Logger> {
    LOGGER.get_or_try_init(|| {
        let config = load_config(None)?;
        Logger::from_config(&config)
    })
}

/// Installs an explicitly built logger as the process-wide instance.
///
/// Fails once any instance exists; there is no reconfiguration.
pub fn init(logger: Logger) -> LogResult<&'static Logger> {
    LOGGER
        .try_insert(logger)
        .map_err(|_| LogError::AlreadyInitialized)
}

/// The process-wide logger if one has been built.
pub fn try_logger() -> Option<&'static Logger> {
    LOGGER.get()
}
