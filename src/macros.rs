//! Leveled logging macros.
//!
//! These expand at the call site, so besides the file they also attach the
//! enclosing function path as `function`.

/// Path of the function the macro is expanded in, e.g. `app::jobs::run`.
#[doc(hidden)]
#[macro_export]
macro_rules! function_path {
    () => {{
        fn __here() {}
        fn __type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        $crate::callsite::trim_function_path(__type_name_of(__here))
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __sigil_log {
    ($logger:expr, $severity:expr, $message:expr $(, $key:expr => $value:expr)*) => {{
        let logger: &$crate::Logger = &$logger;
        if logger.is_enabled($severity) {
            #[allow(unused_mut)]
            let mut metadata = $crate::Metadata::new();
            $( metadata.insert($key, $value); )*
            logger.log_in_function($severity, $message, metadata, $crate::function_path!());
        }
    }};
}

/// Log at debug level.
///
/// # Example
/// ```ignore
/// sigil_debug!(logger, "polling queue", "depth" => 3);
/// ```
#[macro_export]
macro_rules! sigil_debug {
    ($logger:expr, $message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::__sigil_log!($logger, $crate::Severity::Debug, $message $(, $key => $value)*)
    };
}

/// Log at verbose level.
#[macro_export]
macro_rules! sigil_verbose {
    ($logger:expr, $message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::__sigil_log!($logger, $crate::Severity::Verbose, $message $(, $key => $value)*)
    };
}

/// Log at info level.
///
/// # Example
/// ```ignore
/// sigil_info!(logger, "workflow started", "workflowId" => id);
/// ```
#[macro_export]
macro_rules! sigil_info {
    ($logger:expr, $message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::__sigil_log!($logger, $crate::Severity::Info, $message $(, $key => $value)*)
    };
}

/// Log at warn level.
#[macro_export]
macro_rules! sigil_warn {
    ($logger:expr, $message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::__sigil_log!($logger, $crate::Severity::Warn, $message $(, $key => $value)*)
    };
}

/// Log at error level.
#[macro_export]
macro_rules! sigil_error {
    ($logger:expr, $message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::__sigil_log!($logger, $crate::Severity::Error, $message $(, $key => $value)*)
    };
}
