//! Call-site attribution for log records.
//!
//! Public dispatch entry points on [`Logger`](crate::logger::Logger) are
//! `#[track_caller]`, so the `Location` handed to a [`CallerResolver`] is the
//! code that called `info`/`warn`/... rather than the logger itself. The
//! propagation only holds while every wrapper between the caller and the
//! dispatch path carries `#[track_caller]`; a wrapper without it becomes the
//! attributed site.

use std::panic::Location;
use std::path::Path;

/// File and, when known, enclosing function of the code that issued a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    pub file: String,
    pub function: Option<String>,
}

impl CallSite {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            function: None,
        }
    }

    pub fn with_function(mut self, function: impl Into<String>) -> Self {
        self.function = Some(function.into());
        self
    }
}

/// Resolves the originating call site of a record.
///
/// Returning `None` omits attribution; it is never an error.
pub trait CallerResolver: Send + Sync {
    fn resolve_caller(&self, origin: &'static Location<'static>) -> Option<CallSite>;
}

/// Attributes records to the basename of the caller's source file.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocationResolver;

impl CallerResolver for LocationResolver {
    fn resolve_caller(&self, origin: &'static Location<'static>) -> Option<CallSite> {
        Some(CallSite::new(file_basename(origin.file())))
    }
}

/// Never attributes; for targets without usable location data.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCallerResolver;

impl CallerResolver for NoCallerResolver {
    fn resolve_caller(&self, _origin: &'static Location<'static>) -> Option<CallSite> {
        None
    }
}

/// Final path segment with its extension, or an empty string.
pub fn file_basename(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Strips the helper item that [`function_path!`](crate::function_path) uses
/// to discover its enclosing function.
#[doc(hidden)]
pub fn trim_function_path(raw: &'static str) -> &'static str {
    let path = raw.strip_suffix("::__here").unwrap_or(raw);
    // closures show up as `outer::{{closure}}`
    path.trim_end_matches("::{{closure}}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basename_keeps_extension() {
        assert_eq!(file_basename("src/workflow/runner.rs"), "runner.rs");
        assert_eq!(file_basename("main.rs"), "main.rs");
    }

    #[test]
    fn basename_of_empty_path_is_empty() {
        assert_eq!(file_basename(""), "");
        assert_eq!(file_basename("/"), "");
    }

    #[test]
    fn location_resolver_uses_caller_file() {
        let site = LocationResolver
            .resolve_caller(Location::caller())
            .expect("location resolver always attributes");
        assert_eq!(site.file, "callsite.rs");
        assert_eq!(site.function, None);
    }

    #[test]
    fn no_caller_resolver_omits_attribution() {
        assert!(NoCallerResolver.resolve_caller(Location::caller()).is_none());
    }

    #[test]
    fn trims_helper_and_closure_segments() {
        assert_eq!(
            trim_function_path("app::jobs::run::__here"),
            "app::jobs::run"
        );
        assert_eq!(
            trim_function_path("app::jobs::run::{{closure}}::__here"),
            "app::jobs::run"
        );
    }
}
