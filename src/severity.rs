// severity.rs
// Purpose: Ordered log levels and the threshold that filters them

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::LogError;

/// Severity classifies a log record. Declaration order is the filtering rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Debug,
    Verbose,
    Info,
    Warn,
    Error,
}

impl Severity {
    /// Every severity, lowest rank first.
    pub const ALL: [Severity; 5] = [
        Severity::Debug,
        Severity::Verbose,
        Severity::Info,
        Severity::Warn,
        Severity::Error,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Debug => "debug",
            Severity::Verbose => "verbose",
            Severity::Info => "info",
            Severity::Warn => "warn",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Severity::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| LogError::config("logs.level", format!("unknown log level '{name}'")))
    }
}

/// Threshold is the configured minimum severity, or `Silent` to emit nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Threshold {
    At(Severity),
    Silent,
}

impl Threshold {
    /// Returns true when a record at `severity` passes this threshold.
    pub fn enables(&self, severity: Severity) -> bool {
        match self {
            Threshold::Silent => false,
            Threshold::At(min) => severity >= *min,
        }
    }

    /// Debug and verbose thresholds get the timestamped console layout.
    pub fn wants_human_console(&self) -> bool {
        matches!(
            self,
            Threshold::At(Severity::Debug) | Threshold::At(Severity::Verbose)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Threshold::At(level) => level.as_str(),
            Threshold::Silent => "silent",
        }
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Threshold::At(Severity::Info)
    }
}

impl From<Severity> for Threshold {
    fn from(level: Severity) -> Self {
        Threshold::At(level)
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Threshold {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("silent") {
            return Ok(Threshold::Silent);
        }
        s.parse::<Severity>().map(Threshold::At)
    }
}

impl TryFrom<String> for Threshold {
    type Error = LogError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Threshold> for String {
    fn from(threshold: Threshold) -> Self {
        threshold.as_str().to_string()
    }
}
