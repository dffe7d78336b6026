use figment::{
    providers::{Env, Format, Toml},
    value::Uncased,
    Figment,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::errors::{LogError, LogResult};
use crate::severity::Threshold;

/// Config file read when no explicit path is given.
pub const DEFAULT_CONFIG_FILE: &str = "sigil_log.toml";

/// Environment variable naming an alternative config file.
pub const CONFIG_PATH_ENV: &str = "SIGIL_LOG_CONFIG";

/// Prefix for per-setting overrides, e.g. `SIGIL_LOG_LEVEL=debug`.
pub const ENV_PREFIX: &str = "SIGIL_LOG_";

/// The `[logs]` section of the configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LogsConfig {
    pub level: String,
    pub output: String,
    pub file: FileConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub location: PathBuf,
    /// Rotation threshold in MiB.
    #[serde(alias = "fileSizeMax")]
    pub file_size_max: u64,
    /// Rotated files kept next to the live one.
    #[serde(alias = "fileCountMax")]
    pub file_count_max: usize,
}

impl Default for LogsConfig {
    fn default() -> Self {
        LogsConfig {
            level: "info".to_string(),
            output: "console".to_string(),
            file: FileConfig::default(),
        }
    }
}

impl Default for FileConfig {
    fn default() -> Self {
        FileConfig {
            location: PathBuf::from("logs/sigil.log"),
            file_size_max: 16,
            file_count_max: 100,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    logs: LogsConfig,
}

/// A sink named in `logs.output`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    Console,
    File,
}

impl FromStr for Output {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "console" => Ok(Output::Console),
            "file" => Ok(Output::File),
            other => Err(LogError::config(
                "logs.output",
                format!("unknown output '{other}', expected console or file"),
            )),
        }
    }
}

impl LogsConfig {
    pub fn threshold(&self) -> LogResult<Threshold> {
        self.level.parse()
    }

    /// Parses the comma-separated output list. Blank entries are skipped and
    /// repeats collapse into one sink.
    pub fn outputs(&self) -> LogResult<Vec<Output>> {
        let mut outputs = Vec::new();
        for name in self.output.split(',').map(str::trim).filter(|n| !n.is_empty()) {
            let output = name.parse::<Output>()?;
            if !outputs.contains(&output) {
                outputs.push(output);
            }
        }
        Ok(outputs)
    }

    pub fn file_max_bytes(&self) -> u64 {
        self.file
            .file_size_max
            .saturating_mul(crate::rotating_file::BYTES_PER_MIB)
    }
}

/// Loads `[logs]` from the TOML file, then `SIGIL_LOG_*` environment
/// overrides. Keys neither source sets fall back to the `Default` impls
/// through `#[serde(default)]`, so either key spelling can override them.
pub fn load_config(path: Option<&Path>) -> LogResult<LogsConfig> {
    let file = match path {
        Some(path) => path.to_path_buf(),
        None => std::env::var_os(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE)),
    };

    let figment = Figment::new()
        .merge(Toml::file(file))
        .merge(env_overrides());

    let config: ConfigFile = figment.extract()?;
    Ok(config.logs)
}

fn env_overrides() -> Env {
    Env::prefixed(ENV_PREFIX)
        .only(&[
            "level",
            "output",
            "file_location",
            "file_size_max",
            "file_count_max",
        ])
        .map(|key| {
            let key = key.as_str().to_ascii_lowercase();
            match key.as_str() {
                "file_location" => Uncased::new("logs.file.location"),
                "file_size_max" | "file_count_max" => Uncased::new(format!("logs.file.{key}")),
                _ => Uncased::new(format!("logs.{key}")),
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_output(output: &str) -> LogsConfig {
        LogsConfig {
            output: output.to_string(),
            ..LogsConfig::default()
        }
    }

    #[test]
    fn outputs_are_trimmed_and_deduplicated() {
        let outputs = with_output(" console , file,console,").outputs().unwrap();
        assert_eq!(outputs, vec![Output::Console, Output::File]);
    }

    #[test]
    fn empty_output_means_no_sinks() {
        assert!(with_output("").outputs().unwrap().is_empty());
    }

    #[test]
    fn unknown_output_fails_fast() {
        let err = with_output("console,syslog").outputs().unwrap_err();
        assert!(err.to_string().contains("syslog"));
    }

    #[test]
    fn size_limit_is_in_mebibytes() {
        let mut config = LogsConfig::default();
        config.file.file_size_max = 3;
        assert_eq!(config.file_max_bytes(), 3 * 1_048_576);
    }
}
