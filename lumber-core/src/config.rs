use crate::error::LumberError;
use crate::record::Level;
use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Logging configuration. Every field has a default so an empty config
/// file (or none at all) produces a working stderr JSON logger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum level the sink accepts.
    #[serde(default = "default_level")]
    pub level: Level,

    #[serde(default)]
    pub output: LogOutput,

    /// Route records through a bounded background buffer so emit calls
    /// never touch the output writer. Records are dropped when the
    /// buffer is full.
    #[serde(default)]
    pub buffered: bool,

    #[serde(default = "default_buffer_capacity")]
    pub buffer_capacity: usize,

    #[serde(default)]
    pub sampling: SamplingConfig,
}

/// Where encoded records go.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    Stderr,
    Stdout,
    File { path: String },
}

impl Default for LogOutput {
    fn default() -> Self {
        LogOutput::Stderr
    }
}

/// Per-call-site sampling: within each interval the first `initial`
/// records for a given message pass, thereafter every `thereafter`-th.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SamplingConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_initial")]
    pub initial: u64,
    #[serde(default = "default_thereafter")]
    pub thereafter: u64,
    #[serde(default = "default_interval")]
    pub interval_secs: u64,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            output: LogOutput::default(),
            buffered: false,
            buffer_capacity: default_buffer_capacity(),
            sampling: SamplingConfig::default(),
        }
    }
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            initial: default_initial(),
            thereafter: default_thereafter(),
            interval_secs: default_interval(),
        }
    }
}

impl LoggingConfig {
    /// Load from a YAML file, with `LUMBER_*` environment overrides
    /// (`LUMBER_LEVEL=warn`, `LUMBER_SAMPLING__ENABLED=true`, ...).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LumberError> {
        Figment::new()
            .merge(Yaml::file(path.as_ref()))
            .merge(Env::prefixed("LUMBER_").split("__"))
            .extract()
            .map_err(|e| LumberError::Config(e.to_string()))
    }
}

// ── Defaults ──────────────────────────────────────────────────

fn default_level() -> Level {
    Level::Info
}
fn default_buffer_capacity() -> usize {
    10_000
}
fn default_initial() -> u64 {
    100
}
fn default_thereafter() -> u64 {
    100
}
fn default_interval() -> u64 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, Level::Info);
        assert_eq!(config.output, LogOutput::Stderr);
        assert!(!config.buffered);
        assert_eq!(config.buffer_capacity, 10_000);
        assert!(!config.sampling.enabled);
        assert_eq!(config.sampling.initial, 100);
        assert_eq!(config.sampling.thereafter, 100);
        assert_eq!(config.sampling.interval_secs, 1);
    }

    #[test]
    fn parses_partial_yaml() {
        let config: LoggingConfig = Figment::new()
            .merge(Yaml::string("level: warn\nsampling:\n  enabled: true\n  initial: 5\n"))
            .extract()
            .unwrap();
        assert_eq!(config.level, Level::Warn);
        assert!(config.sampling.enabled);
        assert_eq!(config.sampling.initial, 5);
        // Untouched fields keep their defaults
        assert_eq!(config.sampling.thereafter, 100);
        assert_eq!(config.output, LogOutput::Stderr);
    }

    #[test]
    fn parses_file_output() {
        let config: LoggingConfig = Figment::new()
            .merge(Yaml::string("output:\n  file:\n    path: /var/log/app.jsonl\n"))
            .extract()
            .unwrap();
        assert_eq!(
            config.output,
            LogOutput::File {
                path: "/var/log/app.jsonl".to_string()
            }
        );
    }

    #[test]
    fn empty_yaml_is_valid() {
        let config: LoggingConfig = Figment::new()
            .merge(Yaml::string(""))
            .extract()
            .unwrap();
        assert_eq!(config.level, Level::Info);
    }
}
