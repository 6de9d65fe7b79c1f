// crates/logging/src/config.rs

use crate::error::ConfigError;
use crate::flags::{StderrMode, TimeFormat};
use clap::ValueEnum;
use safe_json::{CyclePolicy, DEFAULT_MAX_STRING_LEN};
use std::path::PathBuf;

pub const ENV_TIME: &str = "JSONLOG_TIME";
pub const ENV_STDERR: &str = "JSONLOG_STDERR";
pub const ENV_MAX_STRING: &str = "JSONLOG_MAX_STRING";
pub const ENV_CYCLES: &str = "JSONLOG_CYCLES";
pub const ENV_LOG_FILE: &str = "JSONLOG_FILE";

/// Everything needed to build a [`crate::Logger`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoggerConfig {
    pub time: TimeFormat,
    pub stderr: StderrMode,
    pub max_string_len: Option<usize>,
    pub cycles: CyclePolicy,
    pub log_file: Option<PathBuf>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            time: TimeFormat::Iso,
            stderr: StderrMode::Errors,
            max_string_len: Some(DEFAULT_MAX_STRING_LEN),
            cycles: CyclePolicy::Duplicates,
            log_file: None,
        }
    }
}

#[derive(Default)]
pub struct LoggerConfigBuilder {
    cfg: LoggerConfig,
}

impl LoggerConfig {
    pub fn builder() -> LoggerConfigBuilder {
        LoggerConfigBuilder::default()
    }

    /// Reads the `JSONLOG_*` variables from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`LoggerConfig::from_env`] with a custom variable source.
    /// Unset and empty variables keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());
        let mut builder = LoggerConfig::builder();

        if let Some(value) = get(ENV_TIME) {
            builder = builder.time(parse_enum(ENV_TIME, &value)?);
        }
        if let Some(value) = get(ENV_STDERR) {
            builder = builder.stderr(parse_enum(ENV_STDERR, &value)?);
        }
        if let Some(value) = get(ENV_MAX_STRING) {
            builder = builder.max_string_len(parse_max_string(&value)?);
        }
        if let Some(value) = get(ENV_CYCLES) {
            let policy = value
                .trim()
                .parse::<CyclePolicy>()
                .map_err(|_| invalid(ENV_CYCLES, &value))?;
            builder = builder.cycle_policy(policy);
        }
        if let Some(value) = get(ENV_LOG_FILE) {
            builder = builder.log_file(Some(PathBuf::from(value)));
        }
        Ok(builder.build())
    }
}

impl LoggerConfigBuilder {
    pub fn time(mut self, time: TimeFormat) -> Self {
        self.cfg.time = time;
        self
    }

    pub fn stderr(mut self, stderr: StderrMode) -> Self {
        self.cfg.stderr = stderr;
        self
    }

    pub fn max_string_len(mut self, max: Option<usize>) -> Self {
        self.cfg.max_string_len = max;
        self
    }

    pub fn cycle_policy(mut self, cycles: CyclePolicy) -> Self {
        self.cfg.cycles = cycles;
        self
    }

    pub fn log_file(mut self, log_file: Option<PathBuf>) -> Self {
        self.cfg.log_file = log_file;
        self
    }

    pub fn build(self) -> LoggerConfig {
        self.cfg
    }
}

fn invalid(var: &'static str, value: &str) -> ConfigError {
    ConfigError::InvalidEnv {
        var,
        value: value.to_owned(),
    }
}

fn parse_enum<E: ValueEnum>(var: &'static str, value: &str) -> Result<E, ConfigError> {
    E::from_str(value.trim(), true).map_err(|_| invalid(var, value))
}

/// `off`/`none` disables the cap; anything else must be a character count.
pub fn parse_max_string(value: &str) -> Result<Option<usize>, ConfigError> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("off") || value.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    value
        .parse::<usize>()
        .map(Some)
        .map_err(|_| invalid(ENV_MAX_STRING, value))
}
