// crates/logging/src/flags.rs
#![allow(missing_docs)]

use clap::ValueEnum;
use std::fmt;
use std::path::PathBuf;

/// Record severity. The numeric code is what lands in the `level` field.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, ValueEnum)]
#[clap(rename_all = "kebab-case")]
pub enum Level {
    #[clap(alias = "err")]
    Error,
    Warn,
    #[clap(alias = "log")]
    Info,
    Debug,
    Trace,
}

impl Level {
    pub const fn code(self) -> u8 {
        match self {
            Level::Error => 1,
            Level::Warn => 2,
            Level::Info => 3,
            Level::Debug => 4,
            Level::Trace => 5,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Level::Error => "error",
            Level::Warn => "warn",
            Level::Info => "info",
            Level::Debug => "debug",
            Level::Trace => "trace",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<tracing::Level> for Level {
    fn from(level: tracing::Level) -> Self {
        if level == tracing::Level::ERROR {
            Level::Error
        } else if level == tracing::Level::WARN {
            Level::Warn
        } else if level == tracing::Level::INFO {
            Level::Info
        } else if level == tracing::Level::DEBUG {
            Level::Debug
        } else {
            Level::Trace
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum, Default)]
#[clap(rename_all = "kebab-case")]
pub enum TimeFormat {
    #[default]
    Iso,
    #[clap(alias = "now")]
    Epoch,
    None,
}

/// Which levels are written to stderr rather than stdout.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum, Default)]
#[clap(rename_all = "kebab-case")]
pub enum StderrMode {
    #[clap(alias = "e")]
    #[default]
    Errors,
    #[clap(alias = "a")]
    All,
    #[clap(alias = "n")]
    None,
}

impl StderrMode {
    pub const fn routes_to_stderr(self, level: Level) -> bool {
        match self {
            StderrMode::Errors => matches!(level, Level::Error),
            StderrMode::All => true,
            StderrMode::None => false,
        }
    }
}

/// Settings for the `tracing` subscriber that renders events as records.
#[derive(Clone, Debug)]
pub struct SubscriberConfig {
    pub verbose: u8,
    pub quiet: bool,
    pub stderr: StderrMode,
    pub time: TimeFormat,
    pub log_file: Option<PathBuf>,
}

impl Default for SubscriberConfig {
    fn default() -> Self {
        Self {
            verbose: 0,
            quiet: false,
            stderr: StderrMode::Errors,
            time: TimeFormat::Iso,
            log_file: None,
        }
    }
}

#[derive(Default)]
pub struct SubscriberConfigBuilder {
    cfg: SubscriberConfig,
}

impl SubscriberConfig {
    pub fn builder() -> SubscriberConfigBuilder {
        SubscriberConfigBuilder::default()
    }
}

impl SubscriberConfigBuilder {
    pub fn verbose(mut self, verbose: u8) -> Self {
        self.cfg.verbose = verbose;
        self
    }

    pub fn quiet(mut self, quiet: bool) -> Self {
        self.cfg.quiet = quiet;
        self
    }

    pub fn stderr(mut self, stderr: StderrMode) -> Self {
        self.cfg.stderr = stderr;
        self
    }

    pub fn time(mut self, time: TimeFormat) -> Self {
        self.cfg.time = time;
        self
    }

    pub fn log_file(mut self, log_file: Option<PathBuf>) -> Self {
        self.cfg.log_file = log_file;
        self
    }

    pub fn build(self) -> SubscriberConfig {
        self.cfg
    }
}
