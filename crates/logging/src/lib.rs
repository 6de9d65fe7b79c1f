// crates/logging/src/lib.rs

//! Structured JSON line logging.
//!
//! A [`Logger`] turns a message and an arbitrary [`safe_json::Value`] payload
//! into one JSON record per line and hands it to a [`Sink`]:
//!
//! ```text
//! {"level":3,"time":"2017-12-25T00:00:00.000Z","user":"ann","msg":"hi"}
//! ```
//!
//! The same line format is available for `tracing` events through
//! [`subscriber`] and [`JsonLogFormat`].

mod clock;
mod config;
mod error;
mod flags;
mod formatter;
mod json_format;
mod logger;
mod sink;
mod subscriber;

pub use clock::TimePolicy;
pub use config::{
    ENV_CYCLES, ENV_LOG_FILE, ENV_MAX_STRING, ENV_STDERR, ENV_TIME, LoggerConfig,
    LoggerConfigBuilder, parse_max_string,
};
pub use error::{ConfigError, LogError};
pub use flags::{Level, StderrMode, SubscriberConfig, SubscriberConfigBuilder, TimeFormat};
pub use formatter::{RecordFormatter, format_line};
pub use json_format::JsonLogFormat;
pub use logger::{Logger, split_args};
pub use sink::{FileSink, FnSink, MemorySink, NopSink, SharedSink, Sink, StderrSink, StdoutSink};
pub use subscriber::{init, subscriber};
