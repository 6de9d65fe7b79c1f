// src/lib.rs
//! One JSON record per line, safe for any payload.
//!
//! ```
//! use jsonlog::{Logger, MemorySink, RecordFormatter, TimePolicy, Value};
//! use std::sync::Arc;
//!
//! let sink = MemorySink::new();
//! let log = Logger::with_sink(
//!     RecordFormatter::new(Default::default(), TimePolicy::None),
//!     Arc::new(sink.clone()),
//! );
//! let req = log.child(&Value::from(serde_json::json!({"req": 7})));
//! req.info("done", Value::from(serde_json::json!({"ms": 12})));
//! assert_eq!(sink.lines(), ["{\"level\":3,\"req\":7,\"ms\":12,\"msg\":\"done\"}\n"]);
//! ```

mod cli;
mod run;

pub use cli::Cli;
pub use run::{RunError, config_for, parse_arg, run};

pub use logging::{
    ConfigError, FileSink, FnSink, Level, LogError, Logger, LoggerConfig, LoggerConfigBuilder,
    MemorySink, NopSink, RecordFormatter, SharedSink, Sink, StderrMode, StderrSink, StdoutSink,
    TimeFormat, TimePolicy, format_line, split_args,
};
pub use safe_json::{
    Array, CyclePolicy, ErrorObject, Object, Serializer, Value, render_pairs, to_json,
};

use std::sync::{Arc, OnceLock};

static STOCK: OnceLock<Logger> = OnceLock::new();

/// The process-wide logger.
///
/// Built on first use from the `JSONLOG_*` environment variables: ISO
/// timestamps, error records on stderr and the rest on stdout unless the
/// environment says otherwise. A bad environment falls back to the defaults.
pub fn log() -> &'static Logger {
    STOCK.get_or_init(|| {
        let cfg = LoggerConfig::from_env().unwrap_or_else(|err| {
            tracing::warn!(target: "jsonlog", error = %err, "ignoring logger environment");
            LoggerConfig::default()
        });
        Logger::from_config(&cfg).unwrap_or_else(|err| {
            tracing::warn!(target: "jsonlog", error = %err, "falling back to stdout and stderr");
            Logger::new(
                RecordFormatter::default(),
                Arc::new(StdoutSink),
                Arc::new(StderrSink),
            )
        })
    })
}
