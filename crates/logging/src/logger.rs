// crates/logging/src/logger.rs

use crate::clock::TimePolicy;
use crate::config::LoggerConfig;
use crate::error::{ConfigError, LogError};
use crate::flags::{Level, StderrMode};
use crate::formatter::RecordFormatter;
use crate::sink::{FileSink, SharedSink, StderrSink, StdoutSink};
use safe_json::{Array, Serializer, Value};
use std::fmt;
use std::sync::Arc;

/// Structured logger writing one JSON record per call.
///
/// A logger never changes after construction. [`Logger::child`] renders the
/// extra context once and returns a new logger; the parent is untouched.
#[derive(Clone)]
pub struct Logger {
    formatter: Arc<RecordFormatter>,
    ctx: Arc<str>,
    out: SharedSink,
    err: SharedSink,
}

impl Logger {
    /// Error records go to `err`, everything else to `out`.
    pub fn new(formatter: RecordFormatter, out: SharedSink, err: SharedSink) -> Self {
        Self {
            formatter: Arc::new(formatter),
            ctx: Arc::from(""),
            out,
            err,
        }
    }

    pub fn with_sink(formatter: RecordFormatter, sink: SharedSink) -> Self {
        Self::new(formatter, sink.clone(), sink)
    }

    pub fn from_config(cfg: &LoggerConfig) -> Result<Self, ConfigError> {
        let serializer = Serializer::new()
            .max_string_len(cfg.max_string_len)
            .cycle_policy(cfg.cycles);
        let formatter = RecordFormatter::new(serializer, TimePolicy::from(cfg.time));

        if let Some(path) = &cfg.log_file {
            let file = FileSink::open(path).map_err(|source| ConfigError::LogFile {
                path: path.clone(),
                source,
            })?;
            return Ok(Self::with_sink(formatter, Arc::new(file)));
        }

        let stdout: SharedSink = Arc::new(StdoutSink);
        let stderr: SharedSink = Arc::new(StderrSink);
        let logger = match cfg.stderr {
            StderrMode::Errors => Self::new(formatter, stdout, stderr),
            StderrMode::All => Self::with_sink(formatter, stderr),
            StderrMode::None => Self::with_sink(formatter, stdout),
        };
        Ok(logger)
    }

    pub fn formatter(&self) -> &RecordFormatter {
        &self.formatter
    }

    /// The rendered context prefix carried by this logger.
    pub fn context(&self) -> &str {
        &self.ctx
    }

    pub fn child(&self, ctx: &Value) -> Logger {
        let pairs = self.formatter.serializer().render_pairs(ctx);
        let mut combined = String::with_capacity(self.ctx.len() + pairs.len());
        combined.push_str(&self.ctx);
        combined.push_str(&pairs);
        tracing::trace!(target: "jsonlog", context = %combined, "child logger");
        Logger {
            formatter: Arc::clone(&self.formatter),
            ctx: Arc::from(combined),
            out: Arc::clone(&self.out),
            err: Arc::clone(&self.err),
        }
    }

    pub fn render(&self, level: Level, message: &Value, data: &Value) -> String {
        self.formatter.format(level, &self.ctx, message, data)
    }

    pub fn try_log(
        &self,
        level: Level,
        message: impl Into<Value>,
        data: impl Into<Value>,
    ) -> Result<String, LogError> {
        let line = self.render(level, &message.into(), &data.into());
        let sink = if level == Level::Error {
            &self.err
        } else {
            &self.out
        };
        sink.write_line(&line)
            .map_err(|source| LogError::Sink { level, source })?;
        Ok(line)
    }

    /// Like [`Logger::try_log`] but a sink failure is only reported through
    /// `tracing`; the line is returned either way.
    pub fn log(&self, level: Level, message: impl Into<Value>, data: impl Into<Value>) -> String {
        let line = self.render(level, &message.into(), &data.into());
        let sink = if level == Level::Error {
            &self.err
        } else {
            &self.out
        };
        if let Err(err) = sink.write_line(&line) {
            tracing::warn!(target: "jsonlog", %level, error = %err, "failed to write log record");
        }
        line
    }

    /// Writes an error-level record and returns the line.
    ///
    /// A sink failure only reaches `tracing`; use [`Logger::try_log`] to get
    /// the write error.
    pub fn error(&self, message: impl Into<Value>, data: impl Into<Value>) -> String {
        self.log(Level::Error, message, data)
    }

    /// Writes a warn-level record and returns the line.
    ///
    /// A sink failure only reaches `tracing`; use [`Logger::try_log`] to get
    /// the write error.
    pub fn warn(&self, message: impl Into<Value>, data: impl Into<Value>) -> String {
        self.log(Level::Warn, message, data)
    }

    /// Writes an info-level record and returns the line.
    ///
    /// A sink failure only reaches `tracing`; use [`Logger::try_log`] to get
    /// the write error.
    pub fn info(&self, message: impl Into<Value>, data: impl Into<Value>) -> String {
        self.log(Level::Info, message, data)
    }

    /// Writes a debug-level record and returns the line.
    ///
    /// A sink failure only reaches `tracing`; use [`Logger::try_log`] to get
    /// the write error.
    pub fn debug(&self, message: impl Into<Value>, data: impl Into<Value>) -> String {
        self.log(Level::Debug, message, data)
    }

    /// Logs a loosely-typed argument list, see [`split_args`].
    pub fn log_args<I>(&self, level: Level, args: I) -> String
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let (message, data) = split_args(args.into_iter().map(Into::into).collect());
        self.log(level, message, data)
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("formatter", &self.formatter)
            .field("ctx", &self.ctx)
            .finish_non_exhaustive()
    }
}

/// Splits call arguments into `(message, data)`.
///
/// - none: both undefined
/// - one string: the message
/// - one of anything else: the data, with no message
/// - two: message then data
/// - more: a leading string is the message and the rest become a data array;
///   otherwise every argument goes into the data array.
pub fn split_args(mut args: Vec<Value>) -> (Value, Value) {
    match args.len() {
        0 => (Value::Undefined, Value::Undefined),
        1 => {
            let only = args.remove(0);
            if only.as_str().is_some() {
                (only, Value::Undefined)
            } else {
                (Value::Undefined, only)
            }
        }
        2 => {
            let data = args.remove(1);
            let message = args.remove(0);
            (message, data)
        }
        _ => {
            let message = if args[0].as_str().is_some() {
                args.remove(0)
            } else {
                Value::Undefined
            };
            let rest: Array = args.into_iter().collect();
            (message, Value::Array(rest))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;

    fn capture() -> (Logger, MemorySink) {
        let sink = MemorySink::new();
        let fmt = RecordFormatter::new(Serializer::default(), TimePolicy::None);
        (Logger::with_sink(fmt, Arc::new(sink.clone())), sink)
    }

    #[test]
    fn returned_line_matches_sink() {
        let (log, sink) = capture();
        let line = log.info("hi", ());
        assert_eq!(line, "{\"level\":3,\"msg\":\"hi\"}\n");
        assert_eq!(sink.lines(), [line]);
    }

    #[test]
    fn split_rules() {
        let (m, d) = split_args(vec![]);
        assert!(m.is_undefined() && d.is_undefined());

        let (m, d) = split_args(vec![Value::from("x")]);
        assert_eq!(m.as_str(), Some("x"));
        assert!(d.is_undefined());

        let (m, d) = split_args(vec![Value::from(5)]);
        assert!(m.is_undefined());
        assert!(matches!(d, Value::Number(n) if n == 5.0));

        let (m, d) = split_args(vec![Value::from(1), Value::from(2), Value::from(3)]);
        assert!(m.is_undefined());
        assert!(matches!(d, Value::Array(a) if a.len() == 3));
    }

    #[test]
    fn logger_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Logger>();
    }
}
