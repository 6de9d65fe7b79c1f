// crates/logging/src/subscriber.rs
#![allow(missing_docs)]

use crate::clock::TimePolicy;
use crate::flags::SubscriberConfig;
use crate::formatter::RecordFormatter;
use crate::json_format::JsonLogFormat;
use crate::sink::{FileWriter, LogWriter};
use safe_json::Serializer;
use std::fs::OpenOptions;
use std::io;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt as tracing_fmt, layer::SubscriberExt, util::SubscriberInitExt};

fn default_level(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        LevelFilter::ERROR
    } else if verbose > 2 {
        LevelFilter::TRACE
    } else if verbose > 1 {
        LevelFilter::DEBUG
    } else if verbose > 0 {
        LevelFilter::INFO
    } else {
        LevelFilter::WARN
    }
}

/// Build a [`tracing`] subscriber whose events render as jsonlog records.
///
/// `RUST_LOG` directives override the level derived from `verbose`/`quiet`.
pub fn subscriber(cfg: SubscriberConfig) -> io::Result<Box<dyn tracing::Subscriber + Send + Sync>> {
    let SubscriberConfig {
        verbose,
        quiet,
        stderr,
        time,
        log_file,
    } = cfg;

    let filter = EnvFilter::builder()
        .with_default_directive(default_level(verbose, quiet).into())
        .from_env_lossy();

    let format =
        JsonLogFormat::new(RecordFormatter::new(Serializer::default(), TimePolicy::from(time)));

    let fmt_layer = tracing_fmt::layer()
        .with_writer(LogWriter { mode: stderr })
        .with_ansi(false)
        .event_format(format.clone());

    let file_layer = match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            Some(
                tracing_fmt::layer()
                    .with_writer(FileWriter { file })
                    .with_ansi(false)
                    .event_format(format),
            )
        }
        None => None,
    };

    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .with(file_layer);
    Ok(Box::new(registry))
}

/// Initialise the global [`tracing`] subscriber.
pub fn init(cfg: SubscriberConfig) -> io::Result<()> {
    subscriber(cfg)?.init();
    Ok(())
}
