// crates/logging/src/error.rs

use crate::flags::Level;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LogError {
    #[error("failed to write {level} record: {source}")]
    Sink {
        level: Level,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {var}")]
    InvalidEnv { var: &'static str, value: String },
    #[error("invalid context {input:?}: expected a JSON value")]
    InvalidContext {
        input: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to open log file {}: {source}", path.display())]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
