// src/cli.rs
use clap::{ArgAction, Parser};
use logging::{ConfigError, Level, StderrMode, TimeFormat};
use safe_json::CyclePolicy;
use std::path::PathBuf;

/// Write one structured JSON log record.
#[derive(Parser, Debug)]
#[command(name = "jsonlog", version, long_about = None)]
#[command(allow_negative_numbers = true)]
pub struct Cli {
    /// Record level
    #[arg(value_enum, ignore_case = true)]
    pub level: Level,

    /// Message and data; each argument is read as JSON when it parses, as a string otherwise
    #[arg(value_name = "ARG")]
    pub args: Vec<String>,

    /// Context object added before the data; repeat to chain contexts
    #[arg(short = 'c', long = "context", value_name = "JSON", value_parser = parse_context)]
    pub context: Vec<serde_json::Value>,

    /// Time field format [env: JSONLOG_TIME]
    #[arg(long, value_enum, value_name = "FORMAT")]
    pub time: Option<TimeFormat>,

    /// Which levels go to stderr [env: JSONLOG_STDERR]
    #[arg(long, value_enum, value_name = "MODE")]
    pub stderr: Option<StderrMode>,

    /// Append records to FILE instead of stdout/stderr [env: JSONLOG_FILE]
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Longest string kept before truncation, or `off` [env: JSONLOG_MAX_STRING]
    #[arg(long = "max-string", value_name = "N|off")]
    pub max_string: Option<String>,

    /// Marker policy for repeated references: duplicates or cycles [env: JSONLOG_CYCLES]
    #[arg(long, value_name = "POLICY")]
    pub cycles: Option<CyclePolicy>,

    /// Increase diagnostic verbosity
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

fn parse_context(input: &str) -> Result<serde_json::Value, ConfigError> {
    serde_json::from_str(input).map_err(|source| ConfigError::InvalidContext {
        input: input.to_owned(),
        source,
    })
}
