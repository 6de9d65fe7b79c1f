// src/run.rs
use crate::cli::Cli;
use logging::{ConfigError, LogError, Logger, LoggerConfig, parse_max_string, split_args};
use safe_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Log(#[from] LogError),
}

impl RunError {
    pub fn exit_code(&self) -> i32 {
        match self {
            RunError::Config(_) => 2,
            RunError::Log(_) => 1,
        }
    }
}

/// Environment first, then any flag given on the command line.
pub fn config_for(cli: &Cli) -> Result<LoggerConfig, ConfigError> {
    let mut cfg = LoggerConfig::from_env()?;
    if let Some(time) = cli.time {
        cfg.time = time;
    }
    if let Some(stderr) = cli.stderr {
        cfg.stderr = stderr;
    }
    if let Some(max) = &cli.max_string {
        cfg.max_string_len = parse_max_string(max)?;
    }
    if let Some(cycles) = cli.cycles {
        cfg.cycles = cycles;
    }
    if cli.log_file.is_some() {
        cfg.log_file = cli.log_file.clone();
    }
    Ok(cfg)
}

pub fn parse_arg(arg: &str) -> Value {
    match serde_json::from_str::<serde_json::Value>(arg) {
        Ok(json) => Value::from(json),
        Err(_) => Value::from(arg),
    }
}

/// Writes the record described by `cli` and returns the line.
pub fn run(cli: Cli) -> Result<String, RunError> {
    let cfg = config_for(&cli)?;
    tracing::debug!(target: "jsonlog", ?cfg, "logger configuration");

    let mut logger = Logger::from_config(&cfg)?;
    for ctx in cli.context {
        logger = logger.child(&Value::from(ctx));
    }

    let (message, data) = split_args(cli.args.iter().map(|a| parse_arg(a)).collect());
    Ok(logger.try_log(cli.level, message, data)?)
}
