// crates/logging/tests/log_file.rs

use logging::{Logger, LoggerConfig, SubscriberConfig, TimeFormat, subscriber};
use serde_json::Value;
use tempfile::tempdir;
use tracing::warn;

#[test]
fn subscriber_appends_records_to_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("log.jsonl");
    let cfg = SubscriberConfig::builder()
        .time(TimeFormat::None)
        .log_file(Some(path.clone()))
        .build();
    temp_env::with_var_unset("RUST_LOG", || {
        let sub = subscriber(cfg).unwrap();
        tracing::subscriber::with_default(sub, || {
            warn!(target: "test", "disk nearly full");
        });
    });
    let contents = std::fs::read_to_string(path).unwrap();
    assert_eq!(contents, "{\"level\":2,\"msg\":\"disk nearly full\"}\n");
}

#[test]
fn logger_file_sink_gets_every_level() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("app.log");
    let cfg = LoggerConfig::builder()
        .time(TimeFormat::Epoch)
        .log_file(Some(path.clone()))
        .build();
    let log = Logger::from_config(&cfg).unwrap();
    log.error("boom", ());
    log.info("fine", ());

    let contents = std::fs::read_to_string(path).unwrap();
    let lines: Vec<Value> = contents
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["level"], 1);
    assert_eq!(lines[1]["msg"], "fine");
    assert!(lines[1]["time"].is_u64());
}

#[test]
fn file_sink_appends() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("app.log");
    std::fs::write(&path, "existing\n").unwrap();
    let cfg = LoggerConfig::builder()
        .time(TimeFormat::None)
        .log_file(Some(path.clone()))
        .build();
    Logger::from_config(&cfg).unwrap().warn("next", ());
    let contents = std::fs::read_to_string(path).unwrap();
    assert_eq!(contents, "existing\n{\"level\":2,\"msg\":\"next\"}\n");
}
