// crates/logging/tests/subscriber_builder.rs

use logging::{StderrMode, SubscriberConfig, TimeFormat};
use std::path::PathBuf;

#[test]
fn builder_sets_fields() {
    let cfg = SubscriberConfig::builder()
        .verbose(2)
        .quiet(true)
        .stderr(StderrMode::All)
        .time(TimeFormat::Epoch)
        .log_file(Some(PathBuf::from("log")))
        .build();

    assert_eq!(cfg.verbose, 2);
    assert!(cfg.quiet);
    assert_eq!(cfg.stderr, StderrMode::All);
    assert_eq!(cfg.time, TimeFormat::Epoch);
    assert_eq!(cfg.log_file, Some(PathBuf::from("log")));
}

#[test]
fn defaults() {
    let cfg = SubscriberConfig::default();
    assert_eq!(cfg.verbose, 0);
    assert!(!cfg.quiet);
    assert_eq!(cfg.stderr, StderrMode::Errors);
    assert_eq!(cfg.time, TimeFormat::Iso);
    assert!(cfg.log_file.is_none());
}
