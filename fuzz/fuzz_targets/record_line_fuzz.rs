// fuzz/fuzz_targets/record_line_fuzz.rs
#![no_main]
use libfuzzer_sys::fuzz_target;
use logging::{Level, TimePolicy, format_line};
use safe_json::Value;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let (message, rest) = text.split_once('\n').unwrap_or((text.as_ref(), ""));
    let payload = serde_json::from_str::<serde_json::Value>(rest)
        .map(Value::from)
        .unwrap_or_else(|_| Value::from(rest));
    let line = format_line(
        Level::Info,
        &TimePolicy::None,
        "",
        &Value::from(message),
        &payload,
    );
    assert!(line.ends_with("}\n"));
    assert!(serde_json::from_str::<serde_json::Value>(line.trim_end()).is_ok());
});
