// tests/stock.rs
use regex::Regex;
use serde_json::json;

#[test]
fn stock_logger_uses_iso_time() {
    let vars = [
        "JSONLOG_TIME",
        "JSONLOG_STDERR",
        "JSONLOG_MAX_STRING",
        "JSONLOG_CYCLES",
        "JSONLOG_FILE",
    ];
    let out = temp_env::with_vars_unset(vars, || {
        jsonlog::log().info("hi", jsonlog::Value::from(json!({"one": 2})))
    });
    let iso = Regex::new(r#""[0-9-]+T[0-9:.]+Z""#).unwrap();
    assert_eq!(
        iso.replace(&out, "[ISO-TIME]"),
        "{\"level\":3,\"time\":[ISO-TIME],\"one\":2,\"msg\":\"hi\"}\n"
    );
    assert!(std::ptr::eq(jsonlog::log(), jsonlog::log()));
}
