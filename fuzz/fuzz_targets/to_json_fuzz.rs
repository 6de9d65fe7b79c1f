// fuzz/fuzz_targets/to_json_fuzz.rs
#![no_main]
use libfuzzer_sys::fuzz_target;
use safe_json::{CyclePolicy, Serializer, Value};

fuzz_target!(|data: &[u8]| {
    let Ok(json) = serde_json::from_slice::<serde_json::Value>(data) else {
        return;
    };
    let root = Value::from(json);
    match &root {
        Value::Object(obj) => {
            obj.insert("self", root.clone());
        }
        Value::Array(arr) => arr.push(root.clone()),
        _ => {}
    }
    for policy in [CyclePolicy::Duplicates, CyclePolicy::Cycles] {
        let ser = Serializer::new().cycle_policy(policy);
        if let Some(text) = ser.to_json(&root) {
            assert!(serde_json::from_str::<serde_json::Value>(&text).is_ok());
        }
        let _ = ser.render_pairs(&root);
    }
});
