// crates/safe-json/tests/errors.rs

use safe_json::{ErrorObject, Object, Value, to_json};
use serde_json::json;

#[test]
fn error_with_self_reference() {
    let err = ErrorObject::new("oops");
    let other = Object::new();
    other.insert("hi", err.clone());
    err.set_property("otherThing", other);

    let text = to_json(&Value::Error(err)).expect("errors always render");
    let mut parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
    let stack = parsed["stack"].as_str().unwrap().to_owned();
    assert!(!stack.is_empty());
    parsed.as_object_mut().unwrap().remove("stack");
    assert_eq!(
        parsed,
        json!({"name": "Error", "message": "oops", "otherThing": {"hi": "[Dupl]"}})
    );
}

#[test]
fn forced_fields_follow_own_properties() {
    let err = ErrorObject::named("TypeError", "wat");
    err.set_stack(None);
    err.set_property("code", "E_WAT");
    assert_eq!(
        to_json(&Value::Error(err)).as_deref(),
        Some(r#"{"code":"E_WAT","name":"TypeError","message":"wat"}"#)
    );
}

#[test]
fn forced_fields_overwrite_in_place() {
    let err = ErrorObject::new("real");
    err.set_stack(Some("trace".into()));
    err.set_property("message", "shadowed");
    err.set_property("extra", 1);
    assert_eq!(
        to_json(&Value::Error(err)).as_deref(),
        Some(r#"{"message":"real","extra":1,"name":"Error","stack":"trace"}"#)
    );
}

#[test]
fn std_errors_keep_their_chain() {
    #[derive(Debug)]
    struct Outer(std::io::Error);

    impl std::fmt::Display for Outer {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("request failed")
        }
    }

    impl std::error::Error for Outer {
        fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
            Some(&self.0)
        }
    }

    let err = ErrorObject::from_std(&Outer(std::io::Error::other("reset")));
    let text = to_json(&Value::Error(err)).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed["name"], "Outer");
    assert_eq!(parsed["message"], "request failed");
    assert_eq!(parsed["cause"]["message"], "reset");
    assert_eq!(parsed["cause"]["name"], "Error");
}
