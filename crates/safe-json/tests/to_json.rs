// crates/safe-json/tests/to_json.rs

use safe_json::{Array, Object, Primitive, Serializer, TypedArray, Value, to_json};
use serde_json::json;

fn zero_buffer_text() -> String {
    let zeros = vec!["00"; 50].join(" ");
    format!("<Buffer {zeros} ... 950 more bytes>")
}

#[test]
fn primitives() {
    assert_eq!(to_json(&Value::Undefined), None);
    assert_eq!(to_json(&Value::from(true)).as_deref(), Some("true"));
    assert_eq!(to_json(&Value::from(false)).as_deref(), Some("false"));
    assert_eq!(to_json(&Value::from(f64::NAN)).as_deref(), Some("null"));
    assert_eq!(to_json(&Value::from(f64::INFINITY)).as_deref(), Some("null"));
    assert_eq!(to_json(&Value::Null).as_deref(), Some("null"));
    assert_eq!(to_json(&Value::from(1)).as_deref(), Some("1"));
    assert_eq!(to_json(&Value::from(1e10)).as_deref(), Some("10000000000"));
    assert_eq!(to_json(&Value::symbol("hi")).as_deref(), Some(r#""Symbol(hi)""#));
    assert_eq!(to_json(&Value::Symbol(None)).as_deref(), Some(r#""Symbol()""#));
    assert_eq!(
        to_json(&Value::from(r#"say "hello"."#)).as_deref(),
        Some(r#""say \"hello\".""#)
    );
}

#[test]
fn buffers_are_bounded() {
    let buf = Value::buffer(vec![0u8; 1000]);
    assert_eq!(to_json(&buf), Some(format!("\"{}\"", zero_buffer_text())));

    let nested: Object = [("two", buf)].into_iter().collect();
    let outer: Object = [("one", nested)].into_iter().collect();
    assert_eq!(
        to_json(&Value::Object(outer)),
        Some(format!(r#"{{"one":{{"two":"{}"}}}}"#, zero_buffer_text()))
    );
}

#[test]
fn typed_arrays_are_bounded() {
    let arr = Value::from(TypedArray::Int8(vec![0; 1000]));
    assert_eq!(
        to_json(&arr).as_deref(),
        Some(r#""Int8Array [ 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, ... 990 more items ]""#)
    );
    let rendered = to_json(&Value::from(TypedArray::Float64(vec![1.0; 100_000]))).unwrap();
    assert!(rendered.len() < 200, "{rendered}");
}

#[test]
fn dates() {
    assert_eq!(
        to_json(&Value::date_from_millis(1_514_160_000_000)).as_deref(),
        Some(r#""2017-12-25T00:00:00.000Z""#)
    );
    assert_eq!(to_json(&Value::invalid_date()).as_deref(), Some("null"));
}

#[test]
fn dates_beyond_four_digit_years() {
    assert_eq!(
        to_json(&Value::date_from_millis(253_402_300_800_000)).as_deref(),
        Some(r#""+010000-01-01T00:00:00.000Z""#)
    );
    assert_eq!(
        to_json(&Value::date_from_millis(8_640_000_000_000_000)).as_deref(),
        Some(r#""+275760-09-13T00:00:00.000Z""#)
    );
    assert_eq!(
        to_json(&Value::date_from_millis(-8_640_000_000_000_000)).as_deref(),
        Some(r#""-271821-04-20T00:00:00.000Z""#)
    );
    assert_eq!(
        to_json(&Value::date_from_millis(-62_198_755_200_000)).as_deref(),
        Some(r#""-000001-01-01T00:00:00.000Z""#)
    );
    assert_eq!(
        to_json(&Value::date_from_millis(-62_167_219_200_000)).as_deref(),
        Some(r#""0000-01-01T00:00:00.000Z""#)
    );
    assert_eq!(
        to_json(&Value::date_from_millis(8_640_000_000_000_001)).as_deref(),
        Some("null")
    );
}

#[test]
fn functions() {
    assert_eq!(to_json(&Value::anonymous_function()).as_deref(), Some(r#""[Function]""#));
    assert_eq!(to_json(&Value::function("hi")).as_deref(), Some(r#""[Function: hi]""#));
    assert_eq!(
        to_json(&Value::function("toJson")).as_deref(),
        Some(r#""[Function: toJson]""#)
    );
}

#[test]
fn long_strings_are_capped() {
    let long = "l".repeat(1_000_000);
    assert_eq!(to_json(&Value::from(long.as_str())), Some(format!("\"{}...\"", &long[..1000])));

    let exact = "l".repeat(1000);
    assert_eq!(to_json(&Value::from(exact.as_str())), Some(format!("\"{exact}\"")));

    let uncapped = Serializer::new().max_string_len(None);
    assert_eq!(uncapped.to_json(&Value::from(long.as_str())).map(|s| s.len()), Some(1_000_002));
}

#[test]
fn objects_drop_undefined_keys() {
    let obj = Object::new();
    obj.insert("a", 1);
    obj.insert("gone", Value::Undefined);
    obj.insert("b", Value::Null);
    assert_eq!(to_json(&Value::Object(obj)).as_deref(), Some(r#"{"a":1,"b":null}"#));
}

#[test]
fn arrays_keep_positions() {
    let arr: Array = [Value::from(1), Value::Undefined, Value::anonymous_function()]
        .into_iter()
        .collect();
    assert_eq!(to_json(&Value::Array(arr)).as_deref(), Some(r#"[1,null,"[Function]"]"#));
}

#[test]
fn wrapped_primitives_render_as_objects() {
    let s = Value::wrapped(Primitive::String("hi".into()));
    assert_eq!(to_json(&s).as_deref(), Some(r#"{"0":"h","1":"i"}"#));
    let n = Value::wrapped(Primitive::Number(5.0));
    assert_eq!(to_json(&n).as_deref(), Some("{}"));
    let b = Value::wrapped(Primitive::Bool(true));
    assert_eq!(to_json(&b).as_deref(), Some("{}"));
}

#[test]
fn json_input_round_trips_in_order() {
    let value = Value::from(json!({"z": [1, "two", {"three": null}], "a": false}));
    assert_eq!(
        to_json(&value).as_deref(),
        Some(r#"{"z":[1,"two",{"three":null}],"a":false}"#)
    );
}

#[test]
fn serialize_bridge() {
    #[derive(serde::Serialize)]
    struct Point {
        x: i32,
        label: &'static str,
    }
    let value = Value::from_serialize(&Point { x: 3, label: "p" });
    assert_eq!(to_json(&value).as_deref(), Some(r#"{"x":3,"label":"p"}"#));
}
