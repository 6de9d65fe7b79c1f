// crates/safe-json/src/lib.rs

//! Total JSON serialization for arbitrary, possibly cyclic value graphs.
//!
//! [`Value`] models the kinds a log call may receive. [`Serializer`] turns
//! any of them into JSON text without failing: values with no JSON form are
//! omitted, exotic kinds render as bounded inspection strings, and repeated
//! identities render as a sentinel according to the [`CyclePolicy`].
//!
//! ```
//! use safe_json::{Object, Value, to_json};
//!
//! let obj = Object::new();
//! obj.insert("a", 1);
//! obj.insert("self", obj.clone());
//! assert_eq!(to_json(&Value::Object(obj)).as_deref(), Some(r#"{"a":1,"self":"[Dupl]"}"#));
//! ```

mod host;
#[cfg(feature = "http")]
pub mod http;
pub mod inspect;
mod pairs;
mod serialize;
mod value;

pub use host::{HostObject, HostView, OpaqueHost, RequestInfo, ResponseInfo, headers_value};
pub use serialize::{
    CIRCULAR_SENTINEL, CyclePolicy, DEFAULT_MAX_STRING_LEN, DUPLICATE_SENTINEL, Serializer,
    UnknownCyclePolicy,
};
pub use value::{
    Array, ErrorObject, Host, MAX_DATE_MILLIS, Object, Primitive, TypedArray, Value, Wrapped,
};

/// Serializes `value` with the default [`Serializer`].
pub fn to_json(value: &Value) -> Option<String> {
    Serializer::default().to_json(value)
}

/// Renders `value` as spliceable field pairs with the default [`Serializer`].
pub fn render_pairs(value: &Value) -> String {
    Serializer::default().render_pairs(value)
}
