// crates/safe-json/src/value.rs

use crate::host::HostObject;
use indexmap::IndexMap;
use serde::Serialize;
use std::backtrace::{Backtrace, BacktraceStatus};
use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;
use time::OffsetDateTime;

/// Widest distance from the epoch a date may have, in milliseconds (100 million days).
pub const MAX_DATE_MILLIS: u64 = 8_640_000_000_000_000;

/// A dynamically typed runtime value that can be handed to the serializer.
///
/// Reference kinds ([`Object`], [`Array`], [`ErrorObject`], [`Wrapped`] and
/// [`Host`]) are shared handles: cloning one clones the handle, not the
/// contents, so a graph may contain the same node several times or refer
/// back to itself. Everything else is a plain value.
#[derive(Clone, Debug, Default)]
pub enum Value {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    /// A symbol with its optional description.
    Symbol(Option<String>),
    /// A function with its optional name.
    Function(Option<String>),
    /// A date; `None` is an invalid date.
    Date(Option<OffsetDateTime>),
    Buffer(Vec<u8>),
    TypedArray(TypedArray),
    Error(ErrorObject),
    Object(Object),
    Array(Array),
    Wrapped(Wrapped),
    Host(Host),
}

impl Value {
    pub fn buffer(bytes: impl Into<Vec<u8>>) -> Self {
        Value::Buffer(bytes.into())
    }

    pub fn symbol(description: impl Into<String>) -> Self {
        Value::Symbol(Some(description.into()))
    }

    /// A named function. An empty name is treated as anonymous.
    pub fn function(name: impl Into<String>) -> Self {
        let name = name.into();
        Value::Function((!name.is_empty()).then_some(name))
    }

    pub fn anonymous_function() -> Self {
        Value::Function(None)
    }

    /// A date at `millis` milliseconds since the Unix epoch.
    ///
    /// Anything further than [`MAX_DATE_MILLIS`] from the epoch is an
    /// invalid date.
    pub fn date_from_millis(millis: i64) -> Self {
        if millis.unsigned_abs() > MAX_DATE_MILLIS {
            return Value::Date(None);
        }
        let nanos = i128::from(millis) * 1_000_000;
        Value::Date(OffsetDateTime::from_unix_timestamp_nanos(nanos).ok())
    }

    pub fn invalid_date() -> Self {
        Value::Date(None)
    }

    pub fn host<H: HostObject + 'static>(object: H) -> Self {
        Value::Host(Host::new(object))
    }

    pub fn wrapped(primitive: Primitive) -> Self {
        Value::Wrapped(Wrapped::new(primitive))
    }

    /// Converts any [`Serialize`] value through its `serde_json` form.
    ///
    /// A value that fails to serialize becomes an error value describing the
    /// failure rather than being dropped.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Self {
        match serde_json::to_value(value) {
            Ok(json) => Value::from(json),
            Err(err) => Value::Error(ErrorObject::named("SerializeError", err.to_string())),
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

/// An ordered string-keyed mapping shared by reference.
///
/// Re-inserting an existing key keeps its original position. A cycle built
/// out of these handles is never freed.
#[derive(Clone, Default)]
pub struct Object(Rc<RefCell<IndexMap<String, Value>>>);

impl Object {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<K: Into<String>, V: Into<Value>>(&self, key: K, value: V) -> Option<Value> {
        let (key, value) = (key.into(), value.into());
        self.0.borrow_mut().insert(key, value)
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.0.borrow().get(key).cloned()
    }

    pub fn remove(&self, key: &str) -> Option<Value> {
        self.0.borrow_mut().shift_remove(key)
    }

    pub fn keys(&self) -> Vec<String> {
        self.0.borrow().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn ptr_eq(&self, other: &Object) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn identity(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }

    pub(crate) fn entries(&self) -> Ref<'_, IndexMap<String, Value>> {
        self.0.borrow()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Object {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let map = iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self(Rc::new(RefCell::new(map)))
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_borrow() {
            Ok(map) => f.debug_set().entries(map.keys()).finish(),
            Err(_) => f.write_str("Object(<borrowed>)"),
        }
    }
}

/// An ordered sequence shared by reference.
#[derive(Clone, Default)]
pub struct Array(Rc<RefCell<Vec<Value>>>);

impl Array {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push<V: Into<Value>>(&self, value: V) {
        let value = value.into();
        self.0.borrow_mut().push(value);
    }

    /// Stores `value` at `index`, padding any gap with `Undefined`.
    pub fn set<V: Into<Value>>(&self, index: usize, value: V) {
        let value = value.into();
        let mut items = self.0.borrow_mut();
        if index >= items.len() {
            items.resize(index + 1, Value::Undefined);
        }
        items[index] = value;
    }

    pub fn get(&self, index: usize) -> Option<Value> {
        self.0.borrow().get(index).cloned()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn ptr_eq(&self, other: &Array) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn identity(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }

    pub(crate) fn items(&self) -> Ref<'_, Vec<Value>> {
        self.0.borrow()
    }
}

impl<V: Into<Value>> FromIterator<V> for Array {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        let items = iter.into_iter().map(Into::into).collect();
        Self(Rc::new(RefCell::new(items)))
    }
}

impl fmt::Debug for Array {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_borrow() {
            Ok(items) => write!(f, "Array(len={})", items.len()),
            Err(_) => f.write_str("Array(<borrowed>)"),
        }
    }
}

pub(crate) struct ErrorData {
    pub(crate) name: String,
    pub(crate) message: String,
    pub(crate) stack: Option<String>,
    pub(crate) props: IndexMap<String, Value>,
}

/// An error value: a name, a message, an optional stack trace and any number
/// of extra enumerable properties.
#[derive(Clone)]
pub struct ErrorObject(Rc<RefCell<ErrorData>>);

impl ErrorObject {
    pub fn new(message: impl Into<String>) -> Self {
        Self::named("Error", message)
    }

    /// Creates an error with the given name. The stack starts with
    /// `name: message` and carries a backtrace when one is being captured.
    pub fn named(name: impl Into<String>, message: impl Into<String>) -> Self {
        let (name, message) = (name.into(), message.into());
        let stack = Some(capture_stack(&name, &message));
        Self(Rc::new(RefCell::new(ErrorData {
            name,
            message,
            stack,
            props: IndexMap::new(),
        })))
    }

    /// Converts a Rust error, following its `source()` chain into nested
    /// `cause` properties.
    pub fn from_std<E: std::error::Error + ?Sized>(err: &E) -> Self {
        let out = Self::named(short_type_name::<E>(), err.to_string());
        if let Some(source) = err.source() {
            out.set_property("cause", Self::from_std(source));
        }
        out
    }

    pub fn name(&self) -> String {
        self.0.borrow().name.clone()
    }

    pub fn message(&self) -> String {
        self.0.borrow().message.clone()
    }

    pub fn stack(&self) -> Option<String> {
        self.0.borrow().stack.clone()
    }

    pub fn set_stack(&self, stack: Option<String>) {
        self.0.borrow_mut().stack = stack;
    }

    pub fn set_property<K: Into<String>, V: Into<Value>>(&self, key: K, value: V) -> Option<Value> {
        let (key, value) = (key.into(), value.into());
        self.0.borrow_mut().props.insert(key, value)
    }

    pub fn property(&self, key: &str) -> Option<Value> {
        self.0.borrow().props.get(key).cloned()
    }

    pub(crate) fn identity(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }

    pub(crate) fn data(&self) -> Ref<'_, ErrorData> {
        self.0.borrow()
    }
}

impl fmt::Debug for ErrorObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_borrow() {
            Ok(data) => f
                .debug_struct("ErrorObject")
                .field("name", &data.name)
                .field("message", &data.message)
                .finish_non_exhaustive(),
            Err(_) => f.write_str("ErrorObject(<borrowed>)"),
        }
    }
}

fn capture_stack(name: &str, message: &str) -> String {
    let header = if message.is_empty() {
        name.to_owned()
    } else {
        format!("{name}: {message}")
    };
    let trace = Backtrace::capture();
    match trace.status() {
        BacktraceStatus::Captured => format!("{header}\n{trace}"),
        _ => header,
    }
}

fn short_type_name<E: ?Sized>() -> &'static str {
    let full = std::any::type_name::<E>();
    if full.starts_with("dyn ") {
        return "Error";
    }
    let path = full.split('<').next().unwrap_or(full);
    path.rsplit("::").next().unwrap_or(path)
}

/// The primitive held by a [`Wrapped`] object.
#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    Bool(bool),
    Number(f64),
    String(String),
}

/// A primitive boxed into an object with its own identity.
#[derive(Clone, Debug)]
pub struct Wrapped(Rc<Primitive>);

impl Wrapped {
    pub fn new(primitive: Primitive) -> Self {
        Self(Rc::new(primitive))
    }

    pub fn primitive(&self) -> &Primitive {
        &self.0
    }

    pub(crate) fn identity(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }
}

/// A handle to a host object such as a network request.
#[derive(Clone)]
pub struct Host(Rc<dyn HostObject>);

impl Host {
    pub fn new<H: HostObject + 'static>(object: H) -> Self {
        Self(Rc::new(object))
    }

    pub fn object(&self) -> &dyn HostObject {
        self.0.as_ref()
    }

    pub(crate) fn identity(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }
}

impl fmt::Debug for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Host").field(&self.0.class_name()).finish()
    }
}

/// A fixed-width numeric array.
#[derive(Clone, Debug, PartialEq)]
pub enum TypedArray {
    Int8(Vec<i8>),
    Uint8(Vec<u8>),
    Uint8Clamped(Vec<u8>),
    Int16(Vec<i16>),
    Uint16(Vec<u16>),
    Int32(Vec<i32>),
    Uint32(Vec<u32>),
    Float32(Vec<f32>),
    Float64(Vec<f64>),
    BigInt64(Vec<i64>),
    BigUint64(Vec<u64>),
}

impl TypedArray {
    pub const fn class_name(&self) -> &'static str {
        match self {
            TypedArray::Int8(_) => "Int8Array",
            TypedArray::Uint8(_) => "Uint8Array",
            TypedArray::Uint8Clamped(_) => "Uint8ClampedArray",
            TypedArray::Int16(_) => "Int16Array",
            TypedArray::Uint16(_) => "Uint16Array",
            TypedArray::Int32(_) => "Int32Array",
            TypedArray::Uint32(_) => "Uint32Array",
            TypedArray::Float32(_) => "Float32Array",
            TypedArray::Float64(_) => "Float64Array",
            TypedArray::BigInt64(_) => "BigInt64Array",
            TypedArray::BigUint64(_) => "BigUint64Array",
        }
    }

    pub fn len(&self) -> usize {
        match self {
            TypedArray::Int8(v) => v.len(),
            TypedArray::Uint8(v) | TypedArray::Uint8Clamped(v) => v.len(),
            TypedArray::Int16(v) => v.len(),
            TypedArray::Uint16(v) => v.len(),
            TypedArray::Int32(v) => v.len(),
            TypedArray::Uint32(v) => v.len(),
            TypedArray::Float32(v) => v.len(),
            TypedArray::Float64(v) => v.len(),
            TypedArray::BigInt64(v) => v.len(),
            TypedArray::BigUint64(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

macro_rules! from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(n: $ty) -> Self {
                    Value::Number(n as f64)
                }
            }
        )*
    };
}

from_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::String(s.clone())
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Undefined
    }
}

impl From<&Value> for Value {
    fn from(value: &Value) -> Self {
        value.clone()
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Array(items.into_iter().collect())
    }
}

impl From<OffsetDateTime> for Value {
    fn from(date: OffsetDateTime) -> Self {
        Value::Date(Some(date))
    }
}

impl From<Object> for Value {
    fn from(object: Object) -> Self {
        Value::Object(object)
    }
}

impl From<Array> for Value {
    fn from(array: Array) -> Self {
        Value::Array(array)
    }
}

impl From<ErrorObject> for Value {
    fn from(err: ErrorObject) -> Self {
        Value::Error(err)
    }
}

impl From<TypedArray> for Value {
    fn from(array: TypedArray) -> Self {
        Value::TypedArray(array)
    }
}

impl From<Wrapped> for Value {
    fn from(wrapped: Wrapped) -> Self {
        Value::Wrapped(wrapped)
    }
}

impl From<Host> for Value {
    fn from(host: Host) -> Self {
        Value::Host(host)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        use serde_json::Value as Json;
        match json {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Bool(b),
            Json::Number(n) => n.as_f64().map_or(Value::Null, Value::Number),
            Json::String(s) => Value::String(s),
            Json::Array(items) => Value::Array(items.into_iter().collect()),
            Json::Object(map) => Value::Object(map.into_iter().collect()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_reinsert_keeps_position() {
        let obj: Object = [("a", 1), ("b", 2)].into_iter().collect();
        obj.insert("a", 3);
        assert_eq!(obj.keys(), vec!["a", "b"]);
        obj.remove("a");
        obj.insert("a", 4);
        assert_eq!(obj.keys(), vec!["b", "a"]);
    }

    #[test]
    fn clones_share_identity() {
        let obj = Object::new();
        let other = obj.clone();
        other.insert("k", true);
        assert!(obj.ptr_eq(&other));
        assert_eq!(obj.len(), 1);
        assert!(!obj.ptr_eq(&Object::new()));
    }

    #[test]
    fn array_set_pads_with_undefined() {
        let arr = Array::new();
        arr.set(2, "x");
        assert_eq!(arr.len(), 3);
        assert!(arr.get(0).is_some_and(|v| v.is_undefined()));
    }

    #[test]
    fn error_stack_starts_with_header() {
        let err = ErrorObject::named("TypeError", "wat");
        assert!(err.stack().is_some_and(|s| s.starts_with("TypeError: wat")));
        err.set_stack(None);
        assert_eq!(err.stack(), None);
    }

    #[test]
    fn std_error_chain_becomes_cause() {
        let inner = std::io::Error::other("disk full");
        let err = ErrorObject::from_std(&inner);
        assert_eq!(err.name(), "Error");
        assert_eq!(err.message(), "disk full");
    }

    #[test]
    fn empty_function_name_is_anonymous() {
        assert!(matches!(Value::function(""), Value::Function(None)));
        assert!(matches!(Value::function("hi"), Value::Function(Some(_))));
    }

    #[test]
    fn json_numbers_become_f64() {
        let v = Value::from(serde_json::json!({"n": 5, "s": "x"}));
        let Value::Object(obj) = v else {
            panic!("expected object");
        };
        assert!(matches!(obj.get("n"), Some(Value::Number(n)) if n == 5.0));
        assert_eq!(obj.keys(), vec!["n", "s"]);
    }
}
