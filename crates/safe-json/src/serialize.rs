// crates/safe-json/src/serialize.rs

use crate::host::HostView;
use crate::inspect;
use crate::value::{ErrorObject, Host, Object, Primitive, Value, Wrapped};
use serde_json::{Map, Number, Value as Json};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Default cap on rendered string length, in characters.
pub const DEFAULT_MAX_STRING_LEN: usize = 1000;
/// Placeholder for an identity already rendered earlier in the same call.
pub const DUPLICATE_SENTINEL: &str = "[Dupl]";
/// Placeholder for an identity that is its own ancestor.
pub const CIRCULAR_SENTINEL: &str = "[Circular]";

const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// How repeated object identities are detected within one serialization.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum CyclePolicy {
    /// Any identity seen earlier in the call renders as [`DUPLICATE_SENTINEL`],
    /// including shared references that do not form a cycle.
    #[default]
    Duplicates,
    /// Only identities on the current path from the root render, as
    /// [`CIRCULAR_SENTINEL`]. Shared acyclic references are rendered in full
    /// every time.
    Cycles,
}

impl CyclePolicy {
    pub const fn as_str(self) -> &'static str {
        match self {
            CyclePolicy::Duplicates => "duplicates",
            CyclePolicy::Cycles => "cycles",
        }
    }

    pub const fn sentinel(self) -> &'static str {
        match self {
            CyclePolicy::Duplicates => DUPLICATE_SENTINEL,
            CyclePolicy::Cycles => CIRCULAR_SENTINEL,
        }
    }
}

impl fmt::Display for CyclePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownCyclePolicy(pub String);

impl fmt::Display for UnknownCyclePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown cycle policy {:?}", self.0)
    }
}

impl std::error::Error for UnknownCyclePolicy {}

impl FromStr for CyclePolicy {
    type Err = UnknownCyclePolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "duplicates" | "dupl" => Ok(CyclePolicy::Duplicates),
            "cycles" | "circular" => Ok(CyclePolicy::Cycles),
            _ => Err(UnknownCyclePolicy(s.to_owned())),
        }
    }
}

/// Converts arbitrary [`Value`] graphs into JSON text.
///
/// Serialization is total: every value either renders or is omitted, cycles
/// are cut with a sentinel, and nothing panics. Each call starts with a fresh
/// seen-set, so no identity is remembered between calls.
#[derive(Clone, Debug)]
pub struct Serializer {
    max_string_len: Option<usize>,
    cycles: CyclePolicy,
}

impl Default for Serializer {
    fn default() -> Self {
        Self {
            max_string_len: Some(DEFAULT_MAX_STRING_LEN),
            cycles: CyclePolicy::default(),
        }
    }
}

impl Serializer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Caps string values at `max` characters, appending `...` when cut.
    /// `None` disables the cap.
    pub fn max_string_len(mut self, max: Option<usize>) -> Self {
        self.max_string_len = max;
        self
    }

    pub fn cycle_policy(mut self, policy: CyclePolicy) -> Self {
        self.cycles = policy;
        self
    }

    pub fn policy(&self) -> CyclePolicy {
        self.cycles
    }

    pub fn string_cap(&self) -> Option<usize> {
        self.max_string_len
    }

    /// Serializes `value` to JSON text, or `None` when it has no JSON form
    /// (`Undefined`).
    pub fn to_json(&self, value: &Value) -> Option<String> {
        let json = self.to_json_value(value)?;
        serde_json::to_string(&json).ok()
    }

    /// Converts `value` into a JSON tree without rendering it.
    pub fn to_json_value(&self, value: &Value) -> Option<Json> {
        Walk {
            ser: self,
            seen: HashSet::new(),
        }
        .value(value)
    }

    fn string(&self, s: &str) -> Json {
        let Some(max) = self.max_string_len else {
            return Json::String(s.to_owned());
        };
        match s.char_indices().nth(max) {
            Some((cut, _)) => {
                tracing::trace!(target: "safe_json", len = s.len(), max, "truncating string");
                let mut out = s[..cut].to_owned();
                out.push_str("...");
                Json::String(out)
            }
            None => Json::String(s.to_owned()),
        }
    }
}

struct Walk<'a> {
    ser: &'a Serializer,
    seen: HashSet<usize>,
}

impl Walk<'_> {
    fn value(&mut self, value: &Value) -> Option<Json> {
        match value {
            Value::Undefined => None,
            Value::Null => Some(Json::Null),
            Value::Bool(b) => Some(Json::Bool(*b)),
            Value::Number(n) => Some(number(*n)),
            Value::String(s) => Some(self.ser.string(s)),
            Value::Symbol(desc) => Some(Json::String(format!(
                "Symbol({})",
                desc.as_deref().unwrap_or_default()
            ))),
            Value::Function(Some(name)) => Some(Json::String(format!("[Function: {name}]"))),
            Value::Function(None) => Some(Json::String("[Function]".to_owned())),
            Value::Date(date) => Some(
                date.and_then(inspect::iso_millis)
                    .map_or(Json::Null, Json::String),
            ),
            Value::Buffer(bytes) => Some(Json::String(inspect::buffer(bytes))),
            Value::TypedArray(array) => Some(Json::String(inspect::typed_array(array))),
            Value::Error(err) => Some(self.enter(err.identity(), |w| w.error(err))),
            Value::Object(obj) => Some(self.enter(obj.identity(), |w| w.object(obj))),
            Value::Array(arr) => Some(self.enter(arr.identity(), |w| {
                let items = arr.items();
                Json::Array(
                    items
                        .iter()
                        .map(|item| w.value(item).unwrap_or(Json::Null))
                        .collect(),
                )
            })),
            Value::Wrapped(wrapped) => Some(self.enter(wrapped.identity(), |_| boxed(wrapped))),
            Value::Host(host) => Some(self.enter(host.identity(), |w| w.host(host))),
        }
    }

    /// Renders a reference kind unless its identity is already in the
    /// seen-set, in which case the policy's sentinel stands in for it.
    fn enter(&mut self, id: usize, render: impl FnOnce(&mut Self) -> Json) -> Json {
        if !self.seen.insert(id) {
            tracing::trace!(target: "safe_json", policy = %self.ser.cycles, "repeated identity");
            return Json::String(self.ser.cycles.sentinel().to_owned());
        }
        let out = render(self);
        if self.ser.cycles == CyclePolicy::Cycles {
            self.seen.remove(&id);
        }
        out
    }

    fn object(&mut self, obj: &Object) -> Json {
        let entries = obj.entries();
        let mut out = Map::new();
        for (key, value) in entries.iter() {
            if let Some(json) = self.value(value) {
                out.insert(key.clone(), json);
            }
        }
        Json::Object(out)
    }

    fn error(&mut self, err: &ErrorObject) -> Json {
        let data = err.data();
        let mut out = Map::new();
        for (key, value) in data.props.iter() {
            if let Some(json) = self.value(value) {
                out.insert(key.clone(), json);
            }
        }
        out.insert("name".to_owned(), Json::String(data.name.clone()));
        out.insert("message".to_owned(), Json::String(data.message.clone()));
        if let Some(stack) = &data.stack {
            out.insert("stack".to_owned(), Json::String(stack.clone()));
        }
        Json::Object(out)
    }

    fn host(&mut self, host: &Host) -> Json {
        let object = host.object();
        match object.view() {
            HostView::Request {
                url,
                method,
                headers,
                remote_address,
                remote_port,
            } => {
                let mut out = Map::new();
                out.insert("url".to_owned(), Json::String(url));
                out.insert("method".to_owned(), Json::String(method));
                if let Some(headers) = self.value(&headers) {
                    out.insert("headers".to_owned(), headers);
                }
                if let Some(addr) = remote_address {
                    out.insert("remoteAddress".to_owned(), Json::String(addr));
                }
                if let Some(port) = remote_port {
                    out.insert("remotePort".to_owned(), Json::from(port));
                }
                Json::Object(out)
            }
            HostView::Response {
                status_code,
                header,
            } => {
                let mut out = Map::new();
                out.insert("statusCode".to_owned(), Json::from(status_code));
                out.insert("header".to_owned(), header.map_or(Json::Null, Json::String));
                Json::Object(out)
            }
            HostView::Opaque => Json::String(format!("[{} [object Object]]", object.class_name())),
        }
    }
}

/// Boxed primitives render as objects over their own indexed characters.
fn boxed(wrapped: &Wrapped) -> Json {
    let mut out = Map::new();
    if let Primitive::String(s) = wrapped.primitive() {
        for (i, c) in s.chars().enumerate() {
            out.insert(i.to_string(), Json::String(c.to_string()));
        }
    }
    Json::Object(out)
}

fn number(n: f64) -> Json {
    if !n.is_finite() {
        return Json::Null;
    }
    if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        return Json::from(n as i64);
    }
    Number::from_f64(n).map_or(Json::Null, Json::Number)
}
