// crates/safe-json/src/host.rs

use crate::value::Value;

/// The whitelisted view of a host object.
///
/// Host objects such as live network requests own sockets and buffers that
/// must never be walked. The serializer only ever renders what the view
/// exposes.
#[derive(Clone, Debug)]
pub enum HostView {
    /// An incoming request: `{url, method, headers, remoteAddress, remotePort}`.
    Request {
        url: String,
        method: String,
        headers: Value,
        remote_address: Option<String>,
        remote_port: Option<u16>,
    },
    /// An outgoing response: `{statusCode, header}`.
    Response {
        status_code: u16,
        header: Option<String>,
    },
    /// Anything else, rendered as `"[<class> [object Object]]"`.
    Opaque,
}

/// Inspector for objects owned by a host environment.
pub trait HostObject {
    fn class_name(&self) -> &str;

    fn view(&self) -> HostView {
        HostView::Opaque
    }
}

/// A host object with nothing to expose beyond its class name, such as a
/// stream or an event emitter.
#[derive(Clone, Debug)]
pub struct OpaqueHost {
    class: String,
}

impl OpaqueHost {
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
        }
    }
}

impl HostObject for OpaqueHost {
    fn class_name(&self) -> &str {
        &self.class
    }
}

/// A request captured as plain data, for hosts without a typed request.
#[derive(Clone, Debug, Default)]
pub struct RequestInfo {
    pub url: String,
    pub method: String,
    pub headers: Vec<(String, String)>,
    pub remote_address: Option<String>,
    pub remote_port: Option<u16>,
}

impl HostObject for RequestInfo {
    fn class_name(&self) -> &str {
        "IncomingMessage"
    }

    fn view(&self) -> HostView {
        HostView::Request {
            url: self.url.clone(),
            method: self.method.clone(),
            headers: headers_value(self.headers.iter().map(|(k, v)| (k.as_str(), v.as_str()))),
            remote_address: self.remote_address.clone(),
            remote_port: self.remote_port,
        }
    }
}

/// A response captured as plain data.
#[derive(Clone, Debug, Default)]
pub struct ResponseInfo {
    pub status_code: u16,
    pub header: Option<String>,
}

impl HostObject for ResponseInfo {
    fn class_name(&self) -> &str {
        "ServerResponse"
    }

    fn view(&self) -> HostView {
        HostView::Response {
            status_code: self.status_code,
            header: self.header.clone(),
        }
    }
}

/// Folds header pairs into an object keyed by lowercase name.
///
/// Repeated headers are joined with `", "`, except `set-cookie`, which
/// collects into an array.
pub fn headers_value<'a, I>(headers: I) -> Value
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let out = crate::value::Object::new();
    for (name, value) in headers {
        let name = name.to_ascii_lowercase();
        let merged = match (name.as_str(), out.get(&name)) {
            ("set-cookie", Some(Value::Array(cookies))) => {
                cookies.push(value);
                continue;
            }
            ("set-cookie", _) => Value::from(vec![value]),
            (_, Some(Value::String(prev))) => Value::String(format!("{prev}, {value}")),
            _ => Value::from(value),
        };
        out.insert(name, merged);
    }
    Value::Object(out)
}
