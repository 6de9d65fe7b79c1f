// crates/safe-json/src/http.rs

//! Host views over the `http` crate's request and response types.
//!
//! A request's peer is read from a [`SocketAddr`] stored in its extensions,
//! which is where most servers built on `hyper` put it.

use crate::host::{HostObject, HostView, headers_value};
use crate::value::Value;
use ::http::{HeaderMap, Request, Response};
use std::fmt::Write;
use std::net::SocketAddr;

/// The loggable parts of an [`http::Request`].
#[derive(Clone, Debug)]
pub struct HttpRequest {
    url: String,
    method: String,
    headers: Vec<(String, String)>,
    remote: Option<SocketAddr>,
}

impl<B> From<&Request<B>> for HttpRequest {
    fn from(req: &Request<B>) -> Self {
        let url = req
            .uri()
            .path_and_query()
            .map_or_else(|| req.uri().path().to_owned(), |p| p.as_str().to_owned());
        Self {
            url,
            method: req.method().as_str().to_owned(),
            headers: header_pairs(req.headers()),
            remote: req.extensions().get::<SocketAddr>().copied(),
        }
    }
}

impl HostObject for HttpRequest {
    fn class_name(&self) -> &str {
        "IncomingMessage"
    }

    fn view(&self) -> HostView {
        HostView::Request {
            url: self.url.clone(),
            method: self.method.clone(),
            headers: headers_value(self.headers.iter().map(|(k, v)| (k.as_str(), v.as_str()))),
            remote_address: self.remote.map(|addr| addr.ip().to_string()),
            remote_port: self.remote.map(|addr| addr.port()),
        }
    }
}

/// The loggable parts of an [`http::Response`]: the status and the rendered
/// status line plus header block.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    status: u16,
    header: String,
}

impl<B> From<&Response<B>> for HttpResponse {
    fn from(res: &Response<B>) -> Self {
        let status = res.status();
        let mut header = format!(
            "{:?} {} {}\r\n",
            res.version(),
            status.as_u16(),
            status.canonical_reason().unwrap_or_default()
        );
        for (name, value) in header_pairs(res.headers()) {
            let _ = write!(header, "{name}: {value}\r\n");
        }
        header.push_str("\r\n");
        Self {
            status: status.as_u16(),
            header,
        }
    }
}

impl HostObject for HttpResponse {
    fn class_name(&self) -> &str {
        "ServerResponse"
    }

    fn view(&self) -> HostView {
        HostView::Response {
            status_code: self.status,
            header: Some(self.header.clone()),
        }
    }
}

fn header_pairs(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_owned(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect()
}

impl<B> From<&Request<B>> for Value {
    fn from(req: &Request<B>) -> Self {
        Value::host(HttpRequest::from(req))
    }
}

impl<B> From<&Response<B>> for Value {
    fn from(res: &Response<B>) -> Self {
        Value::host(HttpResponse::from(res))
    }
}
