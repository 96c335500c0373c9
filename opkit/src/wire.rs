//! Wire-level request and response values.
//!
//! These are built fresh for every call and never retained by the engine.

use bytes::Bytes;
use serde_json::Value;
use url::Url;

use crate::method::RestMethod;

/// A fully routed HTTP request, ready for a [`Transport`](crate::Transport).
#[derive(Debug, Clone, PartialEq)]
pub struct WireRequest {
    /// HTTP method.
    pub method: RestMethod,
    /// Absolute URL with path parameters substituted and query encoded.
    pub url: Url,
    /// Additional headers, such as `Authorization`.
    pub headers: Vec<(String, String)>,
    /// JSON body for non-GET requests that carry fields.
    pub body: Option<Value>,
}

impl WireRequest {
    /// Returns the value of a header, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// A raw HTTP response as handed back by a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body, possibly empty.
    pub body: Bytes,
}

impl WireResponse {
    /// Creates a response from a status and body.
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Creates a response with a JSON body.
    pub fn json(status: u16, body: &Value) -> Self {
        Self::new(status, body.to_string())
    }

    /// Creates a response with no body.
    pub fn empty(status: u16) -> Self {
        Self::new(status, Bytes::new())
    }

    /// Returns `true` for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Returns the body, or `None` when it is empty or only whitespace.
    pub fn payload(&self) -> Option<&[u8]> {
        if self.body.iter().all(u8::is_ascii_whitespace) {
            None
        } else {
            Some(self.body.as_ref())
        }
    }

    /// Returns the body as lossy UTF-8 text.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}
