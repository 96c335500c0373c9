//! Request building.
//!
//! [`build_request`] turns a descriptor and a validated input record into a
//! [`WireRequest`]. It is pure: the same descriptor and input always give
//! the same request.
//!
//! Field placement rules:
//! - Path parameters are percent-encoded into exactly one segment each and
//!   appear nowhere else.
//! - Top-level `null` fields are treated as unset and never emitted.
//! - GET sends the remaining fields as query parameters. Arrays are
//!   comma-joined, so an empty array still appears as `key=`.
//! - Every other verb sends the remaining fields as a JSON object body, or
//!   no body at all when nothing remains.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde_json::{Map, Value};
use url::Url;

use crate::descriptor::{OperationDescriptor, PathParams};
use crate::error::ConfigError;
use crate::method::FieldPlacement;
use crate::response::ResponseFormat;
use crate::wire::WireRequest;

/// Everything but RFC 3986 unreserved characters is escaped in path values.
const PATH_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Builds the wire request for one call.
///
/// `fields` must already have passed [`OperationDescriptor::validate`].
/// The descriptor's path is appended to `base_url`'s own path, so a base of
/// `https://api.example.com/v1` and a template of `/things/{id}` yield
/// `https://api.example.com/v1/things/<id>`.
///
/// ## Errors
///
/// Returns a [`ConfigError`] if a path parameter is missing, is not a
/// scalar, or is the dot segment `.` or `..`, or if `base_url` cannot
/// carry a path.
pub fn build_request<I, F: ResponseFormat, E>(
    descriptor: &OperationDescriptor<I, F, E>,
    base_url: &Url,
    fields: &Map<String, Value>,
) -> Result<WireRequest, ConfigError> {
    let invalid = |param: &String, reason: &'static str| ConfigError::InvalidPathParam {
        operation: descriptor.operation_id().clone(),
        param: param.clone(),
        reason,
    };

    let mut params = PathParams::new();
    for name in descriptor.path_params() {
        let value = match fields.get(name) {
            None | Some(Value::Null) => {
                return Err(ConfigError::MissingPathParam {
                    operation: descriptor.operation_id().clone(),
                    param: name.clone(),
                })
            }
            Some(value) => render_scalar(value)
                .ok_or_else(|| invalid(name, "must be a string, number or boolean"))?,
        };
        // URL normalization collapses `.` and `..`.
        if value == "." || value == ".." {
            return Err(invalid(name, "dot segments are not routable"));
        }
        params.insert(name.clone(), utf8_percent_encode(&value, PATH_VALUE).to_string());
    }

    if base_url.cannot_be_a_base() {
        return Err(ConfigError::CannotBeABase {
            url: base_url.to_string(),
        });
    }
    let mut path = base_url.path().trim_end_matches('/').to_string();
    for segment in descriptor.path().segments(&params) {
        path.push('/');
        path.push_str(&segment);
    }
    let mut url = base_url.clone();
    url.set_path(&path);

    let remaining: Map<String, Value> = fields
        .iter()
        .filter(|(key, value)| !value.is_null() && !descriptor.is_path_param(key))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    let body = match descriptor.method().field_placement() {
        FieldPlacement::Query => {
            if !remaining.is_empty() {
                let mut query = url.query_pairs_mut();
                for (key, value) in &remaining {
                    query.append_pair(key, &render_query_value(value));
                }
            }
            None
        }
        FieldPlacement::Body if remaining.is_empty() => None,
        FieldPlacement::Body => Some(Value::Object(remaining)),
    };

    Ok(WireRequest {
        method: descriptor.method(),
        url,
        headers: Vec::new(),
        body,
    })
}

/// Renders a scalar for use in a path segment.
fn render_scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Renders a query value: scalars as text, arrays comma-joined, objects as JSON.
fn render_query_value(value: &Value) -> String {
    match value {
        Value::Array(items) => items
            .iter()
            .map(|item| render_scalar(item).unwrap_or_else(|| item.to_string()))
            .collect::<Vec<_>>()
            .join(","),
        other => render_scalar(other).unwrap_or_else(|| other.to_string()),
    }
}
