//! Response dispatching.
//!
//! [`dispatch`] maps a raw [`WireResponse`] to the operation's success value,
//! one of its declared errors, or a defect. It never guesses: a failure is
//! only ever turned into a declared error whose code matches exactly.

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::descriptor::OperationDescriptor;
use crate::error::{DispatchError, OperationError};
use crate::response::ResponseFormat;
use crate::wire::WireResponse;

/// Body fields that carry the upstream error code, in lookup order.
pub const ERROR_CODE_FIELDS: [&str; 2] = ["code", "error_code"];

/// Returns the conventional error code for a failure status.
///
/// Only consulted when the body itself names no code, which the upstream
/// service does for some verbs (empty or literal `null` bodies).
pub fn status_error_code(status: u16) -> Option<&'static str> {
    let code = match status {
        400 => "bad_request",
        401 => "unauthorized",
        403 => "forbidden",
        404 => "not_found",
        409 => "conflict",
        422 => "unprocessable_entity",
        429 => "too_many_requests",
        500 => "internal_server_error",
        503 => "service_unavailable",
        _ => return None,
    };
    Some(code)
}

/// Extracts the upstream error code from a decoded failure body.
pub fn extract_error_code(body: &Value) -> Option<&str> {
    let fields = body.as_object()?;
    ERROR_CODE_FIELDS
        .iter()
        .find_map(|field| {
            fields
                .get(*field)
                .and_then(Value::as_str)
                .filter(|code| !code.is_empty())
        })
}

/// Maps a wire response to the operation's result.
///
/// `fields` is the validated input record of the call. For a declared
/// error, every non-null input field is copied into the error payload and
/// takes precedence over anything the body says, so the echoed request
/// context is authoritative.
///
/// ## Errors
///
/// - [`OperationError::Declared`] when the failure's code is declared.
/// - [`OperationError::Defect`] with a `ValidationError` when a 2xx body
///   does not fit the output shape.
/// - [`OperationError::Defect`] with a [`DispatchError`] when the code is
///   undeclared or the matched error payload cannot be decoded.
pub fn dispatch<I, F: ResponseFormat, E>(
    descriptor: &OperationDescriptor<I, F, E>,
    fields: &Map<String, Value>,
    response: &WireResponse,
) -> Result<F::Output, OperationError<E>> {
    let payload = response.payload();

    if response.is_success() {
        return F::parse(payload).map_err(OperationError::from);
    }

    let body: Option<Value> = payload.and_then(|bytes| serde_json::from_slice(bytes).ok());
    let code = body
        .as_ref()
        .and_then(extract_error_code)
        .or_else(|| status_error_code(response.status))
        .map(str::to_string);

    let Some(shape) = code.as_deref().and_then(|code| descriptor.find_error(code)) else {
        warn!(
            operation = descriptor.id(),
            status = response.status,
            code = code.as_deref().unwrap_or("<none>"),
            "failure response matches no declared error"
        );
        return Err(DispatchError::UndeclaredCode {
            operation: descriptor.operation_id().clone(),
            status: response.status,
            code,
            body: response.text(),
        }
        .into());
    };

    let message = error_message(body.as_ref(), payload);
    let mut merged = match body {
        Some(Value::Object(map)) => map,
        _ => Map::new(),
    };
    merged.insert("message".to_string(), Value::String(message));
    for (key, value) in fields.iter().filter(|(_, value)| !value.is_null()) {
        merged.insert(key.clone(), value.clone());
    }

    match shape.decode(Value::Object(merged)) {
        Ok(declared) => {
            debug!(
                operation = descriptor.id(),
                status = response.status,
                code = shape.code(),
                "decoded declared error"
            );
            Err(OperationError::Declared(declared))
        }
        Err(source) => {
            warn!(
                operation = descriptor.id(),
                status = response.status,
                code = shape.code(),
                error = %source,
                "declared error payload does not fit its shape"
            );
            Err(DispatchError::MalformedError {
                operation: descriptor.operation_id().clone(),
                status: response.status,
                code: shape.code().to_string(),
                source,
            }
            .into())
        }
    }
}

/// Picks the upstream message: the body's `message`, a bare JSON string,
/// or the raw text of a non-JSON body. Defaults to an empty string.
fn error_message(body: Option<&Value>, payload: Option<&[u8]>) -> String {
    match body {
        Some(Value::Object(map)) => map
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        Some(Value::String(text)) => text.clone(),
        Some(_) => String::new(),
        None => payload
            .map(|bytes| String::from_utf8_lossy(bytes).trim().to_string())
            .unwrap_or_default(),
    }
}
