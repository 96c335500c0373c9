//! Descriptor and routing configuration errors.

use thiserror::Error;

use super::OperationIdError;
use crate::operation_id::OperationId;

/// Errors in descriptor definitions or request routing.
///
/// These always indicate programmer errors: descriptors are statically
/// known, so a bad template or a missing path value is a bug at the call
/// site, not an API-level condition.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// URL parsing failed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The base URL cannot carry path segments (e.g. `mailto:`).
    #[error("Base URL cannot be a base: {url}")]
    CannotBeABase {
        /// The offending base URL.
        url: String,
    },

    /// A required descriptor field is missing.
    #[error("Missing required field: {field}")]
    MissingField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// Operation ID validation failed.
    #[error("Invalid operation ID: {0}")]
    InvalidOperationId(#[from] OperationIdError),

    /// Path template contains invalid parameter syntax.
    #[error("Invalid path template: {message}")]
    InvalidPathTemplate {
        /// Description of the path template error.
        message: String,
    },

    /// Two declared errors on one descriptor share a code.
    #[error("Duplicate error code '{code}' on operation {operation}")]
    DuplicateErrorCode {
        /// The operation declaring the errors.
        operation: OperationId,
        /// The repeated error code.
        code: String,
    },

    /// A path placeholder had no value in the input.
    #[error("Missing path parameter '{param}' for operation {operation}")]
    MissingPathParam {
        /// The operation being routed.
        operation: OperationId,
        /// The placeholder lacking a value.
        param: String,
    },

    /// A transport default header has an invalid name or value.
    #[error("Invalid default header '{name}': {reason}")]
    InvalidHeader {
        /// The header name as given.
        name: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A path parameter value cannot be carried in a URL segment.
    #[error("Invalid path parameter '{param}' for operation {operation}: {reason}")]
    InvalidPathParam {
        /// The operation being routed.
        operation: OperationId,
        /// The offending parameter.
        param: String,
        /// Why the value was rejected.
        reason: &'static str,
    },
}

impl ConfigError {
    /// Creates a missing field error.
    pub fn missing_field(field: &'static str) -> Self {
        Self::MissingField { field }
    }

    /// Creates an invalid path template error.
    pub fn invalid_path(message: impl Into<String>) -> Self {
        Self::InvalidPathTemplate {
            message: message.into(),
        }
    }
}
