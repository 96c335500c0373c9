//! Failure responses the declared error set cannot express.

use thiserror::Error;

use crate::operation_id::OperationId;

/// A failure response that could not be mapped to a declared error.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The error code is not declared on the operation.
    ///
    /// This includes operations that declare no errors at all.
    #[error("Undeclared error from {operation} (HTTP {status}, code {code:?}): {body}")]
    UndeclaredCode {
        /// The operation that was called.
        operation: OperationId,
        /// HTTP status of the response.
        status: u16,
        /// Error code extracted from the response, if any.
        code: Option<String>,
        /// Raw response body.
        body: String,
    },

    /// The code matched a declared error, but the payload does not fit its shape.
    #[error("Malformed '{code}' error from {operation} (HTTP {status}): {source}")]
    MalformedError {
        /// The operation that was called.
        operation: OperationId,
        /// HTTP status of the response.
        status: u16,
        /// The declared error code that matched.
        code: String,
        /// Decoding failure.
        #[source]
        source: serde_json::Error,
    },
}

impl DispatchError {
    /// Returns the HTTP status of the failure response.
    pub fn status(&self) -> u16 {
        match self {
            Self::UndeclaredCode { status, .. } | Self::MalformedError { status, .. } => *status,
        }
    }

    /// Returns the upstream error code, if one was found.
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::UndeclaredCode { code, .. } => code.as_deref(),
            Self::MalformedError { code, .. } => Some(code),
        }
    }
}
