//! Input and payload shape errors.

use thiserror::Error;

use crate::operation_id::OperationId;

/// A value did not satisfy its shape.
///
/// Raised both for caller input that fails validation before anything is
/// sent and for success payloads that do not decode into the output shape.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Success payload JSON parsing failed.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Empty response body when content was expected.
    #[error("Empty response body")]
    EmptyBody,

    /// Input could not be serialized.
    #[error("Input serialization failed: {0}")]
    InputSerialization(#[source] serde_json::Error),

    /// Input did not serialize to a record.
    #[error("Input must be a record, got {found}")]
    InputNotRecord {
        /// JSON kind the input serialized to.
        found: &'static str,
    },

    /// Input was rejected by the descriptor's input check.
    #[error("Input rejected by {operation}: {reason}")]
    InputRejected {
        /// The operation that rejected the input.
        operation: OperationId,
        /// Why the input was rejected.
        reason: String,
    },
}

impl ValidationError {
    /// Returns `true` if the failure concerns caller input.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InputSerialization(_) | Self::InputNotRecord { .. } | Self::InputRejected { .. }
        )
    }

    /// Returns `true` if this is a parsing error.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::JsonParse(_))
    }
}
