//! Operation identifier validation errors.

use thiserror::Error;

/// Why a string is not a valid [`OperationId`](crate::OperationId).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OperationIdError {
    /// The identifier is empty.
    #[error("Operation ID cannot be empty")]
    Empty,

    /// The first character is not a lowercase ASCII letter.
    #[error("Operation ID must start with a lowercase ASCII letter, found '{0}'")]
    InvalidStart(char),

    /// A character outside `a-z`, `0-9` and `_`.
    #[error("Operation ID contains '{found}' at byte {position}")]
    InvalidCharacter {
        /// The rejected character.
        found: char,
        /// Byte offset of the character.
        position: usize,
    },

    /// Doubled or trailing underscore.
    #[error("Operation ID '{0}' has an empty word")]
    EmptyWord(String),
}
