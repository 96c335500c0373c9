//! Operation identifiers.
//!
//! An id names its operation in tracing spans, log events and every defect
//! the operation produces. Ids are lowercase snake_case words such as
//! `delete_backup`, so they can be recorded as span fields without quoting.

use std::fmt;
use std::sync::Arc;

use crate::error::OperationIdError;

/// A validated snake_case operation identifier.
///
/// Cloning is cheap; defects carry their own copy of the id.
///
/// ```rust
/// use opkit::{OperationId, OperationIdError};
///
/// let id = OperationId::new("delete_backup").unwrap();
/// assert_eq!(id, "delete_backup");
/// assert_eq!(
///     OperationId::new("deleteBackup"),
///     Err(OperationIdError::InvalidCharacter { found: 'B', position: 6 })
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OperationId(Arc<str>);

impl OperationId {
    /// Validates `id` and wraps it.
    ///
    /// ## Errors
    ///
    /// Returns an [`OperationIdError`] unless `id` starts with `a-z`, uses
    /// only `a-z`, `0-9` and single inner underscores.
    pub fn new(id: impl AsRef<str>) -> Result<Self, OperationIdError> {
        let id = id.as_ref();
        validate(id)?;
        Ok(Self(Arc::from(id)))
    }

    /// Returns the identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn validate(id: &str) -> Result<(), OperationIdError> {
    let first = id.chars().next().ok_or(OperationIdError::Empty)?;
    if !first.is_ascii_lowercase() {
        return Err(OperationIdError::InvalidStart(first));
    }

    let allowed = |c: char| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_';
    if let Some((position, found)) = id.char_indices().find(|&(_, c)| !allowed(c)) {
        return Err(OperationIdError::InvalidCharacter { found, position });
    }

    if id.split('_').any(str::is_empty) {
        return Err(OperationIdError::EmptyWord(id.to_string()));
    }

    Ok(())
}

impl fmt::Display for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for OperationId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for OperationId {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for OperationId {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

impl TryFrom<&str> for OperationId {
    type Error = OperationIdError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
