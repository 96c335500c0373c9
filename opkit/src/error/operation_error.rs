//! Result channel for a single operation call.

use thiserror::Error;

use super::{ApiError, AuthError, ClientError, ConfigError, DispatchError, ValidationError};

/// The failure side of every operation call.
///
/// `E` is the operation's closed error enum, one variant per declared error
/// code. Anything the declared set cannot express arrives as a
/// [`Defect`](OperationError::Defect) instead, so callers can always tell
/// an anticipated business error apart from a contract violation.
///
/// Note that the upstream service may report the same missing resource as
/// either `not_found` or `forbidden` depending on what the caller may see.
/// The engine maps strictly by code; callers that want "not found or
/// forbidden" semantics must match both variants.
///
/// ## Examples
///
/// ```rust,ignore
/// match GET_BRANCH.call(&ctx, &input).await {
///     Ok(branch) => println!("{}", branch.name),
///     Err(OperationError::Declared(GetBranchError::NotFound(e))) => println!("gone: {e}"),
///     Err(OperationError::Declared(e)) => println!("declared: {e}"),
///     Err(OperationError::Defect(e)) => eprintln!("defect: {e}"),
/// }
/// ```
#[derive(Debug, Error)]
pub enum OperationError<E> {
    /// One of the operation's declared errors.
    #[error(transparent)]
    Declared(E),

    /// A failure outside the declared error set.
    #[error(transparent)]
    Defect(#[from] ApiError),
}

impl<E> OperationError<E> {
    /// Returns the declared error, if this is one.
    pub fn declared(&self) -> Option<&E> {
        match self {
            Self::Declared(e) => Some(e),
            Self::Defect(_) => None,
        }
    }

    /// Consumes the error, returning the declared variant if this is one.
    pub fn into_declared(self) -> Option<E> {
        match self {
            Self::Declared(e) => Some(e),
            Self::Defect(_) => None,
        }
    }

    /// Returns the defect, if this is one.
    pub fn defect(&self) -> Option<&ApiError> {
        match self {
            Self::Declared(_) => None,
            Self::Defect(e) => Some(e),
        }
    }

    /// Returns `true` if the failure is outside the declared error set.
    pub fn is_defect(&self) -> bool {
        matches!(self, Self::Defect(_))
    }
}

macro_rules! defect_from {
    ($($source:ty),* $(,)?) => {
        $(
            impl<E> From<$source> for OperationError<E> {
                fn from(err: $source) -> Self {
                    Self::Defect(ApiError::from(err))
                }
            }
        )*
    };
}

defect_from!(ClientError, ValidationError, DispatchError, AuthError, ConfigError);
