//! Defect umbrella type.

use super::{AuthError, ClientError, ConfigError, DispatchError, ValidationError};
use thiserror::Error;

/// A failure outside an operation's declared error set.
///
/// Defects are contract violations rather than business outcomes: the
/// transport failed, a payload did not fit its shape, the service answered
/// with an error code nobody declared, or a descriptor is wrong.
///
/// ## Examples
///
/// ```rust,ignore
/// use opkit::error::ApiError;
///
/// fn report(err: &ApiError) {
///     match err {
///         ApiError::Client(e) => eprintln!("Network error: {e}"),
///         ApiError::Validation(e) => eprintln!("Shape mismatch: {e}"),
///         ApiError::Dispatch(e) => eprintln!("Undeclared failure: {e}"),
///         ApiError::Auth(e) => eprintln!("Credentials: {e}"),
///         ApiError::Config(e) => eprintln!("Descriptor error: {e}"),
///     }
/// }
/// ```
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failures (network, timeout, connection).
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Input or output did not satisfy its shape.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Failure response that maps to no declared error.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    /// Credentials could not be acquired.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Descriptor or routing misconfiguration.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ApiError {
    /// Returns the HTTP status involved in this defect, if one was received.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Dispatch(e) => Some(e.status()),
            Self::Client(e) => e.status_code(),
            _ => None,
        }
    }
}
