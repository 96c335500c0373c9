//! Credential acquisition errors.

use thiserror::Error;

/// Errors raised while acquiring or applying credentials.
#[derive(Debug, Error)]
pub enum AuthError {
    /// None of the checked environment variables held a credential.
    #[error("Missing credentials: none of the following environment variables are set: {env_vars:?}")]
    MissingCredential {
        /// The environment variable names that were checked.
        env_vars: Vec<String>,
    },

    /// The credential cannot be sent as an HTTP header value.
    #[error("Invalid token format")]
    InvalidTokenFormat,
}
