//! Ambient call context.

use crate::credentials::Credentials;
use crate::error::ApiError;
use crate::transport::{ReqwestTransport, Transport};

/// Credentials and transport shared by every call.
///
/// The context is read-only; concurrent calls may share one by reference.
/// Tests substitute their own transport per context.
///
/// ## Examples
///
/// ```rust,ignore
/// use opkit::Context;
///
/// let ctx = Context::from_env()?;
/// let branch = GET_BRANCH.call(&ctx, &input).await?;
/// ```
#[derive(Debug, Clone)]
pub struct Context<T> {
    credentials: Credentials,
    transport: T,
}

impl<T: Transport> Context<T> {
    /// Creates a context from explicit parts.
    pub fn new(credentials: Credentials, transport: T) -> Self {
        Self {
            credentials,
            transport,
        }
    }

    /// Returns the credentials.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Returns the transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }
}

impl Context<ReqwestTransport> {
    /// Builds a context from environment credentials and a default
    /// [`ReqwestTransport`].
    ///
    /// ## Errors
    ///
    /// Returns an error if credentials are missing or malformed, or if the
    /// HTTP client cannot be constructed.
    pub fn from_env() -> Result<Self, ApiError> {
        Ok(Self::new(Credentials::from_env()?, ReqwestTransport::new()?))
    }
}
