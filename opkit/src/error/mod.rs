//! Layered error types for the operation engine.
//!
//! Every call returns an [`OperationError`], which is either one of the
//! operation's declared error variants or a defect. Defects are grouped by
//! the layer that produced them:
//! - [`ApiError`] - Umbrella for every defect
//! - [`ClientError`] - Transport and network failures
//! - [`ValidationError`] - Input or success payload does not fit its shape
//! - [`DispatchError`] - Failure payload outside the declared error set
//! - [`AuthError`] - Credential acquisition failures
//! - [`ConfigError`] - Descriptor and routing programmer errors
//!
//! Defects raised for a specific operation carry its [`OperationId`](crate::OperationId).

mod api_error;
mod auth_error;
mod client_error;
mod config_error;
mod dispatch_error;
mod operation_error;
mod operation_id_error;
mod validation_error;

pub use api_error::ApiError;
pub use auth_error::AuthError;
pub use client_error::ClientError;
pub use config_error::ConfigError;
pub use dispatch_error::DispatchError;
pub use operation_error::OperationError;
pub use operation_id_error::OperationIdError;
pub use validation_error::ValidationError;
