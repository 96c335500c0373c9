//! Generic operation engine for typed REST endpoint declarations.
//!
//! Every remote endpoint is declared once as an [`OperationDescriptor`]:
//! routing (method and path), the input record, the success payload format
//! and a closed set of declared errors keyed by upstream error code. The
//! engine turns that declaration into a callable [`Operation`] that builds
//! the wire request, sends it through a [`Transport`] and maps the response
//! to exactly one of: the success value, a declared error, or a defect.
//!
//! ## Features
//!
//! - **Declarative descriptors**: type-state builder, path templates or
//!   path-building functions, per-operation error enums
//! - **Strict dispatch**: failures map to declared errors by code only;
//!   anything else is a structured [`ApiError`] defect
//! - **Injected context**: credentials and transport are threaded explicitly
//!   through a [`Context`], so tests swap in fakes per call
//! - **Async transport**: pooled `reqwest` client with tracing spans
//!
//! ## Example
//!
//! ```rust,ignore
//! use opkit::{make, Context, Operation, OperationDescriptor, RestMethod};
//! use opkit::response::VoidFormat;
//!
//! pub static DELETE_BACKUP: Operation<DeleteBackupInput, VoidFormat, DeleteBackupError> =
//!     make(|| {
//!         OperationDescriptor::builder()
//!             .id("delete_backup")
//!             .method(RestMethod::Delete)
//!             .path("/organizations/{organization}/databases/{database}/branches/{branch}/backups/{id}")
//!             .error("not_found", DeleteBackupError::NotFound)
//!             .error("forbidden", DeleteBackupError::Forbidden)
//!             .build()
//!     });
//!
//! let ctx = Context::from_env()?;
//! DELETE_BACKUP.call(&ctx, &input).await?;
//! ```

pub mod context;
pub mod credentials;
pub mod descriptor;
pub mod dispatch;
pub mod error;
pub mod method;
pub mod operation;
pub mod operation_id;
pub mod request;
pub mod response;
pub mod transport;
pub mod wire;

// Re-exports for convenience
pub use context::Context;
pub use credentials::{Credentials, Token};
pub use descriptor::{ErrorShape, OperationDescriptor, OperationDescriptorBuilder, PathParams, PathSpec};
pub use dispatch::dispatch;
pub use error::{
    ApiError, AuthError, ClientError, ConfigError, DispatchError, OperationError, OperationIdError,
    ValidationError,
};
pub use method::{FieldPlacement, RestMethod};
pub use operation::{make, Operation};
pub use operation_id::OperationId;
pub use request::build_request;
pub use response::{JsonFormat, ResponseFormat, VoidFormat};
pub use transport::{ReqwestTransport, ReqwestTransportBuilder, Transport};
pub use wire::{WireRequest, WireResponse};
