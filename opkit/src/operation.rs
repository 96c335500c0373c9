//! The operation factory.
//!
//! [`make`] turns a descriptor-producing function into a callable
//! [`Operation`]. The descriptor is built on first use and reused for the
//! life of the process, so operations can be declared as `static`s without
//! caring about initialization order.
//!
//! ```rust,ignore
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
//! DELETE_BACKUP.call(&ctx, &input).await?;
//! ```

use std::fmt;
use std::sync::OnceLock;

use serde::Serialize;
use tracing::{instrument, Span};

use crate::context::Context;
use crate::descriptor::OperationDescriptor;
use crate::dispatch::dispatch;
use crate::error::{ConfigError, OperationError};
use crate::request::build_request;
use crate::response::ResponseFormat;
use crate::transport::Transport;

/// Produces an operation's descriptor.
pub type Define<I, F, E> = fn() -> Result<OperationDescriptor<I, F, E>, ConfigError>;

/// A callable remote operation.
pub struct Operation<I, F: ResponseFormat, E> {
    define: Define<I, F, E>,
    descriptor: OnceLock<Result<OperationDescriptor<I, F, E>, ConfigError>>,
}

/// Creates an operation from its descriptor definition.
///
/// The definition runs at most once, on the first call (or the first
/// [`Operation::descriptor`] lookup). A definition that fails keeps failing
/// with the same [`ConfigError`] on every call.
pub const fn make<I, F: ResponseFormat, E>(define: Define<I, F, E>) -> Operation<I, F, E> {
    Operation::new(define)
}

impl<I, F: ResponseFormat, E> Operation<I, F, E> {
    /// Creates an operation from its descriptor definition. Same as [`make`].
    pub const fn new(define: Define<I, F, E>) -> Self {
        Self {
            define,
            descriptor: OnceLock::new(),
        }
    }

    /// Returns the memoized descriptor, building it on first use.
    ///
    /// ## Errors
    ///
    /// Returns the [`ConfigError`] the definition produced.
    pub fn descriptor(&self) -> Result<&OperationDescriptor<I, F, E>, ConfigError> {
        self.descriptor
            .get_or_init(self.define)
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Runs the operation once.
    ///
    /// Validates `input`, builds the request against the context's base URL,
    /// authorizes it, sends it through the context's transport exactly once
    /// and dispatches the response. Nothing is retried or cached.
    ///
    /// ## Errors
    ///
    /// Returns [`OperationError::Declared`] for a declared upstream error and
    /// [`OperationError::Defect`] for everything else, including invalid
    /// input, which fails before anything is sent.
    #[instrument(
        name = "operation",
        skip_all,
        fields(
            operation.id = tracing::field::Empty,
            http.method = tracing::field::Empty,
            http.url = tracing::field::Empty,
            http.status_code = tracing::field::Empty,
            otel.kind = "client",
            otel.status_code = tracing::field::Empty,
        )
    )]
    pub async fn call<T: Transport>(
        &self,
        ctx: &Context<T>,
        input: &I,
    ) -> Result<F::Output, OperationError<E>>
    where
        I: Serialize,
    {
        let descriptor = self.descriptor()?;
        let span = Span::current();
        span.record("operation.id", descriptor.id());
        span.record("http.method", descriptor.method().to_string().as_str());

        let fields = descriptor.validate(input)?;
        let mut request = build_request(descriptor, ctx.credentials().base_url(), &fields)?;
        span.record("http.url", request.url.as_str());
        request
            .headers
            .push(("Authorization".to_string(), ctx.credentials().authorization()));

        let response = ctx.transport().send(request).await.inspect_err(|_| {
            span.record("otel.status_code", "ERROR");
        })?;
        span.record("http.status_code", response.status);

        let result = dispatch(descriptor, &fields, &response);
        span.record("otel.status_code", if result.is_ok() { "OK" } else { "ERROR" });
        result
    }
}

impl<I, F: ResponseFormat, E> fmt::Debug for Operation<I, F, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operation")
            .field("descriptor", &self.descriptor.get())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::{Credentials, Token};
    use crate::error::{ApiError, ClientError, ValidationError};
    use crate::method::RestMethod;
    use crate::response::{JsonFormat, VoidFormat};
    use crate::wire::{WireRequest, WireResponse};
    use serde::Deserialize;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use url::Url;

    /// Records every request and answers with a fixed response.
    struct Recording {
        requests: Mutex<Vec<WireRequest>>,
        reply: Option<WireResponse>,
    }

    impl Recording {
        fn replying(reply: WireResponse) -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
                reply: Some(reply),
            }
        }

        fn failing() -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
                reply: None,
            }
        }

        fn requests(&self) -> Vec<WireRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl Transport for Recording {
        async fn send(&self, request: WireRequest) -> Result<WireResponse, ClientError> {
            self.requests.lock().unwrap().push(request);
            self.reply
                .clone()
                .ok_or_else(|| ClientError::Connection("connection refused".to_string()))
        }
    }

    fn context(transport: Recording) -> Context<Recording> {
        let credentials = Credentials::new(Token::service("tok", "secret").unwrap())
            .with_base_url(Url::parse("https://api.example.com/v1").unwrap());
        Context::new(credentials, transport)
    }

    #[derive(Debug, Clone, PartialEq, Deserialize)]
    struct BackupFailure {
        organization: String,
        database: String,
        branch: String,
        id: String,
        message: String,
    }

    #[derive(Debug, Clone, PartialEq)]
    enum DeleteBackupError {
        NotFound(BackupFailure),
        Forbidden(BackupFailure),
    }

    #[derive(Serialize)]
    struct DeleteBackupInput {
        organization: String,
        database: String,
        branch: String,
        id: String,
    }

    fn input() -> DeleteBackupInput {
        DeleteBackupInput {
            organization: "acme".to_string(),
            database: "db1".to_string(),
            branch: "main".to_string(),
            id: "X".to_string(),
        }
    }

    fn non_empty_id(input: &DeleteBackupInput) -> Result<(), String> {
        if input.id.is_empty() {
            Err("id must not be empty".to_string())
        } else {
            Ok(())
        }
    }

    static DELETE_BACKUP: Operation<DeleteBackupInput, VoidFormat, DeleteBackupError> =
        make(|| {
            OperationDescriptor::builder()
                .id("delete_backup")
                .method(RestMethod::Delete)
                .path("/organizations/{organization}/databases/{database}/branches/{branch}/backups/{id}")
                .validate_input(non_empty_id)
                .error("not_found", DeleteBackupError::NotFound)
                .error("forbidden", DeleteBackupError::Forbidden)
                .build()
        });

    #[tokio::test]
    async fn test_call_sends_once_and_decodes_declared_error() {
        let ctx = context(Recording::replying(WireResponse::json(
            404,
            &json!({"error_code": "not_found", "message": "no such backup"}),
        )));

        let err = DELETE_BACKUP.call(&ctx, &input()).await.unwrap_err();

        assert_eq!(
            err.into_declared(),
            Some(DeleteBackupError::NotFound(BackupFailure {
                organization: "acme".to_string(),
                database: "db1".to_string(),
                branch: "main".to_string(),
                id: "X".to_string(),
                message: "no such backup".to_string(),
            }))
        );

        let requests = ctx.transport().requests();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.method, RestMethod::Delete);
        assert_eq!(
            request.url.as_str(),
            "https://api.example.com/v1/organizations/acme/databases/db1/branches/main/backups/X"
        );
        assert_eq!(request.header("authorization"), Some("tok:secret"));
        assert_eq!(request.body, None);
    }

    #[tokio::test]
    async fn test_call_success_void() {
        let ctx = context(Recording::replying(WireResponse::empty(204)));

        DELETE_BACKUP.call(&ctx, &input()).await.unwrap();
        assert_eq!(ctx.transport().requests().len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_input_never_sends() {
        let ctx = context(Recording::replying(WireResponse::empty(204)));
        let mut bad = input();
        bad.id = String::new();

        let err = DELETE_BACKUP.call(&ctx, &bad).await.unwrap_err();

        assert!(matches!(
            err,
            OperationError::Defect(ApiError::Validation(ValidationError::InputRejected { .. }))
        ));
        assert!(ctx.transport().requests().is_empty());
    }

    #[tokio::test]
    async fn test_transport_failure_passes_through() {
        let ctx = context(Recording::failing());

        let err = DELETE_BACKUP.call(&ctx, &input()).await.unwrap_err();

        assert!(matches!(
            err,
            OperationError::Defect(ApiError::Client(ClientError::Connection(_)))
        ));
        assert_eq!(ctx.transport().requests().len(), 1);
    }

    static DEFINITIONS: AtomicUsize = AtomicUsize::new(0);

    static BROKEN: Operation<DeleteBackupInput, VoidFormat, DeleteBackupError> = make(|| {
        DEFINITIONS.fetch_add(1, Ordering::SeqCst);
        OperationDescriptor::builder()
            .id("broken")
            .method(RestMethod::Delete)
            .path("/backups/{id")
            .build()
    });

    #[tokio::test]
    async fn test_broken_definition_is_memoized_config_defect() {
        let ctx = context(Recording::replying(WireResponse::empty(204)));

        for _ in 0..3 {
            let err = BROKEN.call(&ctx, &input()).await.unwrap_err();
            assert!(matches!(
                err,
                OperationError::Defect(ApiError::Config(ConfigError::InvalidPathTemplate { .. }))
            ));
        }

        assert_eq!(DEFINITIONS.load(Ordering::SeqCst), 1);
        assert!(ctx.transport().requests().is_empty());
    }

    #[derive(Debug, PartialEq, Deserialize)]
    struct Region {
        slug: String,
    }

    static LIST_REGIONS: Operation<(), JsonFormat<Vec<Region>>, DeleteBackupError> = make(|| {
        OperationDescriptor::builder()
            .id("list_regions")
            .method(RestMethod::Get)
            .path("/regions")
            .build()
    });

    #[tokio::test]
    async fn test_unit_input_and_concurrent_calls() {
        let ctx = context(Recording::replying(WireResponse::json(
            200,
            &json!([{"slug": "us-east"}]),
        )));

        let (first, second) = tokio::join!(
            LIST_REGIONS.call(&ctx, &()),
            LIST_REGIONS.call(&ctx, &())
        );

        assert_eq!(first.unwrap(), vec![Region { slug: "us-east".to_string() }]);
        assert_eq!(second.unwrap(), vec![Region { slug: "us-east".to_string() }]);

        let requests = ctx.transport().requests();
        assert_eq!(requests.len(), 2);
        assert!(requests
            .iter()
            .all(|r| r.url.as_str() == "https://api.example.com/v1/regions"));
    }

    #[test]
    fn test_descriptor_is_shared() {
        let first = LIST_REGIONS.descriptor().unwrap();
        let second = LIST_REGIONS.descriptor().unwrap();
        assert!(std::ptr::eq(first, second));
        assert_eq!(first.id(), "list_regions");
    }

    #[tokio::test]
    #[tracing_test::traced_test]
    async fn test_call_logs_declared_error() {
        let ctx = context(Recording::replying(WireResponse::new(403, "null")));

        let err = DELETE_BACKUP.call(&ctx, &input()).await.unwrap_err();

        assert!(matches!(err, OperationError::Declared(DeleteBackupError::Forbidden(_))));
        assert!(logs_contain("decoded declared error"));
        assert!(logs_contain("delete_backup"));
    }
}
