//! The HTTP seam between the engine and the network.
//!
//! A [`Transport`] sends one [`WireRequest`] and hands back the raw
//! [`WireResponse`]. It does not interpret statuses or bodies; that is the
//! dispatcher's job. Non-2xx answers are successful sends.

use std::future::Future;
use std::sync::Arc;

use crate::error::ClientError;
use crate::wire::{WireRequest, WireResponse};

mod http;

pub use http::{ReqwestTransport, ReqwestTransportBuilder};

/// Sends wire requests.
///
/// Implementations must be safe to share across concurrent calls. Any
/// failure to obtain a response is reported as a [`ClientError`] and is
/// passed through to the caller unchanged.
///
/// ## Examples
///
/// ```rust,ignore
/// use opkit::{ClientError, Transport, WireRequest, WireResponse};
///
/// struct AlwaysNotFound;
///
/// impl Transport for AlwaysNotFound {
///     async fn send(&self, _request: WireRequest) -> Result<WireResponse, ClientError> {
///         Ok(WireResponse::new(404, r#"{"code":"not_found"}"#))
///     }
/// }
/// ```
pub trait Transport: Send + Sync {
    /// Sends one request and returns the raw response.
    fn send(
        &self,
        request: WireRequest,
    ) -> impl Future<Output = Result<WireResponse, ClientError>> + Send;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(
        &self,
        request: WireRequest,
    ) -> impl Future<Output = Result<WireResponse, ClientError>> + Send {
        (**self).send(request)
    }
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn send(
        &self,
        request: WireRequest,
    ) -> impl Future<Output = Result<WireResponse, ClientError>> + Send {
        (**self).send(request)
    }
}
