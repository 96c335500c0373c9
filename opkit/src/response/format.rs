//! Response format trait and implementations.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;

use crate::error::ValidationError;

/// Trait for success payload decoding strategies.
///
/// The format type encodes both the decoding strategy and the output type.
/// `body` is `None` when the response carried no payload (empty or
/// whitespace-only).
///
/// ## Examples
///
/// ```rust,ignore
/// use opkit::response::{JsonFormat, VoidFormat};
///
/// type GetBranchOutput = JsonFormat<Branch>;
/// type DeleteBackupOutput = VoidFormat;
/// ```
pub trait ResponseFormat: Send + Sync + 'static {
    /// The output type after decoding.
    type Output: Send;

    /// Decode a success body into the output type.
    fn parse(body: Option<&[u8]>) -> Result<Self::Output, ValidationError>;

    /// Returns the expected Content-Type for this format.
    fn content_type() -> &'static str;
}

/// JSON response format with typed deserialization.
///
/// ## Type Parameters
///
/// - `T`: The type to deserialize the JSON into. Must implement [`DeserializeOwned`].
#[derive(Debug, Clone, Copy)]
pub struct JsonFormat<T>(PhantomData<fn() -> T>);

impl<T: DeserializeOwned + Send + 'static> ResponseFormat for JsonFormat<T> {
    type Output = T;

    fn parse(body: Option<&[u8]>) -> Result<Self::Output, ValidationError> {
        let body = body.ok_or(ValidationError::EmptyBody)?;
        serde_json::from_slice(body).map_err(ValidationError::JsonParse)
    }

    fn content_type() -> &'static str {
        "application/json"
    }
}

/// Void response format.
///
/// Any success body is accepted and discarded, including an absent body
/// and a literal `null`.
#[derive(Debug, Clone, Copy, Default)]
pub struct VoidFormat;

impl ResponseFormat for VoidFormat {
    type Output = ();

    fn parse(_body: Option<&[u8]>) -> Result<Self::Output, ValidationError> {
        Ok(())
    }

    fn content_type() -> &'static str {
        "application/json"
    }
}
