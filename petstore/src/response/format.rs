//! Response format trait and implementations.
//!
//! The [`ResponseFormat`] trait defines how to parse HTTP response bodies
//! into typed values. The Petstore API serves JSON by default and XML on
//! request; operations without a meaningful body use [`EmptyFormat`].

use std::future::Future;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;

use crate::error::ValidationError;

/// Trait for response format parsing strategies.
///
/// Each format implements its own parsing logic, transforming an HTTP
/// response body into a typed output value. The format type parameter on
/// [`Endpoint`](crate::endpoint::Endpoint) selects the strategy at compile
/// time, so a mismatched decoder cannot be paired with an operation.
///
/// ## Examples
///
/// ```rust,ignore
/// use petstore::response::JsonFormat;
/// use petstore::models::Pet;
///
/// // The format type encodes both the parsing strategy and output type
/// type PetResponse = JsonFormat<Pet>;
/// ```
pub trait ResponseFormat: Send + Sync {
    /// The output type after parsing.
    type Output: Send + Sync;

    /// Parse a response body into the output type.
    fn parse(
        body: bytes::Bytes,
    ) -> impl Future<Output = Result<Self::Output, ValidationError>> + Send;

    /// Returns the `Accept` content type requested for this format.
    fn content_type() -> &'static str;
}

/// JSON response format with typed deserialization.
///
/// ## Type Parameters
///
/// - `T`: The type to deserialize the JSON into. Must implement [`DeserializeOwned`].
#[derive(Debug, Clone, Copy)]
pub struct JsonFormat<T>(PhantomData<T>);

impl<T: DeserializeOwned + Send + Sync> ResponseFormat for JsonFormat<T> {
    type Output = T;

    async fn parse(body: bytes::Bytes) -> Result<Self::Output, ValidationError> {
        serde_json::from_slice(&body).map_err(ValidationError::JsonParse)
    }

    fn content_type() -> &'static str {
        "application/json"
    }
}

/// XML response format with typed deserialization.
///
/// ## Type Parameters
///
/// - `X`: The type to deserialize the XML into. Must implement [`DeserializeOwned`].
#[derive(Debug, Clone, Copy)]
pub struct XmlFormat<X>(PhantomData<X>);

impl<X: DeserializeOwned + Send + Sync> ResponseFormat for XmlFormat<X> {
    type Output = X;

    async fn parse(body: bytes::Bytes) -> Result<Self::Output, ValidationError> {
        quick_xml::de::from_reader(body.as_ref()).map_err(ValidationError::XmlParse)
    }

    fn content_type() -> &'static str {
        "application/xml"
    }
}

/// Format for operations whose response body carries no information.
///
/// The body is discarded without inspection. Several Petstore operations
/// (`deletePet`, `logoutUser`, ...) return ad-hoc status bodies that
/// callers have no use for.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyFormat;

impl ResponseFormat for EmptyFormat {
    type Output = ();

    async fn parse(_body: bytes::Bytes) -> Result<Self::Output, ValidationError> {
        Ok(())
    }

    fn content_type() -> &'static str {
        "application/json"
    }
}
