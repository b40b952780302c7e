//! Abstract transport interface for SOAP exchanges.
//!
//! This crate only describes a single request/response round trip. Concrete
//! transports (HTTP, in-process mocks) live in separate crates and own their
//! own connection handling, timeouts and TLS settings.
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

use std::error::Error;
use std::fmt::Debug;

use async_trait::async_trait;
use bytes::Bytes;
use http::StatusCode;

/// Header carrying the action identifier of a SOAP 1.1 request.
pub const SOAP_ACTION_HEADER: &str = "SOAPAction";

/// Content type of a SOAP 1.1 request document.
pub const SOAP_CONTENT_TYPE: &str = "text/xml; charset=\"utf-8\"";

/// Marker trait for transport errors.
pub trait TransportError: Debug + Error + Send + Sync + 'static {}

/// A single outbound request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransportRequest {
    /// Destination address of the remote endpoint.
    pub address: String,

    /// Encoded request document.
    pub body: Bytes,

    /// Value of the content type header.
    pub content_type: String,

    /// Action identifier, sent out-of-band as a transport header.
    pub action: String,
}

impl TransportRequest {
    /// Creates a request for a SOAP document with the standard content type.
    pub fn soap<A, S>(address: A, action: S, body: impl Into<Bytes>) -> Self
    where
        A: Into<String>,
        S: Into<String>,
    {
        Self {
            address: address.into(),
            body: body.into(),
            content_type: SOAP_CONTENT_TYPE.to_string(),
            action: action.into(),
        }
    }
}

/// The reply to a [`TransportRequest`], with the body fully read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransportResponse {
    /// Status reported by the remote endpoint.
    pub status: StatusCode,

    /// Complete response body.
    pub body: Bytes,
}

impl TransportResponse {
    /// Creates a new response.
    #[must_use]
    pub const fn new(status: StatusCode, body: Bytes) -> Self {
        Self { status, body }
    }
}

/// A trait representing a request/response transport with asynchronous operations.
#[async_trait]
pub trait Transport
where
    Self: Clone + Debug + Send + Sync + 'static,
{
    /// The error type for the transport.
    type Error: TransportError;

    /// Sends the request and reads the complete response body.
    ///
    /// Exactly one outbound request is issued per call. Implementations do
    /// not retry.
    async fn round_trip(&self, request: TransportRequest) -> Result<TransportResponse, Self::Error>;
}
