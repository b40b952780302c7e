use thiserror::Error;

use crate::envelope::Fault;

/// Result type alias for SOAP exchanges.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during a SOAP exchange.
///
/// Exactly one of these is returned per failed call; none are retried.
#[derive(Debug, Error)]
pub enum Error {
    /// The request could not be serialized into an envelope.
    #[error("failed to encode request envelope: {0}")]
    Encoding(String),

    /// The request could not be dispatched or the response could not be read.
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The response body was zero bytes long.
    #[error("received empty response body")]
    EmptyResponse,

    /// The response was not a well-formed envelope of the expected shape.
    #[error("failed to decode response envelope: {0}")]
    Decoding(String),

    /// The remote party answered with a SOAP fault.
    #[error("received SOAP fault with code {}", .0.code)]
    Fault(Fault),
}

impl Error {
    /// Returns the fault carried by this error, if any.
    #[must_use]
    pub const fn fault(&self) -> Option<&Fault> {
        match self {
            Self::Fault(fault) => Some(fault),
            _ => None,
        }
    }

    /// Returns `true` if the remote party answered with a fault.
    #[must_use]
    pub const fn is_fault(&self) -> bool {
        matches!(self, Self::Fault(_))
    }
}
