use soapclient_transport::TransportError;
use thiserror::Error;

/// Errors that can occur in the HTTP transport.
#[derive(Debug, Error)]
pub enum Error {
    /// The underlying HTTP client could not be built.
    #[error("failed to build http client: {0}")]
    Build(#[source] reqwest::Error),

    /// The response body could not be read.
    #[error("failed to read response body: {0}")]
    Body(#[source] reqwest::Error),

    /// The destination address is not a valid URL.
    #[error("invalid address `{address}`: {source}")]
    InvalidAddress {
        /// The rejected address.
        address: String,
        /// The parse failure.
        #[source]
        source: url::ParseError,
    },

    /// A header value contains characters HTTP does not allow.
    #[error("invalid value for header `{0}`")]
    InvalidHeader(&'static str),

    /// The request could not be dispatched.
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),
}

impl TransportError for Error {}
