use soapclient_transport::TransportError;
use thiserror::Error;

/// Error type for the mock transport.
#[derive(Debug, Error)]
pub enum Error {
    /// The scripted failure queued with `push_error`.
    #[error("scripted transport failure: {0}")]
    Scripted(String),

    /// A request arrived after every scripted outcome was consumed.
    #[error("no scripted outcome left for request to {0}")]
    Exhausted(String),
}

impl TransportError for Error {}
