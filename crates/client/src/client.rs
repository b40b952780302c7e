use serde::Serialize;
use serde::de::DeserializeOwned;
use soapclient_transport::{Transport, TransportRequest};
use tracing::{debug, instrument, warn};

use crate::envelope::{Body, Envelope};
use crate::error::{Error, Result};

/// A client performing SOAP exchanges against a single endpoint.
///
/// The client holds no state besides its address and transport, so one
/// instance can serve any number of concurrent calls.
#[derive(Clone, Debug)]
pub struct Client<T>
where
    T: Transport,
{
    address: String,
    transport: T,
}

impl<T> Client<T>
where
    T: Transport,
{
    /// Creates a new client for the endpoint at `address`.
    pub fn new(address: impl Into<String>, transport: T) -> Self {
        Self {
            address: address.into(),
            transport,
        }
    }

    /// The endpoint this client talks to.
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Performs one exchange and returns the decoded response payload.
    ///
    /// The request is wrapped in a header-less envelope and sent with
    /// `action` as the transport-level action header. An empty `action` is sent
    /// as is. The response payload is decoded into `R`.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - the request cannot be encoded
    /// - the transport fails to send the request or read the response
    /// - the response body is empty
    /// - the response is not an envelope whose content matches `R`
    /// - the response carries a SOAP fault
    #[instrument(skip(self, request), fields(address = %self.address))]
    pub async fn call<Q, R>(&self, action: &str, request: &Q) -> Result<R>
    where
        Q: Serialize + Sync,
        R: DeserializeOwned,
    {
        let document = Envelope::content(request).encode()?;

        debug!("sending {} byte request", document.len());

        let response = self
            .transport
            .round_trip(TransportRequest::soap(&self.address, action, document))
            .await
            .map_err(|e| Error::Transport(Box::new(e)))?;

        debug!(
            "received {} byte response with status {}",
            response.body.len(),
            response.status
        );

        if response.body.is_empty() {
            return Err(Error::EmptyResponse);
        }

        match Envelope::<R>::decode(&response.body)?.body {
            Body::Content(content) => Ok(content),
            Body::Fault(fault) => {
                warn!("received SOAP fault: {}", fault);
                Err(Error::Fault(fault))
            }
        }
    }

    /// Performs one exchange and stores the decoded payload in `destination`.
    ///
    /// `destination` is only written when the exchange succeeds.
    ///
    /// # Errors
    ///
    /// Fails in the same cases as [`Client::call`].
    pub async fn call_into<Q, R>(&self, action: &str, request: &Q, destination: &mut R) -> Result<()>
    where
        Q: Serialize + Sync,
        R: DeserializeOwned,
    {
        *destination = self.call(action, request).await?;

        Ok(())
    }
}
