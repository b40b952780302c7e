//! HTTP implementation of the SOAP transport, backed by `reqwest`.
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod error;

pub use error::Error;

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use http::header::{CONNECTION, CONTENT_TYPE, HeaderValue};
use reqwest::Client;
use soapclient_transport::{SOAP_ACTION_HEADER, Transport, TransportRequest, TransportResponse};
use tracing::debug;
use url::Url;

/// Options for the HTTP transport.
#[derive(Clone, Debug, Default)]
pub struct HttpTransportOptions {
    /// Maximum time allowed to establish a connection.
    pub connect_timeout: Option<Duration>,

    /// Maximum time allowed for the whole round trip, body read included.
    pub request_timeout: Option<Duration>,

    /// Value of the `User-Agent` header, if any.
    pub user_agent: Option<String>,
}

/// HTTP transport sending each exchange as a single `POST`.
///
/// Connections are never kept alive: idle pooling is disabled and every
/// request asks the server to close the connection after replying.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Creates a new HTTP transport.
    ///
    /// # Errors
    ///
    /// This function will return an error if the underlying HTTP client
    /// cannot be built (for example when no TLS backend is available).
    pub fn new(options: HttpTransportOptions) -> Result<Self, Error> {
        let mut builder = Client::builder().pool_max_idle_per_host(0);

        if let Some(connect_timeout) = options.connect_timeout {
            builder = builder.connect_timeout(connect_timeout);
        }

        if let Some(request_timeout) = options.request_timeout {
            builder = builder.timeout(request_timeout);
        }

        if let Some(user_agent) = options.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder.build().map_err(Error::Build)?;

        Ok(Self { client })
    }

    /// Creates a new HTTP transport with default options.
    ///
    /// # Errors
    ///
    /// This function will return an error if the underlying HTTP client
    /// cannot be built.
    pub fn new_default() -> Result<Self, Error> {
        Self::new(HttpTransportOptions::default())
    }
}

#[async_trait]
impl Transport for HttpTransport {
    type Error = Error;

    async fn round_trip(&self, request: TransportRequest) -> Result<TransportResponse, Error> {
        let url = Url::parse(&request.address).map_err(|source| Error::InvalidAddress {
            address: request.address.clone(),
            source,
        })?;

        let content_type = HeaderValue::from_str(&request.content_type)
            .map_err(|_| Error::InvalidHeader("Content-Type"))?;
        let action = HeaderValue::from_str(&request.action)
            .map_err(|_| Error::InvalidHeader(SOAP_ACTION_HEADER))?;

        debug!(
            "posting {} bytes to {} (action: {})",
            request.body.len(),
            url,
            request.action
        );

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, content_type)
            .header(SOAP_ACTION_HEADER, action)
            .header(CONNECTION, "close")
            .body(request.body)
            .send()
            .await
            .map_err(Error::Request)?;

        let status = response.status();
        let body: Bytes = response.bytes().await.map_err(Error::Body)?;

        debug!("received {} bytes with status {}", body.len(), status);

        Ok(TransportResponse::new(status, body))
    }
}
