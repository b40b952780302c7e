//! A scripted, in-process implementation of the SOAP transport.
//!
//! Outcomes are queued up front and handed out in order, one per round trip.
//! Every request is recorded so tests can inspect what was sent.
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod error;

pub use error::Error;

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use http::StatusCode;
use soapclient_transport::{Transport, TransportRequest, TransportResponse};
use tokio::sync::Mutex;
use tracing::debug;

#[derive(Debug)]
enum Outcome {
    Respond(TransportResponse),
    Fail(String),
}

/// A mock implementation of the `Transport` trait. Used for testing.
#[derive(Clone, Debug, Default)]
pub struct MockTransport {
    outcomes: Arc<Mutex<VecDeque<Outcome>>>,
    requests: Arc<Mutex<Vec<TransportRequest>>>,
}

impl MockTransport {
    /// Creates a new instance of `MockTransport` with nothing scripted.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a response with the given status and body.
    pub async fn push_response(&self, status: StatusCode, body: impl Into<Bytes> + Send) {
        self.outcomes
            .lock()
            .await
            .push_back(Outcome::Respond(TransportResponse::new(status, body.into())));
    }

    /// Queues a `200 OK` response with the given body.
    pub async fn push_ok(&self, body: impl Into<Bytes> + Send) {
        self.push_response(StatusCode::OK, body).await;
    }

    /// Queues a transport failure.
    pub async fn push_error(&self, message: impl Into<String> + Send) {
        self.outcomes
            .lock()
            .await
            .push_back(Outcome::Fail(message.into()));
    }

    /// Returns every request received so far, oldest first.
    pub async fn requests(&self) -> Vec<TransportRequest> {
        self.requests.lock().await.clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    type Error = Error;

    async fn round_trip(&self, request: TransportRequest) -> Result<TransportResponse, Error> {
        let address = request.address.clone();
        debug!("mock round trip to {} (action: {})", address, request.action);

        self.requests.lock().await.push(request);

        match self.outcomes.lock().await.pop_front() {
            Some(Outcome::Respond(response)) => Ok(response),
            Some(Outcome::Fail(message)) => Err(Error::Scripted(message)),
            None => Err(Error::Exhausted(address)),
        }
    }
}
