//! A minimal SOAP 1.1 client.
//!
//! Each call wraps a serde-serializable request in an envelope, sends it
//! through a [`Transport`](soapclient_transport::Transport) and decodes the
//! reply into the caller's response type, surfacing SOAP faults as errors.
//!
//! Header blocks are neither sent nor read by the client.
//!
//! # Example
//!
//! ```ignore
//! use serde::{Deserialize, Serialize};
//! use soapclient::Client;
//! use soapclient_transport_http::HttpTransport;
//!
//! #[derive(Serialize)]
//! struct GetStatus {
//!     #[serde(rename = "ID")]
//!     id: u32,
//! }
//!
//! #[derive(Deserialize)]
//! struct StatusResponse {
//!     #[serde(rename = "State")]
//!     state: String,
//! }
//!
//! let client = Client::new("http://localhost:8080/status", HttpTransport::new_default()?);
//! let response: StatusResponse = client.call("GetStatus", &GetStatus { id: 42 }).await?;
//! ```
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod client;
pub mod envelope;
mod error;
mod skip_none;

pub use client::Client;
pub use envelope::{Body, Envelope, Fault, Header};
pub use error::{Error, Result};
