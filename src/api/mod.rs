//! HTTP transport and the response envelope.
//!
//! Provides the JSON client used by every service, structured transport
//! error classification, and normalization of all outcomes into
//! [`Envelope`].

mod client;
mod envelope;
mod error;

pub use client::{ApiClient, RawResponse};
pub use envelope::{Envelope, WireEnvelope, STATUS_OK};
pub use error::ApiError;
