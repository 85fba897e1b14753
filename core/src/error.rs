//! Error types for the Alaska client and harness.
//!
//! # Design
//! HTTP error statuses are not errors at this layer; they come back as
//! `HttpResponse` values. What remains is the transport failing outright,
//! request/response bodies that do not (de)serialize, a status assertion
//! that did not hold, and the readiness probe giving up.

use std::time::Duration;

use crate::http::HttpMethod;

/// The request never produced an HTTP response.
#[derive(Debug, thiserror::Error)]
#[error("{method} {url}: {source}")]
pub struct TransportError {
    pub method: HttpMethod,
    pub url: String,
    #[source]
    pub source: ureq::Error,
}

/// Errors returned by `ApiClient` operations and response helpers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),
}

/// An observed status code did not satisfy the expectation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("STATUS CODE: {status}: {reason}")]
pub struct StatusMismatch {
    pub status: u16,
    pub reason: String,
    pub expected: u16,
    pub should_be_equal: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ReadinessError {
    #[error("Waited too long for the {base_url} to start accepting connections.")]
    Timeout { base_url: String, waited: Duration },
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be {expected}, got {value:?}")]
    InvalidVar {
        var: &'static str,
        expected: &'static str,
        value: String,
    },
}
