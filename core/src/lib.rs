//! Client and contract layer for the Alaska bear service.
//!
//! # Overview
//! `ApiClient` maps the service's CRUD routes onto HTTP requests and returns
//! the raw responses. Scenarios then check them with
//! [`validate_response_code`] and compare bodies against expectations built
//! from [`BearFields`], which encode the service's normalization rules.
//!
//! # Design
//! - `ApiClient` is stateless apart from its base URL and transport.
//! - Each operation has a `build_*` form that returns an `HttpRequest`, so
//!   the I/O boundary stays explicit; a [`Transport`] executes it.
//! - 4xx/5xx responses are data, not errors. Only transport failures are
//!   `Err`.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod readiness;
pub mod transport;
pub mod types;
pub mod validate;

pub use client::ApiClient;
pub use config::HarnessConfig;
pub use error::{ApiError, ConfigError, ReadinessError, StatusMismatch, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, EMPTY_SENTINEL};
pub use readiness::{wait_until_ready, DEFAULT_POLL_INTERVAL};
pub use transport::{Transport, UreqTransport};
pub use types::{Bear, BearFields, BearType};
pub use validate::{assert_response_code, validate_response_code};
