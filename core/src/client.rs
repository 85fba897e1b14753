//! Typed client for the Alaska bear service.
//!
//! # Design
//! `ApiClient` holds only a `base_url` and a transport and carries no mutable
//! state between calls. Every operation is split into a pure `build_*` method
//! that produces an `HttpRequest` and an executing method that hands it to the
//! transport. Responses are returned unmodified: a 400 or 404 is a successful
//! call from the client's point of view.

use std::fmt::Display;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::Serialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::{Transport, UreqTransport};

const BEAR_PATH: &str = "/bear";
const INFO_PATH: &str = "/info";
const JSON_CONTENT_TYPE: &str = "application/json";

/// Bytes that cannot appear raw inside one path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Client for the bear CRUD routes.
#[derive(Debug, Clone)]
pub struct ApiClient<T = UreqTransport> {
    base_url: String,
    transport: T,
}

impl ApiClient<UreqTransport> {
    pub fn new(base_url: &str) -> Self {
        Self::with_transport(base_url, UreqTransport::new())
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn with_transport(base_url: &str, transport: T) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `POST /bear`. Extra headers are appended verbatim; a caller-supplied
    /// `content-type` replaces the JSON default.
    pub fn build_create<F: Serialize + ?Sized>(
        &self,
        fields: &F,
        headers: &[(&str, &str)],
    ) -> Result<HttpRequest, ApiError> {
        let mut request = self.json_request(HttpMethod::Post, self.url(BEAR_PATH), fields)?;
        if headers.iter().any(|(name, _)| name.eq_ignore_ascii_case("content-type")) {
            request.headers.clear();
        }
        request
            .headers
            .extend(headers.iter().map(|(name, value)| (name.to_string(), value.to_string())));
        Ok(request)
    }

    pub fn build_fetch_metadata(&self) -> HttpRequest {
        self.bare_request(HttpMethod::Get, self.url(INFO_PATH))
    }

    pub fn build_fetch_one(&self, id: impl Display) -> HttpRequest {
        self.bare_request(HttpMethod::Get, self.bear_url(id))
    }

    pub fn build_fetch_all(&self) -> HttpRequest {
        self.bare_request(HttpMethod::Get, self.url(BEAR_PATH))
    }

    pub fn build_update_one<F: Serialize + ?Sized>(
        &self,
        id: impl Display,
        fields: &F,
    ) -> Result<HttpRequest, ApiError> {
        self.json_request(HttpMethod::Put, self.bear_url(id), fields)
    }

    pub fn build_delete_one(&self, id: impl Display) -> HttpRequest {
        self.bare_request(HttpMethod::Delete, self.bear_url(id))
    }

    pub fn build_delete_all(&self) -> HttpRequest {
        self.bare_request(HttpMethod::Delete, self.url(BEAR_PATH))
    }

    pub fn create<F: Serialize + ?Sized>(
        &self,
        fields: &F,
        headers: &[(&str, &str)],
    ) -> Result<HttpResponse, ApiError> {
        let request = self.build_create(fields, headers)?;
        self.send(request)
    }

    pub fn fetch_metadata(&self) -> Result<HttpResponse, ApiError> {
        self.send(self.build_fetch_metadata())
    }

    pub fn fetch_one(&self, id: impl Display) -> Result<HttpResponse, ApiError> {
        self.send(self.build_fetch_one(id))
    }

    pub fn fetch_all(&self) -> Result<HttpResponse, ApiError> {
        self.send(self.build_fetch_all())
    }

    pub fn update_one<F: Serialize + ?Sized>(
        &self,
        id: impl Display,
        fields: &F,
    ) -> Result<HttpResponse, ApiError> {
        let request = self.build_update_one(id, fields)?;
        self.send(request)
    }

    pub fn delete_one(&self, id: impl Display) -> Result<HttpResponse, ApiError> {
        self.send(self.build_delete_one(id))
    }

    pub fn delete_all(&self) -> Result<HttpResponse, ApiError> {
        self.send(self.build_delete_all())
    }

    fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        Ok(self.transport.execute(request)?)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Ids are sent as given, percent-encoded into a single path segment.
    fn bear_url(&self, id: impl Display) -> String {
        let segment = id.to_string();
        let segment = utf8_percent_encode(&segment, PATH_SEGMENT);
        format!("{}{BEAR_PATH}/{segment}", self.base_url)
    }

    fn bare_request(&self, method: HttpMethod, url: String) -> HttpRequest {
        HttpRequest {
            method,
            url,
            headers: Vec::new(),
            body: None,
        }
    }

    fn json_request<F: Serialize + ?Sized>(
        &self,
        method: HttpMethod,
        url: String,
        fields: &F,
    ) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(fields).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method,
            url,
            headers: vec![("content-type".to_string(), JSON_CONTENT_TYPE.to_string())],
            body: Some(body),
        })
    }
}
