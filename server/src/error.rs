use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Reasons the service refuses a request.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BearError {
    #[error("invalid {field}: {reason}")]
    InvalidField {
        field: &'static str,
        reason: &'static str,
    },
    #[error("bear_id is assigned by the service")]
    IdNotAllowed,
    #[error("unknown field {0:?}")]
    UnknownField(String),
    #[error("missing field {0}")]
    MissingField(&'static str),
    #[error("request body must be a JSON object")]
    NotAnObject,
    #[error("unsupported content type {0:?}")]
    UnsupportedContentType(String),
    #[error("malformed JSON: {0}")]
    MalformedJson(String),
    #[error("invalid bear id {0:?}")]
    InvalidId(String),
    #[error("bear {0} not found")]
    NotFound(u64),
}

impl BearError {
    pub fn status(&self) -> StatusCode {
        match self {
            BearError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for BearError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}
