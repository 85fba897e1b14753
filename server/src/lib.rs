//! Reference implementation of the Alaska bear service.
//!
//! Serves the same routes and quirks as the published container image so the
//! harness can run without docker:
//!
//! ```text
//! POST   /bear      create, body is the new id
//! GET    /bear      all bears
//! GET    /bear/{id} one bear, or the text EMPTY
//! PUT    /bear/{id} partial update
//! DELETE /bear      delete all bears
//! DELETE /bear/{id} delete one bear
//! GET    /info      service description
//! ```

pub mod error;
pub mod store;
pub mod validation;

use std::future::Future;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::Value;
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info};

pub use error::BearError;
pub use store::{Bear, BearStore, BearType, NewBear};

/// Body of a single-bear fetch for an id that does not exist.
pub const EMPTY_SENTINEL: &str = "EMPTY";

pub const INFO: &str = "Welcome to Alaska!
This is CRUD service for bears in alaska.
CRUD routes presented with REST naming notation:

POST\t\t\t/bear - create
GET\t\t\t/bear - read all bears
GET\t\t\t/bear/:id - read specific bear
PUT\t\t\t/bear/:id - update specific bear
DELETE\t\t\t/bear - delete all bears
DELETE\t\t\t/bear/:id - delete specific bear

Example of bear json: {\"bear_type\":\"BLACK\",\"bear_name\":\"mikhail\",\"bear_age\":17.5}.
Available types for bears are: POLAR, BROWN, BLACK and GUMMY.
";

const OK: &str = "OK";

pub type SharedStore = Arc<RwLock<BearStore>>;

pub fn app() -> Router {
    app_with_store(Arc::new(RwLock::new(BearStore::new())))
}

pub fn app_with_store(store: SharedStore) -> Router {
    Router::new()
        .route("/info", get(service_info))
        .route("/bear", get(list_bears).post(create_bear).delete(delete_all_bears))
        .route("/bear/{id}", get(get_bear).put(update_bear).delete(delete_bear))
        .with_state(store)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_until(listener, std::future::pending()).await
}

/// Serve until `shutdown` resolves, then drain in-flight requests.
pub async fn run_until<F>(listener: TcpListener, shutdown: F) -> Result<(), std::io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "alaska listening");
    }
    axum::serve(listener, app())
        .with_graceful_shutdown(shutdown)
        .await?;
    info!("alaska stopped");
    Ok(())
}

async fn service_info() -> &'static str {
    INFO
}

async fn list_bears(State(store): State<SharedStore>) -> Json<Vec<Bear>> {
    Json(store.read().await.list())
}

async fn create_bear(
    State(store): State<SharedStore>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<u64>, BearError> {
    let new = validation::decode_new(&json_body(&headers, &body)?)?;
    let id = store.write().await.create(new);
    debug!(id, "bear created");
    Ok(Json(id))
}

async fn get_bear(
    State(store): State<SharedStore>,
    Path(raw): Path<String>,
) -> Result<Response, BearError> {
    let id = parse_id(&raw)?;
    let store = store.read().await;
    Ok(match store.get(id) {
        Some(bear) => Json(bear.clone()).into_response(),
        None => EMPTY_SENTINEL.into_response(),
    })
}

async fn update_bear(
    State(store): State<SharedStore>,
    Path(raw): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<&'static str, BearError> {
    let id = parse_id(&raw)?;
    let patch = validation::decode_patch(&json_body(&headers, &body)?)?;
    store.write().await.update(id, patch)?;
    debug!(id, "bear updated");
    Ok(OK)
}

async fn delete_bear(
    State(store): State<SharedStore>,
    Path(raw): Path<String>,
) -> Result<&'static str, BearError> {
    let id = parse_id(&raw)?;
    store.write().await.remove(id)?;
    debug!(id, "bear deleted");
    Ok(OK)
}

async fn delete_all_bears(State(store): State<SharedStore>) -> &'static str {
    let mut store = store.write().await;
    let removed = store.len();
    store.clear();
    debug!(removed, "all bears deleted");
    OK
}

/// Only plain decimal digits name a bear; `+1`, `-1` and `1.0` do not.
fn parse_id(raw: &str) -> Result<u64, BearError> {
    let invalid = || BearError::InvalidId(raw.to_string());
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    raw.parse().map_err(|_| invalid())
}

/// Enforce a JSON content type and parse the body.
fn json_body(headers: &HeaderMap, body: &[u8]) -> Result<Value, BearError> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    let mime = content_type.split(';').next().unwrap_or_default().trim();
    if !mime.eq_ignore_ascii_case("application/json") {
        return Err(BearError::UnsupportedContentType(content_type.to_string()));
    }
    serde_json::from_slice(body).map_err(|e| BearError::MalformedJson(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn json_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json; charset=utf-8"));
        headers
    }

    #[test]
    fn bear_serializes_with_wire_keys() {
        let bear = Bear {
            bear_id: 1,
            bear_type: BearType::Black,
            bear_name: "BOB".to_string(),
            bear_age: 10.0,
        };
        let json = serde_json::to_value(&bear).unwrap();
        assert_eq!(json["bear_id"], 1);
        assert_eq!(json["bear_type"], "BLACK");
        assert_eq!(json["bear_name"], "BOB");
        assert_eq!(json["bear_age"], 10.0);
    }

    #[test]
    fn parse_id_accepts_integers_only() {
        assert_eq!(parse_id("66666").unwrap(), 66666);
        for bad in ["a", "{1: 1}", "[0]", "1.5", "", "+0", "-1", " 1", "99999999999999999999"] {
            assert_eq!(parse_id(bad).unwrap_err(), BearError::InvalidId(bad.to_string()));
        }
    }

    #[test]
    fn json_body_accepts_charset_parameter() {
        let value = json_body(&json_headers(), br#"{"bear_age": 1}"#).unwrap();
        assert_eq!(value["bear_age"], 1);
    }

    #[test]
    fn json_body_rejects_other_content_types() {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        assert!(matches!(
            json_body(&headers, b"{}"),
            Err(BearError::UnsupportedContentType(_))
        ));
        assert!(matches!(
            json_body(&HeaderMap::new(), b"{}"),
            Err(BearError::UnsupportedContentType(_))
        ));
    }

    #[test]
    fn json_body_rejects_malformed_json() {
        assert!(matches!(
            json_body(&json_headers(), b"{bear"),
            Err(BearError::MalformedJson(_))
        ));
    }
}
