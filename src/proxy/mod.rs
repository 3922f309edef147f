//! Same-origin relay for `POST /api/create_profile`.
//!
//! Browsers that cannot call the external API cross-origin post here
//! instead. The body is checked for the required payload fields, forwarded
//! untouched, and the upstream answer is relayed with permissive CORS
//! headers.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::config::CREATE_PROFILE_PATH;
use crate::profile::REQUIRED_PAYLOAD_FIELDS;

/// Handler state: the HTTP client and the upstream endpoint.
#[derive(Clone)]
pub struct ProxyState {
    pub http: reqwest::Client,
    pub upstream_url: String,
}

impl ProxyState {
    pub fn new(upstream_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            upstream_url: upstream_url.into(),
        }
    }
}

/// Ways a proxied request can fail, each with its own status code.
#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("Missing or empty required field: {field}")]
    Validation { field: &'static str, value: Value },

    #[error("External API call failed: {status}")]
    Upstream {
        status: StatusCode,
        body: String,
    },

    #[error("Proxy request failed: {0}")]
    Internal(String),
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ProxyError::Validation { field, value } => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({
                    "error": "Validation failed",
                    "details": format!("Missing or empty required field: {field}"),
                    "field": field,
                    "value": value,
                }),
            ),
            ProxyError::Upstream { status, body } => (
                *status,
                serde_json::json!({
                    "error": "External API call failed",
                    "details": format!(
                        "{} {}",
                        status.as_u16(),
                        status.canonical_reason().unwrap_or_default()
                    ),
                    "response": body,
                }),
            ),
            ProxyError::Internal(details) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                serde_json::json!({
                    "error": "Proxy request failed",
                    "details": details,
                }),
            ),
        };
        with_cors((status, Json(body)).into_response())
    }
}

/// First required field that is absent, null, or an empty string.
pub fn first_missing_field(body: &Value) -> Option<(&'static str, Value)> {
    REQUIRED_PAYLOAD_FIELDS.into_iter().find_map(|field| {
        match body.get(field) {
            None => Some((field, Value::Null)),
            Some(Value::Null) => Some((field, Value::Null)),
            Some(Value::String(s)) if s.is_empty() => Some((field, Value::String(String::new()))),
            Some(_) => None,
        }
    })
}

/// POST /api/create_profile
async fn create_profile(State(state): State<ProxyState>, body: Bytes) -> Response {
    match relay(&state, body).await {
        Ok(result) => with_cors((StatusCode::OK, Json(result)).into_response()),
        Err(e) => e.into_response(),
    }
}

async fn relay(state: &ProxyState, body: Bytes) -> Result<Value, ProxyError> {
    let parsed: Value = serde_json::from_slice(&body).map_err(|e| {
        error!(error = %e, "Proxy received an unparseable body");
        ProxyError::Internal(e.to_string())
    })?;
    debug!(fields = ?parsed.as_object().map(|o| o.keys().cloned().collect::<Vec<_>>()), "Proxy received profile");

    if let Some((field, value)) = first_missing_field(&parsed) {
        warn!(field, "Proxy rejected profile with missing field");
        return Err(ProxyError::Validation { field, value });
    }

    info!(url = %state.upstream_url, "Forwarding profile to external API");
    let response = state
        .http
        .post(&state.upstream_url)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body)
        .send()
        .await
        .map_err(|e| {
            error!(error = %e, "External API unreachable");
            ProxyError::Internal(e.to_string())
        })?;

    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| ProxyError::Internal(e.to_string()))?;
    info!(status = status.as_u16(), "External API responded");

    if !status.is_success() {
        warn!(status = status.as_u16(), response = %text, "External API returned an error");
        return Err(ProxyError::Upstream { status, body: text });
    }

    Ok(serde_json::from_str(&text).unwrap_or_else(|_| serde_json::json!({ "message": text })))
}

/// OPTIONS /api/create_profile
async fn preflight() -> Response {
    with_cors(StatusCode::OK.into_response())
}

fn with_cors(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("POST, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
    response
}

/// Build the proxy routes.
pub fn proxy_routes(state: ProxyState) -> Router {
    Router::new()
        .route(CREATE_PROFILE_PATH, post(create_profile).options(preflight))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_body() -> Value {
        serde_json::json!({
            "key": "a55Z4Sk8",
            "name": "Jane",
            "lastname": "Doe",
            "picture": "[picture]",
            "location": "Austin, TX",
            "age": 29,
            "gender": "F",
            "height": 178,
            "weight": 72
        })
    }

    #[test]
    fn complete_body_passes() {
        assert!(first_missing_field(&full_body()).is_none());
    }

    #[test]
    fn reports_first_missing_field_in_order() {
        let mut body = full_body();
        let obj = body.as_object_mut().unwrap();
        obj.remove("weight");
        obj.insert("lastname".to_string(), Value::String(String::new()));
        let (field, value) = first_missing_field(&body).unwrap();
        assert_eq!(field, "lastname");
        assert_eq!(value, Value::String(String::new()));
    }

    #[test]
    fn null_counts_as_missing_but_zero_does_not() {
        let mut body = full_body();
        body["age"] = Value::Null;
        assert_eq!(first_missing_field(&body).unwrap().0, "age");

        let mut body = full_body();
        body["height"] = serde_json::json!(0);
        assert!(first_missing_field(&body).is_none());
    }

    #[test]
    fn non_object_body_misses_key() {
        assert_eq!(first_missing_field(&serde_json::json!([1, 2])).unwrap().0, "key");
    }
}
