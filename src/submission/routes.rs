//! REST endpoint exposing the submission contract directly.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;

use super::client::{ProfileSubmitter, SubmitResponse};
use crate::error::SubmissionError;
use crate::profile::{Measurements, UserProfile};

/// Body for `POST /api/profile/submit`: the profile fields plus optional
/// measurements, flattened into one object.
#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    #[serde(flatten)]
    pub profile: UserProfile,
    #[serde(flatten)]
    pub measurements: Measurements,
}

impl SubmitRequest {
    /// Parse a raw body. Anything that is not a JSON object is a validation
    /// failure rather than a transport-level rejection.
    pub fn from_body(body: &[u8]) -> Result<Self, SubmissionError> {
        serde_json::from_slice(body).map_err(|e| SubmissionError::MalformedBody {
            reason: e.to_string(),
        })
    }
}

/// POST /api/profile/submit
///
/// Always 200: the body is the discriminated success/failure result.
async fn submit_profile(
    State(submitter): State<Arc<dyn ProfileSubmitter>>,
    body: Bytes,
) -> Json<SubmitResponse> {
    let result = match SubmitRequest::from_body(&body) {
        Ok(request) => {
            submitter
                .submit(&request.profile, &request.measurements)
                .await
        }
        Err(e) => {
            tracing::warn!(error = %e, details = %e.details(), "Unreadable profile body");
            Err(e)
        }
    };
    Json(SubmitResponse::from(result))
}

pub fn submission_routes(submitter: Arc<dyn ProfileSubmitter>) -> Router {
    Router::new()
        .route("/api/profile/submit", post(submit_profile))
        .with_state(submitter)
}
