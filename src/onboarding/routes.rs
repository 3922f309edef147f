//! REST endpoints driving the onboarding wizard.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use uuid::Uuid;

use super::manager::OnboardingManager;
use super::state::OnboardingStep;
use crate::error::OnboardingError;
use crate::profile::{FieldUpdate, HEALTH_TARGETS};

/// Shared state for onboarding routes.
#[derive(Clone)]
pub struct OnboardingRouteState {
    pub manager: Arc<OnboardingManager>,
}

impl IntoResponse for OnboardingError {
    fn into_response(self) -> Response {
        let status = match self {
            OnboardingError::SessionNotFound(_) => StatusCode::NOT_FOUND,
            OnboardingError::StepIncomplete { .. }
            | OnboardingError::SubmissionInFlight
            | OnboardingError::Transitioning
            | OnboardingError::AlreadyCompleted
            | OnboardingError::NotCompleted => StatusCode::CONFLICT,
            OnboardingError::Interrupted(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(serde_json::json!({"error": self.to_string()}))).into_response()
    }
}

/// GET /api/onboarding/steps
async fn list_steps() -> impl IntoResponse {
    Json(OnboardingStep::catalog())
}

/// GET /api/targets
async fn list_targets() -> impl IntoResponse {
    Json(&HEALTH_TARGETS)
}

/// POST /api/onboarding/sessions
async fn create_session(State(state): State<OnboardingRouteState>) -> impl IntoResponse {
    let snapshot = state.manager.create_session().await;
    (StatusCode::CREATED, Json(snapshot))
}

/// GET /api/onboarding/sessions/{id}
async fn get_session(
    State(state): State<OnboardingRouteState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, OnboardingError> {
    Ok(Json(state.manager.snapshot(id).await?))
}

/// PATCH /api/onboarding/sessions/{id}/profile
///
/// Body: `{"field": "age", "value": "29"}`.
async fn update_field(
    State(state): State<OnboardingRouteState>,
    Path(id): Path<Uuid>,
    Json(update): Json<FieldUpdate>,
) -> Result<impl IntoResponse, OnboardingError> {
    Ok(Json(state.manager.update_field(id, update).await?))
}

/// POST /api/onboarding/sessions/{id}/advance
///
/// On the last step this submits the profile and waits for the outcome.
async fn advance(
    State(state): State<OnboardingRouteState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, OnboardingError> {
    Ok(Json(state.manager.advance(id).await?))
}

/// POST /api/onboarding/sessions/{id}/retreat
async fn retreat(
    State(state): State<OnboardingRouteState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, OnboardingError> {
    Ok(Json(state.manager.retreat(id).await?))
}

/// Build the onboarding REST routes.
pub fn onboarding_routes(state: OnboardingRouteState) -> Router {
    Router::new()
        .route("/api/onboarding/steps", get(list_steps))
        .route("/api/targets", get(list_targets))
        .route("/api/onboarding/sessions", post(create_session))
        .route("/api/onboarding/sessions/{id}", get(get_session))
        .route("/api/onboarding/sessions/{id}/profile", patch(update_field))
        .route("/api/onboarding/sessions/{id}/advance", post(advance))
        .route("/api/onboarding/sessions/{id}/retreat", post(retreat))
        .with_state(state)
}
