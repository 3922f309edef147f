//! REST endpoint for the dashboard view.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use uuid::Uuid;

use super::DashboardView;
use crate::error::OnboardingError;
use crate::onboarding::OnboardingManager;

#[derive(Clone)]
pub struct DashboardRouteState {
    pub manager: Arc<OnboardingManager>,
}

#[derive(Debug, Deserialize)]
struct DashboardQuery {
    session: Option<Uuid>,
}

/// GET /api/dashboard?session={id}
///
/// Without a session the view is anonymous. With one, the session must
/// have finished onboarding.
async fn get_dashboard(
    State(state): State<DashboardRouteState>,
    Query(query): Query<DashboardQuery>,
) -> Result<impl IntoResponse, OnboardingError> {
    let profile = match query.session {
        Some(id) => Some(state.manager.completed_profile(id).await?),
        None => None,
    };
    Ok(Json(DashboardView::now(profile.as_ref())))
}

pub fn dashboard_routes(state: DashboardRouteState) -> Router {
    Router::new()
        .route("/api/dashboard", get(get_dashboard))
        .with_state(state)
}
