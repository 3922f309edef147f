//! Assembles every route group into the application router.

use std::sync::Arc;

use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use tower_http::cors::CorsLayer;

use crate::config::AppConfig;
use crate::dashboard::{DashboardRouteState, dashboard_routes};
use crate::onboarding::{OnboardingManager, OnboardingRouteState, onboarding_routes};
use crate::proxy::{ProxyState, proxy_routes};
use crate::submission::{ProfileClient, ProfileSubmitter, submission_routes};

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "foodiet"
    }))
}

/// Router wired to the real HTTP submission client.
pub fn app(config: &AppConfig) -> Router {
    let submitter: Arc<dyn ProfileSubmitter> =
        Arc::new(ProfileClient::new(config.submission.clone()));
    app_with_submitter(config, submitter)
}

/// Router with a caller-supplied submitter.
///
/// The proxy sets its own CORS headers, so the permissive layer wraps only
/// the presentation API. Must be called within a Tokio runtime: it starts
/// the stale-session sweep.
pub fn app_with_submitter(config: &AppConfig, submitter: Arc<dyn ProfileSubmitter>) -> Router {
    let manager = Arc::new(OnboardingManager::new(
        Arc::clone(&submitter),
        config.transition_delay,
    ));
    manager.spawn_pruning(config.session_idle_timeout);

    let api = Router::new()
        .route("/health", get(health))
        .merge(onboarding_routes(OnboardingRouteState {
            manager: Arc::clone(&manager),
        }))
        .merge(dashboard_routes(DashboardRouteState { manager }))
        .merge(submission_routes(submitter))
        .layer(CorsLayer::permissive());

    api.merge(proxy_routes(ProxyState::new(
        config.submission.upstream_url(),
    )))
}
