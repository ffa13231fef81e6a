use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use retention_eligibility::workflows::retention::{eligibility_router, Clock, RetentionDesk};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_operational_routes<C>(desk: Arc<RetentionDesk<C>>) -> axum::Router
where
    C: Clock + 'static,
{
    eligibility_router(desk)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Ready once the listener is bound and the contract base loaded; a missing
/// spreadsheet keeps the portal permanently unready.
pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let listening = state.readiness.load(std::sync::atomic::Ordering::Relaxed);

    let (status, label) = if !listening {
        (StatusCode::SERVICE_UNAVAILABLE, "initializing")
    } else if state.source.dataset().is_err() {
        (StatusCode::SERVICE_UNAVAILABLE, "dataset_unavailable")
    } else {
        (StatusCode::OK, "ready")
    };

    (status, Json(json!({ "status": label })))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
