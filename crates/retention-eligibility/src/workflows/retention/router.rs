use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::evaluation::EvaluationError;
use super::service::{Clock, RetentionDesk, RetentionError};

/// Body of the "verify eligibility" action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EligibilityQuery {
    #[serde(default)]
    pub identifier: String,
}

/// Router builder exposing the eligibility check and dataset status.
pub fn eligibility_router<C>(desk: Arc<RetentionDesk<C>>) -> Router
where
    C: Clock + 'static,
{
    Router::new()
        .route("/api/v1/eligibility/check", post(check_handler::<C>))
        .route("/api/v1/eligibility/dataset", get(dataset_handler::<C>))
        .with_state(desk)
}

pub(crate) async fn check_handler<C>(
    State(desk): State<Arc<RetentionDesk<C>>>,
    axum::Json(query): axum::Json<EligibilityQuery>,
) -> Response
where
    C: Clock + 'static,
{
    match desk.check(&query.identifier) {
        Ok(result) => (StatusCode::OK, axum::Json(result.view())).into_response(),
        Err(RetentionError::Evaluation(EvaluationError::EmptyInput)) => {
            let payload = json!({
                "level": "warning",
                "error": EvaluationError::EmptyInput.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(RetentionError::Evaluation(EvaluationError::NotFound { identifier })) => {
            let message = EvaluationError::NotFound {
                identifier: identifier.clone(),
            }
            .to_string();
            let payload = json!({
                "level": "error",
                "identifier": identifier,
                "error": message,
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(RetentionError::Dataset(error)) => {
            let status = if error.is_not_available() {
                StatusCode::SERVICE_UNAVAILABLE
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            let payload = json!({
                "level": "error",
                "error": error.to_string(),
            });
            (status, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn dataset_handler<C>(State(desk): State<Arc<RetentionDesk<C>>>) -> Response
where
    C: Clock + 'static,
{
    let status = desk.dataset_status();
    let code = if status.available {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (code, axum::Json(status)).into_response()
}
