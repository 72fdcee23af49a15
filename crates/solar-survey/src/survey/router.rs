use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tracing::{error, warn};

use super::domain::SurveyId;
use super::repository::SurveyRepository;
use super::service::{SurveyService, SurveyServiceError};
use super::validation::ValidationError;

/// Router builder exposing the survey endpoints.
pub fn survey_router<R>(service: Arc<SurveyService<R>>) -> Router
where
    R: SurveyRepository + 'static,
{
    Router::new()
        .route("/api/survey", get(list_handler::<R>))
        .route("/api/survey/submit", post(submit_handler::<R>))
        .route(
            "/api/survey/:survey_id",
            get(fetch_handler::<R>).delete(delete_handler::<R>),
        )
        .with_state(service)
}

pub(crate) async fn submit_handler<R>(
    State(service): State<Arc<SurveyService<R>>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response
where
    R: SurveyRepository + 'static,
{
    let Json(body) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            warn!(reason = %rejection.body_text(), "unreadable survey payload");
            return error_response(ValidationError::MalformedBody.into());
        }
    };

    match run_blocking(service, move |service| service.submit_json(body)).await {
        Ok(receipt) => (StatusCode::CREATED, Json(receipt.result)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn list_handler<R>(State(service): State<Arc<SurveyService<R>>>) -> Response
where
    R: SurveyRepository + 'static,
{
    match run_blocking(service, |service| service.list()).await {
        Ok(records) => (StatusCode::OK, Json(records)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn fetch_handler<R>(
    State(service): State<Arc<SurveyService<R>>>,
    Path(survey_id): Path<String>,
) -> Response
where
    R: SurveyRepository + 'static,
{
    let id = SurveyId(survey_id);
    match run_blocking(service, move |service| service.get(&id)).await {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn delete_handler<R>(
    State(service): State<Arc<SurveyService<R>>>,
    Path(survey_id): Path<String>,
) -> Response
where
    R: SurveyRepository + 'static,
{
    let id = SurveyId(survey_id);
    match run_blocking(service, move |service| service.remove(&id)).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err),
    }
}

/// Store calls hit the filesystem, so they run on the blocking pool.
async fn run_blocking<R, T, F>(
    service: Arc<SurveyService<R>>,
    operation: F,
) -> Result<T, SurveyServiceError>
where
    R: SurveyRepository + 'static,
    T: Send + 'static,
    F: FnOnce(&SurveyService<R>) -> Result<T, SurveyServiceError> + Send + 'static,
{
    tokio::task::spawn_blocking(move || operation(&service))
        .await
        .map_err(|err| SurveyServiceError::Worker(err.to_string()))?
}

fn error_response(err: SurveyServiceError) -> Response {
    match err {
        SurveyServiceError::Validation(error) => {
            let mut payload = json!({ "error": error.to_string() });
            if let Some(field) = error.field() {
                payload["field"] = json!(field);
            }
            (StatusCode::BAD_REQUEST, Json(payload)).into_response()
        }
        SurveyServiceError::NotFound(_) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
        SurveyServiceError::Repository(_)
        | SurveyServiceError::RandomSourceUnavailable
        | SurveyServiceError::Worker(_) => {
            error!(error = %err, "survey request failed");
            let payload = json!({ "error": err.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}
