pub mod calendar;
pub mod schedule;

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;

use crate::state::AppState;

/// Message returned for any retrieval failure. Details go to the log only.
const FETCH_FAILED: &str = "Failed to fetch calendar data";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .merge(calendar::router())
        .merge(schedule::router())
}

async fn health() -> &'static str {
    "ok"
}

/// Standard API error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Errors returned by handlers
pub enum AppError {
    BadRequest(String),
    Internal(anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            AppError::Internal(err) => {
                tracing::error!(error = %err, "error fetching calendar");
                (StatusCode::INTERNAL_SERVER_ERROR, FETCH_FAILED.to_string())
            }
        };
        (status, Json(ErrorResponse { error })).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self::Internal(err.into())
    }
}
