//! Raw reservation endpoint

use axum::{Json, Router, extract::State, routing::get};
use turnover_core::CalendarData;

use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/calendar", get(get_calendar))
}

/// GET /api/calendar - Reservations sorted by checkout, with the fetch time
async fn get_calendar(State(state): State<AppState>) -> Result<Json<CalendarData>, AppError> {
    let data = state.feed().load().await?;
    Ok(Json(data))
}
