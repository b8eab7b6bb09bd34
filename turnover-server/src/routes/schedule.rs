//! Cleaning schedule endpoints

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use turnover_core::date::parse_iso_date;
use turnover_core::period::total_cleanings;
use turnover_core::{CleaningEvent, HalfMonthPeriod, cleaning_history, gap_alerts, upcoming_cleanings};

use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/cleanings", get(get_cleanings))
        .route("/api/history", get(get_history))
}

/// Optional `?today=YYYY-MM-DD`, defaulting to the server's local date
#[derive(Deserialize)]
pub struct TodayQuery {
    pub today: Option<String>,
}

impl TodayQuery {
    fn resolve(&self) -> Result<NaiveDate, AppError> {
        match self.today.as_deref() {
            Some(s) => parse_iso_date(s).map_err(|e| AppError::BadRequest(e.to_string())),
            None => Ok(chrono::Local::now().date_naive()),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CleaningsResponse {
    pub cleanings: Vec<CleaningEvent>,
    pub gap_alerts: Vec<CleaningEvent>,
    pub fetched_at: DateTime<Utc>,
}

/// GET /api/cleanings - Upcoming cleanings and near-term gap alerts
async fn get_cleanings(
    State(state): State<AppState>,
    Query(query): Query<TodayQuery>,
) -> Result<Json<CleaningsResponse>, AppError> {
    let today = query.resolve()?;
    let data = state.feed().load().await?;

    let cleanings = upcoming_cleanings(&data.reservations, today);
    let alerts = gap_alerts(&cleanings, state.gap_alert_days)
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(CleaningsResponse {
        cleanings,
        gap_alerts: alerts,
        fetched_at: data.fetched_at,
    }))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryResponse {
    pub periods: Vec<HalfMonthPeriod>,
    pub total_cleanings: usize,
}

/// GET /api/history - Past cleanings in half-month periods, most recent first
async fn get_history(
    State(state): State<AppState>,
    Query(query): Query<TodayQuery>,
) -> Result<Json<HistoryResponse>, AppError> {
    let today = query.resolve()?;
    let data = state.feed().load().await?;

    let periods = cleaning_history(&data.reservations, today, state.history_periods, state.locale);
    let total = total_cleanings(&periods);

    Ok(Json(HistoryResponse {
        periods,
        total_cleanings: total,
    }))
}
