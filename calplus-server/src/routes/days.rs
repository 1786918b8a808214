//! Resolved per-day views and month markers

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    routing::get,
};
use calplus_core::month::MonthView;
use calplus_core::storage::EventStorage;
use calplus_core::visibility::{self, LevelFilter};
use calplus_core::{CalendarDate, Level};
use serde::Deserialize;

use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/days/{date}", get(day_view))
        .route("/months/{year}/{month}/markers", get(month_markers))
}

#[derive(Deserialize)]
pub struct DayQuery {
    /// Only list active events of this level
    pub level: Option<u8>,
}

/// GET /days/:date - Active/completed events, stats and colors for one day
async fn day_view(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Query(query): Query<DayQuery>,
) -> Result<Response, AppError> {
    let date: CalendarDate = date.parse()?;
    let filter = match query.level {
        Some(value) => LevelFilter::Only(Level::new(value)?),
        None => LevelFilter::All,
    };

    let events = state.storage().load().await?;
    let view = visibility::resolve_day(&events, date, filter);

    Ok(Json(view).into_response())
}

/// GET /months/:year/:month/markers - Marker colors per day of a month
async fn month_markers(
    State(state): State<AppState>,
    Path((year, month)): Path<(i32, u32)>,
) -> Result<Response, AppError> {
    let month = MonthView::new(year, month)?;
    let events = state.storage().load().await?;
    let markers = visibility::month_markers(&events, month);

    Ok(Json(markers).into_response())
}
