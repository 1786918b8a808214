//! Whole-collection load/save endpoints

use axum::{Json, Router, extract::State, routing::get};
use calplus_core::Record;
use calplus_core::storage::EventStorage;
use serde::{Deserialize, Serialize};

use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/collection", get(load_collection).post(save_collection))
        // Paths used by the browser front ends
        .route("/api/events", get(load_collection).post(save_collection))
        .route("/api/todos", get(load_collection).post(save_collection))
}

/// Acknowledgement returned after a successful save
#[derive(Serialize, Deserialize)]
pub struct SaveAck {
    pub status: String,
}

/// GET /collection - The full event collection (`[]` if nothing saved yet)
async fn load_collection(State(state): State<AppState>) -> Result<Json<Vec<Record>>, AppError> {
    let records = state.storage().load().await?;
    Ok(Json(records))
}

/// POST /collection - Replace the persisted collection wholesale.
/// Any JSON array is accepted; elements that are not events are stored as sent.
async fn save_collection(
    State(state): State<AppState>,
    Json(records): Json<Vec<Record>>,
) -> Result<Json<SaveAck>, AppError> {
    state.storage().save(&records).await?;

    Ok(Json(SaveAck {
        status: "success".to_string(),
    }))
}
