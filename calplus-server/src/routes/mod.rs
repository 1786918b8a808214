pub mod collection;
pub mod days;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use calplus_core::PlannerError;
use serde::{Deserialize, Serialize};

/// Standard API error response
#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Convert calplus errors to HTTP responses
pub struct AppError(PlannerError);

impl AppError {
    fn status(&self) -> StatusCode {
        match &self.0 {
            PlannerError::EventNotFound(_) => StatusCode::NOT_FOUND,
            err if err.is_invalid_input() => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "Request failed");
        }
        let body = Json(ErrorResponse {
            error: self.0.to_string(),
        });
        (status, body).into_response()
    }
}

impl From<PlannerError> for AppError {
    fn from(err: PlannerError) -> Self {
        Self(err)
    }
}
