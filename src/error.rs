use axum::{http::StatusCode, Json};
use serde::{Deserialize, Serialize};

/// Failure of a single nutrition lookup.
#[derive(Debug, thiserror::Error)]
pub enum NutritionError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("backend returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("unusable response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Wire shape of every error response: `{"error": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
}

pub type ApiError = (StatusCode, Json<ErrorBody>);

pub fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
}

pub const FOOD_REQUIRED: &str = "Food parameter is required";

pub fn food_required() -> ApiError {
    api_error(StatusCode::BAD_REQUEST, FOOD_REQUIRED)
}
