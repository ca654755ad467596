use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{error, info, instrument, warn};

use super::calorie_ninjas::{summarize, LookupError};
use super::BackendState;
use crate::{
    error::{api_error, food_required, ApiError},
    nutrition::dto::{FoodParams, Nutrition, NutritionResult},
};

const ERROR_SNIPPET_CHARS: usize = 200;

pub fn nutrition_routes() -> Router<BackendState> {
    Router::new().route("/nutrition", get(get_nutrition).post(post_nutrition))
}

/// GET /nutrition?food=<query>
pub async fn get_nutrition(
    State(state): State<BackendState>,
    Query(params): Query<FoodParams>,
) -> Result<Json<NutritionResult>, ApiError> {
    lookup(&state, params.food()).await
}

/// POST /nutrition with `{"food": "..."}`; a `food` query parameter wins.
pub async fn post_nutrition(
    State(state): State<BackendState>,
    Query(params): Query<FoodParams>,
    body: Option<Json<FoodParams>>,
) -> Result<Json<NutritionResult>, ApiError> {
    let from_body = body.as_ref().and_then(|Json(b)| b.food());
    lookup(&state, params.food().or(from_body)).await
}

#[instrument(skip(state))]
async fn lookup(state: &BackendState, food: Option<&str>) -> Result<Json<NutritionResult>, ApiError> {
    let Some(food) = food else {
        warn!("nutrition lookup without food");
        return Err(food_required());
    };

    if state.mock_mode() {
        info!(%food, "no CALORIENINJAS_API_KEY, answering with mock data");
        return Ok(Json(mock_without_key(food)));
    }

    let items = state.ninjas.search(food).await.map_err(|e| {
        error!(error = %e, %food, "calorieninjas lookup failed");
        lookup_error(e)
    })?;

    if items.is_empty() {
        return Err(api_error(
            StatusCode::NOT_FOUND,
            format!("No nutrition data found for \"{food}\""),
        ));
    }

    info!(%food, items = items.len(), "nutrition found");
    Ok(Json(summarize(food, &items)))
}

fn lookup_error(e: LookupError) -> ApiError {
    match e {
        LookupError::Upstream { status, body } => {
            let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
            let snippet: String = body.chars().take(ERROR_SNIPPET_CHARS).collect();
            api_error(status, format!("API request failed: {snippet}"))
        }
        LookupError::Transport(e) => {
            api_error(StatusCode::INTERNAL_SERVER_ERROR, format!("Request error: {e}"))
        }
        LookupError::Decode(e) => {
            api_error(StatusCode::INTERNAL_SERVER_ERROR, format!("Internal error: {e}"))
        }
    }
}

fn mock_without_key(food: &str) -> NutritionResult {
    NutritionResult {
        food: food.to_string(),
        serving_size: None,
        items_count: None,
        nutrition: Nutrition {
            calories: 250.0,
            protein: 10.0,
            carbs: 30.0,
            fat: 8.0,
            fiber: 5.0,
            ..Default::default()
        },
        message: Some(
            "Using mock data. Set CALORIENINJAS_API_KEY environment variable for real data."
                .into(),
        ),
    }
}
