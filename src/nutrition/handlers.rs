use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use tracing::{info, instrument, warn};

use super::dto::{FoodParams, NutritionResult};
use crate::{
    error::{food_required, ApiError},
    state::AppState,
};

pub fn proxy_routes() -> Router<AppState> {
    Router::new().route("/api/nutrition", get(get_nutrition))
}

/// GET /api/nutrition?food=<name>
///
/// Always 200 once `food` is given; backend trouble is answered with mock data.
#[instrument(skip(state))]
pub async fn get_nutrition(
    State(state): State<AppState>,
    Query(params): Query<FoodParams>,
) -> Result<Json<NutritionResult>, ApiError> {
    let Some(food) = params.food() else {
        warn!("nutrition request without food");
        return Err(food_required());
    };

    let result = state.forwarder.fetch_nutrition(food).await;
    info!(%food, mock = result.message.is_some(), "nutrition proxied");
    Ok(Json(result))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::{app::build_app, state::AppState};

    async fn call(state: AppState, uri: &str) -> (StatusCode, Value) {
        let res = build_app(state)
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = res.status();
        let body = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn missing_food_is_bad_request() {
        let (status, body) = call(AppState::fake(), "/api/nutrition").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Food parameter is required"}));

        let (status, _) = call(AppState::fake(), "/api/nutrition?food=").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unreachable_backend_returns_mock() {
        let (status, body) = call(AppState::fake(), "/api/nutrition?food=apple").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["food"], "apple");
        assert_eq!(body["nutrition"]["calories"], 250.0);
        assert_eq!(body["nutrition"]["sodium"], 0.2);
        assert!(body["message"].as_str().unwrap().contains("mock data"));
    }

    #[tokio::test]
    async fn live_backend_payload_is_forwarded() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/nutrition"))
            .and(query_param("food", "apple, banana"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "food": "apple, banana",
                "items_count": 2,
                "nutrition": {"calories": 157, "protein": 1.6, "carbs": 40.5, "fat": 0.5, "fiber": 5.5,
                              "sugar": 28.5, "sodium": 0.002}
            })))
            .mount(&server)
            .await;

        let (status, body) = call(
            AppState::fake_with_backend(&server.uri()),
            "/api/nutrition?food=apple%2C%20banana",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["items_count"], 2);
        assert_eq!(body["nutrition"]["calories"], 157.0);
        assert!(body.get("message").is_none());
    }
}
