use axum::{extract::Query, routing::get, Json, Router};

use super::suggest::suggest;
use crate::{
    nutrition::dto::{SuggestionParams, SuggestionsResponse},
    state::AppState,
};

pub fn suggestion_routes() -> Router<AppState> {
    Router::new().route("/api/suggestions", get(suggestions))
}

/// GET /api/suggestions?q=<text>
pub async fn suggestions(Query(p): Query<SuggestionParams>) -> Json<SuggestionsResponse> {
    Json(SuggestionsResponse {
        suggestions: suggest(&p.q).into_iter().map(str::to_string).collect(),
    })
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    use super::SuggestionsResponse;
    use crate::{app::build_app, state::AppState};

    async fn fetch(uri: &str) -> SuggestionsResponse {
        let res = build_app(AppState::fake())
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn returns_matching_foods() {
        let got = fetch("/api/suggestions?q=Pot").await;
        assert_eq!(got.suggestions, vec!["potato", "sweet potato"]);
    }

    #[tokio::test]
    async fn missing_query_is_empty() {
        assert!(fetch("/api/suggestions").await.suggestions.is_empty());
        assert!(fetch("/api/suggestions?q=%20").await.suggestions.is_empty());
    }
}
