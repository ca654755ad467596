use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::Html,
    routing::get,
    Router,
};
use tracing::{info, instrument};

use super::page::render_page;
use crate::{
    nutrition::{dto::FoodParams, endpoint::EndpointResolver},
    search::{controller::SearchController, source::HttpNutritionSource},
    state::AppState,
};

pub fn page_routes() -> Router<AppState> {
    Router::new().route("/", get(search_page))
}

/// GET /?food=<term>
///
/// Runs one search through a fresh controller and renders the outcome.
#[instrument(skip(state, headers))]
pub async fn search_page(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<FoodParams>,
) -> Html<String> {
    let mut controller = SearchController::new();

    if let Some(food) = params.food.as_deref() {
        controller.input(food);
        let resolver = EndpointResolver::from_request(&state.config.api, &headers);
        let phase = if resolver.is_same_origin_proxy() {
            controller.search(&state.forwarder).await
        } else {
            let source = HttpNutritionSource::new(state.http.clone(), resolver);
            controller.search(&source).await
        };
        info!(?phase, "search page rendered");
    }

    Html(render_page(&controller))
}
