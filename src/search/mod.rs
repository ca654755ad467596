pub mod controller;
pub mod handlers;
pub mod source;
pub mod suggest;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::suggestion_routes()
}
