pub mod dto;
pub mod endpoint;
pub mod handlers;
pub mod proxy;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::proxy_routes()
}
