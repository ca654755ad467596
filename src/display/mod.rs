pub mod cards;
pub mod format;
pub mod handlers;
pub mod page;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::page_routes()
}
