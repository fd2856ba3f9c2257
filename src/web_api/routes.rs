pub mod board_routes;
pub mod health_routes;

use axum::Router;
use crate::app_state::SharedState;

pub fn map_routes(app_state: SharedState) -> Router {
    Router::new()
        .merge(health_routes::get_router())
        .merge(board_routes::get_router(app_state))
}
