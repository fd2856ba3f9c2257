use std::sync::Arc;
use axum::{Router, middleware, routing::get};
use crate::{app_state::AppState, authentication::auth::auth_middleware, board_controller::BoardController};

pub const ROUTER_PATH: &str = "/api/board";

pub fn get_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            ROUTER_PATH,
            get(BoardController::get_all)
                .post(BoardController::insert)
                .put(BoardController::update)
                .delete(BoardController::cancel),
        )
        .route(
            format!("{}/:task_id", ROUTER_PATH).as_str(),
            get(BoardController::get)
                .put(BoardController::update)
                .delete(BoardController::cancel),
        )
        .layer(middleware::from_fn_with_state(app_state.clone(), auth_middleware))
        .with_state(app_state)
}
