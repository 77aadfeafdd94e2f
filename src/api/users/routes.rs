// User route definitions

use axum::{routing::get, Router};

use super::handler;
use crate::config::state::AppState;

/// Creates router with all user table endpoints
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handler::list_users_handler).post(handler::create_user_handler),
        )
        .route(
            "/{id}",
            get(handler::get_user_handler)
                .put(handler::update_user_handler)
                .delete(handler::delete_user_handler),
        )
}
