// Fasum route definitions

use axum::{routing::get, Router};

use super::handler;
use crate::config::state::AppState;

/// Creates router with all fasum table endpoints
pub fn fasum_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handler::list_fasum_handler).post(handler::create_fasum_handler),
        )
        .route(
            "/{id}",
            get(handler::get_fasum_handler)
                .put(handler::update_fasum_handler)
                .delete(handler::delete_fasum_handler),
        )
}
