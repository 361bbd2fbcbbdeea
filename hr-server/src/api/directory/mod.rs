//! Employee Directory API

mod handler;

use axum::{Router, routing::get};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/directory", routes())
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::search))
        .route(
            "/batch",
            axum::routing::post(handler::add_many)
                .patch(handler::update_many)
                .delete(handler::delete_many),
        )
        .route("/{id}", get(handler::get_by_id).put(handler::replace))
}
