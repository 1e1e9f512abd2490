//! API routes for the Q&A server

pub mod ask;
pub mod reset;

use axum::{
    extract::DefaultBodyLimit,
    routing::post,
    Router,
};

use crate::server::state::AppState;

/// Build all API routes
pub fn api_routes(max_upload_size: usize) -> Router<AppState> {
    Router::new()
        // Upload + question - with larger body limit for the file part
        .route(
            "/ask",
            post(ask::ask).layer(DefaultBodyLimit::max(max_upload_size)),
        )
        // Clear the registry and backing index store
        .route("/reset", post(reset::reset))
}
