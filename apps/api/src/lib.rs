//! Inkpress blog content API
//!
//! Library surface for the API server. `app` builds the full router so
//! integration tests can drive it without binding a socket.

pub mod config;
pub mod error;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod store;

pub use error::{ApiError, ApiResult, ErrorResponse};
pub use routes::AppState;

use axum::{routing::get, Router};

/// Build the application router
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .nest("/health", routes::health_router())
        .nest("/v1/api/categories", routes::categories_router(state.clone()))
        .nest("/v1/api/tags", routes::tags_router(state.clone()))
        .nest("/v1/api/blog_posts", routes::blog_posts_router(state.clone()))
        .nest("/v1/api/sections", routes::sections_router(state.clone()))
        .nest(
            "/v1/api/announcements",
            routes::announcements_router(state.clone()),
        )
        .nest("/v1/api/users", routes::users_router(state))
}

/// Root endpoint with a welcome message
async fn root() -> &'static str {
    "Welcome to Inkpress - Blog Content Management API"
}
