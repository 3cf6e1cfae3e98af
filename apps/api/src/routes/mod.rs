pub mod health;
pub mod sessions;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};

use crate::search::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Search API
        .route("/api/v1/search", post(handlers::handle_manual_search))
        .route(
            "/api/v1/search/resume",
            post(handlers::handle_resume_search)
                .layer(DefaultBodyLimit::max(handlers::MAX_RESUME_BYTES)),
        )
        .route("/api/v1/salary", get(handlers::handle_salary))
        // Bookmark sessions
        .route("/api/v1/sessions", post(sessions::handle_create_session))
        .route("/api/v1/sessions/:id", delete(sessions::handle_delete_session))
        .route(
            "/api/v1/sessions/:id/bookmarks",
            get(sessions::handle_list_bookmarks).post(sessions::handle_add_bookmark),
        )
        .with_state(state)
}
