use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::job::MatchResult;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SessionCreated {
    pub session_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct BookmarkAdded {
    pub session_id: Uuid,
    pub count: usize,
}

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<SessionCreated>) {
    let session_id = state.bookmarks.create_session();
    info!("Opened bookmark session {session_id}");
    (StatusCode::CREATED, Json(SessionCreated { session_id }))
}

/// GET /api/v1/sessions/:id/bookmarks
pub async fn handle_list_bookmarks(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<MatchResult>>, AppError> {
    state
        .bookmarks
        .list(id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))
}

/// POST /api/v1/sessions/:id/bookmarks
pub async fn handle_add_bookmark(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(result): Json<MatchResult>,
) -> Result<(StatusCode, Json<BookmarkAdded>), AppError> {
    let count = state
        .bookmarks
        .append(id, result)
        .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))?;
    Ok((
        StatusCode::CREATED,
        Json(BookmarkAdded {
            session_id: id,
            count,
        }),
    ))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !state.bookmarks.remove_session(id) {
        return Err(AppError::NotFound(format!("Session {id} not found")));
    }
    info!("Closed bookmark session {id}");
    Ok(StatusCode::NO_CONTENT)
}
