use super::parse_id;
use crate::entities::Bookmark;
use crate::error::AppError;
use crate::extractors::CurrentUser;
use crate::message::Message;
use crate::repository::Related;
use crate::response::ResultMessage;
use crate::service::CreateBookmarkInput;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};

/// GET /api/bookmarks
pub async fn fetch_bookmarks(State(state): State<AppState>) -> Result<Json<Vec<Related<Bookmark>>>, AppError> {
    tracing::info!("fetchBookmarks");
    Ok(Json(state.bookmarks.find_all().await?))
}

/// POST /api/bookmarks
pub async fn create_bookmark(
    State(state): State<AppState>,
    CurrentUser(payload): CurrentUser,
    Json(input): Json<CreateBookmarkInput>,
) -> Result<Json<Bookmark>, AppError> {
    tracing::info!("{} - createBookmark", payload.nick_name);
    Ok(Json(state.bookmarks.create(payload.id, input).await?))
}

/// DELETE /api/bookmarks/:id (soft)
pub async fn delete_bookmark(
    State(state): State<AppState>,
    CurrentUser(payload): CurrentUser,
    Path(id_str): Path<String>,
) -> Result<Json<ResultMessage>, AppError> {
    tracing::info!("{} - deleteBookmark", payload.nick_name);
    let result = state.bookmarks.delete(payload.id, parse_id(&id_str)?).await?;
    Ok(Json(ResultMessage::new(
        result,
        Message::BOOKMARK_SOFT_DELETE_SUCCESSED,
        Message::BOOKMARK_SOFT_DELETE_FAILED,
    )))
}
