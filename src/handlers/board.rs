use super::parse_id;
use crate::entities::Board;
use crate::error::AppError;
use crate::extractors::CurrentUser;
use crate::message::Message;
use crate::response::ResultMessage;
use crate::service::{CreateBoardInput, UpdateBoardInput};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};

/// GET /api/boards
pub async fn fetch_boards(State(state): State<AppState>) -> Result<Json<Vec<Board>>, AppError> {
    tracing::info!("fetchBoards");
    Ok(Json(state.boards.find_all().await?))
}

/// GET /api/boards/mine
pub async fn fetch_login_user_boards(
    State(state): State<AppState>,
    CurrentUser(payload): CurrentUser,
) -> Result<Json<Vec<Board>>, AppError> {
    tracing::info!("{} - fetchLoginUserBoards", payload.nick_name);
    Ok(Json(state.boards.find_board(&payload).await?))
}

/// POST /api/boards
pub async fn create_board(
    State(state): State<AppState>,
    CurrentUser(payload): CurrentUser,
    Json(input): Json<CreateBoardInput>,
) -> Result<Json<Board>, AppError> {
    tracing::info!("{} - createBoard", payload.nick_name);
    Ok(Json(state.boards.create_board(payload.id, input).await?))
}

/// PATCH /api/boards
pub async fn update_board(
    State(state): State<AppState>,
    CurrentUser(payload): CurrentUser,
    Json(input): Json<UpdateBoardInput>,
) -> Result<Json<Board>, AppError> {
    tracing::info!("{} - updateBoard", payload.nick_name);
    Ok(Json(state.boards.update_board(payload.id, input).await?))
}

/// DELETE /api/boards/:id (soft)
pub async fn delete_board(
    State(state): State<AppState>,
    CurrentUser(payload): CurrentUser,
    Path(id_str): Path<String>,
) -> Result<Json<ResultMessage>, AppError> {
    tracing::info!("{} - deleteBoard", payload.nick_name);
    let message = state.boards.soft_delete(payload.id, parse_id(&id_str)?).await?;
    Ok(Json(ResultMessage::from_message(
        message == Message::BOARD_SOFT_DELETE_SUCCESSED,
        message,
    )))
}
