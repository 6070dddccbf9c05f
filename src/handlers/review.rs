use super::parse_id;
use crate::entities::NovelIndexReview;
use crate::error::AppError;
use crate::extractors::CurrentUser;
use crate::message::Message;
use crate::response::ResultMessage;
use crate::service::{CreateReviewInput, UpdateReviewInput};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};

/// POST /api/reviews
pub async fn create_episode_review(
    State(state): State<AppState>,
    CurrentUser(payload): CurrentUser,
    Json(input): Json<CreateReviewInput>,
) -> Result<Json<NovelIndexReview>, AppError> {
    tracing::info!("{} - createEpisodeReview", payload.nick_name);
    Ok(Json(state.reviews.create_review(payload.id, input).await?))
}

/// PATCH /api/reviews
pub async fn update_episode_review(
    State(state): State<AppState>,
    CurrentUser(payload): CurrentUser,
    Json(input): Json<UpdateReviewInput>,
) -> Result<Json<NovelIndexReview>, AppError> {
    tracing::info!("{} - updateEpisodeReview", payload.nick_name);
    Ok(Json(state.reviews.update_review(payload.id, input).await?))
}

/// DELETE /api/reviews/:id (soft)
pub async fn delete_episode_review(
    State(state): State<AppState>,
    CurrentUser(payload): CurrentUser,
    Path(id_str): Path<String>,
) -> Result<Json<ResultMessage>, AppError> {
    tracing::info!("{} - deleteEpisodeReview", payload.nick_name);
    let result = state.reviews.soft_delete(payload.id, parse_id(&id_str)?).await?;
    Ok(Json(ResultMessage::new(
        result,
        Message::NOVEL_INDEX_REVIEW_SOFT_DELETE_SUCCESSED,
        Message::NOVEL_INDEX_REVIEW_SOFT_DELETE_FAILED,
    )))
}
