use crate::entities::{Payment, User};
use crate::error::AppError;
use crate::extractors::CurrentUser;
use crate::message::Message;
use crate::response::ResultMessage;
use crate::service::{CreateUserInput, CreateUserOutput, UpdatePwdInput, UpdateUserInput};
use crate::state::AppState;
use axum::{extract::State, Json};

/// GET /api/user
pub async fn fetch_login_user(
    State(state): State<AppState>,
    CurrentUser(payload): CurrentUser,
) -> Result<Json<Option<User>>, AppError> {
    tracing::info!("{} - fetchLoginUser", payload.nick_name);
    Ok(Json(state.users.find_login_user(payload.id).await?))
}

/// GET /api/user/payments
pub async fn fetch_payments_in_user(
    State(state): State<AppState>,
    CurrentUser(payload): CurrentUser,
) -> Result<Json<Vec<Payment>>, AppError> {
    tracing::info!("{} - fetchPaymentsInUser", payload.nick_name);
    Ok(Json(state.users.find_payments(payload.id).await?))
}

/// POST /api/signup
pub async fn create_user(
    State(state): State<AppState>,
    Json(input): Json<CreateUserInput>,
) -> Result<Json<CreateUserOutput>, AppError> {
    tracing::info!("{} - createUser", input.nick_name);
    Ok(Json(state.users.create_user(input).await?))
}

/// PATCH /api/user/pwd
pub async fn update_user_pwd(
    State(state): State<AppState>,
    CurrentUser(payload): CurrentUser,
    Json(input): Json<UpdatePwdInput>,
) -> Result<Json<ResultMessage>, AppError> {
    tracing::info!("{} - updateUserPwd", payload.nick_name);
    let result = state.users.update_pwd(payload.id, &input.pwd).await?;
    Ok(Json(ResultMessage::new(
        result,
        Message::USER_UPDATE_PWD_SUCCESSED,
        Message::USER_UPDATE_PWD_FAILED,
    )))
}

/// PATCH /api/user
pub async fn update_login_user(
    State(state): State<AppState>,
    CurrentUser(payload): CurrentUser,
    Json(input): Json<UpdateUserInput>,
) -> Result<Json<ResultMessage>, AppError> {
    tracing::info!("{} - updateLoginUser", payload.nick_name);
    let result = state.users.update_login_user(payload.id, input).await?;
    Ok(Json(ResultMessage::new(
        result,
        Message::USER_UPDATE_INFO_SUCCESSED,
        Message::USER_UPDATE_INFO_FAILED,
    )))
}

/// DELETE /api/user (soft)
pub async fn delete_login_user(
    State(state): State<AppState>,
    CurrentUser(payload): CurrentUser,
) -> Result<Json<ResultMessage>, AppError> {
    tracing::info!("{} - deleteLoginUser", payload.nick_name);
    let result = state.users.soft_delete(payload.id).await?;
    Ok(Json(ResultMessage::new(
        result,
        Message::USER_SOFT_DELETE_SUCCESSED,
        Message::USER_SOFT_DELETE_FAILED,
    )))
}
