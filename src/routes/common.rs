//! Common routes: health, readiness, version, OpenAPI document.

use crate::entities::*;
use crate::response::ResultMessage;
use crate::service::{
    CreateBoardInput, CreateBookmarkInput, CreateEventInput, CreateReviewInput, CreateUserInput, CreateUserOutput,
    NovelCategoryInput, UpdateBoardInput, UpdateEventInput, UpdatePwdInput, UpdateReviewInput, UpdateUserInput,
};
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(title = "content-platform"),
    components(schemas(
        ResultMessage,
        User,
        Board,
        NovelCategory,
        NovelIndex,
        NovelIndexReview,
        Bookmark,
        Event,
        FileEntity,
        Report,
        AuthEmail,
        AuthPhone,
        Payment,
        CreateUserInput,
        CreateUserOutput,
        UpdateUserInput,
        UpdatePwdInput,
        CreateBoardInput,
        UpdateBoardInput,
        CreateBookmarkInput,
        CreateReviewInput,
        UpdateReviewInput,
        CreateEventInput,
        UpdateEventInput,
        NovelCategoryInput,
    ))
)]
pub struct ApiDoc;

#[derive(Serialize)]
struct HealthBody {
    status: &'static str,
}

#[derive(Serialize)]
struct ReadyBody {
    status: &'static str,
    database: &'static str,
}

async fn health() -> Json<HealthBody> {
    Json(HealthBody { status: "ok" })
}

async fn ready(State(state): State<AppState>) -> Result<Json<ReadyBody>, (StatusCode, Json<ReadyBody>)> {
    let Some(pool) = &state.pool else {
        return Ok(Json(ReadyBody {
            status: "ok",
            database: "memory",
        }));
    };
    if sqlx::query("SELECT 1").fetch_optional(pool).await.is_err() {
        return Err((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ReadyBody {
                status: "degraded",
                database: "unavailable",
            }),
        ));
    }
    Ok(Json(ReadyBody {
        status: "ok",
        database: "ok",
    }))
}

async fn version() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// GET /health, /ready, /version, /openapi.json.
pub fn common_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/version", get(version))
        .route("/openapi.json", get(openapi))
}
