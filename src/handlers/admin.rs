//! Admin table handlers, generic over the entity. Each resource's view is picked from
//! `AppState` through `FromRef`.

use super::parse_id;
use crate::entities::{Event, NovelCategory};
use crate::error::AppError;
use crate::repository::{AdminRepository, Related};
use crate::service::{CreateEventInput, NovelCategoryInput, UpdateEventInput};
use crate::sql::Page;
use crate::state::AppState;
use crate::store::Entity;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

/// `?limit=&offset=` on list reads. Neither given: the whole table.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl PageQuery {
    fn page(&self) -> Option<Page> {
        if self.limit.is_none() && self.offset.is_none() {
            return None;
        }
        Some(Page::new(self.limit, self.offset))
    }
}

/// GET /admin/<res>/all
pub async fn find_all<E: Entity>(
    State(repo): State<AdminRepository<E>>,
    Query(q): Query<PageQuery>,
) -> Result<Json<Vec<Related<E>>>, AppError> {
    tracing::info!(table = E::TABLE.name, limit = ?q.limit, offset = ?q.offset, "admin - findAll");
    Ok(Json(repo.find_all(q.page()).await?))
}

/// GET /admin/<res>/:id, `null` when absent.
pub async fn find_one<E: Entity>(
    State(repo): State<AdminRepository<E>>,
    Path(id_str): Path<String>,
) -> Result<Json<Option<Related<E>>>, AppError> {
    tracing::info!(table = E::TABLE.name, "admin - findOne");
    let id = parse_id(&id_str)?;
    Ok(Json(repo.find_one(id).await?))
}

/// DELETE /admin/<res>/bulk with a JSON array of ids.
pub async fn bulk_delete<E: Entity>(
    State(repo): State<AdminRepository<E>>,
    Json(ids): Json<Vec<String>>,
) -> Result<Json<Vec<bool>>, AppError> {
    tracing::info!(table = E::TABLE.name, count = ids.len(), "admin - bulkDelete");
    let ids = ids.iter().map(|s| parse_id(s)).collect::<Result<Vec<_>, _>>()?;
    Ok(Json(repo.bulk_delete(&ids).await?))
}

/// PATCH /admin/<res>/:id/restore
pub async fn restore<E: Entity>(
    State(repo): State<AdminRepository<E>>,
    Path(id_str): Path<String>,
) -> Result<Json<bool>, AppError> {
    tracing::info!(table = E::TABLE.name, "admin - restore");
    let id = parse_id(&id_str)?;
    Ok(Json(repo.restore(id).await?))
}

/// POST /admin/event
pub async fn create_event(
    State(state): State<AppState>,
    Json(input): Json<CreateEventInput>,
) -> Result<Json<Event>, AppError> {
    tracing::info!("admin - createEvent");
    Ok(Json(state.events.create(None, input).await?))
}

/// PATCH /admin/event/:id
pub async fn update_event(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    Json(input): Json<UpdateEventInput>,
) -> Result<Json<Event>, AppError> {
    tracing::info!("admin - updateEvent");
    Ok(Json(state.events.update(parse_id(&id_str)?, input).await?))
}

/// POST /admin/novel-category
pub async fn create_novel_category(
    State(state): State<AppState>,
    Json(input): Json<NovelCategoryInput>,
) -> Result<Json<NovelCategory>, AppError> {
    tracing::info!("admin - createNovelCategory");
    Ok(Json(state.categories.create(input).await?))
}

/// PATCH /admin/novel-category/:id
pub async fn update_novel_category(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    Json(input): Json<NovelCategoryInput>,
) -> Result<Json<NovelCategory>, AppError> {
    tracing::info!("admin - updateNovelCategory");
    Ok(Json(state.categories.update(parse_id(&id_str)?, input).await?))
}
