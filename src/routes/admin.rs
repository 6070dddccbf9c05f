//! Admin table routes: one generic set per resource, plus writes for admin-managed content.

use crate::entities::*;
use crate::extractors::require_admin_key;
use crate::handlers::admin;
use crate::repository::AdminRepository;
use crate::state::AppState;
use crate::store::Entity;
use axum::{
    extract::FromRef,
    middleware,
    routing::{delete, get, patch, post},
    Router,
};

/// `/all`, `/bulk`, `/:id` and, for soft-deletable tables, `/:id/restore`.
fn resource<E>() -> Router<AppState>
where
    E: Entity,
    AdminRepository<E>: FromRef<AppState>,
{
    let router = Router::new()
        .route("/all", get(admin::find_all::<E>))
        .route("/bulk", delete(admin::bulk_delete::<E>))
        .route("/:id", get(admin::find_one::<E>));
    if E::TABLE.soft_delete {
        router.route("/:id/restore", patch(admin::restore::<E>))
    } else {
        router
    }
}

/// All admin resources under `/admin`, guarded by the admin key when one is configured.
pub fn admin_routes(state: AppState) -> Router<AppState> {
    let events = resource::<Event>()
        .route("/", post(admin::create_event))
        .route("/:id", patch(admin::update_event));
    let categories = resource::<NovelCategory>()
        .route("/", post(admin::create_novel_category))
        .route("/:id", patch(admin::update_novel_category));

    Router::new()
        .nest("/user", resource::<User>())
        .nest("/board", resource::<Board>())
        .nest("/bookmark", resource::<Bookmark>())
        .nest("/novel-category", categories)
        .nest("/novel-index", resource::<NovelIndex>())
        .nest("/novel-index-review", resource::<NovelIndexReview>())
        .nest("/event", events)
        .nest("/file", resource::<FileEntity>())
        .nest("/report", resource::<Report>())
        .nest("/email", resource::<AuthEmail>())
        .nest("/phone", resource::<AuthPhone>())
        .nest("/payment", resource::<Payment>())
        .route_layer(middleware::from_fn_with_state(state.config.clone(), require_admin_key))
}
