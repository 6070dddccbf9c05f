//! Shared application state: repositories, services and admin views, built once per process.

use crate::config::AppConfig;
use crate::entities::*;
use crate::repository::{AdminRepository, BelongsTo, Repository};
use crate::service::{
    BoardService, BookmarkService, EventService, NovelCategoryService, NovelIndexReviewService, UserService,
};
use crate::store::{Entity, MemoryStore, OnDelete, PgStore};
use axum::extract::FromRef;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

/// One repository per table.
#[derive(Clone)]
pub struct Repositories {
    pub users: Repository<User>,
    pub boards: Repository<Board>,
    pub categories: Repository<NovelCategory>,
    pub episodes: Repository<NovelIndex>,
    pub reviews: Repository<NovelIndexReview>,
    pub bookmarks: Repository<Bookmark>,
    pub events: Repository<Event>,
    pub files: Repository<FileEntity>,
    pub reports: Repository<Report>,
    pub emails: Repository<AuthEmail>,
    pub phones: Repository<AuthPhone>,
    pub payments: Repository<Payment>,
}

fn pg<E>(pool: &PgPool) -> Repository<E>
where
    E: Entity + for<'r> FromRow<'r, PgRow>,
{
    Repository::new(Arc::new(PgStore::<E>::new(pool.clone())))
}

fn memory<E: Entity>(store: MemoryStore<E>) -> Repository<E> {
    Repository::new(Arc::new(store))
}

impl Repositories {
    pub fn postgres(pool: &PgPool) -> Self {
        Repositories {
            users: pg(pool),
            boards: pg(pool),
            categories: pg(pool),
            episodes: pg(pool),
            reviews: pg(pool),
            bookmarks: pg(pool),
            events: pg(pool),
            files: pg(pool),
            reports: pg(pool),
            emails: pg(pool),
            phones: pg(pool),
            payments: pg(pool),
        }
    }

    /// Memory-backed, with the same `ON DELETE` actions as the PostgreSQL schema.
    pub fn in_memory() -> Self {
        use OnDelete::{Cascade, SetNull};

        let users = MemoryStore::<User>::new();
        let boards = MemoryStore::<Board>::new();
        let episodes = MemoryStore::<NovelIndex>::new();
        let reviews = MemoryStore::<NovelIndexReview>::new();
        let bookmarks = MemoryStore::<Bookmark>::new();
        let events = MemoryStore::<Event>::new();
        let reports = MemoryStore::<Report>::new();
        let emails = MemoryStore::<AuthEmail>::new();
        let phones = MemoryStore::<AuthPhone>::new();
        let payments = MemoryStore::<Payment>::new();

        boards.references(&users, "user_id", Cascade);
        episodes.references(&users, "user_id", SetNull);
        reviews.references(&users, "user_id", Cascade);
        reviews.references(&episodes, "novel_index_id", Cascade);
        bookmarks.references(&users, "user_id", Cascade);
        bookmarks.references(&episodes, "novel_index_id", Cascade);
        events.references(&users, "user_id", SetNull);
        reports.references(&users, "user_id", SetNull);
        emails.references(&users, "user_id", Cascade);
        phones.references(&users, "user_id", Cascade);
        payments.references(&users, "user_id", Cascade);

        Repositories {
            users: memory(users),
            boards: memory(boards),
            categories: Repository::in_memory(),
            episodes: memory(episodes),
            reviews: memory(reviews),
            bookmarks: memory(bookmarks),
            events: memory(events),
            files: Repository::in_memory(),
            reports: memory(reports),
            emails: memory(emails),
            phones: memory(phones),
            payments: memory(payments),
        }
    }
}

/// Admin views; each carries the relations its table lists show.
#[derive(Clone)]
pub struct AdminRepositories {
    pub users: AdminRepository<User>,
    pub boards: AdminRepository<Board>,
    pub categories: AdminRepository<NovelCategory>,
    pub episodes: AdminRepository<NovelIndex>,
    pub reviews: AdminRepository<NovelIndexReview>,
    pub bookmarks: AdminRepository<Bookmark>,
    pub events: AdminRepository<Event>,
    pub files: AdminRepository<FileEntity>,
    pub reports: AdminRepository<Report>,
    pub emails: AdminRepository<AuthEmail>,
    pub phones: AdminRepository<AuthPhone>,
    pub payments: AdminRepository<Payment>,
}

impl AdminRepositories {
    pub fn new(r: &Repositories) -> Self {
        let user = || BelongsTo::new("user", "user_id", r.users.clone());
        let episode = || BelongsTo::new("novelIndex", "novel_index_id", r.episodes.clone());
        AdminRepositories {
            users: AdminRepository::new(r.users.clone()),
            boards: AdminRepository::new(r.boards.clone()).include(user()),
            categories: AdminRepository::new(r.categories.clone()),
            episodes: AdminRepository::new(r.episodes.clone()).include(user()),
            reviews: AdminRepository::new(r.reviews.clone()).include(user()).include(episode()),
            bookmarks: AdminRepository::new(r.bookmarks.clone()).include(user()).include(episode()),
            events: AdminRepository::new(r.events.clone()).include(user()),
            files: AdminRepository::new(r.files.clone()),
            reports: AdminRepository::new(r.reports.clone()).include(user()),
            emails: AdminRepository::new(r.emails.clone()).include(user()),
            phones: AdminRepository::new(r.phones.clone()).include(user()),
            payments: AdminRepository::new(r.payments.clone()).include(user()),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    /// `None` when rows live in memory.
    pub pool: Option<PgPool>,
    pub repos: Repositories,
    pub admin: AdminRepositories,
    pub users: UserService,
    pub boards: BoardService,
    pub reviews: NovelIndexReviewService,
    pub bookmarks: BookmarkService,
    pub events: EventService,
    pub categories: NovelCategoryService,
}

impl AppState {
    /// PostgreSQL-backed when `pool` is given, in-memory otherwise.
    pub fn new(config: AppConfig, pool: Option<PgPool>) -> Self {
        let repos = match &pool {
            Some(p) => Repositories::postgres(p),
            None => Repositories::in_memory(),
        };
        let r = &repos;
        AppState {
            config: Arc::new(config),
            pool: pool.clone(),
            admin: AdminRepositories::new(r),
            users: UserService::new(r.users.clone(), r.payments.clone()),
            boards: BoardService::new(r.boards.clone(), r.users.clone()),
            reviews: NovelIndexReviewService::new(r.reviews.clone(), r.episodes.clone(), r.users.clone()),
            bookmarks: BookmarkService::new(r.bookmarks.clone(), r.episodes.clone(), r.users.clone()),
            events: EventService::new(r.events.clone()),
            categories: NovelCategoryService::new(r.categories.clone()),
            repos: repos.clone(),
        }
    }
}

impl FromRef<AppState> for Arc<AppConfig> {
    fn from_ref(state: &AppState) -> Self {
        Arc::clone(&state.config)
    }
}

macro_rules! admin_view {
    ($entity:ty, $field:ident) => {
        impl FromRef<AppState> for AdminRepository<$entity> {
            fn from_ref(state: &AppState) -> Self {
                state.admin.$field.clone()
            }
        }
    };
}

admin_view!(User, users);
admin_view!(Board, boards);
admin_view!(NovelCategory, categories);
admin_view!(NovelIndex, episodes);
admin_view!(NovelIndexReview, reviews);
admin_view!(Bookmark, bookmarks);
admin_view!(Event, events);
admin_view!(FileEntity, files);
admin_view!(Report, reports);
admin_view!(AuthEmail, emails);
admin_view!(AuthPhone, phones);
admin_view!(Payment, payments);

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn removing_a_user_applies_foreign_key_actions() {
        let repos = Repositories::in_memory();
        let user = repos
            .users
            .save(User::new("gone@novel.io".into(), "gone".into(), "hash".into(), None))
            .await
            .unwrap();
        let episode = repos
            .episodes
            .save(NovelIndex::new(Some(user.id), "ep".into(), "c".into(), 1))
            .await
            .unwrap();
        repos.boards.save(Board::new(user.id, "t".into(), "c".into())).await.unwrap();
        repos.bookmarks.save(Bookmark::new(user.id, episode.id, 1)).await.unwrap();

        assert_eq!(repos.users.bulk_delete(&[user.id]).await.unwrap(), vec![true]);
        assert!(repos.boards.find_all().await.unwrap().is_empty());
        assert!(repos.bookmarks.find_all().await.unwrap().is_empty());
        let orphan = repos.episodes.find_one(episode.id, false).await.unwrap().unwrap();
        assert!(orphan.user_id.is_none());
    }
}
