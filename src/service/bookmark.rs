use super::validation::{RequestValidator, Validate};
use super::UserService;
use crate::entities::{Bookmark, NovelIndex, User};
use crate::error::AppError;
use crate::message::Message;
use crate::repository::{BelongsTo, Include, Related, Repository};
use crate::store::FindOptions;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Clone, Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookmarkInput {
    pub novel_index_id: Uuid,
    pub page: i32,
}

impl Validate for CreateBookmarkInput {
    fn validate(&self) -> Result<(), AppError> {
        RequestValidator::range("page", self.page.into(), 0, i32::MAX.into())
    }
}

#[derive(Clone)]
pub struct BookmarkService {
    bookmarks: Repository<Bookmark>,
    episodes: Repository<NovelIndex>,
    users: Repository<User>,
    includes: Vec<Arc<dyn Include<Bookmark>>>,
}

impl BookmarkService {
    pub fn new(bookmarks: Repository<Bookmark>, episodes: Repository<NovelIndex>, users: Repository<User>) -> Self {
        let includes: Vec<Arc<dyn Include<Bookmark>>> = vec![
            Arc::new(BelongsTo::new("user", "user_id", users.clone())),
            Arc::new(BelongsTo::new("novelIndex", "novel_index_id", episodes.clone())),
        ];
        BookmarkService {
            bookmarks,
            episodes,
            users,
            includes,
        }
    }

    /// Live bookmarks with their user and episode.
    pub async fn find_all(&self) -> Result<Vec<Related<Bookmark>>, AppError> {
        self.bookmarks
            .find_all_with(&FindOptions::new(), &self.includes)
            .await
    }

    /// Restores a soft-deleted duplicate instead of inserting a second row.
    pub async fn create(&self, user_id: Uuid, input: CreateBookmarkInput) -> Result<Bookmark, AppError> {
        input.validate()?;
        let user = UserService::check_valid_user(self.users.find_one(user_id, false).await?)?;
        let episode = self
            .episodes
            .find_one(input.novel_index_id, false)
            .await?
            .ok_or(AppError::Conflict(Message::NOVEL_INDEX_UNVALID))?;

        let duplicate = FindOptions::new()
            .filter("user_id", user.id)
            .filter("novel_index_id", episode.id)
            .filter("page", input.page)
            .with_deleted();
        if let Some(mut existing) = self.bookmarks.find_by(&duplicate).await? {
            if existing.delete_at.is_none() {
                return Err(AppError::Conflict(Message::BOOKMARK_ALREADY_EXIST));
            }
            self.bookmarks.restore(existing.id).await?;
            existing.delete_at = None;
            return Ok(existing);
        }

        self.bookmarks
            .save(Bookmark::new(user.id, episode.id, input.page))
            .await
    }

    /// The bookmark must belong to the caller.
    pub async fn delete(&self, user_id: Uuid, bookmark_id: Uuid) -> Result<bool, AppError> {
        let owned = FindOptions::by_id(bookmark_id).filter("user_id", user_id);
        let bookmark = self
            .bookmarks
            .find_by(&owned)
            .await?
            .ok_or(AppError::Conflict(Message::BOOKMARK_UNVALID))?;
        Ok(self.bookmarks.soft_delete(bookmark.id).await? > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixture {
        svc: BookmarkService,
        bookmarks: Repository<Bookmark>,
        user: User,
        episode: NovelIndex,
    }

    async fn fixture() -> Fixture {
        let users: Repository<User> = Repository::in_memory();
        let episodes: Repository<NovelIndex> = Repository::in_memory();
        let bookmarks: Repository<Bookmark> = Repository::in_memory();
        let user = users
            .save(User::new("b@novel.io".into(), "reader".into(), "hash".into(), None))
            .await
            .unwrap();
        let episode = episodes
            .save(NovelIndex::new(None, "ep 1".into(), "once".into(), 1))
            .await
            .unwrap();
        Fixture {
            svc: BookmarkService::new(bookmarks.clone(), episodes, users),
            bookmarks,
            user,
            episode,
        }
    }

    fn input(episode: &NovelIndex, page: i32) -> CreateBookmarkInput {
        CreateBookmarkInput {
            novel_index_id: episode.id,
            page,
        }
    }

    #[tokio::test]
    async fn create_then_duplicate_is_conflict() {
        let f = fixture().await;
        let first = f.svc.create(f.user.id, input(&f.episode, 3)).await.unwrap();
        assert!(first.is_boolean);
        let err = f.svc.create(f.user.id, input(&f.episode, 3)).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(Message::BOOKMARK_ALREADY_EXIST)));
        f.svc.create(f.user.id, input(&f.episode, 4)).await.unwrap();
        assert_eq!(f.bookmarks.find_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn deleted_duplicate_is_restored() {
        let f = fixture().await;
        let first = f.svc.create(f.user.id, input(&f.episode, 3)).await.unwrap();
        assert!(f.svc.delete(f.user.id, first.id).await.unwrap());
        assert!(f.bookmarks.find_all().await.unwrap().is_empty());

        let again = f.svc.create(f.user.id, input(&f.episode, 3)).await.unwrap();
        assert_eq!(again.id, first.id);
        assert!(again.delete_at.is_none());
        assert_eq!(f.bookmarks.find_all_by(&FindOptions::new().with_deleted()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn create_requires_user_and_episode() {
        let f = fixture().await;
        let err = f.svc.create(Uuid::new_v4(), input(&f.episode, 1)).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(Message::USER_UNVALID)));
        let ghost = NovelIndex::new(None, "x".into(), "x".into(), 9);
        let err = f.svc.create(f.user.id, input(&ghost, 1)).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(Message::NOVEL_INDEX_UNVALID)));
    }

    #[tokio::test]
    async fn delete_requires_ownership() {
        let f = fixture().await;
        let mark = f.svc.create(f.user.id, input(&f.episode, 3)).await.unwrap();
        let err = f.svc.delete(Uuid::new_v4(), mark.id).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(Message::BOOKMARK_UNVALID)));
        assert_eq!(f.bookmarks.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn find_all_joins_user_and_episode() {
        let f = fixture().await;
        f.svc.create(f.user.id, input(&f.episode, 3)).await.unwrap();
        let all = f.svc.find_all().await.unwrap();
        assert_eq!(all.len(), 1);
        let json = serde_json::to_value(&all[0]).unwrap();
        assert_eq!(json["user"]["email"], "b@novel.io");
        assert_eq!(json["novelIndex"]["title"], "ep 1");
        assert_eq!(json["page"], 3);
    }
}
