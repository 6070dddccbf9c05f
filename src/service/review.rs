use super::validation::{RequestValidator, Validate, RATING_MAX, RATING_MIN};
use super::UserService;
use crate::entities::{NovelIndex, NovelIndexReview, User};
use crate::error::AppError;
use crate::message::Message;
use crate::repository::Repository;
use crate::store::FindOptions;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

const CONTENTS_MAX: usize = 1_000;

#[derive(Clone, Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewInput {
    pub episode_id: Uuid,
    pub contents: String,
    pub rating: i32,
}

impl Validate for CreateReviewInput {
    fn validate(&self) -> Result<(), AppError> {
        RequestValidator::text("contents", &self.contents, CONTENTS_MAX)?;
        RequestValidator::range("rating", self.rating.into(), RATING_MIN.into(), RATING_MAX.into())
    }
}

/// Targets the caller's review of `episode_id`.
#[derive(Clone, Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReviewInput {
    pub episode_id: Uuid,
    pub contents: Option<String>,
    pub rating: Option<i32>,
}

impl Validate for UpdateReviewInput {
    fn validate(&self) -> Result<(), AppError> {
        RequestValidator::optional_text("contents", self.contents.as_deref(), CONTENTS_MAX)?;
        if let Some(rating) = self.rating {
            RequestValidator::range("rating", rating.into(), RATING_MIN.into(), RATING_MAX.into())?;
        }
        Ok(())
    }
}

impl UpdateReviewInput {
    fn apply(self, review: &mut NovelIndexReview) {
        if let Some(contents) = self.contents {
            review.contents = contents;
        }
        if let Some(rating) = self.rating {
            review.rating = rating;
        }
    }
}

#[derive(Clone)]
pub struct NovelIndexReviewService {
    reviews: Repository<NovelIndexReview>,
    episodes: Repository<NovelIndex>,
    users: Repository<User>,
}

impl NovelIndexReviewService {
    pub fn new(
        reviews: Repository<NovelIndexReview>,
        episodes: Repository<NovelIndex>,
        users: Repository<User>,
    ) -> Self {
        NovelIndexReviewService {
            reviews,
            episodes,
            users,
        }
    }

    pub async fn create_review(&self, user_id: Uuid, input: CreateReviewInput) -> Result<NovelIndexReview, AppError> {
        input.validate()?;
        let user = UserService::check_valid_user(self.users.find_one(user_id, false).await?)?;
        let episode = self
            .episodes
            .find_one(input.episode_id, false)
            .await?
            .ok_or(AppError::Conflict(Message::NOVEL_INDEX_UNVALID))?;
        self.reviews
            .save(NovelIndexReview::new(user.id, episode.id, input.contents, input.rating))
            .await
    }

    pub async fn update_review(&self, user_id: Uuid, input: UpdateReviewInput) -> Result<NovelIndexReview, AppError> {
        input.validate()?;
        UserService::check_valid_user(self.users.find_one(user_id, false).await?)?;
        let options = FindOptions::new()
            .filter("novel_index_id", input.episode_id)
            .filter("user_id", user_id);
        let mut review = self
            .reviews
            .find_by(&options)
            .await?
            .ok_or(AppError::Conflict(Message::NOVEL_INDEX_UNVALID))?;
        input.apply(&mut review);
        self.reviews.save(review).await
    }

    /// `false` unless the review is the caller's and still live.
    pub async fn soft_delete(&self, user_id: Uuid, review_id: Uuid) -> Result<bool, AppError> {
        let owned = self
            .reviews
            .find_by(&FindOptions::by_id(review_id).filter("user_id", user_id))
            .await?;
        match owned {
            Some(review) => Ok(self.reviews.soft_delete(review.id).await? > 0),
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixture {
        svc: NovelIndexReviewService,
        reviews: Repository<NovelIndexReview>,
        user: User,
        episode: NovelIndex,
    }

    async fn fixture() -> Fixture {
        let users: Repository<User> = Repository::in_memory();
        let episodes: Repository<NovelIndex> = Repository::in_memory();
        let reviews: Repository<NovelIndexReview> = Repository::in_memory();
        let user = users
            .save(User::new("r@novel.io".into(), "reader".into(), "hash".into(), None))
            .await
            .unwrap();
        let episode = episodes
            .save(NovelIndex::new(None, "ep 1".into(), "once".into(), 1))
            .await
            .unwrap();
        Fixture {
            svc: NovelIndexReviewService::new(reviews.clone(), episodes, users),
            reviews,
            user,
            episode,
        }
    }

    fn create(episode_id: Uuid, rating: i32) -> CreateReviewInput {
        CreateReviewInput {
            episode_id,
            contents: "good".into(),
            rating,
        }
    }

    #[tokio::test]
    async fn create_review_checks_user_then_episode() {
        let f = fixture().await;
        let err = f.svc.create_review(Uuid::new_v4(), create(f.episode.id, 5)).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(Message::USER_UNVALID)));

        let err = f.svc.create_review(f.user.id, create(Uuid::new_v4(), 5)).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(Message::NOVEL_INDEX_UNVALID)));
        assert!(f.reviews.find_all().await.unwrap().is_empty());

        let review = f.svc.create_review(f.user.id, create(f.episode.id, 4)).await.unwrap();
        assert_eq!(review.user_id, f.user.id);
        assert_eq!(review.novel_index_id, f.episode.id);
        assert_eq!(review.rating, 4);
    }

    #[tokio::test]
    async fn rating_outside_range_is_rejected() {
        let f = fixture().await;
        let err = f.svc.create_review(f.user.id, create(f.episode.id, 6)).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        let err = f.svc.create_review(f.user.id, create(f.episode.id, 0)).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn update_without_review_is_novel_index_unvalid() {
        let f = fixture().await;
        let input = UpdateReviewInput {
            episode_id: Uuid::new_v4(),
            contents: None,
            rating: Some(5),
        };
        let err = f.svc.update_review(f.user.id, input).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(Message::NOVEL_INDEX_UNVALID)));
    }

    #[tokio::test]
    async fn update_changes_only_callers_review() {
        let f = fixture().await;
        let mine = f.svc.create_review(f.user.id, create(f.episode.id, 3)).await.unwrap();
        let input = UpdateReviewInput {
            episode_id: f.episode.id,
            contents: None,
            rating: Some(5),
        };
        let updated = f.svc.update_review(f.user.id, input.clone()).await.unwrap();
        assert_eq!(updated.id, mine.id);
        assert_eq!(updated.rating, 5);
        assert_eq!(updated.contents, "good");

        let err = f.svc.update_review(Uuid::new_v4(), input).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(Message::USER_UNVALID)));
    }

    #[tokio::test]
    async fn soft_deleted_user_cannot_update_review() {
        let f = fixture().await;
        let review = f.svc.create_review(f.user.id, create(f.episode.id, 3)).await.unwrap();
        f.svc.users.soft_delete(f.user.id).await.unwrap();

        let input = UpdateReviewInput {
            episode_id: f.episode.id,
            contents: None,
            rating: Some(5),
        };
        let err = f.svc.update_review(f.user.id, input).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(Message::USER_UNVALID)));
        assert_eq!(f.reviews.find_one(review.id, false).await.unwrap().unwrap().rating, 3);
    }

    #[tokio::test]
    async fn soft_delete_reports_affected() {
        let f = fixture().await;
        let review = f.svc.create_review(f.user.id, create(f.episode.id, 3)).await.unwrap();
        assert!(!f.svc.soft_delete(Uuid::new_v4(), review.id).await.unwrap());
        assert!(f.reviews.find_one(review.id, false).await.unwrap().is_some());

        assert!(f.svc.soft_delete(f.user.id, review.id).await.unwrap());
        assert!(!f.svc.soft_delete(f.user.id, review.id).await.unwrap());
        assert!(!f.svc.soft_delete(f.user.id, Uuid::new_v4()).await.unwrap());
    }
}
