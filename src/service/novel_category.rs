use super::validation::{RequestValidator, Validate};
use crate::entities::NovelCategory;
use crate::error::AppError;
use crate::message::Message;
use crate::repository::Repository;
use crate::store::FindOptions;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct NovelCategoryInput {
    pub name: String,
}

impl Validate for NovelCategoryInput {
    fn validate(&self) -> Result<(), AppError> {
        RequestValidator::text("name", &self.name, 50)
    }
}

#[derive(Clone)]
pub struct NovelCategoryService {
    categories: Repository<NovelCategory>,
}

impl NovelCategoryService {
    pub fn new(categories: Repository<NovelCategory>) -> Self {
        NovelCategoryService { categories }
    }

    /// Deleted categories keep their name reserved so a restore never yields two live ones.
    async fn name_taken(&self, name: &str, except: Option<Uuid>) -> Result<bool, AppError> {
        let found = self
            .categories
            .find_by(&FindOptions::new().filter("name", name).with_deleted())
            .await?;
        Ok(found.is_some_and(|c| Some(c.id) != except))
    }

    pub async fn create(&self, input: NovelCategoryInput) -> Result<NovelCategory, AppError> {
        input.validate()?;
        if self.name_taken(&input.name, None).await? {
            return Err(AppError::Conflict(Message::NOVEL_CATEGORY_ALREADY_EXIST));
        }
        self.categories
            .save(NovelCategory::new(input.name))
            .await
            .map_err(|e| e.on_unique_violation(Message::NOVEL_CATEGORY_ALREADY_EXIST))
    }

    pub async fn update(&self, id: Uuid, input: NovelCategoryInput) -> Result<NovelCategory, AppError> {
        input.validate()?;
        let mut category = self
            .categories
            .find_one(id, false)
            .await?
            .ok_or(AppError::Conflict(Message::NOVEL_CATEGORY_UNVALID))?;
        if self.name_taken(&input.name, Some(id)).await? {
            return Err(AppError::Conflict(Message::NOVEL_CATEGORY_ALREADY_EXIST));
        }
        category.name = input.name;
        self.categories
            .save(category)
            .await
            .map_err(|e| e.on_unique_violation(Message::NOVEL_CATEGORY_ALREADY_EXIST))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> NovelCategoryInput {
        NovelCategoryInput { name: name.into() }
    }

    #[tokio::test]
    async fn names_are_unique() {
        let svc = NovelCategoryService::new(Repository::in_memory());
        let fantasy = svc.create(named("fantasy")).await.unwrap();
        let err = svc.create(named("fantasy")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(Message::NOVEL_CATEGORY_ALREADY_EXIST)));

        let romance = svc.create(named("romance")).await.unwrap();
        let err = svc.update(romance.id, named("fantasy")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(Message::NOVEL_CATEGORY_ALREADY_EXIST)));

        let same = svc.update(fantasy.id, named("fantasy")).await.unwrap();
        assert_eq!(same.id, fantasy.id);
    }

    #[tokio::test]
    async fn deleted_category_keeps_its_name() {
        let categories: Repository<NovelCategory> = Repository::in_memory();
        let svc = NovelCategoryService::new(categories.clone());
        let fantasy = svc.create(named("fantasy")).await.unwrap();
        categories.soft_delete(fantasy.id).await.unwrap();

        let err = svc.create(named("fantasy")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(Message::NOVEL_CATEGORY_ALREADY_EXIST)));

        categories.restore(fantasy.id).await.unwrap();
        let live = categories
            .find_all_by(&FindOptions::new().filter("name", "fantasy"))
            .await
            .unwrap();
        assert_eq!(live.len(), 1);
    }

    #[tokio::test]
    async fn update_missing_category_is_conflict() {
        let svc = NovelCategoryService::new(Repository::in_memory());
        let err = svc.update(Uuid::new_v4(), named("x")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(Message::NOVEL_CATEGORY_UNVALID)));
    }
}
