//! Novel catalog rows: categories, episodes (novel index) and episode reviews.

use crate::sql::{SqlValue, TableDef};
use crate::store::Entity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NovelCategory {
    pub id: Uuid,
    pub name: String,
    pub create_at: DateTime<Utc>,
    pub update_at: DateTime<Utc>,
    pub delete_at: Option<DateTime<Utc>>,
}

impl NovelCategory {
    pub fn new(name: String) -> Self {
        let now = Utc::now();
        NovelCategory {
            id: Uuid::new_v4(),
            name,
            create_at: now,
            update_at: now,
            delete_at: None,
        }
    }
}

impl Entity for NovelCategory {
    const TABLE: TableDef = TableDef {
        name: "novel_category",
        columns: &["id", "name", "create_at", "update_at", "delete_at"],
        soft_delete: true,
        order_by: "create_at",
    };

    fn id(&self) -> Uuid {
        self.id
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.id.into(),
            self.name.clone().into(),
            self.create_at.into(),
            self.update_at.into(),
            self.delete_at.into(),
        ]
    }

    fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.delete_at
    }

    fn set_deleted_at(&mut self, at: Option<DateTime<Utc>>) {
        self.delete_at = at;
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.update_at = now;
    }
}

/// One episode of a novel.
#[derive(Clone, Debug, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NovelIndex {
    pub id: Uuid,
    pub title: String,
    pub contents: String,
    pub episode: i32,
    pub user_id: Option<Uuid>,
    pub create_at: DateTime<Utc>,
    pub update_at: DateTime<Utc>,
    pub delete_at: Option<DateTime<Utc>>,
}

impl NovelIndex {
    pub fn new(user_id: Option<Uuid>, title: String, contents: String, episode: i32) -> Self {
        let now = Utc::now();
        NovelIndex {
            id: Uuid::new_v4(),
            title,
            contents,
            episode,
            user_id,
            create_at: now,
            update_at: now,
            delete_at: None,
        }
    }
}

impl Entity for NovelIndex {
    const TABLE: TableDef = TableDef {
        name: "novel_index",
        columns: &["id", "title", "contents", "episode", "user_id", "create_at", "update_at", "delete_at"],
        soft_delete: true,
        order_by: "create_at",
    };

    fn id(&self) -> Uuid {
        self.id
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.id.into(),
            self.title.clone().into(),
            self.contents.clone().into(),
            self.episode.into(),
            self.user_id.into(),
            self.create_at.into(),
            self.update_at.into(),
            self.delete_at.into(),
        ]
    }

    fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.delete_at
    }

    fn set_deleted_at(&mut self, at: Option<DateTime<Utc>>) {
        self.delete_at = at;
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.update_at = now;
    }

    fn clear_reference(&mut self, column: &str) {
        if column == "user_id" {
            self.user_id = None;
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NovelIndexReview {
    pub id: Uuid,
    pub contents: String,
    /// 1..=5
    pub rating: i32,
    pub user_id: Uuid,
    pub novel_index_id: Uuid,
    pub create_at: DateTime<Utc>,
    pub update_at: DateTime<Utc>,
    pub delete_at: Option<DateTime<Utc>>,
}

impl NovelIndexReview {
    pub fn new(user_id: Uuid, novel_index_id: Uuid, contents: String, rating: i32) -> Self {
        let now = Utc::now();
        NovelIndexReview {
            id: Uuid::new_v4(),
            contents,
            rating,
            user_id,
            novel_index_id,
            create_at: now,
            update_at: now,
            delete_at: None,
        }
    }
}

impl Entity for NovelIndexReview {
    const TABLE: TableDef = TableDef {
        name: "novel_index_review",
        columns: &["id", "contents", "rating", "user_id", "novel_index_id", "create_at", "update_at", "delete_at"],
        soft_delete: true,
        order_by: "create_at",
    };

    fn id(&self) -> Uuid {
        self.id
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.id.into(),
            self.contents.clone().into(),
            self.rating.into(),
            self.user_id.into(),
            self.novel_index_id.into(),
            self.create_at.into(),
            self.update_at.into(),
            self.delete_at.into(),
        ]
    }

    fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.delete_at
    }

    fn set_deleted_at(&mut self, at: Option<DateTime<Utc>>) {
        self.delete_at = at;
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.update_at = now;
    }
}
