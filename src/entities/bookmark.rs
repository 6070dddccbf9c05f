use crate::sql::{SqlValue, TableDef};
use crate::store::Entity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// A reader's saved position inside an episode.
#[derive(Clone, Debug, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub id: Uuid,
    pub page: i32,
    pub is_boolean: bool,
    pub user_id: Uuid,
    pub novel_index_id: Uuid,
    pub create_at: DateTime<Utc>,
    pub update_at: DateTime<Utc>,
    pub delete_at: Option<DateTime<Utc>>,
}

impl Bookmark {
    pub fn new(user_id: Uuid, novel_index_id: Uuid, page: i32) -> Self {
        let now = Utc::now();
        Bookmark {
            id: Uuid::new_v4(),
            page,
            is_boolean: true,
            user_id,
            novel_index_id,
            create_at: now,
            update_at: now,
            delete_at: None,
        }
    }
}

impl Entity for Bookmark {
    const TABLE: TableDef = TableDef {
        name: "bookmark",
        columns: &["id", "page", "is_boolean", "user_id", "novel_index_id", "create_at", "update_at", "delete_at"],
        soft_delete: true,
        order_by: "create_at",
    };

    fn id(&self) -> Uuid {
        self.id
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.id.into(),
            self.page.into(),
            self.is_boolean.into(),
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
