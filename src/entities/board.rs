use crate::sql::{SqlValue, TableDef};
use crate::store::Entity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: Uuid,
    pub title: String,
    pub contents: String,
    pub user_id: Uuid,
    pub create_at: DateTime<Utc>,
    pub update_at: DateTime<Utc>,
    pub delete_at: Option<DateTime<Utc>>,
}

impl Board {
    pub fn new(user_id: Uuid, title: String, contents: String) -> Self {
        let now = Utc::now();
        Board {
            id: Uuid::new_v4(),
            title,
            contents,
            user_id,
            create_at: now,
            update_at: now,
            delete_at: None,
        }
    }
}

impl Entity for Board {
    const TABLE: TableDef = TableDef {
        name: "board",
        columns: &["id", "title", "contents", "user_id", "create_at", "update_at", "delete_at"],
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
}
