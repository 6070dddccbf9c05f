use crate::sql::{SqlValue, TableDef};
use crate::store::Entity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// User report against a piece of content (`target_id` is the reported row).
#[derive(Clone, Debug, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: Uuid,
    pub contents: String,
    pub target_id: Uuid,
    pub user_id: Option<Uuid>,
    pub create_at: DateTime<Utc>,
    pub update_at: DateTime<Utc>,
    pub delete_at: Option<DateTime<Utc>>,
}

impl Report {
    pub fn new(user_id: Option<Uuid>, target_id: Uuid, contents: String) -> Self {
        let now = Utc::now();
        Report {
            id: Uuid::new_v4(),
            contents,
            target_id,
            user_id,
            create_at: now,
            update_at: now,
            delete_at: None,
        }
    }
}

impl Entity for Report {
    const TABLE: TableDef = TableDef {
        name: "report",
        columns: &["id", "contents", "target_id", "user_id", "create_at", "update_at", "delete_at"],
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
            self.target_id.into(),
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
