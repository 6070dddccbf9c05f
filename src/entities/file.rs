use crate::sql::{SqlValue, TableDef};
use crate::store::Entity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Metadata of an uploaded file; the bytes live in external storage at `url`.
#[derive(Clone, Debug, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FileEntity {
    pub id: Uuid,
    pub name: String,
    pub path: String,
    pub url: String,
    pub create_at: DateTime<Utc>,
    pub delete_at: Option<DateTime<Utc>>,
}

impl FileEntity {
    pub fn new(name: String, path: String, url: String) -> Self {
        FileEntity {
            id: Uuid::new_v4(),
            name,
            path,
            url,
            create_at: Utc::now(),
            delete_at: None,
        }
    }
}

impl Entity for FileEntity {
    const TABLE: TableDef = TableDef {
        name: "file",
        columns: &["id", "name", "path", "url", "create_at", "delete_at"],
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
            self.path.clone().into(),
            self.url.clone().into(),
            self.create_at.into(),
            self.delete_at.into(),
        ]
    }

    fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.delete_at
    }

    fn set_deleted_at(&mut self, at: Option<DateTime<Utc>>) {
        self.delete_at = at;
    }
}
