use crate::sql::{SqlValue, TableDef};
use crate::store::Entity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Account row. `pwd` holds the Argon2 hash and is never serialized.
#[derive(Clone, Debug, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub nick_name: String,
    #[serde(skip_serializing, default)]
    pub pwd: String,
    pub phone: Option<String>,
    pub create_at: DateTime<Utc>,
    pub update_at: DateTime<Utc>,
    pub delete_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn new(email: String, nick_name: String, pwd_hash: String, phone: Option<String>) -> Self {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            email,
            nick_name,
            pwd: pwd_hash,
            phone,
            create_at: now,
            update_at: now,
            delete_at: None,
        }
    }
}

impl Entity for User {
    const TABLE: TableDef = TableDef {
        name: "users",
        columns: &["id", "email", "nick_name", "pwd", "phone", "create_at", "update_at", "delete_at"],
        soft_delete: true,
        order_by: "create_at",
    };

    fn id(&self) -> Uuid {
        self.id
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.id.into(),
            self.email.clone().into(),
            self.nick_name.clone().into(),
            self.pwd.clone().into(),
            self.phone.clone().into(),
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
