//! Email and phone verification rows.

use crate::sql::{SqlValue, TableDef};
use crate::store::Entity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthEmail {
    pub id: Uuid,
    pub email: String,
    pub token: String,
    pub is_auth: bool,
    pub user_id: Option<Uuid>,
    pub create_at: DateTime<Utc>,
    pub update_at: DateTime<Utc>,
}

impl AuthEmail {
    pub fn new(user_id: Option<Uuid>, email: String, token: String) -> Self {
        let now = Utc::now();
        AuthEmail {
            id: Uuid::new_v4(),
            email,
            token,
            is_auth: false,
            user_id,
            create_at: now,
            update_at: now,
        }
    }
}

impl Entity for AuthEmail {
    const TABLE: TableDef = TableDef {
        name: "auth_email",
        columns: &["id", "email", "token", "is_auth", "user_id", "create_at", "update_at"],
        soft_delete: false,
        order_by: "create_at",
    };

    fn id(&self) -> Uuid {
        self.id
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.id.into(),
            self.email.clone().into(),
            self.token.clone().into(),
            self.is_auth.into(),
            self.user_id.into(),
            self.create_at.into(),
            self.update_at.into(),
        ]
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.update_at = now;
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthPhone {
    pub id: Uuid,
    pub phone: String,
    pub token: String,
    pub is_auth: bool,
    pub user_id: Option<Uuid>,
    pub create_at: DateTime<Utc>,
    pub update_at: DateTime<Utc>,
}

impl AuthPhone {
    pub fn new(user_id: Option<Uuid>, phone: String, token: String) -> Self {
        let now = Utc::now();
        AuthPhone {
            id: Uuid::new_v4(),
            phone,
            token,
            is_auth: false,
            user_id,
            create_at: now,
            update_at: now,
        }
    }
}

impl Entity for AuthPhone {
    const TABLE: TableDef = TableDef {
        name: "auth_phone",
        columns: &["id", "phone", "token", "is_auth", "user_id", "create_at", "update_at"],
        soft_delete: false,
        order_by: "create_at",
    };

    fn id(&self) -> Uuid {
        self.id
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.id.into(),
            self.phone.clone().into(),
            self.token.clone().into(),
            self.is_auth.into(),
            self.user_id.into(),
            self.create_at.into(),
            self.update_at.into(),
        ]
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.update_at = now;
    }
}
