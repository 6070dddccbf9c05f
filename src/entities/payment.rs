use crate::sql::{SqlValue, TableDef};
use crate::store::Entity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Payment record as reported by the payment provider (`imp_uid` is the provider's id).
#[derive(Clone, Debug, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: Uuid,
    pub imp_uid: String,
    pub amount: i64,
    pub status: String,
    pub user_id: Uuid,
    pub create_at: DateTime<Utc>,
}

impl Payment {
    pub fn new(user_id: Uuid, imp_uid: String, amount: i64, status: String) -> Self {
        Payment {
            id: Uuid::new_v4(),
            imp_uid,
            amount,
            status,
            user_id,
            create_at: Utc::now(),
        }
    }
}

impl Entity for Payment {
    const TABLE: TableDef = TableDef {
        name: "payment",
        columns: &["id", "imp_uid", "amount", "status", "user_id", "create_at"],
        soft_delete: false,
        order_by: "create_at",
    };

    fn id(&self) -> Uuid {
        self.id
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.id.into(),
            self.imp_uid.clone().into(),
            self.amount.into(),
            self.status.clone().into(),
            self.user_id.into(),
            self.create_at.into(),
        ]
    }
}
