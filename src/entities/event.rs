use crate::sql::{SqlValue, TableDef};
use crate::store::Entity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Site event. Events are never soft-deleted; `user_id` is set to NULL when the author goes.
#[derive(Clone, Debug, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub contents: String,
    pub is_event: bool,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub user_id: Option<Uuid>,
    pub create_at: DateTime<Utc>,
    pub update_at: DateTime<Utc>,
}

impl Event {
    pub fn new(
        user_id: Option<Uuid>,
        title: String,
        contents: String,
        is_event: bool,
        start_at: DateTime<Utc>,
        end_at: DateTime<Utc>,
    ) -> Self {
        let now = Utc::now();
        Event {
            id: Uuid::new_v4(),
            title,
            contents,
            is_event,
            start_at,
            end_at,
            user_id,
            create_at: now,
            update_at: now,
        }
    }

    pub fn is_ongoing(&self, now: DateTime<Utc>) -> bool {
        self.is_event && self.start_at <= now && now <= self.end_at
    }
}

impl Entity for Event {
    const TABLE: TableDef = TableDef {
        name: "event",
        columns: &["id", "title", "contents", "is_event", "start_at", "end_at", "user_id", "create_at", "update_at"],
        soft_delete: false,
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
            self.is_event.into(),
            self.start_at.into(),
            self.end_at.into(),
            self.user_id.into(),
            self.create_at.into(),
            self.update_at.into(),
        ]
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
