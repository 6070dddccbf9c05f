//! Row store abstraction: one `RowStore<E>` per entity type, backed by PostgreSQL or memory.

mod memory;
mod postgres;
pub mod schema;

pub use memory::{MemoryStore, OnDelete};
pub use postgres::PgStore;
pub use schema::{ensure_database_exists, ensure_tables};

use crate::error::AppError;
use crate::sql::{Filter, Page, SqlValue, TableDef};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures_util::future::join_all;
use serde::Serialize;
use uuid::Uuid;

/// A row type mapped onto one table.
pub trait Entity: Clone + Send + Sync + Unpin + Serialize + 'static {
    const TABLE: TableDef;

    fn id(&self) -> Uuid;

    /// Column values in `TABLE.columns` order.
    fn values(&self) -> Vec<SqlValue>;

    fn deleted_at(&self) -> Option<DateTime<Utc>> {
        None
    }

    /// No-op for tables without a deletion marker.
    fn set_deleted_at(&mut self, _at: Option<DateTime<Utc>>) {}

    /// Refresh `update_at` before a save.
    fn touch(&mut self, _now: DateTime<Utc>) {}

    /// Null out a nullable foreign-key column (`ON DELETE SET NULL`).
    fn clear_reference(&mut self, _column: &str) {}

    fn column_value(&self, column: &str) -> Option<SqlValue> {
        let idx = Self::TABLE.column_index(column)?;
        self.values().into_iter().nth(idx)
    }
}

/// Filters, deleted-row visibility and pagination for one read.
#[derive(Clone, Debug, Default)]
pub struct FindOptions {
    pub filters: Vec<Filter>,
    pub with_deleted: bool,
    pub page: Option<Page>,
}

impl FindOptions {
    pub fn new() -> Self {
        FindOptions::default()
    }

    pub fn by_id(id: Uuid) -> Self {
        FindOptions::new().filter("id", id)
    }

    pub fn filter(mut self, column: &'static str, value: impl Into<SqlValue>) -> Self {
        self.filters.push(Filter::eq(column, value));
        self
    }

    pub fn with_deleted(mut self) -> Self {
        self.with_deleted = true;
        self
    }

    pub fn page(mut self, page: Page) -> Self {
        self.page = Some(page);
        self
    }
}

#[async_trait]
pub trait RowStore<E: Entity>: Send + Sync {
    async fn find_all(&self, options: &FindOptions) -> Result<Vec<E>, AppError>;

    async fn find_one(&self, options: &FindOptions) -> Result<Option<E>, AppError>;

    /// Rows whose `column` is one of `values`, deleted rows included.
    async fn find_in(&self, column: &'static str, values: &[SqlValue]) -> Result<Vec<E>, AppError>;

    /// Insert or update by id; returns the persisted row.
    async fn save(&self, row: E) -> Result<E, AppError>;

    async fn delete(&self, id: Uuid) -> Result<u64, AppError>;

    async fn soft_delete(&self, id: Uuid) -> Result<u64, AppError>;

    async fn restore(&self, id: Uuid) -> Result<u64, AppError>;

    /// One affected count per id, in input order. The default issues independent deletes
    /// concurrently: a failure part-way leaves earlier deletes applied.
    async fn delete_many(&self, ids: &[Uuid]) -> Result<Vec<u64>, AppError> {
        let results = join_all(ids.iter().map(|id| self.delete(*id))).await;
        results.into_iter().collect()
    }
}
