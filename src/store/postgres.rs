//! PostgreSQL row store.

use super::{Entity, FindOptions, RowStore};
use crate::error::AppError;
use crate::sql::{bind_query, bind_query_as, delete, restore, select_by_column_in, select_list, select_one, soft_delete, upsert, QueryBuf, SqlValue};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool};
use std::marker::PhantomData;
use uuid::Uuid;

pub struct PgStore<E> {
    pool: PgPool,
    _row: PhantomData<fn() -> E>,
}

impl<E> PgStore<E> {
    pub fn new(pool: PgPool) -> Self {
        PgStore {
            pool,
            _row: PhantomData,
        }
    }
}

impl<E> Clone for PgStore<E> {
    fn clone(&self) -> Self {
        PgStore::new(self.pool.clone())
    }
}

impl<E> PgStore<E>
where
    E: Entity + for<'r> FromRow<'r, PgRow>,
{
    async fn fetch_all(&self, q: &QueryBuf) -> Result<Vec<E>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let rows = bind_query_as(sqlx::query_as::<_, E>(&q.sql), &q.params)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn fetch_optional(&self, q: &QueryBuf) -> Result<Option<E>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let row = bind_query_as(sqlx::query_as::<_, E>(&q.sql), &q.params)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn execute(&self, q: &QueryBuf) -> Result<u64, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "execute");
        let done = bind_query(sqlx::query(&q.sql), &q.params).execute(&self.pool).await?;
        Ok(done.rows_affected())
    }
}

#[async_trait]
impl<E> RowStore<E> for PgStore<E>
where
    E: Entity + for<'r> FromRow<'r, PgRow>,
{
    async fn find_all(&self, options: &FindOptions) -> Result<Vec<E>, AppError> {
        let q = select_list(&E::TABLE, &options.filters, options.with_deleted, options.page);
        self.fetch_all(&q).await
    }

    async fn find_one(&self, options: &FindOptions) -> Result<Option<E>, AppError> {
        let q = select_one(&E::TABLE, &options.filters, options.with_deleted);
        self.fetch_optional(&q).await
    }

    async fn find_in(&self, column: &'static str, values: &[SqlValue]) -> Result<Vec<E>, AppError> {
        if values.is_empty() {
            return Ok(Vec::new());
        }
        let q = select_by_column_in(&E::TABLE, column, values);
        self.fetch_all(&q).await
    }

    async fn save(&self, mut row: E) -> Result<E, AppError> {
        row.touch(Utc::now());
        let q = upsert(&E::TABLE, row.values());
        self.fetch_optional(&q)
            .await?
            .ok_or(AppError::Db(sqlx::Error::RowNotFound))
    }

    async fn delete(&self, id: Uuid) -> Result<u64, AppError> {
        self.execute(&delete(&E::TABLE, id.into())).await
    }

    async fn soft_delete(&self, id: Uuid) -> Result<u64, AppError> {
        if !E::TABLE.soft_delete {
            return Ok(0);
        }
        self.execute(&soft_delete(&E::TABLE, id.into())).await
    }

    async fn restore(&self, id: Uuid) -> Result<u64, AppError> {
        if !E::TABLE.soft_delete {
            return Ok(0);
        }
        self.execute(&restore(&E::TABLE, id.into())).await
    }

    /// Runs every delete in one transaction: unknown ids report 0, a database error rolls
    /// back the whole batch.
    async fn delete_many(&self, ids: &[Uuid]) -> Result<Vec<u64>, AppError> {
        let mut out = Vec::with_capacity(ids.len());
        let mut tx = self.pool.begin().await?;
        for id in ids {
            let q = delete(&E::TABLE, (*id).into());
            tracing::debug!(sql = %q.sql, params = ?q.params, "execute (tx)");
            let done = bind_query(sqlx::query(&q.sql), &q.params).execute(&mut *tx).await?;
            out.push(done.rows_affected());
        }
        tx.commit().await?;
        Ok(out)
    }
}
