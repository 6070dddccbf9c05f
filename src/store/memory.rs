//! In-process row store with the same visibility and ordering rules as `PgStore`. Foreign
//! keys registered with [`MemoryStore::references`] replay the schema's `ON DELETE` actions.

use super::{Entity, FindOptions, RowStore};
use crate::error::AppError;
use crate::sql::{Filter, SqlValue};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::{Arc, PoisonError, RwLock};
use uuid::Uuid;

/// What happens to referencing rows when the referenced row is removed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OnDelete {
    Cascade,
    SetNull,
}

/// A table whose rows point at a removed parent row.
trait Dependent: Send + Sync {
    fn parent_removed(&self, parent_id: Uuid);
}

struct Reference<C> {
    child: MemoryStore<C>,
    column: &'static str,
    on_delete: OnDelete,
}

impl<C: Entity> Dependent for Reference<C> {
    fn parent_removed(&self, parent_id: Uuid) {
        let points_here = |r: &C| r.column_value(self.column).and_then(|v| v.as_uuid()) == Some(parent_id);
        match self.on_delete {
            OnDelete::Cascade => {
                let ids: Vec<Uuid> = {
                    let rows = self.child.rows.read().unwrap_or_else(PoisonError::into_inner);
                    rows.iter().filter(|r| points_here(*r)).map(|r| r.id()).collect()
                };
                for id in ids {
                    self.child.remove(id);
                }
            }
            OnDelete::SetNull => {
                let mut rows = self.child.rows.write().unwrap_or_else(PoisonError::into_inner);
                for row in rows.iter_mut().filter(|r| points_here(&**r)) {
                    row.clear_reference(self.column);
                }
            }
        }
    }
}

pub struct MemoryStore<E> {
    rows: Arc<RwLock<Vec<E>>>,
    dependents: Arc<RwLock<Vec<Arc<dyn Dependent>>>>,
}

impl<E> MemoryStore<E> {
    pub fn new() -> Self {
        MemoryStore {
            rows: Arc::new(RwLock::new(Vec::new())),
            dependents: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl<E: Entity> MemoryStore<E> {
    /// Declare `column` of this store as a foreign key to `parent`'s id.
    pub fn references<P>(&self, parent: &MemoryStore<P>, column: &'static str, on_delete: OnDelete) {
        let reference = Reference {
            child: self.clone(),
            column,
            on_delete,
        };
        parent
            .dependents
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::new(reference));
    }

    /// Remove one row and apply every dependent's action. Returns the affected count.
    fn remove(&self, id: Uuid) -> u64 {
        let removed = {
            let mut rows = self.rows.write().unwrap_or_else(PoisonError::into_inner);
            let before = rows.len();
            rows.retain(|r| r.id() != id);
            (before - rows.len()) as u64
        };
        if removed > 0 {
            let dependents = self.dependents.read().unwrap_or_else(PoisonError::into_inner).clone();
            for dependent in dependents {
                dependent.parent_removed(id);
            }
        }
        removed
    }
}

impl<E> Default for MemoryStore<E> {
    fn default() -> Self {
        MemoryStore::new()
    }
}

impl<E> Clone for MemoryStore<E> {
    fn clone(&self) -> Self {
        MemoryStore {
            rows: Arc::clone(&self.rows),
            dependents: Arc::clone(&self.dependents),
        }
    }
}

fn matches<E: Entity>(row: &E, filters: &[Filter]) -> bool {
    filters.iter().all(|f| {
        if !E::TABLE.has_column(f.column) {
            return true;
        }
        match row.column_value(f.column) {
            Some(v) if f.value.is_null() => v.is_null(),
            Some(v) => v == f.value,
            None => false,
        }
    })
}

fn visible<E: Entity>(row: &E, with_deleted: bool) -> bool {
    with_deleted || !E::TABLE.soft_delete || row.deleted_at().is_none()
}

fn order_key<E: Entity>(row: &E) -> (Option<DateTime<Utc>>, Uuid) {
    let at = match row.column_value(E::TABLE.order_by) {
        Some(SqlValue::Timestamp(t)) => t,
        _ => None,
    };
    (at, row.id())
}

impl<E: Entity> MemoryStore<E> {
    fn select(&self, options: &FindOptions) -> Result<Vec<E>, AppError> {
        let rows = self.rows.read().unwrap_or_else(PoisonError::into_inner);
        let mut out: Vec<E> = rows
            .iter()
            .filter(|r| visible(*r, options.with_deleted) && matches(*r, &options.filters))
            .cloned()
            .collect();
        out.sort_by_key(order_key::<E>);
        if let Some(page) = options.page {
            out = out
                .into_iter()
                .skip(page.offset as usize)
                .take(page.limit as usize)
                .collect();
        }
        Ok(out)
    }

    fn update_marker(&self, id: Uuid, deleted: bool) -> Result<u64, AppError> {
        if !E::TABLE.soft_delete {
            return Ok(0);
        }
        let mut rows = self.rows.write().unwrap_or_else(PoisonError::into_inner);
        let Some(row) = rows.iter_mut().find(|r| r.id() == id) else {
            return Ok(0);
        };
        match (deleted, row.deleted_at().is_some()) {
            (true, false) => row.set_deleted_at(Some(Utc::now())),
            (false, true) => row.set_deleted_at(None),
            _ => return Ok(0),
        }
        Ok(1)
    }
}

#[async_trait]
impl<E: Entity> RowStore<E> for MemoryStore<E> {
    async fn find_all(&self, options: &FindOptions) -> Result<Vec<E>, AppError> {
        self.select(options)
    }

    async fn find_one(&self, options: &FindOptions) -> Result<Option<E>, AppError> {
        Ok(self.select(options)?.into_iter().next())
    }

    async fn find_in(&self, column: &'static str, values: &[SqlValue]) -> Result<Vec<E>, AppError> {
        if values.is_empty() {
            return Ok(Vec::new());
        }
        let rows = self.rows.read().unwrap_or_else(PoisonError::into_inner);
        let mut out: Vec<E> = rows
            .iter()
            .filter(|r| r.column_value(column).map(|v| values.contains(&v)).unwrap_or(false))
            .cloned()
            .collect();
        out.sort_by_key(order_key::<E>);
        Ok(out)
    }

    async fn save(&self, mut row: E) -> Result<E, AppError> {
        row.touch(Utc::now());
        let mut rows = self.rows.write().unwrap_or_else(PoisonError::into_inner);
        match rows.iter_mut().find(|r| r.id() == row.id()) {
            Some(existing) => *existing = row.clone(),
            None => rows.push(row.clone()),
        }
        Ok(row)
    }

    async fn delete(&self, id: Uuid) -> Result<u64, AppError> {
        Ok(self.remove(id))
    }

    async fn soft_delete(&self, id: Uuid) -> Result<u64, AppError> {
        self.update_marker(id, true)
    }

    async fn restore(&self, id: Uuid) -> Result<u64, AppError> {
        self.update_marker(id, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Board, Bookmark, NovelIndex, Report, User};

    fn user() -> User {
        User::new("fk@novel.io".into(), "fk".into(), "hash".into(), None)
    }

    #[tokio::test]
    async fn cascade_removes_referencing_rows() {
        let users = MemoryStore::<User>::new();
        let boards = MemoryStore::<Board>::new();
        boards.references(&users, "user_id", OnDelete::Cascade);

        let author = users.save(user()).await.unwrap();
        let other = Uuid::new_v4();
        boards.save(Board::new(author.id, "a".into(), "c".into())).await.unwrap();
        boards.save(Board::new(author.id, "b".into(), "c".into())).await.unwrap();
        let kept = boards.save(Board::new(other, "k".into(), "c".into())).await.unwrap();

        assert_eq!(users.delete(author.id).await.unwrap(), 1);
        let left = boards.find_all(&FindOptions::new().with_deleted()).await.unwrap();
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].id, kept.id);
    }

    #[tokio::test]
    async fn set_null_detaches_referencing_rows() {
        let users = MemoryStore::<User>::new();
        let reports = MemoryStore::<Report>::new();
        reports.references(&users, "user_id", OnDelete::SetNull);

        let author = users.save(user()).await.unwrap();
        let report = reports
            .save(Report::new(Some(author.id), Uuid::new_v4(), "spam".into()))
            .await
            .unwrap();

        users.delete(author.id).await.unwrap();
        let found = reports.find_one(&FindOptions::by_id(report.id)).await.unwrap().unwrap();
        assert!(found.user_id.is_none());
    }

    #[tokio::test]
    async fn cascades_follow_chains() {
        let users = MemoryStore::<User>::new();
        let episodes = MemoryStore::<NovelIndex>::new();
        let bookmarks = MemoryStore::<Bookmark>::new();
        episodes.references(&users, "user_id", OnDelete::SetNull);
        bookmarks.references(&users, "user_id", OnDelete::Cascade);
        bookmarks.references(&episodes, "novel_index_id", OnDelete::Cascade);

        let reader = users.save(user()).await.unwrap();
        let episode = episodes
            .save(NovelIndex::new(Some(reader.id), "ep".into(), "c".into(), 1))
            .await
            .unwrap();
        bookmarks.save(Bookmark::new(Uuid::new_v4(), episode.id, 3)).await.unwrap();

        assert_eq!(episodes.delete(episode.id).await.unwrap(), 1);
        assert!(bookmarks.find_all(&FindOptions::new().with_deleted()).await.unwrap().is_empty());
        assert_eq!(users.delete(Uuid::new_v4()).await.unwrap(), 0);
    }
}
