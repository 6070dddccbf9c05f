//! Generic repository over a row store, plus the admin-side view that sees deleted rows.

mod relation;

pub use relation::{attach, BelongsTo, Include, Related};

use crate::error::AppError;
use crate::sql::Page;
use crate::store::{Entity, FindOptions, MemoryStore, RowStore};
use std::sync::Arc;
use uuid::Uuid;

/// Upper bound on ids accepted by one `bulk_delete`.
pub const MAX_BULK_DELETE: usize = 100;

pub struct Repository<E: Entity> {
    store: Arc<dyn RowStore<E>>,
}

impl<E: Entity> Clone for Repository<E> {
    fn clone(&self) -> Self {
        Repository {
            store: Arc::clone(&self.store),
        }
    }
}

impl<E: Entity> Repository<E> {
    pub fn new(store: Arc<dyn RowStore<E>>) -> Self {
        Repository { store }
    }

    /// Backed by a fresh `MemoryStore`.
    pub fn in_memory() -> Self {
        Repository::new(Arc::new(MemoryStore::<E>::new()))
    }

    pub fn store(&self) -> &dyn RowStore<E> {
        self.store.as_ref()
    }

    /// All live rows.
    pub async fn find_all(&self) -> Result<Vec<E>, AppError> {
        self.store.find_all(&FindOptions::new()).await
    }

    pub async fn find_all_by(&self, options: &FindOptions) -> Result<Vec<E>, AppError> {
        self.store.find_all(options).await
    }

    pub async fn find_all_with(
        &self,
        options: &FindOptions,
        includes: &[Arc<dyn Include<E>>],
    ) -> Result<Vec<Related<E>>, AppError> {
        let rows = self.store.find_all(options).await?;
        attach(rows, includes).await
    }

    pub async fn find_one(&self, id: Uuid, with_deleted: bool) -> Result<Option<E>, AppError> {
        let mut options = FindOptions::by_id(id);
        options.with_deleted = with_deleted;
        self.store.find_one(&options).await
    }

    pub async fn find_by(&self, options: &FindOptions) -> Result<Option<E>, AppError> {
        self.store.find_one(options).await
    }

    pub async fn save(&self, row: E) -> Result<E, AppError> {
        self.store.save(row).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<u64, AppError> {
        self.store.delete(id).await
    }

    pub async fn soft_delete(&self, id: Uuid) -> Result<u64, AppError> {
        self.store.soft_delete(id).await
    }

    pub async fn restore(&self, id: Uuid) -> Result<u64, AppError> {
        self.store.restore(id).await
    }

    /// Permanently remove each id. One flag per id, in input order: `true` iff a row went away.
    pub async fn bulk_delete(&self, ids: &[Uuid]) -> Result<Vec<bool>, AppError> {
        if ids.len() > MAX_BULK_DELETE {
            return Err(AppError::BadRequest(format!(
                "at most {} ids per bulk delete",
                MAX_BULK_DELETE
            )));
        }
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let counts = self.store.delete_many(ids).await?;
        Ok(counts.into_iter().map(|n| n > 0).collect())
    }
}

/// Admin view of one resource: reads include soft-deleted rows and carry the resource's
/// relations.
pub struct AdminRepository<E: Entity> {
    repo: Repository<E>,
    includes: Vec<Arc<dyn Include<E>>>,
}

impl<E: Entity> Clone for AdminRepository<E> {
    fn clone(&self) -> Self {
        AdminRepository {
            repo: self.repo.clone(),
            includes: self.includes.clone(),
        }
    }
}

impl<E: Entity> AdminRepository<E> {
    pub fn new(repo: Repository<E>) -> Self {
        AdminRepository {
            repo,
            includes: Vec::new(),
        }
    }

    pub fn include(mut self, include: impl Include<E> + 'static) -> Self {
        self.includes.push(Arc::new(include));
        self
    }

    pub fn repo(&self) -> &Repository<E> {
        &self.repo
    }

    /// Every row, soft-deleted included, oldest first; windowed when `page` is given.
    pub async fn find_all(&self, page: Option<Page>) -> Result<Vec<Related<E>>, AppError> {
        let mut options = FindOptions::new().with_deleted();
        options.page = page;
        self.repo.find_all_with(&options, &self.includes).await
    }

    pub async fn find_one(&self, id: Uuid) -> Result<Option<Related<E>>, AppError> {
        let Some(row) = self.repo.find_one(id, true).await? else {
            return Ok(None);
        };
        let mut related = attach(vec![row], &self.includes).await?;
        Ok(related.pop())
    }

    pub async fn bulk_delete(&self, ids: &[Uuid]) -> Result<Vec<bool>, AppError> {
        self.repo.bulk_delete(ids).await
    }

    pub async fn restore(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(self.repo.restore(id).await? > 0)
    }
}
