//! Eager-loaded relations: many-to-one joins resolved with one batched lookup per relation.

use super::Repository;
use crate::error::AppError;
use crate::sql::{SqlValue, ID_COLUMN};
use crate::store::Entity;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use uuid::Uuid;

/// A row with its included relations attached under their names. Serializes flat:
/// `{ ...row, "user": { ... } }`.
#[derive(Clone, Debug, Serialize)]
pub struct Related<E> {
    #[serde(flatten)]
    pub row: E,
    #[serde(flatten)]
    pub relations: Map<String, Value>,
}

impl<E> Related<E> {
    pub fn bare(row: E) -> Self {
        Related {
            row,
            relations: Map::new(),
        }
    }
}

/// One relation that can be loaded for a batch of `E` rows.
#[async_trait]
pub trait Include<E: Entity>: Send + Sync {
    /// Key the loaded value is attached under.
    fn name(&self) -> &'static str;

    /// One value per input row, in order. `Value::Null` when the row has no related row.
    async fn load(&self, rows: &[E]) -> Result<Vec<Value>, AppError>;
}

/// Follows the foreign-key column `column` of `E` to the id of `R`.
pub struct BelongsTo<R: Entity> {
    name: &'static str,
    column: &'static str,
    target: Repository<R>,
}

impl<R: Entity> BelongsTo<R> {
    pub fn new(name: &'static str, column: &'static str, target: Repository<R>) -> Self {
        BelongsTo { name, column, target }
    }
}

#[async_trait]
impl<E: Entity, R: Entity> Include<E> for BelongsTo<R> {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn load(&self, rows: &[E]) -> Result<Vec<Value>, AppError> {
        let keys: Vec<Option<Uuid>> = rows
            .iter()
            .map(|r| r.column_value(self.column).and_then(|v| v.as_uuid()))
            .collect();
        let mut wanted: Vec<Uuid> = keys.iter().flatten().copied().collect();
        wanted.sort();
        wanted.dedup();
        let values: Vec<SqlValue> = wanted.into_iter().map(SqlValue::from).collect();

        let targets = self.target.store().find_in(ID_COLUMN, &values).await?;
        let mut by_id: HashMap<Uuid, Value> = HashMap::with_capacity(targets.len());
        for t in targets {
            let id = t.id();
            let json = serde_json::to_value(&t)?;
            by_id.insert(id, json);
        }
        Ok(keys
            .into_iter()
            .map(|k| k.and_then(|id| by_id.get(&id).cloned()).unwrap_or(Value::Null))
            .collect())
    }
}

/// Attach every include to every row.
pub async fn attach<E: Entity>(
    rows: Vec<E>,
    includes: &[std::sync::Arc<dyn Include<E>>],
) -> Result<Vec<Related<E>>, AppError> {
    let mut out: Vec<Related<E>> = Vec::with_capacity(rows.len());
    let mut loaded: Vec<(&'static str, Vec<Value>)> = Vec::with_capacity(includes.len());
    for include in includes {
        loaded.push((include.name(), include.load(&rows).await?));
    }
    for (i, row) in rows.into_iter().enumerate() {
        let mut related = Related::bare(row);
        for (name, values) in &loaded {
            let v = values.get(i).cloned().unwrap_or(Value::Null);
            related.relations.insert((*name).to_string(), v);
        }
        out.push(related);
    }
    Ok(out)
}
