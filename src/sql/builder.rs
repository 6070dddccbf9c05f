//! Builds parameterized SELECT, upsert, DELETE and soft-delete statements from static table metadata.

use crate::sql::SqlValue;

pub const ID_COLUMN: &str = "id";
pub const CREATE_COLUMN: &str = "create_at";
pub const UPDATE_COLUMN: &str = "update_at";
pub const DELETE_COLUMN: &str = "delete_at";

pub const DEFAULT_LIMIT: u32 = 100;
pub const MAX_LIMIT: u32 = 1000;

/// Static description of one table. `columns` is the SELECT/INSERT order and must match
/// the order of `Entity::values`.
#[derive(Debug)]
pub struct TableDef {
    pub name: &'static str,
    pub columns: &'static [&'static str],
    /// Table carries a `delete_at` marker.
    pub soft_delete: bool,
    pub order_by: &'static str,
}

impl TableDef {
    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| *c == column)
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| *c == column)
    }
}

/// Exact-match condition on one column.
#[derive(Clone, Debug)]
pub struct Filter {
    pub column: &'static str,
    pub value: SqlValue,
}

impl Filter {
    pub fn eq(column: &'static str, value: impl Into<SqlValue>) -> Self {
        Filter {
            column,
            value: value.into(),
        }
    }
}

/// LIMIT/OFFSET window. Limit defaults to 100 and is capped at 1000.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Page {
    pub limit: u32,
    pub offset: u32,
}

impl Page {
    pub fn new(limit: Option<u32>, offset: Option<u32>) -> Self {
        Page {
            limit: limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT),
            offset: offset.unwrap_or(0),
        }
    }
}

/// Quote identifier for PostgreSQL (safe: only from static table metadata).
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<SqlValue>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: SqlValue) -> u32 {
        let n = self.params.len() as u32 + 1;
        self.params.push(v);
        n
    }
}

fn select_column_list(table: &TableDef) -> String {
    table.columns.iter().map(|c| quoted(c)).collect::<Vec<_>>().join(", ")
}

/// SELECT with exact-match filters (unknown columns are ignored), deleted rows hidden unless
/// `with_deleted`, ORDER BY the table's order column, optional LIMIT/OFFSET.
pub fn select_list(table: &TableDef, filters: &[Filter], with_deleted: bool, page: Option<Page>) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut where_parts = Vec::new();
    for f in filters {
        if !table.has_column(f.column) {
            continue;
        }
        if f.value.is_null() {
            where_parts.push(format!("{} IS NULL", quoted(f.column)));
            continue;
        }
        let n = q.push_param(f.value.clone());
        where_parts.push(format!("{} = ${}", quoted(f.column), n));
    }
    if table.soft_delete && !with_deleted {
        where_parts.push(format!("{} IS NULL", quoted(DELETE_COLUMN)));
    }
    let where_clause = if where_parts.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", where_parts.join(" AND "))
    };
    let page_clause = page
        .map(|p| format!(" LIMIT {} OFFSET {}", p.limit.min(MAX_LIMIT), p.offset))
        .unwrap_or_default();
    q.sql = format!(
        "SELECT {} FROM {}{} ORDER BY {}, {}{}",
        select_column_list(table),
        quoted(table.name),
        where_clause,
        quoted(table.order_by),
        quoted(ID_COLUMN),
        page_clause
    );
    q
}

/// First row matching the filters.
pub fn select_one(table: &TableDef, filters: &[Filter], with_deleted: bool) -> QueryBuf {
    select_list(table, filters, with_deleted, Some(Page { limit: 1, offset: 0 }))
}

/// SELECT rows whose column is IN (values), deleted rows included. Used for batch-loading related rows.
pub fn select_by_column_in(table: &TableDef, column: &str, values: &[SqlValue]) -> QueryBuf {
    let mut q = QueryBuf::new();
    let cols = select_column_list(table);
    if values.is_empty() || !table.has_column(column) {
        q.sql = format!("SELECT {} FROM {} WHERE 1 = 0", cols, quoted(table.name));
        return q;
    }
    let placeholders: Vec<String> = values
        .iter()
        .map(|v| format!("${}", q.push_param(v.clone())))
        .collect();
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} IN ({}) ORDER BY {}",
        cols,
        quoted(table.name),
        quoted(column),
        placeholders.join(", "),
        quoted(table.order_by)
    );
    q
}

/// INSERT .. ON CONFLICT (id) DO UPDATE. `values` follow `table.columns`.
/// `create_at` is kept from the existing row on update.
pub fn upsert(table: &TableDef, values: Vec<SqlValue>) -> QueryBuf {
    let mut q = QueryBuf::new();
    let cols = select_column_list(table);
    let placeholders: Vec<String> = values.into_iter().map(|v| format!("${}", q.push_param(v))).collect();
    let sets: Vec<String> = table
        .columns
        .iter()
        .filter(|c| **c != ID_COLUMN && **c != CREATE_COLUMN)
        .map(|c| format!("{} = EXCLUDED.{}", quoted(c), quoted(c)))
        .collect();
    let conflict_action = if sets.is_empty() {
        "DO NOTHING".to_string()
    } else {
        format!("DO UPDATE SET {}", sets.join(", "))
    };
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({}) ON CONFLICT ({}) {} RETURNING {}",
        quoted(table.name),
        cols,
        placeholders.join(", "),
        quoted(ID_COLUMN),
        conflict_action,
        cols
    );
    q
}

/// DELETE by id.
pub fn delete(table: &TableDef, id: SqlValue) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(id);
    q.sql = format!("DELETE FROM {} WHERE {} = ${}", quoted(table.name), quoted(ID_COLUMN), n);
    q
}

/// Mark a live row deleted. Already-deleted rows are not touched.
pub fn soft_delete(table: &TableDef, id: SqlValue) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(id);
    q.sql = format!(
        "UPDATE {} SET {} = NOW() WHERE {} = ${} AND {} IS NULL",
        quoted(table.name),
        quoted(DELETE_COLUMN),
        quoted(ID_COLUMN),
        n,
        quoted(DELETE_COLUMN)
    );
    q
}

/// Clear the deletion marker of a soft-deleted row.
pub fn restore(table: &TableDef, id: SqlValue) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(id);
    q.sql = format!(
        "UPDATE {} SET {} = NULL WHERE {} = ${} AND {} IS NOT NULL",
        quoted(table.name),
        quoted(DELETE_COLUMN),
        quoted(ID_COLUMN),
        n,
        quoted(DELETE_COLUMN)
    );
    q
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    const NOTES: TableDef = TableDef {
        name: "note",
        columns: &["id", "title", "user_id", "create_at", "update_at", "delete_at"],
        soft_delete: true,
        order_by: "create_at",
    };

    const LOGS: TableDef = TableDef {
        name: "log",
        columns: &["id", "line", "create_at"],
        soft_delete: false,
        order_by: "create_at",
    };

    #[test]
    fn select_list_hides_deleted_rows_by_default() {
        let q = select_list(&NOTES, &[], false, None);
        assert_eq!(
            q.sql,
            "SELECT \"id\", \"title\", \"user_id\", \"create_at\", \"update_at\", \"delete_at\" FROM \"note\" WHERE \"delete_at\" IS NULL ORDER BY \"create_at\", \"id\""
        );
        assert!(q.params.is_empty());
    }

    #[test]
    fn select_list_with_deleted_has_no_marker_condition() {
        let q = select_list(&NOTES, &[], true, None);
        assert!(!q.sql.contains("IS NULL"));
    }

    #[test]
    fn select_list_binds_filters_in_order_and_skips_unknown_columns() {
        let user = Uuid::new_v4();
        let filters = [
            Filter::eq("user_id", user),
            Filter::eq("nope", "x"),
            Filter::eq("title", "t"),
        ];
        let q = select_list(&NOTES, &filters, false, Some(Page::new(Some(5000), Some(20))));
        assert!(q.sql.contains("WHERE \"user_id\" = $1 AND \"title\" = $2 AND \"delete_at\" IS NULL"));
        assert!(q.sql.ends_with("LIMIT 1000 OFFSET 20"));
        assert_eq!(q.params, vec![SqlValue::Uuid(Some(user)), SqlValue::Text(Some("t".into()))]);
    }

    #[test]
    fn null_filter_becomes_is_null() {
        let q = select_list(&NOTES, &[Filter::eq("user_id", None::<Uuid>)], true, None);
        assert!(q.sql.contains("WHERE \"user_id\" IS NULL"));
        assert!(q.params.is_empty());
    }

    #[test]
    fn table_without_marker_never_filters_deleted() {
        let q = select_list(&LOGS, &[], false, None);
        assert!(!q.sql.contains("delete_at"));
    }

    #[test]
    fn upsert_keeps_create_at_and_id_out_of_update_set() {
        let values = vec![
            SqlValue::Uuid(Some(Uuid::new_v4())),
            "t".into(),
            SqlValue::Uuid(None),
            SqlValue::Timestamp(None),
            SqlValue::Timestamp(None),
            SqlValue::Timestamp(None),
        ];
        let q = upsert(&NOTES, values);
        assert!(q.sql.starts_with("INSERT INTO \"note\""));
        assert!(q.sql.contains("VALUES ($1, $2, $3, $4, $5, $6)"));
        assert!(q.sql.contains(
            "ON CONFLICT (\"id\") DO UPDATE SET \"title\" = EXCLUDED.\"title\", \"user_id\" = EXCLUDED.\"user_id\", \"update_at\" = EXCLUDED.\"update_at\", \"delete_at\" = EXCLUDED.\"delete_at\""
        ));
        assert_eq!(q.params.len(), 6);
    }

    #[test]
    fn soft_delete_and_restore_guard_on_marker_state() {
        let id = SqlValue::Uuid(Some(Uuid::new_v4()));
        let sd = soft_delete(&NOTES, id.clone());
        assert_eq!(sd.sql, "UPDATE \"note\" SET \"delete_at\" = NOW() WHERE \"id\" = $1 AND \"delete_at\" IS NULL");
        let r = restore(&NOTES, id);
        assert_eq!(r.sql, "UPDATE \"note\" SET \"delete_at\" = NULL WHERE \"id\" = $1 AND \"delete_at\" IS NOT NULL");
    }

    #[test]
    fn select_in_with_no_values_matches_nothing() {
        let q = select_by_column_in(&NOTES, "id", &[]);
        assert!(q.sql.ends_with("WHERE 1 = 0"));
    }
}
