//! Declarative description of one admin table and how its rows render.

use serde_json::Value;
use std::collections::HashMap;

/// Columns to show, in order. `option[column]` names the field displayed for a related
/// object in that column (e.g. `user -> email`).
#[derive(Clone, Debug, Default)]
pub struct ColumnSet {
    pub column: Vec<&'static str>,
    pub option: HashMap<&'static str, &'static str>,
}

impl ColumnSet {
    pub fn new(column: &[&'static str]) -> Self {
        ColumnSet {
            column: column.to_vec(),
            option: HashMap::new(),
        }
    }

    pub fn option(mut self, column: &'static str, field: &'static str) -> Self {
        self.option.insert(column, field);
        self
    }

    pub fn render_cell(&self, row: &Value, column: &str) -> String {
        match row.get(column) {
            None | Some(Value::Null) => String::new(),
            Some(Value::Object(obj)) => match self.option.get(column) {
                Some(field) => obj.get(*field).map(scalar).unwrap_or_default(),
                None => obj.get("id").map(scalar).unwrap_or_default(),
            },
            Some(v) => scalar(v),
        }
    }

    pub fn render(&self, row: &Value) -> Vec<String> {
        self.column.iter().map(|c| self.render_cell(row, c)).collect()
    }
}

fn scalar(v: &Value) -> String {
    match v {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Rendered rows with their header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: &ColumnSet, rows: &[Value]) -> Self {
        Table {
            header: columns.column.iter().map(|c| c.to_string()).collect(),
            rows: rows.iter().map(|r| columns.render(r)).collect(),
        }
    }
}

/// One admin table: display name, placeholder rows, admin-UI route, backend route and the
/// column sets for the list and detail views. `base_url` and `be_url` are independent.
#[derive(Clone, Debug)]
pub struct EntityDescriptor<T> {
    pub name: &'static str,
    pub dummy_data: Vec<T>,
    pub base_url: &'static str,
    pub be_url: &'static str,
    pub list: ColumnSet,
    pub show: ColumnSet,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn related_object_renders_its_option_field() {
        let cols = ColumnSet::new(&["id", "user", "isAuth", "token"]).option("user", "email");
        let row = json!({
            "id": "e1",
            "user": { "id": "u1", "email": "a@novel.io" },
            "isAuth": true,
            "token": null
        });
        assert_eq!(cols.render(&row), vec!["e1", "a@novel.io", "true", ""]);
    }

    #[test]
    fn missing_values_render_empty() {
        let cols = ColumnSet::new(&["id", "user", "page"]);
        let row = json!({ "id": "b1", "user": null });
        assert_eq!(cols.render(&row), vec!["b1", "", ""]);
        let row = json!({ "id": "b1", "user": { "id": "u1" }, "page": 3 });
        assert_eq!(cols.render(&row), vec!["b1", "u1", "3"]);
    }

    #[test]
    fn table_keeps_header_order() {
        let cols = ColumnSet::new(&["name", "id"]);
        let t = Table::new(&cols, &[json!({"id": 1, "name": "fantasy"})]);
        assert_eq!(t.header, vec!["name", "id"]);
        assert_eq!(t.rows, vec![vec!["fantasy".to_string(), "1".to_string()]]);
    }
}
