//! Table schema: name, primary key, declared column types

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::types::FieldType;

/// Declared schema for one table
///
/// Columns not declared here still travel through the read path; their
/// cells simply pass through casts unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableSchema {
    table: String,
    primary_key: String,
    columns: BTreeMap<String, FieldType>,
}

impl TableSchema {
    /// Schema with no declared columns
    pub fn new(table: impl Into<String>, primary_key: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            primary_key: primary_key.into(),
            columns: BTreeMap::new(),
        }
    }

    /// Declare a column and its type
    pub fn with_column(mut self, name: impl Into<String>, field_type: FieldType) -> Self {
        self.columns.insert(name.into(), field_type);
        self
    }

    /// Table name
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Declared primary-key column name
    pub fn primary_key(&self) -> &str {
        &self.primary_key
    }

    /// Declared type of a column, if any
    pub fn column_type(&self, name: &str) -> Option<FieldType> {
        self.columns.get(name).copied()
    }

    /// Cast one cell per the declared column rule; undeclared columns
    /// pass through unchanged
    pub fn cast_column(&self, column: &str, raw: Value) -> Value {
        match self.columns.get(column) {
            Some(field_type) => field_type.cast(raw),
            None => raw,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn users_schema() -> TableSchema {
        TableSchema::new("users", "id")
            .with_column("id", FieldType::Int)
            .with_column("name", FieldType::String)
    }

    #[test]
    fn test_primary_key_accessor() {
        assert_eq!(users_schema().primary_key(), "id");
        assert_eq!(users_schema().table(), "users");
    }

    #[test]
    fn test_cast_declared_column() {
        let schema = users_schema();
        assert_eq!(schema.cast_column("id", json!("5")), json!(5));
    }

    #[test]
    fn test_undeclared_column_passes_through() {
        let schema = users_schema();
        assert_eq!(schema.cast_column("notes", json!("raw")), json!("raw"));
        assert_eq!(schema.column_type("notes"), None);
    }
}
