//! Raw tabular query output

use serde_json::Value;

/// Ordered raw rows plus column metadata, as returned by one query
/// execution
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rows {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Rows {
    /// Rows under the given projection
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        Self { columns, rows }
    }

    /// No columns, no rows
    pub fn empty() -> Self {
        Self::default()
    }

    /// Projected column names, in projection order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Raw rows, cells in projection order
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Row count
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when no rows were returned
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of a named column in this projection
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cell at the given row and column index
    pub fn cell(&self, row: usize, column: usize) -> Option<&Value> {
        self.rows.get(row).and_then(|r| r.get(column))
    }
}
