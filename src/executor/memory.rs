//! In-memory executor
//!
//! Reference implementation of the [`Executor`] collaborator over
//! in-memory tables: applies equality filters, the cursor bound,
//! ordering, and limit the way a SQL backend would, and projects each
//! table's configured column list. Doubles as the test harness for the
//! batch engine.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde_json::Value;

use crate::errors::{ReadError, ReadResult};
use crate::source::RelationSpec;

use super::{Executor, Rows};

/// One in-memory table: column names plus row tuples
#[derive(Debug, Clone, Default)]
pub struct MemoryTable {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
    projection: Option<Vec<String>>,
}

impl MemoryTable {
    /// Empty table with the given columns
    pub fn new(columns: &[&str]) -> Self {
        Self {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
            projection: None,
        }
    }

    /// Append a row; cells in column order
    pub fn insert(&mut self, row: Vec<Value>) {
        self.rows.push(row);
    }

    /// Restrict the columns queries return, like a custom SELECT list.
    /// Filters and cursor bounds still see the full row.
    pub fn project(&mut self, columns: &[&str]) {
        self.projection = Some(columns.iter().map(|c| c.to_string()).collect());
    }

    fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    fn projected_columns(&self) -> &[String] {
        self.projection.as_deref().unwrap_or(&self.columns)
    }
}

/// Executor over a set of named in-memory tables
#[derive(Debug, Default)]
pub struct MemoryExecutor {
    tables: HashMap<String, MemoryTable>,
    executed: usize,
}

impl MemoryExecutor {
    /// Executor with no tables
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a table under the given name
    pub fn add_table(&mut self, name: impl Into<String>, table: MemoryTable) {
        self.tables.insert(name.into(), table);
    }

    /// Number of queries executed so far
    pub fn executed(&self) -> usize {
        self.executed
    }
}

impl Executor for MemoryExecutor {
    fn execute(&mut self, spec: &RelationSpec) -> ReadResult<Rows> {
        self.executed += 1;

        let table = self
            .tables
            .get(&spec.table)
            .ok_or_else(|| ReadError::execution(format!("unknown table `{}`", spec.table)))?;

        let mut matched: Vec<&Vec<Value>> = table
            .rows
            .iter()
            .filter(|row| row_matches(table, row, spec))
            .collect();

        if let Some(order) = &spec.order {
            if let Some(idx) = table.column_index(&order.column) {
                matched.sort_by(|a, b| {
                    let ord = compare_values(&a[idx], &b[idx]);
                    if order.ascending {
                        ord
                    } else {
                        ord.reverse()
                    }
                });
            }
        }

        if let Some(limit) = spec.limit {
            matched.truncate(limit as usize);
        }

        let out_columns = table.projected_columns().to_vec();
        let indices: Vec<usize> = out_columns
            .iter()
            .map(|name| {
                table
                    .column_index(name)
                    .ok_or_else(|| ReadError::execution(format!("unknown column `{}`", name)))
            })
            .collect::<ReadResult<_>>()?;

        let out_rows = matched
            .into_iter()
            .map(|row| indices.iter().map(|&i| row[i].clone()).collect())
            .collect();

        Ok(Rows::new(out_columns, out_rows))
    }
}

fn row_matches(table: &MemoryTable, row: &[Value], spec: &RelationSpec) -> bool {
    for (column, want) in &spec.filters {
        match table.column_index(column) {
            Some(idx) => {
                if &row[idx] != want {
                    return false;
                }
            }
            None => return false,
        }
    }

    if let Some(bound) = &spec.cursor {
        match table.column_index(&bound.column) {
            Some(idx) => {
                if compare_values(&row[idx], &bound.value) != Ordering::Greater {
                    return false;
                }
            }
            None => return false,
        }
    }

    true
}

/// Total order over JSON scalars: nulls first, then bools, numbers,
/// strings; mixed types compare by that rank
fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Null, Value::Null) => Ordering::Equal,
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}
