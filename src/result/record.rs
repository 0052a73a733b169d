//! Immutable schema-cast row snapshot

use std::collections::BTreeMap;

use serde_json::Value;

use crate::errors::{ReadError, ReadResult};
use crate::schema::TableSchema;

/// One row, detached from the store: every projected cell cast per the
/// schema's column rules, frozen at construction.
///
/// Records carry no identity tracking and no write path. The persistence
/// stubs exist only to fail loudly if a caller tries.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    primary_key: String,
    values: BTreeMap<String, Value>,
}

impl Record {
    /// Build a record from one raw row under the given projection
    pub(crate) fn from_row(schema: &TableSchema, columns: &[String], row: &[Value]) -> Self {
        let mut values = BTreeMap::new();
        for (i, column) in columns.iter().enumerate() {
            let raw = row.get(i).cloned().unwrap_or(Value::Null);
            values.insert(column.clone(), schema.cast_column(column, raw));
        }
        Self {
            primary_key: schema.primary_key().to_string(),
            values,
        }
    }

    /// Cast value of the named column, if projected
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.values.get(column)
    }

    /// The schema's declared primary-key value for this row.
    ///
    /// Batched reads guarantee the key is projected: a batch missing it
    /// fails before any record is built. A single fetch with a custom
    /// projection may return `None` here.
    pub fn id(&self) -> Option<&Value> {
        self.values.get(&self.primary_key)
    }

    /// Projected columns and their cast values, in column-name order
    pub fn columns(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of projected columns
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when nothing was projected
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Records are detached from any write path; saving always fails
    pub fn save(&self) -> ReadResult<()> {
        Err(ReadError::unsupported("save"))
    }

    /// Records are detached from any write path; deleting always fails
    pub fn destroy(&self) -> ReadResult<()> {
        Err(ReadError::unsupported("destroy"))
    }
}
