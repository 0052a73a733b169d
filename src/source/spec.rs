//! Validated query specification handed to the executor

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Sort on a single column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBy {
    /// Column to sort by
    pub column: String,
    /// Ascending when true
    pub ascending: bool,
}

impl OrderBy {
    /// Ascending order on the given column
    pub fn asc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            ascending: true,
        }
    }

    /// Descending order on the given column
    pub fn desc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            ascending: false,
        }
    }
}

/// Exclusive lower bound on a key column: matching rows satisfy
/// `column > value`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CursorBound {
    /// Bounded column (the table's primary key)
    pub column: String,
    /// Last-seen key; rows at or below it are excluded
    pub value: Value,
}

impl CursorBound {
    /// Bound the given column to values strictly above `value`
    pub fn new(column: impl Into<String>, value: Value) -> Self {
        Self {
            column: column.into(),
            value,
        }
    }
}

/// One executable read: equality filters, optional order and limit, and
/// an optional exclusive cursor bound.
///
/// Built once per call; the executor renders and runs it. Between
/// batches the engine only ever advances the cursor, nothing else.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelationSpec {
    /// Source table
    pub table: String,
    /// Equality filters, column name to required value
    pub filters: BTreeMap<String, Value>,
    /// Result ordering; batch fetches force primary-key ascending
    pub order: Option<OrderBy>,
    /// Row cap; batch fetches force the batch size
    pub limit: Option<u64>,
    /// Exclusive lower bound on the primary key
    pub cursor: Option<CursorBound>,
    /// Read path marker; no write ever travels through a spec
    pub readonly: bool,
}
