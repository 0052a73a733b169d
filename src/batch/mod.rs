//! Batch iteration engine
//!
//! One page of rows per bounded query, advanced by a monotonic
//! primary-key cursor.

mod iterator;

pub use iterator::BatchCursorIterator;

use serde_json::Value;

use crate::errors::{ReadError, ReadResult};
use crate::executor::Rows;

/// One page of rows returned by a single bounded query, together with
/// the primary-key value of its last row (the next cursor).
///
/// Dropped once the consumer's callback returns; nothing is cached
/// across batches.
#[derive(Debug, Clone)]
pub struct Batch {
    rows: Rows,
    next_cursor: Option<Value>,
}

impl Batch {
    /// Wrap one bounded query's output, extracting the next cursor from
    /// the last row's primary-key cell.
    ///
    /// Fails with `MissingKey` when the page is non-empty but the
    /// primary key is absent, either because the projection omits the
    /// column or because the last row is too short to carry its cell:
    /// without the key the next cursor cannot be computed, and
    /// truncating the traversal silently is not an option.
    pub fn keyed(rows: Rows, primary_key: &str) -> ReadResult<Self> {
        if rows.is_empty() {
            return Ok(Self {
                rows,
                next_cursor: None,
            });
        }

        let idx = rows
            .column_index(primary_key)
            .ok_or_else(|| ReadError::missing_key(primary_key))?;
        let next_cursor = rows
            .cell(rows.len() - 1, idx)
            .cloned()
            .ok_or_else(|| ReadError::missing_key(primary_key))?;

        Ok(Self {
            rows,
            next_cursor: Some(next_cursor),
        })
    }

    /// Wrap a single unkeyed fetch; no cursor is extracted, so custom
    /// projections without the primary key are fine here
    pub fn unkeyed(rows: Rows) -> Self {
        Self {
            rows,
            next_cursor: None,
        }
    }

    /// The page's raw rows
    pub fn rows(&self) -> &Rows {
        &self.rows
    }

    /// Row count
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the page holds no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Primary-key value of the last row, if this page was keyed
    pub fn next_cursor(&self) -> Option<&Value> {
        self.next_cursor.as_ref()
    }
}
