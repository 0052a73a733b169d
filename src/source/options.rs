//! Typed options for a batched read
//!
//! A named struct with documented defaults instead of a loose option
//! map, validated before any query executes.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::errors::{ReadError, ReadResult};

/// Rows per batch when `batch_size` is unset
pub const DEFAULT_BATCH_SIZE: usize = 1000;

/// Options for a batched read
#[derive(Debug, Clone, Default)]
pub struct ReadOptions {
    /// Exclusive starting cursor: the traversal visits rows with primary
    /// key strictly greater than this value. A present value is always
    /// honored as a cursor, zero-valued keys included.
    pub start: Option<Value>,
    /// Rows per batch; defaults to [`DEFAULT_BATCH_SIZE`]. Must be
    /// positive.
    pub batch_size: Option<usize>,
    /// Additional equality filters applied to every batch query. The
    /// keys `order` and `limit` are rejected: batch order and batch size
    /// are not negotiable.
    pub filters: BTreeMap<String, Value>,
}

impl ReadOptions {
    /// Empty options; selects the single-fetch path when passed as-is
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the starting cursor
    pub fn start(mut self, key: impl Into<Value>) -> Self {
        self.start = Some(key.into());
        self
    }

    /// Set the batch size
    pub fn batch_size(mut self, size: usize) -> Self {
        self.batch_size = Some(size);
        self
    }

    /// Add an equality filter on a column
    pub fn filter(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.insert(column.into(), value.into());
        self
    }

    /// True when no option is set
    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.batch_size.is_none() && self.filters.is_empty()
    }

    /// Batch size after defaulting
    pub fn effective_batch_size(&self) -> usize {
        self.batch_size.unwrap_or(DEFAULT_BATCH_SIZE)
    }

    /// Reject option combinations the engine cannot honor, before any
    /// query executes
    pub fn validate(&self) -> ReadResult<()> {
        if self.filters.contains_key("order") {
            return Err(ReadError::configuration(
                "You can't specify an order, it's forced to be batch order",
            ));
        }
        if self.filters.contains_key("limit") {
            return Err(ReadError::configuration(
                "You can't specify a limit, it's forced to be the batch size",
            ));
        }
        if self.batch_size == Some(0) {
            return Err(ReadError::configuration("batch_size must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_options() {
        assert!(ReadOptions::new().is_empty());
        assert!(!ReadOptions::new().batch_size(10).is_empty());
        assert!(!ReadOptions::new().start(5).is_empty());
        assert!(!ReadOptions::new().filter("customer_id", 1).is_empty());
    }

    #[test]
    fn test_batch_size_defaults_to_1000() {
        assert_eq!(ReadOptions::new().effective_batch_size(), 1000);
        assert_eq!(ReadOptions::new().batch_size(25).effective_batch_size(), 25);
    }

    #[test]
    fn test_order_filter_rejected() {
        let err = ReadOptions::new()
            .filter("order", "name ASC")
            .validate()
            .unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_limit_filter_rejected() {
        let err = ReadOptions::new().filter("limit", 50).validate().unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        let err = ReadOptions::new().batch_size(0).validate().unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_ordinary_filters_accepted() {
        let options = ReadOptions::new()
            .filter("customer_id", 1)
            .start(json!(0))
            .batch_size(10);
        assert!(options.validate().is_ok());
    }
}
