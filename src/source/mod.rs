//! Relation/source collaborator and the query specification it produces

mod builder;
mod options;
mod spec;

pub use builder::QuerySpecBuilder;
pub use options::{ReadOptions, DEFAULT_BATCH_SIZE};
pub use spec::{CursorBound, OrderBy, RelationSpec};

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;

use crate::schema::TableSchema;

/// A query source: the relation a caller scoped before handing it to the
/// read engine.
///
/// Any source type takes on batched reading by being composed into a
/// [`crate::reader::BatchReader`]; the engine consumes only this
/// surface.
pub trait QuerySource {
    /// Schema handle for the source table
    fn schema(&self) -> &Arc<TableSchema>;

    /// Equality filters the caller already scoped onto the source
    fn base_filters(&self) -> &BTreeMap<String, Value>;

    /// Ordering carried by the source, if any; overridden for batch
    /// reads with a warning
    fn base_order(&self) -> Option<&OrderBy>;

    /// Limit carried by the source, if any; overridden for batch reads
    /// with a warning
    fn base_limit(&self) -> Option<u64>;
}

/// Plain table-backed query source
#[derive(Debug, Clone)]
pub struct TableSource {
    schema: Arc<TableSchema>,
    filters: BTreeMap<String, Value>,
    order: Option<OrderBy>,
    limit: Option<u64>,
}

impl TableSource {
    /// Unscoped source over the whole table
    pub fn new(schema: Arc<TableSchema>) -> Self {
        Self {
            schema,
            filters: BTreeMap::new(),
            order: None,
            limit: None,
        }
    }

    /// Scope an equality filter onto the source
    pub fn filter(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.insert(column.into(), value.into());
        self
    }

    /// Scope an ordering onto the source
    pub fn order(mut self, order: OrderBy) -> Self {
        self.order = Some(order);
        self
    }

    /// Scope a limit onto the source
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }
}

impl QuerySource for TableSource {
    fn schema(&self) -> &Arc<TableSchema> {
        &self.schema
    }

    fn base_filters(&self) -> &BTreeMap<String, Value> {
        &self.filters
    }

    fn base_order(&self) -> Option<&OrderBy> {
        self.order.as_ref()
    }

    fn base_limit(&self) -> Option<u64> {
        self.limit
    }
}
