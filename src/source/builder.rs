//! Builds validated relation specs from caller options
//!
//! Two entry points: single fetch (unconstrained, readonly) and batch
//! fetch (forced primary-key order, forced limit = batch size).

use crate::errors::ReadResult;
use crate::observability::Logger;

use super::{CursorBound, OrderBy, QuerySource, ReadOptions, RelationSpec};

/// Builds the query specification for a read call
///
/// The logger is injected so scope-override warnings reach whatever sink
/// the host wires in rather than a process-global logger.
pub struct QuerySpecBuilder<'a> {
    logger: &'a dyn Logger,
}

impl<'a> QuerySpecBuilder<'a> {
    /// Builder warning through the given logger
    pub fn new(logger: &'a dyn Logger) -> Self {
        Self { logger }
    }

    /// Spec for a single unconstrained readonly fetch
    pub fn build_for_single_fetch(&self, source: &dyn QuerySource) -> RelationSpec {
        RelationSpec {
            table: source.schema().table().to_string(),
            filters: source.base_filters().clone(),
            order: source.base_order().cloned(),
            limit: source.base_limit(),
            cursor: None,
            readonly: true,
        }
    }

    /// Spec for one batch fetch: ascending primary-key order and
    /// limit = batch size, neither negotiable.
    ///
    /// An `order` or `limit` filter key fails with a configuration
    /// error. A source that already carries an ordering or a limit only
    /// warns; its scope is overridden and execution proceeds.
    pub fn build_for_batch_fetch(
        &self,
        source: &dyn QuerySource,
        options: &ReadOptions,
    ) -> ReadResult<RelationSpec> {
        options.validate()?;

        if source.base_order().is_some() || source.base_limit().is_some() {
            self.logger.warn(
                "Scoped order and limit are ignored, it's forced to be batch order and batch size",
            );
        }

        let schema = source.schema();
        let mut filters = source.base_filters().clone();
        filters.extend(options.filters.clone());

        Ok(RelationSpec {
            table: schema.table().to_string(),
            filters,
            order: Some(OrderBy::asc(schema.primary_key())),
            limit: Some(options.effective_batch_size() as u64),
            cursor: options
                .start
                .clone()
                .map(|value| CursorBound::new(schema.primary_key(), value)),
            readonly: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observability::CaptureLogger;
    use crate::schema::{FieldType, TableSchema};
    use crate::source::TableSource;
    use serde_json::json;
    use std::sync::Arc;

    fn users_source() -> TableSource {
        let schema = Arc::new(
            TableSchema::new("users", "id")
                .with_column("id", FieldType::Int)
                .with_column("name", FieldType::String),
        );
        TableSource::new(schema)
    }

    #[test]
    fn test_single_fetch_is_unconstrained() {
        let logger = CaptureLogger::new();
        let builder = QuerySpecBuilder::new(&logger);
        let spec = builder.build_for_single_fetch(&users_source());

        assert_eq!(spec.table, "users");
        assert!(spec.readonly);
        assert!(spec.order.is_none());
        assert!(spec.limit.is_none());
        assert!(spec.cursor.is_none());
    }

    #[test]
    fn test_batch_fetch_forces_order_and_limit() {
        let logger = CaptureLogger::new();
        let builder = QuerySpecBuilder::new(&logger);
        let spec = builder
            .build_for_batch_fetch(&users_source(), &ReadOptions::new().batch_size(50))
            .unwrap();

        assert_eq!(spec.order, Some(OrderBy::asc("id")));
        assert_eq!(spec.limit, Some(50));
        assert!(logger.warnings().is_empty());
    }

    #[test]
    fn test_batch_fetch_default_limit() {
        let logger = CaptureLogger::new();
        let builder = QuerySpecBuilder::new(&logger);
        let spec = builder
            .build_for_batch_fetch(&users_source(), &ReadOptions::new().filter("name", "a"))
            .unwrap();

        assert_eq!(spec.limit, Some(1000));
    }

    #[test]
    fn test_scoped_order_warns_and_proceeds() {
        let logger = CaptureLogger::new();
        let builder = QuerySpecBuilder::new(&logger);
        let source = users_source().order(OrderBy::desc("name")).limit(5);

        let spec = builder
            .build_for_batch_fetch(&source, &ReadOptions::new().batch_size(10))
            .unwrap();

        // Scope is overridden, not honored
        assert_eq!(spec.order, Some(OrderBy::asc("id")));
        assert_eq!(spec.limit, Some(10));
        assert_eq!(logger.warnings().len(), 1);
        assert!(logger.warnings()[0].contains("forced to be batch order"));
    }

    #[test]
    fn test_order_filter_fails_before_build() {
        let logger = CaptureLogger::new();
        let builder = QuerySpecBuilder::new(&logger);
        let err = builder
            .build_for_batch_fetch(
                &users_source(),
                &ReadOptions::new().filter("order", "name ASC"),
            )
            .unwrap_err();

        assert!(err.is_configuration());
    }

    #[test]
    fn test_start_becomes_cursor_bound() {
        let logger = CaptureLogger::new();
        let builder = QuerySpecBuilder::new(&logger);
        let spec = builder
            .build_for_batch_fetch(&users_source(), &ReadOptions::new().start(42))
            .unwrap();

        assert_eq!(spec.cursor, Some(CursorBound::new("id", json!(42))));
    }

    #[test]
    fn test_zero_start_is_a_valid_cursor() {
        let logger = CaptureLogger::new();
        let builder = QuerySpecBuilder::new(&logger);
        let spec = builder
            .build_for_batch_fetch(&users_source(), &ReadOptions::new().start(0))
            .unwrap();

        assert_eq!(spec.cursor, Some(CursorBound::new("id", json!(0))));
    }

    #[test]
    fn test_filters_merge_source_then_options() {
        let logger = CaptureLogger::new();
        let builder = QuerySpecBuilder::new(&logger);
        let source = users_source().filter("name", "alice");
        let spec = builder
            .build_for_batch_fetch(&source, &ReadOptions::new().filter("active", true))
            .unwrap();

        assert_eq!(spec.filters.get("name"), Some(&json!("alice")));
        assert_eq!(spec.filters.get("active"), Some(&json!(true)));
    }
}
