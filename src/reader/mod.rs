//! Public read API: batched traversal and single fetches
//!
//! Composes a query source, an executor, and a logger into the read
//! surface. Batching is a capability any source gains by composition
//! here, not something injected into the source type itself.

use std::sync::Arc;

use crate::batch::{Batch, BatchCursorIterator};
use crate::errors::ReadResult;
use crate::executor::Executor;
use crate::observability::Logger;
use crate::result::{ResultMode, ResultSet};
use crate::source::{QuerySource, QuerySpecBuilder, ReadOptions};

/// Batched read access over one query source
pub struct BatchReader<'a, S: QuerySource, E: Executor> {
    source: &'a S,
    executor: &'a mut E,
    logger: &'a dyn Logger,
}

impl<'a, S: QuerySource, E: Executor> BatchReader<'a, S, E> {
    /// Compose a reader from its collaborators
    pub fn new(source: &'a S, executor: &'a mut E, logger: &'a dyn Logger) -> Self {
        Self {
            source,
            executor,
            logger,
        }
    }

    /// Single readonly fetch of the full dataset, no batching
    pub fn fetch_all(&mut self) -> ReadResult<ResultSet> {
        self.fetch_single(ResultMode::Readonly)
    }

    /// Single raw-mode fetch of the full dataset: raw rows, no record
    /// wrapping
    pub fn raw_results(&mut self) -> ReadResult<ResultSet> {
        self.fetch_single(ResultMode::Raw)
    }

    /// Pull iterator over the batches selected by `options`.
    ///
    /// Options are validated and the batch spec built up front, so a
    /// configuration error surfaces before any query runs; the first
    /// query itself runs on the first pull. Dropping the iterator
    /// cancels the traversal.
    pub fn batches(&mut self, options: &ReadOptions) -> ReadResult<BatchCursorIterator<'_, E>> {
        let builder = QuerySpecBuilder::new(self.logger);
        let spec = builder.build_for_batch_fetch(self.source, options)?;
        Ok(BatchCursorIterator::new(
            self.executor,
            Arc::clone(self.source.schema()),
            spec,
            options.effective_batch_size(),
        ))
    }

    /// Traverse the dataset selected by `options`, invoking `callback`
    /// once per batch.
    ///
    /// Empty options short-circuit to a single fetch: the callback runs
    /// exactly once with the full readonly result set. Otherwise batches
    /// arrive in strictly ascending primary-key order, each owned by the
    /// callback and dropped when it returns.
    pub fn for_each_batch<F>(&mut self, options: &ReadOptions, mut callback: F) -> ReadResult<()>
    where
        F: FnMut(ResultSet),
    {
        if options.is_empty() {
            callback(self.fetch_single(ResultMode::Readonly)?);
            return Ok(());
        }

        for set in self.batches(options)? {
            callback(set?);
        }
        Ok(())
    }

    fn fetch_single(&mut self, mode: ResultMode) -> ReadResult<ResultSet> {
        let builder = QuerySpecBuilder::new(self.logger);
        let spec = builder.build_for_single_fetch(self.source);
        let rows = self.executor.execute(&spec)?;
        Ok(ResultSet::new(
            Batch::unkeyed(rows),
            Arc::clone(self.source.schema()),
            mode,
        ))
    }
}
