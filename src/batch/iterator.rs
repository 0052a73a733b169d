//! Cursor-driven batch iteration
//!
//! State machine: START -> FETCH -> {DONE | ERROR | YIELD -> FETCH}.
//! At most one query is in flight; the consumer pulls the next batch
//! only after it has finished with the previous one, which bounds peak
//! memory to one batch of rows.

use std::sync::Arc;

use crate::errors::{ReadError, ReadResult};
use crate::executor::Executor;
use crate::result::{ResultMode, ResultSet};
use crate::schema::TableSchema;
use crate::source::{CursorBound, RelationSpec};

use super::Batch;

enum IterState {
    /// The next pull issues a query
    Fetch,
    /// Terminal: end of data reached or an error already yielded
    Done,
}

/// Pull-based iterator over the batches of a keyset-paginated traversal
///
/// Yields one [`ResultSet`] per batch, in strictly ascending primary-key
/// order, never revisiting a key. The iterator is fused and not
/// restartable; dropping it (or breaking out of the consuming loop) is
/// cancellation, since no work happens between pulls.
pub struct BatchCursorIterator<'a, E: Executor> {
    executor: &'a mut E,
    schema: Arc<TableSchema>,
    spec: RelationSpec,
    batch_size: usize,
    state: IterState,
}

impl<'a, E: Executor> BatchCursorIterator<'a, E> {
    /// Start a traversal from a batch spec.
    ///
    /// The spec carries the forced primary-key order, the forced limit,
    /// and the optional starting cursor. `batch_size` mirrors the spec's
    /// limit and decides when a short batch ends the traversal.
    pub(crate) fn new(
        executor: &'a mut E,
        schema: Arc<TableSchema>,
        spec: RelationSpec,
        batch_size: usize,
    ) -> Self {
        Self {
            executor,
            schema,
            spec,
            batch_size,
            state: IterState::Fetch,
        }
    }

    fn fetch(&mut self) -> ReadResult<Option<ResultSet>> {
        let rows = self.executor.execute(&self.spec)?;
        if rows.is_empty() {
            self.state = IterState::Done;
            return Ok(None);
        }

        let batch = Batch::keyed(rows, self.schema.primary_key())?;

        if batch.len() < self.batch_size {
            // Short batch: end of data, no further query needed
            self.state = IterState::Done;
        } else {
            match batch.next_cursor() {
                Some(key) => {
                    self.spec.cursor =
                        Some(CursorBound::new(self.schema.primary_key(), key.clone()));
                }
                // A keyed non-empty batch always carries a cursor;
                // failing loudly beats truncating the traversal
                None => return Err(ReadError::missing_key(self.schema.primary_key())),
            }
        }

        Ok(Some(ResultSet::new(
            batch,
            Arc::clone(&self.schema),
            ResultMode::Readonly,
        )))
    }
}

impl<'a, E: Executor> Iterator for BatchCursorIterator<'a, E> {
    type Item = ReadResult<ResultSet>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.state {
            IterState::Done => None,
            IterState::Fetch => match self.fetch() {
                Ok(Some(set)) => Some(Ok(set)),
                Ok(None) => None,
                Err(err) => {
                    self.state = IterState::Done;
                    Some(Err(err))
                }
            },
        }
    }
}
