//! Lazy read-only view over one batch

use std::cell::OnceCell;
use std::sync::Arc;

use serde_json::Value;

use crate::batch::Batch;
use crate::schema::TableSchema;

use super::Record;

/// Access mode for a result set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultMode {
    /// Rows materialize lazily into cached [`Record`]s
    Readonly,
    /// Raw rows only: no record wrapping, no cast overhead
    Raw,
}

/// Read-only view over one batch of rows.
///
/// In readonly mode each row becomes a [`Record`] on first access and is
/// cached for this set's lifetime; re-enumeration reuses the cached
/// records. In raw mode only the raw row surface is exposed. Nothing is
/// cached across batches.
#[derive(Debug)]
pub struct ResultSet {
    batch: Batch,
    schema: Arc<TableSchema>,
    mode: ResultMode,
    cache: Vec<OnceCell<Record>>,
}

impl ResultSet {
    pub(crate) fn new(batch: Batch, schema: Arc<TableSchema>, mode: ResultMode) -> Self {
        let cache = match mode {
            ResultMode::Readonly => (0..batch.len()).map(|_| OnceCell::new()).collect(),
            ResultMode::Raw => Vec::new(),
        };
        Self {
            batch,
            schema,
            mode,
            cache,
        }
    }

    /// Row count, without materializing any record
    pub fn size(&self) -> usize {
        self.batch.len()
    }

    /// True when the set holds at least one row
    pub fn any(&self) -> bool {
        self.size() > 0
    }

    /// Access mode of this set
    pub fn mode(&self) -> ResultMode {
        self.mode
    }

    /// True in raw mode
    pub fn is_raw(&self) -> bool {
        self.mode == ResultMode::Raw
    }

    /// Projected column names
    pub fn columns(&self) -> &[String] {
        self.batch.rows().columns()
    }

    /// The batch's raw rows, unmodified
    pub fn rows(&self) -> &[Vec<Value>] {
        self.batch.rows().rows()
    }

    /// Raw row by position
    pub fn row(&self, index: usize) -> Option<&[Value]> {
        self.batch.rows().rows().get(index).map(Vec::as_slice)
    }

    /// Record by position, built on first access and cached for this
    /// set's lifetime. `None` past the end or in raw mode.
    pub fn record(&self, index: usize) -> Option<&Record> {
        if self.is_raw() {
            return None;
        }
        let cell = self.cache.get(index)?;
        Some(cell.get_or_init(|| {
            Record::from_row(
                &self.schema,
                self.batch.rows().columns(),
                &self.batch.rows().rows()[index],
            )
        }))
    }

    /// First record by position
    pub fn first(&self) -> Option<&Record> {
        self.record(0)
    }

    /// Last record by position
    pub fn last(&self) -> Option<&Record> {
        self.size().checked_sub(1).and_then(|i| self.record(i))
    }

    /// Iterate records in row order, materializing lazily. Empty in raw
    /// mode.
    pub fn records(&self) -> impl Iterator<Item = &Record> + '_ {
        (0..self.size()).filter_map(move |i| self.record(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::Rows;
    use crate::schema::FieldType;
    use serde_json::json;

    fn schema() -> Arc<TableSchema> {
        Arc::new(
            TableSchema::new("users", "id")
                .with_column("id", FieldType::Int)
                .with_column("name", FieldType::String),
        )
    }

    fn sample_batch() -> Batch {
        let rows = Rows::new(
            vec!["id".to_string(), "name".to_string()],
            vec![
                vec![json!(1), json!("alice")],
                vec![json!(2), json!("bob")],
                vec![json!(3), json!("carol")],
            ],
        );
        Batch::keyed(rows, "id").unwrap()
    }

    fn readonly_set() -> ResultSet {
        ResultSet::new(sample_batch(), schema(), ResultMode::Readonly)
    }

    #[test]
    fn test_size_and_any() {
        let set = readonly_set();
        assert_eq!(set.size(), 3);
        assert!(set.any());

        let empty = ResultSet::new(
            Batch::keyed(Rows::empty(), "id").unwrap(),
            schema(),
            ResultMode::Readonly,
        );
        assert_eq!(empty.size(), 0);
        assert!(!empty.any());
    }

    #[test]
    fn test_first_and_last() {
        let set = readonly_set();
        assert_eq!(set.first().unwrap().id(), Some(&json!(1)));
        assert_eq!(set.last().unwrap().id(), Some(&json!(3)));
    }

    #[test]
    fn test_records_cached_for_set_lifetime() {
        let set = readonly_set();
        let first: *const Record = set.record(1).unwrap();
        let second: *const Record = set.record(1).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_re_enumeration_reuses_cache() {
        let set = readonly_set();
        let pass1: Vec<*const Record> = set.records().map(|r| r as *const Record).collect();
        let pass2: Vec<*const Record> = set.records().map(|r| r as *const Record).collect();
        assert_eq!(pass1, pass2);
        assert_eq!(pass1.len(), 3);
    }

    #[test]
    fn test_raw_mode_exposes_rows_not_records() {
        let set = ResultSet::new(sample_batch(), schema(), ResultMode::Raw);
        assert!(set.is_raw());
        assert_eq!(set.size(), 3);
        assert_eq!(set.record(0), None);
        assert_eq!(set.first(), None);
        assert_eq!(set.records().count(), 0);
        assert_eq!(set.row(0), Some(&[json!(1), json!("alice")][..]));
        assert_eq!(set.columns(), &["id".to_string(), "name".to_string()]);
    }

    #[test]
    fn test_debug_formatting() {
        let set = readonly_set();
        let dump = format!("{:?}", set);
        assert!(dump.contains("ResultSet"));
        assert!(dump.contains("Readonly"));
    }

    #[test]
    fn test_out_of_range_positions() {
        let set = readonly_set();
        assert_eq!(set.record(3), None);
        assert_eq!(set.row(3), None);
    }
}
