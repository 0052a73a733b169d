//! Schema collaborator: table metadata and per-column cast rules
//!
//! The read engine consumes exactly two things from a schema: the name of
//! the primary-key column and a cast rule per declared column.

mod table;
mod types;

pub use table::TableSchema;
pub use types::FieldType;
