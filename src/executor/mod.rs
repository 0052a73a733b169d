//! Executor collaborator: runs relation specs, returns raw rows

mod memory;
mod rows;

pub use memory::{MemoryExecutor, MemoryTable};
pub use rows::Rows;

use crate::errors::ReadResult;
use crate::source::RelationSpec;

/// Executes one relation spec against the underlying store.
///
/// The engine issues specs strictly serially: a new call never starts
/// before the previous batch has been fully delivered to the caller, so
/// implementations need no locking on the engine's account. Timeout
/// policy belongs to the implementation; the engine enforces none.
pub trait Executor {
    /// Run the spec, returning its rows in spec order
    fn execute(&mut self, spec: &RelationSpec) -> ReadResult<Rows>;
}
