//! Read-only row surface handed to the caller

mod record;
mod result_set;

pub use record::Record;
pub use result_set::{ResultMode, ResultSet};
