//! batchread - fixed-memory keyset batch reads over a relational executor
//!
//! Traverses large result sets in bounded chunks: repeated limited queries
//! advanced by a monotonic primary-key cursor, each batch handed to the
//! caller as a lazy read-only view.

pub mod batch;
pub mod errors;
pub mod executor;
pub mod observability;
pub mod reader;
pub mod result;
pub mod schema;
pub mod source;
