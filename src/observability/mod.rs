//! Structured logging for the read engine

mod logger;

pub use logger::{CaptureLogger, JsonLogger, Logger, NullLogger};
