//! Event Sink Implementations
//!
//! Provides concrete implementations of CompileEventSink:
//! - JsonEventSink: NDJSON output for CI/automation
//! - TracingEventSink: log records through `tracing`

mod json;
mod log;

pub use json::JsonEventSink;
pub use log::TracingEventSink;
