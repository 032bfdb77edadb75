//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `ninja/` - Ninja syntax graph writer
//! - `graph/` - In-memory recording graph writer
//! - `index/` - Index readers (JSON entry manifest)
//! - `events/` - Compile event sinks (tracing, NDJSON)
//! - `fs/` - Atomic writes and content hashing

pub mod events;
pub mod fs;
pub mod graph;
pub mod index;
pub mod ninja;

// Re-export for convenience
pub use events::{JsonEventSink, TracingEventSink};
pub use fs::LocalFs;
pub use graph::RecordingGraphWriter;
pub use index::JsonManifestReader;
pub use ninja::NinjaWriter;
