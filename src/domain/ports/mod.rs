//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod compile_events;
pub mod graph_writer;
pub mod index_reader;

pub use compile_events::{CompileEvent, CompileEventSink, ExtractionKind, NoopEventSink};
pub use graph_writer::GraphWriter;
pub use index_reader::{IndexError, IndexReader};
