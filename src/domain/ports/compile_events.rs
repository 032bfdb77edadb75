//! Compile Event Port
//!
//! Provides an observable interface for graph compilation.
//! Enables progress logging, JSON event streams, and debugging without the
//! compiler printing anything itself.

use std::path::PathBuf;

use crate::domain::entities::Ineligibility;

/// How an entry's raw bytes are produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionKind {
    /// Byte range copied out of an archive container
    Archive,
    /// Loose file copied from the base directory
    Root,
}

impl ExtractionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionKind::Archive => "archive",
            ExtractionKind::Root => "root",
        }
    }
}

/// Event emitted during compilation
#[derive(Debug, Clone)]
pub enum CompileEvent {
    /// Compilation started
    Started {
        index_path: PathBuf,
        entry_count: usize,
    },

    /// Provenance comments and path variables written
    HeaderWritten,

    /// Rule declarations written
    RulesWritten { count: usize },

    /// Extractor build edges written
    ToolEdgesWritten,

    /// Entry produced its extraction and transformation edges
    EntryCompiled {
        key: String,
        extraction: ExtractionKind,
        raw_output: String,
        final_output: String,
    },

    /// Entry excluded from the graph
    EntrySkipped {
        key: String,
        reasons: Vec<Ineligibility>,
    },

    /// Aggregate edge written; the graph is complete
    Completed { compiled: usize, skipped: usize },
}

/// Trait for receiving compile events
///
/// Implementations can be:
/// - TracingEventSink: log lines through `tracing`
/// - JsonEventSink: NDJSON event stream for CI
/// - NoopEventSink: Silent operation
pub trait CompileEventSink: Send + Sync {
    /// Handle a compile event
    fn on_event(&self, event: CompileEvent);

    /// Check if this sink wants per-entry events
    ///
    /// Large indexes hold hundreds of thousands of entries; summary-only
    /// sinks skip building those events entirely.
    fn wants_detailed_events(&self) -> bool {
        true
    }
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl CompileEventSink for NoopEventSink {
    fn on_event(&self, _event: CompileEvent) {}

    fn wants_detailed_events(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Test event sink that records all events
    struct RecordingEventSink {
        events: Arc<Mutex<Vec<CompileEvent>>>,
    }

    impl CompileEventSink for RecordingEventSink {
        fn on_event(&self, event: CompileEvent) {
            self.events.lock().unwrap().push(event);
        }
    }

    #[test]
    fn recording_sink_captures_events() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = RecordingEventSink {
            events: events.clone(),
        };

        sink.on_event(CompileEvent::Started {
            index_path: PathBuf::from("data.idx"),
            entry_count: 5,
        });
        sink.on_event(CompileEvent::HeaderWritten);

        assert_eq!(events.lock().unwrap().len(), 2);
        assert!(sink.wants_detailed_events());
    }

    #[test]
    fn noop_sink_wants_no_details() {
        assert!(!NoopEventSink.wants_detailed_events());
    }

    #[test]
    fn extraction_kind_names() {
        assert_eq!(ExtractionKind::Archive.as_str(), "archive");
        assert_eq!(ExtractionKind::Root.as_str(), "root");
    }
}
