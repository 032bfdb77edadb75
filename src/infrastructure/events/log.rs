//! Tracing Event Sink
//!
//! Narrates compilation through `tracing`. Milestones log at `info`,
//! per-entry decisions at `debug`/`trace` so they cost nothing unless the
//! filter asks for them.

use tracing::{debug, info, trace};

use crate::domain::ports::{CompileEvent, CompileEventSink};

/// Event sink that emits log records
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventSink {
    detailed: bool,
}

impl TracingEventSink {
    /// Sink that logs milestones only
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: also log one record per entry
    pub fn with_details(mut self, detailed: bool) -> Self {
        self.detailed = detailed;
        self
    }
}

impl CompileEventSink for TracingEventSink {
    fn on_event(&self, event: CompileEvent) {
        match event {
            CompileEvent::Started {
                index_path,
                entry_count,
            } => info!(
                index = %index_path.display(),
                entries = entry_count,
                "compiling build graph"
            ),
            CompileEvent::HeaderWritten => debug!("header written"),
            CompileEvent::RulesWritten { count } => debug!(count, "rules declared"),
            CompileEvent::ToolEdgesWritten => debug!("extractor edges written"),
            CompileEvent::EntryCompiled {
                key,
                extraction,
                raw_output,
                final_output,
            } => trace!(
                %key,
                extraction = extraction.as_str(),
                %raw_output,
                %final_output,
                "entry compiled"
            ),
            CompileEvent::EntrySkipped { key, reasons } => {
                let reasons: Vec<String> = reasons.iter().map(ToString::to_string).collect();
                debug!(%key, reasons = %reasons.join(","), "entry skipped");
            }
            CompileEvent::Completed { compiled, skipped } => {
                info!(compiled, skipped, "build graph complete")
            }
        }
    }

    fn wants_detailed_events(&self) -> bool {
        self.detailed
    }
}
