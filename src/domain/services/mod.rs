//! Domain Services
//!
//! Pure business logic operating on domain entities. I/O happens only through
//! the ports the services are handed.

mod graph_compiler;

pub use graph_compiler::{
    default_tool_source_root, CompileError, CompileSummary, CompilerSettings, EntryPlan,
    GraphCompiler, PlanOutcome, AGGREGATE_TARGET, EXTRACTOR,
};
