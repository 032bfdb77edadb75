//! Portship - compile a VFS archive index into an incremental Ninja build graph
//!
//! Each eligible index entry becomes two build edges: one extracting its raw
//! bytes out of an archive container, one converting (or copying) the raw
//! asset into its final form. A `raw_assets` phony target aggregates every
//! extraction. Ninja then extracts and converts in parallel and only re-runs
//! what changed.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

// Re-exports for convenience
pub use application::{GenerateOptions, GenerateResult, GenerateUseCase, InspectUseCase};
pub use config::Config;
pub use domain::entities::{BuildEdge, Entry, Ineligibility, RuleDecl, VfsIndex};
pub use domain::policies::{Conversion, ConversionPolicy};
pub use domain::ports::{CompileEvent, CompileEventSink, GraphWriter, IndexReader};
pub use domain::services::{CompileError, CompileSummary, CompilerSettings, GraphCompiler};
pub use error::{PortshipError, PortshipResult};
pub use infrastructure::{JsonManifestReader, NinjaWriter, RecordingGraphWriter};
