//! Domain Entities
//!
//! - `Entry` - One archived asset from the VFS index
//! - `VfsIndex` - The ordered entry collection plus provenance paths
//! - `BuildEdge` / `RuleDecl` / `GraphStatement` - Build graph units

mod build_graph;
mod entry;
mod index;

pub use build_graph::{BuildEdge, GraphStatement, RuleDecl};
pub use entry::{Entry, Ineligibility};
pub use index::VfsIndex;
