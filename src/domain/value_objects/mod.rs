//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod asset_path;
mod hash;

pub use asset_path::{
    canonical_node, canonical_relative, escape_literal, to_graph_separators, OutputPath, PathError,
    SEPARATOR,
};
pub use hash::ContentHash;
