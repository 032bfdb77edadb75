//! Ninja build file rendering

mod writer;

pub use writer::{escape_path, NinjaWriter, DEFAULT_LINE_WIDTH};
