//! Generate Module
//!
//! Compiles an index into a Ninja build file on disk.
//!
//! ## Structure
//!
//! - `options` - `GenerateOptions`
//! - `result` - `GenerateResult`, `WriteStatus`
//! - `use_case` - `GenerateUseCase`
//!
//! ## Usage
//!
//! ```ignore
//! use portship::application::generate::{GenerateOptions, GenerateUseCase};
//!
//! let use_case = GenerateUseCase::new(JsonManifestReader::new(), config);
//! let result = use_case.execute(&GenerateOptions::new("data.json").with_dest("out"))?;
//! ```

mod options;
mod result;
mod use_case;

pub use options::GenerateOptions;
pub use result::{GenerateResult, WriteStatus};
pub use use_case::GenerateUseCase;

#[cfg(test)]
mod tests;
