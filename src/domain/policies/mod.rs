//! Domain Policies
//!
//! Business rules that decide what the compiler emits per entry.

mod conversion;

pub use conversion::{Conversion, ConversionPolicy, PolicyError, Transform, BUILTIN_RULES};
