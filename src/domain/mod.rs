//! Domain Layer
//!
//! The core of Portship: the index model, the conversion policy and the
//! graph compiler. Nothing here touches the file system.
//!
//! ## Structure
//!
//! - `entities/` - Index entries, the decoded index, build-graph units
//! - `value_objects/` - Output paths, content hashes
//! - `services/` - The graph compiler
//! - `policies/` - Extension to conversion-rule mapping
//! - `ports/` - Interfaces for graph writers, index readers and event sinks

pub mod entities;
pub mod policies;
pub mod ports;
pub mod services;
pub mod value_objects;
