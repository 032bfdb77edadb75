//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `GenerateUseCase` - Read an index, compile it, persist the build file
//! - `InspectUseCase` - Report per-entry decisions without writing anything

pub mod generate;
pub mod inspect;

pub use generate::{GenerateOptions, GenerateResult, GenerateUseCase, WriteStatus};
pub use inspect::{InspectItem, InspectResult, InspectUseCase};
