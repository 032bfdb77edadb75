//! Index readers

mod manifest;

pub use manifest::JsonManifestReader;
