//! Generate Options

use std::path::PathBuf;

/// Options for the generate use case
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Index file to compile
    pub index: PathBuf,
    /// Directory the build file is written into
    pub dest: PathBuf,
    /// Rewrite the build file even when its content is unchanged
    pub force: bool,
}

impl GenerateOptions {
    pub fn new(index: impl Into<PathBuf>) -> Self {
        Self {
            index: index.into(),
            dest: PathBuf::from("."),
            force: false,
        }
    }

    pub fn with_dest(mut self, dest: impl Into<PathBuf>) -> Self {
        self.dest = dest.into();
        self
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }
}
