//! Generate Result

use std::path::PathBuf;

use crate::domain::services::CompileSummary;
use crate::domain::value_objects::ContentHash;

/// What happened to the build file on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteStatus {
    /// New content was persisted
    Written,
    /// Existing file already had this content and was left untouched
    Unchanged,
}

impl WriteStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WriteStatus::Written => "written",
            WriteStatus::Unchanged => "unchanged",
        }
    }
}

/// Result of a generate operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateResult {
    /// Path of the build file
    pub output: PathBuf,
    pub status: WriteStatus,
    /// Hash of the generated content
    pub hash: ContentHash,
    pub summary: CompileSummary,
}

impl GenerateResult {
    pub fn has_changes(&self) -> bool {
        self.status == WriteStatus::Written
    }
}
