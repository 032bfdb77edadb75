//! Inspect Use Case
//!
//! Reports, per index entry, what `generate` would emit for it: the skip
//! reasons, the reason `generate` would reject it, or the extraction kind
//! with raw and final outputs. Nothing is written.

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::domain::ports::IndexReader;
use crate::domain::services::{GraphCompiler, PlanOutcome};
use crate::error::PortshipResult;

/// Decision for one entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectItem {
    /// Index key
    pub key: String,
    /// Stored path, original case
    pub path: String,
    pub outcome: PlanOutcome,
}

impl InspectItem {
    pub fn is_planned(&self) -> bool {
        matches!(self.outcome, PlanOutcome::Planned(_))
    }
}

/// Result of the inspect operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InspectResult {
    /// Index file that was inspected
    pub index_path: PathBuf,
    /// One item per entry, in index order
    pub items: Vec<InspectItem>,
    /// Entries that would be compiled
    pub planned: usize,
    /// Entries that would be skipped
    pub skipped: usize,
    /// Entries `generate` would fail on
    pub rejected: usize,
}

/// Inspect Use Case
pub struct InspectUseCase<R>
where
    R: IndexReader,
{
    reader: R,
    config: Config,
}

impl<R> InspectUseCase<R>
where
    R: IndexReader,
{
    pub fn new(reader: R, config: Config) -> Self {
        Self { reader, config }
    }

    /// Plan every entry of the index at `index`
    pub fn execute(&self, index: &Path) -> PortshipResult<InspectResult> {
        self.config.validate()?;

        let index = self.reader.read_index(index)?;
        let compiler = GraphCompiler::new(
            self.config.compiler_settings(),
            self.config.conversion_policy(),
        );

        let mut result = InspectResult {
            index_path: index.index_path().to_path_buf(),
            ..InspectResult::default()
        };

        for (key, outcome) in compiler.plan(&index) {
            match outcome {
                PlanOutcome::Planned(_) => result.planned += 1,
                PlanOutcome::Skipped(_) => result.skipped += 1,
                PlanOutcome::Rejected(_) => result.rejected += 1,
            }
            let path = index
                .get(key)
                .map(|entry| entry.path().to_string())
                .unwrap_or_default();
            result.items.push(InspectItem {
                key: key.to_string(),
                path,
                outcome,
            });
        }

        Ok(result)
    }
}
