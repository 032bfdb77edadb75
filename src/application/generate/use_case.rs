//! Generate Use Case
//!
//! Orchestrates one generation:
//! 1. Validate the config
//! 2. Read the index
//! 3. Compile it into an in-memory Ninja file
//! 4. Persist the file atomically, unless its content is unchanged
//!
//! Nothing is written when any step fails.

use std::sync::Arc;

use tracing::{debug, info};

use crate::config::Config;
use crate::domain::ports::{CompileEventSink, IndexReader, NoopEventSink};
use crate::domain::services::GraphCompiler;
use crate::domain::value_objects::ContentHash;
use crate::error::PortshipResult;
use crate::infrastructure::fs::LocalFs;
use crate::infrastructure::ninja::NinjaWriter;

use super::options::GenerateOptions;
use super::result::{GenerateResult, WriteStatus};

/// Generate use case - index in, build file out
pub struct GenerateUseCase<R>
where
    R: IndexReader,
{
    reader: R,
    config: Config,
    fs: LocalFs,
}

impl<R> GenerateUseCase<R>
where
    R: IndexReader,
{
    pub fn new(reader: R, config: Config) -> Self {
        Self {
            reader,
            config,
            fs: LocalFs::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Execute the generate use case
    pub fn execute(&self, options: &GenerateOptions) -> PortshipResult<GenerateResult> {
        self.execute_with_events(options, Arc::new(NoopEventSink))
    }

    /// Execute the generate use case with event reporting
    pub fn execute_with_events(
        &self,
        options: &GenerateOptions,
        events: Arc<dyn CompileEventSink>,
    ) -> PortshipResult<GenerateResult> {
        self.config.validate()?;

        let index = self.reader.read_index(&options.index)?;
        debug!(entries = index.len(), index = %options.index.display(), "index loaded");

        let compiler = GraphCompiler::new(
            self.config.compiler_settings(),
            self.config.conversion_policy(),
        )
        .with_events(events);

        let mut writer = NinjaWriter::new(Vec::new()).with_width(self.config.ninja.line_width);
        let summary = compiler.compile(&index, &mut writer)?;
        let content = writer.into_inner()?;

        let output = options.dest.join(&self.config.ninja.file_name);
        let hash = ContentHash::from_bytes(&content);

        let status = if !options.force && self.fs.hash_existing(&output)? == Some(hash.clone()) {
            info!(output = %output.display(), "build file unchanged");
            WriteStatus::Unchanged
        } else {
            self.fs.write_atomic(&output, &content)?;
            info!(output = %output.display(), %hash, "build file written");
            WriteStatus::Written
        };

        Ok(GenerateResult {
            output,
            status,
            hash,
            summary,
        })
    }
}
