//! Graph Compiler Service
//!
//! Turns a decoded `VfsIndex` into a build graph in one forward pass:
//!
//! 1. Provenance comments and path-indirection variables
//! 2. A fixed set of rules, plus one rule per conversion the policy declares
//! 3. Two edges that build the extractor from its own source
//! 4. Per eligible entry: one extraction edge, one transformation edge
//! 5. One `phony` aggregate over every raw output
//!
//! Extraction and transformation stay separate edges so a changed conversion
//! tool only re-runs conversions, never archive reads.

use std::collections::HashMap;
use std::io;
use std::sync::Arc;

use thiserror::Error;

use crate::domain::entities::{BuildEdge, Entry, Ineligibility, RuleDecl, VfsIndex};
use crate::domain::policies::{ConversionPolicy, Transform};
use crate::domain::ports::{
    CompileEvent, CompileEventSink, ExtractionKind, GraphWriter, NoopEventSink,
};
use crate::domain::value_objects::{
    canonical_node, canonical_relative, escape_literal, to_graph_separators, OutputPath, PathError,
};

/// Name of the aggregate target forcing extraction of every raw asset
pub const AGGREGATE_TARGET: &str = "raw_assets";

/// The extractor binary every extraction edge depends on
pub const EXTRACTOR: &str = "$tool_root/extract";

const EXTRACTOR_SOURCE_NAME: &str = "extract.c";
const TOOL_OWNER: &str = "<extractor>";
const AGGREGATE_OWNER: &str = "<aggregate>";

/// Compilation failures
#[derive(Debug, Error)]
pub enum CompileError {
    /// The graph writer could not append to its stream
    #[error("failed to write build graph: {0}")]
    Write(#[from] io::Error),

    /// Two claimants map to the same file once Ninja expands and
    /// canonicalizes their output paths
    #[error("output '{output}' is produced by both '{first}' and '{second}'")]
    DuplicateOutput {
        output: String,
        first: String,
        second: String,
    },

    /// An entry's stored path cannot be placed under the output roots
    #[error("entry '{key}': {source}")]
    InvalidPath {
        key: String,
        #[source]
        source: PathError,
    },
}

/// Layout and tool settings baked into the generated graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerSettings {
    /// Where raw extracted assets land (value of `$raw_output_root`)
    pub raw_output_root: String,
    /// Where converted/copied assets land (value of `$final_output_root`)
    pub final_output_root: String,
    /// Where the extractor is built (value of `$tool_root`)
    pub tool_root: String,
    /// Directory holding `extract.c` (value of `$tool_source_root`)
    pub tool_source_root: String,
    /// Archive identifier meaning "loose file on disk"
    pub root_archive: String,
    /// C compiler used for the extractor
    pub tool_compiler: String,
    /// Flags passed to the C compiler
    pub tool_cflags: String,
}

impl Default for CompilerSettings {
    fn default() -> Self {
        Self {
            raw_output_root: "raw_assets".to_string(),
            final_output_root: "assets".to_string(),
            tool_root: "util".to_string(),
            tool_source_root: default_tool_source_root(),
            root_archive: "ROOT.VFS".to_string(),
            tool_compiler: "cc".to_string(),
            tool_cflags: "-std=c99 -Werror -Wextra -Wall -pedantic -g0 -Os".to_string(),
        }
    }
}

/// The `tools/` directory shipped next to this crate's manifest
pub fn default_tool_source_root() -> String {
    to_graph_separators(concat!(env!("CARGO_MANIFEST_DIR"), "/tools"))
}

/// The two edges emitted for one eligible entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryPlan {
    pub kind: ExtractionKind,
    /// Produces the raw asset
    pub extraction: BuildEdge,
    /// Consumes the raw asset, produces the final asset
    pub transformation: BuildEdge,
}

impl EntryPlan {
    pub fn raw_output(&self) -> &str {
        self.extraction.output()
    }

    pub fn final_output(&self) -> &str {
        self.transformation.output()
    }
}

/// Per-entry decision, as shown by `inspect`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanOutcome {
    Planned(EntryPlan),
    Skipped(Vec<Ineligibility>),
    /// Eligible, but compiling it would fail (bad path or output collision)
    Rejected(String),
}

/// Summary of a finished compilation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompileSummary {
    /// Entries that produced an edge pair
    pub compiled: usize,
    /// Entries excluded by their flags
    pub skipped: usize,
    /// Rule declarations written
    pub rules: usize,
    /// Build edges written, aggregate included
    pub edges: usize,
}

/// Graph Compiler
pub struct GraphCompiler {
    settings: CompilerSettings,
    policy: ConversionPolicy,
    events: Arc<dyn CompileEventSink>,
}

impl GraphCompiler {
    /// Create a compiler with a silent event sink
    pub fn new(settings: CompilerSettings, policy: ConversionPolicy) -> Self {
        Self {
            settings,
            policy,
            events: Arc::new(NoopEventSink),
        }
    }

    /// Builder: attach a progress observer
    pub fn with_events(mut self, events: Arc<dyn CompileEventSink>) -> Self {
        self.events = events;
        self
    }

    pub fn settings(&self) -> &CompilerSettings {
        &self.settings
    }

    pub fn policy(&self) -> &ConversionPolicy {
        &self.policy
    }

    /// Compile `index` into `writer`
    ///
    /// Fails on writer I/O errors and on the first duplicate output path.
    pub fn compile(
        &self,
        index: &VfsIndex,
        writer: &mut dyn GraphWriter,
    ) -> Result<CompileSummary, CompileError> {
        let detailed = self.events.wants_detailed_events();
        let mut summary = CompileSummary::default();

        self.events.on_event(CompileEvent::Started {
            index_path: index.index_path().to_path_buf(),
            entry_count: index.len(),
        });

        self.write_header(index, writer)?;
        self.events.on_event(CompileEvent::HeaderWritten);

        summary.rules = self.write_rules(writer)?;
        self.events.on_event(CompileEvent::RulesWritten {
            count: summary.rules,
        });

        let mut outputs = self.reserved_outputs();
        summary.edges += self.write_tool_edges(writer)?;
        self.events.on_event(CompileEvent::ToolEdgesWritten);

        let index_dep = index_dependency(index);
        let mut raw_assets = Vec::with_capacity(index.eligible_count());

        for (key, entry) in index.entries() {
            let Some(plan) = self.plan_entry(key, entry, &index_dep)? else {
                summary.skipped += 1;
                if detailed {
                    self.events.on_event(CompileEvent::EntrySkipped {
                        key: key.to_string(),
                        reasons: entry.ineligibility(),
                    });
                }
                continue;
            };

            self.claim_plan(&mut outputs, key, &plan)?;

            writer.build(&plan.extraction)?;
            writer.build(&plan.transformation)?;
            summary.compiled += 1;
            summary.edges += 2;

            if detailed {
                self.events.on_event(CompileEvent::EntryCompiled {
                    key: key.to_string(),
                    extraction: plan.kind,
                    raw_output: plan.raw_output().to_string(),
                    final_output: plan.final_output().to_string(),
                });
            }

            let EntryPlan { mut extraction, .. } = plan;
            raw_assets.append(&mut extraction.outputs);
        }

        writer.newline()?;
        writer.build(&BuildEdge::new("phony", AGGREGATE_TARGET).inputs(raw_assets))?;
        summary.edges += 1;

        self.events.on_event(CompileEvent::Completed {
            compiled: summary.compiled,
            skipped: summary.skipped,
        });

        Ok(summary)
    }

    /// Decide every entry without emitting anything
    ///
    /// Entries `compile` would fail on are reported as `Rejected`; later
    /// entries are still planned against the outputs claimed so far.
    pub fn plan<'a>(&self, index: &'a VfsIndex) -> Vec<(&'a str, PlanOutcome)> {
        let index_dep = index_dependency(index);
        let mut outputs = self.reserved_outputs();

        index
            .entries()
            .map(|(key, entry)| {
                let planned = self.plan_entry(key, entry, &index_dep).and_then(|plan| {
                    if let Some(plan) = &plan {
                        self.claim_plan(&mut outputs, key, plan)?;
                    }
                    Ok(plan)
                });
                let outcome = match planned {
                    Ok(Some(plan)) => PlanOutcome::Planned(plan),
                    Ok(None) => PlanOutcome::Skipped(entry.ineligibility()),
                    Err(err) => PlanOutcome::Rejected(err.to_string()),
                };
                (key, outcome)
            })
            .collect()
    }

    fn write_header(&self, index: &VfsIndex, writer: &mut dyn GraphWriter) -> io::Result<()> {
        let dirpath = to_graph_separators(&index.dirpath().to_string_lossy());

        writer.comment("")?;
        writer.comment("Generated by Portship")?;
        writer.comment("")?;
        writer.comment(&format!("Index file: {}", index.index_path().display()))?;
        writer.comment("")?;
        writer.newline()?;

        writer.variable("archive_root", &escape_literal(&dirpath))?;
        writer.variable("raw_output_root", &escape_literal(&self.settings.raw_output_root))?;
        writer.variable(
            "final_output_root",
            &escape_literal(&self.settings.final_output_root),
        )?;
        writer.variable("tool_root", &escape_literal(&self.settings.tool_root))?;
        writer.variable(
            "tool_source_root",
            &escape_literal(&self.settings.tool_source_root),
        )?;
        writer.newline()
    }

    fn write_rules(&self, writer: &mut dyn GraphWriter) -> io::Result<usize> {
        let compile_command = format!(
            "{} -o $out $in {}",
            self.settings.tool_compiler, self.settings.tool_cflags
        );
        let builtin = [
            RuleDecl::new(
                "extract_archive",
                format!("{EXTRACTOR} $in $out $offset $length"),
                "Extract $out from $archive_name",
            ),
            RuleDecl::new("extract_root", "cp $in $out", "Copy $out (root archive entry)"),
            RuleDecl::new(
                "compile_tool",
                compile_command.trim_end(),
                "Compile extraction tool $out",
            ),
            RuleDecl::new("copy", "cp $in $out", "Copy $out"),
        ];

        let mut count = 0;
        for rule in builtin.iter().chain(self.policy.rules()) {
            writer.rule(rule)?;
            count += 1;
        }
        writer.newline()?;
        Ok(count)
    }

    fn tool_edges(&self) -> [BuildEdge; 2] {
        let copied_source = format!("$tool_root/{EXTRACTOR_SOURCE_NAME}");
        [
            BuildEdge::new("copy", copied_source.as_str())
                .input(format!("$tool_source_root/{EXTRACTOR_SOURCE_NAME}")),
            BuildEdge::new("compile_tool", EXTRACTOR).input(copied_source.as_str()),
        ]
    }

    fn write_tool_edges(&self, writer: &mut dyn GraphWriter) -> io::Result<usize> {
        let edges = self.tool_edges();
        for edge in &edges {
            writer.build(edge)?;
        }
        writer.newline()?;
        Ok(edges.len())
    }

    /// Registry pre-loaded with the outputs every graph has
    ///
    /// Those never collide among themselves, so they are claimed first and
    /// entries landing on them are the ones reported.
    fn reserved_outputs(&self) -> OutputRegistry {
        let mut outputs = OutputRegistry::default();
        for edge in self.tool_edges() {
            outputs.reserve(self.node_key(edge.output()), TOOL_OWNER);
        }
        outputs.reserve(self.node_key(AGGREGATE_TARGET), AGGREGATE_OWNER);
        outputs
    }

    fn claim_plan(
        &self,
        outputs: &mut OutputRegistry,
        key: &str,
        plan: &EntryPlan,
    ) -> Result<(), CompileError> {
        for output in [plan.raw_output(), plan.final_output()] {
            outputs.claim(self.node_key(output), output, key)?;
        }
        Ok(())
    }

    /// The file a graph path names once Ninja expands the root variables
    fn node_key(&self, output: &str) -> String {
        let roots = [
            ("$raw_output_root/", &self.settings.raw_output_root),
            ("$final_output_root/", &self.settings.final_output_root),
            ("$tool_root/", &self.settings.tool_root),
        ];
        let expanded = roots
            .iter()
            .find_map(|(variable, root)| {
                output
                    .strip_prefix(variable)
                    .map(|rest| format!("{root}/{}", rest.replace("$$", "$")))
            })
            .unwrap_or_else(|| output.replace("$$", "$"));
        canonical_node(&expanded)
    }

    fn plan_entry(
        &self,
        key: &str,
        entry: &Entry,
        index_dep: &str,
    ) -> Result<Option<EntryPlan>, CompileError> {
        if !entry.is_eligible() {
            return Ok(None);
        }

        let invalid = |source| CompileError::InvalidPath {
            key: key.to_string(),
            source,
        };
        let output = OutputPath::from_stored(entry.path()).map_err(invalid)?;
        let relative = escape_literal(output.as_str());
        let raw_output = format!("$raw_output_root/{relative}");

        let (kind, extraction) = if entry.is_root(&self.settings.root_archive) {
            // Source keeps its case: it has to match the file on disk
            let source = escape_literal(&canonical_relative(entry.path()).map_err(invalid)?);
            let edge = BuildEdge::new("extract_root", raw_output.as_str())
                .input(format!("$archive_root/{source}"));
            (ExtractionKind::Root, edge)
        } else {
            let archive = escape_literal(&to_graph_separators(entry.archive_path()));
            let edge = BuildEdge::new("extract_archive", raw_output.as_str())
                .input(format!("$archive_root/{archive}"))
                .variable("offset", entry.offset())
                .variable("length", entry.length())
                .variable("archive_name", escape_literal(entry.archive_path()));
            (ExtractionKind::Archive, edge)
        };
        let extraction = extraction.implicit(index_dep).implicit(EXTRACTOR);

        let (stem, extension) = output.split_extension();
        let transform = self.policy.resolve(extension);
        let final_output = match transform {
            Transform::Convert(conversion) => format!(
                "$final_output_root/{}{}",
                escape_literal(stem),
                escape_literal(&conversion.output_extension)
            ),
            Transform::Copy => format!("$final_output_root/{relative}"),
        };
        let transformation = BuildEdge::new(transform.rule(), final_output).input(raw_output);

        Ok(Some(EntryPlan {
            kind,
            extraction,
            transformation,
        }))
    }
}

/// The index file as seen from the graph
///
/// Relative to `$archive_root` when the index lives under the base directory,
/// the literal path otherwise.
fn index_dependency(index: &VfsIndex) -> String {
    match index.index_path().strip_prefix(index.dirpath()) {
        Ok(relative) if !relative.as_os_str().is_empty() => format!(
            "$archive_root/{}",
            escape_literal(&to_graph_separators(&relative.to_string_lossy()))
        ),
        _ => escape_literal(&to_graph_separators(&index.index_path().to_string_lossy())),
    }
}

/// Tracks which claimant produced each file, keyed by canonical node path
#[derive(Default)]
struct OutputRegistry {
    owners: HashMap<String, String>,
}

impl OutputRegistry {
    fn reserve(&mut self, node: String, owner: &str) {
        self.owners.insert(node, owner.to_string());
    }

    fn claim(&mut self, node: String, output: &str, owner: &str) -> Result<(), CompileError> {
        if let Some(first) = self.owners.get(&node) {
            return Err(CompileError::DuplicateOutput {
                output: output.to_string(),
                first: first.clone(),
                second: owner.to_string(),
            });
        }
        self.owners.insert(node, owner.to_string());
        Ok(())
    }
}
