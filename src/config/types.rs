//! Configuration type definitions

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::entities::RuleDecl;
use crate::domain::policies::{Conversion, ConversionPolicy};
use crate::domain::services::{default_tool_source_root, CompilerSettings};
use crate::domain::value_objects::canonical_node;
use crate::error::{PortshipError, PortshipResult};
use crate::infrastructure::ninja::DEFAULT_LINE_WIDTH;

use super::loader::{self, ConfigWarning};

/// Narrowest line width the Ninja writer accepts
pub const MIN_LINE_WIDTH: usize = 16;

/// Output directory layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_raw_output_root")]
    pub raw_output_root: String,

    #[serde(default = "default_final_output_root")]
    pub final_output_root: String,

    #[serde(default = "default_tool_root")]
    pub tool_root: String,

    /// Directory holding `extract.c`; the crate's own `tools/` when unset
    #[serde(default)]
    pub tool_source_root: Option<String>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            raw_output_root: default_raw_output_root(),
            final_output_root: default_final_output_root(),
            tool_root: default_tool_root(),
            tool_source_root: None,
        }
    }
}

fn default_raw_output_root() -> String {
    "raw_assets".to_string()
}

fn default_final_output_root() -> String {
    "assets".to_string()
}

fn default_tool_root() -> String {
    "util".to_string()
}

/// Archive naming
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveConfig {
    /// Archive identifier meaning "loose file on disk" (case-insensitive)
    #[serde(default = "default_root_archive")]
    pub root_archive: String,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            root_archive: default_root_archive(),
        }
    }
}

fn default_root_archive() -> String {
    "ROOT.VFS".to_string()
}

/// How the extractor is compiled
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolConfig {
    #[serde(default = "default_compiler")]
    pub compiler: String,

    #[serde(default = "default_cflags")]
    pub cflags: String,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            compiler: default_compiler(),
            cflags: default_cflags(),
        }
    }
}

fn default_compiler() -> String {
    "cc".to_string()
}

fn default_cflags() -> String {
    "-std=c99 -Werror -Wextra -Wall -pedantic -g0 -Os".to_string()
}

/// Generated build file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NinjaConfig {
    #[serde(default = "default_file_name")]
    pub file_name: String,

    #[serde(default = "default_line_width")]
    pub line_width: usize,
}

impl Default for NinjaConfig {
    fn default() -> Self {
        Self {
            file_name: default_file_name(),
            line_width: default_line_width(),
        }
    }
}

fn default_file_name() -> String {
    "build.ninja".to_string()
}

fn default_line_width() -> usize {
    DEFAULT_LINE_WIDTH
}

/// Output configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub verbosity: Verbosity,
}

/// Verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
    Debug,
}

impl Verbosity {
    /// Parse a level name, case-insensitively
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "quiet" => Some(Verbosity::Quiet),
            "normal" => Some(Verbosity::Normal),
            "verbose" => Some(Verbosity::Verbose),
            "debug" => Some(Verbosity::Debug),
            _ => None,
        }
    }

    /// `tracing` filter directive for this level
    pub fn filter(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "error",
            Verbosity::Normal => "warn",
            Verbosity::Verbose => "info",
            Verbosity::Debug => "debug",
        }
    }
}

/// One `[conversions."<ext>"]` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionConfig {
    pub rule: String,
    pub output_extension: String,
}

/// One `[rules.<name>]` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleConfig {
    pub command: String,

    #[serde(default)]
    pub description: String,
}

fn default_conversions() -> BTreeMap<String, ConversionConfig> {
    ConversionPolicy::default()
        .conversions()
        .map(|(ext, c)| {
            (
                ext.to_string(),
                ConversionConfig {
                    rule: c.rule.clone(),
                    output_extension: c.output_extension.clone(),
                },
            )
        })
        .collect()
}

fn default_rules() -> BTreeMap<String, RuleConfig> {
    ConversionPolicy::default()
        .rules()
        .map(|r| {
            (
                r.name.clone(),
                RuleConfig {
                    command: r.command.clone(),
                    description: r.description.clone(),
                },
            )
        })
        .collect()
}

/// Main configuration structure
///
/// `conversions` and `rules` replace the built-in tables wholesale when
/// present, so a config can also drop the default DDS conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub archive: ArchiveConfig,

    #[serde(default)]
    pub tool: ToolConfig,

    #[serde(default)]
    pub ninja: NinjaConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default = "default_conversions")]
    pub conversions: BTreeMap<String, ConversionConfig>,

    #[serde(default = "default_rules")]
    pub rules: BTreeMap<String, RuleConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            paths: PathsConfig::default(),
            archive: ArchiveConfig::default(),
            tool: ToolConfig::default(),
            ninja: NinjaConfig::default(),
            output: OutputConfig::default(),
            conversions: default_conversions(),
            rules: default_rules(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> PortshipResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> PortshipResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Resolve the config for an output directory
    ///
    /// Order: `explicit` file, `<dest>/portship.toml`, the user config, then
    /// built-in defaults. Environment overrides are applied last.
    pub fn discover(explicit: Option<&Path>, dest: &Path) -> PortshipResult<LoadedConfig> {
        loader::discover(explicit, dest)
    }

    /// Apply environment variable overrides (PORTSHIP_* prefix)
    pub fn with_env_overrides(self) -> (Self, Vec<ConfigWarning>) {
        loader::with_env_overrides(self)
    }

    /// Reject values the compiler or writer cannot work with
    pub fn validate(&self) -> PortshipResult<()> {
        let roots = [
            ("paths.raw_output_root", &self.paths.raw_output_root),
            ("paths.final_output_root", &self.paths.final_output_root),
            ("paths.tool_root", &self.paths.tool_root),
            ("archive.root_archive", &self.archive.root_archive),
            ("ninja.file_name", &self.ninja.file_name),
        ];
        for (key, value) in roots {
            if value.trim().is_empty() {
                return Err(invalid(key, "must not be empty"));
            }
        }

        let raw = canonical_node(&self.paths.raw_output_root);
        let final_root = canonical_node(&self.paths.final_output_root);
        let tool = canonical_node(&self.paths.tool_root);
        if raw == final_root {
            return Err(invalid(
                "paths.final_output_root",
                "must differ from paths.raw_output_root",
            ));
        }
        if tool == raw || tool == final_root {
            return Err(invalid(
                "paths.tool_root",
                "must differ from paths.raw_output_root and paths.final_output_root",
            ));
        }

        if self.ninja.line_width < MIN_LINE_WIDTH {
            return Err(invalid(
                "ninja.line_width",
                &format!("must be at least {MIN_LINE_WIDTH}"),
            ));
        }

        self.conversion_policy().validate()?;
        Ok(())
    }

    /// The conversion table as a domain policy
    pub fn conversion_policy(&self) -> ConversionPolicy {
        let policy = self.rules.iter().fold(ConversionPolicy::empty(), |policy, (name, rule)| {
            policy.with_rule(RuleDecl::new(
                name.as_str(),
                rule.command.as_str(),
                rule.description.as_str(),
            ))
        });
        self.conversions
            .iter()
            .fold(policy, |policy, (extension, conversion)| {
                policy.with_conversion(
                    extension.as_str(),
                    Conversion::new(
                        conversion.rule.as_str(),
                        conversion.output_extension.as_str(),
                    ),
                )
            })
    }

    /// Settings baked into the generated graph
    pub fn compiler_settings(&self) -> CompilerSettings {
        CompilerSettings {
            raw_output_root: self.paths.raw_output_root.clone(),
            final_output_root: self.paths.final_output_root.clone(),
            tool_root: self.paths.tool_root.clone(),
            tool_source_root: self
                .paths
                .tool_source_root
                .clone()
                .unwrap_or_else(default_tool_source_root),
            root_archive: self.archive.root_archive.clone(),
            tool_compiler: self.tool.compiler.clone(),
            tool_cflags: self.tool.cflags.clone(),
        }
    }
}

/// A resolved config plus where it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedConfig {
    pub config: Config,
    /// File the config was read from; `None` for built-in defaults
    pub source: Option<PathBuf>,
    pub warnings: Vec<ConfigWarning>,
}

fn invalid(key: &str, message: &str) -> PortshipError {
    PortshipError::InvalidSetting {
        key: key.to_string(),
        message: message.to_string(),
    }
}
