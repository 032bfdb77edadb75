//! Configuration loading

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PortshipError, PortshipResult};

use super::types::{Config, LoadedConfig, Verbosity};

/// Config file looked up in the output directory
pub const PROJECT_CONFIG_NAME: &str = "portship.toml";

/// Non-fatal configuration warning surfaced to CLI users.
///
/// Warnings are collected while the config is resolved and reported once
/// logging is up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// A key the config schema does not know
    UnknownKey {
        key: String,
        file: PathBuf,
        /// 1-indexed line, if the key could be located
        line: Option<usize>,
        suggestion: Option<String>,
    },
    /// A `PORTSHIP_*` variable whose value could not be applied
    IgnoredEnv {
        name: String,
        value: String,
        expected: &'static str,
    },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigWarning::UnknownKey {
                key,
                file,
                line,
                suggestion,
            } => {
                write!(f, "unknown config key '{}' in {}", key, file.display())?;
                if let Some(line) = line {
                    write!(f, ":{line}")?;
                }
                if let Some(suggestion) = suggestion {
                    write!(f, " (did you mean '{suggestion}'?)")?;
                }
                Ok(())
            }
            ConfigWarning::IgnoredEnv {
                name,
                value,
                expected,
            } => write!(f, "ignoring {name}={value:?}: expected {expected}"),
        }
    }
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> PortshipResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;
    parse_with_warnings(&content, path)
}

/// Parse config text; `path` is only used for diagnostics
pub fn parse_with_warnings(
    content: &str,
    path: &Path,
) -> PortshipResult<(Config, Vec<ConfigWarning>)> {
    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| PortshipError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning::UnknownKey {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Resolve the config: explicit file, project file, user file, defaults
pub fn discover(explicit: Option<&Path>, dest: &Path) -> PortshipResult<LoadedConfig> {
    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(PortshipError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }
        return loaded_from(path);
    }

    let project_config = dest.join(PROJECT_CONFIG_NAME);
    if project_config.is_file() {
        return loaded_from(&project_config);
    }

    if let Some(user_config) = user_config_path() {
        if user_config.is_file() {
            return loaded_from(&user_config);
        }
    }

    let (config, warnings) = with_env_overrides(Config::default());
    Ok(LoadedConfig {
        config,
        source: None,
        warnings,
    })
}

fn loaded_from(path: &Path) -> PortshipResult<LoadedConfig> {
    let (config, mut warnings) = load_with_warnings(path)?;
    let (config, env_warnings) = with_env_overrides(config);
    warnings.extend(env_warnings);
    Ok(LoadedConfig {
        config,
        source: Some(path.to_path_buf()),
        warnings,
    })
}

/// `<platform config dir>/portship/config.toml`
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("portship").join("config.toml"))
}

/// Apply environment variable overrides (PORTSHIP_* prefix)
pub fn with_env_overrides(config: Config) -> (Config, Vec<ConfigWarning>) {
    apply_overrides(config, |name| std::env::var(name).ok())
}

/// Apply overrides from any variable lookup
///
/// Values that cannot be parsed leave the setting alone and come back as
/// warnings.
pub fn apply_overrides(
    mut config: Config,
    lookup: impl Fn(&str) -> Option<String>,
) -> (Config, Vec<ConfigWarning>) {
    let mut warnings = Vec::new();

    // PORTSHIP_RAW_OUTPUT_ROOT
    if let Some(value) = lookup("PORTSHIP_RAW_OUTPUT_ROOT") {
        config.paths.raw_output_root = value;
    }

    // PORTSHIP_FINAL_OUTPUT_ROOT
    if let Some(value) = lookup("PORTSHIP_FINAL_OUTPUT_ROOT") {
        config.paths.final_output_root = value;
    }

    // PORTSHIP_TOOL_ROOT
    if let Some(value) = lookup("PORTSHIP_TOOL_ROOT") {
        config.paths.tool_root = value;
    }

    // PORTSHIP_ROOT_ARCHIVE
    if let Some(value) = lookup("PORTSHIP_ROOT_ARCHIVE") {
        config.archive.root_archive = value;
    }

    // PORTSHIP_NINJA_WIDTH
    if let Some(value) = lookup("PORTSHIP_NINJA_WIDTH") {
        match value.trim().parse::<usize>() {
            Ok(width) => config.ninja.line_width = width,
            Err(_) => warnings.push(ConfigWarning::IgnoredEnv {
                name: "PORTSHIP_NINJA_WIDTH".to_string(),
                value,
                expected: "a column count",
            }),
        }
    }

    // PORTSHIP_VERBOSITY
    if let Some(value) = lookup("PORTSHIP_VERBOSITY") {
        match Verbosity::parse(&value) {
            Some(verbosity) => config.output.verbosity = verbosity,
            None => warnings.push(ConfigWarning::IgnoredEnv {
                name: "PORTSHIP_VERBOSITY".to_string(),
                value,
                expected: "quiet, normal, verbose or debug",
            }),
        }
    }

    (config, warnings)
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "paths",
        "raw_output_root",
        "final_output_root",
        "tool_root",
        "tool_source_root",
        "archive",
        "root_archive",
        "tool",
        "compiler",
        "cflags",
        "ninja",
        "file_name",
        "line_width",
        "output",
        "verbosity",
        "conversions",
        "rule",
        "output_extension",
        "rules",
        "command",
        "description",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
