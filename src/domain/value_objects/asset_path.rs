//! Asset Path Value Object
//!
//! Index paths use whatever casing and separators the archive tool wrote.
//! Destination paths are normalized so generated asset trees are identical on
//! every platform:
//! - Lower-cased
//! - `/` separators
//!
//! Source paths for loose root-archive files keep their case, because they must
//! match the name on disk exactly.
//!
//! Both forms are canonical: Ninja collapses `a//b`, `a/./b` and `a/x/../b`
//! into one node, so two spellings of the same file must compare equal here.

use std::fmt;

use thiserror::Error;

/// Canonical separator used in graph paths
pub const SEPARATOR: char = '/';

/// Rewrite `\` separators to `/`, keeping case
pub fn to_graph_separators(path: &str) -> String {
    path.replace('\\', "/")
}

/// Escape literal text for the build graph (`$` starts a variable reference)
pub fn escape_literal(text: &str) -> String {
    text.replace('$', "$$")
}

/// A stored path that cannot be placed under a root directory
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("path '{0}' names no file")]
    Empty(String),

    #[error("path '{0}' climbs above its root")]
    EscapesRoot(String),
}

/// Canonical relative form of a stored path, case kept
///
/// Separators become `/`; empty and `.` components are dropped (so a leading
/// separator stays under the root); `..` removes the previous component and
/// fails when there is none.
pub fn canonical_relative(path: &str) -> Result<String, PathError> {
    let mut parts: Vec<&str> = Vec::new();
    for component in path.split(['/', '\\']) {
        match component {
            "" | "." => {}
            ".." => {
                if parts.pop().is_none() {
                    return Err(PathError::EscapesRoot(path.to_string()));
                }
            }
            name => parts.push(name),
        }
    }

    if parts.is_empty() {
        return Err(PathError::Empty(path.to_string()));
    }
    Ok(parts.join("/"))
}

/// The path Ninja would use for a node, after variable expansion
///
/// Lenient counterpart of [`canonical_relative`] for configured roots:
/// absolute paths stay absolute and a `..` that cannot be resolved is kept.
pub fn canonical_node(path: &str) -> String {
    let normalized = to_graph_separators(path);
    let mut parts: Vec<&str> = Vec::new();
    for component in normalized.split(SEPARATOR) {
        match component {
            "" | "." => {}
            ".." if parts.last().is_some_and(|last| *last != "..") => {
                parts.pop();
            }
            name => parts.push(name),
        }
    }

    let joined = parts.join("/");
    if path.starts_with(['/', '\\']) {
        format!("/{joined}")
    } else {
        joined
    }
}

/// A normalized destination path, relative to an output root
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OutputPath(String);

impl OutputPath {
    /// Normalize a path as stored in the index
    pub fn from_stored(path: &str) -> Result<Self, PathError> {
        canonical_relative(&path.to_lowercase()).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split into `(stem, extension)`; the extension keeps its leading dot
    ///
    /// Only the final component is considered, and dots that lead a file name
    /// (`.hidden`) do not start an extension. Paths without an extension
    /// return an empty extension.
    pub fn split_extension(&self) -> (&str, &str) {
        let path = self.0.as_str();
        let name_start = path.rfind(SEPARATOR).map_or(0, |i| i + 1);
        let name = &path[name_start..];

        match name.rfind('.') {
            Some(dot) if name[..dot].chars().any(|c| c != '.') => {
                let split = name_start + dot;
                (&path[..split], &path[split..])
            }
            _ => (path, ""),
        }
    }

    /// The lowercase extension including its dot (empty when none)
    pub fn extension(&self) -> &str {
        self.split_extension().1
    }
}

impl fmt::Display for OutputPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for OutputPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
