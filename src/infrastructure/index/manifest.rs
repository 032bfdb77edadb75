//! JSON entry manifest reader
//!
//! Decodes an entry manifest into a `VfsIndex`:
//!
//! ```json
//! {
//!   "dirpath": "/games/rose",
//!   "index_path": "/games/rose/data.idx",
//!   "entries": [
//!     { "path": "3DDATA\\A.DDS", "archive_path": "DATA.VFS", "offset": 0, "length": 10 }
//!   ]
//! }
//! ```
//!
//! `dirpath` defaults to the manifest's directory and `index_path` to the
//! manifest itself; relative values resolve against the manifest's directory.
//! A manifest read from disk is anchored at its absolute path, since Ninja
//! runs from the build file's directory rather than the caller's.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::entities::{Entry, VfsIndex};
use crate::domain::ports::{IndexError, IndexReader};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ManifestDoc {
    #[serde(default)]
    dirpath: Option<PathBuf>,
    #[serde(default)]
    index_path: Option<PathBuf>,
    #[serde(default)]
    entries: Vec<ManifestEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ManifestEntry {
    #[serde(default)]
    key: Option<String>,
    path: String,
    archive_path: String,
    #[serde(default)]
    offset: u64,
    #[serde(default)]
    length: u64,
    #[serde(default)]
    encrypted: bool,
    #[serde(default)]
    deleted: bool,
    #[serde(default)]
    compressed: bool,
}

/// Reads JSON entry manifests
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonManifestReader;

impl JsonManifestReader {
    pub fn new() -> Self {
        Self
    }

    /// Decode manifest text; `origin` is the file it came from
    pub fn parse(&self, content: &str, origin: &Path) -> Result<VfsIndex, IndexError> {
        let doc: ManifestDoc =
            serde_json::from_str(content).map_err(|e| IndexError::Decode {
                path: origin.to_path_buf(),
                message: e.to_string(),
            })?;

        let base = match origin.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let dirpath = doc
            .dirpath
            .map(|p| base.join(p))
            .unwrap_or_else(|| base.clone());
        let index_path = doc
            .index_path
            .map(|p| base.join(p))
            .unwrap_or_else(|| origin.to_path_buf());

        let mut index = VfsIndex::new(dirpath, index_path);
        for raw in doc.entries {
            if raw.path.is_empty() {
                return Err(IndexError::Decode {
                    path: origin.to_path_buf(),
                    message: "entry with empty path".to_string(),
                });
            }
            let key = raw.key.unwrap_or_else(|| raw.path.clone());
            let entry = Entry::new(raw.path, raw.archive_path)
                .with_range(raw.offset, raw.length)
                .with_encrypted(raw.encrypted)
                .with_deleted(raw.deleted)
                .with_compressed(raw.compressed);
            if index.insert(key.as_str(), entry).is_some() {
                tracing::debug!(%key, "duplicate manifest key replaced");
            }
        }
        Ok(index)
    }
}

impl IndexReader for JsonManifestReader {
    fn read_index(&self, path: &Path) -> Result<VfsIndex, IndexError> {
        let io_error = |source| IndexError::Io {
            path: path.to_path_buf(),
            source,
        };
        let origin = std::path::absolute(path).map_err(io_error)?;
        let content = fs::read_to_string(&origin).map_err(io_error)?;
        self.parse(&content, &origin)
    }
}
