//! Local File System
//!
//! Atomic writes and content hashing for generated files.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crate::domain::value_objects::ContentHash;

/// Local file system operations
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl LocalFs {
    pub fn new() -> Self {
        Self
    }

    /// Write `content` to `path` through a sibling temp file and a rename
    ///
    /// Readers never observe a partially written file. Parent directories
    /// are created as needed.
    pub fn write_atomic(&self, path: &Path, content: &[u8]) -> io::Result<()> {
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)?;

        let mut temp = tempfile::NamedTempFile::new_in(parent)?;
        temp.write_all(content)?;
        temp.as_file().sync_all()?;
        temp.persist(path).map_err(|e| e.error)?;
        Ok(())
    }

    /// Hash of the file at `path`, or `None` when it does not exist
    pub fn hash_existing(&self, path: &Path) -> io::Result<Option<ContentHash>> {
        match fs::read(path) {
            Ok(bytes) => Ok(Some(ContentHash::from_bytes(&bytes))),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }
}
