//! VfsIndex entity - the parsed index handed to the compiler
//!
//! Holds the entries in the order the source index listed them. That order is
//! the only deterministic ordering available downstream, so it is preserved.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::Entry;

/// An ordered, keyed collection of entries plus provenance paths
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VfsIndex {
    /// Base directory all archive paths resolve against
    dirpath: PathBuf,
    /// The index file this collection was decoded from
    index_path: PathBuf,
    entries: Vec<(String, Entry)>,
    positions: HashMap<String, usize>,
}

impl VfsIndex {
    /// Create an empty index
    pub fn new(dirpath: impl Into<PathBuf>, index_path: impl Into<PathBuf>) -> Self {
        Self {
            dirpath: dirpath.into(),
            index_path: index_path.into(),
            entries: Vec::new(),
            positions: HashMap::new(),
        }
    }

    /// Insert an entry under `key`
    ///
    /// Re-inserting an existing key replaces the entry but keeps its original
    /// position. Returns the replaced entry, if any.
    pub fn insert(&mut self, key: impl Into<String>, entry: Entry) -> Option<Entry> {
        let key = key.into();
        if let Some(&pos) = self.positions.get(&key) {
            return Some(std::mem::replace(&mut self.entries[pos].1, entry));
        }
        self.positions.insert(key.clone(), self.entries.len());
        self.entries.push((key, entry));
        None
    }

    /// Builder: insert an entry
    pub fn with_entry(mut self, key: impl Into<String>, entry: Entry) -> Self {
        self.insert(key, entry);
        self
    }

    pub fn dirpath(&self) -> &Path {
        &self.dirpath
    }

    pub fn index_path(&self) -> &Path {
        &self.index_path
    }

    /// Look up an entry by key
    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.positions.get(key).map(|&pos| &self.entries[pos].1)
    }

    /// Iterate `(key, entry)` pairs in insertion order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Entry)> {
        self.entries.iter().map(|(key, entry)| (key.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries that will produce edges
    pub fn eligible_count(&self) -> usize {
        self.entries.iter().filter(|(_, e)| e.is_eligible()).count()
    }
}
