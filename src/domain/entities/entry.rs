//! Entry entity - one archived asset described by the VFS index
//!
//! Entries are the "source code" of Portship: each one points at a byte range
//! inside an archive container, or at a loose file when it lives in the root
//! archive.

use std::fmt;

/// Reason an entry cannot be extracted with a plain byte-range copy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ineligibility {
    /// Needs decryption
    Encrypted,
    /// Tombstoned in the index
    Deleted,
    /// Needs decompression
    Compressed,
}

impl fmt::Display for Ineligibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ineligibility::Encrypted => write!(f, "encrypted"),
            Ineligibility::Deleted => write!(f, "deleted"),
            Ineligibility::Compressed => write!(f, "compressed"),
        }
    }
}

/// An asset stored in (or next to) an archive container
///
/// Immutable once built. The builder methods exist for index readers and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Path as stored in the index, original case and separators
    path: String,
    /// Archive container holding the bytes (or the root archive sentinel)
    archive_path: String,
    offset: u64,
    length: u64,
    encrypted: bool,
    deleted: bool,
    compressed: bool,
}

impl Entry {
    /// Create a new eligible entry with an empty byte range
    pub fn new(path: impl Into<String>, archive_path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            archive_path: archive_path.into(),
            offset: 0,
            length: 0,
            encrypted: false,
            deleted: false,
            compressed: false,
        }
    }

    /// Builder: set the byte range inside the archive container
    pub fn with_range(mut self, offset: u64, length: u64) -> Self {
        self.offset = offset;
        self.length = length;
        self
    }

    /// Builder: set the encrypted flag
    pub fn with_encrypted(mut self, encrypted: bool) -> Self {
        self.encrypted = encrypted;
        self
    }

    /// Builder: set the deleted flag
    pub fn with_deleted(mut self, deleted: bool) -> Self {
        self.deleted = deleted;
        self
    }

    /// Builder: set the compressed flag
    pub fn with_compressed(mut self, compressed: bool) -> Self {
        self.compressed = compressed;
        self
    }

    // --- Getters ---

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn archive_path(&self) -> &str {
        &self.archive_path
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn length(&self) -> u64 {
        self.length
    }

    pub fn is_encrypted(&self) -> bool {
        self.encrypted
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    pub fn is_compressed(&self) -> bool {
        self.compressed
    }

    /// Whether the entry can be extracted with a byte-range copy
    pub fn is_eligible(&self) -> bool {
        !(self.encrypted || self.deleted || self.compressed)
    }

    /// Every reason the entry is excluded from the graph (empty when eligible)
    pub fn ineligibility(&self) -> Vec<Ineligibility> {
        let mut reasons = Vec::new();
        if self.encrypted {
            reasons.push(Ineligibility::Encrypted);
        }
        if self.deleted {
            reasons.push(Ineligibility::Deleted);
        }
        if self.compressed {
            reasons.push(Ineligibility::Compressed);
        }
        reasons
    }

    /// Whether the entry lives in the root archive (a loose file on disk)
    ///
    /// The comparison is case-insensitive.
    pub fn is_root(&self, root_archive: &str) -> bool {
        self.archive_path.eq_ignore_ascii_case(root_archive)
    }
}
