//! IndexReader port - decodes an index file into a `VfsIndex`
//!
//! The compiler only ever sees the decoded collection; how the bytes are laid
//! out is the reader's business.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::entities::VfsIndex;

/// Index decoding errors
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("failed to read index {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode index {path}: {message}")]
    Decode { path: PathBuf, message: String },
}

/// Abstract index decoder
pub trait IndexReader {
    /// Decode the index at `path`
    fn read_index(&self, path: &Path) -> Result<VfsIndex, IndexError>;
}
