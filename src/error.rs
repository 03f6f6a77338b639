//! Error types for the dataset pipeline
//!
//! Load-time structural errors are fatal to the pipeline. Vocabulary
//! lookups never produce an error; they fall back to the OOV entry.

use std::path::PathBuf;

use thiserror::Error;

use crate::blob_store::BlobKey;

/// Result type for dataset operations
pub type DatasetResult<T> = Result<T, DatasetError>;

/// Errors that can occur while loading, indexing or persisting a dataset
#[derive(Debug, Error)]
pub enum DatasetError {
    /// A required triple file is missing
    #[error("file not found: {}", .path.display())]
    FileNotFound { path: PathBuf },

    /// A line did not split into exactly three fields
    #[error("{}:{line}: expected 3 fields, found {fields}", .path.display())]
    Format {
        path: PathBuf,
        line: usize,
        fields: usize,
    },

    /// Filter lookup for an entity never seen in training
    #[error("unknown entity index {0}")]
    UnknownEntity(usize),

    /// Filter lookup for a relation never seen with the given entity
    #[error("unknown relation index {relation} for entity index {entity}")]
    UnknownRelation { entity: usize, relation: usize },

    /// Out-of-range index passed to graph construction
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Persisted blob is absent
    #[error("blob not found: {0}")]
    BlobNotFound(BlobKey),

    /// Persisted blob exists but cannot be decoded into the expected shape
    #[error("blob corrupted: {0}")]
    BlobCorrupted(String),

    /// Invalid configuration value
    #[error("config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DatasetError {
    /// True for the two filter-lookup miss kinds
    pub fn is_filter_miss(&self) -> bool {
        matches!(
            self,
            DatasetError::UnknownEntity(_) | DatasetError::UnknownRelation { .. }
        )
    }
}
