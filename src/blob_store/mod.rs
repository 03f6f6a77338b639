//! Blob Store - persistence for computed dictionaries
//!
//! The pipeline caches two blobs per dataset, keyed separately:
//!
//! ```text
//! <root>/<dataset>/dict_data.json     entity/relation dictionaries
//! <root>/<dataset>/filter_node.json   filter index
//! ```
//!
//! Stores are passed into the pipeline rather than derived from the
//! dataset name, so tests can swap in [`MemoryBlobStore`].

mod envelope;
mod file;
mod memory;

use serde::{Deserialize, Serialize};

use crate::error::DatasetResult;

pub use envelope::{load_json, save_json, BlobMeta};
pub use file::FileBlobStore;
pub use memory::MemoryBlobStore;

/// Kind of cached blob
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlobKind {
    Dictionary,
    FilterIndex,
}

impl BlobKind {
    pub const ALL: [BlobKind; 2] = [BlobKind::Dictionary, BlobKind::FilterIndex];

    /// File name used by [`FileBlobStore`]
    pub fn file_name(&self) -> &'static str {
        match self {
            BlobKind::Dictionary => "dict_data.json",
            BlobKind::FilterIndex => "filter_node.json",
        }
    }
}

impl std::fmt::Display for BlobKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BlobKind::Dictionary => write!(f, "dictionary"),
            BlobKind::FilterIndex => write!(f, "filter_index"),
        }
    }
}

/// Address of one blob: dataset name plus blob kind
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlobKey {
    pub dataset: String,
    pub kind: BlobKind,
}

impl BlobKey {
    pub fn new(dataset: impl Into<String>, kind: BlobKind) -> Self {
        Self {
            dataset: dataset.into(),
            kind,
        }
    }

    pub fn dictionary(dataset: impl Into<String>) -> Self {
        Self::new(dataset, BlobKind::Dictionary)
    }

    pub fn filter_index(dataset: impl Into<String>) -> Self {
        Self::new(dataset, BlobKind::FilterIndex)
    }
}

impl std::fmt::Display for BlobKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.dataset, self.kind.file_name())
    }
}

/// Opaque key-value storage for persisted blobs
pub trait BlobStore {
    /// Store `bytes` under `key`, replacing any previous blob
    fn put(&self, key: &BlobKey, bytes: &[u8]) -> DatasetResult<()>;

    /// Fetch the blob under `key`, or fail with `BlobNotFound`
    fn get(&self, key: &BlobKey) -> DatasetResult<Vec<u8>>;

    /// Whether a blob exists under `key`
    fn contains(&self, key: &BlobKey) -> bool;

    /// Delete the blob under `key`; returns false if there was none
    fn remove(&self, key: &BlobKey) -> DatasetResult<bool>;
}

impl<S: BlobStore + ?Sized> BlobStore for &S {
    fn put(&self, key: &BlobKey, bytes: &[u8]) -> DatasetResult<()> {
        (**self).put(key, bytes)
    }

    fn get(&self, key: &BlobKey) -> DatasetResult<Vec<u8>> {
        (**self).get(key)
    }

    fn contains(&self, key: &BlobKey) -> bool {
        (**self).contains(key)
    }

    fn remove(&self, key: &BlobKey) -> DatasetResult<bool> {
        (**self).remove(key)
    }
}

impl<S: BlobStore + ?Sized> BlobStore for Box<S> {
    fn put(&self, key: &BlobKey, bytes: &[u8]) -> DatasetResult<()> {
        (**self).put(key, bytes)
    }

    fn get(&self, key: &BlobKey) -> DatasetResult<Vec<u8>> {
        (**self).get(key)
    }

    fn contains(&self, key: &BlobKey) -> bool {
        (**self).contains(key)
    }

    fn remove(&self, key: &BlobKey) -> DatasetResult<bool> {
        (**self).remove(key)
    }
}
