//! In-memory blob store

use std::collections::HashMap;

use parking_lot::Mutex;

use crate::error::{DatasetError, DatasetResult};

use super::{BlobKey, BlobStore};

/// Blob store that keeps everything in a map; nothing survives the process
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: Mutex<HashMap<BlobKey, Vec<u8>>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored blobs
    pub fn len(&self) -> usize {
        self.blobs.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.lock().is_empty()
    }
}

impl BlobStore for MemoryBlobStore {
    fn put(&self, key: &BlobKey, bytes: &[u8]) -> DatasetResult<()> {
        self.blobs.lock().insert(key.clone(), bytes.to_vec());
        Ok(())
    }

    fn get(&self, key: &BlobKey) -> DatasetResult<Vec<u8>> {
        self.blobs
            .lock()
            .get(key)
            .cloned()
            .ok_or_else(|| DatasetError::BlobNotFound(key.clone()))
    }

    fn contains(&self, key: &BlobKey) -> bool {
        self.blobs.lock().contains_key(key)
    }

    fn remove(&self, key: &BlobKey) -> DatasetResult<bool> {
        Ok(self.blobs.lock().remove(key).is_some())
    }
}
