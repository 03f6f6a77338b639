//! Filesystem-backed blob store

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{DatasetError, DatasetResult};
use crate::utils::atomic::{atomic_write, remove_temp};

use super::{BlobKey, BlobKind, BlobStore};

/// Blob store laying blobs out as `<root>/<dataset>/<kind file>`
#[derive(Debug, Clone)]
pub struct FileBlobStore {
    root: PathBuf,
}

impl FileBlobStore {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File backing `key`
    pub fn path_for(&self, key: &BlobKey) -> PathBuf {
        self.root.join(&key.dataset).join(key.kind.file_name())
    }

    /// Delete temp files of interrupted blob writes for `dataset`
    ///
    /// Only the temp names of known blob kinds are touched, since the
    /// cache directory may be shared with the dataset's text files.
    pub fn remove_partial_writes(&self, dataset: &str) -> DatasetResult<usize> {
        let mut removed = 0;
        for kind in BlobKind::ALL {
            if remove_temp(self.path_for(&BlobKey::new(dataset, kind)))? {
                removed += 1;
            }
        }
        if removed > 0 {
            debug!(dataset, removed, "removed partial blob writes");
        }
        Ok(removed)
    }
}

impl BlobStore for FileBlobStore {
    fn put(&self, key: &BlobKey, bytes: &[u8]) -> DatasetResult<()> {
        let path = self.path_for(key);
        atomic_write(&path, bytes)?;
        debug!(path = %path.display(), bytes = bytes.len(), "wrote blob");
        Ok(())
    }

    fn get(&self, key: &BlobKey) -> DatasetResult<Vec<u8>> {
        fs::read(self.path_for(key)).map_err(|e| match e.kind() {
            ErrorKind::NotFound => DatasetError::BlobNotFound(key.clone()),
            _ => DatasetError::Io(e),
        })
    }

    fn contains(&self, key: &BlobKey) -> bool {
        self.path_for(key).is_file()
    }

    fn remove(&self, key: &BlobKey) -> DatasetResult<bool> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
