//! Atomic file writes
//!
//! Blobs are written to a `.tmp` sibling, synced, then renamed over the
//! destination, so a reader sees either the previous blob or the new one.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Path of the temporary sibling used while writing `path`
pub fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Atomically replace `path` with `bytes`, creating parent directories
pub fn atomic_write<P: AsRef<Path>>(path: P, bytes: &[u8]) -> std::io::Result<()> {
    let path = path.as_ref();
    let tmp = temp_path(path);

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    {
        let mut file = File::create(&tmp)?;
        file.write_all(bytes)?;
        file.sync_all()?;
    }

    fs::rename(&tmp, path)
}

/// Remove the temporary sibling of `path` left by an interrupted write
///
/// Returns whether one was found.
pub fn remove_temp<P: AsRef<Path>>(path: P) -> std::io::Result<bool> {
    match fs::remove_file(temp_path(path.as_ref())) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_atomic_write_replaces_content() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("dict_data.json");

        atomic_write(&path, b"first").unwrap();
        atomic_write(&path, b"second").unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"second");
        assert!(!temp_path(&path).exists());
    }

    #[test]
    fn test_atomic_write_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("fb15k").join("nested").join("blob.json");

        atomic_write(&path, b"{}").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_temp_path_keeps_extension() {
        let tmp = temp_path(Path::new("/data/fb15k/dict_data.json"));
        assert_eq!(tmp, PathBuf::from("/data/fb15k/dict_data.json.tmp"));
    }

    #[test]
    fn test_remove_temp_only_touches_own_sibling() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("dict_data.json");
        fs::write(temp_path(&path), "partial").unwrap();
        fs::write(temp_dir.path().join("notes.tmp"), "user file").unwrap();

        assert!(remove_temp(&path).unwrap());
        assert!(!temp_path(&path).exists());
        assert!(temp_dir.path().join("notes.tmp").exists());
        assert!(!remove_temp(&path).unwrap());
    }
}
