//! Dataset configuration

use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{DatasetError, DatasetResult};
use crate::triple_store::{Delimiter, SplitFiles, TripleSource, TripleStore};

/// How a dataset's triples are laid out on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// `<dataset>/triples.txt`
    Single,
    /// `<dataset>/{train,valid,test}.txt`
    #[default]
    Split,
}

impl FromStr for Layout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single" => Ok(Layout::Single),
            "split" => Ok(Layout::Split),
            other => Err(format!(
                "unknown layout '{}', expected single or split",
                other
            )),
        }
    }
}

/// Configuration for one dataset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetConfig {
    /// Dataset name; also the blob store key
    pub name: String,
    /// Directory holding one sub-directory per dataset
    pub data_dir: PathBuf,
    /// Root for cached blobs; defaults to `data_dir`
    pub cache_dir: Option<PathBuf>,
    pub delimiter: Delimiter,
    pub layout: Layout,
    /// File name used by [`Layout::Single`]
    pub single_file: String,
    /// File names used by [`Layout::Split`]
    pub split_files: SplitFiles,
}

impl DatasetConfig {
    /// Config with defaults: `./dataset`, tab delimiter, split layout
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_dir: PathBuf::from("dataset"),
            cache_dir: None,
            delimiter: Delimiter::default(),
            layout: Layout::default(),
            single_file: "triples.txt".to_string(),
            split_files: SplitFiles::default(),
        }
    }

    pub fn with_data_dir<P: AsRef<Path>>(mut self, data_dir: P) -> Self {
        self.data_dir = data_dir.as_ref().to_path_buf();
        self
    }

    pub fn with_cache_dir<P: AsRef<Path>>(mut self, cache_dir: P) -> Self {
        self.cache_dir = Some(cache_dir.as_ref().to_path_buf());
        self
    }

    pub fn with_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_split_files(mut self, split_files: SplitFiles) -> Self {
        self.split_files = split_files;
        self
    }

    /// `<data_dir>/<name>`
    pub fn dataset_dir(&self) -> PathBuf {
        self.data_dir.join(&self.name)
    }

    /// Root directory for the file blob store
    pub fn cache_dir(&self) -> &Path {
        self.cache_dir.as_deref().unwrap_or(&self.data_dir)
    }

    /// Triple store reading this dataset's text files
    pub fn triple_store(&self) -> TripleStore {
        let source = match self.layout {
            Layout::Single => TripleSource::Single(self.dataset_dir().join(&self.single_file)),
            Layout::Split => TripleSource::Split {
                base_dir: self.dataset_dir(),
                files: self.split_files.clone(),
            },
        };
        TripleStore::new(source, self.delimiter)
    }

    /// Read configuration from the process environment
    ///
    /// - `KG_DATASET` (required): dataset name
    /// - `KG_DATA_DIR`: data root, default `./dataset`
    /// - `KG_CACHE_DIR`: blob root, default the data root
    /// - `KG_DELIMITER`: `tab`, `whitespace`, `comma` or one character
    /// - `KG_LAYOUT`: `single` or `split`
    pub fn from_env() -> DatasetResult<Self> {
        let current_dir = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::from_vars(&current_dir, |key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an explicit variable source
    ///
    /// Relative directories are resolved against `current_dir`.
    pub fn from_vars<F>(current_dir: &Path, var: F) -> DatasetResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let name = var("KG_DATASET")
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| DatasetError::Config("KG_DATASET is not set".to_string()))?;

        let resolve = |path: String| {
            let path = PathBuf::from(path);
            if path.is_absolute() {
                path
            } else {
                current_dir.join(path)
            }
        };

        let mut config = Self::new(name)
            .with_data_dir(resolve(var("KG_DATA_DIR").unwrap_or_else(|| "dataset".to_string())));

        if let Some(cache_dir) = var("KG_CACHE_DIR") {
            config = config.with_cache_dir(resolve(cache_dir));
        }
        if let Some(delimiter) = var("KG_DELIMITER") {
            config.delimiter = delimiter.parse::<Delimiter>().map_err(DatasetError::Config)?;
        }
        if let Some(layout) = var("KG_LAYOUT") {
            config.layout = layout.parse::<Layout>().map_err(DatasetError::Config)?;
        }

        Ok(config)
    }
}
