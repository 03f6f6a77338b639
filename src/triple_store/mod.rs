//! Triple Store - raw triple loading
//!
//! Reads delimited text files with one `head<delim>relation<delim>tail` fact
//! per line. A store reads either a single file or a train/valid/test split,
//! chosen by [`TripleSource`].
//!
//! ```text
//! Single:  <path>                       ──► triples (file order)
//! Split:   <base>/train.txt ─┐
//!          <base>/valid.txt ─┼─ concat ──► triples (train, valid, test)
//!          <base>/test.txt  ─┘
//! ```

mod delimiter;

use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{DatasetError, DatasetResult};
use crate::types::{Split, Triple};

pub use delimiter::Delimiter;

/// File names of the three splits inside a split dataset directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitFiles {
    pub train: String,
    pub valid: String,
    pub test: String,
}

impl Default for SplitFiles {
    fn default() -> Self {
        Self {
            train: "train.txt".to_string(),
            valid: "valid.txt".to_string(),
            test: "test.txt".to_string(),
        }
    }
}

impl SplitFiles {
    /// File name for one split
    pub fn file_name(&self, split: Split) -> &str {
        match split {
            Split::Train => &self.train,
            Split::Valid => &self.valid,
            Split::Test => &self.test,
        }
    }
}

/// Where a store reads its triples from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TripleSource {
    /// One file holding the whole dataset
    Single(PathBuf),
    /// Three files under a common directory
    Split { base_dir: PathBuf, files: SplitFiles },
}

impl TripleSource {
    /// Path of the file backing `split`.
    ///
    /// A single-file source serves every split from its only file.
    pub fn path_for(&self, split: Split) -> PathBuf {
        match self {
            TripleSource::Single(path) => path.clone(),
            TripleSource::Split { base_dir, files } => base_dir.join(files.file_name(split)),
        }
    }
}

/// Loader for one dataset's triples
#[derive(Debug, Clone)]
pub struct TripleStore {
    source: TripleSource,
    delimiter: Delimiter,
}

impl TripleStore {
    /// Create a store for the given source and delimiter
    pub fn new(source: TripleSource, delimiter: Delimiter) -> Self {
        Self { source, delimiter }
    }

    /// Store reading a single tab-separated file
    pub fn single<P: AsRef<Path>>(path: P) -> Self {
        Self::new(
            TripleSource::Single(path.as_ref().to_path_buf()),
            Delimiter::default(),
        )
    }

    /// Store reading `train.txt`, `valid.txt` and `test.txt` under `base_dir`
    pub fn split<P: AsRef<Path>>(base_dir: P) -> Self {
        Self::new(
            TripleSource::Split {
                base_dir: base_dir.as_ref().to_path_buf(),
                files: SplitFiles::default(),
            },
            Delimiter::default(),
        )
    }

    /// Replace the field delimiter
    pub fn with_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn source(&self) -> &TripleSource {
        &self.source
    }

    pub fn delimiter(&self) -> Delimiter {
        self.delimiter
    }

    /// Load the whole dataset
    pub fn load(&self) -> DatasetResult<Vec<Triple>> {
        match &self.source {
            TripleSource::Single(path) => load(path, self.delimiter),
            TripleSource::Split { base_dir, files } => load_split(base_dir, files, self.delimiter),
        }
    }

    /// Load the triples of a single split
    pub fn load_part(&self, split: Split) -> DatasetResult<Vec<Triple>> {
        let path = self.source.path_for(split);
        debug!(split = %split, path = %path.display(), "loading split");
        read_file(&path, self.delimiter)
    }
}

/// Load all triples from one file, in file order
pub fn load<P: AsRef<Path>>(path: P, delimiter: Delimiter) -> DatasetResult<Vec<Triple>> {
    let triples = read_file(path.as_ref(), delimiter)?;
    info!("Total samples number: {}", triples.len());
    Ok(triples)
}

/// Load and concatenate the train, valid and test files under `base_dir`
///
/// Fails with [`DatasetError::FileNotFound`] if any of the three is missing.
pub fn load_split<P: AsRef<Path>>(
    base_dir: P,
    files: &SplitFiles,
    delimiter: Delimiter,
) -> DatasetResult<Vec<Triple>> {
    let base_dir = base_dir.as_ref();
    let mut triples = Vec::new();

    for split in Split::ALL {
        let part = read_file(&base_dir.join(files.file_name(split)), delimiter)?;
        debug!(split = %split, triples = part.len(), "loaded split");
        triples.extend(part);
    }

    info!("Total samples number: {}", triples.len());
    Ok(triples)
}

fn read_file(path: &Path, delimiter: Delimiter) -> DatasetResult<Vec<Triple>> {
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => DatasetError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => DatasetError::Io(e),
    })?;

    parse_triples(BufReader::new(file), path, delimiter)
}

/// Parse triples from any buffered reader
///
/// `path` is only used for error reporting. Empty lines are skipped (and
/// whitespace-only lines when splitting on whitespace); every other line
/// must split into exactly three fields.
pub fn parse_triples<R: BufRead>(
    reader: R,
    path: &Path,
    delimiter: Delimiter,
) -> DatasetResult<Vec<Triple>> {
    let mut triples = Vec::new();

    for (line_num, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        let line = line.strip_suffix('\r').unwrap_or(&line);
        // a line of delimiters is malformed unless whitespace is the delimiter
        let blank = match delimiter {
            Delimiter::Whitespace => line.trim().is_empty(),
            _ => line.is_empty(),
        };
        if blank {
            continue;
        }

        let fields = delimiter.split(line);
        if fields.len() != 3 {
            return Err(DatasetError::Format {
                path: path.to_path_buf(),
                line: line_num + 1,
                fields: fields.len(),
            });
        }

        triples.push(Triple::new(fields[0], fields[1], fields[2]));
    }

    Ok(triples)
}
