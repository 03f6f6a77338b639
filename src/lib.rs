//! Knowledge Graph Dataset Preparation
//!
//! Turns raw `(head, relation, tail)` text triples into the inputs a
//! graph neural network trainer needs.
//!
//! # Features
//!
//! - **Triple loading**: single file or train/valid/test split, configurable delimiter
//! - **Vocabularies**: deterministic string ↔ index maps with reserved `OOV` / `""` entries
//! - **Filter index**: known training links for filtered ranking evaluation
//! - **Graph building**: bidirectional multigraph with inverse relations and in-degree norms
//! - **Caching**: dictionaries and filter index persisted through a pluggable blob store
//!
//! # Modules
//!
//! - `types`: Core data structures (Triple, IndexedTriple, TokenKind, Split)
//! - `triple_store`: Text loading
//! - `vocabulary`: Token vocabularies and the persisted dictionary shape
//! - `filter_index`: Known-link index for evaluation filtering
//! - `graph_builder`: Degree-normalized graph and adjacency lists
//! - `blob_store`: File and in-memory blob stores
//! - `dataset`: Pipeline facade and configuration
//! - `utils`: Atomic file writes
//!
//! # Example
//!
//! ```no_run
//! use kg_dataset::{DatasetConfig, FileBlobStore, KgDataset, Split};
//!
//! fn main() -> kg_dataset::DatasetResult<()> {
//!     let config = DatasetConfig::new("FB15k-237").with_data_dir("./dataset");
//!     let store = FileBlobStore::new(config.cache_dir());
//!     let mut dataset = KgDataset::build(&config, store)?;
//!
//!     dataset.generate_filter_index()?;
//!     let built = dataset.build_graph(Split::Train)?;
//!     println!("{} edges", built.graph.num_edges());
//!     Ok(())
//! }
//! ```

pub mod blob_store;
pub mod dataset;
pub mod error;
pub mod filter_index;
pub mod graph_builder;
pub mod triple_store;
pub mod types;
pub mod utils;
pub mod vocabulary;

// Re-export commonly used items at crate root
pub use blob_store::{BlobKey, BlobKind, BlobStore, FileBlobStore, MemoryBlobStore};
pub use dataset::{DatasetConfig, KgDataset, Layout};
pub use error::{DatasetError, DatasetResult};
pub use filter_index::FilterIndex;
pub use graph_builder::{
    adjacency_and_degrees, build_graph, AdjacencyIndex, BuiltGraph, Graph,
};
pub use triple_store::{Delimiter, SplitFiles, TripleSource, TripleStore};
pub use types::{IndexedTriple, Split, TokenKind, Triple};
pub use vocabulary::{TokenVocabulary, Vocabularies};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
