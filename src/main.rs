//! kg-prepare - Binary Entry Point
//!
//! Builds (or reopens) a dataset's vocabularies, generates the filter index
//! and reports the training graph. Configured through `KG_*` environment
//! variables; see [`DatasetConfig::from_env`].

use std::env;

use tracing::info;
use tracing_subscriber::EnvFilter;

use kg_dataset::blob_store::{BlobKey, BlobStore, FileBlobStore};
use kg_dataset::dataset::{DatasetConfig, KgDataset, Layout};
use kg_dataset::types::Split;
use kg_dataset::DatasetResult;

fn main() -> DatasetResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = DatasetConfig::from_env()?;
    let store = FileBlobStore::new(config.cache_dir());
    store.remove_partial_writes(&config.name)?;

    // KG_REUSE=1 skips text parsing when a cached dictionary exists
    let reuse = matches!(env::var("KG_REUSE").as_deref(), Ok("1") | Ok("true"));
    let mut dataset = if reuse && store.contains(&BlobKey::dictionary(&config.name)) {
        KgDataset::open(&config, store)?
    } else {
        KgDataset::build(&config, store)?
    };

    if config.layout == Layout::Split {
        dataset.generate_filter_index()?;
    }

    let built = dataset.build_graph(Split::Train)?;
    let adjacency = dataset.adjacency(Split::Train)?;
    let isolated = built.node_norm.iter().filter(|&&n| n == 0.0).count();

    info!(
        dataset = dataset.name(),
        entities = dataset.num_entities(),
        relations = dataset.num_relations(),
        nodes = built.graph.num_nodes(),
        edges = built.graph.num_edges(),
        isolated,
        max_degree = adjacency.degrees().iter().copied().max().unwrap_or(0),
        "dataset ready"
    );

    Ok(())
}
