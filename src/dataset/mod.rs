//! Dataset pipeline
//!
//! Ties the components together for one dataset:
//!
//! ```text
//! Build:   TripleStore.load() ──► Vocabularies ──► save dict_data
//! Open:    load dict_data ──────► Vocabularies
//! Filter:  train split ──► FilterIndex ──► save filter_node  (lazy load on lookup)
//! Graph:   any split ──► indexed triples ──► build_graph
//! ```

mod config;

use tracing::{debug, info, warn};

use crate::blob_store::{load_json, save_json, BlobKey, BlobStore};
use crate::error::DatasetResult;
use crate::filter_index::FilterIndex;
use crate::graph_builder::{adjacency_and_degrees, build_graph, AdjacencyIndex, BuiltGraph};
use crate::triple_store::TripleStore;
use crate::types::{IndexedTriple, Split, TokenKind, Triple};
use crate::vocabulary::{DictionaryBlob, TokenVocabulary, Vocabularies};

pub use config::{DatasetConfig, Layout};

/// One knowledge graph dataset with its vocabularies and cached indexes
pub struct KgDataset<S: BlobStore> {
    name: String,
    store: S,
    triple_store: TripleStore,
    /// Raw triples; empty when the dataset was opened from the blob store
    data: Vec<Triple>,
    vocabularies: Vocabularies,
    filter_index: Option<FilterIndex>,
}

impl<S: BlobStore> KgDataset<S> {
    /// Load triples per `config`, build both vocabularies and persist the dictionary
    pub fn build(config: &DatasetConfig, store: S) -> DatasetResult<Self> {
        Self::build_from(config.name.clone(), config.triple_store(), store)
    }

    /// Same as [`build`](Self::build) with an explicit triple store
    pub fn build_from(
        name: impl Into<String>,
        triple_store: TripleStore,
        store: S,
    ) -> DatasetResult<Self> {
        let data = triple_store.load()?;

        info!("processing data...");
        let vocabularies = Vocabularies::from_triples(&data);
        info!(
            entities = vocabularies.entities.size(),
            relations = vocabularies.relations.size(),
            "built vocabularies"
        );

        let dataset = Self {
            name: name.into(),
            store,
            triple_store,
            data,
            vocabularies,
            filter_index: None,
        };
        dataset.save()?;

        // a cached filter index refers to the previous vocabulary's indices
        if dataset.store.remove(&BlobKey::filter_index(&dataset.name))? {
            info!(dataset = %dataset.name, "removed stale filter index");
        }
        Ok(dataset)
    }

    /// Restore vocabularies from the dictionary blob without parsing text
    ///
    /// Fails with `BlobNotFound` if the dataset was never built.
    pub fn open(config: &DatasetConfig, store: S) -> DatasetResult<Self> {
        Self::open_from(config.name.clone(), config.triple_store(), store)
    }

    /// Same as [`open`](Self::open) with an explicit triple store
    pub fn open_from(
        name: impl Into<String>,
        triple_store: TripleStore,
        store: S,
    ) -> DatasetResult<Self> {
        let name = name.into();
        info!("loading data...");
        let (_, blob): (_, DictionaryBlob) = load_json(&store, &BlobKey::dictionary(&name))?;
        let vocabularies = Vocabularies::from_blob(blob)?;

        Ok(Self {
            name,
            store,
            triple_store,
            data: Vec::new(),
            vocabularies,
            filter_index: None,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Triples read during [`build`](Self::build)
    pub fn data(&self) -> &[Triple] {
        &self.data
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn triple_store(&self) -> &TripleStore {
        &self.triple_store
    }

    pub fn vocabularies(&self) -> &Vocabularies {
        &self.vocabularies
    }

    pub fn entity_vocab(&self) -> &TokenVocabulary {
        &self.vocabularies.entities
    }

    pub fn relation_vocab(&self) -> &TokenVocabulary {
        &self.vocabularies.relations
    }

    /// Number of distinct entities, reserved entries excluded
    pub fn num_entities(&self) -> usize {
        self.vocabularies.entities.size()
    }

    /// Number of distinct relations, reserved entries excluded
    pub fn num_relations(&self) -> usize {
        self.vocabularies.relations.size()
    }

    /// Node count for graph construction: every entity index, reserved ones included
    pub fn num_nodes(&self) -> usize {
        self.vocabularies.entities.index_space()
    }

    /// Relation id count for graph construction, reserved ones included
    pub fn num_relation_ids(&self) -> usize {
        self.vocabularies.relations.index_space()
    }

    /// Index of `token` in the vocabulary of `kind`, 0 if unknown
    pub fn index_of(&self, token: &str, kind: TokenKind) -> usize {
        self.vocabularies.get(kind).index_of(token)
    }

    /// Token at `index` in the vocabulary of `kind`, `"OOV"` if unassigned
    pub fn token_of(&self, index: usize, kind: TokenKind) -> &str {
        self.vocabularies.get(kind).token_of(index)
    }

    pub fn index_triple(&self, triple: &Triple) -> IndexedTriple {
        IndexedTriple::new(
            self.vocabularies.entities.index_of(&triple.head),
            self.vocabularies.relations.index_of(&triple.relation),
            self.vocabularies.entities.index_of(&triple.tail),
        )
    }

    /// OOV-safe conversion of raw triples
    pub fn index_triples(&self, triples: &[Triple]) -> Vec<IndexedTriple> {
        triples.iter().map(|t| self.index_triple(t)).collect()
    }

    /// Raw triples of one split, read from the text source
    pub fn split_triples(&self, split: Split) -> DatasetResult<Vec<Triple>> {
        self.triple_store.load_part(split)
    }

    /// Build the filter index from the training split and persist it
    pub fn generate_filter_index(&mut self) -> DatasetResult<&FilterIndex> {
        let training = self.split_triples(Split::Train)?;
        let index = FilterIndex::build(
            &training,
            &self.vocabularies.entities,
            &self.vocabularies.relations,
        );
        info!(
            training = training.len(),
            entities = index.entity_count(),
            links = index.link_count(),
            "generated filter index"
        );

        let key = BlobKey::filter_index(&self.name);
        let unchanged = self.store.contains(&key)
            && load_json::<_, FilterIndex>(&self.store, &key)
                .map(|(_, cached)| cached.same_links(&index))
                .unwrap_or(false);
        if unchanged {
            debug!(blob = %key, "filter index unchanged, keeping cached blob");
        } else {
            save_json(&self.store, &key, &index, index.link_count())?;
        }
        Ok(&*self.filter_index.insert(index))
    }

    /// Filter index, loaded from the blob store on first use
    pub fn filter_index(&mut self) -> DatasetResult<&FilterIndex> {
        let index = match self.filter_index.take() {
            Some(index) => index,
            None => {
                let (_, index): (_, FilterIndex) =
                    load_json(&self.store, &BlobKey::filter_index(&self.name))?;
                index
            }
        };
        Ok(&*self.filter_index.insert(index))
    }

    /// Known training targets for `(entity, relation)`
    pub fn filter_lookup(&mut self, entity: usize, relation: usize) -> DatasetResult<&[usize]> {
        self.filter_index()?.lookup(entity, relation)
    }

    /// Like [`filter_lookup`](Self::filter_lookup), but a pair never seen in
    /// training has no known targets instead of being an error
    pub fn known_targets(&mut self, entity: usize, relation: usize) -> DatasetResult<&[usize]> {
        match self.filter_lookup(entity, relation) {
            Err(e) if e.is_filter_miss() => Ok(&[]),
            other => other,
        }
    }

    /// Degree-normalized graph over one split
    pub fn build_graph(&self, split: Split) -> DatasetResult<BuiltGraph> {
        let triples = self.split_triples(split)?;
        self.build_graph_from(&triples)
    }

    /// Degree-normalized graph over arbitrary raw triples
    pub fn build_graph_from(&self, triples: &[Triple]) -> DatasetResult<BuiltGraph> {
        let indexed = self.index_triples(triples);
        build_graph(self.num_nodes(), self.num_relation_ids(), &indexed)
    }

    /// Incidence lists over one split, edge ids being positions in that split
    pub fn adjacency(&self, split: Split) -> DatasetResult<AdjacencyIndex> {
        let indexed = self.index_triples(&self.split_triples(split)?);
        adjacency_and_degrees(self.num_nodes(), &indexed)
    }

    /// Persist the dictionary, and the filter index when one is loaded and non-empty
    pub fn save(&self) -> DatasetResult<()> {
        let blob = self.vocabularies.to_blob();
        save_json(
            &self.store,
            &BlobKey::dictionary(&self.name),
            &blob,
            blob.entry_count(),
        )?;

        match &self.filter_index {
            Some(index) if !index.is_empty() => {
                info!("saving filter_node dict...");
                save_json(
                    &self.store,
                    &BlobKey::filter_index(&self.name),
                    index,
                    index.link_count(),
                )?;
            }
            Some(_) => warn!(dataset = %self.name, "filter index is empty, not saved"),
            None => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blob_store::MemoryBlobStore;
    use crate::error::DatasetError;
    use std::fs;
    use tempfile::TempDir;

    fn write_dataset(dir: &std::path::Path) {
        fs::write(dir.join("train.txt"), "a\tr1\tb\nb\tr2\tc\n").unwrap();
        fs::write(dir.join("valid.txt"), "a\tr2\tc\n").unwrap();
        fs::write(dir.join("test.txt"), "c\tr1\td\n").unwrap();
    }

    fn build_toy() -> (KgDataset<MemoryBlobStore>, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        write_dataset(temp_dir.path());
        let dataset = KgDataset::build_from(
            "toy",
            TripleStore::split(temp_dir.path()),
            MemoryBlobStore::new(),
        )
        .unwrap();
        (dataset, temp_dir)
    }

    #[test]
    fn test_build_counts_and_persists_dictionary() {
        let (dataset, _temp_dir) = build_toy();

        assert_eq!(dataset.data().len(), 4);
        assert_eq!(dataset.num_entities(), 4);
        assert_eq!(dataset.num_relations(), 2);
        assert_eq!(dataset.num_nodes(), 6);
        assert!(dataset.store().contains(&BlobKey::dictionary("toy")));
        assert!(!dataset.store().contains(&BlobKey::filter_index("toy")));
    }

    #[test]
    fn test_label_dispatched_lookup() {
        let (dataset, _temp_dir) = build_toy();

        assert_eq!(dataset.index_of("a", TokenKind::Entity), 2);
        assert_eq!(dataset.index_of("r1", TokenKind::Relation), 2);
        assert_eq!(dataset.index_of("r1", TokenKind::Entity), 0);
        assert_eq!(dataset.token_of(5, TokenKind::Entity), "d");
        assert_eq!(dataset.token_of(5, TokenKind::Relation), "OOV");
    }

    #[test]
    fn test_filter_index_uses_training_split_only() {
        let (mut dataset, _temp_dir) = build_toy();
        let a = dataset.index_of("a", TokenKind::Entity);
        let b = dataset.index_of("b", TokenKind::Entity);
        let c = dataset.index_of("c", TokenKind::Entity);
        let r1 = dataset.index_of("r1", TokenKind::Relation);
        let r2 = dataset.index_of("r2", TokenKind::Relation);

        dataset.generate_filter_index().unwrap();

        assert_eq!(dataset.filter_lookup(a, r1).unwrap(), &[b]);
        assert_eq!(dataset.filter_lookup(c, r2).unwrap(), &[b]);
        // (a, r2, c) only appears in valid
        assert!(matches!(
            dataset.filter_lookup(a, r2),
            Err(DatasetError::UnknownRelation { .. })
        ));
        let d = dataset.index_of("d", TokenKind::Entity);
        assert!(matches!(
            dataset.filter_lookup(d, r1),
            Err(DatasetError::UnknownEntity(_))
        ));
    }

    #[test]
    fn test_filter_index_lazy_load() {
        let (mut dataset, _temp_dir) = build_toy();
        let expected = dataset.generate_filter_index().unwrap().clone();

        let store = MemoryBlobStore::new();
        let dict = dataset.store().get(&BlobKey::dictionary("toy")).unwrap();
        let filter = dataset.store().get(&BlobKey::filter_index("toy")).unwrap();
        store.put(&BlobKey::dictionary("toy"), &dict).unwrap();
        store.put(&BlobKey::filter_index("toy"), &filter).unwrap();

        let mut reopened =
            KgDataset::open_from("toy", dataset.triple_store().clone(), store).unwrap();
        assert!(reopened.data().is_empty());
        assert_eq!(reopened.filter_index().unwrap(), &expected);
    }

    #[test]
    fn test_filter_index_missing_blob() {
        let (mut dataset, _temp_dir) = build_toy();
        assert!(matches!(
            dataset.filter_index(),
            Err(DatasetError::BlobNotFound(_))
        ));
    }

    #[test]
    fn test_rebuild_drops_filter_index_of_previous_vocabulary() {
        let temp_dir = TempDir::new().unwrap();
        let store = MemoryBlobStore::new();
        fs::write(temp_dir.path().join("train.txt"), "b\tr\tc\n").unwrap();
        fs::write(temp_dir.path().join("valid.txt"), "").unwrap();
        fs::write(temp_dir.path().join("test.txt"), "").unwrap();

        let mut first =
            KgDataset::build_from("toy", TripleStore::split(temp_dir.path()), &store).unwrap();
        first.generate_filter_index().unwrap();
        assert!(store.contains(&BlobKey::filter_index("toy")));

        fs::write(temp_dir.path().join("train.txt"), "a\tr\tb\nc\ts\td\n").unwrap();
        let mut rebuilt =
            KgDataset::build_from("toy", TripleStore::split(temp_dir.path()), &store).unwrap();
        assert!(!store.contains(&BlobKey::filter_index("toy")));
        assert!(matches!(
            rebuilt.filter_index(),
            Err(DatasetError::BlobNotFound(_))
        ));

        let c = rebuilt.index_of("c", TokenKind::Entity);
        let d = rebuilt.index_of("d", TokenKind::Entity);
        let s = rebuilt.index_of("s", TokenKind::Relation);
        rebuilt.generate_filter_index().unwrap();
        assert_eq!(rebuilt.filter_lookup(c, s).unwrap(), &[d]);
    }

    #[test]
    fn test_regenerating_identical_filter_index_keeps_blob() {
        let (mut dataset, _temp_dir) = build_toy();
        dataset.generate_filter_index().unwrap();
        let key = BlobKey::filter_index("toy");
        let (first_meta, _): (_, FilterIndex) = load_json(dataset.store(), &key).unwrap();

        dataset.generate_filter_index().unwrap();
        let (second_meta, _): (_, FilterIndex) = load_json(dataset.store(), &key).unwrap();
        assert_eq!(first_meta, second_meta);
    }

    #[test]
    fn test_known_targets_treats_misses_as_empty() {
        let (mut dataset, _temp_dir) = build_toy();
        let a = dataset.index_of("a", TokenKind::Entity);
        let b = dataset.index_of("b", TokenKind::Entity);
        let d = dataset.index_of("d", TokenKind::Entity);
        let r1 = dataset.index_of("r1", TokenKind::Relation);
        let r2 = dataset.index_of("r2", TokenKind::Relation);

        // without a filter index the blob miss still propagates
        assert!(matches!(
            dataset.known_targets(a, r1),
            Err(DatasetError::BlobNotFound(_))
        ));

        dataset.generate_filter_index().unwrap();
        assert_eq!(dataset.known_targets(a, r1).unwrap(), &[b]);
        assert!(dataset.known_targets(a, r2).unwrap().is_empty());
        assert!(dataset.known_targets(d, r1).unwrap().is_empty());
    }

    #[test]
    fn test_open_without_dictionary() {
        let temp_dir = TempDir::new().unwrap();
        let result = KgDataset::open_from(
            "missing",
            TripleStore::split(temp_dir.path()),
            MemoryBlobStore::new(),
        );
        assert!(matches!(result, Err(DatasetError::BlobNotFound(_))));
    }

    #[test]
    fn test_build_graph_for_split() {
        let (dataset, _temp_dir) = build_toy();
        let built = dataset.build_graph(Split::Train).unwrap();

        assert_eq!(built.graph.num_nodes(), dataset.num_nodes());
        assert_eq!(built.graph.num_edges(), 4);
        assert_eq!(built.edge_relations.len(), 4);
        // inverse relation ids start after the relation index space
        assert!(built
            .edge_relations
            .iter()
            .any(|&r| r >= dataset.num_relation_ids()));
    }

    #[test]
    fn test_graph_over_unknown_tokens_uses_oov_node() {
        let (dataset, _temp_dir) = build_toy();
        let built = dataset
            .build_graph_from(&[Triple::new("a", "r1", "stranger")])
            .unwrap();
        assert!(built.graph.edges().any(|(s, d)| s == 0 || d == 0));
    }

    #[test]
    fn test_adjacency_for_split() {
        let (dataset, _temp_dir) = build_toy();
        let adjacency = dataset.adjacency(Split::Train).unwrap();
        let b = dataset.index_of("b", TokenKind::Entity);
        assert_eq!(adjacency.degree(b), 2);
    }
}
